use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const CATEGORY_MULTIPLIERS: [(&str, f64); 6] = [
    ("jewelry", 2.5),
    ("pottery", 2.0),
    ("textiles", 2.2),
    ("woodwork", 1.8),
    ("metalwork", 2.3),
    ("glass", 2.4),
];
const DEFAULT_CATEGORY_MULTIPLIER: f64 = 2.0;
const MATERIAL_MARKUP: f64 = 1.3;

/// Inputs shared by every price estimator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFeatures {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub base_material_price: Option<f64>,
    #[serde(default)]
    pub hours_of_labor: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<f64>,
    #[serde(default)]
    pub transport_distance_km: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub crafting_process: Option<String>,
    /// Normalized [0, 1] index from the sustainability analyzer.
    #[serde(default)]
    pub sustainability_index: Option<f64>,
}

impl PriceFeatures {
    fn positive(value: Option<f64>) -> Option<f64> {
        value.filter(|value| value.is_finite() && *value > 0.0)
    }

    pub fn base_price(&self) -> Option<f64> {
        Self::positive(self.base_material_price)
    }

    pub fn labor_hours(&self) -> Option<f64> {
        Self::positive(self.hours_of_labor)
    }

    /// Flattened view handed to external regression models. Absent numbers
    /// become `0` and absent labels become `unknown`.
    pub fn model_input(&self) -> BTreeMap<&'static str, FeatureValue> {
        let number = |value: Option<f64>| {
            FeatureValue::Number(value.filter(|value| value.is_finite()).unwrap_or(0.0))
        };
        let label = |value: &Option<String>| {
            FeatureValue::Text(
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .unwrap_or("unknown")
                    .to_lowercase(),
            )
        };

        BTreeMap::from([
            ("base_material_price", number(self.base_material_price)),
            ("dimensions", number(self.dimensions)),
            ("hours_of_labor", number(self.hours_of_labor)),
            ("transport_distance", number(self.transport_distance_km)),
            ("region", label(&self.region)),
            ("category", label(&self.category)),
            ("crafting_process", label(&self.crafting_process)),
            ("sustainability_score", number(self.sustainability_index)),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

/// An estimator that could not produce a point estimate for this input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{estimator} unavailable: {reason}")]
pub struct EstimatorUnavailable {
    pub estimator: String,
    pub reason: String,
}

impl EstimatorUnavailable {
    pub fn new(estimator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            estimator: estimator.into(),
            reason: reason.into(),
        }
    }
}

/// Seam for anything that can propose a price.
pub trait PriceEstimator: Send + Sync {
    fn name(&self) -> &str;
    fn estimate(&self, features: &PriceFeatures) -> Result<f64, EstimatorUnavailable>;
}

/// Opaque trained model (gradient boosting, random forest, ...) hosted elsewhere.
pub trait RegressionModel: Send + Sync {
    fn predict(&self, features: &BTreeMap<&'static str, FeatureValue>) -> Result<f64, String>;
}

/// Adapts a regression model to the estimator seam, rejecting unusable output.
pub struct RegressionEstimator<M> {
    name: String,
    model: M,
}

impl<M: RegressionModel> RegressionEstimator<M> {
    pub fn new(name: impl Into<String>, model: M) -> Self {
        Self {
            name: name.into(),
            model,
        }
    }
}

impl<M: RegressionModel> PriceEstimator for RegressionEstimator<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn estimate(&self, features: &PriceFeatures) -> Result<f64, EstimatorUnavailable> {
        let prediction = self
            .model
            .predict(&features.model_input())
            .map_err(|reason| EstimatorUnavailable::new(&self.name, reason))?;

        if prediction.is_finite() && prediction > 0.0 {
            Ok(prediction)
        } else {
            Err(EstimatorUnavailable::new(
                &self.name,
                format!("model returned unusable prediction {prediction}"),
            ))
        }
    }
}

/// `base_material_price * category multiplier`.
#[derive(Debug, Clone, Default)]
pub struct CategoryMarkupEstimator;

impl CategoryMarkupEstimator {
    pub const NAME: &'static str = "category_markup";

    pub fn multiplier(category: Option<&str>) -> f64 {
        let key = category.map(|value| value.trim().to_lowercase());
        CATEGORY_MULTIPLIERS
            .iter()
            .find(|(name, _)| key.as_deref() == Some(*name))
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(DEFAULT_CATEGORY_MULTIPLIER)
    }
}

impl PriceEstimator for CategoryMarkupEstimator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn estimate(&self, features: &PriceFeatures) -> Result<f64, EstimatorUnavailable> {
        let base = features.base_price().ok_or_else(|| {
            EstimatorUnavailable::new(Self::NAME, "base_material_price must be positive")
        })?;
        Ok(base * Self::multiplier(features.category.as_deref()))
    }
}

/// `labor_rate * hours + base_material_price * 1.3`.
#[derive(Debug, Clone)]
pub struct LaborEstimator {
    labor_rate: f64,
}

impl LaborEstimator {
    pub const NAME: &'static str = "labor";

    pub fn new(labor_rate: f64) -> Self {
        Self { labor_rate }
    }
}

impl PriceEstimator for LaborEstimator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn estimate(&self, features: &PriceFeatures) -> Result<f64, EstimatorUnavailable> {
        let hours = features.labor_hours().ok_or_else(|| {
            EstimatorUnavailable::new(Self::NAME, "hours_of_labor must be positive")
        })?;
        let materials = features.base_price().unwrap_or(0.0) * MATERIAL_MARKUP;
        Ok(self.labor_rate * hours + materials)
    }
}
