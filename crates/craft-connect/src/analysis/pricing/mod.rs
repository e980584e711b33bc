mod estimators;

pub use estimators::{
    CategoryMarkupEstimator, EstimatorUnavailable, FeatureValue, LaborEstimator, PriceEstimator,
    PriceFeatures, RegressionEstimator, RegressionModel,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::numeric::{mean, population_std, round2};

const DEFAULT_MARGIN: f64 = 0.1;
const DEFAULT_PRICE: f64 = 1000.0;
const DEFAULT_LABOR_RATE: f64 = 15.0;
const FALLBACK_CONFIDENCE: f64 = 0.3;
const MIN_ENSEMBLE_CONFIDENCE: f64 = 0.5;
const MAX_ENSEMBLE_CONFIDENCE: f64 = 0.95;

/// Dials for the pricing engine. Out-of-range values revert to defaults,
/// including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPricingConfig")]
pub struct PricingConfig {
    pub margin: f64,
    pub default_price: f64,
    pub labor_rate: f64,
}

impl PricingConfig {
    pub fn new(margin: f64, default_price: f64, labor_rate: f64) -> Self {
        let margin = if margin.is_finite() && (0.0..1.0).contains(&margin) {
            margin
        } else {
            DEFAULT_MARGIN
        };
        let default_price = if default_price.is_finite() && default_price > 0.0 {
            default_price
        } else {
            DEFAULT_PRICE
        };
        let labor_rate = if labor_rate.is_finite() && labor_rate > 0.0 {
            labor_rate
        } else {
            DEFAULT_LABOR_RATE
        };

        Self {
            margin,
            default_price,
            labor_rate,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawPricingConfig {
    margin: f64,
    default_price: f64,
    labor_rate: f64,
}

impl Default for RawPricingConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            default_price: DEFAULT_PRICE,
            labor_rate: DEFAULT_LABOR_RATE,
        }
    }
}

impl From<RawPricingConfig> for PricingConfig {
    fn from(raw: RawPricingConfig) -> Self {
        Self::new(raw.margin, raw.default_price, raw.labor_rate)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN, DEFAULT_PRICE, DEFAULT_LABOR_RATE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Ensemble,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatorContribution {
    pub estimator: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEstimate {
    pub predicted_price: f64,
    pub confidence: f64,
    pub price_range: PriceRange,
    pub source: PriceSource,
    pub contributions: Vec<EstimatorContribution>,
    pub excluded: Vec<EstimatorUnavailable>,
}

/// Averages every available estimator; never fails.
#[derive(Clone)]
pub struct PricingEngine {
    config: PricingConfig,
    estimators: Vec<Arc<dyn PriceEstimator>>,
}

impl PricingEngine {
    /// Engine with the built-in category markup and labor estimators.
    pub fn new(config: PricingConfig) -> Self {
        Self {
            config,
            estimators: vec![
                Arc::new(CategoryMarkupEstimator),
                Arc::new(LaborEstimator::new(config.labor_rate)),
            ],
        }
    }

    pub fn without_estimators(config: PricingConfig) -> Self {
        Self {
            config,
            estimators: Vec::new(),
        }
    }

    pub fn with_estimator<E>(mut self, estimator: E) -> Self
    where
        E: PriceEstimator + 'static,
    {
        self.estimators.push(Arc::new(estimator));
        self
    }

    pub fn estimator_names(&self) -> Vec<&str> {
        self.estimators
            .iter()
            .map(|estimator| estimator.name())
            .collect()
    }

    pub fn estimate(&self, features: &PriceFeatures) -> PriceEstimate {
        let mut contributions = Vec::new();
        let mut excluded = Vec::new();

        for estimator in &self.estimators {
            match estimator.estimate(features) {
                Ok(price) if price.is_finite() && price > 0.0 => {
                    contributions.push(EstimatorContribution {
                        estimator: estimator.name().to_string(),
                        price,
                    });
                }
                Ok(price) => excluded.push(EstimatorUnavailable::new(
                    estimator.name(),
                    format!("non-positive estimate {price}"),
                )),
                Err(unavailable) => {
                    tracing::debug!(%unavailable, "price estimator excluded");
                    excluded.push(unavailable);
                }
            }
        }

        let prices: Vec<f64> = contributions.iter().map(|entry| entry.price).collect();
        let (price, confidence, source) = match (mean(&prices), population_std(&prices)) {
            (Some(mean), Some(std)) => {
                let confidence =
                    (1.0 - std / mean).clamp(MIN_ENSEMBLE_CONFIDENCE, MAX_ENSEMBLE_CONFIDENCE);
                (mean, confidence, PriceSource::Ensemble)
            }
            _ => {
                tracing::warn!(
                    excluded = excluded.len(),
                    default_price = self.config.default_price,
                    "no price estimator available, using default price"
                );
                (
                    self.config.default_price,
                    FALLBACK_CONFIDENCE,
                    PriceSource::Default,
                )
            }
        };

        for entry in &mut contributions {
            entry.price = round2(entry.price);
        }

        PriceEstimate {
            predicted_price: round2(price),
            confidence: round2(confidence),
            price_range: PriceRange {
                min: round2(price * (1.0 - self.config.margin)),
                max: round2(price * (1.0 + self.config.margin)),
            },
            source,
            contributions,
            excluded,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl std::fmt::Debug for PricingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingEngine")
            .field("config", &self.config)
            .field("estimators", &self.estimator_names())
            .finish()
    }
}
