use serde::{Deserialize, Deserializer, Serialize};

/// How a product was made. Unrecognised labels collapse to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductionMethod {
    Handmade,
    SmallBatch,
    Factory,
    Other,
}

impl ProductionMethod {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase().replace(&['_', ' '][..], "-");
        match normalized.as_str() {
            "handmade" | "hand-made" | "handcrafted" => Self::Handmade,
            "small-batch" | "smallbatch" => Self::SmallBatch,
            "factory" | "machine-made" | "mass-production" => Self::Factory,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Handmade => "Handmade",
            Self::SmallBatch => "Small Batch",
            Self::Factory => "Factory",
            Self::Other => "Other",
        }
    }
}

/// Product attributes as received from a caller. Every field is optional so
/// validation can report exactly which required ones are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub weight_g: Option<f64>,
    #[serde(default)]
    pub packaging_weight_g: Option<f64>,
    #[serde(default)]
    pub distance_km_to_market: Option<f64>,
    #[serde(default)]
    pub percent_recycled_material: Option<f64>,
    #[serde(default)]
    pub production_method: Option<String>,
    #[serde(default, deserialize_with = "deserialize_materials")]
    pub materials: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Validated product ready for the eco-impact estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub category: String,
    pub weight_g: f64,
    pub packaging_weight_g: f64,
    pub distance_km_to_market: f64,
    pub percent_recycled_material: f64,
    pub production_method: ProductionMethod,
    pub materials: Vec<String>,
    pub description: String,
    pub price: Option<f64>,
}

/// Raised when required product attributes are absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields(fields) => fields,
        }
    }
}

impl Product {
    /// Checks that all six scoring inputs are present, then clamps numeric
    /// values into their documented ranges.
    pub fn from_draft(draft: &ProductDraft) -> Result<Self, ValidationError> {
        let mut missing = Vec::new();

        let category = draft
            .category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if category.is_none() {
            missing.push("category");
        }
        if draft.weight_g.is_none() {
            missing.push("weight_g");
        }
        if draft.packaging_weight_g.is_none() {
            missing.push("packaging_weight_g");
        }
        if draft.distance_km_to_market.is_none() {
            missing.push("distance_km_to_market");
        }
        if draft.percent_recycled_material.is_none() {
            missing.push("percent_recycled_material");
        }
        let method = draft
            .production_method
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if method.is_none() {
            missing.push("production_method");
        }

        match (
            category,
            draft.weight_g,
            draft.packaging_weight_g,
            draft.distance_km_to_market,
            draft.percent_recycled_material,
            method,
        ) {
            (
                Some(category),
                Some(weight_g),
                Some(packaging_weight_g),
                Some(distance_km),
                Some(recycled),
                Some(method),
            ) => Ok(Self {
                category: category.to_string(),
                weight_g: non_negative(weight_g),
                packaging_weight_g: non_negative(packaging_weight_g),
                distance_km_to_market: non_negative(distance_km),
                percent_recycled_material: non_negative(recycled).min(100.0),
                production_method: ProductionMethod::parse(method),
                materials: draft.materials.clone(),
                description: draft.description.clone(),
                price: draft.price,
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }

    pub fn total_mass_kg(&self) -> f64 {
        (self.weight_g + self.packaging_weight_g) / 1000.0
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Free-text view of a listing consumed by the tagger and text analyzers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftText {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub artisan: Option<String>,
    #[serde(deserialize_with = "deserialize_materials")]
    pub materials: Vec<String>,
}

impl CraftText {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Lowercased `title description`, the haystack for keyword matching.
    pub fn corpus(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// Reference to an uploaded product image handed to an image classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub uri: String,
}

/// Optional inputs used only by price estimators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    #[serde(default)]
    pub base_material_price: Option<f64>,
    #[serde(default)]
    pub hours_of_labor: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub crafting_process: Option<String>,
}

/// Inbound payload for a comprehensive analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub product: ProductDraft,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub artisan: Option<String>,
    #[serde(default)]
    pub pricing: PricingInputs,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

impl AnalysisRequest {
    pub fn craft_text(&self) -> CraftText {
        CraftText {
            title: self.title.clone(),
            description: self.product.description.clone(),
            price: self.product.price,
            location: self.location.clone(),
            artisan: self.artisan.clone(),
            materials: self.product.materials.clone(),
        }
    }

    /// Region used for pricing: explicit input first, else the last
    /// comma-separated segment of the location.
    pub fn pricing_region(&self) -> Option<String> {
        self.pricing
            .region
            .clone()
            .or_else(|| {
                self.location
                    .as_deref()
                    .and_then(|location| location.rsplit(',').next())
                    .map(|segment| segment.trim().to_lowercase())
            })
            .filter(|region| !region.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialsField {
    List(Vec<String>),
    Csv(String),
}

/// Accepts either a JSON list or a comma-separated string.
fn deserialize_materials<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<MaterialsField>::deserialize(deserializer)?;
    let materials = match field {
        None => Vec::new(),
        Some(MaterialsField::List(items)) => items,
        Some(MaterialsField::Csv(raw)) => raw.split(',').map(str::to_string).collect(),
    };

    Ok(materials
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
