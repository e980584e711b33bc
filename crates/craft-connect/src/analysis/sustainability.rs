use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::AnalysisRequest;
use super::numeric::round2;

const DEFAULT_MATERIAL_CO2: f64 = 3.0;

/// kg CO2 per kg of material.
const MATERIAL_CO2: [(&str, f64); 21] = [
    ("organic_cotton", 2.1),
    ("hemp", 1.2),
    ("bamboo", 0.8),
    ("jute", 0.9),
    ("linen", 1.8),
    ("wool", 5.0),
    ("silk", 2.5),
    ("coir", 0.7),
    ("recycled_cotton", 0.5),
    ("recycled_paper", 0.3),
    ("recycled_plastic", 1.2),
    ("recycled_metal", 0.8),
    ("clay", 0.2),
    ("wood", 0.4),
    ("stone", 0.1),
    ("brass", 2.8),
    ("copper", 3.5),
    ("silver", 8.2),
    ("polyester", 5.9),
    ("nylon", 7.6),
    ("acrylic", 4.2),
];

/// Checked in order; the first production wording found wins.
const WASTE_FACTORS: [(&str, f64); 4] = [
    ("traditional methods", 0.1),
    ("handmade", 0.2),
    ("machine made", 0.8),
    ("mass production", 1.5),
];

const CATEGORY_WEIGHT_KG: [(&str, f64); 8] = [
    ("jewelry", 0.1),
    ("textiles", 0.5),
    ("pottery", 1.2),
    ("woodwork", 2.0),
    ("metalwork", 1.5),
    ("paintings", 0.3),
    ("sculpture", 3.0),
    ("furniture", 10.0),
];

const LOCAL_CRAFT_REGIONS: [&str; 8] = [
    "bihar",
    "gujarat",
    "rajasthan",
    "uttar pradesh",
    "west bengal",
    "kerala",
    "karnataka",
    "odisha",
];

const BONUS_KEYWORDS: [&str; 6] = [
    "fair trade",
    "locally sourced",
    "traditional methods",
    "zero waste",
    "biodegradable",
    "renewable",
];

const LOCAL_TRANSPORT_FACTOR: f64 = 1.1;
const DISTANT_TRANSPORT_FACTOR: f64 = 1.4;
const CO2_NORMALIZER_KG: f64 = 10.0;
const CERTIFICATION_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SustainabilityGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
}

impl SustainabilityGrade {
    pub fn from_index(index: f64) -> Self {
        if index >= 0.9 {
            Self::APlus
        } else if index >= 0.8 {
            Self::A
        } else if index >= 0.7 {
            Self::BPlus
        } else if index >= 0.6 {
            Self::B
        } else if index >= 0.5 {
            Self::CPlus
        } else if index >= 0.4 {
            Self::C
        } else {
            Self::D
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonImpact {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl CarbonImpact {
    fn from_total(co2_kg: f64) -> Self {
        if co2_kg < 1.0 {
            Self::VeryLow
        } else if co2_kg < 3.0 {
            Self::Low
        } else if co2_kg < 6.0 {
            Self::Medium
        } else if co2_kg < 10.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteImpact {
    Minimal,
    Low,
    Medium,
    High,
}

impl WasteImpact {
    fn from_total(total_waste: f64) -> Self {
        if total_waste < 0.3 {
            Self::Minimal
        } else if total_waste < 0.6 {
            Self::Low
        } else if total_waste < 1.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Declared,
    Estimated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Co2Analysis {
    pub total_co2_kg: f64,
    pub co2_per_kg: f64,
    pub material_breakdown: BTreeMap<String, f64>,
    pub weight_kg: f64,
    pub weight_source: WeightSource,
    pub transport_factor: f64,
    pub carbon_category: CarbonImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteAnalysis {
    /// Higher is better; negative for wasteful production.
    pub waste_score: f64,
    pub method_factor: f64,
    pub efficiency_bonus: f64,
    pub waste_category: WasteImpact,
}

/// Normalized [0, 1] sustainability view, distinct from the percentage-scale
/// eco-impact score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SustainabilityAssessment {
    pub materials: Vec<String>,
    pub co2_analysis: Co2Analysis,
    pub waste_analysis: WasteAnalysis,
    pub overall_sustainability_index: f64,
    pub grade: SustainabilityGrade,
    pub recommendations: Vec<String>,
    pub certification_eligible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SustainabilityAnalyzer;

impl SustainabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> SustainabilityAssessment {
        let description = request.product.description.to_lowercase();
        let location = request.location.as_deref().unwrap_or_default().to_lowercase();
        let materials = extract_materials(&request.product.materials, &description);

        let (weight_kg, weight_source) = match request.product.weight_g {
            Some(grams) if grams.is_finite() && grams > 0.0 => {
                (grams / 1000.0, WeightSource::Declared)
            }
            _ => (
                estimate_weight(request.product.category.as_deref(), &description),
                WeightSource::Estimated,
            ),
        };

        let transport_factor = if LOCAL_CRAFT_REGIONS
            .iter()
            .any(|region| location.contains(region))
        {
            LOCAL_TRANSPORT_FACTOR
        } else {
            DISTANT_TRANSPORT_FACTOR
        };

        let mut material_breakdown = BTreeMap::new();
        let mut material_co2 = 0.0;
        for material in &materials {
            let impact = co2_factor(material) * weight_kg;
            material_co2 += impact;
            material_breakdown.insert(material.clone(), round2(impact));
        }
        let total_co2 = material_co2 * transport_factor;

        let method_factor = WASTE_FACTORS
            .iter()
            .find(|(wording, _)| description.contains(wording))
            .map(|(_, factor)| *factor)
            .unwrap_or(1.0);
        let efficiency_bonus: f64 = materials
            .iter()
            .map(|material| {
                if material.contains("recycled") {
                    0.3
                } else if material.contains("organic") || material.contains("natural") {
                    0.2
                } else {
                    0.0
                }
            })
            .sum();
        let total_waste = method_factor * (1.0 - efficiency_bonus.min(0.8));
        let waste_score = 1.0 - total_waste;

        let co2_score = (1.0 - total_co2 / CO2_NORMALIZER_KG).max(0.0);
        let keyword_bonus = BONUS_KEYWORDS
            .iter()
            .filter(|keyword| description.contains(*keyword))
            .count() as f64
            * 0.1;
        let index = (co2_score * 0.4 + waste_score * 0.4 + keyword_bonus * 0.2).clamp(0.0, 1.0);
        let index = round2(index);

        let co2_analysis = Co2Analysis {
            total_co2_kg: round2(total_co2),
            co2_per_kg: round2(total_co2 / weight_kg.max(0.1)),
            material_breakdown,
            weight_kg: round2(weight_kg),
            weight_source,
            transport_factor,
            carbon_category: CarbonImpact::from_total(total_co2),
        };
        let waste_analysis = WasteAnalysis {
            waste_score: round2(waste_score),
            method_factor,
            efficiency_bonus: round2(efficiency_bonus),
            waste_category: WasteImpact::from_total(total_waste),
        };
        let recommendations = recommendations(&co2_analysis, &waste_analysis, &materials, index);

        tracing::debug!(
            materials = materials.len(),
            total_co2,
            waste_score,
            index,
            "sustainability assessed"
        );

        SustainabilityAssessment {
            materials,
            co2_analysis,
            waste_analysis,
            overall_sustainability_index: index,
            grade: SustainabilityGrade::from_index(index),
            recommendations,
            certification_eligible: index > CERTIFICATION_THRESHOLD,
        }
    }
}

fn co2_factor(material: &str) -> f64 {
    MATERIAL_CO2
        .iter()
        .find(|(name, _)| *name == material)
        .map(|(_, factor)| *factor)
        .unwrap_or(DEFAULT_MATERIAL_CO2)
}

/// Supplied materials plus table materials named in the description,
/// normalized to `snake_case` and deduplicated in first-seen order.
fn extract_materials(supplied: &[String], description: &str) -> Vec<String> {
    let from_description = MATERIAL_CO2
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| description.contains(&name.replace('_', " ")))
        .map(str::to_string);

    let mut materials: Vec<String> = Vec::new();
    for material in supplied.iter().cloned().chain(from_description) {
        let normalized = material.trim().to_lowercase().replace(' ', "_");
        if !normalized.is_empty() && !materials.contains(&normalized) {
            materials.push(normalized);
        }
    }
    materials
}

fn estimate_weight(category: Option<&str>, description: &str) -> f64 {
    let category = category
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "textiles".to_string());
    let base = CATEGORY_WEIGHT_KG
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, weight)| *weight)
        .unwrap_or(1.0);

    let mentions = |words: &[&str]| words.iter().any(|word| description.contains(word));
    if mentions(&["large", "big", "heavy"]) {
        base * 1.5
    } else if mentions(&["small", "mini", "light"]) {
        base * 0.5
    } else {
        base
    }
}

fn recommendations(
    co2: &Co2Analysis,
    waste: &WasteAnalysis,
    materials: &[String],
    index: f64,
) -> Vec<String> {
    let mut advice = Vec::new();

    if co2.total_co2_kg > 5.0 {
        advice.push("Consider using more eco-friendly materials to reduce carbon footprint");
    }
    if co2.transport_factor > 1.3 {
        advice.push("Source materials locally to reduce transportation emissions");
    }
    if waste.waste_score < 0.6 {
        advice.push("Implement zero-waste production techniques");
        advice.push("Consider using recycled or upcycled materials");
    }
    let has_sustainable_materials = materials
        .iter()
        .any(|material| material.contains("recycled") || material.contains("organic"));
    if !has_sustainable_materials {
        advice.push("Add organic or recycled materials to improve sustainability");
    }
    if index > CERTIFICATION_THRESHOLD {
        advice.push("Eligible for sustainability certification; highlight this in marketing");
    }

    advice.into_iter().map(str::to_string).collect()
}
