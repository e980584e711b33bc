mod vocabulary;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::domain::CraftText;
use super::numeric::{count_matches, mean, round2};
use vocabulary::{
    BASE_ECO_SCORE, CRAFT_CATEGORIES, HANDMADE_BONUS, HANDMADE_KEYWORDS, HANDMADE_TAG,
    MATERIAL_KEYWORDS, SUSTAINABILITY_GROUPS,
};

/// Names of every category the tagger can detect, in tie-break order.
pub fn category_names() -> impl Iterator<Item = &'static str> {
    CRAFT_CATEGORIES.iter().map(|(name, _)| *name)
}

/// Price band derived from a listing price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    Budget,
    Affordable,
    MidRange,
    Premium,
    Luxury,
    Unknown,
}

impl PriceCategory {
    pub fn from_price(price: Option<f64>) -> Self {
        let Some(price) = price.filter(|value| value.is_finite()) else {
            return Self::Unknown;
        };

        let price = price.max(0.0);
        if price < 25.0 {
            Self::Budget
        } else if price < 75.0 {
            Self::Affordable
        } else if price < 200.0 {
            Self::MidRange
        } else if price < 500.0 {
            Self::Premium
        } else {
            Self::Luxury
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Affordable => "affordable",
            Self::MidRange => "mid_range",
            Self::Premium => "premium",
            Self::Luxury => "luxury",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceScores {
    pub categories: BTreeMap<String, f64>,
    pub eco_impact: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFeatures {
    pub word_count: usize,
    pub has_location: bool,
    pub has_artisan: bool,
    pub material_count: usize,
}

/// Tags and scores derived from a listing's free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggingResult {
    pub categories: Vec<String>,
    pub materials: BTreeSet<String>,
    pub sustainability_tags: BTreeSet<String>,
    pub eco_impact_score: f64,
    pub price_category: PriceCategory,
    pub confidence_scores: ConfidenceScores,
    pub extracted_features: ExtractedFeatures,
}

impl TaggingResult {
    /// Adds a category detected by another source if it is not present yet,
    /// keeping `categories` ordered by confidence and `overall` current.
    pub fn merge_category(&mut self, category: &str, confidence: f64) -> bool {
        if self.categories.iter().any(|existing| existing == category) {
            return false;
        }

        let confidence = if confidence.is_finite() {
            round2(confidence.clamp(0.0, 1.0))
        } else {
            0.0
        };
        self.confidence_scores
            .categories
            .insert(category.to_string(), confidence);
        self.categories.push(category.to_string());

        let scores = &self.confidence_scores.categories;
        let score_of = |name: &String| scores.get(name).copied().unwrap_or(0.0);
        self.categories
            .sort_by(|left, right| score_of(right).total_cmp(&score_of(left)));

        self.confidence_scores.overall =
            mean(&scores.values().copied().collect::<Vec<_>>())
                .map(round2)
                .unwrap_or(0.0);
        true
    }
}

/// Rule-based tagger. Deterministic: identical text always yields identical tags.
#[derive(Debug, Clone, Default)]
pub struct AutoTagger;

impl AutoTagger {
    pub fn new() -> Self {
        Self
    }

    pub fn tag(&self, item: &CraftText) -> TaggingResult {
        let corpus = item.corpus();

        let (categories, category_confidence) = extract_categories(&corpus);
        let materials = extract_materials(&corpus, &item.materials);
        let (eco_impact_score, sustainability_tags) = score_sustainability(&corpus);

        let overall = mean(&category_confidence.values().copied().collect::<Vec<_>>())
            .map(round2)
            .unwrap_or(0.0);

        let extracted_features = ExtractedFeatures {
            word_count: item.description.split_whitespace().count(),
            has_location: item.location.is_some(),
            has_artisan: item.artisan.is_some(),
            material_count: materials.len(),
        };

        tracing::debug!(
            categories = categories.len(),
            materials = materials.len(),
            tags = sustainability_tags.len(),
            eco_impact_score,
            "craft text tagged"
        );

        TaggingResult {
            categories,
            materials,
            sustainability_tags,
            eco_impact_score,
            price_category: PriceCategory::from_price(item.price),
            confidence_scores: ConfidenceScores {
                categories: category_confidence,
                eco_impact: eco_impact_score,
                overall,
            },
            extracted_features,
        }
    }
}

fn extract_categories(corpus: &str) -> (Vec<String>, BTreeMap<String, f64>) {
    let mut detected: Vec<(&str, f64)> = CRAFT_CATEGORIES
        .iter()
        .filter_map(|(name, keywords)| {
            let matches = count_matches(corpus, keywords);
            (matches > 0).then(|| {
                let confidence = (matches as f64 / keywords.len() as f64).min(1.0);
                (*name, round2(confidence))
            })
        })
        .collect();

    // stable sort keeps table order on ties
    detected.sort_by(|left, right| right.1.total_cmp(&left.1));

    let confidence = detected
        .iter()
        .map(|(name, score)| (name.to_string(), *score))
        .collect();
    let categories = detected.into_iter().map(|(name, _)| name.to_string()).collect();
    (categories, confidence)
}

fn extract_materials(corpus: &str, supplied: &[String]) -> BTreeSet<String> {
    MATERIAL_KEYWORDS
        .iter()
        .filter(|keyword| corpus.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .chain(
            supplied
                .iter()
                .map(|material| material.trim().to_lowercase())
                .filter(|material| !material.is_empty()),
        )
        .collect()
}

fn score_sustainability(corpus: &str) -> (f64, BTreeSet<String>) {
    let mut score = BASE_ECO_SCORE;
    let mut tags = BTreeSet::new();

    for group in SUSTAINABILITY_GROUPS.iter() {
        let hits: Vec<&str> = group
            .keywords
            .iter()
            .copied()
            .filter(|keyword| corpus.contains(keyword))
            .collect();
        if hits.is_empty() {
            continue;
        }
        tracing::trace!(group = group.name, hits = hits.len(), "sustainability group matched");
        score += group.weight;
        tags.extend(hits.into_iter().map(str::to_string));
    }

    if HANDMADE_KEYWORDS.iter().any(|keyword| corpus.contains(keyword)) {
        score += HANDMADE_BONUS;
        tags.insert(HANDMADE_TAG.to_string());
    }

    (round2(score.clamp(0.0, 1.0)), tags)
}
