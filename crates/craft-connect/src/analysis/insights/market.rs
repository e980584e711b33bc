use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::numeric::{count_matches, matched, round2};

const POSITIVE_WORDS: [&str; 10] = [
    "beautiful",
    "amazing",
    "gorgeous",
    "stunning",
    "perfect",
    "love",
    "wonderful",
    "excellent",
    "fantastic",
    "quality",
];
const NEGATIVE_WORDS: [&str; 6] = ["cheap", "poor", "bad", "terrible", "awful", "ugly"];

const SEASONS: [(&str, &[&str]); 4] = [
    (
        "spring",
        &["garden", "floral", "pastel", "easter", "renewal", "fresh"],
    ),
    (
        "summer",
        &["beach", "tropical", "bright", "vacation", "outdoor", "festival"],
    ),
    (
        "fall",
        &["autumn", "harvest", "orange", "cozy", "thanksgiving", "warm"],
    ),
    (
        "winter",
        &["holiday", "christmas", "cozy", "warm", "indoor", "gift"],
    ),
];
pub(crate) const YEAR_ROUND: &str = "year_round";

const HIGH_DEMAND_KEYWORDS: [&str; 9] = [
    "minimalist",
    "bohemian",
    "vintage",
    "rustic",
    "modern",
    "personalized",
    "custom",
    "unique",
    "one-of-a-kind",
];

const PREMIUM_INDICATORS: [&str; 10] = [
    "handcrafted",
    "artisan",
    "bespoke",
    "custom",
    "limited edition",
    "exclusive",
    "designer",
    "luxury",
    "premium",
    "high-quality",
];

const UNIQUE_KEYWORDS: [&str; 10] = [
    "one-of-a-kind",
    "unique",
    "custom",
    "personalized",
    "bespoke",
    "handmade",
    "artisan",
    "original",
    "exclusive",
    "limited",
];
const TECHNIQUE_KEYWORDS: [&str; 10] = [
    "hand-carved",
    "hand-painted",
    "hand-woven",
    "etched",
    "embossed",
    "stamped",
    "forged",
    "thrown",
    "blown",
    "cast",
];

const PREMIUM_MATERIALS: [&str; 7] = [
    "gold", "silver", "platinum", "leather", "silk", "wool", "hardwood",
];
const CRAFTSMANSHIP_WORDS: [&str; 3] = ["handmade", "artisan", "crafted"];
const COMPLEXITY_WORDS: [&str; 5] = ["detailed", "intricate", "complex", "carved", "embroidered"];
const SIZE_WORDS: [&str; 4] = ["large", "big", "oversized", "furniture"];
const SUSTAINABILITY_WORDS: [&str; 4] = ["organic", "recycled", "sustainable", "eco-friendly"];

const AGE_GROUPS: [(&str, &[&str]); 4] = [
    ("teens", &["trendy", "fun", "colorful", "modern", "social"]),
    (
        "young_adults",
        &["minimalist", "apartment", "first home", "student"],
    ),
    (
        "adults",
        &["professional", "office", "family", "home", "quality"],
    ),
    (
        "seniors",
        &["traditional", "classic", "elegant", "timeless", "heritage"],
    ),
];
const INTERESTS: [(&str, &[&str]); 4] = [
    (
        "home_decor",
        &["decoration", "interior", "home", "room", "wall"],
    ),
    ("fashion", &["jewelry", "accessory", "style", "fashion", "wear"]),
    (
        "gardening",
        &["garden", "plant", "outdoor", "patio", "greenhouse"],
    ),
    ("cooking", &["kitchen", "cooking", "food", "dining", "recipe"]),
];
pub(crate) const GENERAL: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis {
    pub polarity: f64,
    pub subjectivity: f64,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalAnalysis {
    pub seasonal_scores: BTreeMap<&'static str, f64>,
    pub primary_season: &'static str,
    pub seasonality_strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketAnalysis {
    pub demand_score: f64,
    pub premium_potential: f64,
    pub price_competitiveness: f64,
    pub trending_features: Vec<&'static str>,
    pub premium_features: Vec<&'static str>,
    pub overall_market_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceFactors {
    pub premium_material_count: usize,
    pub craftsmanship: bool,
    pub complexity: bool,
    pub sustainability: bool,
}

/// Keyword-driven listing price suggestion, independent of the pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPriceGuidance {
    pub predicted_min: f64,
    pub predicted_optimal: f64,
    pub predicted_max: f64,
    pub confidence: f64,
    pub price_factors: PriceFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDemographic {
    BudgetConscious,
    ValueSeekers,
    QualityFocused,
    PremiumBuyers,
    LuxuryBuyers,
    Unknown,
}

impl PriceDemographic {
    /// Bands are expressed in rupees.
    fn from_price(price: Option<f64>) -> Self {
        match price.filter(|value| value.is_finite()) {
            None => Self::Unknown,
            Some(price) if price < 500.0 => Self::BudgetConscious,
            Some(price) if price < 1500.0 => Self::ValueSeekers,
            Some(price) if price < 5000.0 => Self::QualityFocused,
            Some(price) if price < 15000.0 => Self::PremiumBuyers,
            Some(_) => Self::LuxuryBuyers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceAnalysis {
    pub primary_age_group: &'static str,
    pub primary_interest: &'static str,
    pub price_demographic: PriceDemographic,
    pub age_scores: BTreeMap<&'static str, usize>,
    pub interest_scores: BTreeMap<&'static str, usize>,
    pub target_confidence: f64,
}

pub(crate) fn sentiment(description: &str) -> SentimentAnalysis {
    let text = description.to_lowercase();
    let positive = count_matches(&text, &POSITIVE_WORDS);
    let negative = count_matches(&text, &NEGATIVE_WORDS);
    let total = positive + negative;

    if total == 0 {
        return SentimentAnalysis {
            polarity: 0.0,
            subjectivity: 0.0,
            sentiment_score: 0.5,
        };
    }

    let sentiment_score = positive as f64 / total as f64;
    SentimentAnalysis {
        polarity: round2((sentiment_score - 0.5) * 2.0),
        subjectivity: (total as f64 / 10.0).min(1.0),
        sentiment_score: round2(sentiment_score),
    }
}

pub(crate) fn seasonal(corpus: &str) -> SeasonalAnalysis {
    let mut seasonal_scores = BTreeMap::new();
    let mut primary = (YEAR_ROUND, 0.0);

    for (season, keywords) in SEASONS.iter() {
        let score = (count_matches(corpus, keywords) as f64 / keywords.len() as f64).min(1.0);
        if score > primary.1 {
            primary = (*season, score);
        }
        seasonal_scores.insert(*season, round2(score));
    }

    SeasonalAnalysis {
        seasonal_scores,
        primary_season: primary.0,
        seasonality_strength: round2(primary.1),
    }
}

pub(crate) fn market_potential(corpus: &str, price: Option<f64>) -> MarketAnalysis {
    let trending_features = matched(corpus, &HIGH_DEMAND_KEYWORDS);
    let premium_features = matched(corpus, &PREMIUM_INDICATORS);
    let demand_score = (trending_features.len() as f64 / 5.0).min(1.0);
    let premium_potential = (premium_features.len() as f64 / 3.0).min(1.0);

    let price_competitiveness = match price.filter(|value| value.is_finite()) {
        None => 0.5,
        Some(price) if price < 20.0 => 0.8,
        Some(price) if price < 50.0 => 0.9,
        Some(price) if price < 100.0 => 0.7,
        Some(price) if price < 200.0 => 0.5,
        Some(_) => 0.3,
    };

    MarketAnalysis {
        demand_score,
        premium_potential: round2(premium_potential),
        price_competitiveness,
        overall_market_score: round2(
            (demand_score + premium_potential + price_competitiveness) / 3.0,
        ),
        trending_features,
        premium_features,
    }
}

pub(crate) fn uniqueness(corpus: &str) -> f64 {
    let keywords = count_matches(corpus, &UNIQUE_KEYWORDS) as f64;
    let techniques = count_matches(corpus, &TECHNIQUE_KEYWORDS) as f64 * 0.5;
    round2(((keywords + techniques) / 5.0).min(1.0))
}

pub(crate) fn listing_price_guidance(corpus: &str, materials: &[String]) -> ListingPriceGuidance {
    let mentions = |words: &[&str]| words.iter().any(|word| corpus.contains(word));

    let premium_material_count = materials
        .iter()
        .map(|material| material.to_lowercase())
        .filter(|material| PREMIUM_MATERIALS.iter().any(|premium| material.contains(premium)))
        .count();
    let craftsmanship = mentions(&CRAFTSMANSHIP_WORDS);
    let complexity = mentions(&COMPLEXITY_WORDS);
    let sustainability = mentions(&SUSTAINABILITY_WORDS);

    let mut base = 20.0 + premium_material_count as f64 * 15.0;
    if craftsmanship {
        base += 20.0;
    }
    if complexity {
        base += 15.0;
    }
    if mentions(&SIZE_WORDS) {
        base += 25.0;
    }
    if sustainability {
        base += 10.0;
    }

    ListingPriceGuidance {
        predicted_min: round2((base * 0.7).max(5.0)),
        predicted_optimal: round2(base),
        predicted_max: round2(base * 1.5),
        confidence: round2((materials.len() as f64 / 3.0 + 0.5).min(1.0)),
        price_factors: PriceFactors {
            premium_material_count,
            craftsmanship,
            complexity,
            sustainability,
        },
    }
}

pub(crate) fn audience(corpus: &str, price: Option<f64>) -> AudienceAnalysis {
    let (age_scores, primary_age_group, top_age) = score_groups(corpus, &AGE_GROUPS);
    let (interest_scores, primary_interest, top_interest) = score_groups(corpus, &INTERESTS);

    AudienceAnalysis {
        primary_age_group,
        primary_interest,
        price_demographic: PriceDemographic::from_price(price),
        age_scores,
        interest_scores,
        target_confidence: round2((top_age.max(top_interest) as f64 / 3.0).min(1.0)),
    }
}

/// Scores every group and returns the first group with the highest count, or
/// `general` when nothing matched.
fn score_groups(
    corpus: &str,
    groups: &[(&'static str, &[&str])],
) -> (BTreeMap<&'static str, usize>, &'static str, usize) {
    let mut scores = BTreeMap::new();
    let mut primary = (GENERAL, 0);
    for (name, keywords) in groups {
        let count = count_matches(corpus, keywords);
        if count > primary.1 {
            primary = (*name, count);
        }
        scores.insert(*name, count);
    }
    (scores, primary.0, primary.1)
}

pub(crate) struct SuggestionInputs<'a> {
    pub(crate) eco_impact_score: Option<f64>,
    pub(crate) seasonal: &'a SeasonalAnalysis,
    pub(crate) market: &'a MarketAnalysis,
    pub(crate) uniqueness_score: f64,
    pub(crate) sentiment: &'a SentimentAnalysis,
    pub(crate) audience: &'a AudienceAnalysis,
}

pub(crate) fn marketing_suggestions(inputs: &SuggestionInputs<'_>) -> Vec<String> {
    let mut suggestions = Vec::new();

    if inputs.eco_impact_score.is_some_and(|score| score > 0.6) {
        suggestions.push("Highlight eco-friendly aspects in marketing materials".to_string());
        suggestions.push("Target environmentally conscious social media groups".to_string());
    }
    if inputs.seasonal.seasonality_strength > 0.5 {
        suggestions.push(format!(
            "Perfect for {} marketing campaigns",
            inputs.seasonal.primary_season
        ));
    }
    if inputs.market.premium_potential > 0.6 {
        suggestions.push("Position as premium/luxury item".to_string());
        suggestions.push("Target affluent customer segments".to_string());
    }
    if inputs.uniqueness_score > 0.7 {
        suggestions.push("Emphasize unique, one-of-a-kind nature".to_string());
        suggestions.push("Showcase craftsmanship in detail photos".to_string());
    }
    if !inputs.market.trending_features.is_empty() {
        suggestions.push(format!(
            "Leverage trending keywords: {}",
            inputs.market.trending_features.join(", ")
        ));
    }
    if inputs.sentiment.sentiment_score > 0.7 {
        suggestions.push("Use positive customer testimonials prominently".to_string());
    }
    if inputs.audience.primary_interest != GENERAL {
        suggestions.push(format!(
            "Focus marketing on {} enthusiasts",
            inputs.audience.primary_interest.replace('_', " ")
        ));
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_defaults_to_neutral_without_keywords() {
        let neutral = sentiment("");
        assert_eq!(neutral.sentiment_score, 0.5);
        assert_eq!(neutral.polarity, 0.0);

        let mixed = sentiment("Beautiful but cheap looking, perfect gift");
        assert_eq!(mixed.sentiment_score, 0.67);
        assert_eq!(mixed.subjectivity, 0.3);
    }

    #[test]
    fn seasonal_keywords_match_regardless_of_capitalization() {
        let corpus = "Cozy Christmas gift for holiday evenings".to_lowercase();
        let analysis = seasonal(&corpus);
        assert_eq!(analysis.primary_season, "winter");
        assert_eq!(analysis.seasonality_strength, 0.67);
    }

    #[test]
    fn seasonal_without_matches_is_year_round() {
        assert_eq!(seasonal("plain bowl").primary_season, YEAR_ROUND);
    }

    #[test]
    fn audience_confidence_is_capped() {
        let analysis = audience("home decoration for interior room wall", Some(800.0));
        assert_eq!(analysis.primary_interest, "home_decor");
        assert_eq!(analysis.target_confidence, 1.0);
        assert_eq!(analysis.price_demographic, PriceDemographic::ValueSeekers);
    }

    #[test]
    fn listing_guidance_accumulates_factors() {
        let guidance = listing_price_guidance(
            "handmade intricate large silk wall hanging",
            &["Silk".to_string()],
        );
        assert_eq!(guidance.predicted_optimal, 95.0);
        assert_eq!(guidance.predicted_min, 66.5);
        assert_eq!(guidance.predicted_max, 142.5);
        assert_eq!(guidance.price_factors.premium_material_count, 1);
    }
}
