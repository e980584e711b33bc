use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::numeric::{count_matches, matched, round2};

const REGIONAL_SPECIALTIES: [(&str, &[&str]); 19] = [
    (
        "kashmir",
        &["pashmina", "paper mache", "walnut wood", "carpet", "shawl"],
    ),
    (
        "rajasthan",
        &[
            "blue pottery",
            "bandhani",
            "leheriya",
            "miniature painting",
            "mirror work",
            "camel leather",
        ],
    ),
    (
        "uttar pradesh",
        &["chikankari", "zardozi", "carpet", "brass work", "pottery"],
    ),
    ("punjab", &["phulkari", "juti", "wooden toys", "handicrafts"]),
    ("haryana", &["durrie", "pottery", "woodwork"]),
    (
        "gujarat",
        &["bandhani", "patola", "kutch embroidery", "mirror work", "beadwork"],
    ),
    (
        "maharashtra",
        &["warli painting", "kolhapuri chappals", "paithani"],
    ),
    ("goa", &["coconut shell crafts", "bamboo work"]),
    (
        "karnataka",
        &["mysore silk", "sandalwood", "rosewood", "channapatna toys"],
    ),
    (
        "kerala",
        &["coir products", "coconut shell", "kathakali masks", "boat models"],
    ),
    (
        "tamil nadu",
        &["tanjore painting", "kanchipuram silk", "bronze work", "stone carving"],
    ),
    ("andhra pradesh", &["kalamkari", "bidriware", "nirmal toys"]),
    (
        "west bengal",
        &["kantha", "terracotta", "jute products", "conch shell"],
    ),
    (
        "odisha",
        &["pattachitra", "stone carving", "silver filigree", "palm leaf"],
    ),
    ("bihar", &["madhubani painting", "sikki grass", "applique work"]),
    ("jharkhand", &["dokra", "bamboo crafts"]),
    ("assam", &["silk weaving", "bamboo crafts", "cane work"]),
    ("madhya pradesh", &["gond painting", "batik", "chanderi silk"]),
    ("chhattisgarh", &["dhokra art", "bamboo crafts", "terracotta"]),
];

const TECHNIQUES: [(&str, &[&str]); 4] = [
    (
        "textile_techniques",
        &[
            "chikankari",
            "zardozi",
            "phulkari",
            "kantha",
            "bandhani",
            "leheriya",
            "patola",
            "kalamkari",
            "block printing",
            "tie-dye",
            "mirror work",
        ],
    ),
    (
        "painting_techniques",
        &[
            "madhubani",
            "warli",
            "pattachitra",
            "tanjore",
            "gond",
            "phad",
            "kalamkari",
            "miniature painting",
        ],
    ),
    (
        "metalwork_techniques",
        &[
            "dhokra",
            "bidriware",
            "brass work",
            "bell metal",
            "silver filigree",
            "bronze casting",
            "repousse work",
        ],
    ),
    (
        "woodwork_techniques",
        &[
            "sandalwood carving",
            "rosewood inlay",
            "sheesham work",
            "walnut carving",
            "channapatna lacquerware",
        ],
    ),
];

/// Factor groups with the weight each matched item contributes.
const SUSTAINABILITY_FACTORS: [(&str, f64, &[&str]); 5] = [
    (
        "natural_materials",
        0.3,
        &["bamboo", "jute", "coir", "palm leaf", "banana fiber", "water hyacinth"],
    ),
    (
        "organic_dyes",
        0.2,
        &["turmeric", "indigo", "madder", "pomegranate", "marigold"],
    ),
    (
        "eco_processes",
        0.2,
        &["natural fermentation", "sun drying", "hand spinning", "organic farming"],
    ),
    (
        "zero_waste",
        0.15,
        &["complete utilization", "by-product usage", "minimal waste"],
    ),
    (
        "traditional_methods",
        0.15,
        &["age-old techniques", "ancestral knowledge", "generational skills"],
    ),
];

const FESTIVALS: [(&str, &[&str]); 7] = [
    ("diwali", &["diyas", "rangoli", "decorative items", "lights", "lamps"]),
    ("holi", &["colors", "pichkari", "festive wear", "decorations"]),
    (
        "navratri",
        &["chaniya choli", "garba accessories", "decorative items"],
    ),
    (
        "karva_chauth",
        &["decorated plates", "sieves", "traditional wear"],
    ),
    (
        "raksha_bandhan",
        &["rakhi", "decorative threads", "gift items"],
    ),
    (
        "durga_puja",
        &["pandal decorations", "clay idols", "traditional items"],
    ),
    (
        "wedding_season",
        &["bridal wear", "jewelry", "decorative items", "trousseau"],
    ),
];

const AUTHENTICITY_INDICATORS: [&str; 10] = [
    "traditional",
    "authentic",
    "heritage",
    "ancestral",
    "generations",
    "handmade",
    "artisan",
    "craftsman",
    "village",
    "tribal",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalAnalysis {
    pub identified_regions: Vec<&'static str>,
    pub primary_region: Option<&'static str>,
    pub regional_confidence: f64,
    pub matched_specialties: Vec<&'static str>,
    pub authenticity_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeritageLevel {
    Master,
    Traditional,
    SemiTraditional,
    Contemporary,
    Modern,
}

impl HeritageLevel {
    fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Master
        } else if score >= 0.6 {
            Self::Traditional
        } else if score >= 0.4 {
            Self::SemiTraditional
        } else if score >= 0.2 {
            Self::Contemporary
        } else {
            Self::Modern
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Master => "Master Level Heritage Craft",
            Self::Traditional => "Traditional Heritage Craft",
            Self::SemiTraditional => "Semi-Traditional Craft",
            Self::Contemporary => "Contemporary Indian Craft",
            Self::Modern => "Modern Craft",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechniqueAnalysis {
    pub techniques_by_category: BTreeMap<&'static str, Vec<&'static str>>,
    pub all_techniques: Vec<&'static str>,
    pub tradition_score: f64,
    pub heritage_level: HeritageLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraditionalSustainabilityLevel {
    HighlySustainable,
    EcoFriendly,
    Moderate,
    SomeElements,
    Conventional,
}

impl TraditionalSustainabilityLevel {
    fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::HighlySustainable
        } else if score >= 0.6 {
            Self::EcoFriendly
        } else if score >= 0.4 {
            Self::Moderate
        } else if score >= 0.2 {
            Self::SomeElements
        } else {
            Self::Conventional
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraditionalSustainability {
    pub factors: BTreeMap<&'static str, Vec<&'static str>>,
    pub eco_score: f64,
    pub level: TraditionalSustainabilityLevel,
    pub eco_certifiable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FestivalRelevance {
    pub festival_matches: BTreeMap<&'static str, Vec<&'static str>>,
    pub peak_festivals: Vec<&'static str>,
    pub festival_score: f64,
    pub year_round_appeal: bool,
}

/// Regional craft heritage view of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeritageAnalysis {
    pub regional: RegionalAnalysis,
    pub techniques: TechniqueAnalysis,
    pub sustainability: TraditionalSustainability,
    pub festivals: FestivalRelevance,
    pub market_insights: Vec<String>,
}

pub(crate) fn analyze(
    corpus: &str,
    location: Option<&str>,
    materials: &[String],
) -> HeritageAnalysis {
    let regional = regional(corpus, location);
    let techniques = techniques(corpus);
    let sustainability = traditional_sustainability(corpus, materials);
    let festivals = festivals(corpus);
    let market_insights = market_insights(&regional, &techniques, &sustainability, &festivals);

    HeritageAnalysis {
        regional,
        techniques,
        sustainability,
        festivals,
        market_insights,
    }
}

fn regional(corpus: &str, location: Option<&str>) -> RegionalAnalysis {
    let text = match location {
        Some(location) => format!("{corpus} {}", location.to_lowercase()),
        None => corpus.to_string(),
    };

    let mut identified_regions = Vec::new();
    let mut primary: Option<(&'static str, f64, Vec<&'static str>)> = None;

    for (region, specialties) in REGIONAL_SPECIALTIES.iter() {
        let hits = matched(&text, specialties);
        if hits.is_empty() {
            continue;
        }
        identified_regions.push(*region);
        let score = hits.len() as f64 / specialties.len() as f64;
        if primary.as_ref().map_or(true, |(_, best, _)| score > *best) {
            primary = Some((*region, score, hits));
        }
    }

    let primary_region = primary.as_ref().map(|(region, _, _)| *region);
    let authenticity_score = authenticity(&text, primary_region);
    let (regional_confidence, matched_specialties) = primary
        .map(|(_, score, hits)| (round2(score), hits))
        .unwrap_or((0.0, Vec::new()));

    RegionalAnalysis {
        identified_regions,
        primary_region,
        regional_confidence,
        matched_specialties,
        authenticity_score,
    }
}

fn authenticity(text: &str, region: Option<&str>) -> f64 {
    let mut score = count_matches(text, &AUTHENTICITY_INDICATORS) as f64;
    if region.is_some_and(|region| text.contains(region)) {
        score += 2.0;
    }
    round2((score / 8.0).min(1.0))
}

fn techniques(corpus: &str) -> TechniqueAnalysis {
    let mut techniques_by_category = BTreeMap::new();
    let mut all_techniques = Vec::new();

    for (category, techniques) in TECHNIQUES.iter() {
        let hits = matched(corpus, techniques);
        if hits.is_empty() {
            continue;
        }
        all_techniques.extend(hits.iter().copied());
        techniques_by_category.insert(*category, hits);
    }

    let tradition_score = round2((all_techniques.len() as f64 / 5.0).min(1.0));
    TechniqueAnalysis {
        techniques_by_category,
        all_techniques,
        tradition_score,
        heritage_level: HeritageLevel::from_score(tradition_score),
    }
}

fn traditional_sustainability(corpus: &str, materials: &[String]) -> TraditionalSustainability {
    let text = if materials.is_empty() {
        corpus.to_string()
    } else {
        format!("{corpus} {}", materials.join(" ").to_lowercase())
    };

    let mut factors = BTreeMap::new();
    let mut total = 0.0;
    for (group, weight, items) in SUSTAINABILITY_FACTORS.iter() {
        let hits = matched(&text, items);
        if hits.is_empty() {
            continue;
        }
        total += hits.len() as f64 * weight;
        factors.insert(*group, hits);
    }

    let eco_score = round2(total.min(1.0));
    TraditionalSustainability {
        factors,
        eco_score,
        level: TraditionalSustainabilityLevel::from_score(eco_score),
        eco_certifiable: eco_score > 0.6,
    }
}

fn festivals(corpus: &str) -> FestivalRelevance {
    let mut festival_matches = BTreeMap::new();
    let mut relevance = 0usize;
    let mut peak: (usize, Vec<&'static str>) = (0, Vec::new());

    for (festival, items) in FESTIVALS.iter() {
        let hits = matched(corpus, items);
        if hits.is_empty() {
            continue;
        }
        relevance += hits.len();
        if hits.len() > peak.0 {
            peak = (hits.len(), vec![*festival]);
        } else if hits.len() == peak.0 {
            peak.1.push(*festival);
        }
        festival_matches.insert(*festival, hits);
    }

    FestivalRelevance {
        year_round_appeal: festival_matches.is_empty() || relevance < 2,
        festival_matches,
        peak_festivals: peak.1,
        festival_score: round2((relevance as f64 / 10.0).min(1.0)),
    }
}

fn market_insights(
    regional: &RegionalAnalysis,
    techniques: &TechniqueAnalysis,
    sustainability: &TraditionalSustainability,
    festivals: &FestivalRelevance,
) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(region) = regional.primary_region {
        insights.push(format!(
            "Authentic {} craft with regional specialties",
            title_case(region)
        ));
        if regional.authenticity_score > 0.7 {
            insights.push("High authenticity score, suited to craft connoisseurs".to_string());
        }
    }
    if techniques.tradition_score > 0.6 {
        insights.push("Rich traditional techniques appeal to heritage lovers".to_string());
        insights.push("Educational value for cultural preservation".to_string());
    }
    if sustainability.eco_score > 0.7 {
        insights.push("Excellent sustainability using traditional Indian methods".to_string());
        insights.push("Eco-conscious consumers will highly value this product".to_string());
    }
    if !festivals.peak_festivals.is_empty() {
        let names: Vec<String> = festivals
            .peak_festivals
            .iter()
            .map(|festival| title_case(&festival.replace('_', " ")))
            .collect();
        insights.push(format!(
            "Perfect for {}; time marketing campaigns accordingly",
            names.join(", ")
        ));
    }
    if regional.regional_confidence > 0.8 {
        insights.push("Premium positioning due to regional authenticity".to_string());
    }
    if techniques.tradition_score > 0.7 && sustainability.eco_score > 0.6 {
        insights.push("Strong export potential for international buyers".to_string());
    }

    insights
}

fn title_case(raw: &str) -> String {
    raw.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_region_prefers_first_highest_score() {
        let analysis = regional("bandhani mirror work stole", None);
        assert_eq!(analysis.identified_regions, vec!["rajasthan", "gujarat"]);
        assert_eq!(analysis.primary_region, Some("gujarat"));
        assert_eq!(analysis.matched_specialties, vec!["bandhani", "mirror work"]);
    }

    #[test]
    fn peak_festivals_keep_every_tie() {
        let relevance = festivals("rakhi and rangoli kit");
        assert_eq!(relevance.peak_festivals, vec!["diwali", "raksha_bandhan"]);
        assert!(!relevance.year_round_appeal);
        assert_eq!(relevance.festival_score, 0.2);
    }

    #[test]
    fn traditional_sustainability_counts_each_item() {
        let result = traditional_sustainability("indigo dyed", &["Jute".to_string()]);
        assert_eq!(result.eco_score, 0.5);
        assert_eq!(result.level, TraditionalSustainabilityLevel::Moderate);
        assert!(!result.eco_certifiable);
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("uttar pradesh"), "Uttar Pradesh");
    }
}
