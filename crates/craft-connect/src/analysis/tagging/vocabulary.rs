//! Keyword tables backing the auto-tagger. Order is significant: category
//! ties are broken by position in `CRAFT_CATEGORIES`.

pub(crate) const CRAFT_CATEGORIES: [(&str, &[&str]); 8] = [
    (
        "jewelry",
        &["ring", "necklace", "bracelet", "earring", "pendant", "brooch", "anklet"],
    ),
    (
        "textiles",
        &[
            "scarf",
            "bag",
            "purse",
            "clothing",
            "fabric",
            "embroidery",
            "weaving",
            "knitting",
        ],
    ),
    (
        "pottery",
        &["vase", "bowl", "mug", "plate", "ceramic", "clay", "pottery"],
    ),
    (
        "woodwork",
        &["furniture", "carving", "sculpture", "wooden", "timber", "oak", "pine"],
    ),
    (
        "metalwork",
        &["steel", "iron", "copper", "bronze", "aluminum", "metal"],
    ),
    ("glasswork", &["glass", "blown", "stained", "crystal", "mirror"]),
    (
        "leather",
        &["leather", "hide", "suede", "belt", "wallet", "boots"],
    ),
    (
        "fiber_arts",
        &["yarn", "wool", "cotton", "silk", "hemp", "linen", "crochet"],
    ),
];

pub(crate) const MATERIAL_KEYWORDS: [&str; 25] = [
    "wood", "metal", "glass", "ceramic", "clay", "leather", "fabric", "cotton", "wool", "silk",
    "linen", "hemp", "bamboo", "cork", "silver", "gold", "copper", "bronze", "steel", "iron",
    "plastic", "resin", "stone", "marble", "granite",
];

/// Sustainability keyword groups and the weight each group adds once matched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SustainabilityGroup {
    pub(crate) name: &'static str,
    pub(crate) weight: f64,
    pub(crate) keywords: &'static [&'static str],
}

pub(crate) const SUSTAINABILITY_GROUPS: [SustainabilityGroup; 6] = [
    SustainabilityGroup {
        name: "recycled",
        weight: 0.20,
        keywords: &["recycled", "upcycled", "repurposed", "reclaimed"],
    },
    SustainabilityGroup {
        name: "organic",
        weight: 0.15,
        keywords: &["organic", "natural", "eco-friendly", "biodegradable"],
    },
    SustainabilityGroup {
        name: "renewable",
        weight: 0.15,
        keywords: &["bamboo", "cork", "hemp", "jute", "rattan"],
    },
    SustainabilityGroup {
        name: "local",
        weight: 0.10,
        keywords: &["local", "locally sourced", "regional", "native"],
    },
    SustainabilityGroup {
        name: "fair_trade",
        weight: 0.10,
        keywords: &["fair trade", "ethically sourced", "sustainable"],
    },
    SustainabilityGroup {
        name: "low_impact",
        weight: 0.10,
        keywords: &["solar dried", "hand made", "minimal packaging", "carbon neutral"],
    },
];

pub(crate) const HANDMADE_KEYWORDS: [&str; 5] =
    ["handmade", "hand made", "artisan", "crafted", "handcrafted"];

pub(crate) const HANDMADE_TAG: &str = "handmade";
pub(crate) const HANDMADE_BONUS: f64 = 0.10;
pub(crate) const BASE_ECO_SCORE: f64 = 0.30;
