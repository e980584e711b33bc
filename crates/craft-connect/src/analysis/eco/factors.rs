use serde::Serialize;

/// CO2 coefficients for one product category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryFactor {
    /// kg CO2 per kg of product under mass production.
    pub factory_co2_coefficient: f64,
    /// Share of the factory footprint incurred by artisan production.
    pub handmade_multiplier: f64,
}

pub const DEFAULT_CATEGORY_FACTOR: CategoryFactor = CategoryFactor {
    factory_co2_coefficient: 3.0,
    handmade_multiplier: 0.8,
};

const CATEGORY_FACTORS: [(&str, CategoryFactor); 5] = [
    (
        "textiles",
        CategoryFactor {
            factory_co2_coefficient: 5.0,
            handmade_multiplier: 0.5,
        },
    ),
    (
        "terracotta",
        CategoryFactor {
            factory_co2_coefficient: 3.0,
            handmade_multiplier: 1.0,
        },
    ),
    (
        "bamboo",
        CategoryFactor {
            factory_co2_coefficient: 2.5,
            handmade_multiplier: 0.8,
        },
    ),
    (
        "toys",
        CategoryFactor {
            factory_co2_coefficient: 4.0,
            handmade_multiplier: 0.7,
        },
    ),
    (
        "painting",
        CategoryFactor {
            factory_co2_coefficient: 1.5,
            handmade_multiplier: 0.5,
        },
    ),
];

/// Resolved factor plus whether the category was found in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorLookup {
    pub factor: CategoryFactor,
    pub known_category: bool,
}

pub fn lookup(category: &str) -> FactorLookup {
    let key = category.trim().to_lowercase();
    match CATEGORY_FACTORS.iter().find(|(name, _)| *name == key) {
        Some((_, factor)) => FactorLookup {
            factor: *factor,
            known_category: true,
        },
        None => FactorLookup {
            factor: DEFAULT_CATEGORY_FACTOR,
            known_category: false,
        },
    }
}

pub fn known_categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_FACTORS.iter().map(|(name, _)| *name)
}
