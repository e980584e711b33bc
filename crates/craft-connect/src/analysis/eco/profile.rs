use serde::{Deserialize, Serialize};

use super::super::domain::ProductionMethod;

/// Named, versioned coefficient sets for the eco-impact formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EcoProfileName {
    #[default]
    #[serde(rename = "balanced-v2")]
    BalancedV2,
    #[serde(rename = "classic-v1")]
    ClassicV1,
}

impl EcoProfileName {
    pub const fn ordered() -> [Self; 2] {
        [Self::BalancedV2, Self::ClassicV1]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BalancedV2 => "balanced-v2",
            Self::ClassicV1 => "classic-v1",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|name| name.label() == normalized)
    }

    pub const fn profile(self) -> EcoScoringProfile {
        match self {
            Self::BalancedV2 => BALANCED_V2,
            Self::ClassicV1 => CLASSIC_V1,
        }
    }
}

/// One value per production method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodTable {
    pub handmade: f64,
    pub small_batch: f64,
    pub factory: f64,
    pub other: f64,
}

impl MethodTable {
    pub const fn get(&self, method: ProductionMethod) -> f64 {
        match method {
            ProductionMethod::Handmade => self.handmade,
            ProductionMethod::SmallBatch => self.small_batch,
            ProductionMethod::Factory => self.factory,
            ProductionMethod::Other => self.other,
        }
    }
}

/// Coefficients driving both the CO2 comparison and the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EcoScoringProfile {
    pub name: EcoProfileName,
    pub transport_co2_per_km: f64,
    /// Fraction of transport emissions kept by artisan logistics.
    pub transport_discount: MethodTable,
    pub recycled_weight: f64,
    pub method_bonus: MethodTable,
    pub distance_penalty_per_km: f64,
    pub distance_penalty_cap: f64,
    pub weight_penalty_per_kg: f64,
    pub weight_penalty_cap: f64,
    pub score_cap: f64,
}

pub const BALANCED_V2: EcoScoringProfile = EcoScoringProfile {
    name: EcoProfileName::BalancedV2,
    transport_co2_per_km: 0.01,
    transport_discount: MethodTable {
        handmade: 0.5,
        small_batch: 0.7,
        factory: 1.0,
        other: 1.0,
    },
    recycled_weight: 0.5,
    method_bonus: MethodTable {
        handmade: 35.0,
        small_batch: 20.0,
        factory: 0.0,
        other: 0.0,
    },
    distance_penalty_per_km: 0.01,
    distance_penalty_cap: 10.0,
    weight_penalty_per_kg: 2.0,
    weight_penalty_cap: 10.0,
    score_cap: 95.0,
};

/// The earlier backend estimator. Keeps its flat 0.5 transport discount for
/// every production method, factory included.
pub const CLASSIC_V1: EcoScoringProfile = EcoScoringProfile {
    name: EcoProfileName::ClassicV1,
    transport_co2_per_km: 0.001,
    transport_discount: MethodTable {
        handmade: 0.5,
        small_batch: 0.5,
        factory: 0.5,
        other: 0.5,
    },
    recycled_weight: 0.5,
    method_bonus: MethodTable {
        handmade: 20.0,
        small_batch: 10.0,
        factory: 0.0,
        other: 0.0,
    },
    distance_penalty_per_km: 0.0,
    distance_penalty_cap: 0.0,
    weight_penalty_per_kg: 0.0,
    weight_penalty_cap: 0.0,
    score_cap: 90.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_labels() {
        for name in EcoProfileName::ordered() {
            assert_eq!(EcoProfileName::parse(name.label()), Some(name));
            assert_eq!(name.profile().name, name);
        }
        assert_eq!(EcoProfileName::parse(" Classic-V1 "), Some(EcoProfileName::ClassicV1));
        assert_eq!(EcoProfileName::parse("aggressive"), None);
        assert_eq!(CLASSIC_V1.transport_discount.factory, 0.5);
        assert_eq!(BALANCED_V2.transport_discount.factory, 1.0);
    }

    #[test]
    fn handmade_is_always_the_lowest_transport_discount() {
        for name in EcoProfileName::ordered() {
            let table = name.profile().transport_discount;
            assert!(table.handmade <= table.small_batch);
            assert!(table.small_batch <= table.factory);
        }
    }
}
