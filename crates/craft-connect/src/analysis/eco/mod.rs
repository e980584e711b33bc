mod factors;
mod profile;

pub use factors::{lookup as lookup_category_factor, CategoryFactor, FactorLookup, DEFAULT_CATEGORY_FACTOR};
pub use profile::{EcoProfileName, EcoScoringProfile, MethodTable, BALANCED_V2, CLASSIC_V1};

use serde::Serialize;

use super::domain::{Product, ProductDraft, ValidationError};
use super::numeric::{round1, round2};

/// Stateless estimator comparing artisan production against a factory baseline.
#[derive(Debug, Clone)]
pub struct EcoImpactEstimator {
    profile: EcoScoringProfile,
}

impl Default for EcoImpactEstimator {
    fn default() -> Self {
        Self::new(EcoProfileName::default())
    }
}

impl EcoImpactEstimator {
    pub fn new(name: EcoProfileName) -> Self {
        Self::with_profile(name.profile())
    }

    pub fn with_profile(profile: EcoScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &EcoScoringProfile {
        &self.profile
    }

    /// Validates the draft first, then estimates.
    pub fn estimate_draft(&self, draft: &ProductDraft) -> Result<EcoImpactResult, EcoImpactError> {
        let product = Product::from_draft(draft)?;
        Ok(self.estimate(&product)?)
    }

    pub fn estimate(&self, product: &Product) -> Result<EcoImpactResult, ComputationError> {
        let profile = &self.profile;
        let method = product.production_method;
        let mass_kg = product.total_mass_kg();
        let distance_km = product.distance_km_to_market;
        let lookup = lookup_category_factor(&product.category);
        let factor = lookup.factor;

        let material_co2 = mass_kg * factor.factory_co2_coefficient;
        let transport_co2 = profile.transport_co2_per_km * distance_km;
        let factory_co2 = material_co2 + transport_co2;
        let artisan_co2 = material_co2 * factor.handmade_multiplier
            + transport_co2 * profile.transport_discount.get(method);
        let co2_saving = (factory_co2 - artisan_co2).max(0.0);

        let recycled_credit = product.percent_recycled_material * profile.recycled_weight;
        let method_bonus = profile.method_bonus.get(method);
        let distance_penalty =
            (distance_km * profile.distance_penalty_per_km).min(profile.distance_penalty_cap);
        let weight_penalty =
            (mass_kg * profile.weight_penalty_per_kg).min(profile.weight_penalty_cap);
        let raw_score = recycled_credit + method_bonus - distance_penalty - weight_penalty;

        ensure_finite("co2_saving_kg", co2_saving)?;
        ensure_finite("sustainability_score", raw_score)?;

        let score = raw_score.clamp(0.0, profile.score_cap);

        tracing::debug!(
            category = %product.category,
            method = method.label(),
            profile = profile.name.label(),
            default_factor = !lookup.known_category,
            co2_saving,
            score,
            "eco impact estimated"
        );

        Ok(EcoImpactResult {
            co2_saving_kg: round2(co2_saving),
            sustainability_score: round1(score),
            profile: profile.name,
            breakdown: EcoBreakdown {
                factory_co2_kg: round2(factory_co2),
                artisan_co2_kg: round2(artisan_co2),
                recycled_credit: round1(recycled_credit),
                method_bonus,
                distance_penalty: round2(distance_penalty),
                weight_penalty: round2(weight_penalty),
                used_default_factor: !lookup.known_category,
            },
        })
    }
}

fn ensure_finite(quantity: &'static str, value: f64) -> Result<(), ComputationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ComputationError::NonFinite { quantity })
    }
}

/// Percentage-scale score and CO2 comparison for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcoImpactResult {
    pub co2_saving_kg: f64,
    pub sustainability_score: f64,
    pub profile: EcoProfileName,
    pub breakdown: EcoBreakdown,
}

/// Intermediate terms so callers can audit a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcoBreakdown {
    pub factory_co2_kg: f64,
    pub artisan_co2_kg: f64,
    pub recycled_credit: f64,
    pub method_bonus: f64,
    pub distance_penalty: f64,
    pub weight_penalty: f64,
    pub used_default_factor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComputationError {
    #[error("{quantity} evaluated to a non-finite value")]
    NonFinite { quantity: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcoImpactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}
