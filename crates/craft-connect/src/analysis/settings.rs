use serde::{Deserialize, Serialize};

use super::eco::EcoProfileName;
use super::insights::TextAnalysisMode;
use super::pricing::PricingConfig;

/// Startup choices for the analysis engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub eco_profile: EcoProfileName,
    pub text_analysis: TextAnalysisMode,
    pub pricing: PricingConfig,
}
