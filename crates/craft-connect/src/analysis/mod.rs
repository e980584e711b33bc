//! Eco-impact scoring, auto-tagging, sustainability grading and price
//! estimation for handmade craft listings.
//!
//! Every scorer is a pure function over static tables. [`CraftAnalyzer`]
//! composes them into a sectioned report, and [`CraftAnalysisService`] adds
//! ids, timing, history storage and analytics on top.

pub mod domain;
pub mod eco;
pub mod engine;
pub mod image;
pub mod insights;
pub(crate) mod numeric;
pub mod pricing;
pub mod repository;
pub mod router;
pub mod service;
pub mod settings;
pub mod sustainability;
pub mod tagging;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisRequest, CraftText, ImageRef, PricingInputs, Product, ProductDraft, ProductionMethod,
    ValidationError,
};
pub use eco::{
    ComputationError, EcoImpactError, EcoImpactEstimator, EcoImpactResult, EcoProfileName,
    EcoScoringProfile,
};
pub use engine::{AnalysisResult, CraftAnalyzer, Section};
pub use image::{ClassificationError, ImageClassifier, ImageLabel};
pub use insights::{TextAnalysisMode, TextAnalyzer, TextInsights};
pub use pricing::{
    EstimatorUnavailable, PriceEstimate, PriceEstimator, PriceFeatures, PriceSource,
    PricingConfig, PricingEngine, RegressionEstimator, RegressionModel,
};
pub use repository::{
    AnalysisEvent, AnalysisId, AnalysisKind, AnalysisObserver, AnalysisReport,
    AnalysisRepository, AnalysisSummary, ObserverError, RepositoryError,
};
pub use router::analysis_router;
pub use service::{AnalysisServiceError, CraftAnalysisService};
pub use settings::AnalysisSettings;
pub use sustainability::{SustainabilityAnalyzer, SustainabilityAssessment, SustainabilityGrade};
pub use tagging::{AutoTagger, PriceCategory, TaggingResult};
