use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::AnalysisResult;
use super::sustainability::SustainabilityGrade;

/// Identifier wrapper for stored analyses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnalysisId(pub String);

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A comprehensive analysis stamped with its id and timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: AnalysisId,
    pub generated_at: DateTime<Utc>,
    pub processing_ms: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub result: AnalysisResult,
}

impl AnalysisReport {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            analysis_id: self.analysis_id.clone(),
            generated_at: self.generated_at,
            title: self.title.clone(),
            category: self.category.clone(),
            sustainability_score: self
                .result
                .eco_impact
                .result()
                .map(|eco| eco.sustainability_score),
            grade: self
                .result
                .sustainability
                .result()
                .map(|assessment| assessment.grade),
            predicted_price: self
                .result
                .pricing
                .result()
                .map(|estimate| estimate.predicted_price),
            failed_sections: self.result.failed_sections(),
        }
    }
}

/// Condensed history entry for listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub analysis_id: AnalysisId,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub sustainability_score: Option<f64>,
    pub grade: Option<SustainabilityGrade>,
    pub predicted_price: Option<f64>,
    pub failed_sections: Vec<&'static str>,
}

/// Storage abstraction for analysis history.
pub trait AnalysisRepository: Send + Sync {
    fn insert(&self, report: AnalysisReport) -> Result<AnalysisReport, RepositoryError>;
    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisReport>, RepositoryError>;
    /// Newest first.
    fn recent(&self, limit: usize, offset: usize) -> Result<Vec<AnalysisReport>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("analysis already exists")]
    Conflict,
    #[error("analysis not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Which operation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Comprehensive,
    EcoImpact,
    Tags,
    Pricing,
    Sustainability,
}

impl AnalysisKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::EcoImpact => "eco_impact",
            Self::Tags => "tags",
            Self::Pricing => "pricing",
            Self::Sustainability => "sustainability",
        }
    }
}

/// Outcome of one request, reported to analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEvent {
    pub kind: AnalysisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<AnalysisId>,
    pub recorded_at: DateTime<Utc>,
    pub processing_ms: u64,
    pub success: bool,
}

/// Outbound hook for request analytics.
pub trait AnalysisObserver: Send + Sync {
    fn record(&self, event: AnalysisEvent) -> Result<(), ObserverError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
}
