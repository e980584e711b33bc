use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use super::domain::{AnalysisRequest, CraftText, ProductDraft};
use super::eco::{EcoImpactError, EcoImpactResult};
use super::engine::CraftAnalyzer;
use super::pricing::{PriceEstimate, PriceFeatures};
use super::repository::{
    AnalysisEvent, AnalysisId, AnalysisKind, AnalysisObserver, AnalysisReport,
    AnalysisRepository, AnalysisSummary, RepositoryError,
};
use super::settings::AnalysisSettings;
use super::sustainability::SustainabilityAssessment;
use super::tagging::TaggingResult;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Service composing the analyzer, history repository, and analytics observer.
pub struct CraftAnalysisService<R, O> {
    analyzer: Arc<CraftAnalyzer>,
    repository: Arc<R>,
    observer: Arc<O>,
    sequence: AtomicU64,
}

impl<R, O> CraftAnalysisService<R, O>
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    pub fn new(repository: Arc<R>, observer: Arc<O>, settings: AnalysisSettings) -> Self {
        Self::with_analyzer(CraftAnalyzer::new(&settings), repository, observer)
    }

    /// Service around a pre-built analyzer, e.g. one carrying a regression
    /// estimator or image classifier.
    pub fn with_analyzer(analyzer: CraftAnalyzer, repository: Arc<R>, observer: Arc<O>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            repository,
            observer,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_analysis_id(&self) -> AnalysisId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        AnalysisId(format!("analysis-{id:06}"))
    }

    /// Run every section and store the stamped report.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisServiceError> {
        self.analyze_at(request, Utc::now())
    }

    pub fn analyze_at(
        &self,
        request: &AnalysisRequest,
        now: DateTime<Utc>,
    ) -> Result<AnalysisReport, AnalysisServiceError> {
        let started = Instant::now();
        let result = self.analyzer.analyze(request);
        let analysis_id = self.next_analysis_id();

        let report = AnalysisReport {
            analysis_id: analysis_id.clone(),
            generated_at: now,
            processing_ms: elapsed_ms(started),
            title: request.title.clone(),
            category: request.product.category.clone(),
            result,
        };

        let stored = self.repository.insert(report);
        self.notify(
            AnalysisKind::Comprehensive,
            Some(analysis_id),
            now,
            started,
            stored.is_ok(),
        );

        let stored = stored?;
        tracing::info!(
            analysis_id = %stored.analysis_id,
            processing_ms = stored.processing_ms,
            failed_sections = ?stored.result.failed_sections(),
            "analysis stored"
        );
        Ok(stored)
    }

    pub fn eco_impact(&self, draft: &ProductDraft) -> Result<EcoImpactResult, AnalysisServiceError> {
        let started = Instant::now();
        let outcome = self.analyzer.eco_impact(draft);
        self.notify(
            AnalysisKind::EcoImpact,
            None,
            Utc::now(),
            started,
            outcome.is_ok(),
        );
        Ok(outcome?)
    }

    pub fn tags(&self, item: &CraftText) -> TaggingResult {
        let started = Instant::now();
        let tags = self.analyzer.tag(item);
        self.notify(AnalysisKind::Tags, None, Utc::now(), started, true);
        tags
    }

    pub fn pricing(&self, features: &PriceFeatures) -> PriceEstimate {
        let started = Instant::now();
        let estimate = self.analyzer.price(features);
        self.notify(AnalysisKind::Pricing, None, Utc::now(), started, true);
        estimate
    }

    pub fn sustainability(&self, request: &AnalysisRequest) -> SustainabilityAssessment {
        let started = Instant::now();
        let assessment = self.analyzer.sustainability(request);
        self.notify(
            AnalysisKind::Sustainability,
            None,
            Utc::now(),
            started,
            true,
        );
        assessment
    }

    /// Fetch a stored report for API responses.
    pub fn get(&self, analysis_id: &AnalysisId) -> Result<AnalysisReport, AnalysisServiceError> {
        let report = self
            .repository
            .fetch(analysis_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(report)
    }

    /// Newest-first page of stored analyses. `limit` is capped at
    /// [`MAX_HISTORY_LIMIT`].
    pub fn history(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<AnalysisSummary>, AnalysisServiceError> {
        let limit = limit.min(MAX_HISTORY_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let reports = self.repository.recent(limit, offset)?;
        Ok(reports.iter().map(AnalysisReport::summary).collect())
    }

    fn notify(
        &self,
        kind: AnalysisKind,
        analysis_id: Option<AnalysisId>,
        recorded_at: DateTime<Utc>,
        started: Instant,
        success: bool,
    ) {
        let event = AnalysisEvent {
            kind,
            analysis_id,
            recorded_at,
            processing_ms: elapsed_ms(started),
            success,
        };

        if let Err(error) = self.observer.record(event) {
            tracing::warn!(%error, kind = kind.label(), "failed to record analysis event");
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error(transparent)]
    EcoImpact(#[from] EcoImpactError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
