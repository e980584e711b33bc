use chrono::{DateTime, Utc};
use craft_connect::analysis::{
    AnalysisEvent, AnalysisId, AnalysisObserver, AnalysisReport, AnalysisRepository,
    ObserverError, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Number of events kept for the analytics endpoint.
pub(crate) const RECENT_EVENT_LIMIT: usize = 100;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) analytics: Arc<InMemoryAnalytics>,
}

/// Reports kept by the in-memory history; the oldest are evicted first.
pub(crate) const REPORT_HISTORY_LIMIT: usize = 1_000;

/// Bounded history in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisRepository {
    reports: Arc<Mutex<VecDeque<AnalysisReport>>>,
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    fn insert(&self, report: AnalysisReport) -> Result<AnalysisReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.analysis_id == report.analysis_id)
        {
            return Err(RepositoryError::Conflict);
        }
        if guard.len() == REPORT_HISTORY_LIMIT {
            guard.pop_front();
        }
        guard.push_back(report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|report| &report.analysis_id == id).cloned())
    }

    fn recent(&self, limit: usize, offset: usize) -> Result<Vec<AnalysisReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().skip(offset).take(limit).cloned().collect())
    }
}

#[derive(Default)]
struct AnalyticsLedger {
    total: u64,
    failed: u64,
    processing_ms_total: u64,
    by_kind: BTreeMap<&'static str, u64>,
    recent: VecDeque<AnalysisEvent>,
}

/// Request counters fed by the analysis service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalytics {
    ledger: Arc<Mutex<AnalyticsLedger>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AnalyticsSnapshot {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) total_requests: u64,
    pub(crate) failed_requests: u64,
    pub(crate) average_processing_ms: f64,
    pub(crate) requests_by_kind: BTreeMap<&'static str, u64>,
    pub(crate) recent: Vec<AnalysisEvent>,
}

impl InMemoryAnalytics {
    pub(crate) fn snapshot(&self) -> AnalyticsSnapshot {
        let guard = self.ledger.lock().expect("analytics mutex poisoned");
        let average_processing_ms = if guard.total == 0 {
            0.0
        } else {
            guard.processing_ms_total as f64 / guard.total as f64
        };

        AnalyticsSnapshot {
            generated_at: Utc::now(),
            total_requests: guard.total,
            failed_requests: guard.failed,
            average_processing_ms,
            requests_by_kind: guard.by_kind.clone(),
            recent: guard.recent.iter().rev().cloned().collect(),
        }
    }
}

impl AnalysisObserver for InMemoryAnalytics {
    fn record(&self, event: AnalysisEvent) -> Result<(), ObserverError> {
        let mut guard = self.ledger.lock().expect("analytics mutex poisoned");
        guard.total += 1;
        if !event.success {
            guard.failed += 1;
        }
        guard.processing_ms_total = guard.processing_ms_total.saturating_add(event.processing_ms);
        *guard.by_kind.entry(event.kind.label()).or_insert(0) += 1;
        if guard.recent.len() == RECENT_EVENT_LIMIT {
            guard.recent.pop_front();
        }
        guard.recent.push_back(event);
        Ok(())
    }
}
