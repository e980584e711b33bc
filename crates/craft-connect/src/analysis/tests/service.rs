use super::common::*;
use crate::analysis::domain::ProductDraft;
use crate::analysis::eco::EcoImpactError;
use crate::analysis::repository::{AnalysisId, AnalysisKind, AnalysisRepository, RepositoryError};
use crate::analysis::{AnalysisServiceError, AnalysisSettings, CraftAnalysisService};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

#[test]
fn analyze_stamps_and_stores_reports() {
    let (service, repository, observer) = build_service();
    let now = Utc
        .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    let report = service
        .analyze_at(&organic_stole(), now)
        .expect("analysis succeeds");

    assert_eq!(report.analysis_id, AnalysisId("analysis-000001".to_string()));
    assert_eq!(report.generated_at, now);
    assert_eq!(report.title, "Organic Cotton Stole");
    assert_eq!(report.category.as_deref(), Some("textiles"));

    let stored = repository
        .fetch(&report.analysis_id)
        .expect("fetch succeeds")
        .expect("report present");
    assert_eq!(stored, report);

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AnalysisKind::Comprehensive);
    assert_eq!(events[0].analysis_id, Some(report.analysis_id.clone()));
    assert_eq!(events[0].recorded_at, now);
    assert!(events[0].success);
}

#[test]
fn analysis_ids_increase_per_service() {
    let (service, _, _) = build_service();
    let first = service.analyze(&organic_stole()).expect("first analysis");
    let second = service.analyze(&acrylic_throw()).expect("second analysis");

    assert_eq!(first.analysis_id.0, "analysis-000001");
    assert_eq!(second.analysis_id.0, "analysis-000002");

    let (other, _, _) = build_service();
    let fresh = other.analyze(&organic_stole()).expect("analysis");
    assert_eq!(fresh.analysis_id.0, "analysis-000001");
}

#[test]
fn eco_impact_propagates_validation_errors() {
    let (service, _, observer) = build_service();

    match service.eco_impact(&ProductDraft::default()) {
        Err(AnalysisServiceError::EcoImpact(EcoImpactError::Validation(error))) => {
            assert_eq!(error.missing_fields().len(), 6);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AnalysisKind::EcoImpact);
    assert!(!events[0].success);
}

#[test]
fn repository_failures_surface_and_are_recorded() {
    let observer = Arc::new(MemoryObserver::default());
    let service = CraftAnalysisService::new(
        Arc::new(UnavailableRepository),
        observer.clone(),
        AnalysisSettings::default(),
    );

    match service.analyze(&organic_stole()) {
        Err(AnalysisServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected repository error, got {other:?}"),
    }
    assert!(!observer.events()[0].success);
}

#[test]
fn observer_failures_do_not_fail_requests() {
    let service = CraftAnalysisService::new(
        Arc::new(MemoryRepository::default()),
        Arc::new(OfflineObserver),
        AnalysisSettings::default(),
    );

    assert!(service.analyze(&organic_stole()).is_ok());
    assert!(service.eco_impact(&textile_draft()).is_ok());
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();

    match service.get(&AnalysisId("analysis-999999".to_string())) {
        Err(AnalysisServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn history_pages_newest_first() {
    let (service, _, _) = build_service();
    for _ in 0..3 {
        service.analyze(&organic_stole()).expect("analysis succeeds");
    }

    let page = service.history(2, 0).expect("history loads");
    let ids: Vec<&str> = page.iter().map(|summary| summary.analysis_id.0.as_str()).collect();
    assert_eq!(ids, vec!["analysis-000003", "analysis-000002"]);

    let rest = service.history(2, 2).expect("history loads");
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].analysis_id.0, "analysis-000001");

    assert!(service.history(0, 0).expect("empty page").is_empty());
}

#[test]
fn summaries_condense_completed_sections() {
    let (service, _, _) = build_service();
    service.analyze(&acrylic_throw()).expect("analysis succeeds");

    let summary = &service.history(10, 0).expect("history loads")[0];
    assert_eq!(summary.sustainability_score, None);
    assert_eq!(summary.failed_sections, vec!["eco_impact"]);
    assert!(summary.predicted_price.is_some());
}

#[test]
fn single_section_operations_are_observed() {
    let (service, _, observer) = build_service();

    service.tags(&glass_vase());
    service.sustainability(&organic_stole());
    service.pricing(&Default::default());

    let kinds: Vec<AnalysisKind> = observer.events().iter().map(|event| event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AnalysisKind::Tags,
            AnalysisKind::Sustainability,
            AnalysisKind::Pricing
        ]
    );
}
