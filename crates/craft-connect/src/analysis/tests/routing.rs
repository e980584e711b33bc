use super::common::*;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::analysis::domain::ProductDraft;
use crate::analysis::router::{
    analyze_handler, eco_impact_handler, history_handler, report_handler, HistoryQuery,
};
use crate::analysis::{AnalysisSettings, CraftAnalysisService};

fn post_json(uri: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

fn get(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::get(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn eco_impact_handler_reports_missing_fields() {
    let (service, _, _) = build_service();

    let response = eco_impact_handler::<MemoryRepository, MemoryObserver>(
        State(Arc::new(service)),
        axum::Json(ProductDraft {
            category: Some("textiles".to_string()),
            ..ProductDraft::default()
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["missing_fields"],
        json!([
            "weight_g",
            "packaging_weight_g",
            "distance_km_to_market",
            "percent_recycled_material",
            "production_method"
        ])
    );
}

#[tokio::test]
async fn analyze_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(CraftAnalysisService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryObserver::default()),
        AnalysisSettings::default(),
    ));

    let response = analyze_handler::<UnavailableRepository, MemoryObserver>(
        State(service),
        axum::Json(organic_stole()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: database offline");
}

#[tokio::test]
async fn report_handler_returns_not_found_for_unknown_ids() {
    let (service, _, _) = build_service();

    let response = report_handler::<MemoryRepository, MemoryObserver>(
        State(Arc::new(service)),
        Path("analysis-000042".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["analysis_id"], "analysis-000042");
}

#[tokio::test]
async fn history_handler_defaults_paging() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    service.analyze(&organic_stole()).expect("analysis succeeds");

    let response = history_handler::<MemoryRepository, MemoryObserver>(
        State(service),
        Query(HistoryQuery::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["offset"], 0);
    assert_eq!(payload["analyses"][0]["analysis_id"], "analysis-000001");
}

#[tokio::test]
async fn analyze_route_returns_sectioned_report() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let payload = json!({
        "title": "Handmade Bamboo Basket",
        "category": "bamboo",
        "weight_g": 400,
        "packaging_weight_g": 50,
        "distance_km_to_market": 150,
        "percent_recycled_material": 10,
        "production_method": "handmade",
        "materials": "bamboo, jute",
        "description": "Natural bamboo basket woven with traditional methods",
        "location": "Majuli, Assam",
        "pricing": { "base_material_price": 8, "hours_of_labor": 3 }
    });

    let response = router
        .oneshot(post_json("/api/v1/analyze", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let report = read_json_body(response).await;
    assert_eq!(report["analysis_id"], "analysis-000001");
    assert_eq!(report["result"]["eco_impact"]["status"], "completed");
    assert_eq!(report["result"]["tags"]["status"], "completed");
    assert_eq!(report["result"]["pricing"]["result"]["source"], "ensemble");
    assert_eq!(report["result"]["insights"]["status"], "completed");
    assert_eq!(report["result"]["image_labels"]["status"], "skipped");
    assert_eq!(
        report["result"]["sustainability"]["result"]["materials"],
        json!(["bamboo", "jute"])
    );
}

#[tokio::test]
async fn stored_reports_are_served_by_id() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let created = router
        .clone()
        .oneshot(post_json(
            "/api/v1/analyze",
            &serde_json::to_value(organic_stole()).expect("request serializes"),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::OK);

    let response = router
        .oneshot(get("/api/v1/analyses/analysis-000001"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let report = read_json_body(response).await;
    assert_eq!(report["title"], "Organic Cotton Stole");
}

#[tokio::test]
async fn tags_route_accepts_partial_text() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/tags",
            &json!({ "title": "Recycled glass vase", "price": 600 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let tags = read_json_body(response).await;
    assert_eq!(tags["categories"], json!(["glasswork", "pottery"]));
    assert_eq!(tags["price_category"], "luxury");
}

#[tokio::test]
async fn pricing_route_falls_back_to_default_price() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let response = router
        .oneshot(post_json("/api/v1/pricing", &json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let estimate = read_json_body(response).await;
    assert_eq!(estimate["source"], "default");
    assert_eq!(estimate["predicted_price"], 1000.0);
    assert_eq!(estimate["confidence"], 0.3);
}

#[tokio::test]
async fn sustainability_route_grades_requests() {
    let (service, _, _) = build_service();
    let router = analysis_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/sustainability",
            &serde_json::to_value(acrylic_throw()).expect("request serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let assessment = read_json_body(response).await;
    assert_eq!(assessment["grade"], "D");
}

#[tokio::test]
async fn history_route_honors_query_parameters() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    for _ in 0..3 {
        service.analyze(&organic_stole()).expect("analysis succeeds");
    }
    let router = crate::analysis::analysis_router(service);

    let response = router
        .oneshot(get("/api/v1/analyses?limit=1&offset=1"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["analyses"][0]["analysis_id"], "analysis-000002");
}
