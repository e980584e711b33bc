use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnalysisRequest, CraftText, ProductDraft};
use super::eco::EcoImpactError;
use super::pricing::PriceFeatures;
use super::repository::{AnalysisId, AnalysisObserver, AnalysisRepository, RepositoryError};
use super::service::{AnalysisServiceError, CraftAnalysisService, DEFAULT_HISTORY_LIMIT};

/// Router builder exposing the analysis endpoints.
pub fn analysis_router<R, O>(service: Arc<CraftAnalysisService<R, O>>) -> Router
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    Router::new()
        .route("/api/v1/analyze", post(analyze_handler::<R, O>))
        .route("/api/v1/eco-impact", post(eco_impact_handler::<R, O>))
        .route("/api/v1/tags", post(tags_handler::<R, O>))
        .route("/api/v1/pricing", post(pricing_handler::<R, O>))
        .route(
            "/api/v1/sustainability",
            post(sustainability_handler::<R, O>),
        )
        .route("/api/v1/analyses", get(history_handler::<R, O>))
        .route(
            "/api/v1/analyses/:analysis_id",
            get(report_handler::<R, O>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    limit: Option<usize>,
    offset: Option<usize>,
}

pub(crate) async fn analyze_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    match service.analyze(&request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AnalysisServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "analysis already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn eco_impact_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    axum::Json(draft): axum::Json<ProductDraft>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    match service.eco_impact(&draft) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(AnalysisServiceError::EcoImpact(EcoImpactError::Validation(error))) => {
            let payload = json!({
                "error": error.to_string(),
                "missing_fields": error.missing_fields(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn tags_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    axum::Json(item): axum::Json<CraftText>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    let tags = service.tags(&item);
    (StatusCode::OK, axum::Json(tags)).into_response()
}

pub(crate) async fn pricing_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    axum::Json(features): axum::Json<PriceFeatures>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    let estimate = service.pricing(&features);
    (StatusCode::OK, axum::Json(estimate)).into_response()
}

pub(crate) async fn sustainability_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    let assessment = service.sustainability(&request);
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

pub(crate) async fn history_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let offset = query.offset.unwrap_or(0);

    match service.history(limit, offset) {
        Ok(analyses) => {
            let payload = json!({
                "count": analyses.len(),
                "offset": offset,
                "analyses": analyses,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn report_handler<R, O>(
    State(service): State<Arc<CraftAnalysisService<R, O>>>,
    Path(analysis_id): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    let id = AnalysisId(analysis_id);
    match service.get(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(AnalysisServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "analysis not found",
                "analysis_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: AnalysisServiceError) -> Response {
    tracing::error!(%error, "analysis request failed");
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
