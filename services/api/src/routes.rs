use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use craft_connect::analysis::{
    analysis_router, AnalysisObserver, AnalysisRepository, CraftAnalysisService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_analysis_routes<R, O>(service: Arc<CraftAnalysisService<R, O>>) -> axum::Router
where
    R: AnalysisRepository + 'static,
    O: AnalysisObserver + 'static,
{
    analysis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/analytics", axum::routing::get(analytics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analytics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(state.analytics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryAnalysisRepository, InMemoryAnalytics};
    use axum::body::Body;
    use axum::http::Request;
    use craft_connect::analysis::AnalysisSettings;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, AppState) {
        let analytics = Arc::new(InMemoryAnalytics::default());
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            analytics: analytics.clone(),
        };
        let service = Arc::new(CraftAnalysisService::new(
            Arc::new(InMemoryAnalysisRepository::default()),
            analytics,
            AnalysisSettings::default(),
        ));
        let router = with_analysis_routes(service).layer(Extension(state.clone()));
        (router, state)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request builds")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (router, _) = app(false);
        let response = router.oneshot(get("/health")).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, state) = app(false);
        let response = router
            .clone()
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        state.readiness.store(true, Ordering::Release);
        let response = router.oneshot(get("/ready")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_use_prometheus_content_type() {
        let (router, _) = app(true);
        let response = router.oneshot(get("/metrics")).await.expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn analytics_count_analysis_requests() {
        let (router, _) = app(true);
        let request = Request::post("/api/v1/tags")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Bamboo wind chimes"}"#))
            .expect("request builds");
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(get("/api/v1/analytics"))
            .await
            .expect("route executes");
        let snapshot = json_body(response).await;
        assert_eq!(snapshot["total_requests"], 1);
        assert_eq!(snapshot["requests_by_kind"]["tags"], 1);
        assert_eq!(snapshot["recent"][0]["kind"], "tags");
    }
}
