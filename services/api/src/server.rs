use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAnalysisRepository, InMemoryAnalytics};
use crate::routes::with_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use craft_connect::analysis::CraftAnalysisService;
use craft_connect::config::AppConfig;
use craft_connect::error::AppError;
use craft_connect::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let analytics = Arc::new(InMemoryAnalytics::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        analytics: analytics.clone(),
    };

    let repository = Arc::new(InMemoryAnalysisRepository::default());
    let analysis_service = Arc::new(CraftAnalysisService::new(
        repository,
        analytics,
        config.analysis,
    ));

    let app = with_analysis_routes(analysis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        eco_profile = config.analysis.eco_profile.label(),
        "craft analysis service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
