use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::{portal_router, with_error_boundary, with_ops_routes};
use assignment_portal::config::AppConfig;
use assignment_portal::error::AppError;
use assignment_portal::submission::HttpCandidatesApi;
use assignment_portal::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let api = Arc::new(HttpCandidatesApi::new(&config.remote)?);

    let app = with_ops_routes(portal_router(api))
        .layer(Extension(app_state))
        .layer(prometheus_layer);
    let app = with_error_boundary(app);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        remote = %config.remote.base_url,
        "assignment portal ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
