use crate::cli::ServeArgs;
use crate::infra::{apply_models_override, load_inference_service, AppState};
use crate::routes::{cors_layer, router};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use healthguard::config::AppConfig;
use healthguard::error::AppError;
use healthguard::telemetry;
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
    apply_models_override(&mut config, args.models_dir.take());

    telemetry::init(&config.telemetry)?;

    let inference = Arc::new(load_inference_service(&config)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        inference,
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(cors_layer())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        models_dir = %config.models.dir.display(),
        "health risk inference service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
