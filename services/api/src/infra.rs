use healthguard::config::AppConfig;
use healthguard::error::AppError;
use healthguard::inference::{InferenceService, ModelArtifacts};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) inference: Arc<InferenceService>,
}

pub(crate) fn apply_models_override(config: &mut AppConfig, models_dir: Option<PathBuf>) {
    if let Some(dir) = models_dir {
        config.models.dir = dir;
    }
}

/// Load the artifacts once; any failure here aborts startup.
pub(crate) fn load_inference_service(config: &AppConfig) -> Result<InferenceService, AppError> {
    let artifacts = ModelArtifacts::load(&config.models.dir)?;
    Ok(InferenceService::new(Arc::new(artifacts)))
}
