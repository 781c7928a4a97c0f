use crate::infra::AppState;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use healthguard::error::AppError;
use healthguard::inference::{HealthReport, InferenceError, PredictionResult};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/predict", post(predict_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

/// Browser clients may call from any origin.
pub(crate) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub(crate) async fn root() -> Json<Value> {
    Json(json!({
        "message": "HealthGuard AI API is running",
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn predict_endpoint(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, AppError> {
    // Parsed by hand so unreadable bodies surface as 422 regardless of content type.
    let payload: Value = serde_json::from_slice(&body)?;
    match state.inference.predict_record(&payload) {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            if matches!(err, InferenceError::InferenceFailure(_)) {
                error!(error = %err, "prediction failed");
            }
            Err(err.into())
        }
    }
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<HealthReport> {
    Json(state.inference.health_check())
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
