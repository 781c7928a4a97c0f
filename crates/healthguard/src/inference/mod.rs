//! Health-risk inference: survey encoding, normalization, classifier scoring,
//! and risk bucketing.

pub mod artifacts;
pub mod encoding;
pub mod features;
pub mod record;
pub mod scorer;
pub mod service;

use std::path::PathBuf;

pub use artifacts::{ArtifactError, Classifier, ModelArtifacts, Normalizer};
pub use features::{build_features, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use record::RawHealthRecord;
pub use scorer::{PredictionResult, RiskLevel, RiskScorer};
pub use service::{HealthReport, InferenceService};

/// Error raised by the inference pipeline.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("failed to load model artifact {}: {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("prediction error: {0}")]
    InferenceFailure(#[from] ArtifactError),
}
