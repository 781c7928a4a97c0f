use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::artifacts::ModelArtifacts;
use super::features::build_features;
use super::record::RawHealthRecord;
use super::scorer::{PredictionResult, RiskScorer};
use super::InferenceError;

/// Entry point the transport layer calls for every prediction.
#[derive(Clone)]
pub struct InferenceService {
    scorer: RiskScorer,
}

impl InferenceService {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self {
            scorer: RiskScorer::new(artifacts),
        }
    }

    /// Encode and score a single record. Every call recomputes from scratch.
    pub fn predict(&self, record: &RawHealthRecord) -> Result<PredictionResult, InferenceError> {
        let features = build_features(record).inspect_err(|err| {
            warn!(error = %err, "rejected health record");
        })?;

        let result = self.scorer.score(&features)?;
        debug!(
            diabetes_level = %result.diabetes_level,
            heart_disease_level = %result.heart_disease_level,
            bmi = result.bmi,
            "prediction complete"
        );
        Ok(result)
    }

    /// Score a plain key-value record, reporting missing or non-numeric fields.
    pub fn predict_record(&self, record: &Value) -> Result<PredictionResult, InferenceError> {
        let record = RawHealthRecord::from_value(record).inspect_err(|err| {
            warn!(error = %err, "rejected health record");
        })?;
        self.predict(&record)
    }

    pub fn health_check(&self) -> HealthReport {
        let artifacts = self.scorer.artifacts();
        HealthReport {
            models_loaded: true,
            diabetes_model: artifacts.diabetes().descriptor().to_string(),
            heart_model: artifacts.heart_disease().descriptor().to_string(),
            scaler: artifacts.normalizer().descriptor().to_string(),
        }
    }
}

/// Which artifacts are loaded and what kind each one is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub models_loaded: bool,
    pub diabetes_model: String,
    pub heart_model: String,
    pub scaler: String,
}
