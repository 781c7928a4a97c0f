//! Fitted model artifacts and the contracts the scorer consumes.
//!
//! Artifacts are exported from the training pipeline as JSON documents tagged by
//! `kind`. They are loaded once at startup and never mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::InferenceError;

pub const SCALER_FILE: &str = "scaler.json";
pub const DIABETES_MODEL_FILE: &str = "diabetes_model.json";
pub const HEART_MODEL_FILE: &str = "heart_model.json";

/// Fitted transform rescaling raw features into the classifiers' training scale.
pub trait Normalizer: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError>;
    fn descriptor(&self) -> &str;
}

/// Fitted binary classifier returning `[p_negative, p_positive]`.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ArtifactError>;
    fn descriptor(&self) -> &str;
}

/// Failure reported by an artifact while transforming or scoring a vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("X has {actual} features, but {artifact} is expecting {expected} features as input")]
    FeatureCount {
        artifact: String,
        expected: usize,
        actual: usize,
    },
    #[error("{artifact} produced a non-finite value")]
    NonFinite { artifact: String },
    #[error("{artifact} returned probability {value} outside [0, 1]")]
    ProbabilityOutOfRange { artifact: String, value: f64 },
}

fn check_width(artifact: &str, expected: usize, actual: usize) -> Result<(), ArtifactError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ArtifactError::FeatureCount {
            artifact: artifact.to_string(),
            expected,
            actual,
        })
    }
}

/// Per-column standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        let scaler = Self { mean, scale };
        scaler.check()?;
        Ok(scaler)
    }

    fn check(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler has no fitted columns".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "scaler mean has {} columns but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if self
            .mean
            .iter()
            .chain(&self.scale)
            .any(|value| !value.is_finite())
        {
            return Err("scaler parameters must be finite".to_string());
        }
        Ok(())
    }
}

impl Normalizer for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        check_width(self.descriptor(), self.mean.len(), features.len())?;

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                // Constant training columns are exported with a zero scale.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / scale
            })
            .collect())
    }

    fn descriptor(&self) -> &str {
        "StandardScaler"
    }
}

/// Linear model with a logistic link.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, String> {
        let model = Self {
            coefficients,
            intercept,
        };
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("logistic regression has no coefficients".to_string());
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("logistic regression parameters must be finite".to_string());
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ArtifactError> {
        check_width(self.descriptor(), self.coefficients.len(), features.len())?;

        let logit = self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (coefficient, value)| {
                acc + coefficient * value
            });
        if logit.is_nan() {
            return Err(ArtifactError::NonFinite {
                artifact: self.descriptor().to_string(),
            });
        }

        let positive = 1.0 / (1.0 + (-logit).exp());
        Ok([1.0 - positive, positive])
    }

    fn descriptor(&self) -> &str {
        "LogisticRegression"
    }
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum NormalizerArtifact {
    StandardScaler(StandardScaler),
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
}

/// The normalizer and both classifiers, shared read-only by every prediction.
pub struct ModelArtifacts {
    pub(crate) normalizer: Box<dyn Normalizer>,
    pub(crate) diabetes: Box<dyn Classifier>,
    pub(crate) heart_disease: Box<dyn Classifier>,
}

impl ModelArtifacts {
    pub fn new(
        normalizer: impl Normalizer + 'static,
        diabetes: impl Classifier + 'static,
        heart_disease: impl Classifier + 'static,
    ) -> Self {
        Self {
            normalizer: Box::new(normalizer),
            diabetes: Box::new(diabetes),
            heart_disease: Box::new(heart_disease),
        }
    }

    /// Load `scaler.json`, `diabetes_model.json` and `heart_model.json` from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, InferenceError> {
        let dir = dir.as_ref();

        let normalizer = match read_artifact::<NormalizerArtifact>(&dir.join(SCALER_FILE))? {
            NormalizerArtifact::StandardScaler(scaler) => {
                validated(dir.join(SCALER_FILE), scaler.check())?;
                Box::new(scaler) as Box<dyn Normalizer>
            }
        };
        let diabetes = load_classifier(&dir.join(DIABETES_MODEL_FILE))?;
        let heart_disease = load_classifier(&dir.join(HEART_MODEL_FILE))?;

        info!(
            models_dir = %dir.display(),
            scaler = normalizer.descriptor(),
            diabetes_model = diabetes.descriptor(),
            heart_model = heart_disease.descriptor(),
            "model artifacts loaded"
        );

        Ok(Self {
            normalizer,
            diabetes,
            heart_disease,
        })
    }

    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }

    pub fn diabetes(&self) -> &dyn Classifier {
        self.diabetes.as_ref()
    }

    pub fn heart_disease(&self) -> &dyn Classifier {
        self.heart_disease.as_ref()
    }
}

fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
    match read_artifact::<ClassifierArtifact>(path)? {
        ClassifierArtifact::LogisticRegression(model) => {
            validated(path.to_path_buf(), model.check())?;
            Ok(Box::new(model))
        }
    }
}

fn read_artifact<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, InferenceError> {
    let raw = fs::read_to_string(path).map_err(|err| load_failure(path, err))?;
    serde_json::from_str(&raw).map_err(|err| load_failure(path, err))
}

fn validated(path: PathBuf, check: Result<(), String>) -> Result<(), InferenceError> {
    check.map_err(|reason| InferenceError::ArtifactLoad { path, reason })
}

fn load_failure(path: &Path, err: impl std::fmt::Display) -> InferenceError {
    InferenceError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
