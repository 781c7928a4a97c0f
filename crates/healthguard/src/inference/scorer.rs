use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::artifacts::{ArtifactError, Classifier, ModelArtifacts};
use super::features::FeatureVector;
use super::InferenceError;

const MODERATE_THRESHOLD: f64 = 25.0;
const HIGH_THRESHOLD: f64 = 55.0;

/// Discrete bucket for a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Bucket a 0-100 percentage. Threshold values belong to the higher bucket.
    pub fn from_percentage(risk: f64) -> Self {
        if risk < MODERATE_THRESHOLD {
            Self::Low
        } else if risk < HIGH_THRESHOLD {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored outcome returned to callers. Numeric fields carry one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub diabetes_risk: f64,
    pub heart_disease_risk: f64,
    pub diabetes_level: RiskLevel,
    pub heart_disease_level: RiskLevel,
    /// `100 - mean(risks)`, not clamped.
    pub health_score: f64,
    pub bmi: f64,
}

/// Runs the normalizer and both classifiers over an encoded vector.
#[derive(Clone)]
pub struct RiskScorer {
    artifacts: Arc<ModelArtifacts>,
}

impl RiskScorer {
    pub fn new(artifacts: Arc<ModelArtifacts>) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn score(&self, features: &FeatureVector) -> Result<PredictionResult, InferenceError> {
        let scaled = self.artifacts.normalizer().transform(features.as_slice())?;

        let diabetes_risk = positive_probability(self.artifacts.diabetes(), &scaled)? * 100.0;
        let heart_disease_risk =
            positive_probability(self.artifacts.heart_disease(), &scaled)? * 100.0;

        let health_score = 100.0 - (diabetes_risk + heart_disease_risk) / 2.0;

        Ok(PredictionResult {
            diabetes_risk: round_tenth(diabetes_risk),
            heart_disease_risk: round_tenth(heart_disease_risk),
            diabetes_level: RiskLevel::from_percentage(diabetes_risk),
            heart_disease_level: RiskLevel::from_percentage(heart_disease_risk),
            health_score: round_tenth(health_score),
            bmi: round_tenth_exact(features.bmi()),
        })
    }
}

fn positive_probability(classifier: &dyn Classifier, scaled: &[f64]) -> Result<f64, ArtifactError> {
    let [_, positive] = classifier.predict_proba(scaled)?;
    if !(0.0..=1.0).contains(&positive) {
        return Err(ArtifactError::ProbabilityOutOfRange {
            artifact: classifier.descriptor().to_string(),
            value: positive,
        });
    }
    Ok(positive)
}

/// Round a model-derived value to one decimal place: scale by ten, round half
/// to even, scale back.
///
/// The scaling step is itself rounded, so `33.45` (stored just below the tie)
/// becomes `334.5` and rounds to `33.4`.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Round to one decimal place from the exact binary value. Used for BMI, which
/// never passes through the models.
pub fn round_tenth_exact(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
