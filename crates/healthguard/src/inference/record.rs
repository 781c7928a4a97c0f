use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::InferenceError;

/// Self-reported survey answers for a single person, exactly as submitted.
///
/// Categorical answers stay as the raw labels; encoding happens in the feature
/// builder so that unrecognized labels can fall back instead of failing here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHealthRecord {
    pub general_health: String,
    pub checkup: String,
    pub exercise: String,
    pub skin_cancer: String,
    pub other_cancer: String,
    pub depression: String,
    pub arthritis: String,
    pub sex: String,
    pub age_category: String,
    /// Height in centimetres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub smoking_history: String,
    pub alcohol_consumption: f64,
    pub fruit_consumption: f64,
    pub green_vegetables_consumption: f64,
    pub fried_potato_consumption: f64,
}

impl RawHealthRecord {
    /// Build a record from a plain key-value object, rejecting missing fields and
    /// non-numeric measurements.
    pub fn from_value(value: &Value) -> Result<Self, InferenceError> {
        Self::deserialize(value).map_err(|err| InferenceError::MalformedInput(err.to_string()))
    }

    /// Check the numeric measurements, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (field, value) in [("height", self.height), ("weight", self.weight)] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{field} must be a positive number, got {value}"));
            }
        }

        for (field, value) in [
            ("alcohol_consumption", self.alcohol_consumption),
            ("fruit_consumption", self.fruit_consumption),
            (
                "green_vegetables_consumption",
                self.green_vegetables_consumption,
            ),
            ("fried_potato_consumption", self.fried_potato_consumption),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "{field} must be a non-negative number, got {value}"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> RawHealthRecord {
    RawHealthRecord {
        general_health: "Good".to_string(),
        checkup: "Within the past year".to_string(),
        exercise: "Yes".to_string(),
        skin_cancer: "No".to_string(),
        other_cancer: "No".to_string(),
        depression: "No".to_string(),
        arthritis: "No".to_string(),
        sex: "Male".to_string(),
        age_category: "45-49".to_string(),
        height: 175.0,
        weight: 80.0,
        smoking_history: "No".to_string(),
        alcohol_consumption: 2.0,
        fruit_consumption: 3.0,
        green_vegetables_consumption: 4.0,
        fried_potato_consumption: 1.0,
    }
}
