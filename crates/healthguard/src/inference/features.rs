use super::encoding::{age_code, checkup_code, general_health_code, male_flag, yes_flag};
use super::record::RawHealthRecord;
use super::InferenceError;

pub const FEATURE_COUNT: usize = 17;

/// Column order the normalizer and both classifiers were fitted with.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "general_health",
    "checkup",
    "exercise",
    "skin_cancer",
    "other_cancer",
    "depression",
    "arthritis",
    "sex",
    "age_category",
    "height_cm",
    "weight_kg",
    "bmi",
    "smoking_history",
    "alcohol_consumption",
    "fruit_consumption",
    "green_vegetables_consumption",
    "fried_potato_consumption",
];

const BMI_INDEX: usize = 11;

/// Encoded model input. Positions follow [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn bmi(&self) -> f64 {
        self.0[BMI_INDEX]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.0[index])
    }
}

pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / height_m.powi(2)
}

/// Encode a record into the fitted column order.
///
/// Measurements are validated first so a zero height can never reach the BMI
/// division.
pub fn build_features(record: &RawHealthRecord) -> Result<FeatureVector, InferenceError> {
    record
        .validate()
        .map_err(|errors| InferenceError::MalformedInput(errors.join("; ")))?;

    let bmi = body_mass_index(record.height, record.weight);

    Ok(FeatureVector([
        f64::from(general_health_code(&record.general_health)),
        f64::from(checkup_code(&record.checkup)),
        f64::from(yes_flag(&record.exercise)),
        f64::from(yes_flag(&record.skin_cancer)),
        f64::from(yes_flag(&record.other_cancer)),
        f64::from(yes_flag(&record.depression)),
        f64::from(yes_flag(&record.arthritis)),
        f64::from(male_flag(&record.sex)),
        f64::from(age_code(&record.age_category)),
        record.height,
        record.weight,
        bmi,
        f64::from(yes_flag(&record.smoking_history)),
        record.alcohol_consumption,
        record.fruit_consumption,
        record.green_vegetables_consumption,
        record.fried_potato_consumption,
    ]))
}
