//! Regression tests against the fixture artifacts in `tests/fixtures/models`.
//!
//! Expected values were produced by scoring the same records with the fitted
//! scaler and logistic regressions the fixtures were exported from.

use std::path::PathBuf;
use std::sync::Arc;

use healthguard::inference::{
    build_features, FeatureVector, InferenceService, ModelArtifacts, RawHealthRecord, RiskLevel,
    RiskScorer, FEATURE_COUNT,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models")
}

fn artifacts() -> Arc<ModelArtifacts> {
    Arc::new(ModelArtifacts::load(fixture_dir()).expect("fixture artifacts load"))
}

fn reference_record() -> RawHealthRecord {
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

fn high_risk_record() -> RawHealthRecord {
    RawHealthRecord {
        general_health: "Poor".to_string(),
        exercise: "No".to_string(),
        depression: "Yes".to_string(),
        arthritis: "Yes".to_string(),
        age_category: "80+".to_string(),
        height: 165.0,
        weight: 110.0,
        smoking_history: "Yes".to_string(),
        alcohol_consumption: 0.0,
        fruit_consumption: 5.0,
        green_vegetables_consumption: 2.0,
        fried_potato_consumption: 20.0,
        ..reference_record()
    }
}

#[test]
fn reference_record_matches_golden_output() {
    let service = InferenceService::new(artifacts());
    let result = service.predict(&reference_record()).expect("prediction");

    assert_eq!(result.diabetes_risk, 12.2);
    assert_eq!(result.heart_disease_risk, 7.2);
    assert_eq!(result.diabetes_level, RiskLevel::Low);
    assert_eq!(result.heart_disease_level, RiskLevel::Low);
    assert_eq!(result.health_score, 90.3);
    assert_eq!(result.bmi, 26.1);
}

#[test]
fn reference_record_matches_golden_probabilities() {
    let artifacts = artifacts();
    let features = build_features(&reference_record()).expect("features build");
    let scaled = artifacts
        .normalizer()
        .transform(features.as_slice())
        .expect("scaler transforms");

    let diabetes = artifacts.diabetes().predict_proba(&scaled).expect("scores")[1];
    let heart = artifacts
        .heart_disease()
        .predict_proba(&scaled)
        .expect("scores")[1];

    assert!((diabetes - 0.122_287_205_562_123_52).abs() < 1e-12, "{diabetes}");
    assert!((heart - 0.072_246_215_474_899_16).abs() < 1e-12, "{heart}");
}

#[test]
fn high_risk_record_matches_golden_output() {
    let service = InferenceService::new(artifacts());
    let result = service.predict(&high_risk_record()).expect("prediction");

    assert_eq!(result.diabetes_risk, 80.7);
    assert_eq!(result.heart_disease_risk, 70.8);
    assert_eq!(result.diabetes_level, RiskLevel::High);
    assert_eq!(result.heart_disease_level, RiskLevel::High);
    assert_eq!(result.health_score, 24.2);
    assert_eq!(result.bmi, 40.4);
}

#[test]
fn swapping_height_and_weight_changes_the_prediction() {
    let artifacts = artifacts();
    let scorer = RiskScorer::new(artifacts.clone());
    let features = build_features(&reference_record()).expect("features build");

    let mut swapped: [f64; FEATURE_COUNT] = [0.0; FEATURE_COUNT];
    swapped.copy_from_slice(features.as_slice());
    swapped.swap(9, 10);
    let swapped = FeatureVector::new(swapped);

    let scaled = artifacts
        .normalizer()
        .transform(swapped.as_slice())
        .expect("scaler transforms");
    let diabetes = artifacts.diabetes().predict_proba(&scaled).expect("scores")[1];
    assert!((diabetes - 0.270_685_395_601_974_13).abs() < 1e-12, "{diabetes}");

    let original = scorer.score(&features).expect("scores");
    let permuted = scorer.score(&swapped).expect("scores");
    assert_ne!(original.diabetes_risk, permuted.diabetes_risk);
    assert_eq!(permuted.diabetes_risk, 27.1);
    assert_eq!(permuted.diabetes_level, RiskLevel::Moderate);
}

#[test]
fn repeated_predictions_are_bit_identical() {
    let service = InferenceService::new(artifacts());
    let first = service.predict(&high_risk_record()).expect("first");
    let second = service.predict(&high_risk_record()).expect("second");

    assert_eq!(first.diabetes_risk.to_bits(), second.diabetes_risk.to_bits());
    assert_eq!(
        first.heart_disease_risk.to_bits(),
        second.heart_disease_risk.to_bits()
    );
    assert_eq!(first.health_score.to_bits(), second.health_score.to_bits());
    assert_eq!(first.bmi.to_bits(), second.bmi.to_bits());
}

#[test]
fn unknown_labels_score_like_their_fallbacks() {
    let service = InferenceService::new(artifacts());
    let fallback = RawHealthRecord {
        general_health: "Unknown".to_string(),
        age_category: "N/A".to_string(),
        ..reference_record()
    };
    let explicit = RawHealthRecord {
        general_health: "Good".to_string(),
        age_category: "40-44".to_string(),
        ..reference_record()
    };

    assert_eq!(
        service.predict(&fallback).expect("fallback prediction"),
        service.predict(&explicit).expect("explicit prediction")
    );
}

#[test]
fn predictions_serialize_with_wire_field_names() {
    let service = InferenceService::new(artifacts());
    let result = service.predict(&reference_record()).expect("prediction");
    let value = serde_json::to_value(result).expect("serializes");

    assert_eq!(
        value,
        serde_json::json!({
            "diabetes_risk": 12.2,
            "heart_disease_risk": 7.2,
            "diabetes_level": "Low",
            "heart_disease_level": "Low",
            "health_score": 90.3,
            "bmi": 26.1,
        })
    );
}
