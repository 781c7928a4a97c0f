use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use healthguard::inference::{InferenceService, ModelArtifacts, RawHealthRecord, RiskLevel};
use proptest::prelude::*;

fn service() -> &'static InferenceService {
    static SERVICE: OnceLock<InferenceService> = OnceLock::new();
    SERVICE.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models");
        InferenceService::new(Arc::new(
            ModelArtifacts::load(dir).expect("fixture artifacts load"),
        ))
    })
}

fn label(options: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(options).prop_map(str::to_string)
}

fn yes_no() -> impl Strategy<Value = String> {
    label(&["Yes", "No", "yes", ""])
}

prop_compose! {
    fn records()(
        general_health in label(&["Poor", "Fair", "Good", "Very Good", "Excellent", "Unknown"]),
        checkup in label(&["Never", "5 or more years ago", "Within the past year", "Soon"]),
        flags in prop::collection::vec(yes_no(), 6),
        sex in label(&["Male", "Female"]),
        age_category in label(&["18-24", "45-49", "80+", "N/A"]),
        height in 120.0f64..220.0,
        weight in 30.0f64..250.0,
        consumption in prop::collection::vec(0.0f64..120.0, 4),
    ) -> RawHealthRecord {
        RawHealthRecord {
            general_health,
            checkup,
            exercise: flags[0].clone(),
            skin_cancer: flags[1].clone(),
            other_cancer: flags[2].clone(),
            depression: flags[3].clone(),
            arthritis: flags[4].clone(),
            sex,
            age_category,
            height,
            weight,
            smoking_history: flags[5].clone(),
            alcohol_consumption: consumption[0],
            fruit_consumption: consumption[1],
            green_vegetables_consumption: consumption[2],
            fried_potato_consumption: consumption[3],
        }
    }
}

proptest! {
    #[test]
    fn risks_and_score_stay_in_percentage_range(record in records()) {
        let result = service().predict(&record).expect("valid record predicts");

        prop_assert!((0.0..=100.0).contains(&result.diabetes_risk));
        prop_assert!((0.0..=100.0).contains(&result.heart_disease_risk));
        prop_assert!((0.0..=100.0).contains(&result.health_score));
        prop_assert!(result.bmi > 0.0);
    }

    #[test]
    fn levels_agree_with_rounded_risks(record in records()) {
        let result = service().predict(&record).expect("valid record predicts");

        // Levels come from the unrounded value, so only strict interiors are checked.
        for (risk, level) in [
            (result.diabetes_risk, result.diabetes_level),
            (result.heart_disease_risk, result.heart_disease_level),
        ] {
            if risk < 24.9 {
                prop_assert_eq!(level, RiskLevel::Low);
            } else if (25.1..54.9).contains(&risk) {
                prop_assert_eq!(level, RiskLevel::Moderate);
            } else if risk > 55.1 {
                prop_assert_eq!(level, RiskLevel::High);
            }
        }
    }

    #[test]
    fn non_positive_height_is_rejected(height in -50.0f64..=0.0, record in records()) {
        let record = RawHealthRecord { height, ..record };
        prop_assert!(service().predict(&record).is_err());
    }
}
