use crate::infra::{apply_models_override, load_inference_service};
use clap::Args;
use healthguard::config::AppConfig;
use healthguard::error::AppError;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JSON file holding the health record (use `-` for stdin)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Override the directory holding the scaler and classifier artifacts
    #[arg(long)]
    pub(crate) models_dir: Option<PathBuf>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs { input, models_dir } = args;

    let mut config = AppConfig::load()?;
    apply_models_override(&mut config, models_dir);

    let service = load_inference_service(&config)?;
    let record = read_record(&input)?;
    let result = service.predict_record(&record)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_record(input: &Path) -> Result<Value, AppError> {
    let raw = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/healthguard/tests/fixtures")
            .join(name)
    }

    #[test]
    fn read_record_reports_missing_files() {
        let err = read_record(&PathBuf::from("/nonexistent/record.json")).expect_err("missing");
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn read_record_reports_invalid_json() {
        let err = read_record(&fixture("corrupt/scaler.json")).expect_err("truncated json");
        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[test]
    fn run_predict_fails_fast_on_missing_artifacts() {
        let args = PredictArgs {
            input: fixture("models/scaler.json"),
            models_dir: Some(fixture("does-not-exist")),
        };
        let err = run_predict(args).expect_err("artifacts missing");
        assert!(matches!(
            err,
            AppError::Inference(healthguard::inference::InferenceError::ArtifactLoad { .. })
        ));
    }
}
