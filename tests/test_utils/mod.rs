#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use fakecheckr::core::ModelArtifact;
use fakecheckr::{Classifier, InferenceError, Pipeline, PipelineConfig};
use serde_json::json;

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fakecheckr"))
}

/// Binary invocation isolated from the caller's environment and config
pub fn run_fakecheckr() -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.env_remove("FAKECHECKR_MODEL")
        .env_remove("FAKECHECKR_CONFIG")
        .env("XDG_CONFIG_HOME", "/nonexistent/fakecheckr-test-config")
        .env("RUST_LOG", "off");
    cmd
}

/// Classifier returning the same rows for every call
pub struct FixedClassifier(pub Vec<Vec<f64>>);

impl Classifier for FixedClassifier {
    fn predict_proba(&self, _batch: &[&str]) -> Result<Vec<Vec<f64>>, InferenceError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Classifier that fails on every call
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict_proba(&self, _batch: &[&str]) -> Result<Vec<Vec<f64>>, InferenceError> {
        Err(InferenceError::FeatureMismatch(
            "expected 5000 features, got 12".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn pipeline_with(classifier: impl Classifier + 'static, config: PipelineConfig) -> Pipeline {
    Pipeline::new(config, Some(Box::new(classifier)))
}

/// Small TF-IDF + logistic artifact that leans Fake on sensational wording
pub fn sensational_artifact() -> serde_json::Value {
    json!({
        "format_version": 1,
        "name": "tfidf-logreg",
        "classes": ["real", "fake"],
        "output": "two_class",
        "vectorizer": {
            "vocabulary": {
                "shocking": 0,
                "secret": 1,
                "unbelievable": 2,
                "research": 3,
                "published": 4,
                "scientists": 5
            },
            "idf": [1.5, 1.5, 1.5, 1.2, 1.2, 1.2],
            "ngram_range": [1, 1],
            "sublinear_tf": false,
            "norm": "l2"
        },
        "coefficients": [3.0, 2.5, 3.0, -2.5, -2.0, -2.0],
        "intercept": 0.0
    })
}

pub fn write_artifact(dir: &Path, artifact: &serde_json::Value) -> PathBuf {
    let path = dir.join("model.json");
    std::fs::write(&path, serde_json::to_vec_pretty(artifact).unwrap()).unwrap();
    path
}

pub fn parse_artifact(artifact: &serde_json::Value) -> ModelArtifact {
    serde_json::from_value(artifact.clone()).unwrap()
}
