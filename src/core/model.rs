// src/core/model.rs
//
// On-disk classifier artifact: a fitted TF-IDF vocabulary plus a logistic
// regression over it, exported as JSON by the training tooling.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

use super::classifier::{Classifier, InferenceError};

/// Artifact format understood by this build
pub const FORMAT_VERSION: u32 = 1;

/// Default scikit-learn token pattern: words of two or more characters
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Errors raised while loading a model artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at {0}")]
    NotFound(PathBuf),
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported model format version {found} (expected {})", FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("invalid n-gram range ({0}, {1})")]
    NgramRange(usize, usize),
}

impl ModelError {
    /// True when the artifact simply isn't there, as opposed to being broken
    pub fn is_missing(&self) -> bool {
        matches!(self, ModelError::NotFound(_))
    }
}

/// Shape of the probability rows the model emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// `[P(class0), P(class1)]`
    #[default]
    TwoClass,
    /// `[P(class1)]`
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    #[serde(rename = "none")]
    Unnormalized,
}

/// Fitted TF-IDF vectorizer parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Serialized artifact layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    /// Class labels in column order, when the exporter recorded them
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    #[serde(default)]
    pub output: OutputKind,
    pub vectorizer: Vectorizer,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_name() -> String {
    "linear-text-model".to_string()
}

/// Logistic regression over TF-IDF features
#[derive(Debug, Clone)]
pub struct LinearTextModel {
    artifact: ModelArtifact,
    digest: String,
}

impl LinearTextModel {
    /// Load an artifact from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelError::NotFound(path.to_path_buf())
            } else {
                ModelError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        if artifact.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: artifact.format_version,
            });
        }
        let (lo, hi) = artifact.vectorizer.ngram_range;
        if lo == 0 || lo > hi {
            return Err(ModelError::NgramRange(lo, hi));
        }

        Ok(Self {
            artifact,
            digest: format!("{:x}", md5::compute(bytes)),
        })
    }

    /// Build from an in-memory artifact. The digest is taken over the
    /// artifact's JSON with object keys sorted, so equal artifacts hash
    /// equally regardless of vocabulary map order.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let canonical = serde_json::to_value(&artifact)?;
        let bytes = serde_json::to_vec(&canonical)?;
        Self::from_slice(&bytes)
    }

    /// MD5 digest of the artifact bytes (canonical JSON for `from_artifact`)
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn classes(&self) -> Option<&[String]> {
        self.artifact.classes.as_deref()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.artifact.vectorizer.vocabulary.len()
    }

    fn check_features(&self) -> Result<(), InferenceError> {
        let vectorizer = &self.artifact.vectorizer;
        let n = vectorizer.vocabulary.len();
        if vectorizer.idf.len() != n {
            return Err(InferenceError::FeatureMismatch(format!(
                "vocabulary has {} terms but idf has {} weights",
                n,
                vectorizer.idf.len()
            )));
        }
        if self.artifact.coefficients.len() != n {
            return Err(InferenceError::FeatureMismatch(format!(
                "vocabulary has {} terms but model has {} coefficients",
                n,
                self.artifact.coefficients.len()
            )));
        }
        Ok(())
    }

    /// Sparse TF-IDF vector for one document
    fn transform(&self, text: &str) -> Result<HashMap<usize, f64>, InferenceError> {
        let vectorizer = &self.artifact.vectorizer;
        let tokens: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();

        let mut counts: HashMap<usize, f64> = HashMap::new();
        // Grams longer than the document match nothing
        let (lo, hi) = vectorizer.ngram_range;
        for n in lo..=hi.min(tokens.len()) {
            for gram in tokens.windows(n) {
                let term = gram.join(" ");
                if let Some(&index) = vectorizer.vocabulary.get(&term) {
                    if index >= vectorizer.idf.len() {
                        return Err(InferenceError::FeatureMismatch(format!(
                            "term {:?} maps to index {} outside the feature space",
                            term, index
                        )));
                    }
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        for (index, value) in counts.iter_mut() {
            let tf = if vectorizer.sublinear_tf {
                1.0 + value.ln()
            } else {
                *value
            };
            *value = tf * vectorizer.idf[*index];
        }

        let norm = match vectorizer.norm {
            Norm::L2 => counts.values().map(|v| v * v).sum::<f64>().sqrt(),
            Norm::L1 => counts.values().map(|v| v.abs()).sum::<f64>(),
            Norm::Unnormalized => 1.0,
        };
        if norm > 0.0 {
            counts.values_mut().for_each(|v| *v /= norm);
        }

        Ok(counts)
    }

    /// P(class1) for one document
    fn positive_probability(&self, text: &str) -> Result<f64, InferenceError> {
        let features = self.transform(text)?;
        let z = features
            .iter()
            .map(|(index, value)| self.artifact.coefficients[*index] * value)
            .sum::<f64>()
            + self.artifact.intercept;
        let p = 1.0 / (1.0 + (-z).exp());
        if !p.is_finite() {
            return Err(InferenceError::Model(format!("non-finite decision value {}", z)));
        }
        Ok(p)
    }
}

impl Classifier for LinearTextModel {
    fn predict_proba(&self, batch: &[&str]) -> Result<Vec<Vec<f64>>, InferenceError> {
        self.check_features()?;
        batch
            .iter()
            .map(|text| {
                let p = self.positive_probability(text)?;
                Ok(match self.artifact.output {
                    OutputKind::TwoClass => vec![1.0 - p, p],
                    OutputKind::Single => vec![p],
                })
            })
            .collect()
    }

    fn name(&self) -> &str {
        &self.artifact.name
    }
}
