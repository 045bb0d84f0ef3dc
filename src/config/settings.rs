// src/config/settings.rs
//
// Pipeline configuration: decision policy, class ordering and fallback heuristics.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sensational phrases used by the keyword fallback.
///
/// Stored in their normalized form (no apostrophes), since matching happens
/// against normalized text.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "shocking",
    "unbelievable",
    "secret",
    "they dont want you to know",
    "click here",
    "you wont believe",
    "miracle cure",
    "one weird trick",
];

/// Errors raised while reading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How confidence is reported for model-scored verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePolicy {
    /// `floor(P(Fake) * 100)` regardless of the final label.
    ///
    /// A "Real" verdict therefore reports a low number: the strength of the
    /// fake signal, not the certainty of the label.
    #[default]
    FakeSignal,
    /// `floor(max(P(Real), P(Fake)) * 100)`, the probability of the chosen label.
    MaxClass,
}

impl ConfidencePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            ConfidencePolicy::FakeSignal => "fake_signal",
            ConfidencePolicy::MaxClass => "max_class",
        }
    }
}

/// Heuristic used when no classifier result is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Even normalized length means Fake; fixed confidence.
    #[default]
    LengthParity,
    /// Sensational keyword match, optionally with a seeded random flip.
    Keyword,
}

impl FallbackPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            FallbackPolicy::LengthParity => "length_parity",
            FallbackPolicy::Keyword => "keyword",
        }
    }
}

/// Settings for the degraded-mode heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub policy: FallbackPolicy,
    /// Confidence reported by the length-parity heuristic
    pub fixed_confidence: u8,
    /// Phrases that mark an article as sensational (keyword policy)
    pub keywords: Vec<String>,
    /// Lower bound (inclusive) of the keyword policy's confidence draw
    pub min_confidence: u8,
    /// Upper bound (exclusive) of the keyword policy's confidence draw
    pub max_confidence: u8,
    /// Probability that a keyword-free article is still labelled Fake
    pub flip_rate: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            policy: FallbackPolicy::LengthParity,
            fixed_confidence: 75,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            min_confidence: 75,
            max_confidence: 95,
            flip_rate: 0.0,
        }
    }
}

/// Complete pipeline configuration, built once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Location of the serialized classifier artifact
    pub model_path: PathBuf,
    /// Index of the "fake" class in a two-value probability row.
    ///
    /// Nothing in the artifact says which column is which; the default of 1
    /// assumes the classifier was trained with labels ordered `[real, fake]`.
    pub fake_class_index: usize,
    /// Fake-probability above which an article is labelled Fake (strict)
    pub threshold: f64,
    /// Minimum trimmed length, in characters, for an article to be analyzed
    pub min_length: usize,
    pub confidence_policy: ConfidencePolicy,
    pub fallback: FallbackConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            fake_class_index: 1,
            threshold: 0.5,
            min_length: 10,
            confidence_policy: ConfidencePolicy::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fake_class_index > 1 {
            return Err(ConfigError::Invalid {
                field: "fake_class_index",
                reason: format!(
                    "must be 0 or 1 for a binary classifier, got {}",
                    self.fake_class_index
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid {
                field: "threshold",
                reason: format!("must be within [0, 1], got {}", self.threshold),
            });
        }
        let fallback = &self.fallback;
        if fallback.fixed_confidence > 100 {
            return Err(ConfigError::Invalid {
                field: "fallback.fixed_confidence",
                reason: format!("must be at most 100, got {}", fallback.fixed_confidence),
            });
        }
        if fallback.min_confidence >= fallback.max_confidence || fallback.max_confidence > 101 {
            return Err(ConfigError::Invalid {
                field: "fallback.min_confidence",
                reason: format!(
                    "confidence range [{}, {}) is empty or exceeds 100",
                    fallback.min_confidence, fallback.max_confidence
                ),
            });
        }
        if !(0.0..=1.0).contains(&fallback.flip_rate) {
            return Err(ConfigError::Invalid {
                field: "fallback.flip_rate",
                reason: format!("must be within [0, 1], got {}", fallback.flip_rate),
            });
        }
        Ok(())
    }
}

/// Per-user configuration file location, e.g. `~/.config/fakecheckr/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fakecheckr").join("config.toml"))
}

/// Builder for pipeline configurations
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.model_path = path.into();
        self
    }

    pub fn fake_class_index(mut self, index: usize) -> Self {
        self.config.fake_class_index = index;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn confidence_policy(mut self, policy: ConfidencePolicy) -> Self {
        self.config.confidence_policy = policy;
        self
    }

    pub fn fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.config.fallback.policy = policy;
        self
    }

    pub fn fixed_confidence(mut self, confidence: u8) -> Self {
        self.config.fallback.fixed_confidence = confidence.min(100);
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.fallback.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn flip_rate(mut self, rate: f64) -> Self {
        self.config.fallback.flip_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.fake_class_index, 1);
        assert_eq!(config.min_length, 10);
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.confidence_policy, ConfidencePolicy::FakeSignal);
        assert_eq!(config.fallback.policy, FallbackPolicy::LengthParity);
        assert_eq!(config.fallback.fixed_confidence, 75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = PipelineConfig::from_toml_str(
            r#"
            model_path = "/srv/models/news.json"
            fake_class_index = 0
            confidence_policy = "max_class"

            [fallback]
            policy = "keyword"
            keywords = ["hoax"]
            "#,
        )
        .unwrap();

        assert_eq!(config.model_path, PathBuf::from("/srv/models/news.json"));
        assert_eq!(config.fake_class_index, 0);
        assert_eq!(config.confidence_policy, ConfidencePolicy::MaxClass);
        assert_eq!(config.fallback.policy, FallbackPolicy::Keyword);
        assert_eq!(config.fallback.keywords, vec!["hoax"]);
        // Untouched keys keep their defaults
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.fallback.min_confidence, 75);
    }

    #[test]
    fn test_rejects_bad_class_index() {
        let err = PipelineConfig::from_toml_str("fake_class_index = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fake_class_index", .. }));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = PipelineConfig::from_toml_str("confidence_policy = \"symmetric\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_empty_confidence_range() {
        let err = PipelineConfig::from_toml_str("[fallback]\nmin_confidence = 90\nmax_confidence = 90")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfigBuilder::new()
            .model_path("artifacts/model.json")
            .fake_class_index(0)
            .fallback_policy(FallbackPolicy::Keyword)
            .flip_rate(3.0)
            .build()
            .unwrap();

        assert_eq!(config.model_path, PathBuf::from("artifacts/model.json"));
        assert_eq!(config.fake_class_index, 0);
        assert_eq!(config.fallback.policy, FallbackPolicy::Keyword);
        assert_eq!(config.fallback.flip_rate, 1.0);
    }

    #[test]
    fn test_builder_validates() {
        assert!(PipelineConfigBuilder::new().fake_class_index(5).build().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load(Path::new("/nonexistent/fakecheckr.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
