//! Configuration module for fakecheckr

mod settings;

pub use settings::{
    default_config_path, ConfidencePolicy, ConfigError, FallbackConfig, FallbackPolicy,
    PipelineConfig, PipelineConfigBuilder, DEFAULT_KEYWORDS,
};
