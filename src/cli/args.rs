//! CLI argument parsing and configuration overrides

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    default_config_path, ConfidencePolicy, FallbackPolicy, PipelineConfig, PipelineConfigBuilder,
};

#[derive(Parser, Debug)]
#[command(name = "fakecheckr", version)]
#[command(about = "Classify news articles as likely real or likely fake")]
pub struct Args {
    /// Article text to analyze (stdin is read when neither TEXT nor --input is given)
    #[arg(conflicts_with = "inputs")]
    pub text: Option<String>,

    /// Article file or directory of .txt/.md articles (can repeat)
    #[arg(short, long = "input", value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Classifier artifact (overrides model_path from the config file)
    #[arg(short, long, env = "FAKECHECKR_MODEL")]
    pub model: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "FAKECHECKR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Column of the classifier output holding P(fake)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub fake_class_index: Option<u8>,

    /// Heuristic used when no classifier result is available
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackArg>,

    /// How confidence is reported for model verdicts
    #[arg(long, value_enum)]
    pub confidence: Option<ConfidenceArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Report whether a classifier is loaded, then exit
    #[arg(long)]
    pub status: bool,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum FallbackArg {
    /// Even normalized length is Fake, fixed confidence
    Parity,
    /// Sensational keyword match
    Keyword,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Parity => FallbackPolicy::LengthParity,
            FallbackArg::Keyword => FallbackPolicy::Keyword,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum ConfidenceArg {
    /// Strength of the fake signal, whatever the label
    FakeSignal,
    /// Probability of the chosen label
    MaxClass,
}

impl From<ConfidenceArg> for ConfidencePolicy {
    fn from(arg: ConfidenceArg) -> Self {
        match arg {
            ConfidenceArg::FakeSignal => ConfidencePolicy::FakeSignal,
            ConfidenceArg::MaxClass => ConfidencePolicy::MaxClass,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored text
    #[default]
    Text,
    /// JSON report
    Json,
    /// HTML result cards
    Html,
}

impl Args {
    /// Config file (explicit, or the per-user default when present) with
    /// command-line overrides applied.
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let base = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => PipelineConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => PipelineConfig::default(),
            },
        };

        let mut builder = PipelineConfigBuilder::from_config(base);
        if let Some(model) = &self.model {
            builder = builder.model_path(model);
        }
        if let Some(index) = self.fake_class_index {
            builder = builder.fake_class_index(index as usize);
        }
        if let Some(fallback) = self.fallback {
            builder = builder.fallback_policy(fallback.into());
        }
        if let Some(confidence) = self.confidence {
            builder = builder.confidence_policy(confidence.into());
        }

        builder.build().context("invalid configuration")
    }
}
