//! fakecheckr - Classify news articles as likely real or likely fake
//!
//! Given free-text article content, the pipeline normalizes it, asks a trained
//! binary classifier for P(fake), and turns that into a confidence-scored
//! verdict. When no classifier is available, or the classifier fails on a
//! particular input, a documented heuristic stands in and the verdict says so.
//!
//! ## Module Structure
//!
//! - `core` - Normalization, classifier contract, model artifact, pipeline
//! - `config` - Pipeline configuration and policies
//! - `detection` - Verdict and outcome types
//! - `cli` - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fakecheckr::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::from_config(PipelineConfig::default());
//! let outcome = pipeline.analyze("Scientists at MIT have discovered a new renewable energy source.");
//!
//! if let Some(verdict) = outcome.verdict() {
//!     println!("{} ({}%)", verdict.label, verdict.confidence);
//! }
//! ```
//!
//! ## Class ordering
//!
//! Classifier artifacts do not say which output column means "fake". The
//! `fake_class_index` setting (default `1`, i.e. `[P(Real), P(Fake)]`) must
//! match the label ordering used at training time, or every verdict is
//! inverted.
//!
//! ## Fallback heuristics
//!
//! | Policy        | Label                                  | Confidence              |
//! |---------------|----------------------------------------|-------------------------|
//! | LengthParity  | Fake when normalized length is even    | fixed (75)              |
//! | Keyword       | Fake on a sensational keyword match    | seeded draw in 75..95   |
//!
//! Neither heuristic has predictive value.

// Core classification functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

// Verdict types
pub mod detection;

pub use config::{
    ConfidencePolicy, FallbackConfig, FallbackPolicy, PipelineConfig, PipelineConfigBuilder,
};
pub use crate::core::{normalize, Classifier, InferenceError, LinearTextModel, ModelError, Pipeline};
pub use detection::{
    CallerResponse, ColorToken, FallbackReason, Label, Outcome, ScoreSource, Verdict,
};
