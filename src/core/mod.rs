//! Core classification modules

pub mod classifier;
pub mod fallback;
pub mod model;
pub mod normalize;
pub mod pipeline;

pub use classifier::{fake_probability, score_text, Classifier, InferenceError};
pub use fallback::{Fallback, FallbackScore};
pub use model::{LinearTextModel, ModelArtifact, ModelError, Norm, OutputKind, Vectorizer};
pub use normalize::normalize;
pub use pipeline::{decide, Pipeline, PipelineStats, StatsSnapshot};
