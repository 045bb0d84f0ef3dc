// src/core/classifier.rs
//
// Classifier contract and interpretation of its probability output.

use thiserror::Error;

/// Failure while invoking a classifier or reading its output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("expected 1 probability row, got {0}")]
    BatchSize(usize),
    #[error("classifier returned an empty probability row")]
    EmptyOutput,
    #[error("expected at most 2 class probabilities, got {0}")]
    TooManyClasses(usize),
    #[error("fake class index {index} is out of range for {len} probabilities")]
    ClassIndex { index: usize, len: usize },
    #[error("probability {0} is not within [0, 1]")]
    InvalidProbability(f64),
    #[error("feature space mismatch: {0}")]
    FeatureMismatch(String),
    #[error("{0}")]
    Model(String),
}

/// A trained binary text classifier.
///
/// Implementations receive already-normalized text and return one row of
/// class probabilities per input. A row is either `[P(class0), P(class1)]` or
/// a single `P(fake)` value.
pub trait Classifier: Send + Sync {
    /// Probability rows for each text in the batch
    fn predict_proba(&self, batch: &[&str]) -> Result<Vec<Vec<f64>>, InferenceError>;

    /// Short identifier shown in verdicts and logs
    fn name(&self) -> &str;
}

/// Run a single text through the classifier and pick out P(fake).
pub fn score_text(
    classifier: &dyn Classifier,
    text: &str,
    fake_class_index: usize,
) -> Result<f64, InferenceError> {
    let rows = classifier.predict_proba(&[text])?;
    if rows.len() != 1 {
        return Err(InferenceError::BatchSize(rows.len()));
    }
    fake_probability(&rows[0], fake_class_index)
}

/// Interpret one probability row.
///
/// Two values are indexed with `fake_class_index`; a single value is taken
/// as P(fake) directly.
pub fn fake_probability(row: &[f64], fake_class_index: usize) -> Result<f64, InferenceError> {
    let p = match row.len() {
        0 => return Err(InferenceError::EmptyOutput),
        1 => row[0],
        2 => *row.get(fake_class_index).ok_or(InferenceError::ClassIndex {
            index: fake_class_index,
            len: row.len(),
        })?,
        n => return Err(InferenceError::TooManyClasses(n)),
    };

    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(InferenceError::InvalidProbability(p));
    }
    Ok(p)
}
