// src/core/pipeline.rs
//
// Classification pipeline: validation, normalization, scoring, decision.

use std::sync::atomic::{AtomicU64, Ordering};

use super::classifier::{score_text, Classifier, InferenceError};
use super::fallback::Fallback;
use super::model::LinearTextModel;
use super::normalize::normalize;
use crate::config::{ConfidencePolicy, PipelineConfig};
use crate::detection::{FallbackReason, Label, Outcome, ScoreSource, Verdict};

/// Label and confidence for a model fake-probability.
///
/// Fake iff `p > threshold`; a probability exactly at the threshold is Real.
/// Confidence is truncated, not rounded.
pub fn decide(p: f64, threshold: f64, policy: ConfidencePolicy) -> (Label, u8) {
    let label = if p > threshold { Label::Fake } else { Label::Real };
    let strength = match policy {
        ConfidencePolicy::FakeSignal => p,
        ConfidencePolicy::MaxClass => p.max(1.0 - p),
    };
    (label, percent(strength))
}

fn percent(p: f64) -> u8 {
    (p.clamp(0.0, 1.0) * 100.0).floor() as u8
}

/// Per-pipeline call counters
#[derive(Debug, Default)]
pub struct PipelineStats {
    analyzed: AtomicU64,
    rejected: AtomicU64,
    model_scored: AtomicU64,
    fallback_unavailable: AtomicU64,
    inference_failures: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct StatsSnapshot {
    pub analyzed: u64,
    pub rejected: u64,
    pub model_scored: u64,
    pub fallback_unavailable: u64,
    pub inference_failures: u64,
}

impl PipelineStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            analyzed: self.analyzed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            model_scored: self.model_scored.load(Ordering::Relaxed),
            fallback_unavailable: self.fallback_unavailable.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
        }
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// The classification pipeline.
///
/// Built once at startup and shared by reference. The classifier is never
/// mutated after construction, so `analyze` may run concurrently.
pub struct Pipeline {
    config: PipelineConfig,
    classifier: Option<Box<dyn Classifier>>,
    fallback: Fallback,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, classifier: Option<Box<dyn Classifier>>) -> Self {
        let fallback = Fallback::new(&config.fallback);
        Self {
            config,
            classifier,
            fallback,
            stats: PipelineStats::default(),
        }
    }

    /// Pipeline without a classifier; every verdict comes from the fallback
    pub fn degraded(config: PipelineConfig) -> Self {
        Self::new(config, None)
    }

    /// Build the pipeline, loading the model artifact named in the config.
    ///
    /// A missing or unreadable artifact leaves the pipeline in degraded mode
    /// rather than failing.
    pub fn from_config(config: PipelineConfig) -> Self {
        let path = config.model_path.clone();
        let classifier: Option<Box<dyn Classifier>> = match LinearTextModel::load(&path) {
            Ok(model) => {
                log::info!(
                    "loaded classifier '{}' from {} (md5 {}, {} terms)",
                    model.name(),
                    path.display(),
                    model.digest(),
                    model.vocabulary_size()
                );
                check_class_order(&model, config.fake_class_index);
                Some(Box::new(model))
            }
            Err(err) if err.is_missing() => {
                log::info!(
                    "no classifier artifact at {}; running in degraded mode with {} fallback",
                    path.display(),
                    config.fallback.policy.name()
                );
                None
            }
            Err(err) => {
                log::error!(
                    "classifier artifact at {} is unusable: {}; running in degraded mode",
                    path.display(),
                    err
                );
                None
            }
        };
        Self::new(config, classifier)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn classifier_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Classify one article. Never fails: invalid input yields
    /// [`Outcome::Invalid`] and classifier trouble yields a fallback verdict.
    pub fn analyze(&self, text: &str) -> Outcome {
        PipelineStats::bump(&self.stats.analyzed);

        if text.trim().chars().count() < self.config.min_length {
            PipelineStats::bump(&self.stats.rejected);
            return Outcome::invalid();
        }

        let normalized = normalize(text);
        log::trace!("normalized text: {:?}", normalized);

        let verdict = match self.model_score(&normalized) {
            Some((name, Ok(p))) => {
                PipelineStats::bump(&self.stats.model_scored);
                let (label, confidence) =
                    decide(p, self.config.threshold, self.config.confidence_policy);
                log::debug!("model '{}' P(fake)={:.4} -> {}", name, p, label);
                Verdict::new(
                    label,
                    confidence,
                    ScoreSource::Model {
                        name,
                        fake_probability: p,
                    },
                )
            }
            Some((name, Err(err))) => {
                PipelineStats::bump(&self.stats.inference_failures);
                log::warn!(
                    "classifier '{}' failed: {}; using {} fallback",
                    name,
                    err,
                    self.fallback.policy().name()
                );
                let reason = FallbackReason::InferenceFailure(err.to_string());
                self.fallback_verdict(&normalized, reason)
            }
            None => {
                PipelineStats::bump(&self.stats.fallback_unavailable);
                self.fallback_verdict(&normalized, FallbackReason::ClassifierUnavailable)
            }
        };

        Outcome::Verdict(verdict)
    }

    fn model_score(&self, normalized: &str) -> Option<(String, Result<f64, InferenceError>)> {
        let classifier = self.classifier.as_deref()?;
        let result = score_text(classifier, normalized, self.config.fake_class_index);
        Some((classifier.name().to_string(), result))
    }

    fn fallback_verdict(&self, normalized: &str, reason: FallbackReason) -> Verdict {
        let score = self.fallback.score(normalized);
        Verdict::new(
            score.label,
            score.confidence,
            ScoreSource::Fallback {
                policy: self.fallback.policy(),
                reason,
            },
        )
    }
}

/// Warn when the artifact's recorded class names disagree with the
/// configured fake column.
/// Warn when the configured fake column does not look like the fake class.
/// Returns false when the artifact's recorded class order contradicts it.
fn check_class_order(model: &LinearTextModel, fake_class_index: usize) -> bool {
    let Some(classes) = model.classes() else {
        log::debug!(
            "artifact does not record class order; assuming column {} is fake",
            fake_class_index
        );
        return true;
    };
    match classes.get(fake_class_index) {
        Some(name) if name.to_lowercase().contains("fake") || name == "1" => true,
        Some(name) => {
            log::warn!(
                "fake_class_index {} points at class '{}' (classes: {:?}); verdicts may be inverted",
                fake_class_index,
                name,
                classes
            );
            false
        }
        None => {
            log::warn!(
                "fake_class_index {} is outside the artifact's classes {:?}",
                fake_class_index,
                classes
            );
            false
        }
    }
}
