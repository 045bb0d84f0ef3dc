//! Verdict types returned by the classification pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FallbackPolicy;

/// Message returned for input too short to analyze
pub const VALIDATION_MESSAGE: &str = "Please enter a valid news article (at least 10 characters).";

/// Binary classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn color(&self) -> ColorToken {
        match self {
            Label::Fake => ColorToken::Alert,
            Label::Real => ColorToken::Positive,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Label::Fake => "⚠️",
            Label::Real => "✓",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Label::Fake => "⚠️ Fake News Detected",
            Label::Real => "✓ Appears to be Real News",
        }
    }

    /// Explanatory sentence for a verdict with the given confidence
    pub fn explanation(&self, confidence: u8) -> String {
        match self {
            Label::Fake => format!(
                "This article shows signs of misinformation. Confidence: {}%. Consider verifying with reliable sources.",
                confidence
            ),
            Label::Real => format!(
                "This article appears legitimate. Confidence: {}%. Always cross-reference important information.",
                confidence
            ),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Real => f.write_str("Real"),
            Label::Fake => f.write_str("Fake"),
        }
    }
}

/// Presentation-neutral color hint attached to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Alert,
    Positive,
}

impl ColorToken {
    pub fn name(&self) -> &'static str {
        match self {
            ColorToken::Alert => "alert",
            ColorToken::Positive => "positive",
        }
    }

    /// Hex color used by the HTML renderer
    pub fn hex(&self) -> &'static str {
        match self {
            ColorToken::Alert => "#ef4444",
            ColorToken::Positive => "#10b981",
        }
    }
}

/// Why the fallback heuristic produced a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No classifier artifact was loaded at startup
    ClassifierUnavailable,
    /// The classifier was invoked but failed; carries the error text
    InferenceFailure(String),
}

/// Where a verdict's score came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreSource {
    /// Trained classifier output
    Model { name: String, fake_probability: f64 },
    /// Non-authoritative heuristic estimate
    Fallback {
        policy: FallbackPolicy,
        reason: FallbackReason,
    },
}

impl ScoreSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ScoreSource::Fallback { .. })
    }
}

/// Result of one successful classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    pub color: ColorToken,
    /// Confidence percentage in [0, 100]
    pub confidence: u8,
    pub headline: String,
    pub explanation: String,
    pub source: ScoreSource,
}

impl Verdict {
    pub fn new(label: Label, confidence: u8, source: ScoreSource) -> Self {
        let confidence = confidence.min(100);
        let mut explanation = label.explanation(confidence);
        if source.is_fallback() {
            explanation.push_str(" (Heuristic estimate: no trained model was used for this result.)");
        }

        Self {
            label,
            color: label.color(),
            confidence,
            headline: label.headline().to_string(),
            explanation,
            source,
        }
    }

    /// Raw model probability, if a model produced this verdict
    pub fn fake_probability(&self) -> Option<f64> {
        match &self.source {
            ScoreSource::Model { fake_probability, .. } => Some(*fake_probability),
            ScoreSource::Fallback { .. } => None,
        }
    }
}

/// Outcome of a call to `Pipeline::analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Input rejected before classification
    Invalid { message: String },
    Verdict(Verdict),
}

impl Outcome {
    pub fn invalid() -> Self {
        Outcome::Invalid {
            message: VALIDATION_MESSAGE.to_string(),
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Outcome::Verdict(v) => Some(v),
            Outcome::Invalid { .. } => None,
        }
    }

    pub fn label(&self) -> Option<Label> {
        self.verdict().map(|v| v.label)
    }

    pub fn confidence(&self) -> Option<u8> {
        self.verdict().map(|v| v.confidence)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid { .. })
    }

    /// Guidance text for invalid input, explanation otherwise
    pub fn message(&self) -> &str {
        match self {
            Outcome::Invalid { message } => message,
            Outcome::Verdict(v) => &v.explanation,
        }
    }
}

/// Flat `{message, confidence, label}` shape consumed by front ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallerResponse {
    pub message: String,
    pub confidence: Option<u8>,
    pub label: Option<Label>,
}

impl From<&Outcome> for CallerResponse {
    fn from(outcome: &Outcome) -> Self {
        Self {
            message: outcome.message().to_string(),
            confidence: outcome.confidence(),
            label: outcome.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_source(p: f64) -> ScoreSource {
        ScoreSource::Model {
            name: "test".to_string(),
            fake_probability: p,
        }
    }

    #[test]
    fn test_label_colors() {
        assert_eq!(Label::Fake.color(), ColorToken::Alert);
        assert_eq!(Label::Real.color(), ColorToken::Positive);
        assert_eq!(ColorToken::Alert.name(), "alert");
    }

    #[test]
    fn test_verdict_explanation() {
        let verdict = Verdict::new(Label::Fake, 83, model_source(0.83));
        assert_eq!(
            verdict.explanation,
            "This article shows signs of misinformation. Confidence: 83%. Consider verifying with reliable sources."
        );
        assert_eq!(verdict.fake_probability(), Some(0.83));
    }

    #[test]
    fn test_fallback_verdict_is_marked() {
        let source = ScoreSource::Fallback {
            policy: FallbackPolicy::LengthParity,
            reason: FallbackReason::ClassifierUnavailable,
        };
        let verdict = Verdict::new(Label::Real, 75, source);
        assert!(verdict.explanation.contains("no trained model"));
        assert_eq!(verdict.fake_probability(), None);
    }

    #[test]
    fn test_confidence_capped() {
        let verdict = Verdict::new(Label::Fake, 250, model_source(1.0));
        assert_eq!(verdict.confidence, 100);
    }

    #[test]
    fn test_invalid_caller_response() {
        let response = CallerResponse::from(&Outcome::invalid());
        assert_eq!(response.message, VALIDATION_MESSAGE);
        assert_eq!(response.confidence, None);
        assert_eq!(response.label, None);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["confidence"].is_null());
        assert!(json["label"].is_null());
    }

    #[test]
    fn test_verdict_caller_response() {
        let outcome = Outcome::Verdict(Verdict::new(Label::Real, 12, model_source(0.12)));
        let json = serde_json::to_value(CallerResponse::from(&outcome)).unwrap();
        assert_eq!(json["label"], "Real");
        assert_eq!(json["confidence"], 12);
    }
}
