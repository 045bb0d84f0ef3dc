//! Output formatting for CLI results

use chrono::{DateTime, Utc};
use colorful::{Color, Colorful};
use serde::Serialize;

use crate::core::{Pipeline, StatsSnapshot};
use crate::detection::{CallerResponse, FallbackReason, Label, Outcome, ScoreSource, Verdict};

const BAR_WIDTH: usize = 20;

/// One analyzed article, as written to JSON output
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub source: &'a str,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub response: CallerResponse,
    pub outcome: &'a Outcome,
}

impl<'a> Report<'a> {
    pub fn new(source: &'a str, outcome: &'a Outcome) -> Self {
        Self {
            source,
            analyzed_at: Utc::now(),
            response: CallerResponse::from(outcome),
            outcome,
        }
    }
}

/// Format one outcome for terminal output
pub fn format_outcome(source: &str, outcome: &Outcome, verbose: bool) -> String {
    let mut output = String::new();

    let verdict = match outcome {
        Outcome::Invalid { message } => {
            output.push_str(&format!("{} {}\n", "✗".yellow(), source.bold()));
            output.push_str(&format!("  {}\n", message.as_str().yellow()));
            return output;
        }
        Outcome::Verdict(v) => v,
    };

    output.push_str(&format!(
        "{}  {}\n",
        verdict.headline.as_str().color(label_color(verdict.label)).bold(),
        source.dim()
    ));
    output.push_str(&format!(
        "  Confidence: {}% {}\n",
        verdict.confidence,
        confidence_bar(verdict.confidence).color(label_color(verdict.label))
    ));
    output.push_str(&format!("  {}\n", verdict.explanation));
    output.push_str(&format!("  {}\n", format_source(verdict, verbose).dim()));

    output
}

fn label_color(label: Label) -> Color {
    match label {
        Label::Fake => Color::Red,
        Label::Real => Color::Green,
    }
}

fn confidence_bar(confidence: u8) -> String {
    let filled = (confidence as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn format_source(verdict: &Verdict, verbose: bool) -> String {
    match &verdict.source {
        ScoreSource::Model {
            name,
            fake_probability,
        } => {
            if verbose {
                format!("Source: model '{}' (P(fake) = {:.4})", name, fake_probability)
            } else {
                format!("Source: model '{}'", name)
            }
        }
        ScoreSource::Fallback { policy, reason } => {
            let why = match reason {
                FallbackReason::ClassifierUnavailable => "no classifier loaded".to_string(),
                FallbackReason::InferenceFailure(err) if verbose => {
                    format!("classifier failed: {}", err)
                }
                FallbackReason::InferenceFailure(_) => "classifier failed".to_string(),
            };
            format!("Source: {} heuristic ({})", policy.name(), why)
        }
    }
}

/// Format outcomes as a JSON array of reports
pub fn format_json(results: &[(&str, &Outcome)]) -> serde_json::Result<String> {
    let reports: Vec<Report<'_>> = results
        .iter()
        .map(|(source, outcome)| Report::new(source, outcome))
        .collect();
    serde_json::to_string_pretty(&reports)
}

/// Render a verdict card as HTML
pub fn format_html(outcome: &Outcome) -> String {
    let verdict = match outcome {
        Outcome::Invalid { message } => {
            return format!(
                "<div style=\"padding: 20px; border-radius: 8px; border: 2px solid #9ca3af;\">\n    <p style=\"margin: 0; color: #6b7280;\">{}</p>\n</div>\n",
                escape_html(message)
            );
        }
        Outcome::Verdict(v) => v,
    };

    let color = verdict.color.hex();
    format!(
        r#"<div style="padding: 20px; border-radius: 8px; border: 2px solid {color}; background: {color}15;">
    <h2 style="color: {color}; margin: 0 0 10px 0;">{headline}</h2>
    <p style="margin: 10px 0;"><strong>Confidence Score:</strong> {confidence}%</p>
    <div style="background: #f3f4f6; border-radius: 4px; height: 8px; overflow: hidden; margin: 10px 0;">
        <div style="background: {color}; height: 100%; width: {confidence}%;"></div>
    </div>
    <p style="margin: 10px 0; color: #6b7280;">{explanation}</p>
</div>
"#,
        color = color,
        headline = escape_html(&verdict.headline),
        confidence = verdict.confidence,
        explanation = escape_html(&verdict.explanation),
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Format a summary for multiple articles
pub fn format_summary(outcomes: &[&Outcome], stats: Option<&StatsSnapshot>) -> String {
    let mut output = String::new();

    let fake = outcomes.iter().filter(|o| o.label() == Some(Label::Fake)).count();
    let real = outcomes.iter().filter(|o| o.label() == Some(Label::Real)).count();
    let invalid = outcomes.iter().filter(|o| o.is_invalid()).count();
    let heuristic = outcomes
        .iter()
        .filter_map(|o| o.verdict())
        .filter(|v| v.source.is_fallback())
        .count();

    output.push_str(&format!("\n{}\n", "Summary:".bold()));
    output.push_str(&format!("  {} articles analyzed\n", outcomes.len()));

    if real > 0 {
        output.push_str(&format!("  {}\n", format!("✓ {} real", real).green()));
    }
    if fake > 0 {
        output.push_str(&format!("  {}\n", format!("⚠ {} fake", fake).red()));
    }
    if invalid > 0 {
        output.push_str(&format!("  {}\n", format!("✗ {} rejected", invalid).yellow()));
    }
    if heuristic > 0 {
        output.push_str(&format!(
            "  {}\n",
            format!("{} scored by fallback heuristic", heuristic).dim()
        ));
    }

    if let Some(stats) = stats {
        output.push_str(&format!(
            "  {}\n",
            format!(
                "model: {}, unavailable: {}, inference failures: {}",
                stats.model_scored, stats.fallback_unavailable, stats.inference_failures
            )
            .dim()
        ));
    }

    output
}

/// Describe whether the pipeline has a classifier
pub fn format_status(pipeline: &Pipeline) -> String {
    let config = pipeline.config();
    let mut output = String::new();

    match pipeline.classifier_name() {
        Some(name) => output.push_str(&format!(
            "{} classifier '{}' loaded from {}\n",
            "✓".green(),
            name,
            config.model_path.display()
        )),
        None => output.push_str(&format!(
            "{} no classifier loaded ({}); verdicts use the {} heuristic\n",
            "⚠".yellow(),
            config.model_path.display(),
            config.fallback.policy.name()
        )),
    }
    output.push_str(&format!("  fake class index: {}\n", config.fake_class_index));
    output.push_str(&format!("  threshold: {}\n", config.threshold));
    output.push_str(&format!("  confidence policy: {}\n", config.confidence_policy.name()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FallbackPolicy, PipelineConfig};

    fn model_outcome(label: Label, confidence: u8) -> Outcome {
        Outcome::Verdict(Verdict::new(
            label,
            confidence,
            ScoreSource::Model {
                name: "tfidf".to_string(),
                fake_probability: confidence as f64 / 100.0,
            },
        ))
    }

    #[test]
    fn test_format_verdict() {
        let output = format_outcome("story.txt", &model_outcome(Label::Fake, 83), true);
        assert!(output.contains("Fake News Detected"));
        assert!(output.contains("story.txt"));
        assert!(output.contains("Confidence: 83%"));
        assert!(output.contains("P(fake) = 0.8300"));
    }

    #[test]
    fn test_format_invalid() {
        let output = format_outcome("<argument>", &Outcome::invalid(), false);
        assert!(output.contains("at least 10 characters"));
        assert!(!output.contains("Confidence"));
    }

    #[test]
    fn test_format_fallback_source() {
        let outcome = Outcome::Verdict(Verdict::new(
            Label::Real,
            75,
            ScoreSource::Fallback {
                policy: FallbackPolicy::LengthParity,
                reason: FallbackReason::InferenceFailure("feature space mismatch".to_string()),
            },
        ));
        let quiet = format_outcome("a", &outcome, false);
        assert!(quiet.contains("length_parity heuristic (classifier failed)"));
        let verbose = format_outcome("a", &outcome, true);
        assert!(verbose.contains("feature space mismatch"));
    }

    #[test]
    fn test_confidence_bar() {
        assert_eq!(confidence_bar(0), format!("[{}]", "░".repeat(BAR_WIDTH)));
        assert_eq!(confidence_bar(100), format!("[{}]", "█".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_format_json() {
        let fake = model_outcome(Label::Fake, 91);
        let invalid = Outcome::invalid();
        let json = format_json(&[("a.txt", &fake), ("b.txt", &invalid)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["source"], "a.txt");
        assert_eq!(value[0]["label"], "Fake");
        assert_eq!(value[0]["confidence"], 91);
        assert_eq!(value[0]["outcome"]["status"], "verdict");
        assert_eq!(value[0]["outcome"]["color"], "alert");
        assert!(value[1]["label"].is_null());
        assert!(value[1]["confidence"].is_null());
        assert_eq!(value[1]["outcome"]["status"], "invalid");
    }

    #[test]
    fn test_format_html() {
        let html = format_html(&model_outcome(Label::Real, 12));
        assert!(html.contains("#10b981"));
        assert!(html.contains("width: 12%"));
        assert!(html.contains("Appears to be Real News"));
    }

    #[test]
    fn test_format_summary() {
        let a = model_outcome(Label::Fake, 91);
        let b = model_outcome(Label::Real, 10);
        let c = Outcome::invalid();
        let summary = format_summary(&[&a, &b, &c], None);
        assert!(summary.contains("3 articles analyzed"));
        assert!(summary.contains("1 real"));
        assert!(summary.contains("1 fake"));
        assert!(summary.contains("1 rejected"));
    }

    #[test]
    fn test_format_status_degraded() {
        let pipeline = Pipeline::degraded(PipelineConfig::default());
        let status = format_status(&pipeline);
        assert!(status.contains("no classifier loaded"));
        assert!(status.contains("length_parity"));
    }
}
