// src/core/fallback.rs
//
// Degraded-mode heuristics used when no classifier result is available.
// These are placeholders for a trained model and carry no predictive value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::normalize::normalize;
use crate::config::{FallbackConfig, FallbackPolicy};
use crate::detection::Label;

/// Label and confidence chosen by a heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackScore {
    pub label: Label,
    pub confidence: u8,
}

/// Configured fallback heuristic
#[derive(Debug, Clone)]
pub struct Fallback {
    policy: FallbackPolicy,
    fixed_confidence: u8,
    keywords: Vec<String>,
    min_confidence: u8,
    max_confidence: u8,
    flip_rate: f64,
}

impl Fallback {
    pub fn new(config: &FallbackConfig) -> Self {
        let keywords = config
            .keywords
            .iter()
            .map(|k| normalize(k))
            .filter(|k| !k.is_empty())
            .collect();

        // Non-empty draw range inside 0..=100, whatever the config says
        let min_confidence = config.min_confidence.min(100);
        let max_confidence = config.max_confidence.clamp(min_confidence + 1, 101);

        Self {
            policy: config.policy,
            fixed_confidence: config.fixed_confidence.min(100),
            keywords,
            min_confidence,
            max_confidence,
            flip_rate: config.flip_rate,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Score already-normalized text
    pub fn score(&self, normalized: &str) -> FallbackScore {
        match self.policy {
            FallbackPolicy::LengthParity => self.length_parity(normalized),
            FallbackPolicy::Keyword => self.keyword(normalized),
        }
    }

    fn length_parity(&self, normalized: &str) -> FallbackScore {
        let label = if normalized.chars().count() % 2 == 0 {
            Label::Fake
        } else {
            Label::Real
        };
        FallbackScore {
            label,
            confidence: self.fixed_confidence,
        }
    }

    fn keyword(&self, normalized: &str) -> FallbackScore {
        let matched = self.keywords.iter().find(|k| normalized.contains(k.as_str()));
        if let Some(keyword) = matched {
            log::debug!("fallback keyword match: {:?}", keyword);
        }

        // Same text, same draw
        let mut rng = StdRng::seed_from_u64(text_seed(normalized));
        let flipped = self.flip_rate > 0.0 && rng.random::<f64>() < self.flip_rate;
        let confidence = rng
            .random_range(self.min_confidence..self.max_confidence)
            .min(100);

        let label = if matched.is_some() || flipped {
            Label::Fake
        } else {
            Label::Real
        };
        FallbackScore { label, confidence }
    }

    /// Keywords after normalization
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

fn text_seed(text: &str) -> u64 {
    let digest = md5::compute(text.as_bytes());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest.0[..8]);
    u64::from_le_bytes(seed)
}
