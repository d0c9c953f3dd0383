//! Input confidence scoring.
//!
//! Estimates how well-formed and answerable an input is from three
//! independent boolean signals. The weights are fixed constants; changing
//! them changes matching behavior everywhere downstream.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::lexicon::DOMAIN_TERMS;

/// Weight of the question-structure signal
pub const QUESTION_STRUCTURE_WEIGHT: f32 = 0.3;
/// Weight of the domain-term signal
pub const DOMAIN_TERMS_WEIGHT: f32 = 0.3;
/// Weight of the clean-context signal
pub const CLEAN_CONTEXT_WEIGHT: f32 = 0.4;

/// Exclusive length bounds (in characters) for a clean input
const CLEAN_MIN_CHARS: usize = 10;
const CLEAN_MAX_CHARS: usize = 200;

// NOTE: expect() is acceptable here: the patterns are constants and covered by tests
static QUESTION_STARTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(what|how|why|when|can|could|would|where|which)")
        .expect("Invalid regex: question starter")
});

static REQUEST_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(tell|show|explain|help).+(me|us)").expect("Invalid regex: request phrase")
});

/// Breakdown of the confidence signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSignals {
    pub question_structure: bool,
    pub domain_terms: bool,
    pub clean_context: bool,
    /// Weighted sum clamped to 1.0
    pub score: f32,
}

/// Confidence scorer for normalized input
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    pub fn new() -> Self {
        Self
    }

    fn has_question_structure(&self, text: &str) -> bool {
        QUESTION_STARTER.is_match(text) || text.ends_with('?') || REQUEST_PHRASE.is_match(text)
    }

    fn has_domain_terms(&self, text: &str) -> bool {
        DOMAIN_TERMS.iter().any(|term| text.contains(term))
    }

    fn has_clean_context(&self, text: &str) -> bool {
        let len = text.chars().count();
        len > CLEAN_MIN_CHARS
            && len < CLEAN_MAX_CHARS
            && !text.contains("http")
            && !text.contains(['<', '>', '{', '}'])
    }

    /// Evaluate every signal and the weighted score
    pub fn analyze(&self, normalized: &str) -> ConfidenceSignals {
        let question_structure = self.has_question_structure(normalized);
        let domain_terms = self.has_domain_terms(normalized);
        let clean_context = self.has_clean_context(normalized);

        let mut score = 0.0;
        if question_structure {
            score += QUESTION_STRUCTURE_WEIGHT;
        }
        if domain_terms {
            score += DOMAIN_TERMS_WEIGHT;
        }
        if clean_context {
            score += CLEAN_CONTEXT_WEIGHT;
        }

        ConfidenceSignals {
            question_structure,
            domain_terms,
            clean_context,
            score: f32::min(score, 1.0),
        }
    }

    /// Get just the confidence score
    pub fn score(&self, normalized: &str) -> f32 {
        self.analyze(normalized).score
    }
}
