//! Response matching.
//!
//! Scores every usable knowledge-base entry against a [`ProcessedInput`]
//! and keeps the best one. Scores are additive evidence, capped at 1.0 per
//! entry; callers accept a match only above [`MATCH_THRESHOLD`].

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::brain::lexicon::{concepts_in, variations_for};
use crate::brain::ProcessedInput;
use crate::knowledge::{KnowledgeBase, KnowledgeEntry};

/// Per extracted concept found in the entry key
pub const KEY_CONCEPT_WEIGHT: f32 = 0.4;
/// Per extracted concept found in the entry answer
pub const ANSWER_CONCEPT_WEIGHT: f32 = 0.2;
/// Once, if a phrase variation of the query type is in the key
pub const QUERY_TYPE_WEIGHT: f32 = 0.3;
/// Per context tag whose label is in the answer
pub const CONTEXT_WEIGHT: f32 = 0.1;
/// Per-entry score ceiling
pub const MAX_MATCH_SCORE: f32 = 1.0;
/// Matches must score strictly above this
pub const MATCH_THRESHOLD: f32 = 0.4;
/// Upper bound on fallback suggestions
pub const MAX_SUGGESTIONS: usize = 3;

/// Outcome of matching one processed input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Key of the best-scoring entry, if any entry scored above zero
    pub matched_key: Option<String>,
    /// Score of the best entry (0.0 - 1.0)
    pub confidence: f32,
    /// Related keys to offer when the match is not confident
    pub fallback_suggestions: Vec<String>,
}

impl MatchResult {
    /// Result used when there is nothing to match against
    pub fn degraded() -> Self {
        Self {
            matched_key: None,
            confidence: 0.0,
            fallback_suggestions: vec![],
        }
    }

    /// Whether the match clears the threshold
    pub fn is_confident(&self) -> bool {
        self.matched_key.is_some() && is_confident_match(self.confidence)
    }
}

/// Strict threshold test: exactly 0.4 is not a match
pub fn is_confident_match(score: f32) -> bool {
    score > MATCH_THRESHOLD
}

/// Matcher over a knowledge base
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseMatcher;

impl ResponseMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Score a single entry against the processed input
    pub fn score_entry(&self, processed: &ProcessedInput, entry: &KnowledgeEntry) -> f32 {
        let key = entry.key.to_lowercase();
        let answer = entry.answer.to_lowercase();
        let mut score = 0.0;

        for concept in &processed.concepts {
            if key.contains(&concept.concept) {
                score += KEY_CONCEPT_WEIGHT;
            }
            if answer.contains(&concept.concept) {
                score += ANSWER_CONCEPT_WEIGHT;
            }
        }

        if variations_for(processed.query_type)
            .iter()
            .any(|variation| key.contains(variation))
        {
            score += QUERY_TYPE_WEIGHT;
        }

        for context in &processed.contexts {
            if answer.contains(context.label()) {
                score += CONTEXT_WEIGHT;
            }
        }

        f32::min(score, MAX_MATCH_SCORE)
    }

    /// Keys related to the categories of the extracted concepts
    fn fallback_suggestions(&self, processed: &ProcessedInput, kb: &KnowledgeBase) -> Vec<String> {
        let terms: Vec<&str> = processed
            .categories()
            .into_iter()
            .flat_map(|category| concepts_in(category).iter().copied())
            .collect();

        if terms.is_empty() {
            return vec![];
        }

        kb.iter()
            .filter(|entry| entry.is_usable())
            .filter(|entry| {
                let key = entry.key.to_lowercase();
                let answer = entry.answer.to_lowercase();
                terms.iter().any(|t| key.contains(t) || answer.contains(t))
            })
            .map(|entry| entry.key.clone())
            .take(MAX_SUGGESTIONS)
            .collect()
    }

    /// Find the best entry for a processed input.
    ///
    /// A missing knowledge base yields [`MatchResult::degraded`]. Ties keep
    /// the earliest entry in insertion order.
    pub fn find_best_response(
        &self,
        processed: &ProcessedInput,
        kb: Option<&KnowledgeBase>,
    ) -> MatchResult {
        let Some(kb) = kb else {
            warn!("No knowledge base available, returning degraded match");
            return MatchResult::degraded();
        };

        let mut best_key: Option<&str> = None;
        let mut best_score: f32 = 0.0;

        for entry in kb.iter().filter(|entry| entry.is_usable()) {
            let score = self.score_entry(processed, entry);
            if score > best_score {
                best_score = score;
                best_key = Some(&entry.key);
            }
        }

        let result = MatchResult {
            matched_key: best_key.map(str::to_string),
            confidence: best_score,
            fallback_suggestions: self.fallback_suggestions(processed, kb),
        };

        debug!(
            matched = ?result.matched_key,
            confidence = result.confidence,
            suggestions = result.fallback_suggestions.len(),
            "Matched against {} entries",
            kb.len()
        );

        result
    }
}
