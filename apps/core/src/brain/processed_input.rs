//! Processed Input - Output structure of input analysis.
//!
//! Derived fresh for every utterance and consumed by the matcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::concepts::ConceptMatch;
use super::intent::QueryType;
use super::lexicon::{ConceptCategory, ContextTag};

/// Everything the matcher needs to know about one user utterance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedInput {
    /// Normalized form of the user input
    pub normalized: String,

    /// Classified query type
    pub query_type: QueryType,

    /// Lexicon concepts found in the input
    pub concepts: Vec<ConceptMatch>,

    /// Context tags; `General` alone when nothing else matched
    pub contexts: BTreeSet<ContextTag>,

    /// Input confidence (0.0 - 1.0)
    pub confidence: f32,

    /// Processing time in microseconds
    pub processing_time_us: u64,

    /// Timestamp of analysis
    pub timestamp: DateTime<Utc>,
}

impl ProcessedInput {
    /// Create an empty processed input for a normalized string
    pub fn new(normalized: String) -> Self {
        Self {
            normalized,
            query_type: QueryType::Unknown,
            concepts: vec![],
            contexts: BTreeSet::from([ContextTag::General]),
            confidence: 0.0,
            processing_time_us: 0,
            timestamp: Utc::now(),
        }
    }

    /// Distinct categories of the extracted concepts, in extraction order
    pub fn categories(&self) -> Vec<ConceptCategory> {
        let mut categories = Vec::new();
        for concept in &self.concepts {
            if !categories.contains(&concept.category) {
                categories.push(concept.category);
            }
        }
        categories
    }

    /// Whether nothing usable was recognized
    pub fn is_unrecognized(&self) -> bool {
        self.concepts.is_empty() && self.query_type == QueryType::Unknown
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        let concepts: Vec<&str> = self.concepts.iter().map(|c| c.concept.as_str()).collect();
        let contexts: Vec<&str> = self.contexts.iter().map(|c| c.label()).collect();
        format!(
            "Type: {}, Concepts: [{}], Contexts: [{}], Confidence: {:.2}",
            self.query_type,
            concepts.join(", "),
            contexts.join(", "),
            self.confidence
        )
    }
}
