//! Input Analyzer - Main orchestrator for the brain module.
//!
//! Runs normalization, query-type classification, concept extraction,
//! context detection and confidence scoring, producing a [`ProcessedInput`].

use chrono::Utc;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::debug;

use super::concepts::ConceptExtractor;
use super::confidence::ConfidenceScorer;
use super::intent::QueryTypeClassifier;
use super::lexicon::{ContextTag, CONTEXT_KEYWORDS};
use super::normalizer::normalize;
use super::processed_input::ProcessedInput;

/// Main analyzer that orchestrates all analysis components
#[derive(Debug, Default, Clone, Copy)]
pub struct InputAnalyzer {
    classifier: QueryTypeClassifier,
    extractor: ConceptExtractor,
    scorer: ConfidenceScorer,
}

impl InputAnalyzer {
    /// Create a new analyzer with the static lexicon
    pub fn new() -> Self {
        Self {
            classifier: QueryTypeClassifier::new(),
            extractor: ConceptExtractor::new(),
            scorer: ConfidenceScorer::new(),
        }
    }

    /// Detect context tags by keyword containment
    fn detect_contexts(&self, normalized: &str) -> BTreeSet<ContextTag> {
        let mut contexts: BTreeSet<ContextTag> = CONTEXT_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
            .map(|(tag, _)| *tag)
            .collect();

        if contexts.is_empty() {
            contexts.insert(ContextTag::General);
        }

        contexts
    }

    /// Analyze raw user text
    pub fn analyze(&self, raw: &str) -> ProcessedInput {
        self.analyze_normalized(normalize(raw))
    }

    /// Analyze text that has already gone through [`normalize`]
    pub fn analyze_normalized(&self, normalized: String) -> ProcessedInput {
        let start = Instant::now();

        let query = self.classifier.classify(&normalized);
        let concepts = self.extractor.extract(&normalized);
        let contexts = self.detect_contexts(&normalized);
        let confidence = self.scorer.score(&normalized);

        let mut processed = ProcessedInput::new(normalized);
        processed.query_type = query.query_type;
        processed.concepts = concepts;
        processed.contexts = contexts;
        processed.confidence = confidence;
        processed.processing_time_us = start.elapsed().as_micros() as u64;
        processed.timestamp = Utc::now();

        debug!(
            fast_path = query.fast_path,
            patterns = ?query.matched_patterns,
            "Analyzed input: {}",
            processed.summary()
        );

        processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::intent::QueryType;

    #[test]
    fn test_basic_analysis() {
        let analyzer = InputAnalyzer::new();

        let processed = analyzer.analyze("  What is a VARIABLE?  ");
        assert_eq!(processed.normalized, "what is a variable?");
        assert_eq!(processed.query_type, QueryType::Definition);
        assert_eq!(processed.concepts.len(), 1);
        assert!(processed.confidence > 0.0);
    }

    #[test]
    fn test_context_detection() {
        let analyzer = InputAnalyzer::new();

        let processed = analyzer.analyze("how do i fix this exception");
        assert!(processed.contexts.contains(&ContextTag::Troubleshooting));
        assert!(!processed.contexts.contains(&ContextTag::General));

        let processed = analyzer.analyze("I want to learn and implement loops");
        assert!(processed.contexts.contains(&ContextTag::Learning));
        assert!(processed.contexts.contains(&ContextTag::Implementation));
    }

    #[test]
    fn test_general_when_no_context() {
        let analyzer = InputAnalyzer::new();

        let processed = analyzer.analyze("what is a variable");
        assert_eq!(processed.contexts, BTreeSet::from([ContextTag::General]));
    }

    #[test]
    fn test_empty_input() {
        let analyzer = InputAnalyzer::new();

        let processed = analyzer.analyze("   ");
        assert_eq!(processed.normalized, "");
        assert!(processed.is_unrecognized());
        assert_eq!(processed.confidence, 0.0);
    }
}
