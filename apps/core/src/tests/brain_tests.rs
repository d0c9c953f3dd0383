//! Brain Module Tests
//!
//! Query-type classification, concept extraction, confidence scoring and
//! the analyzer orchestrator.

use crate::brain::{
    normalize, ConceptCategory, ConceptExtractor, ConfidenceScorer, ContextTag, InputAnalyzer,
    QueryType, QueryTypeClassifier,
};

#[cfg(test)]
mod normalizer_tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(normalize("  Hello WORLD  "), normalize("hello world"));
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = ["  What IS a   Variable? ", "HashMap\tvs\nTreeMap", "", "   "];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "Not idempotent for {:?}", input);
        }
    }
}

#[cfg(test)]
mod query_type_tests {
    use super::*;

    #[test]
    fn test_fast_path_prefixes() {
        let classifier = QueryTypeClassifier::new();

        let cases = [
            ("what is a class", QueryType::Definition),
            ("what's an interface", QueryType::Definition),
            ("how to sort a list", QueryType::HowTo),
            ("how do i read a file", QueryType::HowTo),
        ];
        for (input, expected) in cases {
            let result = classifier.classify(input);
            assert_eq!(result.query_type, expected, "Wrong type for '{}'", input);
            assert!(result.fast_path);
        }
    }

    #[test]
    fn test_scored_types() {
        let classifier = QueryTypeClassifier::new();

        let result = classifier.classify("difference between int and integer");
        assert_eq!(result.query_type, QueryType::Comparison);
        assert!(!result.fast_path);

        let result = classifier.classify("show me an example of a loop");
        assert_eq!(result.query_type, QueryType::Example);
        assert!(result.matched_patterns.contains(&"example of".to_string()));
    }

    #[test]
    fn test_unknown_without_evidence() {
        let result = QueryTypeClassifier::new().classify("tell me about bananas");
        assert_eq!(result.query_type, QueryType::Unknown);
        assert!(result.scores.iter().all(|(_, score)| *score == 0));
    }
}

#[cfg(test)]
mod concept_tests {
    use super::*;

    #[test]
    fn test_shared_term_reported_per_category() {
        let found = ConceptExtractor::new().extract("what is a method");
        let categories: Vec<ConceptCategory> = found.iter().map(|c| c.category).collect();

        assert_eq!(categories, vec![ConceptCategory::Basics, ConceptCategory::Oop]);
        assert!(found.iter().all(|c| c.concept == "method"));
    }

    #[test]
    fn test_multi_word_concept() {
        let found = ConceptExtractor::new().extract("when do i need an if statement here");
        let concept = found
            .iter()
            .find(|c| c.concept == "if statement")
            .expect("if statement should be extracted");

        assert_eq!(concept.category, ConceptCategory::Control);
        assert!(concept.context_window.contains(&"if".to_string()));
    }

    #[test]
    fn test_no_concepts() {
        assert!(ConceptExtractor::new().extract("tell me about bananas").is_empty());
    }
}

#[cfg(test)]
mod confidence_tests {
    use super::*;

    #[test]
    fn test_monotonic_in_evidence() {
        let scorer = ConfidenceScorer::new();

        // each step adds one kind of evidence
        let steps = ["bananas", "what is bananas", "what is a java class"];
        let scores: Vec<f32> = steps.iter().map(|s| scorer.score(s)).collect();

        for pair in scores.windows(2) {
            assert!(pair[1] >= pair[0], "Confidence dropped: {:?}", scores);
        }
        assert!((scores[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_noisy_input_not_clean() {
        let signals = ConfidenceScorer::new().analyze("see http://example.com for java");
        assert!(signals.domain_terms);
        assert!(!signals.clean_context);
    }
}

#[cfg(test)]
mod analyzer_tests {
    use super::*;

    #[test]
    fn test_general_context_by_default() {
        let processed = InputAnalyzer::new().analyze("What is a loop?");

        assert_eq!(processed.normalized, "what is a loop?");
        assert_eq!(processed.query_type, QueryType::Definition);
        assert_eq!(processed.contexts.iter().copied().collect::<Vec<_>>(), vec![ContextTag::General]);
    }

    #[test]
    fn test_troubleshooting_context() {
        let processed = InputAnalyzer::new().analyze("how do i fix this error");

        assert!(processed.contexts.contains(&ContextTag::Troubleshooting));
        assert!(!processed.contexts.contains(&ContextTag::General));
        assert!(processed.categories().contains(&ConceptCategory::Exceptions));
    }

    #[test]
    fn test_summary_mentions_type() {
        let processed = InputAnalyzer::new().analyze("what is a variable");
        assert!(processed.summary().contains("definition"));
        assert!(!processed.is_unrecognized());
    }
}
