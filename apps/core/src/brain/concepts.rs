//! Domain concept extraction.
//!
//! Walks the lexicon in declaration order and records every concept whose
//! term is contained in the input, together with a small window of
//! surrounding tokens.

use serde::{Deserialize, Serialize};

use super::lexicon::{ConceptCategory, CONCEPTS};
use super::normalizer::tokens;

/// Tokens kept on each side of the concept in `context_window`
pub const CONTEXT_RADIUS: usize = 3;

/// A lexicon concept found in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMatch {
    pub category: ConceptCategory,
    pub concept: String,
    /// Up to three tokens before and after the token holding the concept
    pub context_window: Vec<String>,
}

/// Concept extractor over the static lexicon
#[derive(Debug, Default, Clone, Copy)]
pub struct ConceptExtractor;

impl ConceptExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all concepts contained in a normalized input.
    ///
    /// Results follow category order, then concept order. A term declared
    /// under two categories is reported once per category.
    pub fn extract(&self, normalized: &str) -> Vec<ConceptMatch> {
        let words = tokens(normalized);
        let mut found = Vec::new();

        for (category, terms) in CONCEPTS {
            for term in terms.iter() {
                if !normalized.contains(term) {
                    continue;
                }
                found.push(ConceptMatch {
                    category: *category,
                    concept: term.to_string(),
                    context_window: context_window(&words, term),
                });
            }
        }

        found
    }
}

/// Slice of tokens around the first token containing `term`.
///
/// Multi-word terms are anchored on their first word.
fn context_window(words: &[&str], term: &str) -> Vec<String> {
    let anchor = term.split_whitespace().next().unwrap_or(term);
    let Some(position) = words.iter().position(|w| w.contains(anchor)) else {
        return vec![];
    };

    let start = position.saturating_sub(CONTEXT_RADIUS);
    let end = (position + CONTEXT_RADIUS + 1).min(words.len());

    words[start..end].iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_concept() {
        let extractor = ConceptExtractor::new();

        let found = extractor.extract("what is a variable");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, ConceptCategory::Basics);
        assert_eq!(found[0].concept, "variable");
        assert_eq!(found[0].context_window, vec!["what", "is", "a", "variable"]);
    }

    #[test]
    fn test_context_window_clamped() {
        let extractor = ConceptExtractor::new();

        let found = extractor.extract("one two three four loop five six seven eight");
        let loop_match = found.iter().find(|m| m.concept == "loop").unwrap();
        assert_eq!(
            loop_match.context_window,
            vec!["two", "three", "four", "loop", "five", "six", "seven"]
        );
    }

    #[test]
    fn test_concept_in_multiple_categories() {
        let extractor = ConceptExtractor::new();

        let found = extractor.extract("how do i call a method");
        let categories: Vec<ConceptCategory> = found
            .iter()
            .filter(|m| m.concept == "method")
            .map(|m| m.category)
            .collect();
        assert_eq!(categories, vec![ConceptCategory::Basics, ConceptCategory::Oop]);
    }

    #[test]
    fn test_declaration_order() {
        let extractor = ConceptExtractor::new();

        let found = extractor.extract("loop over a string array");
        let concepts: Vec<&str> = found.iter().map(|m| m.concept.as_str()).collect();
        assert_eq!(concepts, vec!["string", "array", "loop"]);
    }

    #[test]
    fn test_substring_matches_inside_words() {
        let extractor = ConceptExtractor::new();

        // "class" is found inside "classroom"
        let found = extractor.extract("my classroom");
        assert!(found.iter().any(|m| m.concept == "class"));
    }

    #[test]
    fn test_no_concepts() {
        let extractor = ConceptExtractor::new();
        assert!(extractor.extract("tell me about bananas").is_empty());
    }
}
