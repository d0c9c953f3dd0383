//! Query-type classification.
//!
//! Rule-table driven: every row of [`QUERY_RULES`] is scored by substring
//! containment (+2 per phrase variation, +1 per keyword). Containment is not
//! word-boundary matching, so short keywords can fire inside longer words
//! ("use" inside "because"). That imprecision is accepted behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lexicon::QUERY_RULES;

/// Score for each phrase variation found in the input
pub const VARIATION_POINTS: u32 = 2;
/// Score for each keyword found in the input
pub const KEYWORD_POINTS: u32 = 1;

/// Prefixes that short-circuit scoring, checked in order
const FAST_PATHS: &[(&str, QueryType)] = &[
    ("what is", QueryType::Definition),
    ("what's", QueryType::Definition),
    ("how to", QueryType::HowTo),
    ("how do", QueryType::HowTo),
];

/// Classified intent of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// "what is a class?"
    Definition,
    /// "how do I declare an array?"
    HowTo,
    /// "difference between int and Integer"
    Comparison,
    /// "show me an example of a loop"
    Example,
    /// Nothing in the rule table matched
    Unknown,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl QueryType {
    /// Returns a human-readable label for the query type
    pub fn label(&self) -> &'static str {
        match self {
            QueryType::Definition => "definition",
            QueryType::HowTo => "how_to",
            QueryType::Comparison => "comparison",
            QueryType::Example => "example",
            QueryType::Unknown => "unknown",
        }
    }
}

/// Result of query-type classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTypeResult {
    /// Winning query type
    pub query_type: QueryType,
    /// Whether a prefix fast path decided the result
    pub fast_path: bool,
    /// Score per rule-table row, in table order (empty on the fast path)
    pub scores: Vec<(QueryType, u32)>,
    /// Variations and keywords that matched for the winner
    pub matched_patterns: Vec<String>,
}

/// Query-type classifier over the static rule table
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryTypeClassifier;

impl QueryTypeClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a normalized input
    pub fn classify(&self, normalized: &str) -> QueryTypeResult {
        for (prefix, query_type) in FAST_PATHS {
            if normalized.starts_with(prefix) {
                return QueryTypeResult {
                    query_type: *query_type,
                    fast_path: true,
                    scores: vec![],
                    matched_patterns: vec![prefix.to_string()],
                };
            }
        }

        let mut best_type = QueryType::Unknown;
        let mut best_score = 0;
        let mut matched_patterns = Vec::new();
        let mut scores = Vec::with_capacity(QUERY_RULES.len());

        for rule in QUERY_RULES {
            let mut score = 0;
            let mut rule_patterns = Vec::new();

            for variation in rule.variations {
                if normalized.contains(variation) {
                    score += VARIATION_POINTS;
                    rule_patterns.push(variation.to_string());
                }
            }
            for keyword in rule.keywords {
                if normalized.contains(keyword) {
                    score += KEYWORD_POINTS;
                    rule_patterns.push(keyword.to_string());
                }
            }

            scores.push((rule.query_type, score));

            // Strictly greater: earlier rows win ties
            if score > best_score {
                best_score = score;
                best_type = rule.query_type;
                matched_patterns = rule_patterns;
            }
        }

        QueryTypeResult {
            query_type: best_type,
            fast_path: false,
            scores,
            matched_patterns,
        }
    }

    /// Just the winning query type
    pub fn classify_query_type(&self, normalized: &str) -> QueryType {
        self.classify(normalized).query_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_path_prefixes() {
        let classifier = QueryTypeClassifier::new();

        let result = classifier.classify("what is a variable");
        assert_eq!(result.query_type, QueryType::Definition);
        assert!(result.fast_path);

        assert_eq!(classifier.classify_query_type("what's a class"), QueryType::Definition);
        assert_eq!(classifier.classify_query_type("how to write a loop"), QueryType::HowTo);
        assert_eq!(classifier.classify_query_type("how do i print"), QueryType::HowTo);
    }

    #[test]
    fn test_fast_path_beats_higher_score() {
        let classifier = QueryTypeClassifier::new();

        // Would score higher as Example, but the prefix decides first
        let result = classifier.classify("what is an example of sample code");
        assert_eq!(result.query_type, QueryType::Definition);
    }

    #[test]
    fn test_scored_comparison() {
        let classifier = QueryTypeClassifier::new();

        let result = classifier.classify("difference between int and integer");
        assert_eq!(result.query_type, QueryType::Comparison);
        assert!(!result.fast_path);
        assert!(result.matched_patterns.contains(&"difference between".to_string()));
    }

    #[test]
    fn test_tie_keeps_table_order() {
        let classifier = QueryTypeClassifier::new();

        // "define" (+2 Definition) vs "show me" (+2 Example)
        let result = classifier.classify("define and show me");
        assert_eq!(result.query_type, QueryType::Definition);
    }

    #[test]
    fn test_unknown_when_nothing_scores() {
        let classifier = QueryTypeClassifier::new();

        assert_eq!(classifier.classify_query_type("bananas are yellow"), QueryType::Unknown);
        assert_eq!(classifier.classify_query_type(""), QueryType::Unknown);
    }

    #[test]
    fn test_substring_containment_overmatches() {
        let classifier = QueryTypeClassifier::new();

        // "use" inside "because" counts as a HowTo keyword
        assert_eq!(classifier.classify_query_type("because"), QueryType::HowTo);
    }
}
