//! Static lexicon tables.
//!
//! All tables are ordered: declaration order drives classifier tie-breaks,
//! concept extraction order and fallback topic selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::intent::QueryType;

/// Semantic grouping of domain concepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptCategory {
    Basics,
    Oop,
    Control,
    Collections,
    Exceptions,
    Advanced,
}

impl ConceptCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ConceptCategory::Basics => "basics",
            ConceptCategory::Oop => "oop",
            ConceptCategory::Control => "control",
            ConceptCategory::Collections => "collections",
            ConceptCategory::Exceptions => "exceptions",
            ConceptCategory::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ConceptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the user is trying to do with the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextTag {
    Learning,
    Implementation,
    Troubleshooting,
    BestPractice,
    /// Assigned when no other tag matched
    General,
}

impl ContextTag {
    /// Label searched for in answer text by the matcher
    pub fn label(&self) -> &'static str {
        match self {
            ContextTag::Learning => "learning",
            ContextTag::Implementation => "implementation",
            ContextTag::Troubleshooting => "troubleshooting",
            ContextTag::BestPractice => "best practice",
            ContextTag::General => "general",
        }
    }
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the query-type rule table
pub struct QueryRule {
    pub query_type: QueryType,
    /// Multi-word phrasings, worth 2 points each
    pub variations: &'static [&'static str],
    /// Single keywords, worth 1 point each
    pub keywords: &'static [&'static str],
}

pub const QUERY_RULES: &[QueryRule] = &[
    QueryRule {
        query_type: QueryType::Definition,
        variations: &["what is", "what's", "what are", "define", "meaning of", "explain"],
        keywords: &["definition", "mean", "concept"],
    },
    QueryRule {
        query_type: QueryType::HowTo,
        variations: &["how to", "how do", "how can", "steps to", "way to"],
        keywords: &["create", "use", "make", "implement", "write"],
    },
    QueryRule {
        query_type: QueryType::Comparison,
        variations: &["difference between", "compared to", "versus", " vs "],
        keywords: &["compare", "better", "differ"],
    },
    QueryRule {
        query_type: QueryType::Example,
        variations: &["example of", "show me", "give me an example", "sample code"],
        keywords: &["example", "demo", "snippet", "sample"],
    },
];

pub const CONCEPTS: &[(ConceptCategory, &[&str])] = &[
    (
        ConceptCategory::Basics,
        &[
            "variable", "data type", "string", "int", "boolean", "array", "operator", "print",
            "comment", "method",
        ],
    ),
    (
        ConceptCategory::Oop,
        &[
            "class",
            "object",
            "method",
            "inheritance",
            "polymorphism",
            "encapsulation",
            "interface",
            "abstract",
            "constructor",
        ],
    ),
    (
        ConceptCategory::Control,
        &["if statement", "loop", "switch", "break", "continue", "condition"],
    ),
    (
        ConceptCategory::Collections,
        &["arraylist", "hashmap", "list", "map", "set", "collection"],
    ),
    (
        ConceptCategory::Exceptions,
        &["exception", "try", "catch", "throw", "error"],
    ),
    (
        ConceptCategory::Advanced,
        &["generic", "thread", "stream", "lambda", "annotation"],
    ),
];

pub const CONTEXT_KEYWORDS: &[(ContextTag, &[&str])] = &[
    (
        ContextTag::Learning,
        &["learn", "understand", "beginner", "study", "basics", "tutorial"],
    ),
    (
        ContextTag::Implementation,
        &["implement", "build", "write", "code", "create"],
    ),
    (
        ContextTag::Troubleshooting,
        &["error", "fix", "bug", "problem", "issue", "not working"],
    ),
    (
        ContextTag::BestPractice,
        &["best practice", "should i", "recommended", "convention", "good way"],
    ),
];

/// Java-specific terms for the confidence scorer's domain signal
pub const DOMAIN_TERMS: &[&str] = &[
    "java", "class", "method", "object", "interface", "public", "private", "static", "void",
    "string",
];

/// A knowledge-base key offered as a topic suggestion
pub struct Topic {
    pub key: &'static str,
    pub label: &'static str,
}

/// Difficulty tier used by the categorized fallback
pub struct TopicTier {
    pub heading: &'static str,
    /// Shown when none of the tier's topics exist in the knowledge base
    pub default_label: &'static str,
    pub topics: &'static [Topic],
}

pub const FALLBACK_TIERS: &[TopicTier] = &[
    TopicTier {
        heading: "Basic concept",
        default_label: "basic Java concepts",
        topics: &[
            Topic { key: "what is a variable?", label: "variables" },
            Topic { key: "how do i print in java?", label: "printing" },
            Topic { key: "what is a method?", label: "methods" },
        ],
    },
    TopicTier {
        heading: "Intermediate concept",
        default_label: "intermediate Java topics",
        topics: &[
            Topic { key: "what is a class?", label: "classes" },
            Topic { key: "what is an object?", label: "objects" },
            Topic { key: "what is a loop?", label: "loops" },
        ],
    },
    TopicTier {
        heading: "Advanced concept",
        default_label: "advanced Java features",
        topics: &[Topic { key: "what is an if statement?", label: "control flow" }],
    },
];

/// Topics offered as buttons when a session starts
pub const STARTER_TOPICS: &[Topic] = &[
    Topic { key: "what is a method?", label: "Methods" },
    Topic { key: "what is a variable?", label: "Variables" },
    Topic { key: "what is a class?", label: "Classes" },
    Topic { key: "what is object oriented programming?", label: "OOP" },
];

/// Phrase variations registered for a query type (empty for `Unknown`)
pub fn variations_for(query_type: QueryType) -> &'static [&'static str] {
    QUERY_RULES
        .iter()
        .find(|rule| rule.query_type == query_type)
        .map(|rule| rule.variations)
        .unwrap_or(&[])
}

/// Concept terms declared under a category
pub fn concepts_in(category: ConceptCategory) -> &'static [&'static str] {
    CONCEPTS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, terms)| *terms)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_order() {
        let order: Vec<QueryType> = QUERY_RULES.iter().map(|r| r.query_type).collect();
        assert_eq!(
            order,
            vec![
                QueryType::Definition,
                QueryType::HowTo,
                QueryType::Comparison,
                QueryType::Example
            ]
        );
    }

    #[test]
    fn test_unknown_has_no_variations() {
        assert!(variations_for(QueryType::Unknown).is_empty());
        assert!(variations_for(QueryType::Definition).contains(&"what is"));
    }

    #[test]
    fn test_method_listed_in_two_categories() {
        assert!(concepts_in(ConceptCategory::Basics).contains(&"method"));
        assert!(concepts_in(ConceptCategory::Oop).contains(&"method"));
    }
}
