//! # Brain Module
//!
//! Input-understanding side of JavaBuddy. Turns a raw utterance into a
//! [`ProcessedInput`] before the knowledge base is consulted.
//!
//! ## Components
//! - `normalizer`: lowercasing, punctuation and filler-word stripping
//! - `lexicon`: static concept, query-type and context tables
//! - `intent`: query-type classification over the rule table
//! - `concepts`: domain concept extraction with context windows
//! - `confidence`: input confidence scoring
//! - `small_talk`: greeting / thanks / goodbye detection
//! - `processed_input`: output data structure
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod concepts;
pub mod confidence;
pub mod intent;
pub mod lexicon;
pub mod normalizer;
pub mod processed_input;
pub mod small_talk;

pub use analyzer::InputAnalyzer;
pub use concepts::{ConceptExtractor, ConceptMatch};
pub use confidence::{ConfidenceScorer, ConfidenceSignals};
pub use intent::{QueryType, QueryTypeClassifier, QueryTypeResult};
pub use lexicon::{ConceptCategory, ContextTag};
pub use normalizer::{normalize, strip_filler_words, strip_punctuation};
pub use processed_input::ProcessedInput;
pub use small_talk::SmallTalk;
