//! Fallback responses for inputs without a confident match.
//!
//! Two shapes: a bulleted list of related knowledge-base keys when the
//! matcher produced suggestions, otherwise a categorized
//! basics / intermediate / advanced topic offer.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::brain::lexicon::{Topic, FALLBACK_TIERS};
use crate::knowledge::KnowledgeBase;
use crate::matcher::MatchResult;
use crate::responder::BotResponse;

const APOLOGY: &str =
    "Sorry, something went wrong while I was looking that up. Could you try asking again?";

const NOT_READY: &str =
    "I'm still loading my Java notes. Give me a moment and ask again!";

/// How a topic is picked from each tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicPick {
    /// First topic of the tier present in the knowledge base (reproducible)
    #[default]
    First,
    /// Any topic of the tier present in the knowledge base
    Random,
}

/// Builds non-answer responses
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackGenerator {
    pick: TopicPick,
}

impl FallbackGenerator {
    pub fn new(pick: TopicPick) -> Self {
        Self { pick }
    }

    fn choose<'a>(&self, available: &[&'a Topic]) -> Option<&'a Topic> {
        match self.pick {
            TopicPick::First => available.first().copied(),
            TopicPick::Random => available.choose(&mut rand::thread_rng()).copied(),
        }
    }

    /// "Would you like to learn about ..." with one topic per tier
    pub fn categorized(&self, kb: Option<&KnowledgeBase>) -> BotResponse {
        let mut answer = String::from("I'm not sure about that. Would you like to learn about:\n");

        for tier in FALLBACK_TIERS {
            let available: Vec<&Topic> = tier
                .topics
                .iter()
                .filter(|topic| kb.is_some_and(|kb| kb.contains_key(topic.key)))
                .collect();
            let label = self
                .choose(&available)
                .map(|topic| topic.label)
                .unwrap_or(tier.default_label);
            answer.push_str(&format!("• {}: {}\n", tier.heading, label));
        }

        answer.push_str("\nOr you can ask me about any Java topic!");
        BotResponse::text(answer)
    }

    /// Bulleted list of related questions
    pub fn listed(&self, suggestions: &[String]) -> BotResponse {
        let mut answer =
            String::from("I'm not sure I understood that exactly. Here are some related topics:\n");
        for suggestion in suggestions.iter().filter(|s| !s.is_empty()) {
            answer.push_str(&format!("• {}\n", suggestion));
        }
        answer.push_str("\nTry asking about one of these!");
        BotResponse::text(answer)
    }

    /// Pick the fallback shape for a non-confident match
    pub fn generate(&self, result: &MatchResult, kb: Option<&KnowledgeBase>) -> BotResponse {
        if result.fallback_suggestions.iter().any(|s| !s.is_empty()) {
            self.listed(&result.fallback_suggestions)
        } else {
            self.categorized(kb)
        }
    }

    /// Generic reply after an unexpected failure
    pub fn apology(&self) -> BotResponse {
        BotResponse::text(APOLOGY)
    }

    /// Reply while the knowledge base is still loading
    pub fn not_ready(&self) -> BotResponse {
        BotResponse::text(NOT_READY)
    }
}
