//! Unified lookup: raw text in, [`BotResponse`] out.
//!
//! Resolution moves strictly forward through three stages and stops at the
//! first one that produces a response:
//!
//! 1. **Exact**: case-insensitive key lookup of the input, the input with a
//!    trailing `?`, the input without punctuation, then common question
//!    phrasings of the bare topic.
//! 2. **Scored**: analyze the input and accept the best entry above the
//!    match threshold.
//! 3. **Fallback**: related topics or a categorized topic offer.
//!
//! The knowledge base is never mutated here. A scored match proposes an
//! alias entry in [`Resolution::delta`]; applying it is up to the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::brain::normalizer::{normalize, strip_filler_words, strip_punctuation};
use crate::brain::{small_talk, InputAnalyzer, ProcessedInput, SmallTalk};
use crate::error::AppError;
use crate::fallback::{FallbackGenerator, TopicPick};
use crate::knowledge::{KnowledgeBase, KnowledgeDelta, KnowledgeEntry};
use crate::matcher::{MatchResult, ResponseMatcher};

/// Question templates tried against the bare topic of an input
const PHRASING_TEMPLATES: &[(&str, &str)] = &[
    ("what is ", "?"),
    ("what is a ", "?"),
    ("what is an ", "?"),
    ("what are ", "?"),
    ("how do i use ", "?"),
    ("how do i ", "?"),
];

/// The unit handed to rendering
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotResponse {
    /// `None` means "no usable answer"
    pub answer: Option<String>,
    /// Opaque fenced code block
    pub code: Option<String>,
}

impl BotResponse {
    pub fn text(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            code: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

impl From<&KnowledgeEntry> for BotResponse {
    fn from(entry: &KnowledgeEntry) -> Self {
        Self {
            answer: Some(entry.answer.clone()),
            code: entry.code.clone(),
        }
    }
}

/// Stage that produced the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    /// Greeting, thanks or goodbye (only via [`Responder::respond`])
    SmallTalk,
    Exact,
    Scored,
    Fallback,
}

/// Response plus the metadata of how it was chosen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    pub response: BotResponse,
    pub path: ResolutionPath,
    /// Knowledge-base key that supplied the answer
    pub matched_key: Option<String>,
    /// Analysis of the input (absent for exact and small-talk hits)
    pub processed: Option<ProcessedInput>,
    /// Matcher output (absent for exact and small-talk hits)
    pub match_result: Option<MatchResult>,
    /// Additive knowledge-base changes proposed to the caller
    pub delta: KnowledgeDelta,
}

impl Resolution {
    fn direct(response: BotResponse, path: ResolutionPath, matched_key: Option<String>) -> Self {
        Self {
            response,
            path,
            matched_key,
            processed: None,
            match_result: None,
            delta: KnowledgeDelta::default(),
        }
    }
}

/// Entry point of the matching engine
#[derive(Debug, Default, Clone, Copy)]
pub struct Responder {
    analyzer: InputAnalyzer,
    matcher: ResponseMatcher,
    fallback: FallbackGenerator,
}

impl Responder {
    pub fn new(pick: TopicPick) -> Self {
        Self {
            analyzer: InputAnalyzer::new(),
            matcher: ResponseMatcher::new(),
            fallback: FallbackGenerator::new(pick),
        }
    }

    /// Key-lookup candidates for the exact stage, in priority order
    fn exact_candidates(raw: &str) -> Vec<String> {
        let trimmed = raw.trim();
        let mut candidates = vec![trimmed.to_string()];
        if !trimmed.ends_with('?') {
            candidates.push(format!("{}?", trimmed));
        }

        // learned aliases are stored in this form
        let bare = strip_punctuation(&normalize(raw));
        if !bare.is_empty() && bare != trimmed {
            candidates.push(bare.clone());
        }

        let topic = strip_filler_words(&bare);
        if !topic.is_empty() {
            for (prefix, suffix) in PHRASING_TEMPLATES {
                candidates.push(format!("{}{}{}", prefix, topic, suffix));
            }
        }

        candidates
    }

    fn exact_match<'kb>(raw: &str, kb: Option<&'kb KnowledgeBase>) -> Option<&'kb KnowledgeEntry> {
        let kb = kb?;
        Self::exact_candidates(raw)
            .iter()
            .find_map(|candidate| kb.get(candidate).filter(|entry| entry.is_usable()))
    }

    /// Alias entry proposed after a scored match
    fn alias_delta(
        processed: &ProcessedInput,
        entry: &KnowledgeEntry,
        kb: &KnowledgeBase,
    ) -> KnowledgeDelta {
        let alias = strip_punctuation(&processed.normalized);
        if alias.is_empty() || kb.contains_key(&alias) {
            return KnowledgeDelta::default();
        }
        KnowledgeDelta {
            inserts: vec![KnowledgeEntry::new(alias, entry.answer.clone(), entry.code.clone())],
        }
    }

    fn try_resolve<F>(
        &self,
        raw: &str,
        kb: Option<&KnowledgeBase>,
        analyze: F,
    ) -> Result<Resolution, AppError>
    where
        F: FnOnce(String) -> ProcessedInput,
    {
        if let Some(entry) = Self::exact_match(raw, kb) {
            debug!("Exact match on '{}'", entry.key);
            return Ok(Resolution::direct(
                BotResponse::from(entry),
                ResolutionPath::Exact,
                Some(entry.key.clone()),
            ));
        }

        let processed = analyze(normalize(raw));
        let result = self.matcher.find_best_response(&processed, kb);

        if let (true, Some(key), Some(kb)) = (result.is_confident(), &result.matched_key, kb) {
            let entry = kb.get(key).ok_or_else(|| {
                AppError::Internal(format!("matched key '{}' vanished from knowledge base", key))
            })?;
            info!(
                "Scored match '{}' ({:.2}) for '{}'",
                key, result.confidence, processed.normalized
            );
            return Ok(Resolution {
                response: BotResponse::from(entry),
                path: ResolutionPath::Scored,
                matched_key: Some(entry.key.clone()),
                delta: Self::alias_delta(&processed, entry, kb),
                processed: Some(processed),
                match_result: Some(result),
            });
        }

        if processed.is_unrecognized() {
            info!("Nothing recognized in '{}', offering topics", processed.normalized);
        } else {
            info!(
                "No confident match ({:.2}) for '{}', falling back",
                result.confidence, processed.normalized
            );
        }
        Ok(Resolution {
            response: self.fallback.generate(&result, kb),
            path: ResolutionPath::Fallback,
            matched_key: None,
            processed: Some(processed),
            match_result: Some(result),
            delta: KnowledgeDelta::default(),
        })
    }

    /// Resolve with a caller-supplied analysis step (e.g. a memoized one).
    ///
    /// Never fails: internal errors become an apologetic response.
    pub fn resolve_with<F>(&self, raw: &str, kb: Option<&KnowledgeBase>, analyze: F) -> Resolution
    where
        F: FnOnce(String) -> ProcessedInput,
    {
        match self.try_resolve(raw, kb, analyze) {
            Ok(resolution) => resolution,
            Err(e) => {
                error!("Failed to resolve '{}': {}", raw, e);
                Resolution::direct(self.fallback.apology(), ResolutionPath::Fallback, None)
            }
        }
    }

    /// Resolve raw input against a knowledge base
    pub fn resolve(&self, raw: &str, kb: Option<&KnowledgeBase>) -> Resolution {
        let analyzer = self.analyzer;
        self.resolve_with(raw, kb, |normalized| analyzer.analyze_normalized(normalized))
    }

    /// Small talk first, then [`Responder::resolve_with`]
    pub fn respond_with<F>(&self, raw: &str, kb: Option<&KnowledgeBase>, analyze: F) -> Resolution
    where
        F: FnOnce(String) -> ProcessedInput,
    {
        match small_talk::detect(&normalize(raw)) {
            Some(talk) => Self::small_talk(talk),
            None => self.resolve_with(raw, kb, analyze),
        }
    }

    /// Small talk first, then [`Responder::resolve`]
    pub fn respond(&self, raw: &str, kb: Option<&KnowledgeBase>) -> Resolution {
        let analyzer = self.analyzer;
        self.respond_with(raw, kb, |normalized| analyzer.analyze_normalized(normalized))
    }

    /// Degraded resolution while the knowledge base is still loading
    pub fn not_ready(&self) -> Resolution {
        Resolution::direct(self.fallback.not_ready(), ResolutionPath::Fallback, None)
    }

    /// Resolution for a detected small-talk input
    pub fn small_talk(talk: SmallTalk) -> Resolution {
        Resolution::direct(BotResponse::text(talk.reply()), ResolutionPath::SmallTalk, None)
    }
}

/// Resolve with the default responder
pub fn resolve(raw: &str, kb: Option<&KnowledgeBase>) -> Resolution {
    Responder::default().resolve(raw, kb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::from_iter([KnowledgeEntry::new(
            "what is a variable?",
            "A variable stores a value.",
            None,
        )])
    }

    #[test]
    fn test_exact_candidates_order() {
        let candidates = Responder::exact_candidates("  Tell me about Loops ");
        assert_eq!(candidates[0], "Tell me about Loops");
        assert_eq!(candidates[1], "Tell me about Loops?");
        assert_eq!(candidates[2], "tell me about loops");
        assert!(candidates.contains(&"what are loops?".to_string()));
    }

    #[test]
    fn test_exact_match_with_question_mark_appended() {
        let resolution = resolve("What is a variable", Some(&kb()));
        assert_eq!(resolution.path, ResolutionPath::Exact);
        assert_eq!(
            resolution.response.answer.as_deref(),
            Some("A variable stores a value.")
        );
    }

    #[test]
    fn test_bare_topic_hits_phrasing_template() {
        let resolution = resolve("variable", Some(&kb()));
        assert_eq!(resolution.path, ResolutionPath::Exact);
        assert_eq!(resolution.matched_key.as_deref(), Some("what is a variable?"));
    }

    #[test]
    fn test_small_talk_before_lookup() {
        let resolution = Responder::default().respond("Hello!", Some(&kb()));
        assert_eq!(resolution.path, ResolutionPath::SmallTalk);
        assert!(resolution.response.is_answered());
    }

    #[test]
    fn test_resolve_with_custom_analysis() {
        let responder = Responder::default();

        // A blank analysis has nothing to score, so the categorized offer is used
        let resolution = responder.resolve_with("what is a loop", Some(&kb()), |normalized| {
            ProcessedInput::new(normalized)
        });
        assert_eq!(resolution.path, ResolutionPath::Fallback);
        assert!(resolution
            .response
            .answer
            .unwrap()
            .contains("Would you like to learn about"));
    }

    #[test]
    fn test_scored_match_proposes_alias() {
        let kb = KnowledgeBase::from_iter([KnowledgeEntry::new(
            "how do i declare a variable in java?",
            "Write the variable type, then its name.",
            None,
        )]);

        let resolution = resolve("declaring a variable, quickly", Some(&kb));
        assert_eq!(resolution.path, ResolutionPath::Scored);
        assert_eq!(resolution.delta.inserts.len(), 1);
        assert_eq!(resolution.delta.inserts[0].key, "declaring a variable quickly");
        // the core never writes to the knowledge base itself
        assert_eq!(kb.len(), 1);
    }
}
