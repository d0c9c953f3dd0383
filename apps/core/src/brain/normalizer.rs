//! Text normalization.
//!
//! Every downstream component (classifier, extractor, scorer) works on the
//! output of [`normalize`]. Punctuation is kept there on purpose: a trailing
//! `?` is a question-structure signal. Stripping punctuation and filler words
//! are separate steps used for key lookups.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Filler words removed by [`strip_filler_words`]
const FILLER_WORDS: &[&str] = &[
    "then", "about", "can", "you", "tell", "me", "please", "could", "would", "just", "really",
];

/// Characters removed by [`strip_punctuation`]
const PUNCTUATION: &[char] = &['?', '.', ',', '!', ';', ':', '"', '(', ')'];

static FILLER_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| FILLER_WORDS.iter().copied().collect());

/// Lowercase, trim and collapse internal whitespace to single spaces.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove sentence punctuation and re-collapse whitespace.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop filler words token by token, keeping the order of what remains.
pub fn strip_filler_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| !FILLER_SET.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace tokens of an already-normalized string
pub fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(normalize("  Hello WORLD  "), normalize("hello world"));
        assert_eq!(normalize("What   is\ta  Loop?"), "what is a loop?");
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["  Hello WORLD  ", "What's a CLASS?", "", "   ", "a\n\nb"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("what is a variable?"), "what is a variable");
        assert_eq!(strip_punctuation("loops, arrays!"), "loops arrays");
        // apostrophes are part of words like "what's"
        assert_eq!(strip_punctuation("what's this?"), "what's this");
    }

    #[test]
    fn test_strip_filler_words_keeps_order() {
        assert_eq!(strip_filler_words("can you tell me about loops"), "loops");
        assert_eq!(
            strip_filler_words("then show arrays and maps"),
            "show arrays and maps"
        );
        assert_eq!(strip_filler_words("tell me"), "");
    }
}
