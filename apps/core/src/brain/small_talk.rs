//! Small-talk detection (greetings, thanks, goodbyes).
//!
//! Checked before the knowledge base is consulted. Patterns use word
//! boundaries so that "hi" does not fire inside "this".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Conversational (non-question) intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmallTalk {
    Greeting,
    Gratitude,
    Farewell,
}

impl SmallTalk {
    /// Canned reply for this kind of small talk
    pub fn reply(&self) -> &'static str {
        match self {
            SmallTalk::Greeting => "Hello! How can I help you learn Java today?",
            SmallTalk::Gratitude => "You're welcome! Anything else you'd like to know about Java?",
            SmallTalk::Farewell => "Goodbye! Come back any time you have a Java question.",
        }
    }
}

// NOTE: expect() is acceptable here: the patterns are constants and covered by tests
static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(hi|hello|hey|greetings|good morning|good afternoon|good evening)\b")
        .expect("Invalid regex: greetings")
});

static GRATITUDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(thanks|thank you|thx|appreciate it)\b").expect("Invalid regex: gratitude")
});

static FAREWELL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(bye|goodbye|see you|cya)\b").expect("Invalid regex: farewells")
});

/// Longest input (in words) still treated as small talk.
///
/// "hi, what is a class?" is a question, not a greeting.
const MAX_SMALL_TALK_WORDS: usize = 4;

/// Detect small talk in a normalized input
pub fn detect(normalized: &str) -> Option<SmallTalk> {
    if normalized.split_whitespace().count() > MAX_SMALL_TALK_WORDS {
        return None;
    }

    if GREETING_PATTERN.is_match(normalized) {
        Some(SmallTalk::Greeting)
    } else if GRATITUDE_PATTERN.is_match(normalized) {
        Some(SmallTalk::Gratitude)
    } else if FAREWELL_PATTERN.is_match(normalized) {
        Some(SmallTalk::Farewell)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings() {
        assert_eq!(detect("hello"), Some(SmallTalk::Greeting));
        assert_eq!(detect("hi there"), Some(SmallTalk::Greeting));
        assert_eq!(detect("good morning!"), Some(SmallTalk::Greeting));
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(detect("this"), None);
        assert_eq!(detect("highlight"), None);
    }

    #[test]
    fn test_gratitude_and_farewell() {
        assert_eq!(detect("thanks a lot"), Some(SmallTalk::Gratitude));
        assert_eq!(detect("ok bye"), Some(SmallTalk::Farewell));
    }

    #[test]
    fn test_questions_are_not_small_talk() {
        assert_eq!(detect("hi, what is a class in java?"), None);
        assert_eq!(detect("what is a variable"), None);
    }
}
