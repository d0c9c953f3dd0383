//! Terminal rendering helpers for [`BotResponse`].

use std::time::Duration;

use crate::responder::BotResponse;

const BASE_DELAY_MS: u64 = 1000;
const PER_CHAR_DELAY_MS: u64 = 5;
const MAX_DELAY_MS: u64 = 3000;

/// Simulated typing time, growing with response length
pub fn typing_delay(response: &BotResponse) -> Duration {
    let chars = response.answer.as_deref().map_or(0, |a| a.chars().count())
        + response.code.as_deref().map_or(0, |c| c.chars().count());
    let ms = BASE_DELAY_MS.saturating_add(chars as u64 * PER_CHAR_DELAY_MS);
    Duration::from_millis(ms.min(MAX_DELAY_MS))
}

/// A fenced code block split into language tag and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    pub language: String,
    pub body: String,
}

impl CodeSnippet {
    /// Parse "```java\n...\n```". Text without a fence is kept as an untagged body.
    pub fn parse(code: &str) -> Self {
        let trimmed = code.trim();
        let Some(rest) = trimmed.strip_prefix("```") else {
            return Self {
                language: String::new(),
                body: trimmed.to_string(),
            };
        };

        let (language, body) = rest.split_once('\n').unwrap_or((rest, ""));
        let body = body.trim_end().strip_suffix("```").unwrap_or(body);

        Self {
            language: language.trim().to_string(),
            body: body.trim().to_string(),
        }
    }
}

/// Turn "1. item" lines into bullets
pub fn format_answer(answer: &str) -> String {
    answer
        .lines()
        .map(|line| {
            let mut chars = line.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(d), Some('.'), Some(' ')) if d.is_ascii_digit() => {
                    format!("• {}", line[3..].trim_start())
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
