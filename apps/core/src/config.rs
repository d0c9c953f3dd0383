//! Engine configuration.
//!
//! Read from `JAVABUDDY_*` environment variables (a `.env` file is loaded
//! first if present) and validated before use.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::fallback::TopicPick;

const ENV_RESPONSES_PATH: &str = "JAVABUDDY_RESPONSES_PATH";
const ENV_REQUEST_TIMEOUT_MS: &str = "JAVABUDDY_REQUEST_TIMEOUT_MS";
const ENV_CHANNEL_CAPACITY: &str = "JAVABUDDY_CHANNEL_CAPACITY";
const ENV_ANALYSIS_CACHE_SIZE: &str = "JAVABUDDY_ANALYSIS_CACHE_SIZE";
const ENV_TOPIC_PICK: &str = "JAVABUDDY_TOPIC_PICK";
const ENV_SIMULATE_TYPING: &str = "JAVABUDDY_SIMULATE_TYPING";
const ENV_LOG_FORMAT: &str = "JAVABUDDY_LOG_FORMAT";

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// Bunyan-style JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown log format '{}'", other))),
        }
    }
}

/// Runtime configuration of the chat engine
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Path of the `responses.json` knowledge base
    #[validate(length(min = 1))]
    pub responses_path: String,
    /// How long a caller waits for the engine to answer
    #[validate(range(min = 1, max = 60000))]
    pub request_timeout_ms: u64,
    /// Engine mailbox size
    #[validate(range(min = 1))]
    pub channel_capacity: usize,
    /// Number of memoized input analyses
    #[validate(range(min = 1))]
    pub analysis_cache_size: usize,
    /// How categorized fallback topics are picked
    pub topic_pick: TopicPick,
    /// Pause before printing replies, like the web widget's typing indicator
    pub simulate_typing: bool,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            responses_path: "responses.json".to_string(),
            request_timeout_ms: 5000,
            channel_capacity: 32,
            analysis_cache_size: 128,
            topic_pick: TopicPick::First,
            simulate_typing: false,
            log_format: LogFormat::Pretty,
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

fn parse_bool(name: &str) -> Result<Option<bool>, AppError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            other => Err(AppError::Config(format!("{}: not a boolean '{}'", name, other))),
        },
        Err(_) => Ok(None),
    }
}

impl EngineConfig {
    /// Build from the environment on top of the defaults, then validate
    pub fn from_env() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }

        let mut config = Self::default();

        if let Ok(path) = env::var(ENV_RESPONSES_PATH) {
            config.responses_path = path;
        }
        if let Some(timeout) = parse_var(ENV_REQUEST_TIMEOUT_MS)? {
            config.request_timeout_ms = timeout;
        }
        if let Some(capacity) = parse_var(ENV_CHANNEL_CAPACITY)? {
            config.channel_capacity = capacity;
        }
        if let Some(size) = parse_var(ENV_ANALYSIS_CACHE_SIZE)? {
            config.analysis_cache_size = size;
        }
        if let Ok(pick) = env::var(ENV_TOPIC_PICK) {
            config.topic_pick = match pick.trim().to_lowercase().as_str() {
                "first" => TopicPick::First,
                "random" => TopicPick::Random,
                other => {
                    return Err(AppError::Config(format!(
                        "{}: unknown topic pick '{}'",
                        ENV_TOPIC_PICK, other
                    )))
                }
            };
        }
        if let Some(simulate) = parse_bool(ENV_SIMULATE_TYPING)? {
            config.simulate_typing = simulate;
        }
        if let Some(format) = parse_var::<LogFormat>(ENV_LOG_FORMAT)? {
            config.log_format = format;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn responses_path(&self) -> PathBuf {
        PathBuf::from(&self.responses_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
