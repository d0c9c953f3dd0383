use std::io;
use thiserror::Error;

/// Errors of the JavaBuddy core.
///
/// Resolution itself never surfaces these to the user; they come from
/// loading, configuration and the engine channel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (e.g., reading `responses.json`).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., a knowledge base that is not a key→entry mapping).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unparsable environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// An invariant of the matching pipeline was broken.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The engine did not answer within the configured request timeout.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Represents failures talking to the engine actor (closed channel, dropped responder).
    #[error("Engine error: {0}")]
    Engine(String),

    /// The knowledge base has not finished loading yet.
    #[error("Knowledge base is not ready")]
    KnowledgeNotReady,
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
            AppError::Engine(s) => AppError::Engine(s.clone()),
            AppError::KnowledgeNotReady => AppError::KnowledgeNotReady,
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("engine request: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("invalid JSON: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("invalid configuration: {}", err))
    }
}
