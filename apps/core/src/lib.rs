// JavaBuddy core
// Rule-based Java tutoring chatbot: input analysis, knowledge matching and fallbacks

pub mod brain;
pub mod config;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod knowledge;
pub mod logging;
pub mod matcher;
pub mod mood;
pub mod render;
pub mod responder;

pub use config::EngineConfig;
pub use engine::EngineHandle;
pub use error::AppError;
pub use knowledge::{KnowledgeBase, KnowledgeDelta, KnowledgeEntry};
pub use responder::{resolve, BotResponse, Resolution, ResolutionPath, Responder};

#[cfg(test)]
mod tests;
