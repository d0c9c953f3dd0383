//! # Engine
//!
//! Async front of the matching engine. A single actor owns the knowledge
//! base, loads it in the background and serializes every request through
//! its mailbox; callers talk to it through a cloneable [`EngineHandle`].

pub mod actor;
pub mod loader;
pub mod messages;

pub use actor::EngineHandle;
pub use loader::{FileKnowledgeLoader, KnowledgeLoader, StaticKnowledgeLoader};
pub use messages::{EngineMessage, KnowledgeStatus};
