use serde::Serialize;
use tokio::sync::oneshot;

use crate::error::AppError;
use crate::knowledge::{KnowledgeBase, KnowledgeEntry};
use crate::responder::Resolution;

/// Where the engine is in its knowledge-base lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum KnowledgeStatus {
    /// No load requested yet
    NotLoaded,
    Loading,
    Ready { entries: usize },
    /// Load failed; requests are answered from fallbacks only
    Failed { reason: String },
}

impl KnowledgeStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, KnowledgeStatus::Ready { .. })
    }
}

/// Messages that can be sent to the engine actor.
#[derive(Debug)]
#[allow(clippy::large_enum_variant)]
pub enum EngineMessage {
    /// Answer one user utterance (small talk included).
    Respond {
        input: String,
        responder: oneshot::Sender<Resolution>,
    },
    /// Start loading the knowledge base if not loaded yet.
    LoadKnowledge {
        /// Completed with the entry count once loading ends; `None` to not wait.
        responder: Option<oneshot::Sender<Result<usize, AppError>>>,
    },
    /// Internal: a background load finished.
    KnowledgeLoaded {
        result: Result<KnowledgeBase, AppError>,
    },
    /// Insert an entry unless its key already exists.
    UpsertIfAbsent {
        entry: KnowledgeEntry,
        responder: oneshot::Sender<Result<bool, AppError>>,
    },
    Status {
        responder: oneshot::Sender<KnowledgeStatus>,
    },
    /// Stop the actor loop.
    Shutdown,
}
