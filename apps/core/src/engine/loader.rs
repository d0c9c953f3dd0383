use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::AppError;
use crate::knowledge::KnowledgeBase;

/// Source of the knowledge base.
///
/// Abstracts where entries come from so the engine can be driven by a file
/// in production and by fixed data in tests.
#[async_trait]
pub trait KnowledgeLoader: Send + Sync + 'static {
    /// Load the whole knowledge base.
    async fn load(&self) -> Result<KnowledgeBase, AppError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Reads a `responses.json` file
#[derive(Debug, Clone)]
pub struct FileKnowledgeLoader {
    path: PathBuf,
}

impl FileKnowledgeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KnowledgeLoader for FileKnowledgeLoader {
    async fn load(&self) -> Result<KnowledgeBase, AppError> {
        KnowledgeBase::load_from_file(&self.path).await
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Serves an in-memory knowledge base
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledgeLoader {
    kb: KnowledgeBase,
}

impl StaticKnowledgeLoader {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb }
    }
}

#[async_trait]
impl KnowledgeLoader for StaticKnowledgeLoader {
    async fn load(&self) -> Result<KnowledgeBase, AppError> {
        Ok(self.kb.clone())
    }

    fn describe(&self) -> String {
        format!("{} static entries", self.kb.len())
    }
}
