//! Knowledge base: the static question → answer mapping.
//!
//! Entries keep their stored key verbatim; case folding happens only at
//! lookup time. Loading keeps every entry of the file, even keys that differ
//! only in case; lookups resolve to the first of those. Iteration follows
//! insertion order, which the matcher relies on for reproducible tie-breaks.
//! The only runtime mutation is additive ([`KnowledgeBase::upsert_if_absent`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::AppError;

/// One canned question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Free-text question, stored as loaded
    pub key: String,
    pub answer: String,
    /// Fenced code block ("```java\n...```"), opaque to the engine
    pub code: Option<String>,
}

impl KnowledgeEntry {
    pub fn new(key: impl Into<String>, answer: impl Into<String>, code: Option<String>) -> Self {
        Self {
            key: key.into(),
            answer: answer.into(),
            code,
        }
    }

    /// Entries with an empty key or answer are never matched
    pub fn is_usable(&self) -> bool {
        !self.key.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// Value side of `responses.json`
#[derive(Debug, Deserialize)]
struct RawEntry {
    answer: String,
    #[serde(default)]
    code: Option<String>,
}

/// Entries proposed by a resolution, applied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDelta {
    pub inserts: Vec<KnowledgeEntry>,
}

impl KnowledgeDelta {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
    }
}

/// Insertion-ordered, case-insensitively indexed knowledge base
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    /// Lowercased key → position in `entries` (first insertion wins)
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &KnowledgeEntry> {
        self.entries.iter()
    }

    /// Case-insensitive lookup
    pub fn get(&self, key: &str) -> Option<&KnowledgeEntry> {
        self.index
            .get(&key.to_lowercase())
            .and_then(|&position| self.entries.get(position))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(&key.to_lowercase())
    }

    /// Insert an entry unless its key is already present (case-insensitively).
    ///
    /// Returns `true` if the entry was inserted. Inserting the same key twice
    /// is a no-op the second time; existing entries are never overwritten.
    pub fn upsert_if_absent(&mut self, entry: KnowledgeEntry) -> bool {
        let folded = entry.key.to_lowercase();
        if self.index.contains_key(&folded) {
            return false;
        }
        self.index.insert(folded, self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Keep every loaded entry; only the first of case-colliding keys is indexed
    fn insert_loaded(&mut self, entry: KnowledgeEntry) {
        let folded = entry.key.to_lowercase();
        if let Some(&first) = self.index.get(&folded) {
            warn!(
                "Knowledge key '{}' collides with '{}' ignoring case; lookups resolve to the earlier one",
                entry.key, self.entries[first].key
            );
        } else {
            self.index.insert(folded, self.entries.len());
        }
        self.entries.push(entry);
    }

    /// Apply every insert of a delta, returning how many were new
    pub fn apply(&mut self, delta: &KnowledgeDelta) -> usize {
        delta
            .inserts
            .iter()
            .filter(|entry| self.upsert_if_absent((*entry).clone()))
            .count()
    }

    /// Build from a parsed JSON value of shape `{question: {answer, code}}`.
    ///
    /// Anything else is rejected as malformed.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let Value::Object(map) = value else {
            return Err(AppError::Validation(
                "knowledge base must be a JSON object of question -> entry".to_string(),
            ));
        };

        let mut kb = Self::new();
        for (key, raw) in map {
            let raw: RawEntry = serde_json::from_value(raw).map_err(|e| {
                AppError::Validation(format!("malformed entry for '{}': {}", key, e))
            })?;
            kb.insert_loaded(KnowledgeEntry::new(key, raw.answer, raw.code));
        }

        Ok(kb)
    }

    /// Parse `responses.json` content
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Read and parse a knowledge base file
    pub async fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = tokio::fs::read_to_string(path).await?;
        let kb = Self::from_json_str(&content)?;
        info!("Loaded {} knowledge entries from {:?}", kb.len(), path);
        Ok(kb)
    }
}

impl FromIterator<KnowledgeEntry> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = KnowledgeEntry>>(iter: I) -> Self {
        let mut kb = Self::new();
        for entry in iter {
            kb.upsert_if_absent(entry);
        }
        kb
    }
}
