//! Thread-safe file store

use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Stored file content plus upload metadata
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub content: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

/// Listing row for a stored file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub size: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// Filename to content mapping.
///
/// Keys are case-sensitive. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: RwLock<HashMap<String, FileEntry>>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under `filename`, returning true if it replaced an
    /// existing entry.
    pub fn store(&self, filename: &str, content: Bytes) -> bool {
        let entry = FileEntry {
            content,
            uploaded_at: Utc::now(),
        };
        let size = entry.content.len();

        let replaced = self
            .files
            .write()
            .insert(filename.to_string(), entry)
            .is_some();

        tracing::info!(filename = %filename, size, replaced, "File stored");
        replaced
    }

    /// Sorted snapshot of all stored filenames
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Sorted snapshot of all stored files with their metadata
    pub fn list_entries(&self) -> Vec<FileSummary> {
        let mut entries: Vec<FileSummary> = self
            .files
            .read()
            .iter()
            .map(|(name, entry)| FileSummary {
                name: name.clone(),
                size: entry.content.len(),
                uploaded_at: entry.uploaded_at,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Content stored under `filename`, if any
    pub fn get(&self, filename: &str) -> Option<Bytes> {
        self.files.read().get(filename).map(|entry| entry.content.clone())
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.read().contains_key(filename)
    }

    pub(crate) fn len(&self) -> usize {
        self.files.read().len()
    }
}
