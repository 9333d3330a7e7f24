//! Note records and the key-value store boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::ContentBlock;
use crate::export::{ExportFormat, Theme, sanitize_html};
use crate::{Error, Result};

/// A stored note. `content` holds the exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Note {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }

    /// Build a note whose content is `blocks` rendered in `format`.
    pub fn from_blocks(
        id: impl Into<String>,
        title: impl Into<String>,
        blocks: &[ContentBlock],
        format: ExportFormat,
        theme: &Theme,
        timestamp: impl Into<String>,
    ) -> Self {
        Self::new(id, title, format.render(blocks, theme), timestamp)
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Replace the content and bump `updated_at`.
    pub fn update_content(&mut self, content: impl Into<String>, timestamp: impl Into<String>) {
        self.content = content.into();
        self.updated_at = timestamp.into();
    }
}

/// Key-value storage for notes, keyed by note id.
pub trait NoteStore {
    /// Fetch a note. Stored content is sanitized on the way out.
    fn get(&self, id: &str) -> Result<Option<Note>>;

    /// Insert or overwrite a note.
    fn set(&mut self, note: &Note) -> Result<()>;

    /// Remove a note; [`Error::NotFound`] if absent.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// In-process store keeping each note as a JSON string.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a raw JSON value under `id`, bypassing serialization.
    pub fn insert_raw(&mut self, id: impl Into<String>, json: impl Into<String>) {
        self.entries.insert(id.into(), json.into());
    }

    /// Ids of all stored notes, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl NoteStore for MemoryStore {
    fn get(&self, id: &str) -> Result<Option<Note>> {
        let Some(json) = self.entries.get(id) else {
            return Ok(None);
        };
        let mut note: Note = serde_json::from_str(json)?;
        note.content = sanitize_html(&note.content);
        Ok(Some(note))
    }

    fn set(&mut self, note: &Note) -> Result<()> {
        let json = serde_json::to_string(note)?;
        self.entries.insert(note.id.clone(), json);
        tracing::debug!(id = %note.id, "stored note");
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}
