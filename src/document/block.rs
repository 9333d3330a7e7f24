//! Content blocks, the unit of storage of a note document.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::style::{Style, StylePatch};
use super::table::TableData;

static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a block, unique within a document.
///
/// Every id built from a string, including ids read from a snapshot,
/// moves the generator past it, so [`BlockId::generate`] never hands out an
/// id already in use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if let Some(n) = id
            .strip_prefix("block-")
            .and_then(|n| n.parse::<u64>().ok())
        {
            NEXT_BLOCK_ID.fetch_max(n.saturating_add(1), Ordering::Relaxed);
        }
        Self(id)
    }

    /// A fresh id, distinct from every id generated or seen by this process.
    pub fn generate() -> Self {
        let n = NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("block-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

const fn default_level() -> u8 {
    1
}

/// Kind of a block, with the fields only that kind carries.
///
/// Serialized inline with the block as a `type` tag plus the kind's fields,
/// so `{"type": "heading", "level": 2, ...}` reads back as `Heading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Heading {
        #[serde(default = "default_level")]
        level: u8,
    },
    Image,
    Code {
        #[serde(default)]
        language: String,
    },
    Table {
        #[serde(rename = "tableData", default)]
        table_data: TableData,
    },
    Checklist {
        #[serde(default)]
        checked: bool,
    },
    Link {
        #[serde(default)]
        url: String,
    },
    /// A kind this build does not know, kept so snapshots still load.
    #[serde(other)]
    Unsupported,
}

impl BlockKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading { .. } => "heading",
            Self::Image => "image",
            Self::Code { .. } => "code",
            Self::Table { .. } => "table",
            Self::Checklist { .. } => "checklist",
            Self::Link { .. } => "link",
            Self::Unsupported => "unsupported",
        }
    }
}

/// One block of a note: a paragraph, heading, image and so on.
///
/// The id and kind are fixed at construction. Turning a block into a
/// different kind means building a new block and replacing this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    id: BlockId,
    #[serde(flatten)]
    kind: BlockKind,
    #[serde(default)]
    content: String,
    #[serde(default)]
    styles: Style,
}

impl ContentBlock {
    /// Build a block of any kind with a fresh id.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        let kind = match kind {
            BlockKind::Heading { level } => BlockKind::Heading {
                level: level.clamp(1, 6),
            },
            other => other,
        };
        Self {
            id: BlockId::generate(),
            kind,
            content: content.into(),
            styles: Style::default(),
        }
    }

    /// The default block of a new document: empty text.
    pub fn empty_text() -> Self {
        Self::text("")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(BlockKind::Text, content)
    }

    pub fn heading(level: u8, content: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading { level }, content)
    }

    /// An image block; `uri` is whatever the image picker returned.
    pub fn image(uri: impl Into<String>) -> Self {
        Self::new(BlockKind::Image, uri)
    }

    pub fn code(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            BlockKind::Code {
                language: language.into(),
            },
            content,
        )
    }

    pub fn table(table_data: TableData) -> Self {
        Self::new(BlockKind::Table { table_data }, "")
    }

    pub fn checklist(content: impl Into<String>, checked: bool) -> Self {
        Self::new(BlockKind::Checklist { checked }, content)
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(BlockKind::Link { url: url.into() }, label)
    }

    /// Replace the generated id, e.g. when loading a known document.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.id = id.into();
        self
    }

    /// Give the block a newly generated id.
    #[must_use]
    pub fn with_fresh_id(self) -> Self {
        self.with_id(BlockId::generate())
    }

    #[must_use]
    pub fn with_styles(mut self, styles: Style) -> Self {
        self.styles = styles;
        self
    }

    pub const fn id(&self) -> &BlockId {
        &self.id
    }

    pub const fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn styles(&self) -> &Style {
        &self.styles
    }

    /// Heading level, clamped to 1..=6.
    pub fn level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading { level } => Some(level.clamp(1, 6)),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Code { language } => Some(language),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Link { url } => Some(url),
            _ => None,
        }
    }

    pub const fn checked(&self) -> Option<bool> {
        match self.kind {
            BlockKind::Checklist { checked } => Some(checked),
            _ => None,
        }
    }

    pub const fn table_data(&self) -> Option<&TableData> {
        match &self.kind {
            BlockKind::Table { table_data } => Some(table_data),
            _ => None,
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_styles(&mut self, styles: Style) {
        self.styles = styles;
    }

    pub fn patch_styles(&mut self, patch: &StylePatch) {
        self.styles = self.styles.patched(patch);
    }

    // Kind-specific setters return `false` when the block is another kind.

    pub const fn set_checked(&mut self, value: bool) -> bool {
        match &mut self.kind {
            BlockKind::Checklist { checked } => {
                *checked = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_url(&mut self, value: impl Into<String>) -> bool {
        match &mut self.kind {
            BlockKind::Link { url } => {
                *url = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn set_language(&mut self, value: impl Into<String>) -> bool {
        match &mut self.kind {
            BlockKind::Code { language } => {
                *language = value.into();
                true
            }
            _ => false,
        }
    }

    pub fn set_level(&mut self, value: u8) -> bool {
        match &mut self.kind {
            BlockKind::Heading { level } => {
                *level = value.clamp(1, 6);
                true
            }
            _ => false,
        }
    }

    pub const fn table_data_mut(&mut self) -> Option<&mut TableData> {
        match &mut self.kind {
            BlockKind::Table { table_data } => Some(table_data),
            _ => None,
        }
    }
}
