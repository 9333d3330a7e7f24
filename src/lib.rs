// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportFormat)
    clippy::module_name_repetitions
)]

//! # Marknote
//!
//! The editing core of a mobile note-taking app.
//!
//! Marknote provides:
//! - A block document model with per-block styles and tables
//! - A live markdown tokenizer for display spans
//! - Toolbar commands that rewrite raw markdown text
//! - Bounded undo/redo history over document snapshots
//! - HTML and Markdown export, and Markdown import
//!
//! ## Architecture
//!
//! Every change is a pure transition from one snapshot to the next:
//! - **Text**: `(text, selection, command)` gives a new text and cursor
//! - **Blocks**: `(blocks, edit)` gives a new block sequence
//! - **History**: each new snapshot is recorded; undo and redo move between them
//!
//! ## Modules
//!
//! - [`document`]: Blocks, styles, tables and block edits
//! - [`markdown`]: Markdown tokenizer
//! - [`editor`]: Toolbar commands, history and editing sessions
//! - [`export`]: HTML/Markdown serialization and import
//! - [`note`]: Note records and store boundary
//! - [`config`]: Saved CLI defaults

pub mod config;
pub mod document;
pub mod editor;
mod error;
pub mod export;
pub mod markdown;
pub mod note;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{BlockEdit, BlockId, BlockKind, ContentBlock, Style, TableData};
    pub use crate::editor::{BlockEditor, Command, History, MarkdownBuffer, Selection};
    pub use crate::export::{ExportFormat, Theme, from_markdown, to_html, to_markdown};
    pub use crate::markdown::{FormattedSpan, SpanKind, tokenize};
}
