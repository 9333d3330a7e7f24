//! Editing engines for notes.
//!
//! - [`commands`]: toolbar-driven markdown insertion on raw text
//! - [`history`]: bounded undo/redo over snapshots
//! - [`MarkdownBuffer`]: rope-backed live text with selection and spans
//! - [`BlockEditor`]: block document with undo history and shortcuts

mod buffer;
pub mod commands;
pub mod history;
mod session;

pub use buffer::MarkdownBuffer;
pub use commands::{
    Command, Edit, Selection, TABLE_SKELETON, UnknownCommand, apply, apply_command,
    insert_image_markdown,
};
pub use history::{DEFAULT_HISTORY_LIMIT, History};
pub use session::{BlockEditor, KeyShortcut};
