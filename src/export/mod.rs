//! Serialization of block documents.
//!
//! This module handles:
//! - Rendering blocks to a standalone HTML page ([`to_html`])
//! - Rendering blocks to Markdown ([`to_markdown`])
//! - Reading Markdown back into blocks ([`from_markdown`])
//! - Deriving a table of contents and sanitizing stored HTML

mod html;
mod import;
mod markdown;
mod toc;

pub use html::{
    block_to_html, escape_html, html_fragment, sanitize_html, style_to_css, to_html,
    to_html_with_theme,
};
pub use import::from_markdown;
pub use markdown::{block_to_markdown, to_markdown};
pub use toc::{heading_anchor, table_of_contents};

use crate::document::ContentBlock;

/// Output format of a note's `content` string.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Html,
    Markdown,
}

impl ExportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
        }
    }

    /// Render `blocks` in this format.
    pub fn render(self, blocks: &[ContentBlock], theme: &Theme) -> String {
        match self {
            Self::Html => to_html_with_theme(blocks, theme),
            Self::Markdown => to_markdown(blocks),
        }
    }
}

/// Color tokens used by the HTML page shell.
///
/// Passed explicitly to the HTML renderer; nothing reads a global theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub code_background: String,
    pub border: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            code_background: "#f5f5f5".to_string(),
            border: "#dddddd".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#e6e6e6".to_string(),
            code_background: "#2a2a2a".to_string(),
            border: "#444444".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
