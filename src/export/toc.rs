//! Table of contents derived from heading blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{BlockKind, ContentBlock};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Anchor for a heading: `#` plus the lowercased text, whitespace runs
/// replaced by `-`.
pub fn heading_anchor(text: &str) -> String {
    format!("#{}", WHITESPACE_RE.replace_all(&text.to_lowercase(), "-"))
}

/// One link block per heading, in document order.
pub fn table_of_contents(blocks: &[ContentBlock]) -> Vec<ContentBlock> {
    blocks
        .iter()
        .filter(|block| matches!(block.kind(), BlockKind::Heading { .. }))
        .map(|heading| ContentBlock::link(heading.content(), heading_anchor(heading.content())))
        .collect()
}
