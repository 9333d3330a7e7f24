//! Block document model.
//!
//! This module handles:
//! - Per-block formatting ([`Style`])
//! - Typed content blocks ([`ContentBlock`], [`BlockKind`])
//! - Rectangular table cells ([`TableData`])
//! - Pure block-sequence edits ([`BlockEdit`])

mod block;
mod edit;
mod style;
mod table;

pub use block::{BlockId, BlockKind, ContentBlock};
pub use edit::{BlockEdit, apply_edit};
pub use style::{Alignment, ListType, Style, StylePatch};
pub use table::{TableData, TableOp};

/// Parse a block snapshot from JSON.
pub fn snapshot_from_json(json: &str) -> crate::Result<Vec<ContentBlock>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a block snapshot from a JSON file.
pub fn load_snapshot(path: &std::path::Path) -> crate::Result<Vec<ContentBlock>> {
    let json = std::fs::read_to_string(path)?;
    snapshot_from_json(&json)
}

/// Serialize a block snapshot to pretty JSON.
pub fn snapshot_to_json(blocks: &[ContentBlock]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(blocks)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_roundtrip_preserves_blocks() {
        let blocks = vec![
            ContentBlock::heading(2, "Groceries").with_id("a"),
            ContentBlock::checklist("milk", true).with_id("b"),
            ContentBlock::link("docs", "https://example.com").with_id("c"),
        ];
        let json = snapshot_to_json(&blocks).unwrap();
        assert_eq!(snapshot_from_json(&json).unwrap(), blocks);
    }

    #[test]
    fn test_snapshot_from_invalid_json_is_error() {
        assert!(matches!(snapshot_from_json("[{"), Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_load_missing_snapshot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_snapshot(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
