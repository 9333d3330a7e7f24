//! Block editor session: the document being edited plus its undo history.

use std::collections::HashSet;

use crate::document::{BlockEdit, BlockId, BlockKind, ContentBlock, apply_edit};
use crate::export::{self, Theme};

use super::history::History;

/// Keyboard shortcuts the block editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShortcut {
    /// Ctrl/Cmd+Z
    Undo,
    /// Ctrl/Cmd+Shift+Z
    Redo,
    /// Ctrl/Cmd+B
    Bold,
    /// Ctrl/Cmd+I
    Italic,
}

/// Block document being edited, with undo history.
///
/// The history owns the present snapshot. Every change goes through
/// [`BlockEditor::dispatch`], which computes the next sequence with
/// [`apply_edit`] and records it.
#[derive(Debug, Clone)]
pub struct BlockEditor {
    history: History<Vec<ContentBlock>>,
}

impl BlockEditor {
    /// Start editing `blocks`; an empty sequence becomes one empty text block.
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self::with_history_limit(blocks, super::history::DEFAULT_HISTORY_LIMIT)
    }

    /// Like [`BlockEditor::new`]; a block whose id repeats an earlier
    /// block's id gets a fresh one.
    pub fn with_history_limit(blocks: Vec<ContentBlock>, limit: usize) -> Self {
        let mut seen = HashSet::new();
        let mut blocks: Vec<ContentBlock> = blocks
            .into_iter()
            .map(|block| {
                if seen.insert(block.id().clone()) {
                    block
                } else {
                    block.with_fresh_id()
                }
            })
            .collect();
        if blocks.is_empty() {
            blocks.push(ContentBlock::empty_text());
        }
        Self {
            history: History::with_limit(blocks, limit),
        }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        self.history.present()
    }

    pub fn block(&self, id: &BlockId) -> Option<&ContentBlock> {
        self.blocks().iter().find(|b| b.id() == id)
    }

    pub const fn history(&self) -> &History<Vec<ContentBlock>> {
        &self.history
    }

    /// Apply an edit and record it. Returns whether the document changed.
    pub fn dispatch(&mut self, edit: BlockEdit) -> bool {
        let next = apply_edit(self.blocks(), &edit);
        let changed = self.history.update(next);
        if !changed {
            tracing::debug!(?edit, "edit left the document unchanged");
        }
        changed
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Append an image block for a URI from the camera or photo library.
    pub fn insert_image(&mut self, uri: impl Into<String>) -> BlockId {
        let block = ContentBlock::image(uri);
        let id = block.id().clone();
        let index = self.blocks().len();
        self.dispatch(BlockEdit::Insert { index, block });
        id
    }

    /// Handle a keyboard shortcut. Bold and italic only apply to text and
    /// heading blocks. Returns whether the document changed.
    pub fn shortcut(&mut self, shortcut: KeyShortcut, selected: Option<&BlockId>) -> bool {
        match shortcut {
            KeyShortcut::Undo => self.undo(),
            KeyShortcut::Redo => self.redo(),
            KeyShortcut::Bold | KeyShortcut::Italic => {
                let Some(block) = selected.and_then(|id| self.block(id)) else {
                    return false;
                };
                if !matches!(block.kind(), BlockKind::Text | BlockKind::Heading { .. }) {
                    return false;
                }
                let id = block.id().clone();
                let edit = if shortcut == KeyShortcut::Bold {
                    BlockEdit::ToggleBold(id)
                } else {
                    BlockEdit::ToggleItalic(id)
                };
                self.dispatch(edit)
            }
        }
    }

    pub fn to_html(&self, theme: &Theme) -> String {
        export::to_html_with_theme(self.blocks(), theme)
    }

    pub fn to_markdown(&self) -> String {
        export::to_markdown(self.blocks())
    }
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
