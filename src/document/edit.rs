//! Pure transitions over a block sequence.
//!
//! Every editor action on the block document is a [`BlockEdit`]. Applying
//! one never mutates the input: it returns the next sequence, which the
//! editor session records in its history.

use super::block::{BlockId, BlockKind, ContentBlock};
use super::style::StylePatch;
use super::table::TableOp;

/// A block-level edit.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEdit {
    /// Insert a block at `index` (clamped to the end).
    Insert { index: usize, block: ContentBlock },
    Delete(BlockId),
    SetContent { id: BlockId, content: String },
    PatchStyle { id: BlockId, patch: StylePatch },
    ToggleBold(BlockId),
    ToggleItalic(BlockId),
    SetChecked { id: BlockId, checked: bool },
    SetUrl { id: BlockId, url: String },
    SetLanguage { id: BlockId, language: String },
    SetLevel { id: BlockId, level: u8 },
    Table { id: BlockId, op: TableOp },
    /// Swap a block for another one, possibly of a different kind.
    Replace { id: BlockId, block: ContentBlock },
    /// Drop an image, leaving an empty text block in its place.
    RemoveImage(BlockId),
    Move { from: usize, to: usize },
}

/// Apply `edit` to `blocks`, returning the next sequence.
///
/// Edits that target a missing id, or a block of the wrong kind, return an
/// unchanged copy. The result always holds at least one block.
pub fn apply_edit(blocks: &[ContentBlock], edit: &BlockEdit) -> Vec<ContentBlock> {
    let mut next = blocks.to_vec();
    match edit {
        BlockEdit::Insert { index, block } => {
            let index = (*index).min(next.len());
            let block = unique_id(&next, None, block);
            next.insert(index, block);
        }
        BlockEdit::Delete(id) => {
            next.retain(|b| b.id() != id);
        }
        BlockEdit::SetContent { id, content } => {
            with_block(&mut next, id, |b| b.set_content(content.clone()));
        }
        BlockEdit::PatchStyle { id, patch } => {
            with_block(&mut next, id, |b| b.patch_styles(patch));
        }
        BlockEdit::ToggleBold(id) => {
            with_block(&mut next, id, |b| {
                let bold = !b.styles().bold;
                b.patch_styles(&StylePatch::bold(bold));
            });
        }
        BlockEdit::ToggleItalic(id) => {
            with_block(&mut next, id, |b| {
                let italic = !b.styles().italic;
                b.patch_styles(&StylePatch::italic(italic));
            });
        }
        BlockEdit::SetChecked { id, checked } => {
            with_block(&mut next, id, |b| {
                b.set_checked(*checked);
            });
        }
        BlockEdit::SetUrl { id, url } => {
            with_block(&mut next, id, |b| {
                b.set_url(url.clone());
            });
        }
        BlockEdit::SetLanguage { id, language } => {
            with_block(&mut next, id, |b| {
                b.set_language(language.clone());
            });
        }
        BlockEdit::SetLevel { id, level } => {
            with_block(&mut next, id, |b| {
                b.set_level(*level);
            });
        }
        BlockEdit::Table { id, op } => {
            with_block(&mut next, id, |b| {
                if let Some(table) = b.table_data_mut() {
                    table.apply(op);
                }
            });
        }
        BlockEdit::Replace { id, block } => {
            let block = unique_id(&next, Some(id), block);
            if let Some(slot) = next.iter_mut().find(|b| b.id() == id) {
                *slot = block;
            }
        }
        BlockEdit::RemoveImage(id) => {
            if let Some(slot) = next
                .iter_mut()
                .find(|b| b.id() == id && matches!(b.kind(), BlockKind::Image))
            {
                *slot = ContentBlock::empty_text();
            }
        }
        BlockEdit::Move { from, to } => {
            if *from < next.len() {
                let block = next.remove(*from);
                let to = (*to).min(next.len());
                next.insert(to, block);
            }
        }
    }
    if next.is_empty() {
        next.push(ContentBlock::empty_text());
    }
    next
}

/// `block`, with a fresh id if another block already uses its id.
/// `replacing` is the block being swapped out, whose id may be reused.
fn unique_id(
    blocks: &[ContentBlock],
    replacing: Option<&BlockId>,
    block: &ContentBlock,
) -> ContentBlock {
    let taken = blocks
        .iter()
        .any(|b| b.id() == block.id() && Some(b.id()) != replacing);
    if taken {
        tracing::debug!(id = %block.id(), "block id already in use, generating a new one");
        block.clone().with_fresh_id()
    } else {
        block.clone()
    }
}

fn with_block(blocks: &mut [ContentBlock], id: &BlockId, f: impl FnOnce(&mut ContentBlock)) {
    if let Some(block) = blocks.iter_mut().find(|b| b.id() == id) {
        f(block);
    }
}
