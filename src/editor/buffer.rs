//! Live markdown text session backed by a rope.

use ropey::Rope;

use super::commands::{self, Command, Selection};
use crate::markdown::{FormattedSpan, tokenize};

/// Raw markdown text of a note being typed, with its selection.
///
/// Typing goes straight into the rope; toolbar commands rewrite the text
/// through [`commands::apply`] and move the selection onto the inserted
/// placeholder (or the cursor past the insertion). Display spans are
/// re-derived from the full text whenever it changed.
pub struct MarkdownBuffer {
    rope: Rope,
    /// Byte offsets into the text.
    selection: Selection,
    dirty: bool,
    spans: Option<Vec<FormattedSpan>>,
}

impl MarkdownBuffer {
    /// Create a buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
            dirty: false,
            spans: None,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Whether the text changed since creation or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Zero-based line and byte column of the selection end.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.rope.byte_to_line(self.selection.end);
        let col = self.selection.end - self.rope.line_to_byte(line);
        (line, col)
    }

    /// Set the selection, clamped to the text.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp_to(&self.text());
    }

    /// Type `s`, replacing the selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() && self.selection.is_caret() {
            return;
        }
        let start = self.remove_selection();
        self.rope.insert(self.rope.byte_to_char(start), s);
        self.selection = Selection::caret(start + s.len());
        self.touch();
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Delete the selection, or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if !self.selection.is_caret() {
            self.remove_selection();
            self.touch();
            return true;
        }
        let char_idx = self.rope.byte_to_char(self.selection.end);
        if char_idx == 0 {
            return false;
        }
        self.rope.remove(char_idx - 1..char_idx);
        self.selection = Selection::caret(self.rope.char_to_byte(char_idx - 1));
        self.touch();
        true
    }

    /// Delete the selection, or the character after the caret (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_caret() {
            self.remove_selection();
            self.touch();
            return true;
        }
        let char_idx = self.rope.byte_to_char(self.selection.end);
        if char_idx >= self.rope.len_chars() {
            return false;
        }
        self.rope.remove(char_idx..=char_idx);
        self.touch();
        true
    }

    /// Run a toolbar command on the current selection.
    ///
    /// A placeholder, if one was inserted, becomes the new selection so the
    /// next keystroke overtypes it.
    pub fn apply(&mut self, command: Command) {
        let edit = commands::apply(&self.text(), self.selection, command);
        self.replace_text(&edit.text);
        self.selection = edit
            .placeholder
            .map_or_else(|| Selection::caret(edit.cursor), Selection::from);
    }

    /// Insert an image URI from the image picker at the selection.
    pub fn insert_image(&mut self, alt: &str, uri: &str) {
        let edit = commands::insert_image_markdown(&self.text(), self.selection, alt, uri);
        self.replace_text(&edit.text);
        self.selection = Selection::caret(edit.cursor);
    }

    /// Display spans for the current text.
    pub fn spans(&mut self) -> &[FormattedSpan] {
        let rope = &self.rope;
        self.spans
            .get_or_insert_with(|| tokenize(&rope.to_string()))
    }

    // --- Private helpers ---

    fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.touch();
    }

    /// Remove the selected range and return its start.
    fn remove_selection(&mut self) -> usize {
        let Selection { start, end } = self.selection;
        if start < end {
            let range = self.rope.byte_to_char(start)..self.rope.byte_to_char(end);
            self.rope.remove(range);
        }
        self.selection = Selection::caret(start);
        start
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.spans = None;
    }
}

impl std::fmt::Debug for MarkdownBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownBuffer")
            .field(
                "rope",
                &format_args!("Rope({} bytes)", self.rope.len_bytes()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
