//! Toolbar commands: cursor-aware markdown insertion.
//!
//! Each command rewrites the full note text as
//! `before + transformed(selection or placeholder) + after`. Block-level
//! markdown (headings, lists, quotes, fences, tables, dividers, alignment
//! directives) is padded with newlines so it never sticks to the text around
//! it.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use thiserror::Error;

use crate::document::Alignment;

/// Fixed skeleton inserted by [`Command::Table`].
pub const TABLE_SKELETON: &str = "| Header 1 | Header 2 | Header 3 |\n\
                                  |----------|----------|----------|\n\
                                  | Cell 1   | Cell 2   | Cell 3   |";

/// A toolbar action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Bold,
    Italic,
    Heading1,
    Heading2,
    Bullet,
    Numbered,
    Checkbox,
    Quote,
    Code,
    Link,
    Image,
    Divider,
    Table,
    Align(Alignment),
}

impl Command {
    pub const ALL: [Self; 16] = [
        Self::Bold,
        Self::Italic,
        Self::Heading1,
        Self::Heading2,
        Self::Bullet,
        Self::Numbered,
        Self::Checkbox,
        Self::Quote,
        Self::Code,
        Self::Link,
        Self::Image,
        Self::Divider,
        Self::Table,
        Self::Align(Alignment::Left),
        Self::Align(Alignment::Center),
        Self::Align(Alignment::Right),
    ];

    /// Toolbar name of the command, as accepted by [`str::parse`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Bullet => "bullet",
            Self::Numbered => "number",
            Self::Checkbox => "checkbox",
            Self::Quote => "quote",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
            Self::Divider => "divider",
            Self::Table => "table",
            Self::Align(Alignment::Left) => "align-left",
            Self::Align(Alignment::Center) => "align-center",
            Self::Align(Alignment::Right) => "align-right",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toolbar command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// A selected byte range of the note text. `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Clamp to `text`: order the ends, cap them at the text length and move
    /// them back onto character boundaries.
    #[must_use]
    pub fn clamp_to(self, text: &str) -> Self {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self {
            start: floor_char_boundary(text, lo),
            end: floor_char_boundary(text, hi),
        }
    }
}

impl From<Range<usize>> for Selection {
    fn from(r: Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Result of a toolbar command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The full rewritten text.
    pub text: String,
    /// Byte offset just past the inserted markdown, before any trailing
    /// spacing newline.
    pub cursor: usize,
    /// Byte range of the placeholder phrase, when one was inserted.
    pub placeholder: Option<Range<usize>>,
}

/// Markdown produced for a command before it is spliced into the text.
struct Insertion {
    body: String,
    /// Placeholder range relative to `body`.
    placeholder: Option<Range<usize>>,
    block: bool,
}

impl Insertion {
    /// `prefix + (selection | placeholder) + suffix`.
    fn wrap(prefix: &str, selected: &str, placeholder: &str, suffix: &str, block: bool) -> Self {
        let (inner, marked) = if selected.is_empty() {
            (placeholder, true)
        } else {
            (selected, false)
        };
        let start = prefix.len();
        Self {
            body: format!("{prefix}{inner}{suffix}"),
            placeholder: marked.then(|| start..start + inner.len()),
            block,
        }
    }

    fn fixed(body: &str) -> Self {
        Self {
            body: body.to_string(),
            placeholder: None,
            block: true,
        }
    }
}

/// Apply a toolbar command to the selected range of `text`.
///
/// # Example
///
/// ```
/// use marknote::editor::{apply, Command, Selection};
///
/// let edit = apply("say hi", Selection::new(4, 6), Command::Bold);
/// assert_eq!(edit.text, "say **hi**");
/// assert_eq!(edit.cursor, 10);
/// ```
pub fn apply(text: &str, selection: Selection, command: Command) -> Edit {
    let sel = selection.clamp_to(text);
    let selected = &text[sel.start..sel.end];
    let insertion = match command {
        Command::Bold => Insertion::wrap("**", selected, "bold text", "**", false),
        Command::Italic => Insertion::wrap("_", selected, "italic text", "_", false),
        Command::Heading1 => Insertion::wrap("# ", selected, "Heading 1", "", true),
        Command::Heading2 => Insertion::wrap("## ", selected, "Heading 2", "", true),
        Command::Bullet => Insertion::wrap("- ", selected, "List item", "", true),
        Command::Numbered => Insertion::wrap("1. ", selected, "List item", "", true),
        Command::Checkbox => Insertion::wrap("- [ ] ", selected, "Task", "", true),
        Command::Quote => Insertion::wrap("> ", selected, "Quote", "", true),
        Command::Code if selected.contains('\n') => {
            Insertion::wrap("```\n", selected, "code", "\n```", true)
        }
        Command::Code => Insertion::wrap("`", selected, "code", "`", false),
        Command::Link => Insertion::wrap("[", selected, "link text", "](url)", false),
        Command::Image => Insertion::wrap("![", selected, "image alt", "](image-url)", false),
        Command::Divider => Insertion::fixed("---"),
        Command::Table => Insertion::fixed(TABLE_SKELETON),
        Command::Align(alignment) => {
            let name = alignment.as_str();
            let prefix = format!("::: align-{name}\n");
            let placeholder = format!("{name} aligned text");
            Insertion::wrap(&prefix, selected, &placeholder, "\n:::", true)
        }
    };
    splice(text, sel, insertion)
}

/// String form of [`apply`]: unknown command names return `text` unchanged.
pub fn apply_command(text: &str, selection_start: usize, selection_end: usize, command: &str) -> String {
    match command.parse::<Command>() {
        Ok(command) => apply(text, Selection::new(selection_start, selection_end), command).text,
        Err(err) => {
            tracing::debug!(%err, "ignoring toolbar command");
            text.to_string()
        }
    }
}

/// Insert an image picked from the camera or library as `![alt](uri)`.
///
/// A non-empty selection becomes the alt text; otherwise `alt` is used.
pub fn insert_image_markdown(text: &str, selection: Selection, alt: &str, uri: &str) -> Edit {
    let sel = selection.clamp_to(text);
    let selected = &text[sel.start..sel.end];
    let alt = if selected.is_empty() { alt } else { selected };
    let insertion = Insertion {
        body: format!("![{alt}]({uri})"),
        placeholder: None,
        block: false,
    };
    splice(text, sel, insertion)
}

fn splice(text: &str, sel: Selection, insertion: Insertion) -> Edit {
    let before = &text[..sel.start];
    let after = &text[sel.end..];
    let lead = insertion.block && !before.is_empty() && !before.ends_with('\n');
    let trail = insertion.block && !after.is_empty() && !after.starts_with('\n');

    let mut out = String::with_capacity(text.len() + insertion.body.len() + 2);
    out.push_str(before);
    if lead {
        out.push('\n');
    }
    let body_start = out.len();
    out.push_str(&insertion.body);
    let cursor = out.len();
    if trail {
        out.push('\n');
    }
    out.push_str(after);

    Edit {
        text: out,
        cursor,
        placeholder: insertion
            .placeholder
            .map(|r| body_start + r.start..body_start + r.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(text: &str, start: usize, end: usize, command: &str) -> String {
        apply_command(text, start, end, command)
    }

    #[test]
    fn test_bold_wraps_selection() {
        assert_eq!(run("make this loud", 10, 14, "bold"), "make this **loud**");
    }

    #[test]
    fn test_bold_without_selection_inserts_placeholder() {
        let edit = apply("ab", Selection::caret(1), Command::Bold);
        assert_eq!(edit.text, "a**bold text**b");
        assert_eq!(edit.placeholder, Some(3..12));
        assert_eq!(&edit.text[3..12], "bold text");
        assert_eq!(edit.cursor, 14);
    }

    #[test]
    fn test_italic_uses_underscore() {
        assert_eq!(run("so soft", 3, 7, "italic"), "so _soft_");
    }

    #[test]
    fn test_heading_gets_newline_before_when_glued() {
        assert_eq!(run("intro", 5, 5, "h1"), "intro\n# Heading 1");
    }

    #[test]
    fn test_heading_gets_newline_after_when_glued() {
        assert_eq!(run("Title rest", 0, 5, "h2"), "## Title\n rest");
    }

    #[test]
    fn test_block_no_extra_newlines_at_line_edges() {
        assert_eq!(run("a\n\nb", 2, 2, "bullet"), "a\n- List item\nb");
        assert_eq!(run("", 0, 0, "quote"), "> Quote");
    }

    #[test]
    fn test_block_commands_prefixes() {
        assert_eq!(run("x", 0, 1, "number"), "1. x");
        assert_eq!(run("x", 0, 1, "checkbox"), "- [ ] x");
        assert_eq!(run("x", 0, 1, "quote"), "> x");
    }

    #[test]
    fn test_single_line_code_is_inline() {
        assert_eq!(run("run ls now", 4, 6, "code"), "run `ls` now");
        assert_eq!(run("", 0, 0, "code"), "`code`");
    }

    #[test]
    fn test_multiline_code_is_fenced() {
        let text = "see\nfn a() {}\nfn b() {}";
        assert_eq!(run(text, 4, text.len(), "code"), "see\n```\nfn a() {}\nfn b() {}\n```");
    }

    #[test]
    fn test_link_and_image() {
        assert_eq!(run("docs", 0, 4, "link"), "[docs](url)");
        assert_eq!(run("", 0, 0, "link"), "[link text](url)");
        assert_eq!(run("", 0, 0, "image"), "![image alt](image-url)");
    }

    #[test]
    fn test_divider_is_normalized() {
        assert_eq!(run("ab", 1, 1, "divider"), "a\n---\nb");
    }

    #[test]
    fn test_table_on_empty_text() {
        let out = run("", 0, 0, "table");
        assert!(out.starts_with(
            "| Header 1 | Header 2 | Header 3 |\n|----------|----------|----------|\n| Cell 1   | Cell 2   | Cell 3   |"
        ));
    }

    #[test]
    fn test_table_ignores_selection() {
        let out = run("keep", 0, 4, "table");
        assert_eq!(out, TABLE_SKELETON);
    }

    #[test]
    fn test_alignment_directive() {
        assert_eq!(run("", 0, 0, "align-center"), "::: align-center\ncenter aligned text\n:::");
        assert_eq!(run("a b", 2, 3, "align-right"), "a \n::: align-right\nb\n:::");
    }

    #[test]
    fn test_unknown_command_is_noop() {
        assert_eq!(run("unchanged", 0, 3, "strikethrough"), "unchanged");
    }

    #[test]
    fn test_reversed_and_out_of_range_selection_is_clamped() {
        assert_eq!(run("abc", 3, 1, "bold"), "a**bc**");
        assert_eq!(run("abc", 1, 99, "bold"), "a**bc**");
    }

    #[test]
    fn test_selection_inside_multibyte_char_snaps_back() {
        // 'é' occupies bytes 1..3
        assert_eq!(run("héllo", 2, 2, "bold"), "h**bold text**éllo");
    }

    #[test]
    fn test_cursor_excludes_trailing_spacing_newline() {
        let edit = apply("ab", Selection::caret(1), Command::Divider);
        assert_eq!(edit.text, "a\n---\nb");
        assert_eq!(edit.cursor, 5);
    }

    #[test]
    fn test_insert_image_markdown_uses_uri() {
        let edit = insert_image_markdown("pic: ", Selection::caret(5), "photo", "file:///a.jpg");
        assert_eq!(edit.text, "pic: ![photo](file:///a.jpg)");
        assert_eq!(edit.cursor, edit.text.len());
    }

    #[test]
    fn test_command_names_roundtrip() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
    }

    proptest! {
        #[test]
        fn empty_selection_bold_inserts_placeholder(text in "[a-z \n]{0,32}", at in 0usize..40) {
            let at = at.min(text.len());
            let out = apply_command(&text, at, at, "bold");
            prop_assert_eq!(out, format!("{}**bold text**{}", &text[..at], &text[at..]));
        }

        #[test]
        fn italic_wraps_any_selection(text in "[a-z \n]{1,32}", a in 0usize..32, b in 0usize..32) {
            let (start, end) = (a.min(b).min(text.len()), a.max(b).min(text.len()));
            prop_assume!(start < end);
            let out = apply_command(&text, start, end, "italic");
            let expected = format!("{}_{}_{}", &text[..start], &text[start..end], &text[end..]);
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn commands_keep_surrounding_text(text in "[a-z \n]{0,32}", at in 0usize..40) {
            let at = at.min(text.len());
            for command in Command::ALL {
                let edit = apply(&text, Selection::caret(at), command);
                prop_assert!(edit.text.starts_with(&text[..at]));
                prop_assert!(edit.text.ends_with(&text[at..]));
                prop_assert!(edit.cursor <= edit.text.len());
            }
        }
    }
}
