//! Markdown import with comrak.
//!
//! Block-level nodes map onto block kinds; inline formatting inside a block
//! is written back as Markdown so contents survive an export round trip.
//! Blocks are separated by one blank line on export, so every further pair
//! of blank lines between blocks reads back as an empty text block.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, parse_document};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{ContentBlock, ListType, Style, TableData};

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-{3,}(\s*\|\s*-{3,})+\s*$").expect("valid regex"));

/// Parse Markdown into blocks. Never returns an empty sequence.
pub fn from_markdown(source: &str) -> Vec<ContentBlock> {
    let normalized = normalize_tables(source);
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, &normalized, &options);

    let mut collected = Collected::default();
    for node in root.children() {
        process_node(node, &mut collected, ListType::None);
    }
    let trailing_newlines = source.len() - source.trim_end_matches('\n').len();
    let blocks = collected.into_blocks(trailing_newlines);
    tracing::debug!(blocks = blocks.len(), "imported markdown");
    blocks
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    options
}

/// Blocks in document order with the source lines each came from.
#[derive(Default)]
struct Collected {
    blocks: Vec<ContentBlock>,
    /// 1-based first and last line of each block.
    lines: Vec<(usize, usize)>,
}

impl Collected {
    fn push<'a>(&mut self, node: &'a AstNode<'a>, block: ContentBlock) {
        let pos = node.data.borrow().sourcepos;
        self.blocks.push(block);
        self.lines.push((pos.start.line, pos.end.line));
    }

    /// Fill blank-line gaps with empty text blocks.
    fn into_blocks(self, trailing_newlines: usize) -> Vec<ContentBlock> {
        if self.blocks.is_empty() {
            let count = trailing_newlines / 2 + 1;
            return (0..count).map(|_| ContentBlock::empty_text()).collect();
        }

        let mut out = Vec::with_capacity(self.blocks.len());
        let mut previous_end = None;
        for (block, (start, end)) in self.blocks.into_iter().zip(self.lines) {
            let gap = match previous_end {
                // Leading blank lines: one empty block per pair.
                None => start.saturating_sub(1) / 2,
                // One blank line is the separator itself.
                Some(prev) => start.saturating_sub(prev + 1).saturating_sub(1) / 2,
            };
            out.extend((0..gap).map(|_| ContentBlock::empty_text()));
            out.push(block);
            previous_end = Some(end);
        }
        out.extend((0..trailing_newlines / 2).map(|_| ContentBlock::empty_text()));
        out
    }
}

fn process_node<'a>(node: &'a AstNode<'a>, out: &mut Collected, list: ListType) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            out.push(node, ContentBlock::heading(heading.level, inline_markdown(node)));
        }
        NodeValue::Paragraph => out.push(node, paragraph_block(node, list)),
        NodeValue::CodeBlock(code) => {
            let language = code.info.split_whitespace().next().unwrap_or_default();
            let literal = code.literal.strip_suffix('\n').unwrap_or(&code.literal);
            out.push(node, ContentBlock::code(language, literal));
        }
        NodeValue::Table(_) => out.push(node, ContentBlock::table(collect_table_rows(node))),
        NodeValue::List(list_node) => {
            let list = match list_node.list_type {
                comrak::nodes::ListType::Bullet => ListType::Bullet,
                comrak::nodes::ListType::Ordered => ListType::Number,
            };
            for item in node.children() {
                process_node(item, out, list);
            }
        }
        NodeValue::TaskItem(symbol) => push_task_item(node, symbol.is_some(), out),
        NodeValue::Item(_) => match find_task_marker(node) {
            Some(checked) => push_task_item(node, checked, out),
            None => {
                for child in node.children() {
                    process_node(child, out, list);
                }
            }
        },
        NodeValue::BlockQuote => {
            for child in node.children() {
                process_node(child, out, ListType::None);
            }
        }
        NodeValue::ThematicBreak | NodeValue::HtmlBlock(_) => {
            tracing::trace!("skipping thematic break or raw HTML");
        }
        _ => {
            let text = inline_markdown(node);
            if !text.trim().is_empty() {
                out.push(node, ContentBlock::text(text));
            }
        }
    }
}

/// A paragraph that is a single image or link becomes that block; one
/// wrapped in strong/emphasis runs becomes styled text.
fn paragraph_block<'a>(node: &'a AstNode<'a>, list: ListType) -> ContentBlock {
    if let Some(only) = single_child(node) {
        match &only.data.borrow().value {
            NodeValue::Image(image) => return ContentBlock::image(image.url.clone()),
            NodeValue::Link(link) if list == ListType::None => {
                return ContentBlock::link(inline_markdown(only), link.url.clone());
            }
            _ => {}
        }
    }

    let mut style = Style {
        list_type: list,
        ..Style::default()
    };
    let mut inner = node;
    while let Some(only) = single_child(inner) {
        match only.data.borrow().value {
            NodeValue::Strong if !style.bold => style.bold = true,
            NodeValue::Emph if !style.italic => style.italic = true,
            _ => break,
        }
        inner = only;
    }
    ContentBlock::text(inline_markdown(inner)).with_styles(style)
}

fn push_task_item<'a>(node: &'a AstNode<'a>, checked: bool, out: &mut Collected) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Paragraph | NodeValue::TaskItem(_) => {
                out.push(child, ContentBlock::checklist(inline_markdown(child), checked));
            }
            _ => process_node(child, out, ListType::None),
        }
    }
}

fn find_task_marker<'a>(node: &'a AstNode<'a>) -> Option<bool> {
    node.children().find_map(|child| match &child.data.borrow().value {
        NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
        _ => None,
    })
}

fn single_child<'a>(node: &'a AstNode<'a>) -> Option<&'a AstNode<'a>> {
    let first = node.first_child()?;
    first.next_sibling().is_none().then_some(first)
}

fn collect_table_rows<'a>(table_node: &'a AstNode<'a>) -> TableData {
    let mut rows = Vec::new();
    for row_node in table_node.children() {
        if !matches!(row_node.data.borrow().value, NodeValue::TableRow(_)) {
            continue;
        }
        let cells = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| inline_markdown(cell).trim().to_string())
            .collect();
        rows.push(cells);
    }
    TableData::from_rows(rows)
}

/// Inline children written back as Markdown.
fn inline_markdown<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.children() {
        write_inline(child, &mut out);
    }
    out
}

fn write_inline<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push_str(text),
        NodeValue::Code(code) => {
            out.push('`');
            out.push_str(&code.literal);
            out.push('`');
        }
        NodeValue::HtmlInline(html) => out.push_str(html),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
        NodeValue::Strong => wrap_inline(node, "**", out),
        NodeValue::Emph => wrap_inline(node, "*", out),
        NodeValue::Strikethrough => wrap_inline(node, "~~", out),
        NodeValue::Link(link) => {
            out.push('[');
            out.push_str(&inline_markdown(node));
            out.push_str("](");
            out.push_str(&link.url);
            out.push(')');
        }
        NodeValue::Image(image) => {
            out.push_str("![");
            out.push_str(&inline_markdown(node));
            out.push_str("](");
            out.push_str(&image.url);
            out.push(')');
        }
        _ => out.push_str(&inline_markdown(node)),
    }
}

fn wrap_inline<'a>(node: &'a AstNode<'a>, marker: &str, out: &mut String) {
    out.push_str(marker);
    out.push_str(&inline_markdown(node));
    out.push_str(marker);
}

/// Rewrite tables in the export layout (rows, then a `---` separator) so the
/// separator follows the first row, which is what GFM expects.
fn normalize_tables(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(line);
            i += 1;
            continue;
        }
        if in_fence || line.trim().is_empty() {
            out.push(line);
            i += 1;
            continue;
        }

        let end = lines[i..]
            .iter()
            .position(|l| l.trim().is_empty() || l.trim_start().starts_with("```"))
            .map_or(lines.len(), |n| i + n);
        let run = &lines[i..end];
        match run.split_last() {
            Some((separator, rows))
                if rows.len() > 1
                    && SEPARATOR_RE.is_match(separator)
                    && rows
                        .iter()
                        .all(|row| cell_count(row) == cell_count(separator)) =>
            {
                out.push(rows[0]);
                out.push(separator);
                out.extend_from_slice(&rows[1..]);
            }
            _ => out.extend_from_slice(run),
        }
        i = end;
    }
    out.join("\n")
}

/// Cells in a pipe row, ignoring escaped pipes.
fn cell_count(row: &str) -> usize {
    let mut count = 1;
    let mut escaped = false;
    for ch in row.chars() {
        match ch {
            '\\' if !escaped => escaped = true,
            '|' if !escaped => count += 1,
            _ => escaped = false,
        }
    }
    count
}
