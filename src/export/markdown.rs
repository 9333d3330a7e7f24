//! Markdown rendering of blocks.

use std::borrow::Cow;

use crate::document::{BlockKind, ContentBlock, TableData};

/// Render blocks as Markdown, separated by blank lines.
pub fn to_markdown(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(block_to_markdown)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one block as Markdown. Content is emitted verbatim.
pub fn block_to_markdown(block: &ContentBlock) -> String {
    let content = block.content();
    match block.kind() {
        BlockKind::Text => {
            let mut out = content.to_string();
            if block.styles().bold {
                out = format!("**{out}**");
            }
            if block.styles().italic {
                out = format!("*{out}*");
            }
            out
        }
        BlockKind::Heading { .. } => {
            let level = usize::from(block.level().unwrap_or(1));
            format!("{} {content}", "#".repeat(level))
        }
        BlockKind::Image => format!("![]({})", destination(content)),
        BlockKind::Code { language } => format!("```{language}\n{content}\n```"),
        BlockKind::Table { table_data } => table_to_markdown(table_data),
        BlockKind::Link { url } => format!("[{content}]({})", destination(url)),
        BlockKind::Checklist { checked } => {
            let mark = if *checked { 'x' } else { ' ' };
            format!("- [{mark}] {content}")
        }
        BlockKind::Unsupported => {
            tracing::debug!(id = %block.id(), "skipping unsupported block in Markdown export");
            String::new()
        }
    }
}

/// Link or image destination. Ones with spaces, parentheses or angle
/// brackets are written in `<...>` form so they parse back unchanged.
fn destination(url: &str) -> Cow<'_, str> {
    let plain = !url
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));
    if plain {
        return Cow::Borrowed(url);
    }
    let escaped = url.replace('<', "\\<").replace('>', "\\>");
    Cow::Owned(format!("<{escaped}>"))
}

/// Pipe rows followed by one `---` separator row.
fn table_to_markdown(table: &TableData) -> String {
    let mut lines: Vec<String> = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.replace('|', "\\|"))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect();
    lines.push(vec!["---"; table.column_count()].join(" | "));
    lines.join("\n")
}
