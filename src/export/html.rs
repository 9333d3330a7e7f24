//! HTML rendering of blocks.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Theme;
use crate::document::{BlockKind, ContentBlock, Style};

/// Render blocks as a standalone HTML page with the default theme.
pub fn to_html(blocks: &[ContentBlock]) -> String {
    to_html_with_theme(blocks, &Theme::default())
}

/// Rendered blocks joined by newlines, without the page shell.
pub fn html_fragment(blocks: &[ContentBlock]) -> String {
    blocks.iter().map(block_to_html).collect::<Vec<_>>().join("\n")
}

/// Render blocks as a standalone HTML page.
pub fn to_html_with_theme(blocks: &[ContentBlock], theme: &Theme) -> String {
    let body = html_fragment(blocks);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <style>
    body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: {bg}; color: {fg}; }}
    code {{ background: {code}; padding: 0.2em 0.4em; border-radius: 3px; }}
    table {{ border-collapse: collapse; width: 100%; }}
    td {{ padding: 8px; border: 1px solid {border}; }}
  </style>
</head>
<body>
{body}
</body>
</html>"#,
        bg = theme.background,
        fg = theme.text,
        code = theme.code_background,
        border = theme.border,
    )
}

/// Render one block as an HTML fragment.
///
/// Unsupported blocks render as an empty string.
pub fn block_to_html(block: &ContentBlock) -> String {
    let content = escape_html(block.content());
    let css = style_to_css(block.styles());
    match block.kind() {
        BlockKind::Text => format!(r#"<p style="{css}">{content}</p>"#),
        BlockKind::Heading { .. } => {
            let level = block.level().unwrap_or(1);
            format!(r#"<h{level} style="{css}">{content}</h{level}>"#)
        }
        BlockKind::Image => {
            format!(r#"<img src="{content}" alt="" style="max-width: 100%; height: auto;" />"#)
        }
        BlockKind::Code { language } if language.is_empty() => {
            format!("<pre><code>{content}</code></pre>")
        }
        BlockKind::Code { language } => format!(
            r#"<pre><code class="language-{}">{content}</code></pre>"#,
            escape_html(language)
        ),
        BlockKind::Table { table_data } => {
            let mut out = String::from(r#"<table border="1">"#);
            for row in table_data.rows() {
                out.push_str("<tr>");
                for cell in row {
                    let _ = write!(out, "<td>{}</td>", escape_html(cell));
                }
                out.push_str("</tr>");
            }
            out.push_str("</table>");
            out
        }
        BlockKind::Link { url } => format!(
            r#"<a href="{}" style="{css}">{content}</a>"#,
            escape_html(url)
        ),
        BlockKind::Checklist { checked } => {
            let checked = if *checked { "checked " } else { "" };
            format!(
                r#"<div style="display: flex; align-items: center;"><input type="checkbox" {checked}disabled /><span style="{css}">{content}</span></div>"#
            )
        }
        BlockKind::Unsupported => {
            tracing::debug!(id = %block.id(), "skipping unsupported block in HTML export");
            String::new()
        }
    }
}

/// Inline CSS for a style, listing only the attributes that are set.
pub fn style_to_css(style: &Style) -> String {
    let mut decls = Vec::new();
    if style.bold {
        decls.push("font-weight: bold;".to_string());
    }
    if style.italic {
        decls.push("font-style: italic;".to_string());
    }
    if style.underline {
        decls.push("text-decoration: underline;".to_string());
    }
    if let Some(size) = style.font_size {
        decls.push(format!("font-size: {size}px;"));
    }
    if let Some(color) = &style.color {
        decls.push(format!("color: {};", escape_html(color)));
    }
    if let Some(alignment) = style.alignment {
        decls.push(format!("text-align: {};", alignment.as_str()));
    }
    decls.join(" ")
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid regex"));
static IFRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe\s*>").expect("valid regex"));
static HANDLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\s*\bon\w+\s*=\s*"[^"]*""#).expect("valid regex"));
static JS_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));

/// Strip script and iframe elements, inline event handlers and
/// `javascript:` URLs from stored HTML.
pub fn sanitize_html(html: &str) -> String {
    let out = SCRIPT_RE.replace_all(html, "");
    let out = IFRAME_RE.replace_all(&out, "");
    let out = HANDLER_RE.replace_all(&out, "");
    JS_URL_RE.replace_all(&out, "").into_owned()
}
