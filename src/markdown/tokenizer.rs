//! Live markdown tokenizer.
//!
//! Splits raw note text into formatted spans for display while the user
//! types. The source text is never modified; the spans are recomputed from
//! scratch after every change.

use serde::Serialize;

/// Formatting inferred for one span. A span carries exactly one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    #[default]
    Plain,
    Bold,
    Italic,
    Heading,
    Code,
}

/// A run of text with one inferred formatting, markers excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSpan {
    pub text: String,
    pub kind: SpanKind,
}

impl FormattedSpan {
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    pub fn is_bold(&self) -> bool {
        self.kind == SpanKind::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.kind == SpanKind::Italic
    }

    pub fn is_heading(&self) -> bool {
        self.kind == SpanKind::Heading
    }

    pub fn is_code(&self) -> bool {
        self.kind == SpanKind::Code
    }
}

/// Tokenize `text` into display spans.
///
/// Markers are tried at the cursor in priority order: `**bold**`,
/// `*italic*`, `_italic_`, `# heading` (to end of line) and `` `code` ``.
/// A delimited marker only counts when its closer appears later in the
/// text; otherwise the marker is literal text and scanning continues after
/// it. Consecutive plain text is merged into a single span.
///
/// # Example
///
/// ```
/// use marknote::markdown::{tokenize, FormattedSpan, SpanKind};
///
/// let spans = tokenize("say **hi**");
/// assert_eq!(spans[0], FormattedSpan::plain("say "));
/// assert_eq!(spans[1], FormattedSpan::new("hi", SpanKind::Bold));
/// ```
pub fn tokenize(text: &str) -> Vec<FormattedSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if rest.starts_with("**") {
            match delimited(rest, "**") {
                Some((inner, consumed)) => {
                    push_styled(&mut spans, &mut plain, inner, SpanKind::Bold);
                    pos += consumed;
                }
                None => {
                    // Unclosed bold never falls back to italic.
                    plain.push_str("**");
                    pos += 2;
                }
            }
            continue;
        }

        if rest.starts_with('*') {
            pos += styled_or_literal(&mut spans, &mut plain, rest, "*", SpanKind::Italic);
            continue;
        }

        if rest.starts_with('_') {
            if opens_underscore(text, pos) {
                pos += styled_or_literal(&mut spans, &mut plain, rest, "_", SpanKind::Italic);
            } else {
                plain.push('_');
                pos += 1;
            }
            continue;
        }

        if let Some(body) = rest.strip_prefix("# ") {
            let (heading, consumed) = match body.find('\n') {
                Some(end) => (&body[..end], 2 + end + 1),
                None => (body, rest.len()),
            };
            push_styled(&mut spans, &mut plain, heading, SpanKind::Heading);
            pos += consumed;
            continue;
        }

        if rest.starts_with('`') {
            pos += styled_or_literal(&mut spans, &mut plain, rest, "`", SpanKind::Code);
            continue;
        }

        let first_len = rest.chars().next().map_or(1, char::len_utf8);
        let next = next_marker(rest).unwrap_or(rest.len()).max(first_len);
        plain.push_str(&rest[..next]);
        pos += next;
    }

    flush_plain(&mut spans, &mut plain);
    spans
}

/// Concatenated text of all spans, i.e. the source with markers removed.
pub fn visible_text(spans: &[FormattedSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// If `rest` opens with `marker` and a closer follows, returns the inner
/// text and the number of bytes consumed including both markers.
fn delimited<'a>(rest: &'a str, marker: &str) -> Option<(&'a str, usize)> {
    let body = rest.strip_prefix(marker)?;
    let end = body.find(marker)?;
    Some((&body[..end], marker.len() + end + marker.len()))
}

fn styled_or_literal(
    spans: &mut Vec<FormattedSpan>,
    plain: &mut String,
    rest: &str,
    marker: &str,
    kind: SpanKind,
) -> usize {
    if let Some((inner, consumed)) = delimited(rest, marker) {
        push_styled(spans, plain, inner, kind);
        consumed
    } else {
        plain.push_str(marker);
        marker.len()
    }
}

/// An underscore preceded by a letter or digit is part of a word.
fn opens_underscore(text: &str, pos: usize) -> bool {
    !text[..pos]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric)
}

fn next_marker(rest: &str) -> Option<usize> {
    let single = rest.find(['*', '_', '`']);
    let heading = rest.find("# ");
    match (single, heading) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn push_styled(spans: &mut Vec<FormattedSpan>, plain: &mut String, text: &str, kind: SpanKind) {
    flush_plain(spans, plain);
    spans.push(FormattedSpan::new(text, kind));
}

fn flush_plain(spans: &mut Vec<FormattedSpan>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(FormattedSpan::plain(std::mem::take(plain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kinds(spans: &[FormattedSpan]) -> Vec<SpanKind> {
        spans.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_empty_text_has_no_spans() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_plain_text_is_single_span() {
        assert_eq!(tokenize("hello world"), vec![FormattedSpan::plain("hello world")]);
    }

    #[test]
    fn test_bold_span_excludes_markers() {
        let spans = tokenize("a **b** c");
        assert_eq!(
            spans,
            vec![
                FormattedSpan::plain("a "),
                FormattedSpan::new("b", SpanKind::Bold),
                FormattedSpan::plain(" c"),
            ]
        );
    }

    #[test]
    fn test_unterminated_bold_stays_plain() {
        assert_eq!(tokenize("a **b"), vec![FormattedSpan::plain("a **b")]);
    }

    #[test]
    fn test_unterminated_italic_does_not_swallow_rest() {
        let spans = tokenize("x *y `z`");
        assert_eq!(
            spans,
            vec![
                FormattedSpan::plain("x *y "),
                FormattedSpan::new("z", SpanKind::Code),
            ]
        );
    }

    #[test]
    fn test_star_italic() {
        let spans = tokenize("*soft*");
        assert_eq!(spans, vec![FormattedSpan::new("soft", SpanKind::Italic)]);
        assert!(spans[0].is_italic());
    }

    #[test]
    fn test_underscore_italic_from_toolbar() {
        let spans = tokenize("an _emphasis_ here");
        assert_eq!(kinds(&spans), vec![SpanKind::Plain, SpanKind::Italic, SpanKind::Plain]);
        assert_eq!(spans[1].text, "emphasis");
    }

    #[test]
    fn test_intraword_underscores_stay_plain() {
        assert_eq!(
            tokenize("call snake_case_name now"),
            vec![FormattedSpan::plain("call snake_case_name now")]
        );
    }

    #[test]
    fn test_heading_runs_to_end_of_line() {
        let spans = tokenize("# Title\nbody");
        assert_eq!(
            spans,
            vec![
                FormattedSpan::new("Title", SpanKind::Heading),
                FormattedSpan::plain("body"),
            ]
        );
    }

    #[test]
    fn test_heading_at_end_of_input() {
        assert_eq!(tokenize("# Last"), vec![FormattedSpan::new("Last", SpanKind::Heading)]);
    }

    #[test]
    fn test_hash_without_space_is_plain() {
        assert_eq!(tokenize("#tag"), vec![FormattedSpan::plain("#tag")]);
    }

    #[test]
    fn test_inline_code() {
        let spans = tokenize("run `cargo` now");
        assert_eq!(spans[1], FormattedSpan::new("cargo", SpanKind::Code));
        assert!(spans[1].is_code());
    }

    #[test]
    fn test_bold_takes_priority_over_italic() {
        let spans = tokenize("**x**");
        assert_eq!(spans, vec![FormattedSpan::new("x", SpanKind::Bold)]);
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let spans = tokenize("café **thé** ünï");
        assert_eq!(spans[0].text, "café ");
        assert_eq!(spans[1], FormattedSpan::new("thé", SpanKind::Bold));
        assert_eq!(spans[2].text, " ünï");
    }

    #[test]
    fn test_visible_text_strips_markers() {
        let spans = tokenize("**a** *b* `c`");
        assert_eq!(visible_text(&spans), "a b c");
    }

    proptest! {
        #[test]
        fn tokenize_is_total(text in "\\PC*") {
            let spans = tokenize(&text);
            let visible: usize = spans.iter().map(|s| s.text.len()).sum();
            prop_assert!(visible <= text.len());
        }

        #[test]
        fn marker_free_text_is_one_plain_span(text in "[a-zA-Z0-9 .,\n]{1,64}") {
            prop_assert_eq!(tokenize(&text), vec![FormattedSpan::plain(text.clone())]);
        }

        #[test]
        fn no_adjacent_plain_spans(text in "[a-z*_`# \n]{0,64}") {
            let spans = tokenize(&text);
            for pair in spans.windows(2) {
                prop_assert!(!(pair[0].kind == SpanKind::Plain && pair[1].kind == SpanKind::Plain));
            }
        }
    }
}
