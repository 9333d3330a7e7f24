//! Markdown tokenizing for live-formatted display.

mod tokenizer;

pub use tokenizer::{FormattedSpan, SpanKind, tokenize, visible_text};
