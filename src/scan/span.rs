//! Text spans handed to the scanner.

use smol_str::SmolStr;

use crate::base::{LineIndex, Location, TextSize};

/// A run of documentation text from one document.
///
/// Offsets inside the span are byte offsets into `text`; `first_line` is the
/// document line the span starts on, so locations point into the document.
#[derive(Debug, Clone)]
pub struct SourceSpan<'t> {
    pub text: &'t str,
    doc: SmolStr,
    first_line: u32,
    lines: LineIndex,
}

impl<'t> SourceSpan<'t> {
    pub fn new(doc: impl Into<SmolStr>, text: &'t str, first_line: u32) -> Self {
        Self {
            text,
            doc: doc.into(),
            first_line: first_line.max(1),
            lines: LineIndex::new(text),
        }
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Document location of byte `offset` in the span.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.text.len());
        let position = self.lines.position(TextSize::from(offset as u32));
        Location::new(
            self.doc.clone(),
            self.first_line + position.line - 1,
            position.column,
        )
    }

    /// The same span with `end` bytes kept.
    pub fn truncated(&self, end: usize) -> SourceSpan<'t> {
        let end = end.min(self.text.len());
        SourceSpan {
            text: &self.text[..end],
            doc: self.doc.clone(),
            first_line: self.first_line,
            lines: LineIndex::new(&self.text[..end]),
        }
    }
}
