//! Byte offsets and line/column conversion.

pub use text_size::{TextRange, TextSize};

use super::Position;

/// Maps byte offsets of one source buffer to line/column positions.
///
/// Lines are 1-indexed to match what markup authors see in their editors;
/// columns are 0-indexed byte columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from(offset as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Convert an offset to a position. Offsets past the end clamp to the last line.
    pub fn position(&self, offset: TextSize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = offset - self.line_starts[line];
        Position::new(line as u32 + 1, column.into())
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
