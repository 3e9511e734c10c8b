/// Position tracking for diagnostics
///
/// Every fatal diagnostic names the document, the line and the column of the
/// offending token so the defect can be found again in the original markup.
use smol_str::SmolStr;

/// A position in source text (1-indexed line, 0-indexed column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A position inside a named document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub doc: SmolStr,
    pub position: Position,
}

impl Location {
    pub fn new(doc: impl Into<SmolStr>, line: u32, column: u32) -> Self {
        Self {
            doc: doc.into(),
            position: Position::new(line, column),
        }
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.doc, self.position.line, self.position.column
        )
    }
}
