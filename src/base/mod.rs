//! Foundation types for the refmark engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`DocId`] - Output document identifiers
//! - [`TextRange`], [`TextSize`] - Source offsets (byte offsets)
//! - [`LineIndex`] - Offset to line/column conversion
//! - [`Position`], [`Location`] - Human-facing source locations for diagnostics
//!
//! This module has NO dependencies on other refmark modules.

mod doc_id;
mod position;
mod span;

pub use doc_id::DocId;
pub use position::{Location, Position};
pub use span::{LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
