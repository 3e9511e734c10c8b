//! Reference scanning: finding symbol references in text spans.
//!
//! - [`Scanner`] tokenizes a [`SourceSpan`] and substitutes links.
//! - [`ScopeStack`] tracks brace nesting in code blocks.
//! - [`escape_formula`] and [`normalize_paragraphs`] shape text around the
//!   resolved references.

mod escape;
mod paragraph;
mod scanner;
mod scope_stack;
mod span;

pub use escape::escape_formula;
pub use paragraph::normalize_paragraphs;
pub use scanner::{RenderedText, Scanner};
pub use scope_stack::{ScopeFrame, ScopeStack};
pub use span::SourceSpan;
