//! Resolution context and candidate tokens.

use crate::base::{DocId, Location};
use crate::store::DeclId;

/// Where a token sits in the declaration forest.
///
/// Contexts are plain values. Code blocks push a modified copy on the scope
/// stack instead of mutating a shared "current root".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveContext {
    /// Document being generated.
    pub doc: DocId,
    /// Innermost class, struct or topic being documented.
    pub root: Option<DeclId>,
    /// Innermost subtopic being documented.
    pub subtopic: Option<DeclId>,
    /// Method whose description is being generated.
    pub method: Option<DeclId>,
    /// Enum class whose constants are in scope.
    pub enum_class: Option<DeclId>,
}

impl ResolveContext {
    pub fn new(doc: DocId) -> Self {
        Self {
            doc,
            root: None,
            subtopic: None,
            method: None,
            enum_class: None,
        }
    }

    pub fn with_root(mut self, root: DeclId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_subtopic(mut self, subtopic: DeclId) -> Self {
        self.subtopic = Some(subtopic);
        self
    }

    pub fn with_method(mut self, method: DeclId) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_enum_class(mut self, enum_class: DeclId) -> Self {
        self.enum_class = Some(enum_class);
        self
    }
}

/// A candidate reference as found in the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Character immediately before the token, if any.
    pub preceding: Option<char>,
    pub location: Location,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, location: Location) -> Self {
        Self {
            text,
            preceding: None,
            location,
        }
    }

    pub fn preceded_by(mut self, preceding: Option<char>) -> Self {
        self.preceding = preceding;
        self
    }

    /// Same position, different spelling.
    pub fn respell<'b>(&self, text: &'b str) -> Token<'b> {
        Token {
            text,
            preceding: self.preceding,
            location: self.location.clone(),
        }
    }
}
