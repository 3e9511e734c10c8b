//! Error types for reference resolution and forest construction.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Location;

/// Why the overload disambiguator gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverloadFailure {
    /// Every numbered alternate exists and none matched the argument list.
    TooManyAlternates,
    /// The argument list has no balanced closing parenthesis.
    UnbalancedParens,
}

impl std::fmt::Display for OverloadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverloadFailure::TooManyAlternates => f.write_str("too many alternates"),
            OverloadFailure::UnbalancedParens => f.write_str("missing close paren"),
        }
    }
}

/// Fatal errors raised while resolving a span of text.
///
/// Scanning stops at the first one; the caller decides whether the
/// surrounding document or batch carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A candidate token matched no declaration in a strict mode.
    #[error("{location}: {reason}: '{token}'")]
    UnresolvedReference {
        token: SmolStr,
        location: Location,
        reason: SmolStr,
    },

    /// An overloaded method call could not be pinned to one declaration.
    #[error("{location}: {reason}: '{token}'")]
    AmbiguousOverload {
        token: SmolStr,
        location: Location,
        reason: OverloadFailure,
    },

    /// A closing brace in code text had no matching opening brace.
    #[error("{location}: malformed scope nesting")]
    MalformedScopeNesting { location: Location },

    /// A token carries a reserved prefix but names nothing.
    #[error("{location}: missed {prefix} prefixed: '{token}'")]
    NamingConventionViolation {
        token: SmolStr,
        location: Location,
        prefix: SmolStr,
    },

    /// A parameter or return description breaks the house style.
    #[error("{location}: {message}")]
    DescriptionStyle { location: Location, message: SmolStr },
}

impl ResolveError {
    /// Create an unresolved reference error.
    pub fn unresolved(
        token: impl Into<SmolStr>,
        location: Location,
        reason: impl Into<SmolStr>,
    ) -> Self {
        Self::UnresolvedReference {
            token: token.into(),
            location,
            reason: reason.into(),
        }
    }

    /// Create an ambiguous overload error.
    pub fn ambiguous(token: impl Into<SmolStr>, location: Location, reason: OverloadFailure) -> Self {
        Self::AmbiguousOverload {
            token: token.into(),
            location,
            reason,
        }
    }

    /// Create a naming convention error.
    pub fn naming(token: impl Into<SmolStr>, location: Location, prefix: impl Into<SmolStr>) -> Self {
        Self::NamingConventionViolation {
            token: token.into(),
            location,
            prefix: prefix.into(),
        }
    }

    /// Create a description style error.
    pub fn style(location: Location, message: impl Into<SmolStr>) -> Self {
        Self::DescriptionStyle {
            location,
            message: message.into(),
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::UnresolvedReference { location, .. }
            | Self::AmbiguousOverload { location, .. }
            | Self::MalformedScopeNesting { location }
            | Self::NamingConventionViolation { location, .. }
            | Self::DescriptionStyle { location, .. } => location,
        }
    }

    /// The offending token, when the error is about one.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::UnresolvedReference { token, .. }
            | Self::AmbiguousOverload { token, .. }
            | Self::NamingConventionViolation { token, .. } => Some(token),
            Self::MalformedScopeNesting { .. } | Self::DescriptionStyle { .. } => None,
        }
    }

    /// True for errors that mean "this token names nothing".
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference { .. } | Self::NamingConventionViolation { .. }
        )
    }
}

/// Defects in the declaration forest handed over by the markup parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Two declarations claim the same key in one scope table or index.
    ///
    /// `location` is where the rejected declaration was added, `first` the
    /// declaration already holding the key.
    #[error("{location}: duplicate entry '{name}' in {scope}")]
    DuplicateScopeEntry {
        scope: SmolStr,
        name: SmolStr,
        location: Location,
        first: Location,
    },

    /// An overload family numbers its clones past the last allowed suffix.
    #[error("too many clones of '{base}': '{name}'")]
    TooManyClones { base: SmolStr, name: SmolStr },

    /// A declaration was expected to own a scope table but does not.
    #[error("'{name}' is not a root declaration")]
    NotARoot { name: SmolStr },

    /// A declaration refers to a document that was never registered.
    #[error("unknown document {0}")]
    UnknownDocument(crate::base::DocId),
}

impl StoreError {
    pub fn duplicate(
        scope: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        location: Location,
        first: Location,
    ) -> Self {
        Self::DuplicateScopeEntry {
            scope: scope.into(),
            name: name.into(),
            location,
            first,
        }
    }
}
