//! Resolution modes and their failure policies.

/// How strictly a span of text is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionMode {
    /// Documentation prose; every miss is a defect.
    #[default]
    Prose,
    /// Prose without overload disambiguation; camelCase misses are tolerated.
    Simple,
    /// Prose that also links lowercase words and appends overload clone markers.
    Clone,
    /// Source code: braces move the lookup scope, quoted strings are opaque.
    Code,
    /// Formula text: markup punctuation is escaped, spaces do not break.
    Formula,
    /// Output that was already checked once; nothing is fatal.
    Permissive,
    /// Copied verbatim without resolution.
    Literal,
}

impl ResolutionMode {
    /// Unresolved tokens pass through as plain text.
    pub fn tolerates_unresolved(self) -> bool {
        matches!(self, Self::Code | Self::Formula | Self::Permissive | Self::Literal)
    }

    /// An unresolved `Sk`/`SK` token passes through as plain text.
    pub fn tolerates_reserved_prefix(self) -> bool {
        matches!(self, Self::Formula | Self::Permissive | Self::Literal)
    }

    /// A resolved name followed by `(` goes through overload disambiguation.
    pub fn disambiguates(self) -> bool {
        !matches!(self, Self::Simple | Self::Literal)
    }

    /// An unmatched overload falls back to the bare name.
    pub fn loose_overloads(self) -> bool {
        matches!(self, Self::Code | Self::Formula)
    }

    /// Labels keep their underscores and `()` suffix.
    pub fn is_code(self) -> bool {
        self == Self::Code
    }

    /// Mode for follow-up lookups made while scanning in this mode: a call
    /// retried as `name(...)`, or the word after a sentence-initial capital.
    pub fn follow_up(self) -> ResolutionMode {
        if self.tolerates_unresolved() {
            Self::Permissive
        } else {
            Self::Prose
        }
    }
}

impl std::fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Prose => "prose",
            Self::Simple => "simple",
            Self::Clone => "clone",
            Self::Code => "code",
            Self::Formula => "formula",
            Self::Permissive => "permissive",
            Self::Literal => "literal",
        };
        f.write_str(name)
    }
}
