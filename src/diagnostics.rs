//! Diagnostics: user-facing error and warning reporting.
//!
//! Fatal resolution errors and batch consistency findings both end up as
//! [`Diagnostic`] values so a batch run can present one uniform list.

use smol_str::SmolStr;

use crate::base::Location;
use crate::error::{ResolveError, StoreError};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// The document containing this diagnostic.
    pub doc: SmolStr,
    /// Line (1-indexed; 0 when the finding has no source line).
    pub line: u32,
    /// Column (0-indexed).
    pub column: u32,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<SmolStr>,
    pub message: SmolStr,
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelatedInfo {
    pub doc: SmolStr,
    pub line: u32,
    pub message: SmolStr,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(location: &Location, message: impl Into<SmolStr>) -> Self {
        Self::new(location, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(location: &Location, message: impl Into<SmolStr>) -> Self {
        Self::new(location, Severity::Warning, message)
    }

    fn new(location: &Location, severity: Severity, message: impl Into<SmolStr>) -> Self {
        Self {
            doc: location.doc.clone(),
            line: location.line(),
            column: location.column(),
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(SmolStr::new_static(code));
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}: {}", self.doc, self.line, self.column, self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl From<&ResolveError> for Diagnostic {
    fn from(err: &ResolveError) -> Self {
        let code = match err {
            ResolveError::UnresolvedReference { .. } => codes::UNRESOLVED_REFERENCE,
            ResolveError::AmbiguousOverload { .. } => codes::AMBIGUOUS_OVERLOAD,
            ResolveError::MalformedScopeNesting { .. } => codes::MALFORMED_SCOPE_NESTING,
            ResolveError::NamingConventionViolation { .. } => codes::NAMING_CONVENTION,
            ResolveError::DescriptionStyle { .. } => codes::DESCRIPTION_STYLE,
        };
        let message = match err.token() {
            Some(token) => format!("{} (token '{token}')", strip_location(err)),
            None => strip_location(err),
        };
        Diagnostic::error(err.location(), message).with_code(code)
    }
}

impl From<ResolveError> for Diagnostic {
    fn from(err: ResolveError) -> Self {
        Diagnostic::from(&err)
    }
}

impl From<&StoreError> for Diagnostic {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::DuplicateScopeEntry {
                scope,
                name,
                location,
                first,
            } => Diagnostic::error(location, format!("duplicate entry '{name}' in {scope}"))
                .with_code(codes::DUPLICATE_DEFINITION)
                .with_related(RelatedInfo {
                    doc: first.doc.clone(),
                    line: first.line(),
                    message: SmolStr::new_static("first defined here"),
                }),
            other => Diagnostic::error(&Location::default(), other.to_string())
                .with_code(codes::MALFORMED_FOREST),
        }
    }
}

/// The error's message without its `doc:line:column: ` prefix or trailing token.
fn strip_location(err: &ResolveError) -> String {
    match err {
        ResolveError::UnresolvedReference { reason, .. } => reason.to_string(),
        ResolveError::AmbiguousOverload { reason, .. } => reason.to_string(),
        ResolveError::MalformedScopeNesting { .. } => "malformed scope nesting".to_string(),
        ResolveError::NamingConventionViolation { prefix, .. } => {
            format!("missed {prefix} prefixed")
        }
        ResolveError::DescriptionStyle { message, .. } => message.to_string(),
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Fatal resolution errors
/// - **W0001-W0099**: Batch consistency warnings
pub mod codes {
    /// Token names no declaration.
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
    /// Overloaded call matched no clone, or its parentheses are unbalanced.
    pub const AMBIGUOUS_OVERLOAD: &str = "E0002";
    /// More closing braces than opening braces in code text.
    pub const MALFORMED_SCOPE_NESTING: &str = "E0003";
    /// Two declarations share one scope key.
    pub const DUPLICATE_DEFINITION: &str = "E0004";
    /// Reserved `Sk`/`SK` prefix on a token that names nothing.
    pub const NAMING_CONVENTION: &str = "E0005";
    /// Parameter or return description breaks the house style.
    pub const DESCRIPTION_STYLE: &str = "E0006";
    /// The declaration forest could not be built.
    pub const MALFORMED_FOREST: &str = "E0007";

    /// Anchor defined but never linked to.
    pub const MISSING_ANCHOR_REFERENCE: &str = "W0001";
    /// Link to an anchor that no document defines.
    pub const MISSING_ANCHOR_DEFINITION: &str = "W0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics across a batch.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a fatal resolution error.
    pub fn resolve_error(&mut self, err: &ResolveError) {
        self.add(Diagnostic::from(err));
    }

    /// Add a forest build failure.
    pub fn store_error(&mut self, err: &StoreError) {
        self.add(Diagnostic::from(err));
    }

    /// Add a "missing ref" warning: `anchor` is defined in `doc` but never linked.
    pub fn missing_anchor_reference(&mut self, doc: &str, line: u32, anchor: &str) {
        self.add(
            Diagnostic::warning(
                &Location::new(doc, line, 0),
                format!("missing ref: '{anchor}'"),
            )
            .with_code(codes::MISSING_ANCHOR_REFERENCE),
        );
    }

    /// Add a "missing def" warning: `doc#fragment` is linked but never defined.
    pub fn missing_anchor_definition(&mut self, doc: &str, fragment: &str) {
        self.add(
            Diagnostic::warning(
                &Location::new(doc, 0, 0),
                format!("missing def: '{doc}#{fragment}'"),
            )
            .with_code(codes::MISSING_ANCHOR_DEFINITION),
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific document.
    pub fn diagnostics_for_doc(&self, doc: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.doc == doc).collect()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn count_with_code(&self, code: &str) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.code.as_deref() == Some(code))
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Move every diagnostic of `other` into this collector.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }

    /// Consume the collector, dropping exact repeats.
    pub fn finish(self) -> Vec<Diagnostic> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.diagnostics
            .into_iter()
            .filter(|d| seen.insert((d.doc.clone(), d.line, d.column, d.message.clone())))
            .collect()
    }
}
