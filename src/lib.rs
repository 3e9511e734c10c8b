//! # refmark-base
//!
//! Reference resolution and link generation for cross-linked API
//! documentation markup.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch     → Document sessions, parallel generation, batch report
//!   ↓
//! scan      → Reference scanner, brace scopes, formula escaping
//!   ↓
//! link      → Anchor targets, labels, clone markers
//! check     → Anchor ledger, consistency check, description lint
//!   ↓
//! resolve   → Resolver, naming heuristics, overload disambiguation
//!   ↓
//! store     → Declaration forest, scope tables, global indices
//!   ↓
//! base/core → Primitives (DocId, TextRange, Location, word classes)
//! ```

// ============================================================================
// MODULES (dependency order: base → store → resolve → link/check → scan → batch)
// ============================================================================

/// Foundation types: DocId, TextRange, Location
pub mod base;

/// Text classification helpers
pub mod core;

/// Error types for resolution and forest construction
pub mod error;

/// Engine configuration
pub mod config;

/// User-facing diagnostics
pub mod diagnostics;

/// Declaration store: the immutable forest of markup declarations
pub mod store;

/// Symbol resolution and overload disambiguation
pub mod resolve;

/// Link targets and labels
pub mod link;

/// Anchor ledger and corpus-wide checks
pub mod check;

/// Reference scanning over text spans
pub mod scan;

/// Per-document sessions and batch runs
pub mod batch;

// Re-export foundation types
pub use base::{DocId, LineIndex, Location, Position, TextRange, TextSize};

// Re-export the main entry points
pub use batch::{Batch, BatchReport, DocumentOutcome, DocumentSession};
pub use check::{CheckReport, ConsistencyLedger, run_consistency_check};
pub use config::EngineConfig;
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity};
pub use error::{OverloadFailure, ResolveError, StoreError};
pub use link::{AnchorTarget, Link, LinkBuilder};
pub use resolve::{ResolutionMode, ResolveContext, ResolveResult, Resolver, Token};
pub use scan::{RenderedText, Scanner, SourceSpan};
pub use store::{DeclForest, DeclId, DeclKind, ForestBuilder, NativeIndex};
