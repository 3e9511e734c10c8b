//! Batch orchestration: generating many documents against one forest.
//!
//! A [`Batch`] owns the anchor ledger for one run. Each document is
//! generated through a [`DocumentSession`]; a fatal error fails that
//! document only. [`Batch::finish`] runs the anchor consistency check over
//! everything the documents recorded.
//!
//! ```text
//! Batch::begin
//!   ├─ document(doc) → DocumentSession → scan / resolve_out / link / define / lint → finish
//!   └─ ...
//! Batch::finish → BatchReport { documents, diagnostics, check }
//! ```

mod session;

pub use session::{DocumentOutcome, DocumentSession};

use rayon::prelude::*;

use crate::base::DocId;
use crate::check::{CheckReport, ConsistencyLedger, run_consistency_check};
use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::error::ResolveError;
use crate::resolve::Resolver;
use crate::store::{DeclForest, NativeIndex};

/// Mutable results shared by the sessions of one batch.
#[derive(Debug, Default)]
pub(crate) struct BatchState {
    ledger: ConsistencyLedger,
    diagnostics: DiagnosticCollector,
    documents: Vec<DocumentOutcome>,
}

impl BatchState {
    fn merge(&mut self, other: BatchState) {
        self.ledger.merge(other.ledger);
        self.diagnostics.extend(other.diagnostics);
        self.documents.extend(other.documents);
    }
}

/// Result of a whole batch.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
    /// Fatal errors of failed documents, then consistency findings.
    pub diagnostics: Vec<Diagnostic>,
    pub check: CheckReport,
}

impl BatchReport {
    pub fn failed_documents(&self) -> impl Iterator<Item = &DocumentOutcome> + '_ {
        self.documents.iter().filter(|d| d.failed)
    }

    /// No document failed and every anchor is consistent.
    pub fn is_clean(&self) -> bool {
        self.failed_documents().next().is_none() && self.check.is_clean()
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One generation run over a forest.
pub struct Batch<'a> {
    forest: &'a DeclForest,
    native: &'a dyn NativeIndex,
    config: EngineConfig,
    state: BatchState,
}

impl<'a> Batch<'a> {
    pub fn new(forest: &'a DeclForest, config: EngineConfig) -> Self {
        Self {
            forest,
            native: forest,
            config,
            state: BatchState::default(),
        }
    }

    /// Resolve native-only names in code blocks through `native`.
    pub fn with_native(mut self, native: &'a dyn NativeIndex) -> Self {
        self.native = native;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn forest(&self) -> &'a DeclForest {
        self.forest
    }

    fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.forest).with_native(self.native)
    }

    /// Start the batch with an empty ledger.
    pub fn begin(&mut self) {
        self.state.ledger.begin();
        self.state.diagnostics.clear();
        self.state.documents.clear();
        tracing::info!(
            documents = self.forest.documents().count(),
            declarations = self.forest.len(),
            "[BATCH] begin"
        );
    }

    /// Open a session for `doc`.
    pub fn document(&mut self, doc: DocId) -> DocumentSession<'_, 'a> {
        let resolver = self.resolver();
        DocumentSession::new(resolver, &self.config, &mut self.state, doc)
    }

    /// Generate `docs` on the rayon pool, each with its own ledger.
    ///
    /// `generate` runs once per document. Ledgers and outcomes are merged in
    /// the order of `docs`, so the result does not depend on scheduling.
    /// Documents whose closure fails yield `None`.
    pub fn run_parallel<T, F>(&mut self, docs: &[DocId], generate: F) -> Vec<Option<T>>
    where
        T: Send,
        F: Fn(&mut DocumentSession<'_, 'a>) -> Result<T, ResolveError> + Sync,
    {
        let resolver = self.resolver();
        let config = &self.config;
        let results: Vec<(BatchState, Option<T>)> = docs
            .par_iter()
            .map(|&doc| {
                let mut state = BatchState::default();
                let mut session = DocumentSession::new(resolver, config, &mut state, doc);
                let value = generate(&mut session).ok();
                session.finish();
                (state, value)
            })
            .collect();
        results
            .into_iter()
            .map(|(state, value)| {
                self.state.merge(state);
                value
            })
            .collect()
    }

    /// Drain the ledger and run the anchor consistency check.
    pub fn finish(mut self) -> BatchReport {
        let snapshot = self.state.ledger.drain();
        let check = run_consistency_check(&snapshot, self.forest, &self.config);
        let mut diagnostics = self.state.diagnostics.finish();
        diagnostics.extend(check.diagnostics.iter().cloned());
        let report = BatchReport {
            documents: self.state.documents,
            diagnostics,
            check,
        };
        tracing::info!(
            documents = report.documents.len(),
            failed = report.failed_documents().count(),
            findings = report.check.total(),
            "[BATCH] finish"
        );
        report
    }
}
