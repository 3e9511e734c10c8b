//! Corpus-wide anchor consistency check.
//!
//! Every anchor defined should be linked somewhere, and every link should
//! land on a defined anchor. Both lists of a document are sorted and walked
//! side by side.

use std::cmp::Ordering;

use smol_str::SmolStr;

use super::ledger::{AnchorRecord, LedgerSnapshot};
use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::store::{DeclForest, DeclKind};

/// Outcome of [`run_consistency_check`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Anchors defined but never linked.
    pub missing_references: usize,
    /// Links to anchors that were never defined.
    pub missing_definitions: usize,
    pub documents_checked: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing_references == 0 && self.missing_definitions == 0
    }

    pub fn total(&self) -> usize {
        self.missing_references + self.missing_definitions
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Walk the ledger snapshot and report every unmatched anchor.
pub fn run_consistency_check(
    snapshot: &LedgerSnapshot,
    forest: &DeclForest,
    config: &EngineConfig,
) -> CheckReport {
    let mut checker = Checker {
        forest,
        config,
        collector: DiagnosticCollector::new(),
        report: CheckReport::default(),
        in_block: 0,
    };
    for doc in snapshot.documents() {
        let mut defs: Vec<&AnchorRecord> = snapshot
            .definitions
            .get(doc)
            .map(|d| d.iter().collect())
            .unwrap_or_default();
        let mut refs: Vec<SmolStr> = snapshot.references.get(doc).cloned().unwrap_or_default();
        defs.sort_by(|a, b| a.anchor.cmp(&b.anchor));
        refs.sort();
        checker.check_document(doc, &defs, &refs);
        checker.report.documents_checked += 1;
    }
    let Checker {
        collector,
        mut report,
        ..
    } = checker;
    report.diagnostics = collector.finish();
    tracing::info!(
        documents = report.documents_checked,
        missing_refs = report.missing_references,
        missing_defs = report.missing_definitions,
        "[CHECK] anchor consistency check complete"
    );
    report
}

struct Checker<'a> {
    forest: &'a DeclForest,
    config: &'a EngineConfig,
    collector: DiagnosticCollector,
    report: CheckReport,
    in_block: usize,
}

impl Checker<'_> {
    fn check_document(&mut self, doc: &str, defs: &[&AnchorRecord], refs: &[SmolStr]) {
        let (mut d, mut r) = (0, 0);
        loop {
            let order = match (defs.get(d), refs.get(r)) {
                (None, None) => break,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(def), Some(reference)) => def.anchor.as_str().cmp(reference.as_str()),
            };
            match order {
                Ordering::Less => {
                    let def = defs[d];
                    if !self.reference_exempt(doc, def, refs) {
                        self.collector
                            .missing_anchor_reference(doc, def.line, &def.anchor);
                        self.report.missing_references += 1;
                        self.counted(doc, &def.anchor, "missing ref");
                    }
                    d += 1;
                }
                Ordering::Greater => {
                    let fragment = &refs[r];
                    if !self.forest.indices().is_external(fragment) {
                        self.collector.missing_anchor_definition(doc, fragment);
                        self.report.missing_definitions += 1;
                        self.counted(doc, fragment, "missing def");
                    }
                    r += 1;
                }
                Ordering::Equal => {
                    d += 1;
                    r += 1;
                }
            }
        }
    }

    /// Parameters and incomplete declarations need no link. In the
    /// undocumented document a topic counts as linked when a relative is.
    fn reference_exempt(&self, doc: &str, def: &AnchorRecord, refs: &[SmolStr]) -> bool {
        if def.kind == DeclKind::Param || def.kind.incomplete_allowed() {
            return true;
        }
        if doc != self.config.undocumented_doc {
            return false;
        }
        let forest = self.forest;
        let Some(topic) = forest.indices().topic(&def.anchor) else {
            return false;
        };
        let topic_doc = forest.doc_name(forest.node(topic).doc);
        if !topic_doc.contains(self.config.undocumented_doc.as_str()) {
            return false;
        }
        forest
            .ancestors(topic)
            .any(|a| refs.iter().any(|r| *r == forest.node(a).name))
            || forest.subtree_named_in(topic, refs)
    }

    fn counted(&mut self, doc: &str, anchor: &str, what: &str) {
        tracing::warn!(doc, anchor, "[CHECK] {what}");
        self.in_block += 1;
        if self.in_block >= self.config.report_block {
            tracing::warn!(
                block = self.config.report_block,
                "[CHECK] {} anchor findings so far",
                self.report.total()
            );
            self.in_block = 0;
        }
    }
}
