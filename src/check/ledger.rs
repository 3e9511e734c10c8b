//! The anchor ledger: every anchor defined and every anchor linked to.
//!
//! One ledger lives for one batch. Documents generated in parallel each get
//! their own ledger, merged afterwards with [`ConsistencyLedger::merge`].

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::store::DeclKind;

/// An anchor emitted with `<a name='…'>`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorRecord {
    pub anchor: SmolStr,
    /// Kind the anchor is checked as; may differ from the declaration's own.
    pub kind: DeclKind,
    pub line: u32,
}

/// A link target `document#fragment` emitted with `<a href='…'>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorReference {
    pub document: SmolStr,
    pub fragment: SmolStr,
}

impl AnchorReference {
    /// Parse an href as seen from `requesting_doc`.
    ///
    /// `#frag` points into the requesting document, `doc#frag` into `doc`.
    /// Absolute `https://` links and hrefs without a fragment are not anchors.
    pub fn parse(requesting_doc: &str, href: &str) -> Option<Self> {
        if href.starts_with("https://") {
            return None;
        }
        let (document, fragment) = href.split_once('#')?;
        let document = if document.is_empty() {
            requesting_doc
        } else {
            document
        };
        Some(Self {
            document: SmolStr::new(document),
            fragment: SmolStr::new(fragment),
        })
    }
}

/// Everything recorded during a batch, grouped by document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerSnapshot {
    pub definitions: IndexMap<SmolStr, Vec<AnchorRecord>>,
    pub references: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl LedgerSnapshot {
    /// Documents with definitions or references, definitions first.
    pub fn documents(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.definitions.keys().chain(
            self.references
                .keys()
                .filter(|doc| !self.definitions.contains_key(*doc)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.references.is_empty()
    }
}

/// Accumulates anchor definitions and references.
#[derive(Clone, Debug, Default)]
pub struct ConsistencyLedger {
    definitions: IndexMap<SmolStr, IndexMap<SmolStr, AnchorRecord>>,
    references: IndexMap<SmolStr, IndexSet<SmolStr>>,
}

impl ConsistencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a batch with an empty ledger.
    pub fn begin(&mut self) {
        if !self.is_empty() {
            tracing::debug!(
                documents = self.definitions.len().max(self.references.len()),
                "[LEDGER] discarding entries from a previous batch"
            );
        }
        self.definitions.clear();
        self.references.clear();
    }

    /// Record an anchor defined in `doc`. The first record of an anchor wins.
    pub fn record_definition(&mut self, doc: &str, anchor: &str, kind: DeclKind, line: u32) {
        self.definitions
            .entry(SmolStr::new(doc))
            .or_default()
            .entry(SmolStr::new(anchor))
            .or_insert_with(|| AnchorRecord {
                anchor: SmolStr::new(anchor),
                kind,
                line,
            });
    }

    /// Record a link emitted by `requesting_doc`.
    pub fn record_reference(&mut self, requesting_doc: &str, href: &str) -> Option<AnchorReference> {
        let reference = AnchorReference::parse(requesting_doc, href)?;
        self.references
            .entry(reference.document.clone())
            .or_default()
            .insert(reference.fragment.clone());
        Some(reference)
    }

    /// Fold another ledger into this one.
    pub fn merge(&mut self, other: ConsistencyLedger) {
        for (doc, records) in other.definitions {
            let mine = self.definitions.entry(doc).or_default();
            for (anchor, record) in records {
                mine.entry(anchor).or_insert(record);
            }
        }
        for (doc, fragments) in other.references {
            self.references.entry(doc).or_default().extend(fragments);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.references.is_empty()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.values().map(IndexMap::len).sum()
    }

    pub fn reference_count(&self) -> usize {
        self.references.values().map(IndexSet::len).sum()
    }

    /// Take everything recorded so far, leaving the ledger empty.
    pub fn drain(&mut self) -> LedgerSnapshot {
        let definitions = std::mem::take(&mut self.definitions)
            .into_iter()
            .map(|(doc, records)| (doc, records.into_values().collect()))
            .collect();
        let references = std::mem::take(&mut self.references)
            .into_iter()
            .map(|(doc, fragments)| (doc, fragments.into_iter().collect()))
            .collect();
        LedgerSnapshot {
            definitions,
            references,
        }
    }
}
