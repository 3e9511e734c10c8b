//! Forest construction.
//!
//! The markup parser drives a [`ForestBuilder`] top-down: documents first,
//! then top-level declarations, then children. Scope tables are filled as
//! nodes arrive so duplicate keys are reported at the offending node;
//! global indices and overload flags are computed by [`ForestBuilder::finish`].

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::forest::{DeclForest, DocumentInfo};
use super::index::IndexCategory;
use super::kind::DeclKind;
use super::node::{DeclId, DeclNode, OverloadFlags, ScopeTables};
use crate::base::DocId;
use crate::core::text_utils::strip_empty_parens;
use crate::error::StoreError;

/// Highest numeric suffix an overload clone may carry (`_2` through `_9`).
pub const MAX_CLONE_SUFFIX: u32 = 9;

#[derive(Debug, Default)]
pub struct ForestBuilder {
    forest: DeclForest,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an output document by its link stem.
    pub fn add_document(&mut self, name: impl Into<SmolStr>) -> DocId {
        self.push_document(name.into(), None)
    }

    pub fn add_document_with_source(
        &mut self,
        name: impl Into<SmolStr>,
        source: impl Into<String>,
    ) -> DocId {
        self.push_document(name.into(), Some(source.into()))
    }

    fn push_document(&mut self, name: SmolStr, source: Option<String>) -> DocId {
        let id = DocId::new(self.forest.docs.len() as u32);
        self.forest.docs.push(DocumentInfo { name, source });
        id
    }

    /// Add a top-level declaration.
    pub fn add_root(
        &mut self,
        doc: DocId,
        kind: DeclKind,
        name: &str,
        anchor: &str,
    ) -> Result<DeclId, StoreError> {
        if self.forest.document(doc).is_none() {
            return Err(StoreError::UnknownDocument(doc));
        }
        Ok(self.push_node(doc, None, kind, name, anchor, false))
    }

    /// Add a declaration under `parent`, registering it in the nearest
    /// enclosing root's scope table.
    pub fn add_child(
        &mut self,
        parent: DeclId,
        kind: DeclKind,
        name: &str,
        anchor: &str,
    ) -> Result<DeclId, StoreError> {
        let doc = self.existing(parent)?.doc;
        let owner = self.forest.root_of(parent);
        if let Some(owner) = owner {
            let taken = table_for(self.tables_mut(owner)?, kind)
                .and_then(|table| table.get(name).copied());
            if let Some(first) = taken {
                let scope = self.forest.node(owner).name.clone();
                return Err(StoreError::duplicate(
                    scope,
                    name,
                    self.forest.location(parent),
                    self.forest.location(first),
                ));
            }
        }
        let id = self.push_node(doc, Some(parent), kind, name, anchor, false);
        if let Some(owner) = owner {
            if let Some(table) = table_for(self.tables_mut(owner)?, kind) {
                table.insert(SmolStr::new(name), id);
            }
        }
        Ok(id)
    }

    /// Add a declaration known only from native headers.
    ///
    /// It has no anchor id and never enters the scope tables; it is reachable
    /// through [`NativeIndex`](super::NativeIndex) by `qualified_name`.
    pub fn add_native(
        &mut self,
        parent: DeclId,
        kind: DeclKind,
        qualified_name: &str,
        elided_block: Option<String>,
    ) -> Result<DeclId, StoreError> {
        let doc = self.existing(parent)?.doc;
        let id = self.push_node(doc, Some(parent), kind, qualified_name, "", true);
        if let Some(block) = elided_block {
            self.forest.native_blocks.insert(id, block);
        }
        Ok(id)
    }

    /// Record a method's parameter list, e.g. `(const SkRect& rect)`.
    pub fn set_signature(&mut self, id: DeclId, signature: &str) -> Result<(), StoreError> {
        self.existing(id)?;
        self.forest.nodes[id.index()].signature = Some(SmolStr::new(signature.trim()));
        Ok(())
    }

    /// Record where a declaration's content sits in its document source.
    pub fn set_range(&mut self, id: DeclId, start: TextSize, end: TextSize, line: u32) {
        if let Some(node) = self.forest.nodes.get_mut(id.index()) {
            node.range = TextRange::new(start, end);
            node.line = line;
        }
    }

    fn existing(&self, id: DeclId) -> Result<&DeclNode, StoreError> {
        self.forest.get(id).ok_or_else(|| StoreError::NotARoot {
            name: SmolStr::new(id.to_string()),
        })
    }

    fn tables_mut(&mut self, root: DeclId) -> Result<&mut ScopeTables, StoreError> {
        let node = &mut self.forest.nodes[root.index()];
        let name = node.name.clone();
        node.scope.as_mut().ok_or(StoreError::NotARoot { name })
    }

    fn push_node(
        &mut self,
        doc: DocId,
        parent: Option<DeclId>,
        kind: DeclKind,
        name: &str,
        anchor: &str,
        native: bool,
    ) -> DeclId {
        let id = DeclId(self.forest.nodes.len() as u32);
        self.forest.nodes.push(DeclNode {
            kind,
            name: SmolStr::new(name),
            anchor: SmolStr::new(anchor),
            range: TextRange::default(),
            line: 0,
            doc,
            parent,
            children: Vec::new(),
            overload: OverloadFlags::default(),
            signature: None,
            scope: (kind.is_root() && !native).then(ScopeTables::default),
            native,
        });
        if let Some(parent) = parent {
            self.forest.nodes[parent.index()].children.push(id);
        }
        id
    }

    /// Build the global indices, mark overload families and freeze the forest.
    pub fn finish(mut self) -> Result<DeclForest, StoreError> {
        self.index_declarations()?;
        self.mark_overloads()?;
        tracing::debug!(
            nodes = self.forest.nodes.len(),
            documents = self.forest.docs.len(),
            "[STORE] forest built"
        );
        Ok(self.forest)
    }

    fn index_declarations(&mut self) -> Result<(), StoreError> {
        for i in 0..self.forest.nodes.len() {
            let id = DeclId(i as u32);
            let node = &self.forest.nodes[i];
            if node.native {
                let name = node.name.clone();
                self.forest.indices.insert_native(name, id);
                continue;
            }
            let in_enum = node
                .parent
                .is_some_and(|p| matches!(self.forest.node(p).kind, DeclKind::Enum | DeclKind::EnumClass));
            let Some(category) = IndexCategory::for_kind(node.kind, in_enum) else {
                continue;
            };
            let name = node.name.clone();
            let anchor = node.anchor.clone();
            if let Err(first) = self.forest.indices.insert(category, name.clone(), id) {
                return Err(StoreError::duplicate(
                    category.as_str(),
                    name,
                    self.forest.location(id),
                    self.forest.location(first),
                ));
            }
            if category == IndexCategory::Topic && !anchor.is_empty() && anchor != name {
                self.forest.indices.insert_topic_alias(anchor, id);
            }
        }
        Ok(())
    }

    fn mark_overloads(&mut self) -> Result<(), StoreError> {
        let mut families = Vec::new();
        for (id, node) in self.forest.iter() {
            if !node.kind.is_method_like() || node.native {
                continue;
            }
            let Some((base, suffix)) = numeric_suffix(strip_empty_parens(&node.name)) else {
                continue;
            };
            let Some(base_id) = self.sibling_named(id, base) else {
                continue;
            };
            if suffix > MAX_CLONE_SUFFIX {
                return Err(StoreError::TooManyClones {
                    base: SmolStr::new(base),
                    name: node.name.clone(),
                });
            }
            families.push((base_id, id));
        }
        for (base, clone) in families {
            self.forest.nodes[base.index()].overload.has_clones = true;
            self.forest.nodes[clone.index()].overload.is_clone = true;
        }
        Ok(())
    }

    /// A method next to `id` whose name without parens is `base`.
    fn sibling_named(&self, id: DeclId, base: &str) -> Option<DeclId> {
        let siblings: Vec<DeclId> = match self.forest.node(id).parent {
            Some(parent) => self.forest.node(parent).children.clone(),
            None => self
                .forest
                .iter()
                .filter(|(_, n)| n.parent.is_none())
                .map(|(i, _)| i)
                .collect(),
        };
        siblings.into_iter().find(|&s| {
            let sibling = self.forest.node(s);
            s != id && sibling.kind.is_method_like() && sibling.bare_name() == base
        })
    }
}

/// The table of a root that a child of `kind` registers in.
fn table_for(tables: &mut ScopeTables, kind: DeclKind) -> Option<&mut IndexMap<SmolStr, DeclId>> {
    if kind.is_root() {
        Some(&mut tables.branches)
    } else if kind.is_scope_leaf() {
        Some(&mut tables.leaves)
    } else {
        None
    }
}

/// Split `name_N` into `("name", N)` for any run of digits with N >= 2.
fn numeric_suffix(name: &str) -> Option<(&str, u32)> {
    let (base, digits) = name.rsplit_once('_')?;
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    (n >= 2).then_some((base, n))
}
