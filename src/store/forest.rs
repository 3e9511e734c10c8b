//! The immutable declaration forest.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::index::GlobalIndices;
use super::kind::DeclKind;
use super::node::{DeclId, DeclNode, ScopeTables};
use crate::base::{DocId, Location};

/// An output document known to the forest.
#[derive(Clone, Debug)]
pub struct DocumentInfo {
    /// Stem used as link prefix, e.g. `SkPaint_Reference`.
    pub name: SmolStr,
    /// Markup source the declaration ranges index into, when available.
    pub source: Option<String>,
}

/// Arena of declarations plus the global indices over them.
///
/// Built once by [`ForestBuilder`](super::ForestBuilder); read-only afterwards,
/// so it can be shared freely across threads.
#[derive(Clone, Debug, Default)]
pub struct DeclForest {
    pub(crate) nodes: Vec<DeclNode>,
    pub(crate) docs: Vec<DocumentInfo>,
    pub(crate) indices: GlobalIndices,
    /// Elided code blocks for native-only declarations.
    pub(crate) native_blocks: FxHashMap<DeclId, String>,
}

impl DeclForest {
    /// Get a node by id.
    ///
    /// Ids are only handed out by the builder that produced this forest, so
    /// every id is in bounds.
    pub fn node(&self, id: DeclId) -> &DeclNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: DeclId) -> Option<&DeclNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &DeclNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (DeclId(i as u32), node))
    }

    pub fn indices(&self) -> &GlobalIndices {
        &self.indices
    }

    // ========================================================================
    // Documents
    // ========================================================================

    pub fn document(&self, doc: DocId) -> Option<&DocumentInfo> {
        self.docs.get(doc.index())
    }

    pub fn doc_name(&self, doc: DocId) -> &str {
        self.document(doc).map_or("", |info| info.name.as_str())
    }

    pub fn doc_by_name(&self, name: &str) -> Option<DocId> {
        self.docs
            .iter()
            .position(|info| info.name == name)
            .map(|i| DocId::new(i as u32))
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocId, &DocumentInfo)> + '_ {
        self.docs
            .iter()
            .enumerate()
            .map(|(i, info)| (DocId::new(i as u32), info))
    }

    /// Source text covered by a declaration's content range.
    pub fn content(&self, id: DeclId) -> Option<&str> {
        let node = self.node(id);
        let source = self.document(node.doc)?.source.as_deref()?;
        source.get(std::ops::Range::<usize>::from(node.range))
    }

    pub fn location(&self, id: DeclId) -> Location {
        let node = self.node(id);
        Location::new(self.doc_name(node.doc), node.line, 0)
    }

    // ========================================================================
    // Tree navigation
    // ========================================================================

    pub fn parent(&self, id: DeclId) -> Option<DeclId> {
        self.node(id).parent
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// `id` followed by its ancestors.
    pub fn self_and_ancestors(&self, id: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        std::iter::successors(Some(id), move |&p| self.parent(p))
    }

    /// Nearest class or struct strictly above `id`.
    pub fn cs_parent(&self, id: DeclId) -> Option<DeclId> {
        self.ancestors(id)
            .find(|&a| matches!(self.node(a).kind, DeclKind::Class | DeclKind::Struct))
    }

    /// Nearest root at or above `id`.
    pub fn root_of(&self, id: DeclId) -> Option<DeclId> {
        self.self_and_ancestors(id).find(|&a| self.node(a).is_root())
    }

    /// Nearest method at or above `id`.
    pub fn enclosing_method(&self, id: DeclId) -> Option<DeclId> {
        self.self_and_ancestors(id)
            .find(|&a| self.node(a).kind.is_method_like())
    }

    /// The `Param` child of `method` named `name`.
    pub fn param_of(&self, method: DeclId, name: &str) -> Option<DeclId> {
        self.node(method)
            .children
            .iter()
            .copied()
            .find(|&c| {
                let child = self.node(c);
                child.kind == DeclKind::Param && child.name == name
            })
    }

    /// True when `id` or any descendant is named in `names`.
    pub fn subtree_named_in(&self, id: DeclId, names: &[SmolStr]) -> bool {
        let node = self.node(id);
        node.children.iter().any(|&c| {
            names.iter().any(|n| *n == self.node(c).name) || self.subtree_named_in(c, names)
        })
    }

    // ========================================================================
    // Scope tables
    // ========================================================================

    pub fn scope(&self, id: DeclId) -> Option<&ScopeTables> {
        self.node(id).scope.as_ref()
    }

    /// Find `name` in a root's tables, then in its nested roots, depth first.
    pub fn find_in_root(&self, root: DeclId, name: &str, allow_parens: bool) -> Option<DeclId> {
        let tables = self.scope(root)?;
        if let Some(id) = tables.leaf(name, allow_parens) {
            return Some(id);
        }
        if let Some(id) = tables.branch(name) {
            return Some(id);
        }
        tables
            .branches
            .values()
            .find_map(|&branch| self.find_in_root(branch, name, allow_parens))
    }
}
