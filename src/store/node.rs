//! Declaration nodes and their scope tables.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::kind::DeclKind;
use crate::base::{DocId, TextRange};
use crate::core::text_utils::strip_empty_parens;

/// Index of a [`DeclNode`] inside its forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclId(pub(crate) u32);

impl DeclId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Overload family membership of a method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverloadFlags {
    /// This is `name_N` for some base `name`.
    pub is_clone: bool,
    /// Some `name_N` exists for this base.
    pub has_clones: bool,
}

/// A parsed markup declaration.
#[derive(Clone, Debug)]
pub struct DeclNode {
    pub kind: DeclKind,
    /// Name as written in the markup, qualified for members (`SkPaint::Cap`).
    pub name: SmolStr,
    /// Anchor id ("fiddle"); empty for declarations known only from native headers.
    pub anchor: SmolStr,
    /// Content offsets into the owning document's source.
    pub range: TextRange,
    /// 1-based start line.
    pub line: u32,
    pub doc: DocId,
    pub parent: Option<DeclId>,
    /// Children in document order.
    pub children: Vec<DeclId>,
    pub overload: OverloadFlags,
    /// Recorded parameter list, e.g. `(SkColor color)`.
    pub signature: Option<SmolStr>,
    /// Present exactly when `kind.is_root()`.
    pub scope: Option<ScopeTables>,
    /// Known only from native headers; never in the scope tables.
    pub native: bool,
}

impl DeclNode {
    pub fn is_root(&self) -> bool {
        self.scope.is_some()
    }

    /// Name without a trailing `()`.
    pub fn bare_name(&self) -> &str {
        strip_empty_parens(&self.name)
    }
}

/// Name lookup tables owned by a root declaration.
#[derive(Clone, Debug, Default)]
pub struct ScopeTables {
    /// Non-root members, keyed by name.
    pub leaves: IndexMap<SmolStr, DeclId>,
    /// Nested roots, keyed by name.
    pub branches: IndexMap<SmolStr, DeclId>,
}

impl ScopeTables {
    /// Look `name` up among the leaves.
    ///
    /// With `allow_parens`, `name` also matches a key spelled `name()`, and a
    /// call form `name(args)` matches the key `name`.
    pub fn leaf(&self, name: &str, allow_parens: bool) -> Option<DeclId> {
        if let Some(&id) = self.leaves.get(name) {
            return Some(id);
        }
        if !allow_parens {
            return None;
        }
        let paren = name.find('(');
        let empty_call = paren.is_some_and(|p| name[p + 1..].starts_with(')'));
        if paren.is_none() || !empty_call {
            if let Some(&id) = self.leaves.get(format!("{name}()").as_str()) {
                return Some(id);
            }
        }
        paren.and_then(|p| self.leaves.get(&name[..p]).copied())
    }

    pub fn branch(&self, name: &str) -> Option<DeclId> {
        self.branches.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.leaves.len() + self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.branches.is_empty()
    }
}
