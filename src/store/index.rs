//! Global symbol indices.
//!
//! One ordered map per declaration category. Resolution consults them in
//! [`IndexCategory::PRIORITY`] order, so a spelling that appears in two
//! indices always resolves to the earlier one.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::kind::DeclKind;
use super::node::DeclId;

/// Which global index a declaration lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexCategory {
    Class,
    Typedef,
    Enum,
    Const,
    Method,
    Alias,
    Define,
    External,
    Topic,
}

impl IndexCategory {
    /// Lookup priority for exact-name resolution. Topics are consulted separately.
    pub const PRIORITY: [IndexCategory; 8] = [
        Self::Class,
        Self::Typedef,
        Self::Enum,
        Self::Const,
        Self::Method,
        Self::Alias,
        Self::Define,
        Self::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "classes",
            Self::Typedef => "typedefs",
            Self::Enum => "enums",
            Self::Const => "consts",
            Self::Method => "methods",
            Self::Alias => "aliases",
            Self::Define => "defines",
            Self::External => "externals",
            Self::Topic => "topics",
        }
    }

    /// The index a declaration of `kind` belongs in, if any.
    ///
    /// `in_enum` is true for constants declared inside an enum; those live in
    /// the enum's scope table instead of the global const index.
    pub fn for_kind(kind: DeclKind, in_enum: bool) -> Option<Self> {
        match kind {
            DeclKind::Class | DeclKind::Struct => Some(Self::Class),
            DeclKind::Typedef => Some(Self::Typedef),
            DeclKind::Enum | DeclKind::EnumClass => Some(Self::Enum),
            DeclKind::Const if !in_enum => Some(Self::Const),
            DeclKind::Method | DeclKind::Function => Some(Self::Method),
            DeclKind::Alias => Some(Self::Alias),
            DeclKind::Define => Some(Self::Define),
            DeclKind::External => Some(Self::External),
            DeclKind::Topic | DeclKind::Subtopic => Some(Self::Topic),
            _ => None,
        }
    }
}

/// Name indices built once by [`ForestBuilder::finish`](super::ForestBuilder::finish).
#[derive(Clone, Debug, Default)]
pub struct GlobalIndices {
    classes: IndexMap<SmolStr, DeclId>,
    typedefs: IndexMap<SmolStr, DeclId>,
    enums: IndexMap<SmolStr, DeclId>,
    consts: IndexMap<SmolStr, DeclId>,
    methods: IndexMap<SmolStr, DeclId>,
    aliases: IndexMap<SmolStr, DeclId>,
    defines: IndexMap<SmolStr, DeclId>,
    topics: IndexMap<SmolStr, DeclId>,
    externals: Vec<(SmolStr, DeclId)>,
    native: FxHashMap<SmolStr, DeclId>,
}

impl GlobalIndices {
    fn map(&self, category: IndexCategory) -> Option<&IndexMap<SmolStr, DeclId>> {
        match category {
            IndexCategory::Class => Some(&self.classes),
            IndexCategory::Typedef => Some(&self.typedefs),
            IndexCategory::Enum => Some(&self.enums),
            IndexCategory::Const => Some(&self.consts),
            IndexCategory::Method => Some(&self.methods),
            IndexCategory::Alias => Some(&self.aliases),
            IndexCategory::Define => Some(&self.defines),
            IndexCategory::Topic => Some(&self.topics),
            IndexCategory::External => None,
        }
    }

    fn map_mut(&mut self, category: IndexCategory) -> Option<&mut IndexMap<SmolStr, DeclId>> {
        match category {
            IndexCategory::Class => Some(&mut self.classes),
            IndexCategory::Typedef => Some(&mut self.typedefs),
            IndexCategory::Enum => Some(&mut self.enums),
            IndexCategory::Const => Some(&mut self.consts),
            IndexCategory::Method => Some(&mut self.methods),
            IndexCategory::Alias => Some(&mut self.aliases),
            IndexCategory::Define => Some(&mut self.defines),
            IndexCategory::Topic => Some(&mut self.topics),
            IndexCategory::External => None,
        }
    }

    /// Register `name` in `category`. Keys are unique per index; a taken key
    /// fails with the declaration already holding it.
    pub(crate) fn insert(
        &mut self,
        category: IndexCategory,
        name: SmolStr,
        id: DeclId,
    ) -> Result<(), DeclId> {
        if category == IndexCategory::External {
            if let Some(&(_, first)) = self.externals.iter().find(|(n, _)| *n == name) {
                return Err(first);
            }
            self.externals.push((name, id));
            return Ok(());
        }
        let Some(map) = self.map_mut(category) else {
            return Ok(());
        };
        if let Some(&first) = map.get(&name) {
            return Err(first);
        }
        map.insert(name, id);
        Ok(())
    }

    /// Register a secondary topic key (the anchor id). Existing keys win.
    pub(crate) fn insert_topic_alias(&mut self, key: SmolStr, id: DeclId) {
        self.topics.entry(key).or_insert(id);
    }

    pub(crate) fn insert_native(&mut self, name: SmolStr, id: DeclId) {
        self.native.entry(name).or_insert(id);
    }

    /// Exact lookup in one index.
    pub fn get(&self, category: IndexCategory, name: &str) -> Option<DeclId> {
        match category {
            IndexCategory::External => self
                .externals
                .iter()
                .find(|(n, _)| n == name)
                .map(|&(_, id)| id),
            _ => self.map(category)?.get(name).copied(),
        }
    }

    /// First exact match across the indices in priority order.
    pub fn find(&self, name: &str) -> Option<(IndexCategory, DeclId)> {
        IndexCategory::PRIORITY
            .iter()
            .find_map(|&category| self.get(category, name).map(|id| (category, id)))
    }

    /// Lookup in the class/struct index.
    pub fn class(&self, name: &str) -> Option<DeclId> {
        self.classes.get(name).copied()
    }

    pub fn enum_decl(&self, name: &str) -> Option<DeclId> {
        self.enums.get(name).copied()
    }

    pub fn topic(&self, name: &str) -> Option<DeclId> {
        self.topics.get(name).copied()
    }

    pub fn native(&self, name: &str) -> Option<DeclId> {
        self.native.get(name).copied()
    }

    /// Every enum, in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.enums.values().copied()
    }

    pub fn externals(&self) -> impl Iterator<Item = (&str, DeclId)> + '_ {
        self.externals.iter().map(|(n, id)| (n.as_str(), *id))
    }

    pub fn is_external(&self, name: &str) -> bool {
        self.externals.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self, category: IndexCategory) -> usize {
        match category {
            IndexCategory::External => self.externals.len(),
            _ => self.map(category).map_or(0, IndexMap::len),
        }
    }
}
