//! Symbol resolver: maps a candidate token to the declaration it names.
//!
//! Lookup order, first match wins:
//!
//! 1. exact match in the global indices, in [`IndexCategory::PRIORITY`] order
//! 2. scope-chain walk from the context root, then the context subtopic
//! 3. `Class::member` fallback through the class index
//! 4. the naming-convention rules in [`HEURISTIC_RULES`]
//! 5. verbatim topic lookup for capitalized names
//! 6. native declarations, for code only

use smol_str::SmolStr;

use super::context::{ResolveContext, Token};
use super::heuristics::{HEURISTIC_RULES, RuleOutcome};
use super::mode::ResolutionMode;
use crate::core::text_utils::starts_uppercase;
use crate::error::ResolveError;
use crate::store::{DeclForest, DeclId, IndexCategory, NativeIndex};

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// Which lookup step produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedVia {
    Index(IndexCategory),
    ScopeChain,
    Qualified,
    Heuristic(&'static str),
    Topic,
    Native,
}

/// A successful resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub decl: DeclId,
    pub via: ResolvedVia,
}

/// Result of resolving a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    Found(Resolution),
    NotFound,
}

impl ResolveResult {
    pub fn decl(&self) -> Option<DeclId> {
        match self {
            ResolveResult::Found(r) => Some(r.decl),
            ResolveResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    fn found(decl: DeclId, via: ResolvedVia) -> Self {
        ResolveResult::Found(Resolution { decl, via })
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolver over an immutable forest.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    forest: &'a DeclForest,
    native: &'a dyn NativeIndex,
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("nodes", &self.forest.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Resolver<'a> {
    /// Create a resolver; native lookups go to the forest's own native nodes.
    pub fn new(forest: &'a DeclForest) -> Self {
        Self {
            forest,
            native: forest,
        }
    }

    /// Use a different native declaration index.
    pub fn with_native(mut self, native: &'a dyn NativeIndex) -> Self {
        self.native = native;
        self
    }

    pub fn forest(&self) -> &'a DeclForest {
        self.forest
    }

    pub fn native(&self) -> &'a dyn NativeIndex {
        self.native
    }

    /// Resolve a token under `mode`.
    ///
    /// `Ok(NotFound)` means the token is plain text as far as this step is
    /// concerned; `Err` is a defect the mode does not tolerate.
    pub fn resolve(
        &self,
        token: &Token<'_>,
        ctx: &ResolveContext,
        mode: ResolutionMode,
    ) -> Result<ResolveResult, ResolveError> {
        let name = token.text;
        if name.is_empty() {
            return Ok(ResolveResult::NotFound);
        }
        if let Some(found) = self.lookup(name, ctx) {
            return Ok(ResolveResult::Found(found));
        }

        let mut deferred = false;
        if let Some(rule) = HEURISTIC_RULES.iter().find(|rule| (rule.applies)(name)) {
            match (rule.apply)(self, token, ctx, mode)? {
                RuleOutcome::Matched(decl) => {
                    tracing::trace!("[RESOLVE] '{}' matched by rule '{}'", name, rule.name);
                    return Ok(ResolveResult::found(decl, ResolvedVia::Heuristic(rule.name)));
                }
                RuleOutcome::Stop => {
                    tracing::trace!("[RESOLVE] '{}' stopped by rule '{}'", name, rule.name);
                    return Ok(ResolveResult::NotFound);
                }
                RuleOutcome::Defer => deferred = true,
                RuleOutcome::Continue => {}
            }
        }

        if starts_uppercase(name) {
            if let Some(topic) = self.forest.indices().topic(name) {
                tracing::trace!("[RESOLVE] '{}' found in topic index", name);
                return Ok(ResolveResult::found(topic, ResolvedVia::Topic));
            }
        }
        if deferred && !mode.tolerates_unresolved() {
            return Err(ResolveError::unresolved(
                name,
                token.location.clone(),
                "_ undefined",
            ));
        }
        if mode == ResolutionMode::Code {
            if let Some(native) = self.lookup_native(name, ctx) {
                tracing::trace!("[RESOLVE] '{}' found among native declarations", name);
                return Ok(ResolveResult::found(native, ResolvedVia::Native));
            }
        }
        tracing::trace!("[RESOLVE] '{}' not found", name);
        Ok(ResolveResult::NotFound)
    }

    /// The lookups that never fail loudly: indices, scope chain, `Class::member`.
    pub fn lookup(&self, name: &str, ctx: &ResolveContext) -> Option<Resolution> {
        if let Some((category, decl)) = self.forest.indices().find(name) {
            tracing::trace!("[RESOLVE] '{}' found in {} index", name, category.as_str());
            return Some(Resolution {
                decl,
                via: ResolvedVia::Index(category),
            });
        }
        for start in [ctx.root, ctx.subtopic].into_iter().flatten() {
            if let Some(decl) = self.find_by_parent(start, name) {
                tracing::trace!(
                    "[RESOLVE] '{}' found in scope chain of '{}'",
                    name,
                    self.forest.node(start).name
                );
                return Some(Resolution {
                    decl,
                    via: ResolvedVia::ScopeChain,
                });
            }
        }
        if let Some(decl) = self.find_qualified(name) {
            tracing::trace!("[RESOLVE] '{}' found through its class", name);
            return Some(Resolution {
                decl,
                via: ResolvedVia::Qualified,
            });
        }
        None
    }

    /// Walk from `start` towards the forest roots, trying `name` in every
    /// ancestor root of the same kind (class-like or topic-like) as `start`.
    pub fn find_by_parent(&self, start: DeclId, name: &str) -> Option<DeclId> {
        let forest = self.forest;
        let start_node = forest.node(start);
        if start_node.name == name {
            return Some(start);
        }
        if let Some(found) = forest.find_in_root(start, name, true) {
            return Some(found);
        }
        let topical = start_node.kind.is_topic_like();
        let sep = if topical { "_" } else { "::" };
        for test in forest.self_and_ancestors(start) {
            let node = forest.node(test);
            let Some(tables) = node.scope.as_ref() else {
                continue;
            };
            if node.kind.is_topic_like() != topical {
                continue;
            }
            for (key, &branch) in &tables.branches {
                if key == name {
                    return Some(branch);
                }
                if let Some(found) = forest.find_in_root(branch, name, true) {
                    return Some(found);
                }
            }
            let prefixed = format!("{}{sep}{name}", node.name);
            if let Some(found) = forest.find_in_root(test, &prefixed, true) {
                return Some(found);
            }
            if topical {
                if starts_uppercase(&prefixed) {
                    if let Some(topic) = forest.indices().topic(&prefixed) {
                        return Some(topic);
                    }
                }
                if !node.anchor.is_empty() {
                    let by_anchor = format!("{}_{name}", node.anchor);
                    if let Some(topic) = forest.indices().topic(&by_anchor) {
                        return Some(topic);
                    }
                }
            }
        }
        None
    }

    /// Try `ancestor + sep + name` in every same-kind root above `start`.
    ///
    /// The scanner uses this last, for capitalized words that are plain
    /// members of the documented class or topic.
    pub fn match_parents(&self, start: DeclId, name: &str) -> Option<DeclId> {
        let forest = self.forest;
        let topical = forest.node(start).kind.is_topic_like();
        let sep = if topical { "_" } else { "::" };
        forest.self_and_ancestors(start).find_map(|test| {
            let node = forest.node(test);
            if !node.is_root() || node.kind.is_topic_like() != topical {
                return None;
            }
            forest.find_in_root(test, &format!("{}{sep}{name}", node.name), true)
        })
    }

    /// `Class::member` through the class index.
    pub fn find_qualified(&self, name: &str) -> Option<DeclId> {
        let (class, _) = name.split_once("::")?;
        let class = self.forest.indices().class(class)?;
        self.forest.find_in_root(class, name, true)
    }

    /// Native lookup by the name as written, then qualified by the context class.
    fn lookup_native(&self, name: &str, ctx: &ResolveContext) -> Option<DeclId> {
        if let Some(found) = self.native.lookup(name) {
            return Some(found);
        }
        let root = ctx.root?;
        let class = if self.forest.node(root).kind.is_class_like() {
            Some(root)
        } else {
            self.forest.cs_parent(root)
        }?;
        let qualified = SmolStr::from(format!("{}::{name}", self.forest.node(class).name));
        self.native.lookup(&qualified)
    }
}
