//! Naming-convention rules tried after the plain lookups miss.
//!
//! Each rule is a named entry in [`HEURISTIC_RULES`]. The first rule whose
//! `applies` predicate accepts the token decides what happens next.

use super::context::{ResolveContext, Token};
use super::mode::ResolutionMode;
use super::resolver::Resolver;
use crate::core::text_utils::{is_prefixed_upper, starts_uppercase};
use crate::error::ResolveError;
use crate::store::DeclId;

/// What a rule decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule found the declaration.
    Matched(DeclId),
    /// The token is settled as unresolved; skip the remaining lookups.
    Stop,
    /// Keep looking; fail with "_ undefined" if nothing else matches.
    Defer,
    /// Keep looking.
    Continue,
}

type ApplyFn =
    fn(&Resolver<'_>, &Token<'_>, &ResolveContext, ResolutionMode) -> Result<RuleOutcome, ResolveError>;

/// A named naming-convention rule.
pub struct HeuristicRule {
    pub name: &'static str,
    pub applies: fn(&str) -> bool,
    pub apply: ApplyFn,
}

impl std::fmt::Debug for HeuristicRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicRule").field("name", &self.name).finish()
    }
}

/// The rules, in the order they are tried.
pub static HEURISTIC_RULES: [HeuristicRule; 5] = [
    HeuristicRule {
        name: "reserved-prefix",
        applies: is_reserved,
        apply: reserved_prefix,
    },
    HeuristicRule {
        name: "enum-constant",
        applies: is_enum_constant,
        apply: enum_constant,
    },
    HeuristicRule {
        name: "global-prefix",
        applies: is_global,
        apply: global_prefix,
    },
    HeuristicRule {
        name: "instance-field",
        applies: is_field,
        apply: instance_field,
    },
    HeuristicRule {
        name: "underscore-scope",
        applies: is_scoped_by_underscore,
        apply: underscore_scope,
    },
];

fn is_reserved(name: &str) -> bool {
    name.starts_with("SK") || name.starts_with("sk_")
}

fn is_enum_constant(name: &str) -> bool {
    is_prefixed_upper(name, 'k')
}

fn is_global(name: &str) -> bool {
    is_prefixed_upper(name, 'g')
}

fn is_field(name: &str) -> bool {
    is_prefixed_upper(name, 'f')
}

fn is_scoped_by_underscore(name: &str) -> bool {
    starts_uppercase(name) && name.contains('_')
}

/// Look a rule up by name.
pub fn rule(name: &str) -> Option<&'static HeuristicRule> {
    HEURISTIC_RULES.iter().find(|rule| rule.name == name)
}

/// Stop quietly when the mode tolerates misses, otherwise report the prefix.
fn convention_miss(
    token: &Token<'_>,
    mode: ResolutionMode,
    prefix: &str,
) -> Result<RuleOutcome, ResolveError> {
    if mode.tolerates_unresolved() {
        Ok(RuleOutcome::Stop)
    } else {
        Err(ResolveError::naming(token.text, token.location.clone(), prefix))
    }
}

fn reserved_prefix(
    _: &Resolver<'_>,
    token: &Token<'_>,
    _: &ResolveContext,
    mode: ResolutionMode,
) -> Result<RuleOutcome, ResolveError> {
    let prefix = if token.text.starts_with("SK") { "SK" } else { "sk_" };
    convention_miss(token, mode, prefix)
}

fn enum_constant(
    resolver: &Resolver<'_>,
    token: &Token<'_>,
    ctx: &ResolveContext,
    mode: ResolutionMode,
) -> Result<RuleOutcome, ResolveError> {
    let forest = resolver.forest();
    let name = token.text;
    if let Some(found) = forest
        .indices()
        .enums()
        .find_map(|e| forest.find_in_root(e, name, true))
    {
        return Ok(RuleOutcome::Matched(found));
    }
    if let Some(enum_class) = ctx.enum_class {
        let full = format!("{}::{name}", forest.node(enum_class).name);
        if let Some(&member) = forest
            .node(enum_class)
            .children
            .iter()
            .find(|&&c| forest.node(c).name == full)
        {
            return Ok(RuleOutcome::Matched(member));
        }
    }
    if name.contains("_Private") {
        return Ok(RuleOutcome::Stop);
    }
    convention_miss(token, mode, "k")
}

fn global_prefix(
    _: &Resolver<'_>,
    token: &Token<'_>,
    _: &ResolveContext,
    mode: ResolutionMode,
) -> Result<RuleOutcome, ResolveError> {
    convention_miss(token, mode, "g")
}

fn instance_field(
    _: &Resolver<'_>,
    token: &Token<'_>,
    _: &ResolveContext,
    mode: ResolutionMode,
) -> Result<RuleOutcome, ResolveError> {
    if token.preceding == Some('.') || mode.tolerates_unresolved() {
        return Ok(RuleOutcome::Continue);
    }
    Err(ResolveError::unresolved(
        token.text,
        token.location.clone(),
        "fX member undefined",
    ))
}

fn underscore_scope(
    resolver: &Resolver<'_>,
    token: &Token<'_>,
    _: &ResolveContext,
    _: ResolutionMode,
) -> Result<RuleOutcome, ResolveError> {
    let forest = resolver.forest();
    let name = token.text;
    let Some((prefix, _)) = name.split_once('_') else {
        return Ok(RuleOutcome::Continue);
    };
    let owner = forest
        .indices()
        .class(prefix)
        .into_iter()
        .chain(forest.indices().enum_decl(prefix));
    for owner in owner {
        if let Some(found) = forest.find_in_root(owner, name, true) {
            return Ok(RuleOutcome::Matched(found));
        }
    }
    Ok(RuleOutcome::Defer)
}
