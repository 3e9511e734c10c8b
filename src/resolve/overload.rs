//! Overload disambiguation.
//!
//! Overloaded methods are recorded as a base declaration plus numbered
//! clones (`drawRect`, `drawRect_2`, ...). When prose writes a call such as
//! `drawRect(r, paint)`, the argument list picks the clone whose recorded
//! signature matches it structurally. The first structural match wins.

use smol_str::SmolStr;

use super::context::{ResolveContext, Token};
use super::mode::ResolutionMode;
use super::resolver::Resolver;
use super::signature::{Signature, balanced_close};
use crate::core::text_utils::split_clone_suffix;
use crate::error::{OverloadFailure, ResolveError};
use crate::store::DeclId;

/// How the disambiguator settled on its declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverloadChoice {
    /// A candidate's signature matched; `suffix` is its clone number.
    Signature { suffix: Option<u8> },
    /// The whole call text is itself an indexed name.
    FullReference,
    /// Nothing matched; code and formula text keep the bare resolution.
    Loose,
    /// Nothing matched, but output for the span had already started.
    Unmatched,
}

/// Outcome of disambiguating one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overload {
    pub decl: DeclId,
    /// Token without clone suffix or argument list.
    pub label: SmolStr,
    /// Offset of the closing parenthesis; arguments end here.
    pub close: usize,
    pub choice: OverloadChoice,
}

/// Picks one member of an overload family from a written call.
#[derive(Debug, Clone, Copy)]
pub struct Disambiguator<'r, 'a> {
    resolver: &'r Resolver<'a>,
    max_alternates: u8,
}

impl<'r, 'a> Disambiguator<'r, 'a> {
    pub fn new(resolver: &'r Resolver<'a>) -> Self {
        Self {
            resolver,
            max_alternates: 8,
        }
    }

    pub fn with_max_alternates(mut self, max: u8) -> Self {
        self.max_alternates = max;
        self
    }

    /// Disambiguate `token`, which resolved to `found` and is followed by the
    /// `(` at byte `open` of `text`.
    ///
    /// `output_started` is true when the span already produced output; a
    /// failed match is then tolerated and the bare resolution kept.
    pub fn disambiguate(
        &self,
        found: DeclId,
        token: &Token<'_>,
        text: &str,
        open: usize,
        ctx: &ResolveContext,
        mode: ResolutionMode,
        output_started: bool,
    ) -> Result<Overload, ResolveError> {
        let close = balanced_close(text, open).ok_or_else(|| {
            ResolveError::ambiguous(
                token.text,
                token.location.clone(),
                OverloadFailure::UnbalancedParens,
            )
        })?;
        let args = &text[open..=close];
        let base = split_clone_suffix(token.text).map_or(token.text, |(base, _)| base);
        let overload = |decl, choice| Overload {
            decl,
            label: SmolStr::new(base),
            close,
            choice,
        };
        let call = Signature::parse(args).unwrap_or_default();
        let forest = self.resolver.forest();

        let first = if base == token.text {
            Some(found)
        } else {
            self.lookup(token, base, ctx)?.or(Some(found))
        };
        let mut candidate = first;
        let mut suffix = 2u8;
        while let Some(decl) = candidate {
            if self.signature_matches(decl, &call) {
                let suffix = (decl != first.unwrap_or(found)).then_some(suffix - 1);
                tracing::trace!(
                    "[RESOLVE] '{}{}' matched '{}'",
                    token.text,
                    args,
                    forest.node(decl).name
                );
                return Ok(overload(decl, OverloadChoice::Signature { suffix }));
            }
            if suffix > self.max_alternates + 1 {
                return Err(ResolveError::ambiguous(
                    format!("{}{args}", token.text),
                    token.location.clone(),
                    OverloadFailure::TooManyAlternates,
                ));
            }
            candidate = self.lookup(token, &format!("{base}_{suffix}"), ctx)?;
            suffix += 1;
        }

        let full_ref = format!("{}{args}", token.text);
        if let Some(decl) = self.resolver.resolve(&token.respell(&full_ref), ctx, mode)?.decl() {
            tracing::debug!("[RESOLVE] '{}' resolved as a whole call", full_ref);
            return Ok(overload(decl, OverloadChoice::FullReference));
        }
        if mode.loose_overloads() {
            tracing::debug!("[RESOLVE] '{}' kept loose match on '{}'", full_ref, token.text);
            return Ok(overload(found, OverloadChoice::Loose));
        }
        if !output_started {
            return Err(ResolveError::unresolved(
                full_ref,
                token.location.clone(),
                "missing method",
            ));
        }
        Ok(overload(found, OverloadChoice::Unmatched))
    }

    fn lookup(
        &self,
        token: &Token<'_>,
        name: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<DeclId>, ResolveError> {
        Ok(self
            .resolver
            .resolve(&token.respell(name), ctx, ResolutionMode::Permissive)?
            .decl())
    }

    /// Declarations without any parameter information accept every call.
    fn signature_matches(&self, decl: DeclId, call: &Signature) -> bool {
        let forest = self.resolver.forest();
        let node = forest.node(decl);
        let recorded = Signature::of(forest, decl);
        if !node.kind.is_method_like() && node.signature.is_none() && recorded.arity() == 0 {
            return true;
        }
        recorded.matches_call(call)
    }
}
