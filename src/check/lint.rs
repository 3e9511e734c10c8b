//! Style lint for parameter and return descriptions.

use crate::core::text_utils::word_end;
use crate::error::ResolveError;
use crate::resolve::{ResolutionMode, ResolveContext, Resolver, Token};
use crate::store::{DeclId, DeclKind};

/// Check the description of a `Param` or `Return` declaration.
///
/// The description reads as a phrase continuing the sentence: it starts
/// lowercase (or with a digit, or with a name that resolves) and has no
/// closing period. Other kinds, and declarations without source text, pass.
pub fn check_param_return_body(
    resolver: &Resolver<'_>,
    decl: DeclId,
    ctx: &ResolveContext,
) -> Result<(), ResolveError> {
    let forest = resolver.forest();
    let node = forest.node(decl);
    let what = match node.kind {
        DeclKind::Param => "param",
        DeclKind::Return => "return",
        _ => return Ok(()),
    };
    let Some(body) = forest.content(decl).map(str::trim) else {
        return Ok(());
    };
    let location = forest.location(decl);

    let first = body.chars().next();
    if first.is_some_and(|c| !c.is_lowercase() && !c.is_ascii_digit()) {
        let word = &body[..word_end(body, 0)];
        let token = Token::new(word, location.clone());
        let resolved = !word.is_empty()
            && resolver
                .resolve(&token, ctx, ResolutionMode::Prose)
                .is_ok_and(|r| r.is_found());
        if !resolved {
            return Err(ResolveError::style(
                location,
                format!("{what} description must start with lower case"),
            ));
        }
    }
    if body.ends_with('.') {
        return Err(ResolveError::style(
            location,
            "make param description a phrase; should not end with period",
        ));
    }
    Ok(())
}
