//! The reference scanner.
//!
//! One left-to-right pass over a span. Runs of non-word text are copied
//! through; each word (or `Class::member` name) is resolved and replaced by
//! a link when it names a declaration. The first fatal defect ends the scan.

use smol_str::SmolStr;

use super::escape::escape_formula;
use super::scope_stack::{ScopeFrame, ScopeStack};
use super::span::SourceSpan;
use crate::base::Location;
use crate::check::ConsistencyLedger;
use crate::config::EngineConfig;
use crate::core::text_utils::{
    full_name_end, has_uppercase, is_all_lower, is_prefixed_upper, is_word_character,
    starts_lowercase, starts_sentence, starts_uppercase, word_end,
};
use crate::error::ResolveError;
use crate::link::{Link, LinkBuilder};
use crate::resolve::{
    Disambiguator, ResolutionMode, ResolveContext, Resolver, Signature, Token,
};
use crate::store::{DeclId, DeclKind};

/// Scanner output: the text with links substituted, and the links in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedText {
    pub text: String,
    pub links: Vec<Link>,
}

/// Scans spans of one document.
///
/// The scanner owns no state beyond the span being scanned except the last
/// method parameter mentioned, which `.member` links resolve through.
pub struct Scanner<'s, 'a> {
    resolver: &'s Resolver<'a>,
    links: LinkBuilder<'a>,
    config: &'s EngineConfig,
    ledger: &'s mut ConsistencyLedger,
    ctx: ResolveContext,
    in_description: bool,
    last_param: Option<DeclId>,
}

impl<'s, 'a> Scanner<'s, 'a> {
    pub fn new(
        resolver: &'s Resolver<'a>,
        config: &'s EngineConfig,
        ledger: &'s mut ConsistencyLedger,
        ctx: ResolveContext,
    ) -> Self {
        Self {
            resolver,
            links: LinkBuilder::new(resolver.forest()),
            config,
            ledger,
            ctx,
            in_description: false,
            last_param: None,
        }
    }

    /// Text inside an example description; camelCase words are not checked.
    pub fn in_description(mut self, in_description: bool) -> Self {
        self.in_description = in_description;
        self
    }

    pub fn with_last_param(mut self, param: Option<DeclId>) -> Self {
        self.last_param = param;
        self
    }

    /// The last method parameter linked so far.
    pub fn last_param(&self) -> Option<DeclId> {
        self.last_param
    }

    /// Scan `span` under `mode`.
    pub fn scan(
        &mut self,
        span: &SourceSpan<'_>,
        mode: ResolutionMode,
    ) -> Result<RenderedText, ResolveError> {
        if mode == ResolutionMode::Literal {
            return Ok(RenderedText {
                text: span.text.to_string(),
                links: Vec::new(),
            });
        }
        let mut pass = Pass {
            span,
            text: span.text,
            mode,
            out: RenderedText::default(),
            pos: 0,
            first_run: true,
            horizon: None,
            param_distance: 99,
            scopes: (mode == ResolutionMode::Code)
                .then(|| ScopeStack::new(ScopeFrame::plain(self.ctx))),
            expect_class_name: false,
            pending_class: None,
        };
        self.run(&mut pass)?;
        let trimmed = pass.out.text.trim_end_matches(' ').len();
        pass.out.text.truncate(trimmed);
        Ok(pass.out)
    }

    fn run(&mut self, pass: &mut Pass<'_, '_>) -> Result<(), ResolveError> {
        let text = pass.text;
        loop {
            pass.param_distance = pass.param_distance.saturating_add(1);
            let run_start = pass.pos;
            let word_start = skip_whitespace(text, run_start);
            let start = match self.next_token(pass, word_start)? {
                Next::Word(start) => start,
                Next::Quote(quote) => {
                    let close = text[quote + 1..]
                        .find('"')
                        .map_or(text.len(), |i| quote + i + 2);
                    pass.copy_run(run_start, word_start, quote, true);
                    pass.out.text.push_str(&text[quote..close]);
                    pass.pos = close;
                    continue;
                }
                Next::End => {
                    pass.copy_run(run_start, word_start, text.len(), true);
                    return Ok(());
                }
            };
            pass.copy_run(run_start, word_start, start, true);
            if pass.horizon.is_some_and(|h| h <= start) {
                pass.horizon = None;
            }

            let name_start = if text[start..].starts_with('~') {
                start + 1
            } else {
                start
            };
            let end = full_name_end(text, name_start);
            pass.pos = end;
            self.token(pass, start, end)?;
            if pass.pos >= text.len() {
                return Ok(());
            }
        }
    }

    /// Find where the next token starts, tracking braces in code.
    fn next_token(&mut self, pass: &mut Pass<'_, '_>, from: usize) -> Result<Next, ResolveError> {
        let text = pass.text;
        let quotes_opaque = matches!(pass.mode, ResolutionMode::Code | ResolutionMode::Formula);
        let mut chars = text[from..].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let at = from + i;
            if is_word_character(c) {
                return Ok(Next::Word(at));
            }
            if c == '~' && chars.peek().is_some_and(|&(_, n)| is_word_character(n)) {
                return Ok(Next::Word(at));
            }
            if c == '"' && quotes_opaque {
                return Ok(Next::Quote(at));
            }
            if pass.scopes.is_some() {
                self.brace(pass, c, at)?;
            }
        }
        Ok(Next::End)
    }

    fn brace(&mut self, pass: &mut Pass<'_, '_>, c: char, at: usize) -> Result<(), ResolveError> {
        let Some(scopes) = pass.scopes.as_mut() else {
            return Ok(());
        };
        match c {
            '{' => {
                let current = scopes.current().ctx;
                let frame = match pass.pending_class.take() {
                    Some(name) => {
                        let ctx = match self.class_root(&name, &current) {
                            Some(root) => current.with_root(root),
                            None => current,
                        };
                        ScopeFrame::class(ctx, name)
                    }
                    None => ScopeFrame::plain(current),
                };
                scopes.push(frame);
            }
            '}' => {
                scopes.pop(&pass.span.location(at))?;
            }
            ';' => pass.pending_class = None,
            _ => {}
        }
        Ok(())
    }

    /// A class named in code: directly, else nested in the current class.
    fn class_root(&self, name: &str, ctx: &ResolveContext) -> Option<DeclId> {
        let forest = self.resolver.forest();
        let found = self.resolver.lookup(name, ctx).map(|r| r.decl).or_else(|| {
            let outer = ctx.root.and_then(|root| {
                if forest.node(root).kind.is_class_like() {
                    Some(root)
                } else {
                    forest.cs_parent(root)
                }
            })?;
            let qualified = format!("{}::{name}", forest.node(outer).name);
            self.resolver.lookup(&qualified, ctx).map(|r| r.decl)
        })?;
        forest.node(found).is_root().then_some(found)
    }

    fn current_ctx(&self, pass: &Pass<'_, '_>) -> ResolveContext {
        pass.scopes
            .as_ref()
            .map_or(self.ctx, |scopes| scopes.current().ctx)
    }

    /// Handle the token at `start..end`.
    fn token(&mut self, pass: &mut Pass<'_, '_>, start: usize, end: usize) -> Result<(), ResolveError> {
        let text = pass.text;
        let mode = pass.mode;
        let word = &text[start..end];

        if pass.scopes.is_some() {
            if pass.expect_class_name {
                pass.pending_class = Some(SmolStr::new(word));
                pass.expect_class_name = false;
            } else if matches!(word, "class" | "struct") {
                pass.expect_class_name = true;
            }
        }

        if pass.horizon.is_some() && starts_lowercase(word) && !is_prefixed_upper(word, 'k') {
            pass.out.text.push_str(word);
            return Ok(());
        }

        let ctx = self.current_ctx(pass);
        let location = pass.span.location(start);
        let preceding = text[..start].chars().next_back();
        let token = Token::new(word, location.clone()).preceded_by(preceding);
        let next = text[end..].chars().next();

        if let Some(decl) = self.resolver.resolve(&token, &ctx, mode)?.decl() {
            return self.resolved(pass, decl, &token, &ctx, start, end);
        }

        let mut word = word;
        if next == Some('(') {
            let Some(close) = text[end..].find(')').map(|i| end + i) else {
                return Err(ResolveError::unresolved(word, location, "missing close paren"));
            };
            let call = &text[start..=close];
            pass.pos = close + 1;
            let retry = token.respell(call);
            if let Some(decl) = self
                .resolver
                .resolve(&retry, &ctx, mode.follow_up())?
                .decl()
            {
                self.emit_link(pass, decl, &ctx, call);
                return Ok(());
            }
            word = call;
        }

        if word.starts_with("Sk")
            && !self.config.is_prose_word(word)
            && !mode.tolerates_reserved_prefix()
        {
            return Err(ResolveError::naming(word, location, "Sk"));
        }
        if word.starts_with("SK") && !mode.tolerates_reserved_prefix() {
            return Err(ResolveError::naming(word, location, "SK"));
        }

        if !starts_uppercase(word) {
            return self.lowercase_miss(pass, word, &ctx, &location, preceding);
        }
        let after = pass.pos;
        self.uppercase_miss(pass, word, &ctx, &location, after)
    }

    fn resolved(
        &mut self,
        pass: &mut Pass<'_, '_>,
        decl: DeclId,
        token: &Token<'_>,
        ctx: &ResolveContext,
        start: usize,
        end: usize,
    ) -> Result<(), ResolveError> {
        let text = pass.text;
        let mode = pass.mode;
        let forest = self.resolver.forest();
        let word = token.text;

        if forest.node(decl).kind == DeclKind::External {
            let href = format!("{}#{word}", self.config.undocumented_doc);
            self.ledger.record_reference(pass.span.doc(), &href);
            pass.out.text.push_str(word);
            return Ok(());
        }

        let followed_by_call = text[end..].starts_with('(');
        if followed_by_call && mode.disambiguates() && text[end..].contains(')') {
            let overload = Disambiguator::new(self.resolver)
                .with_max_alternates(self.config.max_alternates)
                .disambiguate(decl, token, text, end, ctx, mode, !pass.out.text.is_empty())?;
            pass.horizon = Some(overload.close);
            self.emit_link(pass, overload.decl, ctx, &overload.label);
            pass.out.text.push('(');
            pass.pos = end + 1;
            return Ok(());
        }

        if mode != ResolutionMode::Clone && is_all_lower(word) && !followed_by_call {
            if let Some(param) = ctx.method.and_then(|m| forest.param_of(m, word)) {
                self.link_param(pass, param, ctx, word);
            } else {
                pass.out.text.push_str(word);
            }
            return Ok(());
        }

        self.emit_link(pass, decl, ctx, &text[start..end]);
        if followed_by_call {
            pass.out.text.push('(');
            pass.pos = end + 1;
        }
        Ok(())
    }

    fn lowercase_miss(
        &mut self,
        pass: &mut Pass<'_, '_>,
        word: &str,
        ctx: &ResolveContext,
        location: &Location,
        preceding: Option<char>,
    ) -> Result<(), ResolveError> {
        let forest = self.resolver.forest();
        if let Some(param) = ctx.method.and_then(|m| forest.param_of(m, word)) {
            self.link_param(pass, param, ctx, word);
            return Ok(());
        }
        let camel_case = !self.in_description
            && !word.starts_with('0')
            && has_uppercase(word)
            && !word.starts_with('f')
            && !word.contains("()")
            && !word.starts_with('k')
            && !word.contains("_Private");
        if camel_case {
            if preceding == Some('.')
                && self.config.param_distance.contains(&pass.param_distance)
            {
                if let Some(class) = self.param_type(ctx, word) {
                    self.emit_link(pass, class, ctx, word);
                    return Ok(());
                }
            }
            let mode = pass.mode;
            if mode != ResolutionMode::Simple && !mode.tolerates_unresolved() {
                return Err(ResolveError::unresolved(
                    word,
                    location.clone(),
                    "missed camelCase",
                ));
            }
        }
        pass.out.text.push_str(word);
        Ok(())
    }

    /// The class of the last parameter, when it has a member `word`.
    fn param_type(&self, ctx: &ResolveContext, word: &str) -> Option<DeclId> {
        let forest = self.resolver.forest();
        let method = ctx.method?;
        let param = forest.node(self.last_param?);
        let signature = Signature::of(forest, method);
        let type_name = signature.param(&param.name)?.type_name.clone()?;
        let class = self.resolver.lookup(&type_name, ctx)?.decl;
        forest
            .find_in_root(class, &format!("{type_name}::{word}"), true)
            .map(|_| class)
    }

    fn uppercase_miss(
        &mut self,
        pass: &mut Pass<'_, '_>,
        word: &str,
        ctx: &ResolveContext,
        location: &Location,
        after: usize,
    ) -> Result<(), ResolveError> {
        let forest = self.resolver.forest();
        let text = pass.text;
        if let Some(topic) = forest.indices().topic(word) {
            self.emit_link(pass, topic, ctx, word);
            return Ok(());
        }

        let token_start = after - word.len();
        let sentence = starts_sentence(text, token_start);
        let mut rest = text[after..].chars();
        let next = rest.next();
        let following = rest.next();
        if next.is_some_and(|c| c != ' ') {
            pass.out.text.push_str(word);
            return Ok(());
        }
        let next_upper = following.is_some_and(char::is_uppercase);
        if following.is_none() || (!next_upper && sentence) {
            pass.out.text.push_str(word);
            return Ok(());
        }
        if next_upper && sentence {
            let next_start = after + 1;
            let next_word = &text[next_start..word_end(text, next_start)];
            let next_token = Token::new(next_word, pass.span.location(next_start));
            if self
                .resolver
                .resolve(&next_token, ctx, pass.mode.follow_up())?
                .is_found()
            {
                pass.out.text.push_str(word);
                return Ok(());
            }
        }

        let parent_match = [ctx.subtopic, ctx.root]
            .into_iter()
            .flatten()
            .find_map(|start| self.resolver.match_parents(start, word));
        if let Some(decl) = parent_match {
            self.emit_link(pass, decl, ctx, word);
            return Ok(());
        }
        if !pass.mode.tolerates_unresolved() {
            return Err(ResolveError::unresolved(
                word,
                location.clone(),
                "undefined reference",
            ));
        }
        pass.out.text.push_str(word);
        Ok(())
    }

    fn link_param(&mut self, pass: &mut Pass<'_, '_>, param: DeclId, ctx: &ResolveContext, word: &str) {
        self.emit_link(pass, param, ctx, word);
        self.last_param = Some(param);
        pass.param_distance = 0;
    }

    fn emit_link(&mut self, pass: &mut Pass<'_, '_>, decl: DeclId, ctx: &ResolveContext, written: &str) {
        let link = self.links.build_link_for(decl, ctx, written, pass.mode);
        let html = self
            .links
            .render_reference(&link, &mut *self.ledger, pass.span.doc());
        pass.out.text.push_str(&html);
        pass.out.links.push(link);
    }
}

enum Next {
    Word(usize),
    Quote(usize),
    End,
}

/// State of one scan.
struct Pass<'p, 't> {
    span: &'p SourceSpan<'t>,
    text: &'t str,
    mode: ResolutionMode,
    out: RenderedText,
    pos: usize,
    first_run: bool,
    /// End of the argument list of the last disambiguated call.
    horizon: Option<usize>,
    /// Tokens since the last parameter link.
    param_distance: u32,
    scopes: Option<ScopeStack>,
    expect_class_name: bool,
    pending_class: Option<SmolStr>,
}

impl Pass<'_, '_> {
    /// Copy `run_start..end`; the span's first run starts at `word_start`.
    fn copy_run(&mut self, run_start: usize, word_start: usize, end: usize, escape: bool) {
        let from = if self.first_run { word_start } else { run_start };
        self.first_run = false;
        if from >= end {
            return;
        }
        let run = &self.text[from..end];
        if escape && self.mode == ResolutionMode::Formula {
            self.out.text.push_str(&escape_formula(run));
        } else {
            self.out.text.push_str(run);
        }
    }
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|&(_, c)| !c.is_whitespace())
        .map_or(text.len(), |(i, _)| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::DocId;
    use crate::store::{DeclForest, ForestBuilder};
    use rstest::rstest;

    struct Fixture {
        forest: DeclForest,
        doc: DocId,
        paint: DeclId,
        set_color: DeclId,
    }

    fn fixture() -> Fixture {
        let mut b = ForestBuilder::new();
        let doc = b.add_document("SkPaint_Reference");
        let undocumented = b.add_document("undocumented");
        let paint = b.add_root(doc, DeclKind::Class, "SkPaint", "SkPaint").unwrap();
        let set_color = b
            .add_child(paint, DeclKind::Method, "SkPaint::setColor()", "SkPaint_setColor")
            .unwrap();
        b.set_signature(set_color, "(SkColor color)").unwrap();
        b.add_child(set_color, DeclKind::Param, "color", "").unwrap();
        for (name, sig) in [
            ("SkPaint::foo()", "(int a)"),
            ("SkPaint::foo_2()", "(int a, int b, int c)"),
            ("SkPaint::foo_3()", "(int x, int y)"),
        ] {
            let anchor = name.trim_end_matches("()").replace("::", "_");
            let id = b.add_child(paint, DeclKind::Method, name, &anchor).unwrap();
            b.set_signature(id, sig).unwrap();
        }
        b.add_root(undocumented, DeclKind::External, "SkSL", "SkSL").unwrap();
        Fixture {
            forest: b.finish().unwrap(),
            doc,
            paint,
            set_color,
        }
    }

    fn scan_with(
        f: &Fixture,
        ctx: ResolveContext,
        text: &str,
        mode: ResolutionMode,
    ) -> (Result<RenderedText, ResolveError>, ConsistencyLedger) {
        let resolver = Resolver::new(&f.forest);
        let config = EngineConfig::default();
        let mut ledger = ConsistencyLedger::new();
        let span = SourceSpan::new("SkPaint_Reference", text, 1);
        let result = Scanner::new(&resolver, &config, &mut ledger, ctx).scan(&span, mode);
        (result, ledger)
    }

    fn scan(f: &Fixture, text: &str, mode: ResolutionMode) -> Result<RenderedText, ResolveError> {
        let ctx = ResolveContext::new(f.doc).with_root(f.paint);
        scan_with(f, ctx, text, mode).0
    }

    #[test]
    fn test_method_call_in_prose() {
        let f = fixture();
        let out = scan(&f, "See SkPaint::setColor() for details.", ResolutionMode::Prose).unwrap();
        assert_eq!(
            out.text,
            "See <a href='#SkPaint_setColor'>setColor</a>() for details."
        );
        assert_eq!(out.links.len(), 1);
    }

    #[test]
    fn test_overload_call_picks_matching_clone() {
        let f = fixture();
        let out = scan(&f, "calls foo_2(x, y)", ResolutionMode::Prose).unwrap();
        assert_eq!(out.text, "calls <a href='#SkPaint_foo_3'>foo</a>(x, y)");
    }

    #[test]
    fn test_parameter_link() {
        let f = fixture();
        let ctx = ResolveContext::new(f.doc)
            .with_root(f.paint)
            .with_method(f.set_color);
        let resolver = Resolver::new(&f.forest);
        let config = EngineConfig::default();
        let mut ledger = ConsistencyLedger::new();
        let span = SourceSpan::new("SkPaint_Reference", "Sets color.", 1);
        let mut scanner = Scanner::new(&resolver, &config, &mut ledger, ctx);
        let out = scanner.scan(&span, ResolutionMode::Prose).unwrap();
        assert_eq!(out.text, "Sets <a href='#SkPaint_setColor_color'>color</a>.");
        assert!(scanner.last_param().is_some());
    }

    #[test]
    fn test_literal_is_verbatim() {
        let f = fixture();
        let out = scan(&f, "  SkMissing {", ResolutionMode::Literal).unwrap();
        assert_eq!(out.text, "  SkMissing {");
        assert!(out.links.is_empty());
    }

    #[test]
    fn test_first_run_loses_leading_whitespace() {
        let f = fixture();
        let out = scan(&f, "  \n plain words   ", ResolutionMode::Prose).unwrap();
        assert_eq!(out.text, "plain words");
    }

    #[test]
    fn test_formula_escapes_runs() {
        let f = fixture();
        let out = scan(&f, "a + b", ResolutionMode::Formula).unwrap();
        assert_eq!(out.text, "a&nbsp;\\+&nbsp;b");
    }

    #[test]
    fn test_quoted_strings_are_opaque_in_code() {
        let f = fixture();
        let out = scan(&f, "name = \"SkMissing\";", ResolutionMode::Code).unwrap();
        assert_eq!(out.text, "name = \"SkMissing\";");
    }

    #[rstest]
    #[case("x = kN(2)", ResolutionMode::Formula, "x&nbsp;=&nbsp;kN(2)")]
    #[case("see Foo_Bar(x) here", ResolutionMode::Formula, "see&nbsp;Foo_Bar(x)&nbsp;here")]
    #[case("call gCount(1)", ResolutionMode::Formula, "call&nbsp;gCount(1)")]
    #[case("x = kN(2)", ResolutionMode::Permissive, "x = kN(2)")]
    #[case("see Foo_Bar(x) here", ResolutionMode::Permissive, "see Foo_Bar(x) here")]
    #[case("call gCount(1)", ResolutionMode::Permissive, "call gCount(1)")]
    fn test_unresolved_call_passes_through_when_tolerated(
        #[case] text: &str,
        #[case] mode: ResolutionMode,
        #[case] expected: &str,
    ) {
        let f = fixture();
        let out = scan(&f, text, mode).unwrap();
        assert_eq!(out.text, expected);
        assert!(out.links.is_empty());
    }

    #[test]
    fn test_unresolved_call_is_fatal_in_prose() {
        let f = fixture();
        let err = scan(&f, "call gCount(1)", ResolutionMode::Prose).unwrap_err();
        assert!(matches!(err, ResolveError::NamingConventionViolation { .. }));
        let err = scan(&f, "see Foo_Bar(x) here", ResolutionMode::Prose).unwrap_err();
        assert!(err.to_string().contains("_ undefined"));
    }

    #[test]
    fn test_unbalanced_braces_in_code() {
        let f = fixture();
        let err = scan(&f, "int x; }", ResolutionMode::Code).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedScopeNesting { .. }));
        assert!(scan(&f, "{ int x; }", ResolutionMode::Code).is_ok());
    }

    #[test]
    fn test_reserved_prefix_policy() {
        let f = fixture();
        let err = scan(&f, "an SkMissing object", ResolutionMode::Prose).unwrap_err();
        assert!(matches!(err, ResolveError::NamingConventionViolation { .. }));
        let err = scan(&f, "an SkMissing object", ResolutionMode::Code).unwrap_err();
        assert!(matches!(err, ResolveError::NamingConventionViolation { .. }));
        let out = scan(&f, "an SkMissing object", ResolutionMode::Permissive).unwrap();
        assert_eq!(out.text, "an SkMissing object");
        assert!(scan(&f, "Skip this", ResolutionMode::Prose).is_ok());
    }

    #[test]
    fn test_camel_case_policy() {
        let f = fixture();
        let err = scan(&f, "call doThing now", ResolutionMode::Prose).unwrap_err();
        assert_eq!(
            err.to_string(),
            "SkPaint_Reference:1:5: missed camelCase: 'doThing'"
        );
        assert!(scan(&f, "call doThing now", ResolutionMode::Simple).is_ok());
    }

    #[test]
    fn test_undefined_capitalized_word() {
        let f = fixture();
        let err = scan(&f, "the Widget thing", ResolutionMode::Prose).unwrap_err();
        assert!(err.to_string().contains("undefined reference"));
        let out = scan(&f, "the Widget thing", ResolutionMode::Code).unwrap();
        assert_eq!(out.text, "the Widget thing");
        // Sentence-initial capitals are ordinary words.
        assert!(scan(&f, "Widgets are fine.", ResolutionMode::Prose).is_ok());
    }

    #[test]
    fn test_external_logs_undocumented_reference() {
        let f = fixture();
        let ctx = ResolveContext::new(f.doc).with_root(f.paint);
        let (out, mut ledger) = scan_with(&f, ctx, "uses SkSL here", ResolutionMode::Prose);
        assert_eq!(out.unwrap().text, "uses SkSL here");
        let snapshot = ledger.drain();
        assert_eq!(snapshot.references["undocumented"], vec![SmolStr::new("SkSL")]);
    }

    #[test]
    fn test_ledger_records_links() {
        let f = fixture();
        let ctx = ResolveContext::new(f.doc).with_root(f.paint);
        let (out, ledger) = scan_with(&f, ctx, "an SkPaint value", ResolutionMode::Prose);
        assert_eq!(out.unwrap().text, "an <a href='#SkPaint'>SkPaint</a> value");
        assert_eq!(ledger.reference_count(), 1);
    }
}
