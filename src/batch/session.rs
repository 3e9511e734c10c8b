//! Per-document generation state.

use smol_str::SmolStr;

use super::BatchState;
use crate::base::DocId;
use crate::check::check_param_return_body;
use crate::config::EngineConfig;
use crate::diagnostics::Diagnostic;
use crate::error::ResolveError;
use crate::link::LinkBuilder;
use crate::resolve::{ResolutionMode, ResolveContext, Resolver};
use crate::scan::{RenderedText, Scanner, SourceSpan, normalize_paragraphs};
use crate::store::DeclId;

/// What became of one document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentOutcome {
    pub doc: DocId,
    pub name: SmolStr,
    /// A fatal error stopped part of the document.
    pub failed: bool,
    pub spans: usize,
    pub links: usize,
    pub errors: Vec<Diagnostic>,
}

/// Generation of one document: its resolution context, and the shared
/// ledger it records anchors into.
pub struct DocumentSession<'b, 'a> {
    resolver: Resolver<'a>,
    config: &'b EngineConfig,
    state: &'b mut BatchState,
    ctx: ResolveContext,
    name: SmolStr,
    in_description: bool,
    last_param: Option<DeclId>,
    spans: usize,
    links: usize,
    errors: Vec<Diagnostic>,
}

impl<'b, 'a> DocumentSession<'b, 'a> {
    pub(super) fn new(
        resolver: Resolver<'a>,
        config: &'b EngineConfig,
        state: &'b mut BatchState,
        doc: DocId,
    ) -> Self {
        let name = SmolStr::new(resolver.forest().doc_name(doc));
        tracing::debug!(doc = %name, "[SESSION] begin document");
        Self {
            resolver,
            config,
            state,
            ctx: ResolveContext::new(doc),
            name,
            in_description: false,
            last_param: None,
            spans: 0,
            links: 0,
            errors: Vec::new(),
        }
    }

    pub fn doc(&self) -> DocId {
        self.ctx.doc
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &ResolveContext {
        &self.ctx
    }

    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    // ========================================================================
    // Context
    // ========================================================================

    /// Start documenting `root`; the subtopic and method are cleared.
    pub fn set_root(&mut self, root: Option<DeclId>) {
        self.ctx.root = root;
        self.ctx.subtopic = None;
        self.ctx.method = None;
    }

    pub fn set_subtopic(&mut self, subtopic: Option<DeclId>) {
        self.ctx.subtopic = subtopic;
    }

    /// Start documenting `method`. Parameter tracking starts over.
    pub fn set_method(&mut self, method: Option<DeclId>) {
        self.ctx.method = method;
        self.last_param = None;
    }

    pub fn set_enum_class(&mut self, enum_class: Option<DeclId>) {
        self.ctx.enum_class = enum_class;
    }

    pub fn set_in_description(&mut self, in_description: bool) {
        self.in_description = in_description;
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Substitute links in a span starting at document line `first_line`.
    pub fn scan(
        &mut self,
        text: &str,
        first_line: u32,
        mode: ResolutionMode,
    ) -> Result<RenderedText, ResolveError> {
        let span = SourceSpan::new(self.name.clone(), text, first_line);
        self.scan_span(&span, mode)
    }

    fn scan_span(
        &mut self,
        span: &SourceSpan<'_>,
        mode: ResolutionMode,
    ) -> Result<RenderedText, ResolveError> {
        self.spans += 1;
        let mut scanner = Scanner::new(&self.resolver, self.config, &mut self.state.ledger, self.ctx)
            .in_description(self.in_description)
            .with_last_param(self.last_param);
        let result = scanner.scan(span, mode);
        let last_param = scanner.last_param();
        self.last_param = last_param;
        match result {
            Ok(rendered) => {
                self.links += rendered.links.len();
                Ok(rendered)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Resolve a span for output.
    ///
    /// Literal text is copied as is. Otherwise trailing markup characters are
    /// dropped, the span is scanned, and the result is tidied line by line.
    pub fn resolve_out(
        &mut self,
        text: &str,
        first_line: u32,
        mode: ResolutionMode,
    ) -> Result<String, ResolveError> {
        if mode == ResolutionMode::Literal {
            self.spans += 1;
            return Ok(text.to_string());
        }
        let text = text.trim_end_matches(self.config.markup_char);
        if text.is_empty() {
            return Ok(String::new());
        }
        let span = SourceSpan::new(self.name.clone(), text, first_line);
        let rendered = self.scan_span(&span, mode)?;
        Ok(normalize_paragraphs(&rendered.text))
    }

    /// Render the elided native code block of a class, struct or enum,
    /// resolved as code.
    pub fn code_block(&mut self, decl: DeclId) -> Result<Option<String>, ResolveError> {
        let Some(block) = self.resolver.native().elided_code_block(decl) else {
            return Ok(None);
        };
        let line = self.resolver.forest().node(decl).line;
        self.resolve_out(&block, line, ResolutionMode::Code).map(Some)
    }

    /// Link to `decl` from this document, labelled with its local name.
    pub fn link(&mut self, decl: DeclId) -> String {
        let links = LinkBuilder::new(self.resolver.forest());
        let link = links.build_link(decl, &self.ctx);
        self.links += 1;
        links.render_reference(&link, &mut self.state.ledger, &self.name)
    }

    /// Emit the anchor for `decl`, displayed as `name`.
    pub fn define(&mut self, decl: DeclId, name: &str) -> String {
        LinkBuilder::new(self.resolver.forest()).render_definition(
            decl,
            name,
            &mut self.state.ledger,
        )
    }

    /// Lint the description of a parameter or return value.
    pub fn lint(&mut self, decl: DeclId) -> Result<(), ResolveError> {
        check_param_return_body(&self.resolver, decl, &self.ctx).map_err(|err| self.fail(err))
    }

    fn fail(&mut self, err: ResolveError) -> ResolveError {
        tracing::debug!(doc = %self.name, error = %err, "[SESSION] fatal error");
        self.errors.push(Diagnostic::from(&err));
        err
    }

    /// Fold this document's outcome into the batch.
    pub fn finish(self) -> DocumentOutcome {
        let outcome = DocumentOutcome {
            doc: self.ctx.doc,
            name: self.name,
            failed: !self.errors.is_empty(),
            spans: self.spans,
            links: self.links,
            errors: self.errors,
        };
        tracing::debug!(
            doc = %outcome.name,
            spans = outcome.spans,
            links = outcome.links,
            failed = outcome.failed,
            "[SESSION] end document"
        );
        for error in &outcome.errors {
            self.state.diagnostics.add(error.clone());
        }
        self.state.documents.push(outcome.clone());
        outcome
    }
}
