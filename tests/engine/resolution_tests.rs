//! Resolver lookups and naming rules against the shared corpus.

use refmark::resolve::{HEURISTIC_RULES, ResolvedVia, heuristics};
use refmark::store::IndexCategory;
use refmark::{
    DeclKind, DiagnosticCollector, ForestBuilder, Location, ResolutionMode, ResolveContext,
    ResolveError, ResolveResult, Resolver, StoreError, Token,
};
use rstest::rstest;

use crate::helpers::fixtures::CORPUS;

fn resolve(
    text: &str,
    preceding: Option<char>,
    ctx: ResolveContext,
    mode: ResolutionMode,
) -> Result<ResolveResult, ResolveError> {
    let resolver = Resolver::new(&CORPUS.forest);
    let token = Token::new(text, Location::new("SkCanvas_Reference", 2, 4)).preceded_by(preceding);
    resolver.resolve(&token, &ctx, mode)
}

fn canvas_ctx() -> ResolveContext {
    CORPUS.ctx(CORPUS.canvas_doc, "SkCanvas")
}

#[rstest]
#[case("SkPaint", "SkPaint", ResolvedVia::Index(IndexCategory::Class))]
#[case("SkPaint::setColor()", "SkPaint::setColor()", ResolvedVia::Index(IndexCategory::Method))]
#[case("Widget_kMode", "Widget_kMode", ResolvedVia::Index(IndexCategory::Const))]
#[case("SkSL", "SkSL", ResolvedVia::Index(IndexCategory::External))]
#[case("foo_3", "SkCanvas::foo_3()", ResolvedVia::ScopeChain)]
#[case("kButt_Cap", "kButt_Cap", ResolvedVia::Heuristic("enum-constant"))]
fn test_resolution_path(#[case] text: &str, #[case] expected: &str, #[case] via: ResolvedVia) {
    let found = resolve(text, None, canvas_ctx(), ResolutionMode::Prose).unwrap();
    let ResolveResult::Found(resolution) = found else {
        panic!("Expected '{}' to resolve", text);
    };
    assert_eq!(CORPUS.forest.node(resolution.decl).name, expected);
    assert_eq!(resolution.via, via);
}

#[test]
fn test_rules_are_tried_in_order() {
    let names: Vec<_> = HEURISTIC_RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(
        names,
        [
            "reserved-prefix",
            "enum-constant",
            "global-prefix",
            "instance-field",
            "underscore-scope"
        ]
    );
    assert!(heuristics::rule("global-prefix").is_some());
    assert!(heuristics::rule("camel-case").is_none());
}

#[rstest]
#[case("SK_DEBUG")]
#[case("sk_sp")]
#[case("gContext")]
#[case("kNothing_Cap")]
fn test_convention_misses_are_naming_errors(#[case] text: &str) {
    let err = resolve(text, None, canvas_ctx(), ResolutionMode::Prose).unwrap_err();
    assert!(
        matches!(err, ResolveError::NamingConventionViolation { .. }),
        "Expected naming error for '{}', got {:?}",
        text,
        err
    );
    let tolerated = resolve(text, None, canvas_ctx(), ResolutionMode::Code).unwrap();
    assert_eq!(tolerated, ResolveResult::NotFound);
}

#[test]
fn test_private_enum_constants_are_ignored() {
    let result = resolve("kSecret_Private", None, canvas_ctx(), ResolutionMode::Prose).unwrap();
    assert_eq!(result, ResolveResult::NotFound);
}

#[test]
fn test_field_prefix_depends_on_member_access() {
    let after_dot = resolve("fColor", Some('.'), canvas_ctx(), ResolutionMode::Prose).unwrap();
    assert_eq!(after_dot, ResolveResult::NotFound);

    let err = resolve("fColor", Some(' '), canvas_ctx(), ResolutionMode::Prose).unwrap_err();
    assert!(err.is_unresolved());
    assert!(err.to_string().contains("fX member undefined"));
}

#[test]
fn test_underscore_name_without_member_fails() {
    let err = resolve("Widget_kNothing", None, canvas_ctx(), ResolutionMode::Prose).unwrap_err();
    assert!(err.to_string().contains("_ undefined"));
    assert_eq!(err.location().position.line, 2);

    let tolerated =
        resolve("Widget_kNothing", None, canvas_ctx(), ResolutionMode::Permissive).unwrap();
    assert_eq!(tolerated, ResolveResult::NotFound);
}

#[test]
fn test_unknown_lowercase_word_is_plain() {
    let result = resolve("opaque", None, canvas_ctx(), ResolutionMode::Prose).unwrap();
    assert_eq!(result, ResolveResult::NotFound);
}

#[test]
fn test_duplicate_scope_entry_is_rejected() {
    let mut b = ForestBuilder::new();
    let doc = b.add_document("SkPaint_Reference");
    let paint = b.add_root(doc, DeclKind::Class, "SkPaint", "SkPaint").unwrap();
    b.add_child(paint, DeclKind::Method, "SkPaint::setColor()", "SkPaint_setColor")
        .unwrap();
    let err = b
        .add_child(paint, DeclKind::Method, "SkPaint::setColor()", "SkPaint_setColor_2")
        .unwrap_err();
    assert!(matches!(
        &err,
        StoreError::DuplicateScopeEntry { scope, name, .. }
            if scope == "SkPaint" && name == "SkPaint::setColor()"
    ));
    let mut collector = DiagnosticCollector::new();
    collector.store_error(&err);
    let diag = &collector.diagnostics()[0];
    assert_eq!(diag.code.as_deref(), Some("E0004"));
    assert_eq!(diag.doc, "SkPaint_Reference");
    assert_eq!(diag.related[0].doc, "SkPaint_Reference");
}

#[test]
fn test_duplicate_global_name_is_rejected() {
    let mut b = ForestBuilder::new();
    let first = b.add_document("SkPaint_Reference");
    let second = b.add_document("SkPaint_Overview");
    b.add_root(first, DeclKind::Class, "SkPaint", "SkPaint").unwrap();
    b.add_root(second, DeclKind::Class, "SkPaint", "SkPaint").unwrap();
    let err = b.finish().unwrap_err();
    let StoreError::DuplicateScopeEntry {
        scope,
        location,
        first,
        ..
    } = &err
    else {
        panic!("Expected a duplicate entry, got {:?}", err);
    };
    assert_eq!(scope, "classes");
    assert_eq!(location.doc, "SkPaint_Overview");
    assert_eq!(first.doc, "SkPaint_Reference");
    assert!(err.to_string().starts_with("SkPaint_Overview:0:0: duplicate entry 'SkPaint'"));
}
