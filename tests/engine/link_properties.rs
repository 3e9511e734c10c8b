//! Properties every generated link must have.

use refmark::{
    ConsistencyLedger, EngineConfig, LinkBuilder, ResolutionMode, ResolveContext, Resolver,
    Scanner, SourceSpan,
};
use rstest::rstest;

use crate::helpers::assertions::assert_single_link;
use crate::helpers::fixtures::CORPUS;

#[test]
fn test_links_are_deterministic_and_non_empty() {
    let corpus = &*CORPUS;
    let links = LinkBuilder::new(&corpus.forest);
    for doc in [corpus.paint_doc, corpus.canvas_doc, corpus.widget_doc] {
        let ctx = ResolveContext::new(doc);
        for decl in corpus.anchored() {
            let first = links.build_link(decl, &ctx);
            let second = links.build_link(decl, &ctx);
            assert_eq!(first, second);
            assert!(
                !first.target.is_empty(),
                "Empty target for '{}'",
                corpus.forest.node(decl).name
            );
        }
    }
}

#[rstest]
#[case("SkPaint", "SkPaint")]
#[case("SkCanvas", "SkCanvas")]
#[case("Widget", "Widget")]
#[case("SkPaint::setColor()", "SkPaint_setColor")]
#[case("SkPaint::getColor()", "SkPaint_getColor")]
fn test_indexed_name_links_to_its_anchor(#[case] text: &str, #[case] fragment: &str) {
    let corpus = &*CORPUS;
    let resolver = Resolver::new(&corpus.forest);
    let config = EngineConfig::default();
    let mut ledger = ConsistencyLedger::new();
    let ctx = ResolveContext::new(corpus.widget_doc);
    let span = SourceSpan::new("Widget_Reference", text, 1);
    let rendered = Scanner::new(&resolver, &config, &mut ledger, ctx)
        .scan(&span, ResolutionMode::Prose)
        .unwrap();
    assert_single_link(&rendered, fragment);
}

#[test]
fn test_clone_spelling_is_idempotent() {
    let corpus = &*CORPUS;
    let resolver = Resolver::new(&corpus.forest);
    let config = EngineConfig::default();
    let ctx = corpus.ctx(corpus.canvas_doc, "SkCanvas");
    let render = |text: &str| {
        let mut ledger = ConsistencyLedger::new();
        let span = SourceSpan::new("SkCanvas_Reference", text, 1);
        Scanner::new(&resolver, &config, &mut ledger, ctx)
            .scan(&span, ResolutionMode::Prose)
            .unwrap()
    };
    let written = render("calls foo(x, y)");
    let chosen = render("calls foo_3(x, y)");
    assert_eq!(written.text, "calls <a href='#SkCanvas_foo_3'>foo</a>(x, y)");
    assert_eq!(written, chosen);
}

#[rstest]
#[case("plain words, with punctuation; and more!")]
#[case("nothing here resolves: 1 + 2 = 3")]
fn test_permissive_text_without_names_is_unchanged(#[case] text: &str) {
    let corpus = &*CORPUS;
    let resolver = Resolver::new(&corpus.forest);
    let config = EngineConfig::default();
    let mut ledger = ConsistencyLedger::new();
    let span = SourceSpan::new("SkPaint_Reference", text, 1);
    let rendered = Scanner::new(
        &resolver,
        &config,
        &mut ledger,
        ResolveContext::new(corpus.paint_doc),
    )
    .scan(&span, ResolutionMode::Permissive)
    .unwrap();
    assert_eq!(rendered.text, text);
    assert!(rendered.links.is_empty());
    assert!(ledger.is_empty());
}
