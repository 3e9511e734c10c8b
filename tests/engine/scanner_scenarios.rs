//! End-to-end generation of single spans through a document session.

use refmark::{Batch, DeclKind, DocId, EngineConfig, ForestBuilder, ResolutionMode, ResolveError};

use crate::helpers::fixtures::CORPUS;

fn batch() -> Batch<'static> {
    let mut batch = Batch::new(&CORPUS.forest, EngineConfig::default());
    batch.begin();
    batch
}

#[test]
fn test_method_reference_in_its_own_document() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.paint_doc);
    session.set_root(Some(CORPUS.decl("SkPaint")));
    let rendered = session
        .scan("See SkPaint::setColor() for details.", 1, ResolutionMode::Prose)
        .unwrap();
    assert_eq!(
        rendered.text,
        "See <a href='#SkPaint_setColor'>setColor</a>() for details."
    );
    assert!(rendered.links.iter().all(|link| link.clones.is_empty()));
    assert!(!session.finish().failed);
}

#[test]
fn test_call_arguments_select_the_clone() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.canvas_doc);
    session.set_root(Some(CORPUS.decl("SkCanvas")));
    let out = session
        .resolve_out("calls foo_2(x, y)", 1, ResolutionMode::Prose)
        .unwrap();
    assert_eq!(out, "calls <a href='#SkCanvas_foo_3'>foo</a>(x, y)");
}

#[test]
fn test_call_from_another_document_gets_prefix() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.paint_doc);
    session.set_root(Some(CORPUS.decl("SkPaint")));
    let out = session
        .resolve_out("then SkCanvas::drawPaint(paint) draws", 1, ResolutionMode::Prose)
        .unwrap();
    assert_eq!(
        out,
        "then <a href='SkCanvas_Reference#SkCanvas_drawPaint'>drawPaint</a>(paint) draws"
    );
}

#[test]
fn test_parameter_link_inside_method() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.paint_doc);
    session.set_root(Some(CORPUS.decl("SkPaint")));
    session.set_method(Some(CORPUS.decl("SkPaint::setColor()")));
    let out = session
        .resolve_out("Sets color to opaque.", 1, ResolutionMode::Prose)
        .unwrap();
    assert_eq!(
        out,
        "Sets <a href='#SkPaint_setColor_color'>color</a> to opaque."
    );
}

#[test]
fn test_resolve_out_tidies_paragraphs() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.widget_doc);
    let out = session
        .resolve_out("\n  first line  \n\n\n  second line\n##", 3, ResolutionMode::Prose)
        .unwrap();
    assert_eq!(out, "first line\n\nsecond line");
}

#[test]
fn test_literal_spans_are_untouched() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.widget_doc);
    let text = "  SK_DEBUG { SkMissing ##";
    let out = session.resolve_out(text, 1, ResolutionMode::Literal).unwrap();
    assert_eq!(out, text);
}

#[test]
fn test_formula_escapes_markdown() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.widget_doc);
    let out = session
        .resolve_out("a + b - c", 1, ResolutionMode::Formula)
        .unwrap();
    assert_eq!(out, "a&nbsp;\\+&nbsp;b&nbsp;\\-&nbsp;c");
}

#[test]
fn test_unbalanced_braces_fail_the_document() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.paint_doc);
    session.set_root(Some(CORPUS.decl("SkPaint")));
    let err = session
        .scan("int width; } extra", 7, ResolutionMode::Code)
        .unwrap_err();
    assert!(matches!(err, ResolveError::MalformedScopeNesting { .. }));
    assert_eq!(err.location().position.line, 7);
    let outcome = session.finish();
    assert!(outcome.failed);
    assert_eq!(outcome.errors.len(), 1);
}

#[test]
fn test_reserved_prefix_is_a_naming_error() {
    let mut batch = batch();
    let mut session = batch.document(CORPUS.widget_doc);
    let err = session
        .scan("set SK_SUPPORT_GPU first", 1, ResolutionMode::Prose)
        .unwrap_err();
    assert!(matches!(err, ResolveError::NamingConventionViolation { .. }));
    assert!(
        session
            .scan("set SK_SUPPORT_GPU first", 1, ResolutionMode::Permissive)
            .is_ok()
    );
}

fn native_forest() -> (refmark::DeclForest, refmark::DeclId, refmark::DeclId, refmark::DeclId) {
    let source = "#Param color  ARGB value.\n#Param alpha  opacity\n";
    let mut b = ForestBuilder::new();
    let doc = b.add_document_with_source("SkPaint_Reference", source);
    let paint = b.add_root(doc, DeclKind::Class, "SkPaint", "SkPaint").unwrap();
    let set_color = b
        .add_child(paint, DeclKind::Method, "SkPaint::setColor()", "SkPaint_setColor")
        .unwrap();
    b.set_signature(set_color, "(int color, int alpha)").unwrap();
    let color = b.add_child(set_color, DeclKind::Param, "color", "").unwrap();
    b.set_range(color, 14.into(), 25.into(), 1);
    let alpha = b.add_child(set_color, DeclKind::Param, "alpha", "").unwrap();
    b.set_range(alpha, 40.into(), 47.into(), 2);
    let settings = b
        .add_native(
            paint,
            DeclKind::Struct,
            "SkPaint::Settings",
            Some("class SkPaint { void setColor(int color, int alpha); };##".to_string()),
        )
        .unwrap();
    (b.finish().unwrap(), settings, color, alpha)
}

#[test]
fn test_native_code_block_is_resolved_as_code() {
    let (forest, block, _, _) = native_forest();
    let mut batch = Batch::new(&forest, EngineConfig::default());
    batch.begin();
    let mut session = batch.document(DocId::new(0));
    session.set_root(forest.indices().class("SkPaint"));
    let out = session.code_block(block).unwrap();
    assert_eq!(
        out.as_deref(),
        Some(
            "class <a href='#SkPaint'>SkPaint</a> { void \
             <a href='#SkPaint_setColor'>setColor</a>(int color, int alpha); };"
        )
    );
    let root = forest.indices().class("SkPaint").unwrap();
    assert_eq!(session.code_block(root).unwrap(), None);
}

#[test]
fn test_description_lint_fails_the_document() {
    let (forest, _, color, alpha) = native_forest();
    let mut batch = Batch::new(&forest, EngineConfig::default());
    batch.begin();
    let mut session = batch.document(DocId::new(0));
    session.set_root(forest.indices().class("SkPaint"));
    assert!(session.lint(alpha).is_ok());
    let err = session.lint(color).unwrap_err();
    assert!(matches!(err, ResolveError::DescriptionStyle { .. }));
    assert!(session.finish().failed);

    let report = batch.finish();
    assert_eq!(report.failed_documents().count(), 1);
    assert_eq!(report.diagnostics[0].code.as_deref(), Some("E0006"));
}

fn drawing_forest() -> refmark::DeclForest {
    let mut b = ForestBuilder::new();
    let doc = b.add_document("Drawing_Reference");
    let paint = b.add_root(doc, DeclKind::Class, "SkPaint", "SkPaint").unwrap();
    let set_color = b
        .add_child(paint, DeclKind::Method, "SkPaint::setColor()", "SkPaint_setColor")
        .unwrap();
    b.set_signature(set_color, "()").unwrap();
    let lattice = b
        .add_child(paint, DeclKind::Struct, "SkPaint::Lattice", "SkPaint_Lattice")
        .unwrap();
    b.add_child(lattice, DeclKind::Member, "fCount", "SkPaint_Lattice_fCount")
        .unwrap();
    let canvas = b.add_root(doc, DeclKind::Class, "SkCanvas", "SkCanvas").unwrap();
    let draw_rect = b
        .add_child(canvas, DeclKind::Method, "SkCanvas::drawRect()", "SkCanvas_drawRect")
        .unwrap();
    b.set_signature(draw_rect, "()").unwrap();
    b.finish().unwrap()
}

fn scan_code(forest: &refmark::DeclForest, text: &str) -> String {
    let mut batch = Batch::new(forest, EngineConfig::default());
    batch.begin();
    let mut session = batch.document(DocId::new(0));
    session.set_root(forest.indices().class("SkPaint"));
    session.scan(text, 1, ResolutionMode::Code).unwrap().text
}

#[test]
fn test_class_braces_move_and_restore_the_lookup_scope() {
    let forest = drawing_forest();
    let out = scan_code(&forest, "class SkCanvas { void drawRect(); } setColor();");
    assert_eq!(
        out,
        "class <a href='#SkCanvas'>SkCanvas</a> { void \
         <a href='#SkCanvas_drawRect'>drawRect</a>(); } \
         <a href='#SkPaint_setColor'>setColor</a>();"
    );
}

#[test]
fn test_plain_braces_keep_the_lookup_scope() {
    let forest = drawing_forest();
    let out = scan_code(&forest, "{ void drawRect(); setColor(); }");
    assert_eq!(
        out,
        "{ void drawRect(); <a href='#SkPaint_setColor'>setColor</a>(); }"
    );
}

#[test]
fn test_nested_struct_braces_resolve_members() {
    let forest = drawing_forest();
    let out = scan_code(&forest, "struct Lattice { int fCount; };");
    assert_eq!(
        out,
        "struct <a href='#SkPaint_Lattice'>Lattice</a> { int \
         <a href='#SkPaint_Lattice_fCount'>fCount</a>; };"
    );
}
