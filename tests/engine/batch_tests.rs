//! Whole batches: definitions, references and the consistency check.

use refmark::{Batch, DocId, DocumentSession, EngineConfig, ResolutionMode};

use crate::helpers::assertions::assert_code_count;
use crate::helpers::fixtures::CORPUS;

fn all_docs() -> [DocId; 4] {
    [
        CORPUS.paint_doc,
        CORPUS.canvas_doc,
        CORPUS.widget_doc,
        CORPUS.undocumented_doc,
    ]
}

/// Emit an anchor for every declaration that lives in the session's document.
fn define_own(session: &mut DocumentSession<'_, '_>) {
    let doc = session.doc();
    for decl in CORPUS.anchored() {
        let node = CORPUS.forest.node(decl);
        if node.doc == doc {
            let name = node.name.clone();
            session.define(decl, &name);
        }
    }
}

#[test]
fn test_unreferenced_definition_is_reported_once() {
    let mut batch = Batch::new(&CORPUS.forest, EngineConfig::default());
    batch.begin();

    let mut widget = batch.document(CORPUS.widget_doc);
    widget.define(CORPUS.decl("Widget"), "Widget");
    widget.define(CORPUS.decl("Widget_kMode"), "kMode");
    widget.finish();

    let mut paint = batch.document(CORPUS.paint_doc);
    let href = paint.link(CORPUS.decl("Widget"));
    assert_eq!(href, "<a href='Widget_Reference#Widget'>Widget</a>");
    paint.finish();

    let report = batch.finish();
    assert_eq!(report.check.missing_references, 1);
    assert_eq!(report.check.missing_definitions, 0);
    assert_code_count(&report, "W0001", 1);
    let finding = &report.check.diagnostics[0];
    assert_eq!(finding.doc, "Widget_Reference");
    assert_eq!(finding.message, "missing ref: 'Widget_kMode'");
}

#[test]
fn test_every_link_lands_on_a_definition() {
    let mut batch = Batch::new(&CORPUS.forest, EngineConfig::default());
    batch.begin();
    for doc in all_docs() {
        let mut session = batch.document(doc);
        define_own(&mut session);
        session.finish();
    }

    let mut canvas = batch.document(CORPUS.canvas_doc);
    for decl in CORPUS.anchored() {
        let rendered = canvas.link(decl);
        assert!(rendered.starts_with("<a href='"), "Unexpected link {}", rendered);
    }
    let outcome = canvas.finish();
    assert_eq!(outcome.links, CORPUS.anchored().len());

    let report = batch.finish();
    assert_eq!(report.check.missing_definitions, 0);
    assert_eq!(report.check.missing_references, 0);
    assert!(report.is_clean());
}

#[test]
fn test_link_to_undefined_anchor_is_reported() {
    let mut batch = Batch::new(&CORPUS.forest, EngineConfig::default());
    batch.begin();
    let mut session = batch.document(CORPUS.widget_doc);
    session
        .scan("uses SkCanvas::drawPaint(paint)", 1, ResolutionMode::Prose)
        .unwrap();
    session.finish();

    let report = batch.finish();
    assert_eq!(report.check.missing_definitions, 1);
    assert_code_count(&report, "W0002", 1);
    assert_eq!(
        report.check.diagnostics[0].message,
        "missing def: 'SkCanvas_Reference#SkCanvas_drawPaint'"
    );
}

#[test]
fn test_parallel_batch_matches_sequential_batch() {
    let docs = all_docs();
    let generate = |session: &mut DocumentSession<'_, '_>| {
        define_own(session);
        if session.doc() == CORPUS.widget_doc {
            session.scan("an SkMissing value", 9, ResolutionMode::Prose)?;
        }
        session.resolve_out(
            "draw with SkPaint via SkCanvas::drawPaint(paint).",
            1,
            ResolutionMode::Prose,
        )
    };

    let mut parallel = Batch::new(&CORPUS.forest, EngineConfig::default());
    parallel.begin();
    let texts = parallel.run_parallel(&docs, generate);
    let parallel = parallel.finish();

    let mut sequential = Batch::new(&CORPUS.forest, EngineConfig::default());
    sequential.begin();
    let mut expected = Vec::new();
    for &doc in &docs {
        let mut session = sequential.document(doc);
        expected.push(generate(&mut session).ok());
        session.finish();
    }
    let sequential = sequential.finish();

    assert_eq!(texts, expected);
    assert_eq!(texts[2], None);
    assert_eq!(
        texts[0].as_deref(),
        Some(
            "draw with <a href='#SkPaint'>SkPaint</a> via \
             <a href='SkCanvas_Reference#SkCanvas_drawPaint'>drawPaint</a>(paint)."
        )
    );
    assert_eq!(parallel.documents, sequential.documents);
    assert_eq!(parallel.diagnostics, sequential.diagnostics);
    assert_eq!(parallel.check.total(), sequential.check.total());
    assert_eq!(parallel.failed_documents().count(), 1);
    assert_code_count(&parallel, "E0005", 1);
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serializes_to_json() {
    let mut batch = Batch::new(&CORPUS.forest, EngineConfig::default());
    batch.begin();
    let mut widget = batch.document(CORPUS.widget_doc);
    widget.define(CORPUS.decl("Widget_kMode"), "kMode");
    widget.finish();
    let json = batch.finish().to_json().unwrap();
    assert!(json.contains("\"missing_references\": 1"));
    assert!(json.contains("missing ref: 'Widget_kMode'"));
}
