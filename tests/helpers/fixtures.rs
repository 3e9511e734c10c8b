//! A small documentation corpus shared by the integration tests.

use once_cell::sync::Lazy;
use refmark::{
    DeclForest, DeclId, DeclKind, DocId, ForestBuilder, ResolveContext,
};

/// Four documents: two classes with methods, a widget, and the
/// undocumented externals.
pub struct Corpus {
    pub forest: DeclForest,
    pub paint_doc: DocId,
    pub canvas_doc: DocId,
    pub widget_doc: DocId,
    pub undocumented_doc: DocId,
}

pub static CORPUS: Lazy<Corpus> = Lazy::new(build_corpus);

fn build_corpus() -> Corpus {
    let mut b = ForestBuilder::new();
    let paint_doc = b.add_document("SkPaint_Reference");
    let canvas_doc = b.add_document("SkCanvas_Reference");
    let widget_doc = b.add_document("Widget_Reference");
    let undocumented_doc = b.add_document("undocumented");

    let paint = b
        .add_root(paint_doc, DeclKind::Class, "SkPaint", "SkPaint")
        .unwrap();
    let set_color = b
        .add_child(paint, DeclKind::Method, "SkPaint::setColor()", "SkPaint_setColor")
        .unwrap();
    b.set_signature(set_color, "(SkColor color)").unwrap();
    b.add_child(set_color, DeclKind::Param, "color", "").unwrap();
    let get_color = b
        .add_child(paint, DeclKind::Method, "SkPaint::getColor()", "SkPaint_getColor")
        .unwrap();
    b.set_signature(get_color, "()").unwrap();
    let cap = b
        .add_child(paint, DeclKind::Enum, "SkPaint::Cap", "SkPaint_Cap")
        .unwrap();
    b.add_child(cap, DeclKind::Const, "kButt_Cap", "SkPaint_kButt_Cap")
        .unwrap();
    b.add_child(cap, DeclKind::Const, "kRound_Cap", "SkPaint_kRound_Cap")
        .unwrap();

    let canvas = b
        .add_root(canvas_doc, DeclKind::Class, "SkCanvas", "SkCanvas")
        .unwrap();
    for (name, sig) in [
        ("SkCanvas::foo()", "(int a)"),
        ("SkCanvas::foo_2()", "(int a, int b, int c)"),
        ("SkCanvas::foo_3()", "(int x, int y)"),
        ("SkCanvas::foo_4()", "(const SkPoint& p)"),
    ] {
        let anchor = name.trim_end_matches("()").replace("::", "_");
        let id = b.add_child(canvas, DeclKind::Method, name, &anchor).unwrap();
        b.set_signature(id, sig).unwrap();
    }
    let draw_paint = b
        .add_child(canvas, DeclKind::Method, "SkCanvas::drawPaint()", "SkCanvas_drawPaint")
        .unwrap();
    b.set_signature(draw_paint, "(const SkPaint& paint)").unwrap();
    b.add_child(draw_paint, DeclKind::Param, "paint", "").unwrap();

    let widget = b
        .add_root(widget_doc, DeclKind::Class, "Widget", "Widget")
        .unwrap();
    b.add_child(widget, DeclKind::Const, "Widget_kMode", "Widget_kMode")
        .unwrap();

    b.add_root(undocumented_doc, DeclKind::External, "SkSL", "SkSL")
        .unwrap();

    Corpus {
        forest: b.finish().unwrap(),
        paint_doc,
        canvas_doc,
        widget_doc,
        undocumented_doc,
    }
}

impl Corpus {
    /// The declaration named `name`; panics when absent.
    pub fn decl(&self, name: &str) -> DeclId {
        self.forest
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
            .unwrap_or_else(|| panic!("Expected declaration '{}' in corpus", name))
    }

    /// Context for generating `doc` while documenting the class `root`.
    pub fn ctx(&self, doc: DocId, root: &str) -> ResolveContext {
        ResolveContext::new(doc).with_root(self.decl(root))
    }

    /// Every declaration that carries its own anchor.
    pub fn anchored(&self) -> Vec<DeclId> {
        self.forest
            .iter()
            .filter(|(_, node)| !node.anchor.is_empty())
            .map(|(id, _)| id)
            .collect()
    }
}
