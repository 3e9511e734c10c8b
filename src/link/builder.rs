//! Turning declarations into hyperlinks and anchors.

use smol_str::SmolStr;

use super::anchor::{AnchorTarget, CloneMarker, Link};
use crate::check::ConsistencyLedger;
use crate::core::text_utils::starts_lowercase;
use crate::resolve::{ResolutionMode, ResolveContext};
use crate::store::{DeclForest, DeclId, DeclKind, MAX_CLONE_SUFFIX};

/// Builds link targets and labels for declarations.
#[derive(Clone, Copy, Debug)]
pub struct LinkBuilder<'a> {
    forest: &'a DeclForest,
}

impl<'a> LinkBuilder<'a> {
    pub fn new(forest: &'a DeclForest) -> Self {
        Self { forest }
    }

    /// Link to `decl` labelled with its own local name, in prose style.
    pub fn build_link(&self, decl: DeclId, scope: &ResolveContext) -> Link {
        let written = self.forest.node(decl).bare_name();
        let written = written.rsplit("::").next().unwrap_or(written);
        self.build_link_for(decl, scope, written, ResolutionMode::Prose)
    }

    /// Link to `decl` as it was written in text resolved under `mode`.
    pub fn build_link_for(
        &self,
        decl: DeclId,
        scope: &ResolveContext,
        written: &str,
        mode: ResolutionMode,
    ) -> Link {
        let forest = self.forest;
        let mut target_id = decl;
        if forest.node(decl).kind == DeclKind::Alias {
            if let Some(parent) = forest.parent(decl) {
                target_id = parent;
            }
        }
        let node = forest.node(target_id);
        let derived = node.anchor.is_empty();

        let target = if node.kind == DeclKind::Param {
            let method_anchor = forest
                .enclosing_method(target_id)
                .map(|m| forest.node(m).anchor.as_str())
                .unwrap_or_default();
            AnchorTarget::local(format!("{method_anchor}_{written}"))
        } else {
            let fragment = match node.kind {
                DeclKind::Topic | DeclKind::Subtopic => node.name.clone(),
                _ if derived => self.derived_anchor(target_id, written),
                _ => node.anchor.clone(),
            };
            if !derived && node.doc != scope.doc {
                AnchorTarget::in_document(forest.doc_name(node.doc), fragment)
            } else {
                AnchorTarget::local(fragment)
            }
        };

        let global_enum_member =
            !derived && node.anchor.starts_with('k') && node.anchor.contains("_Sk");
        let label = label_for(written, mode, node.kind.is_method_like(), global_enum_member);
        let clones = if mode == ResolutionMode::Clone {
            self.clone_markers(target_id, &target)
        } else {
            Vec::new()
        };
        Link {
            target,
            label,
            clones,
        }
    }

    /// `Class_Parent_written` for declarations that only exist in native headers.
    fn derived_anchor(&self, decl: DeclId, written: &str) -> SmolStr {
        let forest = self.forest;
        let class = forest
            .cs_parent(decl)
            .map(|c| forest.node(c).name.as_str())
            .unwrap_or_default();
        let parent = forest
            .parent(decl)
            .map(|p| forest.node(p).name.as_str())
            .unwrap_or_default();
        SmolStr::from(format!("{class}_{parent}_{written}"))
    }

    /// Markers for every existing `name_N` clone of an overloaded method.
    fn clone_markers(&self, decl: DeclId, target: &AnchorTarget) -> Vec<CloneMarker> {
        let forest = self.forest;
        let node = forest.node(decl);
        if node.kind != DeclKind::Method || !node.overload.has_clones || node.overload.is_clone {
            return Vec::new();
        }
        let Some(owner) = forest.parent(decl).and_then(|p| forest.root_of(p)) else {
            return Vec::new();
        };
        let Some(tables) = forest.scope(owner) else {
            return Vec::new();
        };
        (2..=MAX_CLONE_SUFFIX as u8)
            .filter(|n| tables.leaf(&format!("{}_{n}", node.bare_name()), true).is_some())
            .map(|number| CloneMarker {
                number,
                target: target.suffixed(number),
            })
            .collect()
    }

    /// Render a link as HTML and record every href in the ledger.
    pub fn render_reference(
        &self,
        link: &Link,
        ledger: &mut ConsistencyLedger,
        requesting_doc: &str,
    ) -> String {
        let href = link.href();
        ledger.record_reference(requesting_doc, &href);
        let mut out = format!("<a href='{href}'>{}</a>", link.label);
        for marker in &link.clones {
            let href = marker.target.to_string();
            ledger.record_reference(requesting_doc, &href);
            out.push_str(&format!("<sup><a href='{href}'>[{}]</a></sup>", marker.number));
        }
        out
    }

    /// Render the anchor definition for `decl` and record it in the ledger.
    ///
    /// Methods that are overload clones, or that carry a deprecated,
    /// experimental or private marker, are recorded as deprecated so an
    /// unreferenced anchor is not reported.
    pub fn render_definition(
        &self,
        decl: DeclId,
        name: &str,
        ledger: &mut ConsistencyLedger,
    ) -> String {
        let forest = self.forest;
        let node = forest.node(decl);
        let mut kind = node.kind;
        if kind == DeclKind::Method {
            let incomplete = node
                .children
                .iter()
                .any(|&c| forest.node(c).kind.incomplete_allowed());
            if incomplete || node.overload.is_clone {
                kind = DeclKind::Deprecated;
            }
        }
        ledger.record_definition(forest.doc_name(node.doc), &node.anchor, kind, node.line);
        format!("<a name='{}'>{name}</a>", node.anchor)
    }

    /// Short anchor name for a class member header.
    ///
    /// A `Class_` prefix naming `root` or `root`'s parent is dropped, and
    /// `::` becomes `_`.
    pub fn link_name(&self, decl: DeclId, root: Option<DeclId>) -> String {
        let forest = self.forest;
        let mut name = forest.node(decl).name.as_str();
        if let Some((class, rest)) = name.split_once('_') {
            let matches_root = root.is_some_and(|r| {
                forest.node(r).name == class
                    || forest.parent(r).is_some_and(|p| forest.node(p).name == class)
            });
            if matches_root {
                name = rest;
            }
        }
        name.replace("::", "_")
    }
}

/// The visible text of a link.
fn label_for(written: &str, mode: ResolutionMode, method: bool, global_enum_member: bool) -> String {
    let mut label = written;
    if method && !matches!(mode, ResolutionMode::Code | ResolutionMode::Formula) {
        let call = label.find('(').unwrap_or(label.len());
        if let Some(sep) = label[..call].rfind("::") {
            label = &label[sep + 2..];
        }
    }
    let mut label = if global_enum_member || mode.is_code() {
        label.to_string()
    } else {
        label.replace('_', " ")
    };
    if label.len() > 2 && starts_lowercase(&label) && label.ends_with("()") && !mode.is_code() {
        label.truncate(label.len() - 2);
    }
    label
}
