//! Link values produced by the [`LinkBuilder`](super::LinkBuilder).

use smol_str::SmolStr;

/// Where a link points: `document#fragment`, or `#fragment` within the
/// requesting document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorTarget {
    pub document: Option<SmolStr>,
    pub fragment: SmolStr,
}

impl AnchorTarget {
    pub fn local(fragment: impl Into<SmolStr>) -> Self {
        Self {
            document: None,
            fragment: fragment.into(),
        }
    }

    pub fn in_document(document: impl Into<SmolStr>, fragment: impl Into<SmolStr>) -> Self {
        Self {
            document: Some(document.into()),
            fragment: fragment.into(),
        }
    }

    /// The same document with `_suffix` appended to the fragment.
    pub fn suffixed(&self, suffix: impl std::fmt::Display) -> Self {
        Self {
            document: self.document.clone(),
            fragment: SmolStr::from(format!("{}_{suffix}", self.fragment)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }
}

impl std::fmt::Display for AnchorTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(document) = &self.document {
            f.write_str(document)?;
        }
        write!(f, "#{}", self.fragment)
    }
}

/// Superscript link to one overload clone, rendered as `[N]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CloneMarker {
    pub number: u8,
    pub target: AnchorTarget,
}

/// A resolved reference ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub target: AnchorTarget,
    pub label: String,
    pub clones: Vec<CloneMarker>,
}

impl Link {
    pub fn href(&self) -> String {
        self.target.to_string()
    }
}
