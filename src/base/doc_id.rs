//! Output document identifiers.

/// Identifies one output document (the `fileIdentity` of a declaration).
///
/// Ids are dense and handed out by the forest builder in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocId(u32);

impl DocId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw index, usable to address per-document tables.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}
