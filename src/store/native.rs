//! Access to declarations parsed from native headers.

use super::forest::DeclForest;
use super::node::DeclId;

/// Lookup of declarations that exist in native headers but may have no
/// markup of their own. Code blocks use it to link undocumented symbols.
pub trait NativeIndex: Sync {
    /// Find a declaration by its qualified name, e.g. `SkPaint::Cap`.
    fn lookup(&self, qualified: &str) -> Option<DeclId>;

    /// The elided code block rendered for a class, struct or enum.
    fn elided_code_block(&self, decl: DeclId) -> Option<String>;
}

impl NativeIndex for DeclForest {
    fn lookup(&self, qualified: &str) -> Option<DeclId> {
        self.indices.native(qualified)
    }

    fn elided_code_block(&self, decl: DeclId) -> Option<String> {
        self.native_blocks.get(&decl).cloned()
    }
}
