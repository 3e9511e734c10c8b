//! Declaration store: the arena forest, scope tables and global indices.
//!
//! ```text
//! ForestBuilder ──finish()──▶ DeclForest (immutable, Sync)
//!                               ├── nodes: Vec<DeclNode>    (DeclId links)
//!                               ├── ScopeTables per root     (leaves, branches)
//!                               └── GlobalIndices            (per category)
//! ```

mod builder;
mod forest;
mod index;
mod kind;
mod native;
mod node;

pub use builder::{ForestBuilder, MAX_CLONE_SUFFIX};
pub use forest::{DeclForest, DocumentInfo};
pub use index::{GlobalIndices, IndexCategory};
pub use kind::DeclKind;
pub use native::NativeIndex;
pub use node::{DeclId, DeclNode, OverloadFlags, ScopeTables};
