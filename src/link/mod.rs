//! Link generation: targets, labels, clone markers and anchor definitions.

mod anchor;
mod builder;

pub use anchor::{AnchorTarget, CloneMarker, Link};
pub use builder::LinkBuilder;
