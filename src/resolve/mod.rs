//! Symbol resolution: from a written token to the declaration it names.
//!
//! - [`Resolver`] runs the lookup chain (indices, scope chain, qualified
//!   names, naming-convention rules, topics, native declarations).
//! - [`Disambiguator`] picks one member of an overload family from a call's
//!   argument list.
//! - [`ResolutionMode`] decides which misses are defects.

mod context;
pub mod heuristics;
mod mode;
mod overload;
mod resolver;
pub mod signature;

pub use context::{ResolveContext, Token};
pub use heuristics::{HEURISTIC_RULES, HeuristicRule, RuleOutcome};
pub use mode::ResolutionMode;
pub use overload::{Disambiguator, Overload, OverloadChoice};
pub use resolver::{Resolution, ResolveResult, ResolvedVia, Resolver};
pub use signature::{Signature, SignatureParam};
