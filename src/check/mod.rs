//! Corpus-wide checks run after link generation.
//!
//! - [`ConsistencyLedger`] collects every anchor definition and reference.
//! - [`run_consistency_check`] reports anchors nobody links and links to
//!   anchors nobody defines.
//! - [`check_param_return_body`] lints parameter and return descriptions.

mod checker;
mod ledger;
mod lint;

pub use checker::{CheckReport, run_consistency_check};
pub use ledger::{AnchorRecord, AnchorReference, ConsistencyLedger, LedgerSnapshot};
pub use lint::check_param_return_body;
