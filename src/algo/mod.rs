//! Algorithm implementations for tree reconciliation.
//!
//! - `equal`: structural equality over any `NodeView`
//! - `attrs`: attribute differ
//! - `matcher`: greedy earliest-match child pairing + replace merge
//! - `reconcile`: the reconciler driving all of the above

mod attrs;
mod equal;
mod matcher;
mod reconcile;

pub use attrs::diff_attrs;
pub use equal::equal;
pub use matcher::{match_children, merge_replacements, pair_children, Step};
pub use reconcile::{
    reconcile, reconcile_children, reconcile_with, PassReport, PassStats, ReconcileConfig,
    ReconcileMode, Reconciler,
};
