//! Attribute differ
//!
//! Brings a live element's attributes in line with a target element:
//! 1. every target attribute missing or different on the live node is set
//!    (target order)
//! 2. every live attribute absent from the target is removed (live order,
//!    taken after step 1)
//!
//! Sets always precede removals, so an attribute whose value changes is
//! never transiently absent.

use tracing::trace;

use crate::error::ReconcileResult;
use crate::id::NodeId;
use crate::live::LiveTree;

/// Apply attribute changes to `live` in place, returning the change count
pub fn diff_attrs(
    tree: &mut LiveTree,
    live: NodeId,
    target: &[(String, String)],
) -> ReconcileResult<usize> {
    let mut changes = 0;

    for (name, value) in target {
        if tree.get_attr(live, name) != Some(value.as_str()) {
            trace!(node = %live, %name, %value, "set attribute");
            tree.set_attr(live, name.clone(), value.clone())?;
            changes += 1;
        }
    }

    let stale: Vec<String> = tree
        .attrs(live)
        .iter()
        .filter(|(name, _)| !target.iter().any(|(k, _)| k == name))
        .map(|(name, _)| name.clone())
        .collect();
    for name in stale {
        trace!(node = %live, %name, "remove attribute");
        tree.remove_attr(live, &name)?;
        changes += 1;
    }

    Ok(changes)
}
