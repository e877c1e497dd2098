//! Live node identity
//!
//! A [`NodeId`] is a generational handle into a [`LiveTree`](crate::live::LiveTree)
//! arena. It is the identity that external bindings (event handlers, focus,
//! scroll position) are keyed by, so reconciliation preserves it wherever a
//! live node survives a pass.
//!
//! When a node is removed its slot is recycled with a bumped generation:
//! an old handle never aliases the node created later in the same slot.

use std::fmt;

/// Generational handle of a live node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Build a handle from raw parts.
    ///
    /// Mostly useful in tests; handles handed out by a tree are the only ones
    /// guaranteed to resolve.
    #[inline]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot index
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_parts() {
        let id = NodeId::from_raw_parts(7, 3);
        assert_eq!(id.index(), 7);
        assert_eq!(id.generation(), 3);
        assert_eq!(id.to_string(), "#7v3");
        assert_ne!(id, NodeId::from_raw_parts(7, 4));
    }
}
