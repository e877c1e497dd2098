//! Journal entries for applied live-tree primitives.
//!
//! Only mutations of attached structure and content are recorded; building
//! a detached subtree with [`LiveTree::create`](super::LiveTree::create) is
//! not a mutation.

use crate::id::NodeId;

/// One applied primitive, in application order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Append { parent: NodeId, child: NodeId },
    InsertBefore { parent: NodeId, child: NodeId, reference: NodeId },
    Remove { parent: NodeId, child: NodeId },
    Replace { parent: NodeId, new: NodeId, old: NodeId },
    SetAttr { node: NodeId, name: String },
    RemoveAttr { node: NodeId, name: String },
    SetText { node: NodeId },
}
