//! Fragment type
//!
//! A tag-less, attribute-less container. Templates produce fragments when
//! their markup has several top-level nodes; root-replacing reconciliation
//! looks through a fragment only at the outermost level.

use smallvec::SmallVec;

use super::{Children, Element, Node};

/// Tag-less container node
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    /// Child nodes
    pub children: Children,
}

impl Fragment {
    /// Create an empty fragment
    pub fn new() -> Self {
        Self {
            children: SmallVec::new(),
        }
    }

    /// Create a fragment from child nodes
    pub fn from_children(children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            children: children.into_iter().collect(),
        }
    }

    /// Append a child node (builder style)
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// First direct child that is an element
    pub fn first_element_child(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Check if fragment has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
