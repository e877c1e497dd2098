//! Read-only structural view over tree nodes.
//!
//! Implemented for `&Node` (target trees) and for
//! [`LiveRef`](crate::live::LiveRef) (live trees), so the same equality
//! routine compares any combination of the two.

use super::{Node, NodeKind};

/// Read-only structural access to a node
pub trait NodeView<'a>: Copy {
    /// Iterator over direct children
    type Children: Iterator<Item = Self>;

    /// Variant discriminant
    fn kind(self) -> NodeKind;

    /// Tag name (elements only)
    fn tag(self) -> Option<&'a str>;

    /// Own content (text nodes only)
    fn text(self) -> Option<&'a str>;

    /// Attributes (empty for text and fragments)
    fn attrs(self) -> &'a [(String, String)];

    /// Number of direct children
    fn child_count(self) -> usize;

    /// Direct children in order
    fn children(self) -> Self::Children;
}

impl<'a> NodeView<'a> for &'a Node {
    type Children = std::slice::Iter<'a, Node>;

    #[inline]
    fn kind(self) -> NodeKind {
        Node::kind(self)
    }

    #[inline]
    fn tag(self) -> Option<&'a str> {
        Node::tag(self)
    }

    #[inline]
    fn text(self) -> Option<&'a str> {
        self.as_text().map(|t| t.content.as_str())
    }

    #[inline]
    fn attrs(self) -> &'a [(String, String)] {
        Node::attrs(self)
    }

    #[inline]
    fn child_count(self) -> usize {
        Node::children(self).len()
    }

    #[inline]
    fn children(self) -> Self::Children {
        Node::children(self).iter()
    }
}
