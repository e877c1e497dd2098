//! Target tree node types.
//!
//! This module provides `Element`, `Text`, `Fragment` and the `Node` sum type.
//! These are plain values: a template materializes them fresh for every
//! reconciliation pass and the reconciler only reads them (cloning into the
//! live tree where needed).
//!
//! [`NodeView`] abstracts read access so that structural equality works the
//! same way over value nodes and live-tree nodes.

mod element;
mod fragment;
mod text;
mod view;

pub use element::Element;
pub use fragment::Fragment;
pub use text::Text;
pub use view::NodeView;

use smallvec::SmallVec;

use crate::algo::equal;

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;

/// Node variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element,
    Text,
    Fragment,
}

impl NodeKind {
    /// Whether nodes of this kind hold children
    #[inline]
    pub fn is_container(self) -> bool {
        !matches!(self, NodeKind::Text)
    }
}

/// Node in a target tree - Element, Text or Fragment.
///
/// `PartialEq` is structural equality: attribute order is ignored,
/// child order is not.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
    Fragment(Box<Fragment>),
}

impl Node {
    impl_enum_accessors!(
        element => Element(Element),
        text => Text(Text),
        fragment => Fragment(Fragment),
    );

    /// Create an element node with no attributes or children
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Box::new(Element::new(tag)))
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    /// Create a fragment from child nodes
    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Fragment(Box::new(Fragment::from_children(children)))
    }

    /// Variant discriminant
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::Fragment(_) => NodeKind::Fragment,
        }
    }

    /// Tag name (elements only)
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    /// Attributes (empty for text and fragments)
    #[inline]
    pub fn attrs(&self) -> &[(String, String)] {
        match self {
            Node::Element(e) => &e.attrs,
            _ => &[],
        }
    }

    /// Direct children (empty for text)
    #[inline]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Fragment(f) => &f.children,
            Node::Text(_) => &[],
        }
    }

    /// Own content for text nodes, concatenated descendant text otherwise
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.content.clone(),
            _ => {
                let mut buf = String::new();
                collect_text(self.children(), &mut buf);
                buf
            }
        }
    }

    /// First direct child that is an element
    pub fn first_element_child(&self) -> Option<&Node> {
        self.children().iter().find(|n| n.is_element())
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

pub(crate) fn collect_text(children: &[Node], buf: &mut String) {
    let mut stack: Vec<&Node> = children.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            Node::Text(t) => buf.push_str(&t.content),
            other => stack.extend(other.children().iter().rev()),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}

impl Eq for Node {}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Fragment> for Node {
    fn from(frag: Fragment) -> Self {
        Node::Fragment(Box::new(frag))
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::text(content)
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Node::text(content)
    }
}
