//! Live node storage and borrowed views.

use smallvec::SmallVec;

use crate::attr::Attrs;
use crate::id::NodeId;
use crate::node::{NodeKind, NodeView};

use super::LiveTree;

/// Per-variant payload of a live node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveData {
    Element { tag: String, attrs: Attrs },
    Text(String),
    Fragment,
}

impl LiveData {
    /// Variant discriminant
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            LiveData::Element { .. } => NodeKind::Element,
            LiveData::Text(_) => NodeKind::Text,
            LiveData::Fragment => NodeKind::Fragment,
        }
    }
}

/// A node stored in the live arena
#[derive(Debug, Clone)]
pub struct LiveNode {
    pub(crate) data: LiveData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 8]>,
}

impl LiveNode {
    pub(crate) fn new(data: LiveData) -> Self {
        Self {
            data,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Node payload
    #[inline]
    pub fn data(&self) -> &LiveData {
        &self.data
    }

    /// Parent handle, `None` when detached
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in order
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

// =============================================================================
// LiveRef
// =============================================================================

/// Borrowed handle to a resolved live node
#[derive(Debug, Clone, Copy)]
pub struct LiveRef<'a> {
    pub(crate) tree: &'a LiveTree,
    pub(crate) id: NodeId,
    pub(crate) node: &'a LiveNode,
}

impl<'a> LiveRef<'a> {
    /// Identity of the referenced node
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Underlying arena node
    #[inline]
    pub fn node(self) -> &'a LiveNode {
        self.node
    }

    /// Parent handle, `None` when detached
    #[inline]
    pub fn parent(self) -> Option<NodeId> {
        self.node.parent
    }
}

impl<'a> NodeView<'a> for LiveRef<'a> {
    type Children = LiveChildren<'a>;

    #[inline]
    fn kind(self) -> NodeKind {
        self.node.data.kind()
    }

    #[inline]
    fn tag(self) -> Option<&'a str> {
        match &self.node.data {
            LiveData::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    #[inline]
    fn text(self) -> Option<&'a str> {
        match &self.node.data {
            LiveData::Text(content) => Some(content.as_str()),
            _ => None,
        }
    }

    #[inline]
    fn attrs(self) -> &'a [(String, String)] {
        match &self.node.data {
            LiveData::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    #[inline]
    fn child_count(self) -> usize {
        self.node.children.len()
    }

    #[inline]
    fn children(self) -> Self::Children {
        LiveChildren {
            tree: self.tree,
            ids: self.node.children.iter(),
        }
    }
}

/// Iterator over the children of a [`LiveRef`]
#[derive(Debug, Clone)]
pub struct LiveChildren<'a> {
    tree: &'a LiveTree,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for LiveChildren<'a> {
    type Item = LiveRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.ids.by_ref().find_map(|id| tree.get(*id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}
