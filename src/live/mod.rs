//! The live tree: a mutable, host-owned arena of nodes.
//!
//! Nodes are addressed by generational [`NodeId`] handles, which are the
//! identities external bindings attach to. The primitives here (create,
//! attach, detach, attribute and text writes) are what a reconciliation pass
//! is built from; each is fallible and a failure aborts the pass without
//! rollback.
//!
//! A fresh tree contains a single document container (fragment kind) that
//! application roots are mounted under.

mod mutation;
mod node;

pub use mutation::Mutation;
pub use node::{LiveChildren, LiveData, LiveNode, LiveRef};

use crate::attr::{Attrs, AttrsExt};
use crate::error::{ReconcileError, ReconcileResult};
use crate::id::NodeId;
use crate::node::{Element, Fragment, Node, NodeKind, Text};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<LiveNode>,
}

// =============================================================================
// LiveTree
// =============================================================================

/// Arena-backed mutable tree
#[derive(Debug, Clone)]
pub struct LiveTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    document: NodeId,
    len: usize,
    journal: Option<Vec<Mutation>>,
}

impl Default for LiveTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveTree {
    /// Create a tree holding only the document container
    pub fn new() -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            document: NodeId::from_raw_parts(0, 0),
            len: 0,
            journal: None,
        };
        tree.document = tree.alloc(LiveData::Fragment);
        tree
    }

    /// The document container every mounted root hangs off
    #[inline]
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Number of nodes currently allocated (attached or not)
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when only the document container exists
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len <= 1
    }

    /// Start or stop journaling applied primitives
    ///
    /// Stopping drops entries not yet taken.
    pub fn record_mutations(&mut self, enabled: bool) {
        match (enabled, self.journal.is_some()) {
            (true, false) => self.journal = Some(Vec::new()),
            (false, true) => self.journal = None,
            _ => {}
        }
    }

    /// Drain the journal (empty when not recording)
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve a handle
    pub fn get(&self, id: NodeId) -> Option<LiveRef<'_>> {
        let slot = self.slots.get(id.slot())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref().map(|node| LiveRef {
            tree: self,
            id,
            node,
        })
    }

    /// Whether the handle still resolves
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Variant of a live node
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|r| r.node.data.kind())
    }

    /// Parent of a live node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|r| r.node.parent)
    }

    /// Children of a live node (empty for stale handles)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(r) => r.node.children(),
            None => &[],
        }
    }

    /// Sibling following `id` under its parent
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Attributes of an element (empty otherwise)
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match self.get(id).map(|r| &r.node.data) {
            Some(LiveData::Element { attrs, .. }) => attrs,
            _ => &[],
        }
    }

    /// Attribute value on an element
    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id).iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Tag of an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|r| &r.node.data) {
            Some(LiveData::Element { tag, .. }) => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Own content of a text node, concatenated descendant text otherwise
    pub fn text_content(&self, id: NodeId) -> String {
        self.to_node(id).map(|n| n.text_content()).unwrap_or_default()
    }

    /// Snapshot a live subtree into a value tree
    pub fn to_node(&self, id: NodeId) -> Option<Node> {
        self.get(id)?;
        // Post-order: children are built before their parent collects them
        let mut work = vec![(id, false)];
        let mut built: Vec<Node> = Vec::new();
        while let Some((id, expanded)) = work.pop() {
            let Some(live) = self.get(id) else {
                continue;
            };
            if !expanded {
                work.push((id, true));
                work.extend(live.node.children.iter().rev().map(|c| (*c, false)));
                continue;
            }
            let count = live.node.children.iter().filter(|c| self.contains(**c)).count();
            let children = built.split_off(built.len() - count);
            built.push(match &live.node.data {
                LiveData::Element { tag, attrs } => {
                    let mut elem = Element::new(tag.clone());
                    elem.attrs = attrs.clone();
                    elem.children.extend(children);
                    Node::from(elem)
                }
                LiveData::Text(content) => Node::Text(Text::new(content.clone())),
                LiveData::Fragment => Fragment::from_children(children).into(),
            });
        }
        built.pop()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Creation
    // ─────────────────────────────────────────────────────────────────────────

    /// Deep-clone a value tree into detached live nodes with fresh identities
    pub fn create(&mut self, node: &Node) -> NodeId {
        let root = self.alloc(live_data(node));
        let mut stack = vec![(root, node)];
        while let Some((parent, value)) = stack.pop() {
            for child in value.children() {
                let child_id = self.alloc(live_data(child));
                if let Some(slot) = self.slots.get_mut(child_id.slot())
                    && let Some(child_node) = slot.node.as_mut()
                {
                    child_node.parent = Some(parent);
                }
                if let Some(slot) = self.slots.get_mut(parent.slot())
                    && let Some(parent_node) = slot.node.as_mut()
                {
                    parent_node.children.push(child_id);
                }
                stack.push((child_id, child));
            }
        }
        root
    }

    /// Clone a value tree and append it under `parent`
    pub fn mount(&mut self, parent: NodeId, node: &Node) -> ReconcileResult<NodeId> {
        let id = self.create(node);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Free a detached subtree
    pub fn discard(&mut self, id: NodeId) -> ReconcileResult<()> {
        if self.node(id)?.parent.is_some() {
            return Err(ReconcileError::AlreadyAttached(id));
        }
        self.free_subtree(id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Structural mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a detached node as last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> ReconcileResult<()> {
        self.check_attach(parent, child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        self.log(|| Mutation::Append { parent, child });
        Ok(())
    }

    /// Attach a detached node right before `reference` under `parent`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> ReconcileResult<()> {
        self.check_attach(parent, child)?;
        let pos = self.position_of(parent, reference)?;
        self.node_mut(parent)?.children.insert(pos, child);
        self.node_mut(child)?.parent = Some(parent);
        self.log(|| Mutation::InsertBefore {
            parent,
            child,
            reference,
        });
        Ok(())
    }

    /// Detach `child` from `parent` and free its whole subtree
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> ReconcileResult<()> {
        let pos = self.position_of(parent, child)?;
        self.node_mut(parent)?.children.remove(pos);
        self.free_subtree(child);
        self.log(|| Mutation::Remove { parent, child });
        Ok(())
    }

    /// Put the detached node `new` in place of `old`, freeing `old`'s subtree
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    ) -> ReconcileResult<()> {
        self.check_attach(parent, new)?;
        let pos = self.position_of(parent, old)?;
        self.node_mut(parent)?.children[pos] = new;
        self.node_mut(new)?.parent = Some(parent);
        self.free_subtree(old);
        self.log(|| Mutation::Replace { parent, new, old });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Set (or update in place) an attribute on an element
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> ReconcileResult<()> {
        let name = name.into();
        self.attrs_mut(id)?.set_attr(name.clone(), value);
        self.log(|| Mutation::SetAttr { node: id, name });
        Ok(())
    }

    /// Remove an attribute from an element, returning its old value
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> ReconcileResult<Option<String>> {
        let old = self.attrs_mut(id)?.remove_attr(name);
        self.log(|| Mutation::RemoveAttr {
            node: id,
            name: name.to_string(),
        });
        Ok(old)
    }

    /// Replace the content of a text node
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> ReconcileResult<()> {
        match &mut self.node_mut(id)?.data {
            LiveData::Text(text) => *text = content.into(),
            _ => return Err(ReconcileError::NotAText(id)),
        }
        self.log(|| Mutation::SetText { node: id });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn alloc(&mut self, data: LiveData) -> NodeId {
        self.len += 1;
        let node = Some(LiveNode::new(data));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = node;
            NodeId::from_raw_parts(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node,
            });
            NodeId::from_raw_parts(index, 0)
        }
    }

    fn log(&mut self, entry: impl FnOnce() -> Mutation) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(entry());
        }
    }

    fn node(&self, id: NodeId) -> ReconcileResult<&LiveNode> {
        self.get(id)
            .map(|r| r.node)
            .ok_or(ReconcileError::StaleNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> ReconcileResult<&mut LiveNode> {
        self.slots
            .get_mut(id.slot())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .ok_or(ReconcileError::StaleNode(id))
    }

    fn attrs_mut(&mut self, id: NodeId) -> ReconcileResult<&mut Attrs> {
        match &mut self.node_mut(id)?.data {
            LiveData::Element { attrs, .. } => Ok(attrs),
            _ => Err(ReconcileError::NotAnElement(id)),
        }
    }

    fn position_of(&self, parent: NodeId, child: NodeId) -> ReconcileResult<usize> {
        self.node(child)?;
        self.node(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(ReconcileError::NotAChild { parent, child })
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> ReconcileResult<()> {
        let parent_node = self.node(parent)?;
        if !parent_node.data.kind().is_container() {
            return Err(ReconcileError::NotAContainer(parent));
        }
        if self.node(child)?.parent.is_some() {
            return Err(ReconcileError::AlreadyAttached(child));
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(ReconcileError::Cycle { parent, child });
            }
            cursor = self.node(ancestor)?.parent;
        }
        Ok(())
    }

    fn free_subtree(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.slot())
                .filter(|slot| slot.generation == id.generation())
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index());
                self.len -= 1;
            }
        }
    }
}

fn live_data(node: &Node) -> LiveData {
    match node {
        Node::Element(e) => LiveData::Element {
            tag: e.tag.clone(),
            attrs: e.attrs.clone(),
        },
        Node::Text(t) => LiveData::Text(t.content.clone()),
        Node::Fragment(_) => LiveData::Fragment,
    }
}

// =============================================================================
// Tests
// =============================================================================
