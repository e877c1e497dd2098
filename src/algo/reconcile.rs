//! Reconciler
//!
//! Mutates a live tree in place until it is structurally equal to a target
//! tree, keeping the identity of every live node that survives.
//!
//! # Modes
//!
//! - [`ReconcileMode::Root`]: the live root itself may be kept, updated,
//!   replaced or removed. A `Fragment` target stands for its first element
//!   child (only at this outermost level).
//! - [`ReconcileMode::Children`]: the live container is never touched; only
//!   its children are reconciled against the target's children.
//!
//! # Per-pair rules
//!
//! ```text
//! (live, -)        -> remove live                         removed
//! (-, target)      -> clone target, insert before anchor  inserted / appended
//! (live, target)   equal                                  equals
//!                  text involved / kind or tag differ     replaced (clone)
//!                  otherwise: attrs diff + children diff  identity kept
//! ```
//!
//! Primitive failures abort the pass; the tree is left as far as it got.

use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::{debug, debug_span, trace, warn};

use crate::error::{ReconcileError, ReconcileResult};
use crate::id::NodeId;
use crate::live::LiveTree;
use crate::node::{Node, NodeKind, NodeView};

use super::attrs::diff_attrs;
use super::equal::equal;
use super::matcher::{Step, match_children};

/// Default maximum recursion depth before an unequal subtree is replaced wholesale.
const DEFAULT_MAX_DEPTH: usize = 512;

// =============================================================================
// Public Types
// =============================================================================

/// Which part of the live tree a pass may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileMode {
    /// The live root may itself be replaced or removed
    #[default]
    Root,
    /// Only the children of the live container are reconciled
    Children,
}

/// Configuration for a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Root-replacing or children-only
    pub mode: ReconcileMode,
    /// Recursion depth after which unequal nodes are replaced instead of
    /// updated in place. Default: 512
    pub max_depth: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            mode: ReconcileMode::Root,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReconcileConfig {
    /// Create config with explicit mode and depth limit.
    pub fn new(mode: ReconcileMode, max_depth: usize) -> Self {
        Self { mode, max_depth }
    }

    /// Children-only config with the default depth limit.
    pub fn children_only() -> Self {
        Self {
            mode: ReconcileMode::Children,
            ..Self::default()
        }
    }

    /// Override the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Statistics from one reconciliation pass
#[derive(Debug, Default, Clone, PartialEq)]
#[must_use]
pub struct PassStats {
    /// Nodes confirmed unchanged (every node of each equal subtree)
    pub equals: usize,
    /// Clones inserted before an existing sibling
    pub inserted: usize,
    /// Clones appended as last child
    pub appended: usize,
    /// Live nodes removed
    pub removed: usize,
    /// Live nodes replaced by a clone
    pub replaced: usize,
    /// Attributes set or removed
    pub attribute_changes: usize,
    /// Wall-clock duration of the pass
    pub duration: Duration,
    /// Roots of subtrees cloned from the target during this pass
    pub new_nodes: Vec<NodeId>,
    /// Live nodes rewritten in place (attributes and/or descendants),
    /// recorded after their descendants
    pub updated_nodes: Vec<NodeId>,
}

impl PassStats {
    /// Total number of tree mutations
    pub fn mutations(&self) -> usize {
        self.inserted + self.appended + self.removed + self.replaced + self.attribute_changes
    }

    /// Check whether the pass left the tree untouched
    pub fn is_noop(&self) -> bool {
        self.mutations() == 0
    }

    /// New nodes that are elements
    pub fn new_elements(&self, tree: &LiveTree) -> Vec<NodeId> {
        self.new_nodes
            .iter()
            .copied()
            .filter(|id| tree.kind(*id) == Some(NodeKind::Element))
            .collect()
    }
}

/// Outcome of a pass
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct PassReport {
    /// Live root after the pass (`None` if it was removed)
    pub root: Option<NodeId>,
    /// Pass statistics
    pub stats: PassStats,
}

// =============================================================================
// Public API
// =============================================================================

/// Root-replacing reconciliation of `live_root` against `target`
///
/// The live root must be attached: replacing it needs its parent.
///
/// # Example
///
/// ```ignore
/// let report = reconcile(&mut tree, root, &template.materialize(&scope))?;
/// root = report.root.unwrap_or(root);
/// ```
pub fn reconcile(tree: &mut LiveTree, live_root: NodeId, target: &Node) -> ReconcileResult<PassReport> {
    reconcile_with(tree, live_root, target, &ReconcileConfig::default())
}

/// Children-only reconciliation of `container` against `target`'s children
pub fn reconcile_children(
    tree: &mut LiveTree,
    container: NodeId,
    target: &Node,
) -> ReconcileResult<PassReport> {
    reconcile_with(tree, container, target, &ReconcileConfig::children_only())
}

/// Reconciliation with explicit configuration.
pub fn reconcile_with(
    tree: &mut LiveTree,
    live_root: NodeId,
    target: &Node,
    config: &ReconcileConfig,
) -> ReconcileResult<PassReport> {
    match config.mode {
        ReconcileMode::Root => {
            if !tree.contains(live_root) {
                return Err(ReconcileError::StaleNode(live_root));
            }
            let parent = tree
                .parent(live_root)
                .ok_or(ReconcileError::Detached(live_root))?;
            Reconciler::new(tree, config).at(parent, Some(live_root), target)
        }
        ReconcileMode::Children => Reconciler::new(tree, config).children_of(live_root, target),
    }
}

// =============================================================================
// Reconciler
// =============================================================================

/// Single-pass reconciliation context
///
/// Holds only pass-local state; it is consumed by [`Reconciler::at`] or
/// [`Reconciler::children_of`].
pub struct Reconciler<'t> {
    tree: &'t mut LiveTree,
    config: ReconcileConfig,
    stats: PassStats,
    depth: usize,
}

impl<'t> Reconciler<'t> {
    /// Create a pass over `tree`
    pub fn new(tree: &'t mut LiveTree, config: &ReconcileConfig) -> Self {
        Self {
            tree,
            config: *config,
            stats: PassStats::default(),
            depth: 0,
        }
    }

    /// Root-replacing pass for the slot `live` occupies under `parent`.
    ///
    /// `live` is `None` when a previous pass removed the root; a target then
    /// gets appended under `parent`.
    pub fn at(mut self, parent: NodeId, live: Option<NodeId>, target: &Node) -> ReconcileResult<PassReport> {
        let span = debug_span!("reconcile", mode = "root", %parent);
        let _enter = span.enter();
        let start = Instant::now();

        let target = root_target(target);
        let next = live.and_then(|l| self.tree.next_sibling(l));
        let root = self.diff_pair(parent, next, live, target)?;

        Ok(self.finish(start, root))
    }

    /// Children-only pass: `container` keeps its identity and attributes.
    pub fn children_of(mut self, container: NodeId, target: &Node) -> ReconcileResult<PassReport> {
        let span = debug_span!("reconcile", mode = "children", %container);
        let _enter = span.enter();
        let start = Instant::now();

        if !self.tree.contains(container) {
            return Err(ReconcileError::StaleNode(container));
        }
        let before = self.stats.mutations();
        self.diff_children(container, target.children())?;
        if self.stats.mutations() > before {
            self.stats.updated_nodes.push(container);
        }

        Ok(self.finish(start, Some(container)))
    }

    fn finish(mut self, start: Instant, root: Option<NodeId>) -> PassReport {
        self.stats.duration = start.elapsed();
        debug!(
            equals = self.stats.equals,
            inserted = self.stats.inserted,
            appended = self.stats.appended,
            removed = self.stats.removed,
            replaced = self.stats.replaced,
            attributes = self.stats.attribute_changes,
            elapsed = ?self.stats.duration,
            "pass complete"
        );
        PassReport {
            root,
            stats: self.stats,
        }
    }

    /// Apply one pair; returns the node occupying the slot afterwards.
    fn diff_pair(
        &mut self,
        parent: NodeId,
        next: Option<NodeId>,
        live: Option<NodeId>,
        target: Option<&Node>,
    ) -> ReconcileResult<Option<NodeId>> {
        match (live, target) {
            (None, None) => Ok(None),
            (Some(live), None) => {
                trace!(%parent, node = %live, "remove");
                self.tree.remove_child(parent, live)?;
                self.stats.removed += 1;
                Ok(None)
            }
            (None, Some(target)) => {
                let id = self.clone_target(target);
                match next {
                    Some(next) => {
                        trace!(%parent, node = %id, before = %next, "insert");
                        self.tree.insert_before(parent, id, next)?;
                        self.stats.inserted += 1;
                    }
                    None => {
                        trace!(%parent, node = %id, "append");
                        self.tree.append_child(parent, id)?;
                        self.stats.appended += 1;
                    }
                }
                Ok(Some(id))
            }
            (Some(live), Some(target)) => self.diff_nodes(parent, live, target),
        }
    }

    fn diff_nodes(&mut self, parent: NodeId, live: NodeId, target: &Node) -> ReconcileResult<Option<NodeId>> {
        let (is_equal, same_kind) = {
            let view = self.tree.get(live).ok_or(ReconcileError::StaleNode(live))?;
            let same_kind = view.kind() == target.kind()
                && view.kind() != NodeKind::Text
                && view.tag() == target.tag();
            (equal(view, target), same_kind)
        };

        if is_equal {
            self.stats.equals += target.node_count();
            return Ok(Some(live));
        }

        if !same_kind || self.depth >= self.config.max_depth {
            if same_kind {
                warn!(depth = self.depth, node = %live, "max depth exceeded, replacing subtree");
            }
            let id = self.clone_target(target);
            trace!(%parent, old = %live, new = %id, "replace");
            self.tree.replace_child(parent, id, live)?;
            self.stats.replaced += 1;
            return Ok(Some(id));
        }

        let before = self.stats.mutations();
        self.stats.attribute_changes += diff_attrs(self.tree, live, target.attrs())?;
        self.depth += 1;
        let result = self.diff_children(live, target.children());
        self.depth -= 1;
        result?;
        if self.stats.mutations() > before {
            self.stats.updated_nodes.push(live);
        }
        Ok(Some(live))
    }

    fn diff_children(&mut self, parent: NodeId, targets: &[Node]) -> ReconcileResult<()> {
        let live: SmallVec<[NodeId; 8]> = self.tree.children(parent).iter().copied().collect();
        if live.is_empty() && targets.is_empty() {
            return Ok(());
        }
        let targets: SmallVec<[&Node; 8]> = targets.iter().collect();

        let steps = {
            let tree = &*self.tree;
            match_children(&live, &targets, |l, t| tree.get(l).is_some_and(|v| equal(v, t)))
        };

        // Insertion anchor: live node of the nearest following step that has one
        let mut anchors: SmallVec<[Option<NodeId>; 8]> = SmallVec::from_elem(None, steps.len());
        let mut next = None;
        for (i, step) in steps.iter().enumerate().rev() {
            anchors[i] = next;
            if let Some(live) = step.live() {
                next = Some(live);
            }
        }

        for (step, anchor) in steps.iter().zip(anchors) {
            match *step {
                Step::Keep { target, .. } => self.stats.equals += target.node_count(),
                _ => {
                    self.diff_pair(parent, anchor, step.live(), step.target())?;
                }
            }
        }
        Ok(())
    }

    fn clone_target(&mut self, target: &Node) -> NodeId {
        let id = self.tree.create(target);
        self.stats.new_nodes.push(id);
        id
    }
}

/// Fragments are transparent at the root only: their first element child stands in.
fn root_target(target: &Node) -> Option<&Node> {
    match target {
        Node::Fragment(_) => target.first_element_child(),
        _ => Some(target),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::Mutation;
    use crate::node::Element;

    fn li(text: &str) -> Element {
        Element::new("li").text(text)
    }

    fn ul(items: &[&str]) -> Node {
        Element::new("ul").children(items.iter().map(|t| li(t))).into()
    }

    fn mount(target: &Node) -> (LiveTree, NodeId) {
        let mut tree = LiveTree::new();
        let doc = tree.document();
        let root = tree.mount(doc, target).unwrap();
        (tree, root)
    }

    fn all_ids(tree: &LiveTree, root: NodeId) -> Vec<NodeId> {
        let mut ids = vec![root];
        for child in tree.children(root) {
            ids.extend(all_ids(tree, *child));
        }
        ids
    }

    #[test]
    fn test_idempotence_keeps_every_identity() {
        let target: Node = Element::new("main")
            .with_id("app")
            .child(Element::new("h1").text("Title"))
            .child(ul(&["a", "b", "c"]))
            .into();
        let (mut tree, root) = mount(&target);
        let before = all_ids(&tree, root);

        let report = reconcile(&mut tree, root, &target.clone()).unwrap();
        assert!(report.stats.is_noop());
        assert!(report.stats.new_nodes.is_empty());
        assert!(report.stats.updated_nodes.is_empty());
        assert_eq!(report.root, Some(root));
        assert_eq!(all_ids(&tree, root), before);
    }

    #[test]
    fn test_second_pass_counts_all_nodes_equal() {
        let (mut tree, root) = mount(&ul(&["a", "b"]));
        let target = ul(&["a", "x", "b", "c"]);
        let first = reconcile(&mut tree, root, &target).unwrap();
        assert!(!first.stats.is_noop());

        let second = reconcile(&mut tree, root, &target).unwrap();
        assert_eq!(second.stats.equals, target.node_count());
        assert_eq!(second.stats.mutations(), 0);
    }

    #[test]
    fn test_minimal_removal() {
        let (mut tree, root) = mount(&ul(&["A", "B", "C"]));
        let [a, _, c] = [0, 1, 2].map(|i| tree.children(root)[i]);

        let stats = reconcile_children(&mut tree, root, &ul(&["A", "C"])).unwrap().stats;
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.replaced, 0);
        assert_eq!(stats.mutations(), 1);
        assert_eq!(tree.children(root), &[a, c]);
    }

    #[test]
    fn test_minimal_insertion() {
        let (mut tree, root) = mount(&ul(&["A", "C"]));
        let [a, c] = [0, 1].map(|i| tree.children(root)[i]);

        let stats = reconcile_children(&mut tree, root, &ul(&["A", "B", "C"])).unwrap().stats;
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.mutations(), 1);

        let children = tree.children(root);
        assert_eq!(children.len(), 3);
        assert_eq!((children[0], children[2]), (a, c));
        assert_eq!(stats.new_nodes, vec![children[1]]);
        assert_eq!(tree.text_content(children[1]), "B");
    }

    #[test]
    fn test_leading_insertion_goes_before_first_live() {
        let (mut tree, root) = mount(&ul(&["A"]));
        let a = tree.children(root)[0];

        let stats = reconcile_children(&mut tree, root, &ul(&["Z", "A"])).unwrap().stats;
        assert_eq!((stats.inserted, stats.appended), (1, 0));
        assert_eq!(tree.children(root)[1], a);
        assert_eq!(tree.to_node(root).unwrap(), ul(&["Z", "A"]));
    }

    #[test]
    fn test_trailing_insertion_appends() {
        let (mut tree, root) = mount(&ul(&["A"]));
        let stats = reconcile_children(&mut tree, root, &ul(&["A", "B", "C"])).unwrap().stats;
        assert_eq!((stats.inserted, stats.appended), (0, 2));
        assert_eq!(tree.to_node(root).unwrap(), ul(&["A", "B", "C"]));
    }

    #[test]
    fn test_replace_merge_for_different_tags() {
        let (mut tree, root) = mount(&Element::new("div").child(Element::new("span")).into());
        let target: Node = Element::new("div").child(Element::new("em")).into();

        let stats = reconcile_children(&mut tree, root, &target).unwrap().stats;
        assert_eq!(stats.replaced, 1);
        assert_eq!((stats.removed, stats.inserted, stats.appended), (0, 0, 0));
        assert_eq!(stats.new_nodes, vec![tree.children(root)[0]]);
        assert_eq!(stats.updated_nodes, vec![root]);
    }

    #[test]
    fn test_merged_same_tag_is_updated_in_place() {
        let (mut tree, root) = mount(&ul(&["old"]));
        let item = tree.children(root)[0];

        let stats = reconcile_children(&mut tree, root, &ul(&["new"])).unwrap().stats;
        // li kept, its text node replaced
        assert_eq!(tree.children(root), &[item]);
        assert_eq!(stats.replaced, 1);
        assert_eq!(stats.updated_nodes, vec![item, root]);
        assert_eq!(tree.text_content(item), "new");
    }

    #[test]
    fn test_attribute_minimality() {
        let (mut tree, root) = mount(&Element::new("div").attr("class", "a").attr("id", "x").into());
        let target: Node = Element::new("div").attr("class", "b").into();

        let report = reconcile(&mut tree, root, &target).unwrap();
        assert_eq!(report.stats.attribute_changes, 2);
        assert_eq!(report.stats.mutations(), 2);
        assert_eq!(report.root, Some(root));
        assert_eq!(report.stats.updated_nodes, vec![root]);
        assert_eq!(tree.attrs(root), &[("class".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_attribute_set_precedes_removal() {
        let (mut tree, root) = mount(&Element::new("div").attr("class", "a").attr("id", "x").into());
        let target: Node = Element::new("div").attr("class", "b").into();

        tree.record_mutations(true);
        let report = reconcile(&mut tree, root, &target).unwrap();
        assert_eq!(report.stats.attribute_changes, 2);
        assert_eq!(
            tree.take_mutations(),
            vec![
                Mutation::SetAttr { node: root, name: "class".into() },
                Mutation::RemoveAttr { node: root, name: "id".into() },
            ]
        );
    }

    #[test]
    fn test_mutations_follow_step_order() {
        let (mut tree, root) = mount(&ul(&["a", "b", "c"]));
        let [a, b, c] = [0, 1, 2].map(|i| tree.children(root)[i]);
        // Steps: Remove(a), Keep(b), Insert(x), Replace(c -> span)
        let target: Node = Element::new("ul")
            .child(li("b"))
            .child(li("x"))
            .child(Element::new("span"))
            .into();

        tree.record_mutations(true);
        let report = reconcile(&mut tree, root, &target).unwrap();
        assert_eq!(
            (report.stats.removed, report.stats.inserted, report.stats.replaced),
            (1, 1, 1)
        );

        let children = tree.children(root).to_vec();
        assert_eq!(children[0], b);
        let [x, span] = [children[1], children[2]];
        assert_eq!(
            tree.take_mutations(),
            vec![
                Mutation::Remove { parent: root, child: a },
                Mutation::InsertBefore { parent: root, child: x, reference: c },
                Mutation::Replace { parent: root, new: span, old: c },
            ]
        );
        assert_eq!(tree.to_node(root).unwrap(), target);
    }

    #[test]
    fn test_duplicate_removes_second_occurrence() {
        for _ in 0..3 {
            let (mut tree, root) = mount(&ul(&["X", "X"]));
            let [first, second] = [0, 1].map(|i| tree.children(root)[i]);

            let stats = reconcile_children(&mut tree, root, &ul(&["X"])).unwrap().stats;
            assert_eq!(stats.removed, 1);
            assert_eq!(tree.children(root), &[first]);
            assert!(!tree.contains(second));
        }
    }

    #[test]
    fn test_round_trip() {
        let t1: Node = Element::new("section")
            .with_class("list")
            .child(Element::new("h2").text("Items"))
            .child(ul(&["a", "b", "c"]))
            .into();
        let t2: Node = Element::new("section")
            .attr("data-state", "empty")
            .child(Element::new("p").text("Nothing here"))
            .child(ul(&["c"]))
            .into();

        let (mut tree, root) = mount(&t1);
        let root = reconcile(&mut tree, root, &t2).unwrap().root.unwrap();
        assert_eq!(tree.to_node(root).unwrap(), t2);
        let root = reconcile(&mut tree, root, &t1).unwrap().root.unwrap();
        assert_eq!(tree.to_node(root).unwrap(), t1);
    }

    #[test]
    fn test_root_replaced_when_tag_differs() {
        let (mut tree, root) = mount(&Node::element("div"));
        let report = reconcile(&mut tree, root, &Node::element("section")).unwrap();

        let new_root = report.root.unwrap();
        assert_ne!(new_root, root);
        assert!(!tree.contains(root));
        assert_eq!(tree.children(tree.document()), &[new_root]);
        assert_eq!(report.stats.replaced, 1);
        assert_eq!(report.stats.new_elements(&tree), vec![new_root]);
    }

    #[test]
    fn test_root_keeps_sibling_position() {
        let mut tree = LiveTree::new();
        let doc = tree.document();
        let before = tree.mount(doc, &Node::element("header")).unwrap();
        let root = tree.mount(doc, &Node::element("div")).unwrap();
        let after = tree.mount(doc, &Node::element("footer")).unwrap();

        let new_root = reconcile(&mut tree, root, &Node::element("main")).unwrap().root.unwrap();
        assert_eq!(tree.children(doc), &[before, new_root, after]);
    }

    #[test]
    fn test_fragment_target_uses_first_element_at_root() {
        let (mut tree, root) = mount(&Element::new("div").text("a").into());
        let target = Node::fragment([
            Node::text("\n"),
            Element::new("div").text("b").into(),
            Node::element("ignored"),
        ]);

        let report = reconcile(&mut tree, root, &target).unwrap();
        assert_eq!(report.root, Some(root));
        assert_eq!(tree.to_node(root).unwrap(), Node::from(Element::new("div").text("b")));
    }

    #[test]
    fn test_fragment_without_element_removes_root() {
        let (mut tree, root) = mount(&Node::element("div"));
        let report = reconcile(&mut tree, root, &Node::fragment([Node::text("only text")])).unwrap();
        assert_eq!(report.root, None);
        assert_eq!(report.stats.removed, 1);
        assert!(tree.children(tree.document()).is_empty());
    }

    #[test]
    fn test_reinsert_after_removal() {
        let mut tree = LiveTree::new();
        let doc = tree.document();
        let target = Node::element("div");
        let report = Reconciler::new(&mut tree, &ReconcileConfig::default())
            .at(doc, None, &target)
            .unwrap();
        assert_eq!(report.stats.appended, 1);
        assert_eq!(tree.children(doc), &[report.root.unwrap()]);
    }

    #[test]
    fn test_nested_fragment_is_not_flattened() {
        let (mut tree, root) = mount(&Node::element("div"));
        let target: Node = Element::new("div")
            .child(Node::fragment([Node::text("x")]))
            .into();
        let report = reconcile(&mut tree, root, &target).unwrap();
        assert_eq!(report.stats.appended, 1);
        let child = tree.children(root)[0];
        assert_eq!(tree.kind(child), Some(NodeKind::Fragment));
        assert_eq!(tree.to_node(root).unwrap(), target);
    }

    #[test]
    fn test_children_mode_leaves_container_attrs() {
        let (mut tree, root) = mount(&Element::new("div").with_id("keep").text("a").into());
        let target: Node = Element::new("span").with_id("other").text("b").into();

        let report = reconcile_children(&mut tree, root, &target).unwrap();
        assert_eq!(report.root, Some(root));
        assert_eq!(tree.tag(root), Some("div"));
        assert_eq!(tree.get_attr(root, "id"), Some("keep"));
        assert_eq!(tree.text_content(root), "b");
    }

    #[test]
    fn test_depth_limit_falls_back_to_replace() {
        let (mut tree, root) = mount(&Element::new("div").child(li("a")).into());
        let item = tree.children(root)[0];
        let target: Node = Element::new("div").child(li("b")).into();

        let config = ReconcileConfig::default().with_max_depth(1);
        let stats = reconcile_with(&mut tree, root, &target, &config).unwrap().stats;
        assert_eq!(stats.replaced, 1);
        assert!(!tree.contains(item));
        assert_eq!(tree.to_node(root).unwrap(), target);
    }

    #[test]
    fn test_detached_root_is_an_error() {
        let mut tree = LiveTree::new();
        let orphan = tree.create(&Node::element("div"));
        assert_eq!(
            reconcile(&mut tree, orphan, &Node::element("p")),
            Err(ReconcileError::Detached(orphan))
        );
    }

    #[test]
    fn test_stale_container_is_an_error() {
        let (mut tree, root) = mount(&ul(&["a"]));
        let item = tree.children(root)[0];
        tree.remove_child(root, item).unwrap();
        assert_eq!(
            reconcile_children(&mut tree, item, &ul(&[])),
            Err(ReconcileError::StaleNode(item))
        );
    }
}
