//! Controller: state → scheduler → materialize → reconcile → bindings.
//!
//! A [`Controller`] owns a [`LiveTree`] and keeps one region of it in sync
//! with a [`Template`] evaluated against observable [`State`]:
//!
//! ```text
//! State::set ──► subscriber ──► Scheduler::request   (coalesced per tick)
//!                                      │
//!                              next tick ▼
//!           Template::materialize(Scope) ──► Reconciler ──► Bindings::rebind
//! ```
//!
//! # Example
//!
//! ```ignore
//! let ticks = ManualTicks::new();
//! let state = State::new(Value::new_map().with("count", 0));
//! let tree = LiveTree::new();
//! let doc = tree.document();
//!
//! let controller = Controller::mount(tree, doc, state.clone(), |scope: &Scope<'_>| {
//!     Element::new("p").text(scope.text("count")).into()
//! }, ticks.clone(), ControllerConfig::default())?;
//!
//! ticks.tick();                 // first pass
//! state.set("count", 1)?;
//! state.set("count", 2)?;
//! ticks.tick();                 // one pass for both writes
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use tracing::{debug, error, warn};

use crate::algo::{PassReport, ReconcileConfig, ReconcileMode, Reconciler};
use crate::error::{ReconcileError, ReconcileResult};
use crate::id::NodeId;
use crate::live::LiveTree;
use crate::node::Node;
use crate::schedule::{Scheduler, TickSource};
use crate::state::{Path, State, SubscriptionId, Value};

/// Default bound on passes chained by writes made during a pass.
const DEFAULT_MAX_REENTRANT_PASSES: usize = 8;

/// Named values visible to templates next to the state
pub type TemplateArgs = FxHashMap<String, Value>;

// =============================================================================
// Collaborator traits
// =============================================================================

/// Produces a fresh target tree from the current scope
pub trait Template {
    fn materialize(&self, scope: &Scope<'_>) -> Node;
}

impl<F> Template for F
where
    F: Fn(&Scope<'_>) -> Node,
{
    fn materialize(&self, scope: &Scope<'_>) -> Node {
        self(scope)
    }
}

/// Listener registry notified after every successful pass
///
/// `new_nodes` are roots of freshly cloned subtrees and carry no bindings
/// yet. `updated_nodes` kept their identity but changed attributes or
/// descendants; their existing bindings must be re-validated, not duplicated.
pub trait Bindings {
    fn rebind(&mut self, tree: &LiveTree, new_nodes: &[NodeId], updated_nodes: &[NodeId]);
}

impl Bindings for () {
    fn rebind(&mut self, _tree: &LiveTree, _new_nodes: &[NodeId], _updated_nodes: &[NodeId]) {}
}

/// Read-only view handed to [`Template::materialize`]
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    state: &'a Value,
    args: &'a TemplateArgs,
}

impl<'a> Scope<'a> {
    pub fn new(state: &'a Value, args: &'a TemplateArgs) -> Self {
        Self { state, args }
    }

    /// Whole state value
    pub fn state(&self) -> &'a Value {
        self.state
    }

    /// Template arguments
    pub fn args(&self) -> &'a TemplateArgs {
        self.args
    }

    /// Resolve `path` against the state, then against the arguments
    pub fn lookup(&self, path: impl Into<Path>) -> Option<&'a Value> {
        let path = path.into();
        if let Some(value) = self.state.lookup(&path) {
            return Some(value);
        }
        let (first, rest) = path.segments().split_first()?;
        let arg = self.args.get(first.key().as_ref())?;
        rest.iter().try_fold(arg, |value, segment| value.child(segment))
    }

    /// Interpolation text of `path` (empty when absent)
    pub fn text(&self, path: impl Into<Path>) -> String {
        self.lookup(path).map(Value::to_string).unwrap_or_default()
    }
}

// =============================================================================
// Config
// =============================================================================

/// Per-controller configuration
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Values resolvable by templates when the state lacks them
    pub args: TemplateArgs,
    /// Reconciliation settings for every pass
    pub reconcile: ReconcileConfig,
    /// Passes that writes made during a pass may chain before further
    /// requests are dropped. Default: 8
    pub max_reentrant_passes: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            args: TemplateArgs::default(),
            reconcile: ReconcileConfig::default(),
            max_reentrant_passes: DEFAULT_MAX_REENTRANT_PASSES,
        }
    }
}

impl ControllerConfig {
    /// Add a template argument (builder style)
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Override reconciliation settings
    pub fn with_reconcile(mut self, reconcile: ReconcileConfig) -> Self {
        self.reconcile = reconcile;
        self
    }

    /// Override the reentrant pass bound
    pub fn with_max_reentrant_passes(mut self, max: usize) -> Self {
        self.max_reentrant_passes = max;
        self
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Region of the live tree a controller owns
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// Root mode: `root` occupies a slot under `parent` (or was removed)
    Root { parent: NodeId, root: Option<NodeId> },
    /// Children mode: only the children of `container` are managed
    Children { container: NodeId },
}

/// What requests issued during the running pass have decided so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reentry {
    Idle,
    Scheduled,
    Suppressed,
}

struct Shared<T: TickSource> {
    tree: RefCell<LiveTree>,
    slot: Cell<Slot>,
    state: State,
    template: RefCell<Rc<dyn Template>>,
    bindings: RefCell<Box<dyn Bindings>>,
    scheduler: Scheduler<T>,
    config: ControllerConfig,
    subscription: Cell<Option<SubscriptionId>>,
    /// `None` outside a pass
    reentry: Cell<Option<Reentry>>,
    /// Consecutive passes scheduled from inside a pass
    chain: Cell<usize>,
    suppressed: Cell<usize>,
    last_result: RefCell<Option<ReconcileResult<PassReport>>>,
}

/// Keeps a live region in sync with a template over observable state
pub struct Controller<T: TickSource + 'static> {
    shared: Rc<Shared<T>>,
}

impl<T: TickSource + 'static> Controller<T> {
    /// Manage an existing live node
    ///
    /// In root mode `root` must be attached; in children mode it is the
    /// container whose children are reconciled.
    pub fn new(
        tree: LiveTree,
        root: NodeId,
        state: State,
        template: impl Template + 'static,
        ticks: T,
        config: ControllerConfig,
    ) -> ReconcileResult<Self> {
        if !tree.contains(root) {
            return Err(ReconcileError::StaleNode(root));
        }
        let slot = match config.reconcile.mode {
            ReconcileMode::Root => Slot::Root {
                parent: tree.parent(root).ok_or(ReconcileError::Detached(root))?,
                root: Some(root),
            },
            ReconcileMode::Children => Slot::Children { container: root },
        };
        Ok(Self::build(tree, slot, state, Rc::new(template), ticks, config))
    }

    /// Render into an empty slot under `parent`
    ///
    /// In root mode the first pass appends the template's root under
    /// `parent`; in children mode `parent` itself is the container.
    pub fn mount(
        tree: LiveTree,
        parent: NodeId,
        state: State,
        template: impl Template + 'static,
        ticks: T,
        config: ControllerConfig,
    ) -> ReconcileResult<Self> {
        match tree.kind(parent) {
            None => return Err(ReconcileError::StaleNode(parent)),
            Some(kind) if !kind.is_container() => return Err(ReconcileError::NotAContainer(parent)),
            Some(_) => {}
        }
        let slot = match config.reconcile.mode {
            ReconcileMode::Root => Slot::Root { parent, root: None },
            ReconcileMode::Children => Slot::Children { container: parent },
        };
        Ok(Self::build(tree, slot, state, Rc::new(template), ticks, config))
    }

    fn build(
        tree: LiveTree,
        slot: Slot,
        state: State,
        template: Rc<dyn Template>,
        ticks: T,
        config: ControllerConfig,
    ) -> Self {
        let shared = Rc::new(Shared {
            tree: RefCell::new(tree),
            slot: Cell::new(slot),
            state,
            template: RefCell::new(template),
            bindings: RefCell::new(Box::new(())),
            scheduler: Scheduler::new(ticks),
            config,
            subscription: Cell::new(None),
            reentry: Cell::new(None),
            chain: Cell::new(0),
            suppressed: Cell::new(0),
            last_result: RefCell::new(None),
        });

        let weak: Weak<Shared<T>> = Rc::downgrade(&shared);
        let id = shared.state.subscribe(move |property| {
            if let Some(shared) = weak.upgrade() {
                debug!(property, "state changed");
                shared.request();
            }
        });
        shared.subscription.set(Some(id));
        shared.request();

        Self { shared }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Observable state driving this controller
    pub fn state(&self) -> &State {
        &self.shared.state
    }

    /// Controller configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.shared.config
    }

    /// Current live root (the container in children mode)
    pub fn root(&self) -> Option<NodeId> {
        match self.shared.slot.get() {
            Slot::Root { root, .. } => root,
            Slot::Children { container } => Some(container),
        }
    }

    /// Borrow the live tree
    pub fn with_tree<R>(&self, f: impl FnOnce(&LiveTree) -> R) -> R {
        f(&self.shared.tree.borrow())
    }

    /// Mutably borrow the live tree (host-side edits between passes)
    ///
    /// Panics when called from inside [`Bindings::rebind`].
    pub fn with_tree_mut<R>(&self, f: impl FnOnce(&mut LiveTree) -> R) -> R {
        f(&mut self.shared.tree.borrow_mut())
    }

    /// Whether a pass is waiting for the next tick
    pub fn is_pending(&self) -> bool {
        self.shared.scheduler.is_pending()
    }

    /// Requests dropped by the reentrancy bound so far
    pub fn suppressed_requests(&self) -> usize {
        self.shared.suppressed.get()
    }

    /// Result of the most recent scheduled pass, if not yet taken
    pub fn take_last_result(&self) -> Option<ReconcileResult<PassReport>> {
        self.shared.last_result.borrow_mut().take()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Control
    // ─────────────────────────────────────────────────────────────────────────

    /// Schedule a pass for the next tick
    pub fn request_update(&self) {
        self.shared.request();
    }

    /// Swap the template and schedule a pass
    pub fn set_template(&self, template: impl Template + 'static) {
        *self.shared.template.borrow_mut() = Rc::new(template);
        self.shared.request();
    }

    /// Install the listener registry
    ///
    /// Must not be called from inside [`Bindings::rebind`].
    pub fn set_bindings(&self, bindings: impl Bindings + 'static) {
        *self.shared.bindings.borrow_mut() = Box::new(bindings);
    }

    /// Run a pass synchronously, superseding any pending one
    pub fn render_now(&self) -> ReconcileResult<PassReport> {
        if self.shared.reentry.get().is_some() {
            return Err(ReconcileError::PassInProgress);
        }
        self.shared.scheduler.cancel();
        self.shared.run_pass()
    }
}

impl<T: TickSource + 'static> Drop for Controller<T> {
    fn drop(&mut self) {
        if let Some(id) = self.shared.subscription.take() {
            self.shared.state.unsubscribe(id);
        }
        self.shared.scheduler.cancel();
    }
}

impl<T: TickSource + 'static> fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("root", &self.root())
            .field("pending", &self.is_pending())
            .field("suppressed", &self.suppressed_requests())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pass machinery
// ─────────────────────────────────────────────────────────────────────────────

impl<T: TickSource + 'static> Shared<T> {
    /// Coalesced request; bounded while a pass is running.
    ///
    /// All requests issued during one pass share a single follow-up pass,
    /// so the bound counts chained passes regardless of writes per pass.
    fn request(self: &Rc<Self>) {
        match self.reentry.get() {
            None => self.chain.set(0),
            Some(Reentry::Scheduled) => {}
            Some(Reentry::Suppressed) => {
                self.suppressed.set(self.suppressed.get() + 1);
                return;
            }
            Some(Reentry::Idle) => {
                let chain = self.chain.get() + 1;
                if chain > self.config.max_reentrant_passes {
                    self.suppressed.set(self.suppressed.get() + 1);
                    self.reentry.set(Some(Reentry::Suppressed));
                    warn!(
                        chain,
                        max = self.config.max_reentrant_passes,
                        "reentrant update chain too long, dropping request"
                    );
                    return;
                }
                self.chain.set(chain);
                self.reentry.set(Some(Reentry::Scheduled));
            }
        }

        let weak = Rc::downgrade(self);
        self.scheduler.request(move || {
            if let Some(shared) = weak.upgrade() {
                let result = shared.run_pass();
                if let Err(err) = &result {
                    error!(%err, "scheduled pass failed");
                }
                *shared.last_result.borrow_mut() = Some(result);
            }
        });
    }

    fn run_pass(&self) -> ReconcileResult<PassReport> {
        self.reentry.set(Some(Reentry::Idle));
        let result = self.pass();
        self.reentry.set(None);
        result
    }

    fn pass(&self) -> ReconcileResult<PassReport> {
        // Snapshot so templates may write state (which only schedules)
        let snapshot = self.state.snapshot();
        let template = Rc::clone(&*self.template.borrow());
        let target = template.materialize(&Scope::new(&snapshot, &self.config.args));

        let report = {
            let mut tree = self.tree.borrow_mut();
            let reconciler = Reconciler::new(&mut tree, &self.config.reconcile);
            match self.slot.get() {
                Slot::Root { parent, root } => {
                    let report = reconciler.at(parent, root, &target)?;
                    self.slot.set(Slot::Root {
                        parent,
                        root: report.root,
                    });
                    report
                }
                Slot::Children { container } => reconciler.children_of(container, &target)?,
            }
        };

        if !report.stats.is_noop() {
            let tree = self.tree.borrow();
            self.bindings.borrow_mut().rebind(
                &tree,
                &report.stats.new_nodes,
                &report.stats.updated_nodes,
            );
        }
        Ok(report)
    }
}

// =============================================================================
// Tests
// =============================================================================
