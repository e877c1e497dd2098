//! live-vdom - In-place tree reconciliation with coalesced updates
//!
//! ## Core Concepts
//!
//! **Two trees**: a *live* tree ([`LiveTree`]) owned by the host, whose node
//! identities ([`NodeId`]) carry external bindings, and a *target* tree
//! ([`Node`]) materialized fresh from application state on every pass.
//!
//! **Reconciliation**: [`reconcile`] mutates the live tree until it is
//! structurally equal to the target, preserving the identity of every live
//! node that survives and reporting what changed ([`PassStats`]).
//!
//! **Scheduling**: state writes ([`State`]) request passes through a
//! [`Scheduler`], so any number of writes within one tick cost one pass.
//!
//! ## Modules
//! - `node`: target tree values (Element, Text, Fragment) and `NodeView`
//! - `live`: the mutable live tree and its host primitives
//! - `algo`: equality, attribute differ, child matcher, reconciler
//! - `schedule`: tick sources and the single-pending-request scheduler
//! - `state`: observable nested state
//! - `controller`: wires state, scheduler, template and reconciler together
//!
//! ## Usage
//!
//! ```ignore
//! use live_vdom::prelude::*;
//!
//! let mut tree = LiveTree::new();
//! let doc = tree.document();
//! let root = tree.mount(doc, &Element::new("ul").child(Element::new("li").text("a")).into())?;
//!
//! let target: Node = Element::new("ul")
//!     .child(Element::new("li").text("a"))
//!     .child(Element::new("li").text("b"))
//!     .into();
//! let report = reconcile(&mut tree, root, &target)?;
//! assert_eq!(report.stats.appended, 1);
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Target tree node types: Element, Text, Fragment, Node
pub mod node;

/// Attribute types
pub mod attr;

/// Live node identity
pub mod id;

/// Host-owned live tree
pub mod live;

/// Algorithms: equality, attribute diff, child matching, reconciliation
pub mod algo;

/// Error types
pub mod error;

// =============================================================================
// Update pipeline
// =============================================================================

/// Tick sources and coalescing scheduler
pub mod schedule;

/// Observable application state
pub mod state;

/// State-driven reconciliation controller
pub mod controller;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Element, Fragment, Node, NodeKind, NodeView, Text};

// Attribute types
pub use attr::{Attrs, AttrsExt};

// Identity and live tree
pub use id::NodeId;
pub use live::{LiveRef, LiveTree, Mutation};

// Algorithms
pub use algo::{
    equal, reconcile, reconcile_children, reconcile_with, PassReport, PassStats, ReconcileConfig,
    ReconcileMode, Reconciler,
};

// Scheduling and state
pub use schedule::{ManualTicks, Scheduler, TickHandle, TickSource};
pub use state::{Path, State, StateView, Value};

// Controller
pub use controller::{Bindings, Controller, ControllerConfig, Scope, Template, TemplateArgs};

// Error types
pub use error::{ReconcileError, ReconcileResult, StateError, StateResult};
