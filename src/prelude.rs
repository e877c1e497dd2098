//! Prelude module for common imports.
//!
//! ```ignore
//! use live_vdom::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Element, Fragment, Node, NodeKind, NodeView, Text};

// Attributes
pub use crate::attr::{Attrs, AttrsExt};

// Live tree
pub use crate::id::NodeId;
pub use crate::live::{LiveRef, LiveTree};

// Algorithms
pub use crate::algo::{
    equal, reconcile, reconcile_children, reconcile_with, PassReport, PassStats, ReconcileConfig,
    ReconcileMode,
};

// Scheduling
pub use crate::schedule::{ManualTicks, Scheduler, TickSource};

// State
pub use crate::state::{Path, State, StateView, SubscriptionId, Value};

// Controller
pub use crate::controller::{Bindings, Controller, ControllerConfig, Scope, Template};

// Error
pub use crate::error::{ReconcileError, ReconcileResult, StateError, StateResult};
