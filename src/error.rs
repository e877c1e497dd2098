//! Error types for live-vdom.
//!
//! Two families of failures exist:
//! - [`ReconcileError`]: a live-tree primitive refused a mutation. Fatal for
//!   the current pass; the tree keeps whatever partial state was produced.
//! - [`StateError`]: a write into the observable state could not be resolved.

use thiserror::Error;

use crate::id::NodeId;

/// Errors raised by live-tree primitives during a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Handle refers to a node that was removed (or never existed)
    #[error("stale node handle {0}")]
    StaleNode(NodeId),

    /// `child` is not a direct child of `parent`
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Expected parent
        parent: NodeId,
        /// Offending child
        child: NodeId,
    },

    /// Text nodes cannot hold children
    #[error("node {0} cannot hold children")]
    NotAContainer(NodeId),

    /// Attribute operations require an element
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// Text operations require a text node
    #[error("node {0} is not a text node")]
    NotAText(NodeId),

    /// Node is still attached and must be detached first
    #[error("node {0} is already attached")]
    AlreadyAttached(NodeId),

    /// Insertion would make a node its own ancestor
    #[error("inserting {child} under {parent} would create a cycle")]
    Cycle {
        /// Insertion parent
        parent: NodeId,
        /// Inserted node
        child: NodeId,
    },

    /// Root-replacing reconciliation needs the live root to have a parent
    #[error("live root {0} is detached")]
    Detached(NodeId),

    /// A synchronous pass was requested while another pass is running
    #[error("a reconciliation pass is already running")]
    PassInProgress,
}

/// Result type alias for live-tree and reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors raised by writes into observable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Writes need at least one path segment
    #[error("empty state path")]
    EmptyPath,

    /// An intermediate segment does not exist
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// An intermediate segment holds a scalar
    #[error("not a container at: {0}")]
    NotAContainer(String),

    /// List index beyond the end (writes may append at `len`)
    #[error("index {index} out of bounds (len {len}) at: {path}")]
    IndexOutOfBounds {
        /// Parent path
        path: String,
        /// Requested index
        index: usize,
        /// Current list length
        len: usize,
    },
}

/// Result type alias for state operations.
pub type StateResult<T> = Result<T, StateError>;

impl StateError {
    /// Create a path-not-found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound(path.into())
    }
}
