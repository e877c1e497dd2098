//! Coalesced update scheduling.
//!
//! - [`TickSource`]: "run this on the next tick" capability
//! - [`ManualTicks`]: single-threaded queue stepped by the host's frame loop
//!   (or by tests)
//! - [`Scheduler`]: keeps at most one pending request; a new request cancels
//!   the previous one, so any number of requests within a tick collapse into
//!   a single deferred callback.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

/// Deferred callback type
pub type TickCallback = Box<dyn FnOnce()>;

/// Handle of a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// Capability to run callbacks at the next tick boundary
pub trait TickSource {
    /// Queue `callback` for the next tick
    fn schedule(&self, callback: TickCallback) -> TickHandle;

    /// Drop a queued callback; false when it already ran or was cancelled
    fn cancel(&self, handle: TickHandle) -> bool;
}

impl<T: TickSource + ?Sized> TickSource for Rc<T> {
    fn schedule(&self, callback: TickCallback) -> TickHandle {
        (**self).schedule(callback)
    }

    fn cancel(&self, handle: TickHandle) -> bool {
        (**self).cancel(handle)
    }
}

// =============================================================================
// ManualTicks
// =============================================================================

#[derive(Default)]
struct TickQueue {
    next_handle: u64,
    queue: VecDeque<(TickHandle, TickCallback)>,
}

/// Manually stepped tick source
///
/// Cloning yields another handle to the same queue. Callbacks queued while a
/// tick is running are deferred to the following tick.
#[derive(Clone, Default)]
pub struct ManualTicks {
    inner: Rc<RefCell<TickQueue>>,
}

impl ManualTicks {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this call; returns how many ran
    pub fn tick(&self) -> usize {
        let due = std::mem::take(&mut self.inner.borrow_mut().queue);
        let count = due.len();
        for (handle, callback) in due {
            trace!(handle = handle.0, "tick callback");
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }
}

impl TickSource for ManualTicks {
    fn schedule(&self, callback: TickCallback) -> TickHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TickHandle(inner.next_handle);
        inner.next_handle += 1;
        inner.queue.push_back((handle, callback));
        handle
    }

    fn cancel(&self, handle: TickHandle) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.queue.len();
        inner.queue.retain(|(h, _)| *h != handle);
        inner.queue.len() != before
    }
}

impl fmt::Debug for ManualTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTicks")
            .field("pending", &self.pending())
            .finish()
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// Single pending-request scheduler
///
/// Each request carries an epoch; a callback whose epoch is outdated does
/// nothing even if its tick source already dequeued it.
pub struct Scheduler<T: TickSource> {
    ticks: T,
    pending: Rc<Cell<Option<TickHandle>>>,
    epoch: Rc<Cell<u64>>,
}

impl<T: TickSource> Scheduler<T> {
    /// Create a scheduler on top of a tick source
    pub fn new(ticks: T) -> Self {
        Self {
            ticks,
            pending: Rc::new(Cell::new(None)),
            epoch: Rc::new(Cell::new(0)),
        }
    }

    /// Replace any pending request with `callback` for the next tick
    pub fn request(&self, callback: impl FnOnce() + 'static) {
        self.cancel();
        let pending = Rc::clone(&self.pending);
        let epoch = Rc::clone(&self.epoch);
        let issued = epoch.get();
        let handle = self.ticks.schedule(Box::new(move || {
            if epoch.get() != issued {
                return;
            }
            pending.set(None);
            callback();
        }));
        trace!(handle = handle.0, "pass requested");
        self.pending.set(Some(handle));
    }

    /// Clear the pending request without scheduling a new one
    pub fn cancel(&self) -> bool {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        match self.pending.take() {
            Some(handle) => {
                trace!(handle = handle.0, "pending pass cancelled");
                self.ticks.cancel(handle)
            }
            None => false,
        }
    }

    /// Whether a request is waiting for its tick
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Underlying tick source
    pub fn ticks(&self) -> &T {
        &self.ticks
    }
}

impl<T: TickSource> Drop for Scheduler<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T: TickSource> fmt::Debug for Scheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending.get())
            .finish()
    }
}
