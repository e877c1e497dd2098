//! Observable application state.
//!
//! [`State`] wraps a nested [`Value`] behind explicit path-based accessors.
//! Every successful write or removal anywhere in the tree notifies each
//! subscriber once with the name of the mutated property. Batching is left
//! to the [`Scheduler`](crate::schedule::Scheduler) layered on top.
//!
//! ```ignore
//! let state = State::new(Value::new_map().with("count", 0));
//! state.subscribe(|prop| println!("{prop} changed"));
//! state.set("count", 1)?;
//! let items = state.view("items");
//! items.set("[0]", "milk")?;
//! ```

mod path;
mod value;

pub use path::{Path, Segment};
pub use value::{Value, ValueMap};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::{StateError, StateResult};

/// Change callback, receives the mutated property name
pub type Subscriber = Rc<dyn Fn(&str)>;

/// Handle returned by [`State::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct StateInner {
    value: RefCell<Value>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_id: Cell<u64>,
}

/// Shared observable state handle
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct State {
    inner: Rc<StateInner>,
}

impl State {
    /// Wrap an initial value
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value.into()),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Clone of the value at `path`
    pub fn get(&self, path: impl Into<Path>) -> Option<Value> {
        self.with(path, |value| value.cloned())
    }

    /// Borrow the value at `path` for the duration of `f`
    pub fn with<R>(&self, path: impl Into<Path>, f: impl FnOnce(Option<&Value>) -> R) -> R {
        let path = path.into();
        let root = self.inner.value.borrow();
        f(root.lookup(&path))
    }

    /// Borrow the whole state value
    pub fn with_value<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Clone of the whole state value
    pub fn snapshot(&self) -> Value {
        self.inner.value.borrow().clone()
    }

    /// Path-qualified view rooted at `path`
    pub fn view(&self, path: impl Into<Path>) -> StateView {
        StateView {
            state: self.clone(),
            base: path.into(),
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Write `value` at `path`, returning the previous value
    ///
    /// The parent of the last segment must exist. A list parent accepts an
    /// index up to its length (writing at the length appends).
    pub fn set(&self, path: impl Into<Path>, value: impl Into<Value>) -> StateResult<Option<Value>> {
        let path = path.into();
        let (last, parent) = path.split_last().ok_or(StateError::EmptyPath)?;
        let value = value.into();

        let previous = {
            let mut root = self.inner.value.borrow_mut();
            let container = resolve_mut(&mut root, parent)?;
            match container {
                Value::Map(map) => map.insert(last.key().into_owned(), value),
                Value::List(list) => {
                    let len = list.len();
                    let index = last.index().ok_or_else(|| StateError::not_found(path.to_string()))?;
                    if index < len {
                        Some(std::mem::replace(&mut list[index], value))
                    } else if index == len {
                        list.push(value);
                        None
                    } else {
                        return Err(StateError::IndexOutOfBounds {
                            path: Path::display_segments(parent),
                            index,
                            len,
                        });
                    }
                }
                _ => return Err(StateError::NotAContainer(Path::display_segments(parent))),
            }
        };

        trace!(path = %path, "state set");
        self.notify(&last.key());
        Ok(previous)
    }

    /// Delete the property at `path`, returning the removed value
    ///
    /// Removing an absent key still notifies; removing from a list shifts
    /// the following items.
    pub fn remove(&self, path: impl Into<Path>) -> StateResult<Option<Value>> {
        let path = path.into();
        let (last, parent) = path.split_last().ok_or(StateError::EmptyPath)?;

        let removed = {
            let mut root = self.inner.value.borrow_mut();
            match resolve_mut(&mut root, parent)? {
                Value::Map(map) => map.remove(last.key().as_ref()),
                Value::List(list) => last
                    .index()
                    .filter(|&i| i < list.len())
                    .map(|i| list.remove(i)),
                _ => return Err(StateError::NotAContainer(Path::display_segments(parent))),
            }
        };

        trace!(path = %path, "state remove");
        self.notify(&last.key());
        Ok(removed)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a change callback
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        id
    }

    /// Drop a change callback; false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    // Snapshot the list so callbacks may (un)subscribe or write reentrantly.
    fn notify(&self, property: &str) {
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in subscribers {
            callback(property);
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::new(Value::new_map())
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn resolve_mut<'v>(root: &'v mut Value, segments: &[Segment]) -> StateResult<&'v mut Value> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        if !current.is_container() {
            return Err(StateError::NotAContainer(Path::display_segments(&segments[..depth])));
        }
        current = current
            .child_mut(segment)
            .ok_or_else(|| StateError::not_found(Path::display_segments(&segments[..=depth])))?;
    }
    Ok(current)
}

// =============================================================================
// StateView
// =============================================================================

/// [`State`] handle scoped to a nested path
#[derive(Debug, Clone)]
pub struct StateView {
    state: State,
    base: Path,
}

impl StateView {
    /// Path this view is rooted at
    pub fn path(&self) -> &Path {
        &self.base
    }

    /// Owning state
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn get(&self, path: impl Into<Path>) -> Option<Value> {
        self.state.get(self.base.join(&path.into()))
    }

    pub fn with<R>(&self, path: impl Into<Path>, f: impl FnOnce(Option<&Value>) -> R) -> R {
        self.state.with(self.base.join(&path.into()), f)
    }

    pub fn set(&self, path: impl Into<Path>, value: impl Into<Value>) -> StateResult<Option<Value>> {
        self.state.set(self.base.join(&path.into()), value)
    }

    pub fn remove(&self, path: impl Into<Path>) -> StateResult<Option<Value>> {
        self.state.remove(self.base.join(&path.into()))
    }

    /// Nested view relative to this one
    pub fn view(&self, path: impl Into<Path>) -> StateView {
        self.state.view(self.base.join(&path.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_not_impl_any!(State: Send, Sync);

    fn todo_state() -> State {
        State::new(
            Value::new_map()
                .with("title", "Todo")
                .with("user", Value::new_map().with("name", "ana"))
                .with("items", vec!["milk", "eggs"]),
        )
    }

    fn recorder(state: &State) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        state.subscribe(move |prop| sink.borrow_mut().push(prop.to_string()));
        log
    }

    #[test]
    fn test_get_nested() {
        let state = todo_state();
        assert_eq!(state.get("user.name"), Some(Value::from("ana")));
        assert_eq!(state.get("items[1]"), Some(Value::from("eggs")));
        assert_eq!(state.get("user.email"), None);
        assert_eq!(state.with("items", |v| v.and_then(Value::as_list).map(Vec::len)), Some(2));
    }

    #[test]
    fn test_deep_set_notifies_property_name() {
        let state = todo_state();
        let log = recorder(&state);

        let previous = state.set("user.name", "bo").unwrap();
        assert_eq!(previous, Some(Value::from("ana")));
        assert_eq!(state.get("user.name"), Some(Value::from("bo")));
        assert_eq!(*log.borrow(), vec!["name"]);
    }

    #[test]
    fn test_each_write_notifies_once() {
        let state = todo_state();
        let log = recorder(&state);
        state.set("title", "A").unwrap();
        state.set("title", "B").unwrap();
        state.remove("user").unwrap();
        assert_eq!(*log.borrow(), vec!["title", "title", "user"]);
    }

    #[test]
    fn test_list_writes() {
        let state = todo_state();
        state.set("items[2]", "bread").unwrap();
        assert_eq!(state.get("items[2]"), Some(Value::from("bread")));

        let err = state.set("items[7]", "x").unwrap_err();
        assert_eq!(
            err,
            StateError::IndexOutOfBounds {
                path: "items".into(),
                index: 7,
                len: 3
            }
        );

        assert_eq!(state.remove("items[0]").unwrap(), Some(Value::from("milk")));
        assert_eq!(state.get("items[0]"), Some(Value::from("eggs")));
    }

    #[test]
    fn test_write_errors() {
        let state = todo_state();
        let log = recorder(&state);

        assert_eq!(state.set("", 1), Err(StateError::EmptyPath));
        assert_eq!(
            state.set("missing.name", 1),
            Err(StateError::PathNotFound("missing".into()))
        );
        assert_eq!(
            state.set("title.len", 1),
            Err(StateError::NotAContainer("title".into()))
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_absent_key_still_notifies() {
        let state = todo_state();
        let log = recorder(&state);
        assert_eq!(state.remove("user.email").unwrap(), None);
        assert_eq!(*log.borrow(), vec!["email"]);
    }

    #[test]
    fn test_view_is_path_qualified() {
        let state = todo_state();
        let log = recorder(&state);
        let user = state.view("user");

        assert_eq!(user.get("name"), Some(Value::from("ana")));
        user.set("email", "a@x.io").unwrap();
        assert_eq!(state.get("user.email"), Some(Value::from("a@x.io")));
        assert_eq!(*log.borrow(), vec!["email"]);

        let items = state.view("items");
        assert_eq!(items.view("[0]").path().to_string(), "items[0]");
        assert_eq!(items.get("[1]"), Some(Value::from("eggs")));
    }

    #[test]
    fn test_unsubscribe() {
        let state = todo_state();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = state.subscribe(move |_| c.set(c.get() + 1));

        state.set("title", "x").unwrap();
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set("title", "y").unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscriber_may_write_reentrantly() {
        let state = todo_state();
        let inner = state.clone();
        state.subscribe(move |prop| {
            if prop == "title" {
                inner.set("user.name", "from-callback").unwrap();
            }
        });
        state.set("title", "x").unwrap();
        assert_eq!(state.get("user.name"), Some(Value::from("from-callback")));
    }
}
