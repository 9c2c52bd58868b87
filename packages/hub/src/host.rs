//! # The native locator facility
//!
//! [`LocatorHost`] is everything the controller needs from the platform's
//! URL/history mechanism: read the current fragment, push a new entry, step the
//! native stack back or forward, and subscribe to out-of-band changes (native
//! back/forward buttons, edits to the address bar).
//!
//! Every primitive the controller invokes carries the [`TransitionId`] of the
//! transition that caused it. A host that can attribute a later notification
//! to one of those calls reports it in [`LocatorChange::origin`]; hosts that
//! cannot (the browser) leave it `None` and the controller falls back to its
//! settle window.
//!
//! [`MemoryHost`] models a browser's session history in memory. It backs the
//! native build and every controller test.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier of one controller-initiated transition. Monotonically increasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionId(pub u64);

impl TransitionId {
    pub fn next(self) -> Self {
        TransitionId(self.0 + 1)
    }
}

/// Notification of a locator change delivered by a host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatorChange {
    /// The new fragment, with or without a leading `#`.
    pub fragment: String,
    /// The self-initiated transition this notification echoes, when known.
    pub origin: Option<TransitionId>,
}

impl LocatorChange {
    /// A change the user made outside the controller.
    pub fn external(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            origin: None,
        }
    }

    /// The host's echo of a controller-initiated transition.
    pub fn echo(fragment: impl Into<String>, origin: TransitionId) -> Self {
        Self {
            fragment: fragment.into(),
            origin: Some(origin),
        }
    }
}

pub type Listener = Box<dyn Fn(&LocatorChange)>;

pub trait LocatorHost {
    /// The current fragment, or `None` when there is none.
    fn current_fragment(&self) -> Option<String>;

    /// Push a new native entry for `fragment`. Must not notify listeners
    /// synchronously.
    fn push(&self, fragment: &str, transition: TransitionId);

    fn back(&self, transition: TransitionId);

    fn forward(&self, transition: TransitionId);

    /// Register `listener` for out-of-band locator changes.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Registration handle. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Listener registry for hosts that dispatch notifications themselves.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Rc<RefCell<ListenerSetInner>>,
}

#[derive(Default)]
struct ListenerSetInner {
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn Fn(&LocatorChange)>)>,
}

impl ListenerSet {
    pub fn add(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::from(listener)));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(i, _)| *i != id);
            }
        })
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `change` to every listener registered at the time of the call.
    pub fn notify(&self, change: &LocatorChange) {
        // Snapshot first so listeners may (un)subscribe while being notified
        let listeners: Vec<_> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

/// A primitive the controller invoked on a [`MemoryHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    Push(String),
    Back,
    Forward,
}

/// In-memory model of a browser's session history.
///
/// Clones share state. With echoes enabled, `back`/`forward` queue a tagged
/// notification that is delivered by [`MemoryHost::deliver_echoes`], standing
/// in for the browser's asynchronous `popstate`.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Rc<RefCell<MemoryHostState>>,
    listeners: ListenerSet,
}

#[derive(Default)]
struct MemoryHostState {
    entries: Vec<String>,
    index: usize,
    calls: Vec<HostCall>,
    echo: bool,
    pending: Vec<LocatorChange>,
}

impl MemoryHost {
    /// A host whose only entry is `fragment` (empty for none).
    pub fn new(fragment: &str) -> Self {
        let host = Self::default();
        host.state.borrow_mut().entries.push(fragment.to_string());
        host
    }

    /// Builder method to queue echoes of `back`/`forward`.
    pub fn with_echoes(self) -> Self {
        self.state.borrow_mut().echo = true;
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    pub fn entries(&self) -> Vec<String> {
        self.state.borrow().entries.clone()
    }

    pub fn index(&self) -> usize {
        self.state.borrow().index
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver queued echoes. Returns how many were delivered.
    pub fn deliver_echoes(&self) -> usize {
        let pending = std::mem::take(&mut self.state.borrow_mut().pending);
        for change in &pending {
            self.listeners.notify(change);
        }
        pending.len()
    }

    /// The user pressed the native back button.
    pub fn simulate_back(&self) -> bool {
        let fragment = {
            let mut state = self.state.borrow_mut();
            if state.index == 0 {
                return false;
            }
            state.index -= 1;
            state.entries[state.index].clone()
        };
        self.listeners.notify(&LocatorChange::external(fragment));
        true
    }

    /// The user pressed the native forward button.
    pub fn simulate_forward(&self) -> bool {
        let fragment = {
            let mut state = self.state.borrow_mut();
            if state.index + 1 >= state.entries.len() {
                return false;
            }
            state.index += 1;
            state.entries[state.index].clone()
        };
        self.listeners.notify(&LocatorChange::external(fragment));
        true
    }

    /// The user edited the fragment in the address bar.
    pub fn simulate_fragment(&self, fragment: &str) {
        {
            let mut state = self.state.borrow_mut();
            let keep = state.index + 1;
            state.entries.truncate(keep);
            state.entries.push(fragment.to_string());
            state.index = state.entries.len() - 1;
        }
        self.listeners.notify(&LocatorChange::external(fragment));
    }

    fn step(&self, call: HostCall, transition: TransitionId) {
        let mut state = self.state.borrow_mut();
        let target = match call {
            HostCall::Back if state.index > 0 => Some(state.index - 1),
            HostCall::Forward if state.index + 1 < state.entries.len() => Some(state.index + 1),
            _ => None,
        };
        state.calls.push(call);
        if let Some(index) = target {
            state.index = index;
            if state.echo {
                let fragment = state.entries[index].clone();
                state.pending.push(LocatorChange::echo(fragment, transition));
            }
        }
    }
}

impl LocatorHost for MemoryHost {
    fn current_fragment(&self) -> Option<String> {
        let state = self.state.borrow();
        state
            .entries
            .get(state.index)
            .filter(|f| !f.is_empty())
            .cloned()
    }

    fn push(&self, fragment: &str, _transition: TransitionId) {
        let mut state = self.state.borrow_mut();
        let keep = state.index + 1;
        state.entries.truncate(keep);
        state.entries.push(fragment.to_string());
        state.index = state.entries.len() - 1;
        state.calls.push(HostCall::Push(fragment.to_string()));
    }

    fn back(&self, transition: TransitionId) {
        self.step(HostCall::Back, transition);
    }

    fn forward(&self, transition: TransitionId) {
        self.step(HostCall::Forward, transition);
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.listeners.add(listener)
    }
}
