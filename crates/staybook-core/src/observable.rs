//! # Observable State Cells
//!
//! A mutable cell holding the latest value of some state and pushing every
//! update to its subscribers.
//!
//! ## Architecture
//!
//! `ObservableState<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership. The owning service holds the `ObservableState` (the only
//! handle that can write); views receive a [`StateReader`] which can read and
//! subscribe but never write.
//!
//! ## Invariants
//!
//! 1. `current` is replaced wholesale on each write, never mutated in place.
//! 2. Subscribers are notified in registration order, and every subscriber
//!    has been notified before `write` returns.
//! 3. Subscribers observe writes in the order they happened. A write issued
//!    from inside a subscriber callback updates `current` immediately; its
//!    notification is queued behind the round in progress.
//! 4. [`Delivery::Replay`] cells call a new subscriber with `current` during
//!    `subscribe`. [`Delivery::Broadcast`] cells only deliver later writes.
//! 5. Unsubscribing (explicitly or by dropping the [`Subscription`]) removes
//!    the callback before the next notification round. Unsubscribing twice
//!    is a no-op.
//! 6. A replay subscriber added from inside a callback while writes are
//!    still queued receives `current` during `subscribe` and receives the
//!    same value again when the queued write is delivered. Bindings must
//!    tolerate the repeat.
//! 7. Subscriber panics are not caught. The round in progress is
//!    abandoned, its queued writes are dropped, and the next `write`
//!    starts a fresh round.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::RequestError;
use crate::state::{RequestState, StateBuilder};

/// How a cell treats subscribers that join after writes have happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// New subscribers immediately receive the current value.
    Replay,
    /// New subscribers only receive writes made after they subscribed.
    Broadcast,
}

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    current: T,
    version: u64,
    delivery: Delivery,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
    pending: VecDeque<T>,
    notifying: bool,
}

impl<T> Inner<T> {
    fn remove(&mut self, id: u64) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }
}

/// A request container: the observable cell every gateway writes into.
pub type RequestContainer<T, E = RequestError> = ObservableState<RequestState<T, E>>;

/// Single-owner observable cell.
pub struct ObservableState<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

/// Read-and-subscribe handle onto an [`ObservableState`].
///
/// Cloning a reader creates another handle to the **same** cell.
pub struct StateReader<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for StateReader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_inner("ObservableState", &self.inner, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for StateReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_inner("StateReader", &self.inner, f)
    }
}

fn debug_inner<T: fmt::Debug>(
    name: &str,
    inner: &Rc<RefCell<Inner<T>>>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let inner = inner.borrow();
    f.debug_struct(name)
        .field("current", &inner.current)
        .field("version", &inner.version)
        .field("delivery", &inner.delivery)
        .field("subscribers", &inner.subscribers.len())
        .finish()
}

impl<T: Clone + 'static> ObservableState<T> {
    /// Create a cell seeded with `initial`.
    pub fn new(initial: T, delivery: Delivery) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial,
                version: 0,
                delivery,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
            })),
        }
    }

    /// Create a replay cell seeded with `initial`.
    pub fn replay(initial: T) -> Self {
        Self::new(initial, Delivery::Replay)
    }

    /// Create a broadcast cell seeded with `initial`.
    pub fn broadcast(initial: T) -> Self {
        Self::new(initial, Delivery::Broadcast)
    }

    /// A read-only handle for consumers.
    pub fn reader(&self) -> StateReader<T> {
        StateReader {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Replace the current value and notify every subscriber.
    pub fn write(&self, next: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.current = next.clone();
            inner.version += 1;
            inner.pending.push_back(next);
            if inner.notifying {
                tracing::trace!(version = inner.version, "write queued behind notification round");
                return;
            }
            inner.notifying = true;
        }

        let _round = RoundGuard { inner: &self.inner };
        loop {
            let (value, callbacks) = {
                let mut inner = self.inner.borrow_mut();
                match inner.pending.pop_front() {
                    Some(value) => {
                        let callbacks: Vec<Callback<T>> =
                            inner.subscribers.iter().map(|(_, cb)| Rc::clone(cb)).collect();
                        (value, callbacks)
                    }
                    None => break,
                }
            };
            for callback in &callbacks {
                callback(&value);
            }
        }
    }

    /// Snapshot of the current value.
    pub fn read(&self) -> T {
        read(&self.inner)
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().current)
    }

    /// Register `on_next`; see [`StateReader::subscribe`].
    pub fn subscribe(&self, on_next: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.inner, on_next, true)
    }

    /// Number of writes since construction.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn delivery(&self) -> Delivery {
        self.inner.borrow().delivery
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Ends a notification round, including one a subscriber panicked out of.
struct RoundGuard<'a, T> {
    inner: &'a RefCell<Inner<T>>,
}

impl<T> Drop for RoundGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.pending.clear();
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> ObservableState<RequestState<T, E>> {
    /// A replay request container starting at INIT.
    pub fn request() -> Self {
        Self::replay(StateBuilder::new().for_init())
    }

    /// Return the container to INIT. Subscribers are kept.
    pub fn reset(&self) {
        self.write(StateBuilder::new().for_init());
    }
}

impl<T: Clone + 'static> StateReader<T> {
    /// Snapshot of the current value.
    pub fn read(&self) -> T {
        read(&self.inner)
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().current)
    }

    /// Register `on_next` for every subsequent write. Replay cells call it
    /// once with the current value before returning.
    pub fn subscribe(&self, on_next: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.inner, on_next, true)
    }

    /// Register `on_next` for subsequent writes only, regardless of the
    /// cell's delivery mode.
    pub fn subscribe_changes(&self, on_next: impl Fn(&T) + 'static) -> Subscription {
        subscribe(&self.inner, on_next, false)
    }

    /// Number of writes since construction.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn delivery(&self) -> Delivery {
        self.inner.borrow().delivery
    }
}

fn read<T: Clone>(inner: &Rc<RefCell<Inner<T>>>) -> T {
    inner.borrow().current.clone()
}

fn subscribe<T: Clone + 'static>(
    inner: &Rc<RefCell<Inner<T>>>,
    on_next: impl Fn(&T) + 'static,
    allow_replay: bool,
) -> Subscription {
    let callback: Callback<T> = Rc::new(on_next);
    let (id, replay) = {
        let mut guard = inner.borrow_mut();
        let id = guard.next_id;
        guard.next_id += 1;
        guard.subscribers.push((id, Rc::clone(&callback)));
        let replay = (allow_replay && guard.delivery == Delivery::Replay)
            .then(|| guard.current.clone());
        (id, replay)
    };

    if let Some(current) = replay {
        callback(&current);
    }

    let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(inner);
    Subscription {
        detach: Some(Box::new(move || {
            if let Some(strong) = weak.upgrade() {
                strong.borrow_mut().remove(id);
            }
        })),
    }
}

/// Handle to a registered callback.
///
/// Unsubscribes when dropped. [`unsubscribe`](Subscription::unsubscribe)
/// may also be called explicitly; calling it more than once does nothing.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Status;
    use proptest::prelude::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn replay_subscriber_receives_current_immediately() {
        let cell = ObservableState::replay(7);
        cell.write(9);
        let (seen, cb) = recorder();
        let _sub = cell.subscribe(cb);
        assert_eq!(*seen.borrow(), vec![9]);
    }

    #[test]
    fn broadcast_subscriber_misses_prior_writes() {
        let cell = ObservableState::broadcast("init");
        cell.write("first");
        let (seen, cb) = recorder();
        let _sub = cell.subscribe(cb);
        assert!(seen.borrow().is_empty());
        cell.write("second");
        assert_eq!(*seen.borrow(), vec!["second"]);
    }

    #[test]
    fn late_subscriber_sees_x_then_y() {
        let cell = ObservableState::replay(0);
        cell.write(1);
        let (seen, cb) = recorder();
        let _sub = cell.subscribe(cb);
        cell.write(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn notification_follows_registration_order() {
        let cell = ObservableState::broadcast(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Rc::clone(&order);
                cell.subscribe(move |_| order.borrow_mut().push(i))
            })
            .collect();
        cell.write(1);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn unsubscribe_twice_is_noop() {
        let cell = ObservableState::replay(0);
        let (seen, cb) = recorder();
        let mut sub = cell.subscribe(cb);
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        cell.write(5);
        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let cell = ObservableState::replay(0);
        {
            let _sub = cell.subscribe(|_| {});
            assert_eq!(cell.subscriber_count(), 1);
        }
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_cell_is_inert() {
        let cell = ObservableState::replay(0);
        let mut sub = cell.subscribe(|_| {});
        drop(cell);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn nested_write_is_delivered_in_order_to_every_subscriber() {
        let cell = Rc::new(ObservableState::broadcast(0));
        let writer = Rc::downgrade(&cell);
        let _first = cell.subscribe(move |v| {
            if *v == 1 {
                if let Some(cell) = writer.upgrade() {
                    cell.write(2);
                }
            }
        });
        let (seen, cb) = recorder();
        let _second = cell.subscribe(cb);
        cell.write(1);
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(cell.read(), 2);
    }

    #[test]
    fn panicking_subscriber_does_not_stall_later_writes() {
        let cell = ObservableState::broadcast(0);
        let _bomb = cell.subscribe(|v| {
            if *v == 1 {
                panic!("subscriber failure");
            }
        });
        let (seen, cb) = recorder();
        let _sub = cell.subscribe(cb);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cell.write(1)));
        assert!(outcome.is_err());

        cell.write(2);
        cell.write(3);
        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(cell.read(), 3);
    }

    #[test]
    fn replay_subscriber_added_mid_round_sees_queued_value_twice() {
        let cell = Rc::new(ObservableState::replay(0));
        let late: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let (seen, cb) = recorder();
        let cb = Rc::new(cb);

        let writer = Rc::downgrade(&cell);
        let slot = Rc::clone(&late);
        let _first = cell.subscribe(move |v| {
            if *v != 1 {
                return;
            }
            if let Some(cell) = writer.upgrade() {
                cell.write(2);
                let cb = Rc::clone(&cb);
                *slot.borrow_mut() = Some(cell.subscribe(move |v| (*cb)(v)));
            }
        });

        cell.write(1);
        assert_eq!(*seen.borrow(), vec![2, 2]);
    }

    #[test]
    fn callback_may_read_the_cell_it_observes() {
        let cell = ObservableState::replay(0);
        let reader = cell.reader();
        let (seen, cb) = recorder();
        let _sub = cell.subscribe(move |_| cb(&reader.read()));
        cell.write(3);
        assert_eq!(*seen.borrow(), vec![0, 3]);
    }

    #[test]
    fn subscribe_changes_skips_replay() {
        let cell = ObservableState::replay(1);
        let (seen, cb) = recorder();
        let _sub = cell.reader().subscribe_changes(cb);
        assert!(seen.borrow().is_empty());
        cell.write(2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn reset_returns_to_init_and_keeps_subscribers() {
        let container: RequestContainer<bool> = ObservableState::request();
        let (seen, cb) = recorder();
        let _sub = container.subscribe(cb);
        container.write(RequestState::builder().for_success(true));
        container.reset();
        assert_eq!(container.read().status(), Status::Init);
        assert!(container.read().value().is_none());
        assert_eq!(container.subscriber_count(), 1);

        container.write(RequestState::builder().for_success(false));
        let statuses: Vec<Status> = seen.borrow().iter().map(RequestState::status).collect();
        assert_eq!(statuses, vec![Status::Init, Status::Ok, Status::Init, Status::Ok]);
    }

    #[test]
    fn version_counts_writes() {
        let cell = ObservableState::replay(0);
        assert_eq!(cell.version(), 0);
        cell.write(1);
        cell.write(1);
        assert_eq!(cell.version(), 2);
        assert_eq!(cell.reader().version(), 2);
    }

    proptest! {
        #[test]
        fn replay_always_delivers_latest(writes in proptest::collection::vec(any::<i32>(), 0..16)) {
            let cell = ObservableState::replay(-1);
            for w in &writes {
                cell.write(*w);
            }
            let (seen, cb) = recorder();
            let _sub = cell.subscribe(cb);
            let expected = writes.last().copied().unwrap_or(-1);
            prop_assert_eq!(seen.borrow().clone(), vec![expected]);
        }

        #[test]
        fn reset_always_yields_init(writes in proptest::collection::vec(any::<bool>(), 0..8)) {
            let container: RequestContainer<u8> = ObservableState::request();
            for ok in writes {
                if ok {
                    container.write(RequestState::builder().for_success(1));
                } else {
                    container.write(RequestState::builder().for_unknown_error());
                }
            }
            container.reset();
            prop_assert!(container.read().is_init());
            prop_assert!(container.read().value().is_none());
        }
    }
}
