//! # Effect Bindings
//!
//! A view registers effects against one or more observable cells. Each
//! effect runs once immediately (for replay cells) and then once per write.
//! The view keeps its effects in a [`Bindings`] scope; tearing the scope
//! down unsubscribes that view only, leaving every other view's
//! subscriptions and the cells' current values untouched.

use std::rc::Rc;

use crate::observable::{StateReader, Subscription};

/// The subscriptions owned by one view instance.
#[derive(Debug, Default)]
pub struct Bindings {
    subscriptions: Vec<Subscription>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `effect` against `source` now (replay cells) and on every write.
    pub fn bind<T: Clone + 'static>(
        &mut self,
        source: &StateReader<T>,
        effect: impl Fn(&T) + 'static,
    ) {
        self.subscriptions.push(source.subscribe(effect));
    }

    /// Run `effect` whenever either source changes, with both current values.
    ///
    /// The initial run is driven by `first`; a replay on `second` would only
    /// repeat it.
    pub fn bind2<A, B>(
        &mut self,
        first: &StateReader<A>,
        second: &StateReader<B>,
        effect: impl Fn(&A, &B) + 'static,
    ) where
        A: Clone + 'static,
        B: Clone + 'static,
    {
        let effect = Rc::new(effect);

        let on_first = Rc::clone(&effect);
        let second_reader = second.clone();
        self.subscriptions.push(first.subscribe(move |a| {
            let b = second_reader.read();
            on_first(a, &b);
        }));

        let first_reader = first.clone();
        self.subscriptions.push(second.subscribe_changes(move |b| {
            let a = first_reader.read();
            effect(&a, b);
        }));
    }

    /// Keep an externally created subscription alive for the view's lifetime.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Unsubscribe every effect. Safe to call more than once.
    pub fn teardown(&mut self) {
        for mut subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::ObservableState;
    use std::cell::RefCell;

    #[test]
    fn bind_runs_immediately_and_on_write() {
        let cell = ObservableState::replay(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = Bindings::new();
        let sink = Rc::clone(&seen);
        bindings.bind(&cell.reader(), move |v| sink.borrow_mut().push(*v));
        cell.write(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn bind2_sees_both_current_values() {
        let left = ObservableState::replay(1);
        let right = ObservableState::replay("a");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bindings = Bindings::new();
        let sink = Rc::clone(&seen);
        bindings.bind2(&left.reader(), &right.reader(), move |l, r| {
            sink.borrow_mut().push((*l, *r));
        });
        right.write("b");
        left.write(2);
        assert_eq!(*seen.borrow(), vec![(1, "a"), (1, "b"), (2, "b")]);
    }

    #[test]
    fn teardown_is_idempotent_and_scoped_to_one_view() {
        let cell = ObservableState::replay(0);
        let mut view_a = Bindings::new();
        let mut view_b = Bindings::new();
        view_a.bind(&cell.reader(), |_| {});
        view_b.bind(&cell.reader(), |_| {});
        assert_eq!(cell.subscriber_count(), 2);

        view_a.teardown();
        view_a.teardown();
        assert!(view_a.is_empty());
        assert_eq!(cell.subscriber_count(), 1);
        assert_eq!(view_b.len(), 1);
    }
}
