//! Notify-on-change state container.
//!
//! State transitions are plain functions `(state, event) -> Change<state>`; the
//! store owns the current value, applies a transition and tells subscribers
//! only when the transition reported a change.

/// Result of applying a transition to a piece of state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change<S> {
	/// The event did not alter the state.
	Unchanged(S),
	/// The event produced a different state.
	Changed(S),
}

impl<S> Change<S> {
	/// The resulting state, whether it changed or not.
	pub fn into_inner(self) -> S {
		match self {
			Change::Unchanged(s) | Change::Changed(s) => s,
		}
	}

	/// Whether the transition altered the state.
	#[cfg(test)]
	pub fn is_changed(&self) -> bool {
		matches!(self, Change::Changed(_))
	}
}

type Subscriber<S> = Box<dyn FnMut(&S)>;

/// Owns one value and notifies subscribers whenever a dispatched transition changes it.
pub struct Store<S> {
	state: S,
	subscribers: Vec<Subscriber<S>>,
}

impl<S: Default> Default for Store<S> {
	fn default() -> Self {
		Self::new(S::default())
	}
}

impl<S: Default> Store<S> {
	/// Wrap an initial state.
	pub fn new(state: S) -> Self {
		Self {
			state,
			subscribers: Vec::new(),
		}
	}

	/// The current state.
	pub fn get(&self) -> &S {
		&self.state
	}

	/// Register a callback run after every change.
	pub fn subscribe(&mut self, subscriber: impl FnMut(&S) + 'static) {
		self.subscribers.push(Box::new(subscriber));
	}

	/// Apply a transition, notifying subscribers when it reports a change.
	pub fn dispatch(&mut self, transition: impl FnOnce(S) -> Change<S>) -> bool {
		let current = std::mem::take(&mut self.state);
		match transition(current) {
			Change::Unchanged(state) => {
				self.state = state;
				false
			}
			Change::Changed(state) => {
				self.state = state;
				let state = &self.state;
				for subscriber in self.subscribers.iter_mut() {
					subscriber(state);
				}
				true
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	fn bump_if_below(limit: u32) -> impl FnOnce(u32) -> Change<u32> {
		move |n| {
			if n < limit {
				Change::Changed(n + 1)
			} else {
				Change::Unchanged(n)
			}
		}
	}

	#[test]
	fn subscribers_only_see_changes() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut store = Store::new(0u32);
		let sink = seen.clone();
		store.subscribe(move |n| sink.borrow_mut().push(*n));

		assert!(store.dispatch(bump_if_below(2)));
		assert!(store.dispatch(bump_if_below(2)));
		assert!(!store.dispatch(bump_if_below(2)));

		assert_eq!(*seen.borrow(), vec![1, 2]);
		assert_eq!(*store.get(), 2);
	}

	#[test]
	fn every_subscriber_is_notified_in_order() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut store = Store::new(0u32);
		for name in ["first", "second"] {
			let sink = log.clone();
			store.subscribe(move |n| sink.borrow_mut().push(format!("{name}:{n}")));
		}

		store.dispatch(bump_if_below(10));
		assert_eq!(*log.borrow(), ["first:1", "second:1"]);
	}
}
