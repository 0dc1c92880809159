//! Last-request-wins bookkeeping for views that fetch.
//!
//! Each fetch takes a [`Ticket`]; starting a newer fetch or tearing the view
//! down makes every older ticket stale, and a response carrying a stale
//! ticket is dropped on arrival.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-view generation counter.
#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
	latest: Arc<AtomicU64>,
}

/// Proof that a request was the newest one when it started.
#[derive(Clone, Debug)]
pub struct Ticket {
	generation: u64,
	latest: Arc<AtomicU64>,
}

impl RequestTracker {
	/// A tracker with no requests issued yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a new request, superseding every earlier ticket.
	pub fn begin(&self) -> Ticket {
		let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
		Ticket {
			generation,
			latest: self.latest.clone(),
		}
	}

	/// Make every outstanding ticket stale without starting a request.
	pub fn invalidate(&self) {
		self.latest.fetch_add(1, Ordering::SeqCst);
	}
}

impl Ticket {
	/// Whether no newer request has started and the view has not been torn down.
	pub fn is_current(&self) -> bool {
		self.latest.load(Ordering::SeqCst) == self.generation
	}

	/// Generation number of this ticket.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn newer_request_supersedes_older() {
		let tracker = RequestTracker::new();
		let first = tracker.begin();
		assert!(first.is_current());

		let second = tracker.begin();
		assert!(!first.is_current());
		assert!(second.is_current());
		assert!(second.generation() > first.generation());
	}

	#[test]
	fn stale_response_arriving_late_is_rejected() {
		let tracker = RequestTracker::new();
		let mut applied = None;

		let first = tracker.begin();
		let second = tracker.begin();

		// second resolves first, then the late first response arrives
		for (ticket, payload) in [(&second, "fresh"), (&first, "stale")] {
			if ticket.is_current() {
				applied = Some(payload);
			}
		}
		assert_eq!(applied, Some("fresh"));
	}

	#[test]
	fn stale_response_is_rejected_while_newer_is_pending() {
		let tracker = RequestTracker::new();
		let first = tracker.begin();
		let _pending = tracker.begin();
		assert!(!first.is_current());
	}

	#[test]
	fn invalidate_on_teardown_rejects_in_flight() {
		let tracker = RequestTracker::new();
		let ticket = tracker.begin();
		tracker.clone().invalidate();
		assert!(!ticket.is_current());
	}
}
