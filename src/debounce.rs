//! Cancellable-timer debouncing.
//!
//! A [`Debouncer`] runs the most recently submitted task once a quiet period
//! has elapsed. Submitting again before then cancels the pending task and
//! restarts the wait. Timers come from a [`TimerScheduler`] whose handles
//! cancel on drop, so tests can drive time by hand.

use gloo_timers::callback::Timeout;

/// Something that can run a task after a delay.
pub trait TimerScheduler {
	/// Dropping the handle must cancel the task if it has not run yet.
	type Handle;

	/// Run `task` once after `delay_ms` milliseconds.
	fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers via `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl TimerScheduler for BrowserScheduler {
	type Handle = Timeout;

	fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
		Timeout::new(delay_ms, task)
	}
}

/// Runs only the last task submitted within a quiet window.
pub struct Debouncer<S: TimerScheduler> {
	delay_ms: u32,
	scheduler: S,
	pending: Option<S::Handle>,
}

impl<S: TimerScheduler> Debouncer<S> {
	/// A debouncer waiting `delay_ms` of inactivity.
	pub fn new(delay_ms: u32, scheduler: S) -> Self {
		Self {
			delay_ms,
			scheduler,
			pending: None,
		}
	}

	/// Replace any pending task with `task` and restart the wait.
	pub fn submit(&mut self, task: impl FnOnce() + 'static) {
		self.pending = None;
		self.pending = Some(self.scheduler.schedule(self.delay_ms, Box::new(task)));
	}

	/// Drop the pending task, if any.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// Whether a task is waiting (it may already have fired).
	#[cfg(test)]
	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use super::*;

	struct Slot {
		due_at: u32,
		task: Option<Box<dyn FnOnce()>>,
		cancelled: Rc<Cell<bool>>,
	}

	/// Manual clock: tasks fire only when `advance` passes their deadline.
	#[derive(Clone, Default)]
	struct ManualScheduler {
		now: Rc<Cell<u32>>,
		slots: Rc<RefCell<Vec<Slot>>>,
	}

	struct ManualHandle(Rc<Cell<bool>>);

	impl Drop for ManualHandle {
		fn drop(&mut self) {
			self.0.set(true);
		}
	}

	impl TimerScheduler for ManualScheduler {
		type Handle = ManualHandle;

		fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
			let cancelled = Rc::new(Cell::new(false));
			self.slots.borrow_mut().push(Slot {
				due_at: self.now.get() + delay_ms,
				task: Some(task),
				cancelled: cancelled.clone(),
			});
			ManualHandle(cancelled)
		}
	}

	impl ManualScheduler {
		fn advance(&self, ms: u32) {
			self.now.set(self.now.get() + ms);
			let now = self.now.get();
			let ready: Vec<_> = self
				.slots
				.borrow_mut()
				.iter_mut()
				.filter(|slot| slot.due_at <= now && !slot.cancelled.get())
				.filter_map(|slot| slot.task.take())
				.collect();
			for task in ready {
				task();
			}
		}
	}

	fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn FnOnce()>) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let sink = log.clone();
		let make = move |q: &str| {
			let sink = sink.clone();
			let q = q.to_string();
			Box::new(move || sink.borrow_mut().push(q)) as Box<dyn FnOnce()>
		};
		(log, make)
	}

	#[test]
	fn only_last_keystroke_fires_after_quiet_period() {
		let clock = ManualScheduler::default();
		let mut debouncer = Debouncer::new(300, clock.clone());
		let (log, query) = recorder();

		debouncer.submit(query("p"));
		clock.advance(100);
		debouncer.submit(query("py"));
		clock.advance(100);
		debouncer.submit(query("pyt"));
		clock.advance(299);
		assert!(log.borrow().is_empty());

		clock.advance(1);
		assert_eq!(*log.borrow(), vec!["pyt".to_string()]);
	}

	#[test]
	fn cancel_prevents_pending_task() {
		let clock = ManualScheduler::default();
		let mut debouncer = Debouncer::new(300, clock.clone());
		let (log, query) = recorder();

		debouncer.submit(query("sq"));
		assert!(debouncer.has_pending());
		debouncer.cancel();
		assert!(!debouncer.has_pending());
		clock.advance(1_000);
		assert!(log.borrow().is_empty());
	}
}
