//! Click-to-open selection, shared by the graph overlay and the match results panel.

use crate::store::{Change, Store};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent<K> {
	/// Open `K`, or close it if it is already open.
	Select(K),
	/// Close whatever is open.
	Clear,
}

/// At most one selected item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<K>(Option<K>);

impl<K> Default for Selection<K> {
	fn default() -> Self {
		Selection(None)
	}
}

impl<K: PartialEq> Selection<K> {
	pub fn selected(&self) -> Option<&K> {
		self.0.as_ref()
	}

	pub fn is_selected(&self, key: &K) -> bool {
		self.0.as_ref() == Some(key)
	}

	/// Selecting the open item again toggles it closed.
	pub fn reduce(self, event: SelectionEvent<K>) -> Change<Self> {
		match (self.0, event) {
			(Some(current), SelectionEvent::Select(key)) if current == key => {
				Change::Changed(Selection(None))
			}
			(_, SelectionEvent::Select(key)) => Change::Changed(Selection(Some(key))),
			(None, SelectionEvent::Clear) => Change::Unchanged(Selection(None)),
			(Some(_), SelectionEvent::Clear) => Change::Changed(Selection(None)),
		}
	}
}

/// Owns a [`Selection`] and notifies subscribers whenever it changes.
pub struct SelectionController<K> {
	store: Store<Selection<K>>,
}

impl<K> Default for SelectionController<K> {
	fn default() -> Self {
		Self {
			store: Store::new(Selection::default()),
		}
	}
}

impl<K: PartialEq> SelectionController<K> {
	pub fn selected(&self) -> Option<&K> {
		self.store.get().selected()
	}

	/// Toggle `key`; returns whether the selection changed.
	pub fn select(&mut self, key: K) -> bool {
		self.store.dispatch(|s| s.reduce(SelectionEvent::Select(key)))
	}

	/// Close the selection unconditionally; returns whether anything was open.
	pub fn clear(&mut self) -> bool {
		self.store.dispatch(|s| s.reduce(SelectionEvent::Clear))
	}

	pub fn subscribe(&mut self, f: impl FnMut(&Selection<K>) + 'static) {
		self.store.subscribe(f)
	}
}

/// `"issuingOrg"` / `"verify_url"` to `"Issuing Org"` / `"Verify Url"`.
pub fn humanize_key(key: &str) -> String {
	let mut words: Vec<String> = Vec::new();
	let mut current = String::new();
	let mut prev_lower = false;

	for ch in key.chars() {
		if ch == '_' || ch == '-' || ch.is_whitespace() {
			if !current.is_empty() {
				words.push(std::mem::take(&mut current));
			}
			prev_lower = false;
			continue;
		}
		if ch.is_uppercase() && prev_lower && !current.is_empty() {
			words.push(std::mem::take(&mut current));
		}
		prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
		current.push(ch);
	}
	if !current.is_empty() {
		words.push(current);
	}

	words
		.iter()
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn selecting_twice_clears() {
		let mut controller = SelectionController::default();
		assert!(controller.select("b"));
		assert_eq!(controller.selected(), Some(&"b"));
		assert!(controller.select("b"));
		assert_eq!(controller.selected(), None);
	}

	#[test]
	fn selecting_another_replaces() {
		let mut controller = SelectionController::default();
		controller.select(1);
		controller.select(2);
		assert_eq!(controller.selected(), Some(&2));
	}

	#[test]
	fn clear_is_unconditional() {
		let notified = Rc::new(RefCell::new(0));
		let mut controller = SelectionController::default();
		let sink = notified.clone();
		controller.subscribe(move |_| *sink.borrow_mut() += 1);

		assert!(!controller.clear());
		controller.select("a");
		assert!(controller.clear());
		assert_eq!(controller.selected(), None);
		assert_eq!(*notified.borrow(), 2);
	}

	#[test]
	fn pure_reduce_matches_controller() {
		let s = Selection::default()
			.reduce(SelectionEvent::Select("x"))
			.into_inner();
		assert!(s.is_selected(&"x"));
		let s = s.reduce(SelectionEvent::Select("x")).into_inner();
		assert_eq!(s, Selection::default());
	}

	#[test]
	fn keys_are_humanized() {
		assert_eq!(humanize_key("name"), "Name");
		assert_eq!(humanize_key("issuingOrg"), "Issuing Org");
		assert_eq!(humanize_key("verify_url"), "Verify Url");
		assert_eq!(humanize_key("verifyURL"), "Verify URL");
		assert_eq!(humanize_key("job-title"), "Job Title");
		assert_eq!(humanize_key(""), "");
	}
}
