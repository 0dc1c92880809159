//! Hover highlighting: Idle or Focused(node), with the derived node/edge sets.

use std::collections::HashSet;

use super::adjacency::IndexedGraph;
use super::types::{EdgeIx, NodeIx};
use crate::store::{Change, Store};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent {
	Enter(NodeIx),
	Leave,
}

/// How strongly something should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	/// Nothing is hovered.
	Normal,
	/// The hovered node itself.
	Focused,
	/// A neighbor of the hovered node, or one of its edges.
	Highlighted,
	/// Outside the hovered neighborhood.
	Dimmed,
}

/// Invariant: `hovered == None` implies both sets are empty; otherwise
/// `nodes == {hovered} ∪ neighbors(hovered)` and `edges == incident(hovered)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	hovered: Option<NodeIx>,
	nodes: HashSet<NodeIx>,
	edges: HashSet<EdgeIx>,
}

impl HighlightState {
	pub fn hovered(&self) -> Option<NodeIx> {
		self.hovered
	}

	pub fn is_idle(&self) -> bool {
		self.hovered.is_none()
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &HashSet<NodeIx> {
		&self.nodes
	}

	#[cfg(test)]
	pub fn edges(&self) -> &HashSet<EdgeIx> {
		&self.edges
	}

	pub fn node_emphasis(&self, ix: NodeIx) -> Emphasis {
		match self.hovered {
			None => Emphasis::Normal,
			Some(h) if h == ix => Emphasis::Focused,
			Some(_) if self.nodes.contains(&ix) => Emphasis::Highlighted,
			Some(_) => Emphasis::Dimmed,
		}
	}

	pub fn edge_emphasis(&self, ix: EdgeIx) -> Emphasis {
		match self.hovered {
			None => Emphasis::Normal,
			Some(_) if self.edges.contains(&ix) => Emphasis::Highlighted,
			Some(_) => Emphasis::Dimmed,
		}
	}

	/// Apply a hover event.
	///
	/// Takes the state by value; the set buffers are cleared and refilled in
	/// place. Moving from one node straight to another never passes through Idle.
	pub fn reduce(mut self, event: HoverEvent, graph: &IndexedGraph) -> Change<Self> {
		match event {
			HoverEvent::Enter(ix) if self.hovered == Some(ix) => Change::Unchanged(self),
			HoverEvent::Enter(ix) if ix.0 >= graph.node_count() => Change::Unchanged(self),
			HoverEvent::Enter(ix) => {
				self.hovered = Some(ix);
				self.nodes.clear();
				self.edges.clear();
				self.nodes.insert(ix);
				self.nodes.extend(graph.neighbors(ix).iter().copied());
				self.edges.extend(graph.incident(ix).iter().copied());
				Change::Changed(self)
			}
			HoverEvent::Leave if self.hovered.is_none() => Change::Unchanged(self),
			HoverEvent::Leave => {
				self.hovered = None;
				self.nodes.clear();
				self.edges.clear();
				Change::Changed(self)
			}
		}
	}
}

/// Owns the highlight state and notifies subscribers on every transition.
#[derive(Default)]
pub struct HighlightController {
	store: Store<HighlightState>,
}

impl HighlightController {
	pub fn state(&self) -> &HighlightState {
		self.store.get()
	}

	/// Returns whether the state changed.
	pub fn on_hover(&mut self, ix: NodeIx, graph: &IndexedGraph) -> bool {
		self.store
			.dispatch(|s| s.reduce(HoverEvent::Enter(ix), graph))
	}

	/// Returns whether the state changed.
	pub fn on_hover_end(&mut self, graph: &IndexedGraph) -> bool {
		self.store.dispatch(|s| s.reduce(HoverEvent::Leave, graph))
	}

	pub fn subscribe(&mut self, f: impl FnMut(&HighlightState) + 'static) {
		self.store.subscribe(f)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use serde_json::json;

	use super::*;
	use crate::components::force_graph::adapter::adapt;

	fn sample() -> IndexedGraph {
		IndexedGraph::build(
			adapt(&json!({
				"nodes": [
					{"id": "a", "label": "Skill", "properties": {"name": "Python"}},
					{"id": "b", "label": "Candidate", "properties": {"name": "Jane"}},
					{"id": "c", "label": "Candidate", "properties": {"name": "John"}},
					{"id": "d", "label": "JobRole", "properties": {"name": "Analyst"}}
				],
				"edges": [
					{"id": "e1", "source": "b", "target": "a", "label": "HAS_SKILL"},
					{"id": "e2", "source": "c", "target": "a", "label": "HAS_SKILL"},
					{"id": "e3", "source": "d", "target": "c", "label": "INTERVIEWED"},
					{"id": "e4", "source": "z", "target": "b", "label": "HAS_SKILL"}
				]
			}))
			.unwrap(),
		)
	}

	fn node_ids(graph: &IndexedGraph, state: &HighlightState) -> Vec<String> {
		let mut ids: Vec<_> = state.nodes().iter().map(|&i| graph.node(i).id.clone()).collect();
		ids.sort();
		ids
	}

	fn edge_ids(graph: &IndexedGraph, state: &HighlightState) -> Vec<String> {
		let mut ids: Vec<_> = state.edges().iter().map(|&i| graph.edge(i).id.clone()).collect();
		ids.sort();
		ids
	}

	#[test]
	fn hovering_candidate_highlights_its_skill() {
		let graph = sample();
		let b = graph.node_ix("b").unwrap();
		let mut controller = HighlightController::default();

		assert!(controller.on_hover(b, &graph));
		let state = controller.state();
		assert_eq!(state.hovered(), Some(b));
		assert_eq!(node_ids(&graph, state), ["a", "b"]);
		// e4 points at a missing node and never shows up
		assert_eq!(edge_ids(&graph, state), ["e1"]);
	}

	#[test]
	fn hover_then_leave_restores_idle_exactly() {
		let graph = sample();
		let mut controller = HighlightController::default();
		let before = controller.state().clone();

		for (ix, _) in graph.nodes() {
			controller.on_hover(ix, &graph);
			controller.on_hover_end(&graph);
			assert_eq!(*controller.state(), before);
			assert!(controller.state().nodes().is_empty());
			assert!(controller.state().edges().is_empty());
		}
	}

	#[test]
	fn moving_between_nodes_never_reports_idle() {
		let graph = sample();
		let a = graph.node_ix("a").unwrap();
		let d = graph.node_ix("d").unwrap();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut controller = HighlightController::default();
		let sink = seen.clone();
		controller.subscribe(move |s: &HighlightState| sink.borrow_mut().push(s.hovered()));

		controller.on_hover(a, &graph);
		controller.on_hover(d, &graph);

		assert_eq!(*seen.borrow(), vec![Some(a), Some(d)]);
		assert_eq!(node_ids(&graph, controller.state()), ["c", "d"]);
		assert_eq!(edge_ids(&graph, controller.state()), ["e3"]);
	}

	#[test]
	fn repeated_hover_and_leave_are_no_ops() {
		let graph = sample();
		let a = graph.node_ix("a").unwrap();
		let mut controller = HighlightController::default();

		assert!(!controller.on_hover_end(&graph));
		assert!(controller.on_hover(a, &graph));
		assert!(!controller.on_hover(a, &graph));
		assert!(controller.on_hover_end(&graph));
		assert!(!controller.on_hover_end(&graph));
	}

	#[test]
	fn emphasis_follows_the_sets() {
		let graph = sample();
		let [a, b, c, d] = ["a", "b", "c", "d"].map(|id| graph.node_ix(id).unwrap());
		let idle = HighlightState::default();
		assert_eq!(idle.node_emphasis(a), Emphasis::Normal);
		assert_eq!(idle.edge_emphasis(EdgeIx(2)), Emphasis::Normal);

		let focused = idle.reduce(HoverEvent::Enter(a), &graph).into_inner();
		assert_eq!(focused.node_emphasis(a), Emphasis::Focused);
		assert_eq!(focused.node_emphasis(b), Emphasis::Highlighted);
		assert_eq!(focused.node_emphasis(c), Emphasis::Highlighted);
		assert_eq!(focused.node_emphasis(d), Emphasis::Dimmed);
		assert_eq!(focused.edge_emphasis(EdgeIx(0)), Emphasis::Highlighted);
		assert_eq!(focused.edge_emphasis(EdgeIx(2)), Emphasis::Dimmed);
	}

	#[test]
	fn unknown_index_is_ignored() {
		let graph = sample();
		let change = HighlightState::default().reduce(HoverEvent::Enter(NodeIx(99)), &graph);
		assert!(!change.is_changed());
		assert!(change.into_inner().is_idle());
	}
}
