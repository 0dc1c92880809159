use std::sync::Arc;

use log::info;

use super::adjacency::IndexedGraph;
use super::engine::ForceEngine;
use super::highlight::HighlightController;
use super::layout::{LayoutDriver, LayoutEngine, LayoutEvent};
use super::types::NodeIx;
use crate::config::LayoutConfig;
use crate::selection::SelectionController;

pub const NODE_RADIUS: f64 = 6.0;
pub const HIT_RADIUS: f64 = 12.0;

/// Pointer travel (screen px) below which a press-release counts as a click.
const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node: Option<NodeIx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything the canvas needs between frames for one graph view.
pub struct ForceGraphState {
	pub graph: Option<Arc<IndexedGraph>>,
	pub layout: LayoutDriver<ForceEngine>,
	pub highlight: HighlightController,
	pub selection: SelectionController<NodeIx>,
	pub drag: DragState,
	pub pan: PanState,
	/// Eased 0..1 strength of the dimming while a node is focused.
	pub highlight_t: f64,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(config: LayoutConfig, width: f64, height: f64) -> Self {
		Self {
			graph: None,
			layout: LayoutDriver::new(config, width, height),
			highlight: HighlightController::default(),
			selection: SelectionController::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			highlight_t: 0.0,
			flow_time: 0.0,
		}
	}

	/// Swap in a new snapshot (or none), resetting highlight and selection.
	///
	/// The previous snapshot and its engine are dropped together.
	pub fn load(&mut self, graph: Option<Arc<IndexedGraph>>) {
		if let Some(old) = self.graph.as_deref() {
			self.highlight.on_hover_end(old);
		}
		self.selection.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.highlight_t = 0.0;

		match &graph {
			Some(g) => {
				info!("laying out {} nodes", g.node_count());
				self.layout.attach(ForceEngine::new(g));
			}
			None => {
				self.layout.detach();
			}
		}
		self.graph = graph;
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeIx> {
		let (gx, gy) = self.layout.screen_to_graph(sx, sy);
		let engine = self.layout.engine()?;
		let mut found = None;
		let mut best = HIT_RADIUS;
		engine.visit_positions(&mut |ix, x, y| {
			let (dx, dy) = (x - gx, y - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < best {
				best = dist;
				found = Some(ix);
			}
		});
		found
	}

	pub fn node_position(&self, target: NodeIx) -> Option<(f64, f64)> {
		let mut pos = None;
		self.layout.engine()?.visit_positions(&mut |ix, x, y| {
			if ix == target {
				pos = Some((x, y));
			}
		});
		pos
	}

	/// Synchronous hover update; returns whether the highlight changed.
	pub fn set_hover(&mut self, node: Option<NodeIx>) -> bool {
		let Some(graph) = self.graph.as_deref() else {
			return false;
		};
		let was_idle = self.highlight.state().is_idle();
		let changed = match node {
			Some(ix) => self.highlight.on_hover(ix, graph),
			None => self.highlight.on_hover_end(graph),
		};
		if changed && (was_idle || node.is_none()) {
			// fade in from idle; leaving drops straight back to normal emphasis
			self.highlight_t = 0.0;
		}
		changed
	}

	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(ix) = self.node_at_position(x, y) {
			let (nx, ny) = self.node_position(ix).unwrap_or_default();
			self.drag = DragState {
				active: true,
				moved: false,
				node: Some(ix),
				start_x: x,
				start_y: y,
				node_start_x: nx,
				node_start_y: ny,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.layout.transform.x,
				transform_start_y: self.layout.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if (x - self.drag.start_x).hypot(y - self.drag.start_y) > CLICK_SLOP {
				self.drag.moved = true;
			}
			if let (Some(ix), true) = (self.drag.node, self.drag.moved) {
				let k = self.layout.transform.k;
				let nx = self.drag.node_start_x + (x - self.drag.start_x) / k;
				let ny = self.drag.node_start_y + (y - self.drag.start_y) / k;
				self.layout.pin(ix, nx, ny);
			}
		} else if self.pan.active {
			self.layout.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.layout.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// End a press; a press on a node without travel toggles its selection.
	pub fn release(&mut self) {
		if self.drag.active {
			match (self.drag.node, self.drag.moved) {
				(Some(ix), false) => {
					self.selection.select(ix);
				}
				(Some(_), true) => self.layout.rearm_settle(),
				_ => {}
			}
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
	}

	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.set_hover(None);
	}

	pub fn tick(&mut self, dt: f32) -> Option<LayoutEvent> {
		let event = self.layout.tick(dt);
		self.flow_time += dt as f64;

		if self.highlight.state().is_idle() {
			self.highlight_t = 0.0;
		} else {
			self.highlight_t += (1.0 - self.highlight_t) * 6.0 * dt as f64;
			self.highlight_t = self.highlight_t.min(1.0);
		}
		event
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.layout.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::components::force_graph::adapter::adapt;

	fn graph() -> Arc<IndexedGraph> {
		Arc::new(IndexedGraph::build(
			adapt(&json!({
				"nodes": [
					{"id": "a", "label": "Skill", "properties": {"name": "Python"}},
					{"id": "b", "label": "Candidate", "properties": {"name": "Jane"}}
				],
				"edges": [{"id": "e1", "source": "b", "target": "a", "label": "HAS_SKILL"}]
			}))
			.unwrap(),
		))
	}

	fn loaded() -> ForceGraphState {
		let mut state = ForceGraphState::new(LayoutConfig::default(), 800.0, 600.0);
		state.load(Some(graph()));
		state
	}

	fn screen_pos(state: &ForceGraphState, ix: NodeIx) -> (f64, f64) {
		let (x, y) = state.node_position(ix).unwrap();
		state.layout.graph_to_screen(x, y)
	}

	#[test]
	fn hovering_over_node_focuses_it() {
		let mut state = loaded();
		let b = NodeIx(1);
		let (x, y) = screen_pos(&state, b);

		state.pointer_move(x, y);
		assert_eq!(state.highlight.state().hovered(), Some(b));
		assert_eq!(state.highlight.state().nodes().len(), 2);

		state.pointer_move(-1_000.0, -1_000.0);
		assert!(state.highlight.state().is_idle());
	}

	#[test]
	fn click_toggles_selection_without_hover_coupling() {
		let mut state = loaded();
		let a = NodeIx(0);
		let (x, y) = screen_pos(&state, a);

		state.press(x, y);
		state.release();
		assert_eq!(state.selection.selected(), Some(&a));

		// hovering elsewhere keeps the detail open
		let (bx, by) = screen_pos(&state, NodeIx(1));
		state.pointer_move(bx, by);
		assert_eq!(state.selection.selected(), Some(&a));

		state.press(x, y);
		state.release();
		assert_eq!(state.selection.selected(), None);
	}

	#[test]
	fn dragging_pins_instead_of_selecting() {
		let mut state = loaded();
		let a = NodeIx(0);
		let (x, y) = screen_pos(&state, a);

		state.press(x, y);
		state.pointer_move(x + 40.0, y);
		state.release();

		assert_eq!(state.selection.selected(), None);
		let (nx, _) = state.node_position(a).unwrap();
		let (start, _) = state.layout.screen_to_graph(x, y);
		assert!((nx - (start + 40.0)).abs() < 1e-3);
	}

	#[test]
	fn new_snapshot_resets_highlight_and_selection() {
		let mut state = loaded();
		let (x, y) = screen_pos(&state, NodeIx(0));
		state.press(x, y);
		state.release();
		state.pointer_move(x, y);
		assert!(!state.highlight.state().is_idle());

		state.load(Some(graph()));
		assert!(state.highlight.state().is_idle());
		assert_eq!(state.selection.selected(), None);
		assert!(!state.layout.is_configured());
	}

	#[test]
	fn clearing_the_snapshot_detaches_engine() {
		let mut state = loaded();
		state.load(None);
		assert!(state.layout.engine().is_none());
		assert_eq!(state.node_at_position(400.0, 300.0), None);
		assert_eq!(state.tick(0.016), None);
	}

	#[test]
	fn highlight_fades_in_and_drops_on_leave() {
		let mut state = loaded();
		let (x, y) = screen_pos(&state, NodeIx(0));
		state.pointer_move(x, y);
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert!(state.highlight_t > 0.0);

		state.pointer_leave();
		assert_eq!(state.highlight_t, 0.0);
		assert!(state.highlight.state().is_idle());
	}
}
