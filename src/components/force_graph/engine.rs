//! [`LayoutEngine`] backed by the `force_graph` simulation.
//!
//! `force_graph` only knows charge and zero-length springs, so link length,
//! centering and collision are applied as position corrections after each
//! simulation step.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::adjacency::IndexedGraph;
use super::layout::LayoutEngine;
use super::types::NodeIx;

const LINK_STRENGTH: f32 = 0.1;
const SEED_RADIUS: f64 = 100.0;

/// (x, y, pinned) per node, indexed by `NodeIx`.
type Slot = (f32, f32, bool);

pub struct ForceEngine {
	graph: ForceGraph<NodeIx, ()>,
	handles: Vec<DefaultNodeIdx>,
	links: Vec<(NodeIx, NodeIx)>,
	centering: f32,
	link_distance: Option<f32>,
	collision_radius: Option<f32>,
	scratch: Vec<Slot>,
}

impl ForceEngine {
	/// Seed every node on a circle around the origin and add one spring per linked edge.
	pub fn new(indexed: &IndexedGraph) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let count = indexed.node_count().max(1);
		let mut handles = Vec::with_capacity(indexed.node_count());

		for (ix, _) in indexed.nodes() {
			let angle = (ix.0 as f64) * 2.0 * PI / count as f64;
			handles.push(graph.add_node(NodeData {
				x: (SEED_RADIUS * angle.cos()) as f32,
				y: (SEED_RADIUS * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: ix,
			}));
		}

		let mut links = Vec::new();
		for (_, src, tgt) in indexed.linked_edges() {
			if src == tgt {
				continue;
			}
			graph.add_edge(handles[src.0], handles[tgt.0], EdgeData::default());
			links.push((src, tgt));
		}

		Self {
			graph,
			handles,
			links,
			centering: 0.0,
			link_distance: None,
			collision_radius: None,
			scratch: Vec::new(),
		}
	}

	#[cfg(test)]
	pub fn node_count(&self) -> usize {
		self.handles.len()
	}

	fn load_positions(&mut self) {
		let scratch = &mut self.scratch;
		scratch.clear();
		scratch.resize(self.handles.len(), (0.0, 0.0, false));
		self.graph.visit_nodes(|node| {
			scratch[node.data.user_data.0] = (node.x(), node.y(), node.data.is_anchor);
		});
	}

	fn store_positions(&mut self) {
		let scratch = &self.scratch;
		self.graph.visit_nodes_mut(|node| {
			let (x, y, pinned) = scratch[node.data.user_data.0];
			if !pinned {
				node.data.x = x;
				node.data.y = y;
			}
		});
	}
}

impl LayoutEngine for ForceEngine {
	fn set_repulsion(&mut self, strength: f32) {
		self.graph.parameters.force_charge = strength;
	}

	fn set_centering(&mut self, strength: f32) {
		self.centering = strength.clamp(0.0, 1.0);
	}

	fn set_link_distance(&mut self, distance: f32) {
		self.link_distance = (distance > 0.0).then_some(distance);
	}

	fn set_collision_radius(&mut self, radius: Option<f32>) {
		self.collision_radius = radius.filter(|r| *r > 0.0);
	}

	fn step(&mut self, dt: f32) -> f32 {
		self.load_positions();
		let before: Vec<(f32, f32)> = self.scratch.iter().map(|&(x, y, _)| (x, y)).collect();

		self.graph.update(dt);
		self.load_positions();
		if let Some(distance) = self.link_distance {
			relax_links(&mut self.scratch, &self.links, distance, LINK_STRENGTH);
		}
		recenter(&mut self.scratch, self.centering);
		if let Some(radius) = self.collision_radius {
			resolve_collisions(&mut self.scratch, radius);
		}
		self.store_positions();

		self.scratch
			.iter()
			.zip(&before)
			.map(|(&(x, y, _), &(bx, by))| ((x - bx).powi(2) + (y - by).powi(2)).sqrt())
			.fold(0.0, f32::max)
	}

	fn visit_positions(&self, f: &mut dyn FnMut(NodeIx, f64, f64)) {
		self.graph.visit_nodes(|node| {
			f(node.data.user_data, node.x() as f64, node.y() as f64);
		});
	}

	fn pin(&mut self, target: NodeIx, x: f64, y: f64) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == target {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
	}
}

/// Nudge each linked pair towards `distance` apart.
fn relax_links(slots: &mut [Slot], links: &[(NodeIx, NodeIx)], distance: f32, strength: f32) {
	for &(a, b) in links {
		let ((ax, ay, a_pinned), (bx, by, b_pinned)) = (slots[a.0], slots[b.0]);
		let (dx, dy) = (bx - ax, by - ay);
		let d = (dx * dx + dy * dy).sqrt();
		if d < 1e-3 {
			continue;
		}
		let pull = (d - distance) / d * strength;
		let (mx, my) = (dx * pull, dy * pull);
		match (a_pinned, b_pinned) {
			(true, true) => {}
			(false, true) => {
				slots[a.0].0 += mx;
				slots[a.0].1 += my;
			}
			(true, false) => {
				slots[b.0].0 -= mx;
				slots[b.0].1 -= my;
			}
			(false, false) => {
				slots[a.0].0 += mx * 0.5;
				slots[a.0].1 += my * 0.5;
				slots[b.0].0 -= mx * 0.5;
				slots[b.0].1 -= my * 0.5;
			}
		}
	}
}

/// Shift free nodes so their centroid moves `strength` of the way to the origin.
fn recenter(slots: &mut [Slot], strength: f32) {
	if strength <= 0.0 {
		return;
	}
	let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
	for &(x, y, pinned) in slots.iter() {
		if !pinned {
			sx += x;
			sy += y;
			n += 1;
		}
	}
	if n == 0 {
		return;
	}
	let (cx, cy) = (sx / n as f32, sy / n as f32);
	for slot in slots.iter_mut().filter(|s| !s.2) {
		slot.0 -= cx * strength;
		slot.1 -= cy * strength;
	}
}

/// Push overlapping pairs apart until centres are at least `2 * radius` apart.
fn resolve_collisions(slots: &mut [Slot], radius: f32) {
	let min = 2.0 * radius;
	for i in 0..slots.len() {
		for j in (i + 1)..slots.len() {
			let ((ax, ay, a_pinned), (bx, by, b_pinned)) = (slots[i], slots[j]);
			if a_pinned && b_pinned {
				continue;
			}
			let (dx, dy) = (bx - ax, by - ay);
			let d = (dx * dx + dy * dy).sqrt();
			if d >= min {
				continue;
			}
			let push = min - d;
			// coincident pairs separate along x, lower index to the left
			let (ux, uy) = if d < 1e-6 { (1.0, 0.0) } else { (dx / d, dy / d) };
			let (a_share, b_share) = match (a_pinned, b_pinned) {
				(true, _) => (0.0, 1.0),
				(_, true) => (1.0, 0.0),
				_ => (0.5, 0.5),
			};
			slots[i].0 -= ux * push * a_share;
			slots[i].1 -= uy * push * a_share;
			slots[j].0 += ux * push * b_share;
			slots[j].1 += uy * push * b_share;
		}
	}
}
