//! Per-snapshot neighbor and incident-edge lookup.

use std::collections::HashMap;

use log::{info, warn};

use super::types::{EdgeIx, GraphEdge, GraphNode, GraphSnapshot, NodeIx};

/// A snapshot together with its adjacency lists. Built once per load.
#[derive(Clone, Debug, Default)]
pub struct IndexedGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	neighbors: Vec<Vec<NodeIx>>,
	incident: Vec<Vec<EdgeIx>>,
	endpoints: Vec<Option<(NodeIx, NodeIx)>>,
	orphaned_edges: usize,
}

impl IndexedGraph {
	/// Index a snapshot in O(N + E).
	///
	/// Edges with an unknown endpoint are kept in the snapshot but excluded
	/// from every list and counted once in [`orphaned_edges`](Self::orphaned_edges).
	pub fn build(snapshot: GraphSnapshot) -> Self {
		let GraphSnapshot {
			nodes: raw_nodes,
			edges,
		} = snapshot;

		let mut ids = HashMap::with_capacity(raw_nodes.len());
		let mut nodes = Vec::with_capacity(raw_nodes.len());
		for node in raw_nodes {
			if ids.contains_key(&node.id) {
				warn!("dropping duplicate node id {:?}", node.id);
				continue;
			}
			ids.insert(node.id.clone(), NodeIx(nodes.len()));
			nodes.push(node);
		}

		let mut neighbors = vec![Vec::new(); nodes.len()];
		let mut incident = vec![Vec::new(); nodes.len()];
		let mut endpoints = Vec::with_capacity(edges.len());
		let mut orphaned_edges = 0;

		for (i, edge) in edges.iter().enumerate() {
			let (Some(&src), Some(&tgt)) = (ids.get(&edge.source), ids.get(&edge.target)) else {
				warn!(
					"orphaned edge {:?}: {:?} -> {:?} references a missing node",
					edge.id, edge.source, edge.target
				);
				orphaned_edges += 1;
				endpoints.push(None);
				continue;
			};
			let ix = EdgeIx(i);
			endpoints.push(Some((src, tgt)));
			incident[src.0].push(ix);
			if src != tgt {
				incident[tgt.0].push(ix);
				neighbors[src.0].push(tgt);
				neighbors[tgt.0].push(src);
			}
		}

		info!(
			"indexed graph: {} nodes, {} edges, {} orphaned",
			nodes.len(),
			edges.len() - orphaned_edges,
			orphaned_edges
		);

		Self {
			nodes,
			edges,
			neighbors,
			incident,
			endpoints,
			orphaned_edges,
		}
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	#[cfg(test)]
	pub fn node(&self, ix: NodeIx) -> &GraphNode {
		&self.nodes[ix.0]
	}

	pub fn get_node(&self, ix: NodeIx) -> Option<&GraphNode> {
		self.nodes.get(ix.0)
	}

	pub fn edge(&self, ix: EdgeIx) -> &GraphEdge {
		&self.edges[ix.0]
	}

	#[cfg(test)]
	pub fn node_ix(&self, id: &str) -> Option<NodeIx> {
		self.nodes().find(|(_, n)| n.id == id).map(|(ix, _)| ix)
	}

	pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &GraphNode)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIx(i), n))
	}

	/// Edges whose endpoints both resolved, with those endpoints.
	pub fn linked_edges(&self) -> impl Iterator<Item = (EdgeIx, NodeIx, NodeIx)> + '_ {
		self.endpoints
			.iter()
			.enumerate()
			.filter_map(|(i, ends)| ends.map(|(s, t)| (EdgeIx(i), s, t)))
	}

	pub fn neighbors(&self, ix: NodeIx) -> &[NodeIx] {
		&self.neighbors[ix.0]
	}

	pub fn incident(&self, ix: NodeIx) -> &[EdgeIx] {
		&self.incident[ix.0]
	}

	#[cfg(test)]
	pub fn endpoints(&self, ix: EdgeIx) -> Option<(NodeIx, NodeIx)> {
		self.endpoints.get(ix.0).copied().flatten()
	}

	/// Edges skipped because an endpoint was missing.
	pub fn orphaned_edges(&self) -> usize {
		self.orphaned_edges
	}
}
