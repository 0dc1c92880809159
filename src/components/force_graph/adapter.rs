//! Raw `/graph-explorer/data` payload to [`GraphSnapshot`].

use serde::Deserialize;
use serde_json::{Map, Value};

use super::types::{GraphEdge, GraphNode, GraphSnapshot, NodeKind};
use crate::error::DataShapeError;

#[derive(Deserialize)]
struct RawNode {
	id: String,
	label: String,
	#[serde(default)]
	properties: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawEdge {
	id: String,
	source: String,
	target: String,
	label: String,
}

/// Normalise a payload into a snapshot, keeping input order.
///
/// Edge endpoints are copied as-is; dangling ones are dealt with by the
/// adjacency index.
pub fn adapt(raw: &Value) -> Result<GraphSnapshot, DataShapeError> {
	let nodes = elements(raw, "nodes")?
		.iter()
		.enumerate()
		.map(|(index, value)| {
			RawNode::deserialize(value)
				.map(into_node)
				.map_err(|source| DataShapeError::MalformedElement {
					field: "nodes",
					index,
					source,
				})
		})
		.collect::<Result<Vec<_>, _>>()?;

	let edges = elements(raw, "edges")?
		.iter()
		.enumerate()
		.map(|(index, value)| {
			RawEdge::deserialize(value)
				.map(|e| GraphEdge {
					id: e.id,
					source: e.source,
					target: e.target,
					label: e.label,
				})
				.map_err(|source| DataShapeError::MalformedElement {
					field: "edges",
					index,
					source,
				})
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(GraphSnapshot { nodes, edges })
}

fn elements<'a>(raw: &'a Value, field: &'static str) -> Result<&'a Vec<Value>, DataShapeError> {
	raw.get(field)
		.and_then(Value::as_array)
		.ok_or(DataShapeError::MissingArray(field))
}

fn into_node(raw: RawNode) -> GraphNode {
	GraphNode {
		id: raw.id,
		kind: NodeKind::from_label(&raw.label),
		properties: raw
			.properties
			.into_iter()
			.map(|(key, value)| (key, display_value(&value)))
			.collect(),
	}
}

/// Render a JSON property value the way the detail view shows it.
pub fn display_value(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(_) | Value::Number(_) => value.to_string(),
		Value::Array(items) => items
			.iter()
			.map(display_value)
			.collect::<Vec<_>>()
			.join(", "),
		Value::Object(_) => value.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn adapts_nodes_and_edges_in_order() {
		let raw = json!({
			"nodes": [
				{"id": "a", "label": "Skill", "properties": {"name": "Python"}},
				{"id": "b", "label": "Candidate", "properties": {"name": "Jane", "title": "Engineer"}},
				{"id": "c", "label": "Certification", "properties": {"name": "AWS SA"}}
			],
			"edges": [{"id": "e1", "source": "b", "target": "a", "label": "HAS_SKILL"}]
		});

		let snapshot = adapt(&raw).unwrap();
		let ids: Vec<_> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["a", "b", "c"]);
		assert_eq!(snapshot.nodes[0].kind, NodeKind::Skill);
		assert_eq!(snapshot.nodes[1].display_name(), "Jane");
		assert_eq!(snapshot.nodes[1].property("title"), Some("Engineer"));
		assert_eq!(
			snapshot.nodes[2].kind,
			NodeKind::Other("Certification".into())
		);
		assert_eq!(snapshot.edges[0].source, "b");
		assert_eq!(snapshot.edges[0].label, "HAS_SKILL");
	}

	#[test]
	fn missing_arrays_are_shape_errors() {
		let err = adapt(&json!({"edges": []})).unwrap_err();
		assert!(matches!(err, DataShapeError::MissingArray("nodes")));

		let err = adapt(&json!({"nodes": []})).unwrap_err();
		assert!(matches!(err, DataShapeError::MissingArray("edges")));

		let err = adapt(&json!({"nodes": {}, "edges": []})).unwrap_err();
		assert!(matches!(err, DataShapeError::MissingArray("nodes")));

		let err = adapt(&json!(null)).unwrap_err();
		assert!(matches!(err, DataShapeError::MissingArray("nodes")));
	}

	#[test]
	fn malformed_edge_reports_its_position() {
		let raw = json!({
			"nodes": [],
			"edges": [
				{"id": "e1", "source": "a", "target": "b", "label": "X"},
				{"id": "e2", "source": "a"}
			]
		});
		match adapt(&raw).unwrap_err() {
			DataShapeError::MalformedElement { field, index, .. } => {
				assert_eq!(field, "edges");
				assert_eq!(index, 1);
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn dangling_edges_pass_through() {
		let raw = json!({
			"nodes": [{"id": "a", "label": "Skill", "properties": {}}],
			"edges": [{"id": "e1", "source": "z", "target": "a", "label": "X"}]
		});
		let snapshot = adapt(&raw).unwrap();
		assert_eq!(snapshot.edges.len(), 1);
		assert_eq!(snapshot.nodes[0].display_name(), "Unnamed");
	}

	#[test]
	fn property_values_become_display_text() {
		assert_eq!(display_value(&json!("x")), "x");
		assert_eq!(display_value(&json!(3)), "3");
		assert_eq!(display_value(&json!(true)), "true");
		assert_eq!(display_value(&json!(null)), "");
		assert_eq!(display_value(&json!(["SQL", "Python"])), "SQL, Python");
	}
}
