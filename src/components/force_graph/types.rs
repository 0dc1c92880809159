/// Kind of entity a node stands for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Candidate,
	Project,
	Skill,
	JobRole,
	/// Any label outside the core four, e.g. `Certification`.
	Other(String),
}

impl NodeKind {
	pub fn from_label(label: &str) -> Self {
		match label {
			"Candidate" => NodeKind::Candidate,
			"Project" => NodeKind::Project,
			"Skill" => NodeKind::Skill,
			"JobRole" => NodeKind::JobRole,
			other => NodeKind::Other(other.to_string()),
		}
	}

	pub fn label(&self) -> &str {
		match self {
			NodeKind::Candidate => "Candidate",
			NodeKind::Project => "Project",
			NodeKind::Skill => "Skill",
			NodeKind::JobRole => "Job Role",
			NodeKind::Other(label) => label,
		}
	}

	pub fn color(&self) -> &'static str {
		match self {
			NodeKind::Candidate => "#007bff",
			NodeKind::Project => "#28a745",
			NodeKind::Skill => "#ffc107",
			NodeKind::JobRole => "#dc3545",
			NodeKind::Other(_) => "#6c757d",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub kind: NodeKind,
	/// Property name to display value, in payload order.
	pub properties: Vec<(String, String)>,
}

impl GraphNode {
	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn display_name(&self) -> &str {
		self.property("name")
			.filter(|name| !name.is_empty())
			.unwrap_or("Unnamed")
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
}

/// One complete load of the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphSnapshot {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

/// Position of a node within an indexed snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIx(pub usize);

/// Position of an edge within an indexed snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIx(pub usize);
