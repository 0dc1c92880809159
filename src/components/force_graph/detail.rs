use leptos::prelude::*;

use super::types::GraphNode;
use crate::selection::humanize_key;

/// What the overlay shows for the selected node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetail {
	pub title: String,
	pub kind: String,
	pub color: &'static str,
	/// Humanized property name and display value, `name` first.
	pub rows: Vec<(String, String)>,
}

impl NodeDetail {
	pub fn from_node(node: &GraphNode) -> Self {
		let mut props: Vec<&(String, String)> = node.properties.iter().collect();
		props.sort_by_key(|(key, _)| key != "name");
		Self {
			title: node.display_name().to_string(),
			kind: node.kind.label().to_string(),
			color: node.kind.color(),
			rows: props
				.into_iter()
				.map(|(key, value)| (humanize_key(key), value.clone()))
				.collect(),
		}
	}
}

/// Dismissible property panel; owner and close action are passed in explicitly.
#[component]
pub fn NodeDetailOverlay<F>(detail: Signal<Option<NodeDetail>>, on_close: F) -> impl IntoView
where
	F: Fn() + Clone + 'static,
{
	view! {
		<div
			class="node-detail-overlay"
			style:display=move || if detail.with(Option::is_some) { "block" } else { "none" }
		>
			<button
				class="node-detail-close"
				aria-label="Close"
				on:click=move |_| on_close()
			>
				"×"
			</button>
			{move || {
				detail
					.get()
					.map(|d| {
						view! {
							<h2 style:border-left=format!("6px solid {}", d.color)>{d.title}</h2>
							<p class="node-detail-kind">{d.kind}</p>
							<dl>
								{d
									.rows
									.into_iter()
									.map(|(label, value)| {
										view! {
											<dt>{label}</dt>
											<dd>{value}</dd>
										}
									})
									.collect_view()}
							</dl>
						}
					})
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::NodeKind;

	#[test]
	fn every_property_is_listed_with_name_first() {
		let node = GraphNode {
			id: "4:x:1".into(),
			kind: NodeKind::Other("Certification".into()),
			properties: vec![
				("issuingOrg".into(), "Amazon Web Services".into()),
				("name".into(), "AWS Solutions Architect".into()),
				("verifyURL".into(), "https://www.credly.com/badges/abc".into()),
			],
		};
		let detail = NodeDetail::from_node(&node);

		assert_eq!(detail.title, "AWS Solutions Architect");
		assert_eq!(detail.kind, "Certification");
		assert_eq!(
			detail.rows,
			vec![
				("Name".to_string(), "AWS Solutions Architect".to_string()),
				("Issuing Org".to_string(), "Amazon Web Services".to_string()),
				(
					"Verify URL".to_string(),
					"https://www.credly.com/badges/abc".to_string()
				),
			]
		);
	}
}
