use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};

use super::{InFlight, api_client, app_config};
use crate::api::ApiClient;
use crate::components::force_graph::{ForceGraphCanvas, IndexedGraph, adapt};
use crate::error::GraphLoadError;

#[derive(Clone, Debug, Default)]
enum GraphLoad {
	#[default]
	Loading,
	Failed(String),
	Ready(Arc<IndexedGraph>),
}

async fn fetch_graph(
	client: &ApiClient,
	signal: &web_sys::AbortSignal,
) -> Result<IndexedGraph, GraphLoadError> {
	let raw = client.graph_data(signal).await?;
	let snapshot = adapt(&raw)?;
	Ok(IndexedGraph::build(snapshot))
}

/// Whole knowledge graph on a force-directed canvas.
#[component]
pub fn GraphExplorer() -> impl IntoView {
	let layout = app_config().layout;
	let client = api_client();
	let in_flight = InFlight::new();
	let load_state = RwSignal::new(GraphLoad::Loading);

	let load = move || {
		let (ticket, signal) = match in_flight.begin() {
			Ok(started) => started,
			Err(err) => {
				load_state.set(GraphLoad::Failed(err.user_message()));
				return;
			}
		};
		load_state.set(GraphLoad::Loading);
		let client = client.clone();
		spawn_local(async move {
			let result = fetch_graph(&client, &signal).await;
			if !ticket.is_current() {
				debug!("discarding stale graph response #{}", ticket.generation());
				return;
			}
			match result {
				Ok(graph) => {
					info!("graph loaded: {} nodes", graph.node_count());
					load_state.set(GraphLoad::Ready(Arc::new(graph)));
				}
				Err(err) if err.is_aborted() => debug!("graph load cancelled"),
				Err(err) => {
					error!("graph load failed: {err}");
					load_state.set(GraphLoad::Failed(err.to_string()));
				}
			}
		});
	};
	load();

	let graph = Signal::derive(move || {
		load_state.with(|s| match s {
			GraphLoad::Ready(graph) => Some(graph.clone()),
			_ => None,
		})
	});
	let failure = move || {
		load_state.with(|s| match s {
			GraphLoad::Failed(reason) => Some(reason.clone()),
			_ => None,
		})
	};

	view! {
		<div class="page-container graph-explorer-page">
			<h1>"Knowledge Graph Explorer"</h1>
			<p class="subtitle">
				"Hover a node to highlight its connections, click it for details. Drag to reposition, scroll to zoom."
			</p>
			<p
				class="status"
				style:display=move || {
					if load_state.with(|s| matches!(s, GraphLoad::Loading)) { "block" } else { "none" }
				}
			>
				"Loading graph data..."
			</p>
			<div
				class="status-message error"
				style:display=move || if failure().is_some() { "block" } else { "none" }
			>
				<p>"Failed to load graph data."</p>
				<p class="reason">{failure}</p>
				<button on:click=move |_| load()>"Retry"</button>
			</div>
			<div
				class="graph-explorer-canvas"
				style:visibility=move || if graph.with(Option::is_some) { "visible" } else { "hidden" }
			>
				<ForceGraphCanvas graph=graph layout=layout height=Some(640.0) />
			</div>
		</div>
	}
}
