//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod autocomplete;
mod components;
pub mod config;
mod debounce;
mod error;
mod matching;
mod pages;
mod request;
mod selection;
mod store;

use crate::components::navbar::Navbar;
use crate::config::AppConfig;
// Top-Level pages
use crate::pages::add_candidate::AddCandidate;
use crate::pages::graph_explorer::GraphExplorer;
use crate::pages::home::Home;
use crate::pages::live_ingest::LiveIngest;
use crate::pages::matcher::Matcher;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {level}");
}

/// The app shell: navbar plus one route per page, with `config` in context.
#[component]
pub fn App(
	/// Settings for the whole app; built-in defaults when absent.
	#[prop(optional)]
	config: Option<AppConfig>,
) -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	let config = config.unwrap_or_else(AppConfig::from_build_env);
	info!("backend at {}", config.api_base_url);
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Synapse Talent Explorer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Navbar />
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/graph-explorer") view=GraphExplorer />
				<Route path=path!("/matcher") view=Matcher />
				<Route path=path!("/add-candidate") view=AddCandidate />
				<Route path=path!("/live-ingest") view=LiveIngest />
			</Routes>
		</Router>
	}
}
