use leptos::prelude::*;
use synapse_explorer::config::AppConfig;
use synapse_explorer::{App, init_logging};

fn main() {
	let config = AppConfig::from_build_env();
	init_logging(config.level());
	mount_to_body(move || view! { <App config=config.clone() /> });
}
