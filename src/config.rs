//! Application configuration, handed down the component tree via context.

use log::Level;
use serde::Deserialize;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Top-level settings for the explorer client.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
	/// Base URL of the matching backend, without a trailing slash.
	pub api_base_url: String,
	/// Inactivity window before a skill autocomplete lookup fires.
	pub autocomplete_debounce_ms: u32,
	/// Shortest query that triggers an autocomplete lookup.
	pub autocomplete_min_chars: usize,
	/// Force layout and viewport tuning.
	pub layout: LayoutConfig,
	/// Console log level name (`error`, `warn`, `info`, `debug`, `trace`).
	pub log_level: String,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.into(),
			autocomplete_debounce_ms: 300,
			autocomplete_min_chars: 2,
			layout: LayoutConfig::default(),
			log_level: "debug".into(),
		}
	}
}

impl AppConfig {
	/// Defaults, with the API URL taken from `SYNAPSE_API_URL` at build time when set.
	pub fn from_build_env() -> Self {
		let mut config = Self::default();
		if let Some(url) = option_env!("SYNAPSE_API_URL") {
			config.api_base_url = url.into();
		}
		config.normalized()
	}

	/// Parse a JSON document; missing fields fall back to defaults.
	pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(source).map(Self::normalized)
	}

	/// The configured log level, `Debug` when unrecognised.
	pub fn level(&self) -> Level {
		self.log_level.parse().unwrap_or(Level::Debug)
	}

	fn normalized(mut self) -> Self {
		while self.api_base_url.ends_with('/') {
			self.api_base_url.pop();
		}
		self
	}
}

/// Parameters the layout driver pushes into the physics engine, plus viewport limits.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Node-node repulsion (charge) strength.
	pub repulsion: f32,
	/// Pull of the whole graph towards the origin, 0 disables it.
	pub centering: f32,
	/// Preferred length of a link.
	pub link_distance: f32,
	/// Minimum centre distance between two nodes is twice this radius.
	pub collision_radius: Option<f32>,
	/// Largest per-tick node movement, in screen pixels, still considered "at rest".
	pub settle_threshold: f32,
	/// Consecutive calm ticks before the engine counts as settled.
	pub settle_ticks: u32,
	/// Multiplicative factor applied by one zoom in/out step.
	pub zoom_step: f64,
	/// Smallest allowed zoom factor.
	pub min_zoom: f64,
	/// Largest allowed zoom factor.
	pub max_zoom: f64,
	/// Largest zoom factor fit-to-view will pick, so small graphs are not blown up.
	pub max_fit_zoom: f64,
	/// Screen-space margin kept around the graph by fit-to-view.
	pub fit_padding: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			repulsion: 150.0,
			centering: 0.05,
			link_distance: 60.0,
			collision_radius: Some(9.0),
			settle_threshold: 0.3,
			settle_ticks: 30,
			zoom_step: 1.2,
			min_zoom: 0.1,
			max_zoom: 10.0,
			max_fit_zoom: 2.0,
			fit_padding: 40.0,
		}
	}
}
