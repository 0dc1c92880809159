//! Configuration and viewport control on top of an injected physics engine.

use log::debug;

use super::types::NodeIx;
use crate::config::LayoutConfig;

/// The narrow surface the view needs from a force simulation.
pub trait LayoutEngine {
	fn set_repulsion(&mut self, strength: f32);
	fn set_centering(&mut self, strength: f32);
	fn set_link_distance(&mut self, distance: f32);
	fn set_collision_radius(&mut self, radius: Option<f32>);

	/// Advance the simulation; returns the largest distance any node moved.
	fn step(&mut self, dt: f32) -> f32;

	fn visit_positions(&self, f: &mut dyn FnMut(NodeIx, f64, f64));

	/// Place a node and hold it there until released.
	fn pin(&mut self, node: NodeIx, x: f64, y: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutEvent {
	/// Positions came to rest and the view was fitted to them.
	Settled,
}

#[derive(Clone, Debug, Default)]
struct SettleDetector {
	calm_ticks: u32,
	fired: bool,
}

impl SettleDetector {
	/// True exactly once per arming, after `required` consecutive calm ticks.
	fn observe(&mut self, moved: f32, threshold: f32, required: u32) -> bool {
		if self.fired {
			return false;
		}
		if moved < threshold {
			self.calm_ticks += 1;
		} else {
			self.calm_ticks = 0;
		}
		if self.calm_ticks >= required.max(1) {
			self.fired = true;
			return true;
		}
		false
	}

	fn rearm(&mut self) {
		*self = Self::default();
	}
}

pub struct LayoutDriver<E> {
	engine: Option<E>,
	configured: bool,
	config: LayoutConfig,
	settle: SettleDetector,
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
}

impl<E: LayoutEngine> LayoutDriver<E> {
	pub fn new(config: LayoutConfig, width: f64, height: f64) -> Self {
		Self {
			engine: None,
			configured: false,
			config,
			settle: SettleDetector::default(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			width,
			height,
		}
	}

	/// Hand over a fresh engine; it is configured on the next render pass.
	pub fn attach(&mut self, engine: E) {
		self.engine = Some(engine);
		self.configured = false;
		self.settle.rearm();
	}

	pub fn detach(&mut self) -> Option<E> {
		self.configured = false;
		self.engine.take()
	}

	pub fn engine(&self) -> Option<&E> {
		self.engine.as_ref()
	}

	#[cfg(test)]
	pub fn is_configured(&self) -> bool {
		self.configured
	}

	/// Push force parameters into the engine once per instance.
	///
	/// Without an engine this is skipped and retried by the next render pass.
	pub fn configure(&mut self) -> bool {
		let Some(engine) = self.engine.as_mut() else {
			debug!("layout engine not available yet, deferring configuration");
			return false;
		};
		if self.configured {
			return true;
		}
		engine.set_repulsion(self.config.repulsion);
		engine.set_centering(self.config.centering);
		engine.set_link_distance(self.config.link_distance);
		engine.set_collision_radius(self.config.collision_radius);
		self.configured = true;
		debug!("layout engine configured: {:?}", self.config);
		true
	}

	/// One render pass: configure if needed, step, and fit once on settle.
	pub fn tick(&mut self, dt: f32) -> Option<LayoutEvent> {
		if !self.configure() {
			return None;
		}
		// world-space movement as it appears on screen at the current zoom
		let moved = self.engine.as_mut()?.step(dt) * self.transform.k as f32;
		if self
			.settle
			.observe(moved, self.config.settle_threshold, self.config.settle_ticks)
		{
			debug!("layout settled, fitting view");
			self.fit_to_view();
			return Some(LayoutEvent::Settled);
		}
		None
	}

	/// Let the next settle fit the view again, e.g. after a drag.
	pub fn rearm_settle(&mut self) {
		self.settle.rearm();
	}

	pub fn pin(&mut self, node: NodeIx, x: f64, y: f64) {
		if let Some(engine) = self.engine.as_mut() {
			engine.pin(node, x, y);
		}
	}

	pub fn zoom_in(&mut self) {
		let step = self.config.zoom_step;
		self.zoom_at(self.width / 2.0, self.height / 2.0, step);
	}

	pub fn zoom_out(&mut self) {
		let step = self.config.zoom_step;
		self.zoom_at(self.width / 2.0, self.height / 2.0, 1.0 / step);
	}

	/// Scale by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(self.config.min_zoom, self.config.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Centre and scale so every node is visible; false when there is nothing to fit.
	pub fn fit_to_view(&mut self) -> bool {
		let Some(engine) = self.engine.as_ref() else {
			return false;
		};
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		engine.visit_positions(&mut |_, x, y| {
			bounds = Some(match bounds {
				None => (x, y, x, y),
				Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
			});
		});
		let Some((x0, y0, x1, y1)) = bounds else {
			return false;
		};

		let pad = self.config.fit_padding;
		let (avail_w, avail_h) = (
			(self.width - 2.0 * pad).max(1.0),
			(self.height - 2.0 * pad).max(1.0),
		);
		let (graph_w, graph_h) = (x1 - x0, y1 - y0);
		let raw_k: f64 = if graph_w <= f64::EPSILON && graph_h <= f64::EPSILON {
			1.0
		} else {
			(avail_w / graph_w.max(f64::EPSILON)).min(avail_h / graph_h.max(f64::EPSILON))
		};
		let max_k = self.config.max_fit_zoom.min(self.config.max_zoom);
		let k = raw_k.clamp(self.config.min_zoom.min(max_k), max_k);

		let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
		true
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	#[cfg(test)]
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// New viewport size; the view centre stays at the same graph point.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
