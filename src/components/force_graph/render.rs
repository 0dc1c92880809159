use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::adjacency::IndexedGraph;
use super::highlight::Emphasis;
use super::layout::LayoutEngine;
use super::state::{ForceGraphState, NODE_RADIUS};
use super::types::NodeIx;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (width, height) = (state.layout.width, state.layout.height);
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, width, height);

	let (Some(graph), Some(engine)) = (state.graph.as_deref(), state.layout.engine()) else {
		return;
	};
	let mut positions = HashMap::with_capacity(graph.node_count());
	engine.visit_positions(&mut |ix, x, y| {
		positions.insert(ix, (x, y));
	});

	let transform = &state.layout.transform;
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	draw_edges(state, graph, &positions, ctx);
	draw_nodes(state, graph, &positions, ctx);
	ctx.restore();
}

fn draw_edges(
	state: &ForceGraphState,
	graph: &IndexedGraph,
	positions: &HashMap<NodeIx, (f64, f64)>,
	ctx: &CanvasRenderingContext2d,
) {
	let k = state.layout.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.highlight_t);
	let highlight = state.highlight.state();

	for (edge_ix, src, tgt) in graph.linked_edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&src), positions.get(&tgt)) else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		// t=0: all edges at base (0.6), t=1: highlighted at 0.9, others at 0.15
		let emphasis = highlight.edge_emphasis(edge_ix);
		let (edge_alpha, arrow_alpha, width) = match emphasis {
			Emphasis::Normal => (0.6, 0.8, line_width),
			Emphasis::Highlighted | Emphasis::Focused => {
				(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
			}
			Emphasis::Dimmed => (0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t)),
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", arrow_alpha));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if emphasis == Emphasis::Highlighted {
			ctx.set_fill_style_str(&format!("rgba(200, 220, 255, {})", 0.9 * t));
			ctx.set_font(&format!("{}px sans-serif", 8.0 / k.max(0.5)));
			let _ = ctx.fill_text(&graph.edge(edge_ix).label, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &ForceGraphState,
	graph: &IndexedGraph,
	positions: &HashMap<NodeIx, (f64, f64)>,
	ctx: &CanvasRenderingContext2d,
) {
	let (t, k) = (ease_out_cubic(state.highlight_t), state.layout.transform.k);
	let highlight = state.highlight.state();
	let selected = state.selection.selected().copied();

	// dimmed nodes first so the focused neighborhood paints on top
	let (back, front): (Vec<_>, Vec<_>) = graph
		.nodes()
		.partition(|(ix, _)| highlight.node_emphasis(*ix) == Emphasis::Dimmed);

	for (ix, node) in back.into_iter().chain(front) {
		let Some(&(x, y)) = positions.get(&ix) else {
			continue;
		};
		let color = node.kind.color();
		let label = node.display_name();

		let (alpha, radius, glow_radius) = match highlight.node_emphasis(ix) {
			Emphasis::Normal => (1.0, NODE_RADIUS, 0.0),
			Emphasis::Dimmed => (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t), 0.0),
			Emphasis::Highlighted => (
				1.0,
				NODE_RADIUS * (1.0 + 0.2 * t),
				NODE_RADIUS * (1.4 + 0.6 * t),
			),
			Emphasis::Focused => (
				1.0,
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			),
		};
		let is_focused = highlight.hovered() == Some(ix);

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let glow = if is_focused { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", glow));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", glow * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if is_focused && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if selected == Some(ix) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 4.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 215, 0, 0.9)");
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.85));
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
	}
}
