use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::adjacency::IndexedGraph;
use super::detail::{NodeDetail, NodeDetailOverlay};
use super::layout::LayoutEvent;
use super::render;
use super::state::ForceGraphState;
use super::types::{NodeIx, NodeKind};
use crate::config::LayoutConfig;

const FRAME_DT: f32 = 0.016;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed canvas view of one graph snapshot.
///
/// A new snapshot replaces the layout engine and resets hover and selection.
/// `None` renders an empty canvas.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] graph: Signal<Option<Arc<IndexedGraph>>>,
	#[prop(optional)] layout: LayoutConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(ForceGraphState::new(
		layout,
		width.unwrap_or(800.0),
		height.unwrap_or(600.0),
	)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let selected = RwSignal::new(None::<NodeIx>);
	let hovering = RwSignal::new(false);
	{
		let mut s = state.borrow_mut();
		s.selection.subscribe(move |sel| selected.set(sel.selected().copied()));
		s.highlight.subscribe(move |h| hovering.set(!h.is_idle()));
	}
	let detail = Signal::derive(move || {
		let ix = selected.get()?;
		graph.with(|g| g.as_deref()?.get_node(ix).map(NodeDetail::from_node))
	});

	on_cleanup({
		let alive = alive.clone();
		move || alive.store(false, Ordering::Relaxed)
	});

	let state_load = state.clone();
	Effect::new(move |_| {
		let snapshot = graph.get();
		state_load.borrow_mut().load(snapshot);
	});

	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window, graph canvas not started");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| parent.as_ref().map_or(800.0, |p| p.client_width() as f64)),
				height.unwrap_or_else(|| parent.as_ref().map_or(600.0, |p| p.client_height() as f64)),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().resize(w, h);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("canvas has no 2d context");
				return;
			}
		};

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				state_resize.borrow_mut().resize(nw, nh);
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive.clone());
		let resize_inner = resize_cb_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				if let (Some(win), Some(cb)) = (web_sys::window(), resize_inner.borrow_mut().take()) {
					let _ = win
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				debug!("graph canvas unmounted, stopping animation");
				return;
			}
			{
				let mut s = state_anim.borrow_mut();
				if s.tick(FRAME_DT) == Some(LayoutEvent::Settled) {
					debug!("graph layout settled");
				}
				render::render(&s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			state_md.borrow_mut().press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			state_mm.borrow_mut().pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| state_mu.borrow_mut().release();

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| state_ml.borrow_mut().pointer_leave();

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			state_wh.borrow_mut().layout.zoom_at(x, y, factor);
		}
	};

	let (state_zi, state_zo, state_fit, state_close) =
		(state.clone(), state.clone(), state.clone(), state.clone());

	let legend = [
		NodeKind::Candidate,
		NodeKind::JobRole,
		NodeKind::Project,
		NodeKind::Skill,
	]
	.into_iter()
	.map(|kind| {
		view! {
			<li>
				<span class="legend-swatch" style:background-color=kind.color()></span>
				{kind.label().to_string()}
			</li>
		}
	})
	.collect_view();

	view! {
		<div class="force-graph" class:fullscreen=fullscreen>
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style:display="block"
				style:cursor=move || if hovering.get() { "pointer" } else { "grab" }
			/>
			<div class="graph-controls">
				<button title="Zoom in" on:click=move |_| state_zi.borrow_mut().layout.zoom_in()>
					"+"
				</button>
				<button title="Zoom out" on:click=move |_| state_zo.borrow_mut().layout.zoom_out()>
					"−"
				</button>
				<button
					title="Fit to view"
					on:click=move |_| {
						state_fit.borrow_mut().layout.fit_to_view();
					}
				>
					"Fit"
				</button>
			</div>
			<ul class="graph-legend">{legend}</ul>
			<p class="graph-stats">
				{move || {
					graph
						.with(|g| {
							g.as_deref()
								.map(|g| match g.orphaned_edges() {
									0 => format!("{} nodes", g.node_count()),
									n => format!("{} nodes, {} dangling edges skipped", g.node_count(), n),
								})
						})
				}}
			</p>
			<NodeDetailOverlay
				detail=detail
				on_close=move || {
					state_close.borrow_mut().selection.clear();
				}
			/>
		</div>
	}
}
