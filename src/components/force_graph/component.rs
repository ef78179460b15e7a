//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element, starts a [`Simulation`] for
//! the supplied data and drives it from `requestAnimationFrame`. The renderer
//! is registered as the simulation's tick callback, so the canvas is redrawn
//! only while the layout moves. Mouse events are routed through a
//! [`DragController`]; nothing here writes node state directly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::theme::Theme;
use crate::simulation::{Canvas, DragController, Simulation};
use crate::types::GraphData;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Bundles the running simulation with its drag state and hit radius.
struct GraphContext {
	sim: Simulation,
	drag: DragController,
	hit_radius: f64,
}

impl GraphContext {
	fn press(&mut self, x: f64, y: f64) {
		let Some(id) = self.sim.find(x, y, self.hit_radius).map(|n| n.id.clone()) else {
			return;
		};
		if let Err(e) = self.drag.start(&mut self.sim, &id, x, y) {
			warn!("force-layout: {e}");
		}
	}

	fn move_to(&mut self, x: f64, y: f64) {
		if self.drag.is_dragging() {
			if let Err(e) = self.drag.drag_to(&mut self.sim, x, y) {
				warn!("force-layout: {e}");
			}
		}
	}

	fn release(&mut self) {
		if self.drag.is_dragging() {
			if let Err(e) = self.drag.end(&mut self.sim) {
				warn!("force-layout: {e}");
			}
		}
	}
}

fn canvas_size(size: (f64, f64)) -> Canvas {
	Canvas::new(size.0.max(1.0) as u32, size.1.max(1.0) as u32)
}

/// The new canvas when `next` differs from `previous` in whole pixels.
///
/// Resizing a canvas element clears it, and the simulation only redraws when
/// it ticks, so same-size resize events must leave the element alone.
fn resized(previous: (f64, f64), next: (f64, f64)) -> Option<Canvas> {
	let next = canvas_size(next);
	(next != canvas_size(previous)).then_some(next)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// viewport and resize automatically with the window. Explicit `width`/`height`
/// override automatic sizing.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or(FALLBACK_SIZE)
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.filter(|w| *w > 0.0)
						.unwrap_or(FALLBACK_SIZE.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.filter(|h| *h > 0.0)
						.unwrap_or(FALLBACK_SIZE.1)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("force-layout: canvas has no 2d context");
			return;
		};

		let graph = data.get();
		let mut sim = match Simulation::from_graph(&graph, canvas_size((w, h))) {
			Ok(sim) => sim,
			Err(e) => {
				error!("force-layout: cannot start simulation: {e}");
				return;
			}
		};

		let theme = Theme::default();
		let hit_radius = theme.node.hit_radius;
		let size = Rc::new(Cell::new((w, h)));
		let size_draw = size.clone();
		sim.on_tick(move |frame| {
			let (w, h) = size_draw.get();
			render::render(frame, &ctx, &theme, w, h);
		});

		*context_init.borrow_mut() = Some(GraphContext {
			sim,
			drag: DragController::from_config(&graph.layout),
			hit_radius,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(next) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				let Some(canvas) = resized(size.get(), next) else {
					return;
				};
				canvas_resize.set_width(canvas.width);
				canvas_resize.set_height(canvas.height);
				size.set((canvas.width as f64, canvas.height as f64));
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.sim.resize(canvas);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.sim.tick();
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.press(x, y);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.move_to(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.release();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.release();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: pointer;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_pixel_size_is_not_a_resize() {
		assert_eq!(resized((800.0, 600.0), (800.0, 600.0)), None);
		assert_eq!(resized((800.0, 600.0), (800.4, 600.9)), None);
	}

	#[test]
	fn changed_size_yields_new_canvas() {
		assert_eq!(resized((800.0, 600.0), (1024.0, 600.0)), Some(Canvas::new(1024, 600)));
		assert_eq!(resized((800.0, 600.0), (0.0, 0.0)), Some(Canvas::new(1, 1)));
	}

	#[test]
	fn resize_after_settling_redraws() {
		let mut sim = Simulation::from_graph(&GraphData::sample(), Canvas::new(800, 600)).unwrap();
		sim.run(1000);
		let frames = Rc::new(Cell::new(0u32));
		let seen = frames.clone();
		sim.on_tick(move |_| seen.set(seen.get() + 1));

		let canvas = resized((800.0, 600.0), (640.0, 480.0)).unwrap();
		sim.resize(canvas);
		sim.tick();
		assert_eq!(frames.get(), 1);
	}
}
