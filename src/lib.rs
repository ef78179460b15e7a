//! force-layout: force-directed graph layout with an interactive canvas view.
//!
//! The [`simulation`] module is a browser-independent layout engine: link
//! springs, many-body repulsion and centering, integrated under a cooling
//! alpha until the layout settles. The [`components`] module draws a running
//! simulation on a canvas and lets the user drag nodes around.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod simulation;
pub mod types;

pub use components::force_graph::ForceGraphCanvas;
pub use types::{GraphData, GraphLink, GraphNode, LayoutConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("force-layout: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...], layout?: {...} }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"force-layout: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("force-layout: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads graph data from the DOM, falling back to the built-in sample graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(GraphData::sample);
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Force-Directed Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_signal fullscreen=true />
			<div class="graph-overlay">
				<h1>"Force-Directed Graph"</h1>
				<p class="subtitle">"Drag nodes to reposition."</p>
			</div>
		</div>
	}
}
