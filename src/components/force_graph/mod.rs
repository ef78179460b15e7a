//! Force-directed graph visualization component.
//!
//! Draws a running [`Simulation`](crate::simulation::Simulation) on an HTML
//! canvas:
//! - Layout driven from `requestAnimationFrame`, redrawn on every tick
//! - Node dragging through the pin/unpin state machine
//! - Group-colored nodes with labels
//!
//! # Example
//!
//! ```ignore
//! use force_layout::{ForceGraphCanvas, GraphData, GraphLink, GraphNode};
//!
//! let data = GraphData {
//!     nodes: vec![GraphNode::new("a", 1), GraphNode::new("b", 2)],
//!     links: vec![GraphLink::new("a", "b")],
//!     layout: Default::default(),
//! };
//!
//! view! { <ForceGraphCanvas data=data fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
