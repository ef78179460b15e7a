//! Force-directed layout core.
//!
//! Independent of the browser: nodes repel each other, links act as springs,
//! and a centering force keeps the layout on the canvas. A decaying alpha
//! scales every step so the layout settles and then goes dormant.
//!
//! - [`force`]: pure force computations
//! - [`integrator`]: velocity/position updates and alpha cooling
//! - [`controller`]: the [`Simulation`] owning all state and the tick loop
//! - [`drag`]: the pin/unpin state machine for user drags
//!
//! # Example
//!
//! ```
//! use force_layout::simulation::{Canvas, Simulation, Status};
//! use force_layout::GraphData;
//!
//! let mut sim = Simulation::from_graph(&GraphData::sample(), Canvas::new(800, 600)).unwrap();
//! sim.on_tick(|frame| {
//!     for (from, to) in frame.link_segments() {
//!         let _ = (from, to);
//!     }
//! });
//! sim.run(1000);
//! assert_eq!(sim.status(), Status::Dormant);
//! ```

pub mod controller;
pub mod drag;
pub mod error;
pub mod force;
pub mod integrator;
pub mod model;

pub use controller::{Frame, Simulation, Status};
pub use drag::{DragController, DragState};
pub use error::{ConfigurationError, DragError, Result, UnresolvedLink};
pub use force::{CenterForce, Force, ForceSet, LinkForce, ManyBodyForce};
pub use integrator::{Alpha, Integrator};
pub use model::{Canvas, Link, Node, Vec2};
