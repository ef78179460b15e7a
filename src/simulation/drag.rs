//! Drag interaction state machine.
//!
//! Translates press / move / release gestures on one node into pin and unpin
//! operations on the [`Simulation`]. Transitions run between ticks, so the
//! next tick always sees the latest pinned position.
//!
//! ```text
//!            start(id, x, y)             drag_to(x, y)
//!   Idle ─────────────────────▶ Dragging ◀──────────┐
//!    ▲                              │ └──────────────┘
//!    └───────────── end() ──────────┘
//! ```

use log::debug;

use super::controller::Simulation;
use super::error::DragError;
use super::model::Vec2;
use crate::types::LayoutConfig;

/// Current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
	/// No node held.
	#[default]
	Idle,
	/// A node is pinned under the pointer.
	Dragging {
		/// Index of the held node.
		node: usize,
		/// Node position minus pointer position at press time, so the node
		/// does not jump to the cursor.
		offset: Vec2,
	},
}

/// Routes drag gestures to a simulation.
#[derive(Clone, Debug)]
pub struct DragController {
	state: DragState,
	/// Alpha the layout is held at while dragging.
	pub drag_alpha: f64,
	/// Keep the dragged node inside the canvas.
	pub clamp_to_canvas: bool,
}

impl Default for DragController {
	fn default() -> Self {
		Self::new(LayoutConfig::default().drag_alpha)
	}
}

impl DragController {
	/// Idle controller holding alpha at `drag_alpha` during drags.
	pub fn new(drag_alpha: f64) -> Self {
		Self {
			state: DragState::Idle,
			drag_alpha,
			clamp_to_canvas: true,
		}
	}

	/// Drag alpha taken from the layout block.
	pub fn from_config(config: &LayoutConfig) -> Self {
		Self::new(config.drag_alpha)
	}

	/// Current gesture.
	pub fn state(&self) -> DragState {
		self.state
	}

	/// True between `start` and `end`.
	pub fn is_dragging(&self) -> bool {
		matches!(self.state, DragState::Dragging { .. })
	}

	/// Idle → Dragging. Pins `id` where it currently is and reheats the layout
	/// so the rest of the graph reacts.
	pub fn start(
		&mut self,
		sim: &mut Simulation,
		id: &str,
		x: f64,
		y: f64,
	) -> Result<(), DragError> {
		if let DragState::Dragging { node, .. } = self.state {
			return Err(DragError::AlreadyDragging {
				active: sim.node_at(node).id.clone(),
			});
		}
		let index = sim
			.index_of(id)
			.ok_or_else(|| DragError::UnknownNode(id.to_string()))?;

		let position = sim.node_at(index).position();
		sim.pin(index, position);
		sim.begin_interaction(self.drag_alpha);
		self.state = DragState::Dragging {
			node: index,
			offset: position - Vec2::new(x, y),
		};
		debug!("drag start: {id} at ({:.1}, {:.1})", position.x, position.y);
		Ok(())
	}

	/// Dragging → Dragging. Moves the pin to follow the pointer.
	pub fn drag_to(&mut self, sim: &mut Simulation, x: f64, y: f64) -> Result<(), DragError> {
		let DragState::Dragging { node, offset } = self.state else {
			return Err(DragError::NotDragging);
		};
		let mut target = Vec2::new(x, y) + offset;
		if self.clamp_to_canvas {
			target = sim.canvas().clamp(target);
		}
		sim.pin(node, target);
		Ok(())
	}

	/// Dragging → Idle. Releases the node; alpha is left to cool on its own.
	pub fn end(&mut self, sim: &mut Simulation) -> Result<(), DragError> {
		let DragState::Dragging { node, .. } = self.state else {
			return Err(DragError::NotDragging);
		};
		sim.unpin(node);
		sim.end_interaction();
		self.state = DragState::Idle;
		debug!("drag end: {}", sim.node_at(node).id);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::simulation::controller::Status;
	use crate::simulation::force::ForceSet;
	use crate::simulation::model::Canvas;
	use crate::types::{GraphData, GraphLink, GraphNode};

	fn settled() -> Simulation {
		let mut sim = Simulation::from_graph(&GraphData::sample(), Canvas::new(800, 600)).unwrap();
		sim.run(1000);
		sim
	}

	#[test]
	fn start_pins_in_place_and_reheats() {
		let mut sim = settled();
		assert_eq!(sim.status(), Status::Dormant);
		let before = sim.node("Node 3").unwrap().position();

		let mut drag = DragController::default();
		drag.start(&mut sim, "Node 3", before.x + 2.0, before.y - 3.0)
			.unwrap();

		let node = sim.node("Node 3").unwrap();
		assert_eq!((node.fx, node.fy), (Some(before.x), Some(before.y)));
		assert_eq!(sim.status(), Status::Active);
		assert!(sim.alpha() >= 0.3);
		assert!(sim.is_dragging());
		let DragState::Dragging { node, offset } = drag.state() else {
			panic!("expected a drag in progress");
		};
		assert_eq!(node, 2);
		assert!(offset.distance(Vec2::new(-2.0, 3.0)) < 1e-9);
	}

	#[test]
	fn move_keeps_grab_offset() {
		let mut sim = settled();
		let p = sim.node("Node 1").unwrap().position();
		let mut drag = DragController::default();
		drag.start(&mut sim, "Node 1", p.x - 4.0, p.y).unwrap();
		drag.drag_to(&mut sim, 200.0, 150.0).unwrap();
		sim.tick();

		let p = sim.node("Node 1").unwrap().position();
		assert!(p.distance(Vec2::new(204.0, 150.0)) < 1e-9);
	}

	#[test]
	fn move_is_clamped_to_canvas() {
		let mut sim = settled();
		let p = sim.node("Node 2").unwrap().position();
		let mut drag = DragController::default();
		drag.start(&mut sim, "Node 2", p.x, p.y).unwrap();
		drag.drag_to(&mut sim, -50.0, 9000.0).unwrap();

		let node = sim.node("Node 2").unwrap();
		assert_eq!((node.fx, node.fy), (Some(0.0), Some(600.0)));

		drag.clamp_to_canvas = false;
		drag.drag_to(&mut sim, -50.0, 9000.0).unwrap();
		let node = sim.node("Node 2").unwrap();
		assert_eq!((node.fx, node.fy), (Some(-50.0), Some(9000.0)));
	}

	#[test]
	fn end_unpins_without_lowering_alpha() {
		let mut sim = settled();
		let p = sim.node("Node 4").unwrap().position();
		let mut drag = DragController::default();
		drag.start(&mut sim, "Node 4", p.x, p.y).unwrap();
		sim.tick();
		let alpha = sim.alpha();

		drag.end(&mut sim).unwrap();

		assert_eq!(drag.state(), DragState::Idle);
		assert!(!sim.node("Node 4").unwrap().is_pinned());
		assert!(!sim.is_dragging());
		assert_eq!(sim.alpha(), alpha);
		assert_eq!(sim.status(), Status::Active);
	}

	#[test]
	fn held_node_keeps_simulation_alive() {
		let mut sim = settled();
		let p = sim.node("Node 5").unwrap().position();
		let mut drag = DragController::default();
		drag.start(&mut sim, "Node 5", p.x, p.y).unwrap();

		for _ in 0..1500 {
			assert_eq!(sim.tick(), Status::Active);
		}
		assert_eq!(sim.node("Node 5").unwrap().position(), p);

		drag.end(&mut sim).unwrap();
		sim.run(1000);
		assert_eq!(sim.status(), Status::Dormant);
	}

	#[test]
	fn contract_violations_are_reported() {
		let mut sim = settled();
		let mut drag = DragController::default();

		assert_eq!(drag.drag_to(&mut sim, 1.0, 1.0), Err(DragError::NotDragging));
		assert_eq!(drag.end(&mut sim), Err(DragError::NotDragging));
		assert_eq!(
			drag.start(&mut sim, "Node 9", 0.0, 0.0),
			Err(DragError::UnknownNode("Node 9".into()))
		);
		assert_eq!(drag.state(), DragState::Idle);

		drag.start(&mut sim, "Node 1", 0.0, 0.0).unwrap();
		assert_eq!(
			drag.start(&mut sim, "Node 2", 0.0, 0.0),
			Err(DragError::AlreadyDragging {
				active: "Node 1".into()
			})
		);
		assert!(!sim.node("Node 2").unwrap().is_pinned());
	}

	#[test]
	fn drag_works_without_links() {
		let nodes = vec![GraphNode::new("solo", 0)];
		let mut sim =
			Simulation::start(nodes, Vec::<GraphLink>::new(), ForceSet::new(), Canvas::new(100, 100))
				.unwrap();
		let mut drag = DragController::default();
		drag.start(&mut sim, "solo", 50.0, 50.0).unwrap();
		drag.drag_to(&mut sim, 10.0, 10.0).unwrap();
		sim.tick();
		drag.end(&mut sim).unwrap();

		let node = sim.node("solo").unwrap();
		assert!(!node.is_pinned());
		assert!(node.position().distance(Vec2::new(50.0, 50.0)) > 1.0);
	}
}
