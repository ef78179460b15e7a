//! Integration of accumulated forces and alpha cooling.

use super::error::{self, ensure};
use super::model::{Node, Vec2};
use crate::types::LayoutConfig;

/// Ticks it takes a default alpha to cool from 1 to `min`.
const COOLING_TICKS: f64 = 300.0;

/// Simulation energy. Scales every force and decays geometrically toward
/// `target` each tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Alpha {
	/// Current energy in `[0, 1]`.
	pub value: f64,
	/// Convergence threshold.
	pub min: f64,
	/// Fraction of the gap to `target` closed per tick.
	pub decay: f64,
	/// Floor alpha cools toward. Raised while a node is dragged.
	pub target: f64,
}

impl Alpha {
	/// Alpha starting at 1, cooling below `min` in about 300 ticks.
	pub fn new(min: f64) -> Self {
		Self {
			value: 1.0,
			min,
			decay: 1.0 - min.powf(1.0 / COOLING_TICKS),
			target: 0.0,
		}
	}

	/// One cooling step.
	pub fn step(&mut self) {
		self.value += (self.target - self.value) * self.decay;
	}

	/// True once alpha has cooled below `min`.
	pub fn is_converged(&self) -> bool {
		self.value < self.min
	}
}

impl Default for Alpha {
	fn default() -> Self {
		Self::new(LayoutConfig::default().alpha_min)
	}
}

/// Applies accumulated forces to velocities and velocities to positions.
#[derive(Clone, Debug)]
pub struct Integrator {
	/// Fraction of velocity lost per tick, in `[0, 1)`.
	pub velocity_decay: f64,
	/// Cooling schedule.
	pub alpha: Alpha,
}

impl Integrator {
	/// Integrator with the given friction and cooling schedule.
	pub fn new(velocity_decay: f64, alpha: Alpha) -> Self {
		Self {
			velocity_decay,
			alpha,
		}
	}

	/// Friction and cooling taken from the layout block.
	pub fn from_config(config: &LayoutConfig) -> Self {
		Self::new(config.velocity_decay, Alpha::new(config.alpha_min))
	}

	/// Rejects parameters under which the layout never settles or diverges.
	///
	/// `alpha_min` must lie in `(0, 1)` or alpha never drops below it, and
	/// `velocity_decay` in `[0, 1)` or velocities grow without bound.
	pub fn validate(&self) -> error::Result<()> {
		let Alpha { min, decay, .. } = self.alpha;
		ensure(min > 0.0 && min < 1.0, "alpha_min", min, "in (0, 1)")?;
		ensure(decay > 0.0 && decay <= 1.0, "alpha_decay", decay, "in (0, 1]")?;
		let v = self.velocity_decay;
		ensure((0.0..1.0).contains(&v), "velocity_decay", v, "in [0, 1)")
	}

	/// Advances every node by one step using `forces[i]` for node `i`.
	///
	/// A pinned axis snaps to its pinned coordinate and loses its velocity;
	/// free axes follow `v = (v + F * alpha) * (1 - decay)`, `p += v`.
	pub fn integrate(&self, nodes: &mut [Node], forces: &[Vec2]) {
		let alpha = self.alpha.value;
		let friction = 1.0 - self.velocity_decay;
		for (node, force) in nodes.iter_mut().zip(forces) {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx = (node.vx + force.x * alpha) * friction;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy = (node.vy + force.y * alpha) * friction;
					node.y += node.vy;
				}
			}
		}
	}

	/// Cools alpha one step.
	pub fn cool(&mut self) {
		self.alpha.step();
	}
}

impl Default for Integrator {
	fn default() -> Self {
		Self::from_config(&LayoutConfig::default())
	}
}
