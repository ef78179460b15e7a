//! Simulation records: vectors, nodes, resolved links, canvas.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Golden angle in radians, `PI * (3 - sqrt 5)`.
pub(crate) const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

const INITIAL_RADIUS: f64 = 10.0;

/// A 2-D vector used for positions, velocities and forces.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	/// Horizontal component.
	pub x: f64,
	/// Vertical component.
	pub y: f64,
}

impl Vec2 {
	/// Origin / zero vector.
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	/// Vector `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Squared Euclidean length.
	pub fn length_squared(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	/// Euclidean length.
	pub fn length(self) -> f64 {
		self.length_squared().sqrt()
	}

	/// Distance between two points.
	pub fn distance(self, other: Vec2) -> f64 {
		(other - self).length()
	}

	/// Unit vector at `angle` radians.
	pub fn from_angle(angle: f64) -> Self {
		Self::new(angle.cos(), angle.sin())
	}
}

impl Add for Vec2 {
	type Output = Vec2;
	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Vec2) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Vec2 {
	type Output = Vec2;
	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;
	fn mul(self, k: f64) -> Vec2 {
		Vec2::new(self.x * k, self.y * k)
	}
}

impl Neg for Vec2 {
	type Output = Vec2;
	fn neg(self) -> Vec2 {
		Vec2::new(-self.x, -self.y)
	}
}

/// Drawing surface size in pixels. Both sides must be positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}

impl Canvas {
	/// Canvas of `width` x `height` pixels.
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}

	/// Midpoint of the canvas.
	pub fn center(&self) -> Vec2 {
		Vec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
	}

	/// Clamps a point into `[0, width] x [0, height]`.
	pub fn clamp(&self, p: Vec2) -> Vec2 {
		Vec2::new(
			p.x.clamp(0.0, self.width as f64),
			p.y.clamp(0.0, self.height as f64),
		)
	}
}

/// A simulated node. Position and velocity are mutated in place every tick.
#[derive(Clone, Debug)]
pub struct Node {
	/// Stable identity, unique within the simulation.
	pub id: String,
	/// Rendering category.
	pub group: u32,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position, growing downward.
	pub y: f64,
	/// Horizontal velocity, carried between ticks.
	pub vx: f64,
	/// Vertical velocity.
	pub vy: f64,
	/// Pinned x. While set, `x` is forced to it every tick.
	pub fx: Option<f64>,
	/// Pinned y. While set, `y` is forced to it every tick.
	pub fy: Option<f64>,
}

impl Node {
	pub(crate) fn new(id: String, group: u32, position: Vec2) -> Self {
		Self {
			id,
			group,
			x: position.x,
			y: position.y,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
		}
	}

	/// `(x, y)` as a vector.
	pub fn position(&self) -> Vec2 {
		Vec2::new(self.x, self.y)
	}

	/// `(vx, vy)` as a vector.
	pub fn velocity(&self) -> Vec2 {
		Vec2::new(self.vx, self.vy)
	}

	/// True when either axis is pinned.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}

	pub(crate) fn pin(&mut self, at: Vec2) {
		self.fx = Some(at.x);
		self.fy = Some(at.y);
	}

	pub(crate) fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}
}

/// Seed position for the `index`-th unplaced node: a phyllotaxis spiral
/// around `center`, so no two seeds coincide.
pub(crate) fn seed_position(index: usize, center: Vec2) -> Vec2 {
	let radius = INITIAL_RADIUS * (0.5 + index as f64).sqrt();
	let angle = index as f64 * GOLDEN_ANGLE;
	center + Vec2::from_angle(angle) * radius
}

/// A spring between two nodes, resolved to indices into the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
}

impl Link {
	pub(crate) fn endpoints<'a>(&self, nodes: &'a [Node]) -> (&'a Node, &'a Node) {
		(&nodes[self.source], &nodes[self.target])
	}
}

/// Deterministic unit direction from node `a` toward node `b` used when the
/// two coincide. Antisymmetric in `(a, b)` and distinct per pair, so a fully
/// superimposed start still unfolds in two dimensions.
pub(crate) fn fallback_direction(a: usize, b: usize) -> Vec2 {
	if a > b {
		return -fallback_direction(b, a);
	}
	let turns = (31 * a + b + 1) as f64 * GOLDEN_ANGLE;
	Vec2::from_angle(turns)
}

#[cfg(test)]
mod tests {
	use std::f64::consts::PI;

	use super::*;

	#[test]
	fn golden_angle_constant() {
		let expected = PI * (3.0 - 5f64.sqrt());
		assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
	}

	#[test]
	fn seeds_are_distinct_and_close_to_center() {
		let center = Vec2::new(400.0, 300.0);
		let seeds: Vec<_> = (0..20).map(|i| seed_position(i, center)).collect();

		for (i, a) in seeds.iter().enumerate() {
			assert!(a.distance(center) <= INITIAL_RADIUS * 5.0);
			for b in &seeds[i + 1..] {
				assert!(a.distance(*b) > 1.0);
			}
		}
	}

	#[test]
	fn fallback_direction_is_unit_and_antisymmetric() {
		for a in 0..6 {
			for b in 0..6 {
				if a == b {
					continue;
				}
				let ab = fallback_direction(a, b);
				let ba = fallback_direction(b, a);
				assert!((ab.length() - 1.0).abs() < 1e-12);
				assert_eq!(ab, -ba);
			}
		}
		assert_ne!(fallback_direction(0, 1), fallback_direction(0, 2));
	}

	#[test]
	fn canvas_clamp_and_center() {
		let canvas = Canvas::new(800, 600);
		assert_eq!(canvas.center(), Vec2::new(400.0, 300.0));
		assert_eq!(
			canvas.clamp(Vec2::new(-5.0, 900.0)),
			Vec2::new(0.0, 600.0)
		);
	}
}
