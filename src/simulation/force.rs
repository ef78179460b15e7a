//! Force model.
//!
//! Each [`Force`] reads the current node state and adds one vector per node
//! into an accumulator. Nothing here mutates a node: the integrator scales the
//! summed vectors by alpha and applies them.
//!
//! Three forces are available, matching the classic d3 layout:
//! - [`LinkForce`]: springs pulling linked nodes toward a rest distance
//! - [`ManyBodyForce`]: pairwise inverse-square repulsion (O(n²))
//! - [`CenterForce`]: drags the centroid toward a target point

use super::error::{self, ensure};
use super::model::{Canvas, Link, Node, Vec2, fallback_direction};
use crate::types::LayoutConfig;

/// Link springs. Per-link strength and bias are derived from node degrees
/// when the force is initialized.
#[derive(Clone, Debug)]
pub struct LinkForce {
	/// Rest length of each spring.
	pub distance: f64,
	weights: Vec<LinkWeight>,
}

#[derive(Clone, Copy, Debug)]
struct LinkWeight {
	strength: f64,
	/// Share of the correction applied to the target end.
	bias: f64,
}

impl LinkForce {
	/// Springs with rest length `distance`.
	pub fn new(distance: f64) -> Self {
		Self {
			distance,
			weights: Vec::new(),
		}
	}

	fn initialize(&mut self, node_count: usize, links: &[Link]) {
		let mut degree = vec![0usize; node_count];
		for link in links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}
		self.weights = links
			.iter()
			.map(|link| {
				let (s, t) = (degree[link.source] as f64, degree[link.target] as f64);
				LinkWeight {
					strength: 1.0 / s.min(t),
					bias: s / (s + t),
				}
			})
			.collect();
	}

	fn accumulate(&self, nodes: &[Node], links: &[Link], out: &mut [Vec2]) {
		for (link, weight) in links.iter().zip(&self.weights) {
			let (source, target) = link.endpoints(nodes);
			// Look one step ahead so stiff springs do not overshoot.
			let mut delta = (target.position() + target.velocity())
				- (source.position() + source.velocity());
			let mut length = delta.length();
			if length == 0.0 {
				delta = fallback_direction(link.source, link.target);
				length = 1.0;
			}
			let k = (length - self.distance) / length * weight.strength;
			out[link.target] += -delta * (k * weight.bias);
			out[link.source] += delta * (k * (1.0 - weight.bias));
		}
	}
}

/// Pairwise charge between every two distinct nodes.
#[derive(Clone, Debug)]
pub struct ManyBodyForce {
	/// Negative repels, positive attracts.
	pub strength: f64,
	/// Separations below this are treated as this, bounding the force.
	pub distance_min: f64,
}

impl ManyBodyForce {
	/// Charge of `strength` with a distance floor of 1.
	pub fn new(strength: f64) -> Self {
		Self {
			strength,
			distance_min: 1.0,
		}
	}

	// TODO: switch to a Barnes-Hut quadtree once graphs grow past a few hundred nodes.
	fn accumulate(&self, nodes: &[Node], out: &mut [Vec2]) {
		let min_sq = self.distance_min * self.distance_min;
		for i in 0..nodes.len() {
			for j in i + 1..nodes.len() {
				let mut delta = nodes[j].position() - nodes[i].position();
				let mut dist_sq = delta.length_squared();
				if dist_sq == 0.0 {
					delta = fallback_direction(i, j);
					dist_sq = 1.0;
				}
				let w = self.strength / dist_sq.max(min_sq);
				out[i] += delta * w;
				out[j] += -delta * w;
			}
		}
	}
}

/// Pulls the centroid of all nodes toward `target`. Every node receives the
/// same vector, so the shape of the layout is untouched.
#[derive(Clone, Debug)]
pub struct CenterForce {
	/// Fixed target. `None` follows the canvas center.
	pub target: Option<Vec2>,
	/// Fraction of the centroid offset corrected per unit alpha.
	pub strength: f64,
	resolved: Vec2,
}

impl CenterForce {
	/// Full-strength centering on `target`, or on the canvas when `None`.
	pub fn new(target: Option<Vec2>) -> Self {
		Self {
			target,
			strength: 1.0,
			resolved: target.unwrap_or_default(),
		}
	}

	/// Point the centroid is currently pulled toward.
	pub fn center(&self) -> Vec2 {
		self.resolved
	}

	fn resize(&mut self, canvas: Canvas) {
		self.resolved = self.target.unwrap_or_else(|| canvas.center());
	}

	fn accumulate(&self, nodes: &[Node], out: &mut [Vec2]) {
		if nodes.is_empty() {
			return;
		}
		let sum = nodes
			.iter()
			.fold(Vec2::ZERO, |acc, node| acc + node.position());
		let centroid = sum * (1.0 / nodes.len() as f64);
		let pull = (self.resolved - centroid) * self.strength;
		for f in out.iter_mut() {
			*f += pull;
		}
	}
}

/// One active force.
#[derive(Clone, Debug)]
pub enum Force {
	/// Link springs.
	Link(LinkForce),
	/// Pairwise charge.
	ManyBody(ManyBodyForce),
	/// Centroid pull.
	Center(CenterForce),
}

impl Force {
	/// Link springs with rest length `distance`.
	pub fn link(distance: f64) -> Self {
		Force::Link(LinkForce::new(distance))
	}

	/// Many-body charge. Negative repels.
	pub fn many_body(strength: f64) -> Self {
		Force::ManyBody(ManyBodyForce::new(strength))
	}

	/// Centering on the canvas center.
	pub fn center() -> Self {
		Force::Center(CenterForce::new(None))
	}

	/// Centering on a fixed point.
	pub fn center_at(x: f64, y: f64) -> Self {
		Force::Center(CenterForce::new(Some(Vec2::new(x, y))))
	}

	/// Adds this force's contribution for every node into `out`.
	pub fn accumulate(&self, nodes: &[Node], links: &[Link], out: &mut [Vec2]) {
		match self {
			Force::Link(f) => f.accumulate(nodes, links, out),
			Force::ManyBody(f) => f.accumulate(nodes, out),
			Force::Center(f) => f.accumulate(nodes, out),
		}
	}

	fn initialize(&mut self, node_count: usize, links: &[Link], canvas: Canvas) {
		match self {
			Force::Link(f) => f.initialize(node_count, links),
			Force::ManyBody(_) => {}
			Force::Center(f) => f.resize(canvas),
		}
	}

	fn resize(&mut self, canvas: Canvas) {
		if let Force::Center(f) = self {
			f.resize(canvas);
		}
	}
}

/// The set of active forces, applied in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ForceSet {
	forces: Vec<Force>,
}

impl ForceSet {
	/// No forces: nodes only drift on their velocity.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `force`.
	pub fn with(mut self, force: Force) -> Self {
		self.forces.push(force);
		self
	}

	/// Link, many-body and center forces configured from `config`.
	pub fn from_config(config: &LayoutConfig) -> Self {
		let center = CenterForce {
			strength: config.center_strength,
			..CenterForce::new(config.center.map(|(x, y)| Vec2::new(x, y)))
		};
		let charge = ManyBodyForce {
			strength: config.charge_strength,
			distance_min: config.charge_distance_min,
		};
		Self::new()
			.with(Force::link(config.link_distance))
			.with(Force::ManyBody(charge))
			.with(Force::Center(center))
	}

	/// Forces in application order.
	pub fn iter(&self) -> impl Iterator<Item = &Force> {
		self.forces.iter()
	}

	/// Number of forces.
	pub fn len(&self) -> usize {
		self.forces.len()
	}

	/// True when no force is set.
	pub fn is_empty(&self) -> bool {
		self.forces.is_empty()
	}

	/// Clears `out` and fills it with the summed force on every node.
	pub fn accumulate(&self, nodes: &[Node], links: &[Link], out: &mut Vec<Vec2>) {
		out.clear();
		out.resize(nodes.len(), Vec2::ZERO);
		for force in &self.forces {
			force.accumulate(nodes, links, out);
		}
	}

	/// Rejects lengths and strengths that would turn positions into NaN.
	pub fn validate(&self) -> error::Result<()> {
		for force in &self.forces {
			match force {
				Force::Link(f) => non_negative("link_distance", f.distance)?,
				Force::ManyBody(f) => {
					ensure(f.strength.is_finite(), "charge_strength", f.strength, "finite")?;
					non_negative("charge_distance_min", f.distance_min)?;
				}
				Force::Center(f) => {
					ensure(f.strength.is_finite(), "center_strength", f.strength, "finite")?;
					if let Some(t) = f.target {
						let bad = if t.x.is_finite() { t.y } else { t.x };
						ensure(t.x.is_finite() && t.y.is_finite(), "center", bad, "a finite point")?;
					}
				}
			}
		}
		Ok(())
	}

	pub(crate) fn initialize(&mut self, node_count: usize, links: &[Link], canvas: Canvas) {
		for force in &mut self.forces {
			force.initialize(node_count, links, canvas);
		}
	}

	pub(crate) fn resize(&mut self, canvas: Canvas) {
		for force in &mut self.forces {
			force.resize(canvas);
		}
	}
}

fn non_negative(name: &'static str, value: f64) -> error::Result<()> {
	ensure(value.is_finite() && value >= 0.0, name, value, "finite and >= 0")
}
