//! Simulation controller.
//!
//! Owns the nodes, resolved links, force set and integrator. Ticks are driven
//! from outside (one per animation frame in the browser); each active tick
//! computes forces, integrates, cools alpha and hands a [`Frame`] to the
//! renderer callback. Once alpha falls below its minimum and no node is held,
//! the simulation goes dormant and ticks become no-ops until reheated.

use std::collections::HashMap;

use log::{debug, info};

use super::error::{ConfigurationError, Result, UnresolvedLink};
use super::force::ForceSet;
use super::integrator::Integrator;
use super::model::{Canvas, Link, Node, Vec2, seed_position};
use crate::types::{GraphData, GraphLink, GraphNode};

/// Energy injected when the canvas changes size.
const RESIZE_ALPHA: f64 = 0.3;

/// Whether ticks currently do anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
	/// No ticking; alpha has cooled or the simulation was stopped.
	Dormant,
	/// Ticking; alpha above threshold or a node is being dragged.
	Active,
}

/// Snapshot handed to the renderer after each active tick. Borrowed for the
/// duration of the callback only.
pub struct Frame<'a> {
	/// Number of ticks run so far, including this one.
	pub tick: u64,
	/// Alpha after this tick's cooling step.
	pub alpha: f64,
	/// Node state after integration.
	pub nodes: &'a [Node],
	/// Resolved links, indexing into `nodes`.
	pub links: &'a [Link],
}

impl Frame<'_> {
	/// Current `(source, target)` positions of every link.
	pub fn link_segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
		self.links.iter().map(|link| {
			let (s, t) = link.endpoints(self.nodes);
			(s.position(), t.position())
		})
	}
}

type TickCallback = Box<dyn FnMut(&Frame<'_>)>;

/// The live layout.
pub struct Simulation {
	nodes: Vec<Node>,
	links: Vec<Link>,
	forces: ForceSet,
	integrator: Integrator,
	canvas: Canvas,
	status: Status,
	dragging: bool,
	ticks: u64,
	on_tick: Option<TickCallback>,
	scratch: Vec<Vec2>,
}

impl Simulation {
	/// Resolves links, initializes forces and starts ticking with default
	/// integration parameters.
	///
	/// Fails before any tick if a link names an unknown node, an id repeats,
	/// the canvas is empty, or a force or integrator parameter is out of
	/// range.
	pub fn start(
		nodes: Vec<GraphNode>,
		links: Vec<GraphLink>,
		forces: ForceSet,
		canvas: Canvas,
	) -> Result<Self> {
		Self::start_with(nodes, links, forces, canvas, Integrator::default())
	}

	/// Like [`Simulation::start`] with an explicit integrator.
	pub fn start_with(
		nodes: Vec<GraphNode>,
		links: Vec<GraphLink>,
		mut forces: ForceSet,
		canvas: Canvas,
		integrator: Integrator,
	) -> Result<Self> {
		integrator.validate()?;
		forces.validate()?;
		if canvas.width == 0 || canvas.height == 0 {
			return Err(ConfigurationError::EmptyCanvas {
				width: canvas.width,
				height: canvas.height,
			});
		}

		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(ConfigurationError::DuplicateNode(node.id.clone()));
			}
		}

		let mut resolved = Vec::with_capacity(links.len());
		let mut unresolved = Vec::new();
		for (i, link) in links.into_iter().enumerate() {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&source), Some(&target)) => resolved.push(Link { source, target }),
				_ => unresolved.push(UnresolvedLink {
					index: i,
					source: link.source,
					target: link.target,
				}),
			}
		}
		if !unresolved.is_empty() {
			return Err(ConfigurationError::UnresolvedLinks(unresolved));
		}

		let center = canvas.center();
		let nodes: Vec<Node> = nodes
			.into_iter()
			.enumerate()
			.map(|(i, n)| {
				let seed = seed_position(i, center);
				let position = Vec2::new(n.x.unwrap_or(seed.x), n.y.unwrap_or(seed.y));
				Node::new(n.id, n.group, position)
			})
			.collect();

		forces.initialize(nodes.len(), &resolved, canvas);

		info!(
			"simulation started: {} nodes, {} links, {} forces on {}x{}",
			nodes.len(),
			resolved.len(),
			forces.len(),
			canvas.width,
			canvas.height
		);

		Ok(Self {
			scratch: Vec::with_capacity(nodes.len()),
			nodes,
			links: resolved,
			forces,
			integrator,
			canvas,
			status: Status::Active,
			dragging: false,
			ticks: 0,
			on_tick: None,
		})
	}

	/// Starts a simulation for page-supplied data using its layout block:
	/// distance 100, strength -300 and canvas centering unless overridden.
	pub fn from_graph(data: &GraphData, canvas: Canvas) -> Result<Self> {
		data.layout.validate()?;
		Self::start_with(
			data.nodes.clone(),
			data.links.clone(),
			ForceSet::from_config(&data.layout),
			canvas,
			Integrator::from_config(&data.layout),
		)
	}

	/// Registers the renderer. Replaces any earlier callback.
	pub fn on_tick(&mut self, callback: impl FnMut(&Frame<'_>) + 'static) {
		self.on_tick = Some(Box::new(callback));
	}

	/// Runs one step. Dormant simulations do nothing and notify no one.
	pub fn tick(&mut self) -> Status {
		if self.status == Status::Dormant {
			return Status::Dormant;
		}

		self.forces
			.accumulate(&self.nodes, &self.links, &mut self.scratch);
		self.integrator.integrate(&mut self.nodes, &self.scratch);
		self.integrator.cool();
		self.ticks += 1;

		if let Some(callback) = self.on_tick.as_mut() {
			callback(&Frame {
				tick: self.ticks,
				alpha: self.integrator.alpha.value,
				nodes: &self.nodes,
				links: &self.links,
			});
		}

		if self.integrator.alpha.is_converged() && !self.dragging {
			debug!("simulation converged after {} ticks", self.ticks);
			self.status = Status::Dormant;
		}
		self.status
	}

	/// Ticks until dormant or `max_ticks` have run. Returns the ticks taken.
	pub fn run(&mut self, max_ticks: usize) -> usize {
		let mut taken = 0;
		while taken < max_ticks && self.status == Status::Active {
			self.tick();
			taken += 1;
		}
		taken
	}

	/// Raises alpha to at least `target` (clamped to `[0, 1]`) and resumes
	/// ticking. Never lowers the current energy.
	pub fn reheat(&mut self, target: f64) {
		let alpha = &mut self.integrator.alpha;
		alpha.value = alpha.value.max(unit(target));
		if self.status == Status::Dormant {
			debug!("simulation reheated to alpha {:.3}", alpha.value);
		}
		self.status = Status::Active;
	}

	/// Stops ticking. Safe to call repeatedly.
	pub fn stop(&mut self) {
		if self.status == Status::Active {
			debug!("simulation stopped at tick {}", self.ticks);
		}
		self.status = Status::Dormant;
	}

	/// Follows a canvas resize: canvas-relative forces re-target and the
	/// layout is nudged so it drifts to the new center.
	pub fn resize(&mut self, canvas: Canvas) {
		if canvas.width == 0 || canvas.height == 0 || canvas == self.canvas {
			return;
		}
		self.canvas = canvas;
		self.forces.resize(canvas);
		self.reheat(RESIZE_ALPHA);
	}

	/// Nearest node within `radius` of `(x, y)`.
	pub fn find(&self, x: f64, y: f64, radius: f64) -> Option<&Node> {
		let point = Vec2::new(x, y);
		let mut best = radius * radius;
		let mut found = None;
		for node in &self.nodes {
			let d = (node.position() - point).length_squared();
			if d < best {
				best = d;
				found = Some(node);
			}
		}
		found
	}

	/// Node with the given id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// All nodes in input order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Resolved links in input order.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Active forces.
	pub fn forces(&self) -> &ForceSet {
		&self.forces
	}

	/// Current canvas bounds.
	pub fn canvas(&self) -> Canvas {
		self.canvas
	}

	/// Current alpha.
	pub fn alpha(&self) -> f64 {
		self.integrator.alpha.value
	}

	/// Whether ticks currently do anything.
	pub fn status(&self) -> Status {
		self.status
	}

	/// Active ticks run since start.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// True while a node is held by a drag.
	pub fn is_dragging(&self) -> bool {
		self.dragging
	}

	pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	pub(crate) fn node_at(&self, index: usize) -> &Node {
		&self.nodes[index]
	}

	pub(crate) fn pin(&mut self, index: usize, at: Vec2) {
		self.nodes[index].pin(at);
	}

	pub(crate) fn unpin(&mut self, index: usize) {
		self.nodes[index].unpin();
	}

	/// Holds alpha at `floor` (at least) until [`end_interaction`] and keeps
	/// ticking regardless of convergence.
	///
	/// [`end_interaction`]: Simulation::end_interaction
	pub(crate) fn begin_interaction(&mut self, floor: f64) {
		self.dragging = true;
		self.integrator.alpha.target = unit(floor);
		self.reheat(floor);
	}

	/// Lets alpha cool to zero again. Does not lower the current value.
	pub(crate) fn end_interaction(&mut self) {
		self.dragging = false;
		self.integrator.alpha.target = 0.0;
	}
}

/// Clamps to `[0, 1]`, mapping NaN to 0.
fn unit(x: f64) -> f64 {
	if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
