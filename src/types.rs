//! Graph data structures and layout configuration supplied by the page.

use serde::Deserialize;

use crate::simulation::error::{ConfigurationError, ensure};
use crate::simulation::{ForceSet, Integrator};

/// A node in the input graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Category tag. Only affects the color the renderer picks.
	#[serde(default)]
	pub group: u32,
	/// Optional starting x coordinate. Unplaced nodes are seeded on a spiral
	/// around the canvas center.
	#[serde(default)]
	pub x: Option<f64>,
	/// Optional starting y coordinate.
	#[serde(default)]
	pub y: Option<f64>,
}

impl GraphNode {
	/// Creates an unplaced node.
	pub fn new(id: impl Into<String>, group: u32) -> Self {
		Self {
			id: id.into(),
			group,
			x: None,
			y: None,
		}
	}

	/// Sets the starting position.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = Some(x);
		self.y = Some(y);
		self
	}
}

/// An undirected spring between two nodes, by identity.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

impl GraphLink {
	/// Creates a link between two node ids.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Tunable layout constants. Every field has a default, so a page only needs
/// to list the values it wants to change.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Many-body strength. Negative values repel.
	pub charge_strength: f64,
	/// Separation below which repulsion stops growing.
	pub charge_distance_min: f64,
	/// Centering target. `None` follows the canvas center.
	pub center: Option<(f64, f64)>,
	/// How hard the centroid is pulled toward the center target.
	pub center_strength: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha below which the simulation goes dormant.
	pub alpha_min: f64,
	/// Alpha the simulation is held at while a node is dragged.
	pub drag_alpha: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			link_distance: 100.0,
			charge_strength: -300.0,
			charge_distance_min: 1.0,
			center: None,
			center_strength: 1.0,
			velocity_decay: 0.4,
			alpha_min: 0.001,
			drag_alpha: 0.3,
		}
	}
}

impl LayoutConfig {
	/// Checks every value before a simulation or drag controller is built
	/// from this block. Page-supplied JSON is not trusted to be in range.
	pub fn validate(&self) -> Result<(), ConfigurationError> {
		Integrator::from_config(self).validate()?;
		ForceSet::from_config(self).validate()?;
		let a = self.drag_alpha;
		ensure((0.0..=1.0).contains(&a), "drag_alpha", a, "in [0, 1]")
	}
}

/// Complete graph data: nodes, links and optional layout overrides.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Nodes in input order.
	pub nodes: Vec<GraphNode>,
	/// Links by node identity.
	pub links: Vec<GraphLink>,
	/// Layout overrides.
	#[serde(default)]
	pub layout: LayoutConfig,
}

impl GraphData {
	/// The five-node demo graph shown when the page provides no data.
	pub fn sample() -> Self {
		let nodes = [1, 1, 2, 2, 3]
			.into_iter()
			.enumerate()
			.map(|(i, group)| GraphNode::new(format!("Node {}", i + 1), group))
			.collect();
		let links = [(1, 2), (2, 3), (3, 4), (4, 5), (1, 4)]
			.into_iter()
			.map(|(s, t)| GraphLink::new(format!("Node {s}"), format!("Node {t}")))
			.collect();

		Self {
			nodes,
			links,
			layout: LayoutConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_minimal_json_with_defaults() {
		let json = r#"{
			"nodes": [{ "id": "a", "group": 2 }, { "id": "b" }],
			"links": [{ "source": "a", "target": "b" }]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].group, 2);
		assert_eq!(data.nodes[1].group, 0);
		assert!(data.nodes[0].x.is_none());
		assert_eq!(data.links[0].target, "b");
		assert_eq!(data.layout.link_distance, 100.0);
		assert_eq!(data.layout.charge_strength, -300.0);
	}

	#[test]
	fn partial_layout_block_keeps_other_defaults() {
		let json = r#"{
			"nodes": [],
			"links": [],
			"layout": { "link_distance": 60.0, "center": [10.0, 20.0] }
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();

		assert_eq!(data.layout.link_distance, 60.0);
		assert_eq!(data.layout.center, Some((10.0, 20.0)));
		assert_eq!(data.layout.velocity_decay, 0.4);
		assert_eq!(data.layout.drag_alpha, 0.3);
	}

	#[test]
	fn sample_graph_matches_demo_page() {
		let data = GraphData::sample();
		let ids: Vec<_> = data.nodes.iter().map(|n| n.id.as_str()).collect();

		assert_eq!(ids, ["Node 1", "Node 2", "Node 3", "Node 4", "Node 5"]);
		assert_eq!(data.links.len(), 5);
		assert_eq!(data.links[4].source, "Node 1");
		assert_eq!(data.links[4].target, "Node 4");
	}

	fn rejected(config: &LayoutConfig) -> &'static str {
		match config.validate() {
			Err(ConfigurationError::InvalidParameter { name, .. }) => name,
			other => panic!("expected a rejected parameter, got {other:?}"),
		}
	}

	#[test]
	fn default_layout_is_valid() {
		assert!(LayoutConfig::default().validate().is_ok());
	}

	#[test]
	fn out_of_range_layout_json_is_rejected() {
		let json = r#"{ "nodes": [], "links": [], "layout": { "alpha_min": 0.0 } }"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(rejected(&data.layout), "alpha_min");

		let json = r#"{ "nodes": [], "links": [], "layout": { "velocity_decay": 1.2 } }"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(rejected(&data.layout), "velocity_decay");
	}

	#[test]
	fn drag_alpha_must_be_a_unit_fraction() {
		for a in [1.5, -0.1, f64::NAN] {
			let config = LayoutConfig {
				drag_alpha: a,
				..LayoutConfig::default()
			};
			assert_eq!(rejected(&config), "drag_alpha", "drag_alpha = {a}");
		}
		for a in [0.0, 1.0] {
			let config = LayoutConfig {
				drag_alpha: a,
				..LayoutConfig::default()
			};
			assert!(config.validate().is_ok());
		}
	}
}
