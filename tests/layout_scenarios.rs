//! End-to-end layout scenarios driven through the public API only.

#![allow(unused_crate_dependencies)]

use std::cell::RefCell;
use std::rc::Rc;

use force_layout::simulation::{
	Canvas, ConfigurationError, DragController, ForceSet, Simulation, Status, Vec2,
};
use force_layout::{GraphData, GraphLink, GraphNode};

fn sample_on_top_of_each_other() -> Simulation {
	let mut data = GraphData::sample();
	for node in &mut data.nodes {
		node.x = Some(400.0);
		node.y = Some(300.0);
	}
	Simulation::from_graph(&data, Canvas::new(800, 600)).unwrap()
}

fn positions(sim: &Simulation) -> Vec<Vec2> {
	sim.nodes().iter().map(|n| n.position()).collect()
}

#[test]
fn superimposed_nodes_spread_out_and_settle() {
	let mut sim = sample_on_top_of_each_other();
	let frames = Rc::new(RefCell::new(0usize));
	let seen = frames.clone();
	sim.on_tick(move |_| *seen.borrow_mut() += 1);

	let ticks = sim.run(1000);

	assert_eq!(sim.status(), Status::Dormant);
	assert!(ticks <= 400, "took {ticks} ticks to settle");
	assert_eq!(*frames.borrow(), ticks);

	for link in sim.links() {
		let a = sim.nodes()[link.source].position();
		let b = sim.nodes()[link.target].position();
		let len = a.distance(b);
		// Repulsion stretches every spring a little past its rest length.
		assert!(len > 100.0 && len < 120.0, "link length {len}");
	}

	let nodes = sim.nodes();
	for i in 0..nodes.len() {
		for j in i + 1..nodes.len() {
			let d = nodes[i].position().distance(nodes[j].position());
			assert!(d > 50.0, "{} and {} only {d} apart", nodes[i].id, nodes[j].id);
		}
	}
}

#[test]
fn dragged_node_follows_pointer_then_rejoins_layout() {
	let mut sim = Simulation::from_graph(&GraphData::sample(), Canvas::new(800, 600)).unwrap();
	sim.run(1000);
	let settled = positions(&sim);
	let grab = sim.node("Node 3").unwrap().position();

	let mut drag = DragController::default();
	drag.start(&mut sim, "Node 3", grab.x, grab.y).unwrap();
	drag.drag_to(&mut sim, 50.0, 50.0).unwrap();
	for _ in 0..30 {
		sim.tick();
	}
	let held = sim.node("Node 3").unwrap().position();
	assert!(held.distance(Vec2::new(50.0, 50.0)) < 1e-9);

	drag.end(&mut sim).unwrap();
	assert_eq!(sim.status(), Status::Active);
	sim.tick();
	let released = sim.node("Node 3").unwrap().position();
	assert!(released.distance(held) > 1e-6, "released node did not move");

	let moved = positions(&sim)
		.iter()
		.zip(&settled)
		.enumerate()
		.filter(|(i, _)| *i != 2)
		.filter(|(_, (now, before))| now.distance(**before) > 1.0)
		.count();
	assert!(moved > 0, "no other node reacted to the drag");

	sim.run(1000);
	assert_eq!(sim.status(), Status::Dormant);
}

#[test]
fn unknown_link_endpoint_is_rejected() {
	let nodes = vec![GraphNode::new("a", 1), GraphNode::new("b", 1)];
	let links = vec![GraphLink::new("a", "b"), GraphLink::new("b", "ghost")];

	let err = Simulation::start(
		nodes,
		links,
		ForceSet::from_config(&Default::default()),
		Canvas::new(800, 600),
	)
	.err()
	.expect("start should fail");

	let ConfigurationError::UnresolvedLinks(bad) = &err else {
		panic!("unexpected error: {err}");
	};
	assert_eq!(bad.len(), 1);
	assert_eq!(bad[0].index, 1);
	assert_eq!(bad[0].target, "ghost");
}

#[test]
fn reheat_wakes_a_dormant_layout() {
	let mut sim = Simulation::from_graph(&GraphData::sample(), Canvas::new(800, 600)).unwrap();
	sim.run(1000);
	let ticks = sim.ticks();
	assert_eq!(sim.tick(), Status::Dormant);
	assert_eq!(sim.ticks(), ticks);

	sim.reheat(0.5);
	assert_eq!(sim.status(), Status::Active);
	assert_eq!(sim.alpha(), 0.5);
	assert!(sim.run(1000) > 0);
	assert_eq!(sim.status(), Status::Dormant);
}

#[test]
fn stop_halts_without_notifying() {
	let mut sim = sample_on_top_of_each_other();
	sim.run(10);
	sim.stop();
	let frozen = positions(&sim);

	let frames = Rc::new(RefCell::new(0usize));
	let seen = frames.clone();
	sim.on_tick(move |_| *seen.borrow_mut() += 1);
	assert_eq!(sim.tick(), Status::Dormant);
	assert_eq!(*frames.borrow(), 0);
	assert_eq!(positions(&sim), frozen);
}

#[test]
fn layout_that_could_never_settle_is_rejected() {
	let mut data = GraphData::sample();
	data.layout.alpha_min = 0.0;
	let err = Simulation::from_graph(&data, Canvas::new(800, 600)).err();
	assert!(matches!(
		err,
		Some(ConfigurationError::InvalidParameter { name: "alpha_min", .. })
	));

	let mut data = GraphData::sample();
	data.layout.alpha_min = -0.5;
	let err = Simulation::from_graph(&data, Canvas::new(800, 600)).err();
	assert!(matches!(
		err,
		Some(ConfigurationError::InvalidParameter { name: "alpha_min", .. })
	));
}
