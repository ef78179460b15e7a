//! Errors raised by the layout core.

use std::fmt;

/// A link whose endpoint(s) name no node in the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedLink {
	/// Position of the link in the input list.
	pub index: usize,
	/// Source id as given.
	pub source: String,
	/// Target id as given.
	pub target: String,
}

impl fmt::Display for UnresolvedLink {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{} ({} -> {})", self.index, self.source, self.target)
	}
}

/// The graph handed to [`Simulation::start`](super::Simulation::start) cannot
/// be simulated. Raised before the first tick.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
	/// One or more links name a node that does not exist.
	#[error("links reference unknown nodes: {}", join(.0))]
	UnresolvedLinks(Vec<UnresolvedLink>),
	/// Two nodes share an id, so links to it would be ambiguous.
	#[error("node id `{0}` appears more than once")]
	DuplicateNode(String),
	/// The canvas has a zero dimension.
	#[error("canvas must have positive dimensions, got {width}x{height}")]
	EmptyCanvas {
		/// Requested width.
		width: u32,
		/// Requested height.
		height: u32,
	},
	/// A layout parameter would stall or destabilize the simulation.
	#[error("`{name}` must be {expected}, got {value}")]
	InvalidParameter {
		/// Field name as it appears in the layout block.
		name: &'static str,
		/// Rejected value.
		value: f64,
		/// Accepted range, for the message.
		expected: &'static str,
	},
}

/// A drag gesture that does not fit the current drag state.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DragError {
	/// Drag started on an id the simulation does not know.
	#[error("no node with id `{0}`")]
	UnknownNode(String),
	/// A second drag started before the first ended.
	#[error("node `{active}` is already being dragged")]
	AlreadyDragging {
		/// Id of the node currently held.
		active: String,
	},
	/// Move or release arrived without a drag start.
	#[error("no drag in progress")]
	NotDragging,
}

/// Result alias for simulation setup.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Fails with [`ConfigurationError::InvalidParameter`] unless `ok`.
pub(crate) fn ensure(
	ok: bool,
	name: &'static str,
	value: f64,
	expected: &'static str,
) -> Result<()> {
	if ok {
		Ok(())
	} else {
		Err(ConfigurationError::InvalidParameter {
			name,
			value,
			expected,
		})
	}
}

fn join(links: &[UnresolvedLink]) -> String {
	links
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}
