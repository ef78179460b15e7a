//! Visual theming for the force graph.
//!
//! Provides the group color palette and stroke/label styles used by the
//! renderer. None of this reaches the simulation.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors handed out to node groups in the order the groups first appear,
/// wrapping around once the palette is exhausted.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Colors in hand-out order.
	pub colors: Vec<Color>,
}

/// Used when a palette has no colors at all.
const FALLBACK_COLOR: Color = Color::rgb(127, 127, 127);

/// Group-to-color mapping for one graph, built by [`NodePalette::assign`].
#[derive(Clone, Debug, Default)]
pub struct GroupColors {
	assigned: Vec<(u32, Color)>,
}

impl GroupColors {
	/// Color assigned to `group`. Groups that were never seen get the
	/// fallback gray.
	pub fn get(&self, group: u32) -> Color {
		self.assigned
			.iter()
			.find(|(g, _)| *g == group)
			.map_or(FALLBACK_COLOR, |(_, c)| *c)
	}
}

impl NodePalette {
	/// The ten-color categorical scheme (d3 `schemeCategory10`).
	pub fn category10() -> Self {
		Self {
			colors: vec![
				Color::rgb(31, 119, 180),  // Blue
				Color::rgb(255, 127, 14),  // Orange
				Color::rgb(44, 160, 44),   // Green
				Color::rgb(214, 39, 40),   // Red
				Color::rgb(148, 103, 189), // Purple
				Color::rgb(140, 86, 75),   // Brown
				Color::rgb(227, 119, 194), // Pink
				Color::rgb(127, 127, 127), // Gray
				Color::rgb(188, 189, 34),  // Olive
				Color::rgb(23, 190, 207),  // Cyan
			],
		}
	}

	/// Color for the `ordinal`-th distinct group.
	pub fn for_ordinal(&self, ordinal: usize) -> Color {
		if self.colors.is_empty() {
			return FALLBACK_COLOR;
		}
		self.colors[ordinal % self.colors.len()]
	}

	/// Assigns colors to the distinct values of `groups` in first-seen order,
	/// so the first group listed gets the first color whatever its number.
	pub fn assign(&self, groups: impl IntoIterator<Item = u32>) -> GroupColors {
		let mut assigned: Vec<(u32, Color)> = Vec::new();
		for group in groups {
			if !assigned.iter().any(|(g, _)| *g == group) {
				assigned.push((group, self.for_ordinal(assigned.len())));
			}
		}
		GroupColors { assigned }
	}
}

/// Link stroke.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke color.
	pub color: Color,
	/// Line width in pixels.
	pub width: f64,
}

/// Node circle.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Circle radius in pixels.
	pub radius: f64,
	/// Pointer distance within which a press grabs the node.
	pub hit_radius: f64,
	/// Ring drawn around each circle.
	pub border_color: Color,
	/// Border width (0 = no border)
	pub border_width: f64,
}

/// Node label text.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Font size in pixels.
	pub size: f64,
	/// CSS font family list.
	pub family: &'static str,
	/// Text fill.
	pub color: Color,
	/// Baseline offset below the node center, in ems.
	pub offset_em: f64,
}

impl LabelStyle {
	/// CSS `font` shorthand.
	pub fn font(&self) -> String {
		format!("{}px {}", self.size, self.family)
	}

	/// Vertical label offset in pixels.
	pub fn offset(&self) -> f64 {
		self.size * self.offset_em
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Display name.
	pub name: &'static str,
	/// Canvas fill behind the graph.
	pub background: Color,
	/// Link stroke.
	pub edge: EdgeStyle,
	/// Node circles.
	pub node: NodeStyle,
	/// Node labels.
	pub label: LabelStyle,
	/// Group colors.
	pub palette: NodePalette,
}

impl Theme {
	/// White page, grey links, categorical node colors (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(255, 255, 255),
			edge: EdgeStyle {
				color: Color::rgba(153, 153, 153, 0.6),
				width: 2.0,
			},
			node: NodeStyle {
				radius: 8.0,
				hit_radius: 12.0,
				border_color: Color::rgb(255, 255, 255),
				border_width: 1.5,
			},
			label: LabelStyle {
				size: 12.0,
				family: "Arial, sans-serif",
				color: Color::rgb(51, 51, 51),
				offset_em: 1.5,
			},
			palette: NodePalette::category10(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
