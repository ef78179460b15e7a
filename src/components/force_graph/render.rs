//! Canvas rendering for the force graph.
//!
//! Consumes a simulation [`Frame`] and redraws everything from scratch:
//! 1. Background
//! 2. Link lines
//! 3. Node circles with borders
//! 4. Labels on top, so links never cross text

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::{GroupColors, Theme};
use crate::simulation::{Frame, Node};

/// Renders the complete graph to the canvas.
pub fn render(
	frame: &Frame<'_>,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	width: f64,
	height: f64,
) {
	draw_background(ctx, theme, width, height);
	draw_links(frame, ctx, theme);
	let colors = theme.palette.assign(frame.nodes.iter().map(|n| n.group));
	for node in frame.nodes {
		draw_node(ctx, node, theme, &colors);
	}
	draw_labels(frame, ctx, theme);
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_links(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(theme.edge.width);

	ctx.begin_path();
	for (from, to) in frame.link_segments() {
		ctx.move_to(from.x, from.y);
		ctx.line_to(to.x, to.y);
	}
	ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node, theme: &Theme, colors: &GroupColors) {
	let style = &theme.node;

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, style.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&colors.get(node.group).to_css());
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&style.border_color.to_css());
		ctx.set_line_width(style.border_width);
		ctx.stroke();
	}
}

fn draw_labels(frame: &Frame<'_>, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let label = &theme.label;
	ctx.set_fill_style_str(&label.color.to_css());
	ctx.set_font(&label.font());
	ctx.set_text_align("center");

	let offset = label.offset();
	for node in frame.nodes {
		let _ = ctx.fill_text(&node.id, node.x, node.y + offset);
	}
}
