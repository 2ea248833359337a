use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::SkillGraphState;
use super::types::{LinkStrength, NodeKind};

const COLORS: &[&str] = &[
	"#38bdf8", "#a78bfa", "#34d399", "#fbbf24", "#f472b6", "#f87171", "#2dd4bf", "#c084fc",
];

const BACKGROUND: &str = "#0b1120";

/// Opacity for nodes: everything is fully visible without a query, otherwise
/// focused nodes stay bright, their neighbours dim and the rest fade out.
fn node_alpha(state: &SkillGraphState, idx: usize) -> f64 {
	if !state.search.is_active() || state.search.is_focused(idx) {
		1.0
	} else if state.search.is_related(idx) {
		0.55
	} else {
		0.14
	}
}

fn link_alpha(state: &SkillGraphState, a: usize, b: usize) -> f64 {
	let search = &state.search;
	if !search.is_active() {
		return 0.45;
	}
	let touches_focus = search.is_focused(a) || search.is_focused(b);
	if touches_focus && search.is_related(a) && search.is_related(b) {
		0.8
	} else {
		0.06
	}
}

pub fn render(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_links(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.committed();
	let dash_offset = -(state.flow_time * 0.02) % 12.0;

	for link in state.model.links() {
		let (Some(a), Some(b)) = (positions.get(link.source), positions.get(link.target)) else {
			continue;
		};
		let ((x1, y1), (x2, y2)) = (state.to_pixels(*a), state.to_pixels(*b));
		let color = state
			.model
			.node(link.source)
			.map(|n| COLORS[n.group % COLORS.len()])
			.unwrap_or(COLORS[0]);

		let (width, dashed) = match link.strength {
			LinkStrength::Core => (2.2, false),
			LinkStrength::Branch => (1.4, false),
			LinkStrength::Web => (1.0, true),
		};

		ctx.set_global_alpha(link_alpha(state, link.source, link.target));
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		if dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(8.0),
				&JsValue::from_f64(4.0),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.committed();
	let scale = state.pixel_scale();

	for (idx, node) in state.model.nodes().iter().enumerate() {
		let (Some(position), Some(radius)) = (positions.get(idx), state.sim.radius(idx)) else {
			continue;
		};
		let (x, y) = state.to_pixels(*position);
		let radius = radius * scale;
		let color = COLORS[node.group % COLORS.len()];
		let alpha = node_alpha(state, idx);
		let selected = state.active_skill == Some(idx);

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		match node.kind {
			NodeKind::Category => {
				ctx.set_fill_style_str(color);
				ctx.fill();
			}
			NodeKind::Skill => {
				ctx.set_fill_style_str(BACKGROUND);
				ctx.fill();
				ctx.set_stroke_style_str(color);
				ctx.set_line_width(if selected { 3.0 } else { 1.5 });
				ctx.stroke();
			}
		}

		if selected {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 4.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let font_px = match node.kind {
			NodeKind::Category => 13.0,
			NodeKind::Skill => 11.0,
		};
		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{font_px}px sans-serif"));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&node.label, x, y + radius + font_px + 2.0);
	}
	ctx.set_global_alpha(1.0);
}
