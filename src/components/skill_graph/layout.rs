//! Seeded initial placement and per-node sizing.
//!
//! Every function here is pure: sizes depend only on the node kind and the
//! label length, positions only on the anchor and the generator state.

use std::f64::consts::{PI, TAU};

use super::rng::Lcg;
use super::types::{NodeKind, Point};

pub const CATEGORY_JITTER: f64 = 3.0;
pub const CATEGORY_BOUNDS: (f64, f64) = (4.0, 96.0);
pub const SKILL_BOUNDS: (f64, f64) = (2.0, 98.0);
pub const SKILL_SPREAD: f64 = 1.85 * PI;
pub const SKILL_ANGLE_JITTER: f64 = 0.18;
pub const SKILL_RADIUS: (f64, f64) = (24.0, 52.0);

const CATEGORY_RADIUS: f64 = 5.2;
const SKILL_RADIUS_CLAMP: (f64, f64) = (3.2, 6.0);
const CATEGORY_EDGE_PAD: f64 = 6.5;
const SKILL_EDGE_PAD_CLAMP: (f64, f64) = (3.5, 8.0);
const HUB_PAD_CLAMP: (f64, f64) = (1.5, 4.5);

fn label_len(label: &str) -> f64 {
	label.chars().count() as f64
}

/// Anchor jittered by up to ±3 per axis, clamped to `[4,96]`.
pub fn category_position(anchor: Point, rng: &mut Lcg) -> Point {
	let jitter = Point::new(
		rng.range(-CATEGORY_JITTER, CATEGORY_JITTER),
		rng.range(-CATEGORY_JITTER, CATEGORY_JITTER),
	);
	(anchor + jitter).clamp(CATEGORY_BOUNDS.0, CATEGORY_BOUNDS.1)
}

/// Skill `index` of `count` placed on a jittered arc around its category anchor.
pub fn skill_position(anchor: Point, index: usize, count: usize, rng: &mut Lcg) -> Point {
	let base = index as f64 / count.max(1) as f64 * SKILL_SPREAD;
	let angle = base + rng.range(-SKILL_ANGLE_JITTER, SKILL_ANGLE_JITTER);
	let radius = rng.range(SKILL_RADIUS.0, SKILL_RADIUS.1);
	let offset = Point::new(angle.cos(), angle.sin()) * radius;
	(anchor + offset).clamp(SKILL_BOUNDS.0, SKILL_BOUNDS.1)
}

/// Collision radius. Fixed for categories, grows with label length for
/// skills within `[3.2, 6.0]`.
pub fn visual_radius(kind: NodeKind, label: &str) -> f64 {
	match kind {
		NodeKind::Category => CATEGORY_RADIUS,
		NodeKind::Skill => {
			(2.4 + label_len(label) * 0.22).clamp(SKILL_RADIUS_CLAMP.0, SKILL_RADIUS_CLAMP.1)
		}
	}
}

/// Distance kept from the container edges so labels are not cut off.
pub fn edge_padding(kind: NodeKind, label: &str) -> f64 {
	match kind {
		NodeKind::Category => CATEGORY_EDGE_PAD,
		NodeKind::Skill => {
			(3.0 + label_len(label) * 0.3).clamp(SKILL_EDGE_PAD_CLAMP.0, SKILL_EDGE_PAD_CLAMP.1)
		}
	}
}

/// Extra clearance around the search hub, grows with label length.
pub fn hub_padding(label: &str) -> f64 {
	(1.0 + label_len(label) * 0.18).clamp(HUB_PAD_CLAMP.0, HUB_PAD_CLAMP.1)
}

/// Stable phase in `[0, 2π)` derived from the node id.
pub fn drift_phase(id: &str) -> f64 {
	let hash = id
		.bytes()
		.fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32));
	(hash % 10_000) as f64 / 10_000.0 * TAU
}
