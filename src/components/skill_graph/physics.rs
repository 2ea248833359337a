//! Per-frame force accumulation and integration.
//!
//! Forces are soft (repulsion, springs, centering, drift, hub clearing) and
//! are followed by a hard positional pass that separates any pair still
//! overlapping, which keeps deep overlaps from building up energy.

use std::f64::consts::TAU;

use super::interaction::DragState;
use super::layout::{drift_phase, edge_padding, hub_padding, visual_radius};
use super::model::GraphModel;
use super::types::{NodeKind, Point};

/// Duration of one 60 fps frame; `dt_scale` is 1.0 at this elapsed time.
pub const FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_MS: f64 = 40.0;
pub const MAX_DT_SCALE: f64 = 1.1;

pub const HUB_CENTER: Point = Point::new(50.0, 50.0);
pub const HUB_HALF_WIDTH: f64 = 22.0;
pub const HUB_HALF_HEIGHT: f64 = 10.5;

/// Dimensionless step size for a frame of `elapsed_ms`.
pub fn dt_scale(elapsed_ms: f64) -> f64 {
	let elapsed = if elapsed_ms.is_finite() {
		elapsed_ms.clamp(0.0, MAX_FRAME_MS)
	} else {
		FRAME_MS
	};
	(elapsed / FRAME_MS).min(MAX_DT_SCALE)
}

/// Tunables for [`Simulation`]. A zero strength disables that force.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
	pub repulsion: f64,
	/// Floor applied to the squared distance before dividing.
	pub min_distance_sq: f64,
	pub collision_margin: f64,
	pub collision_strength: f64,
	pub center_pull_category: f64,
	pub center_pull_skill: f64,
	pub drift_amplitude: f64,
	/// Radians of drift phase advanced per simulated millisecond.
	pub drift_rate: f64,
	pub hub_strength: f64,
	pub damping: f64,
	pub max_speed_category: f64,
	pub max_speed_skill: f64,
	/// Fraction of velocity kept after bouncing off a container edge.
	pub bounce: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 2.2,
			min_distance_sq: 1.0,
			collision_margin: 1.4,
			collision_strength: 0.035,
			center_pull_category: 0.0011,
			center_pull_skill: 0.00042,
			drift_amplitude: 0.0016,
			drift_rate: 0.00055,
			hub_strength: 0.045,
			damping: 0.94,
			max_speed_category: 0.2,
			max_speed_skill: 0.16,
			bounce: 0.42,
		}
	}
}

/// Unit vector from `b` to `a`, or a fixed per-pair direction when they coincide.
fn direction(delta: Point, a: usize, b: usize) -> Point {
	let distance = delta.length();
	if distance > 0.0001 {
		delta * (1.0 / distance)
	} else {
		let angle = ((a as f64) * 0.618_034 + (b as f64) * 0.414_214) * TAU;
		Point::new(angle.cos(), angle.sin())
	}
}

fn outward(value: f64) -> f64 {
	if value >= 0.0 { 1.0 } else { -1.0 }
}

/// Position/velocity store for one mounted graph.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: PhysicsConfig,
	positions: Vec<Point>,
	velocities: Vec<Point>,
	forces: Vec<Point>,
	radii: Vec<f64>,
	edge_pads: Vec<f64>,
	hub_pads: Vec<f64>,
	phases: Vec<f64>,
	max_speeds: Vec<f64>,
	center_pulls: Vec<f64>,
	clock_ms: f64,
}

impl Simulation {
	pub fn new(model: &GraphModel, config: PhysicsConfig) -> Self {
		let count = model.len();
		let mut sim = Self {
			config,
			positions: model.initial_positions().to_vec(),
			velocities: vec![Point::default(); count],
			forces: vec![Point::default(); count],
			radii: Vec::with_capacity(count),
			edge_pads: Vec::with_capacity(count),
			hub_pads: Vec::with_capacity(count),
			phases: Vec::with_capacity(count),
			max_speeds: Vec::with_capacity(count),
			center_pulls: Vec::with_capacity(count),
			clock_ms: 0.0,
		};
		for node in model.nodes() {
			sim.radii.push(visual_radius(node.kind, &node.label));
			sim.edge_pads.push(edge_padding(node.kind, &node.label));
			sim.hub_pads.push(hub_padding(&node.label));
			sim.phases.push(drift_phase(&node.id));
			let (speed, pull) = match node.kind {
				NodeKind::Category => (config.max_speed_category, config.center_pull_category),
				NodeKind::Skill => (config.max_speed_skill, config.center_pull_skill),
			};
			sim.max_speeds.push(speed);
			sim.center_pulls.push(pull);
		}
		sim
	}

	pub fn config(&self) -> &PhysicsConfig {
		&self.config
	}

	pub fn positions(&self) -> &[Point] {
		&self.positions
	}

	pub fn position(&self, idx: usize) -> Option<Point> {
		self.positions.get(idx).copied()
	}

	pub fn velocity(&self, idx: usize) -> Option<Point> {
		self.velocities.get(idx).copied()
	}

	pub fn radius(&self, idx: usize) -> Option<f64> {
		self.radii.get(idx).copied()
	}

	/// `(min, max)` allowed per axis for this node.
	pub fn bounds(&self, idx: usize) -> Option<(f64, f64)> {
		self.edge_pads.get(idx).map(|pad| (*pad, 100.0 - pad))
	}

	pub fn set_position(&mut self, idx: usize, point: Point) {
		if let Some(p) = self.positions.get_mut(idx) {
			*p = point;
		}
	}

	pub fn set_velocity(&mut self, idx: usize, velocity: Point) {
		if let Some(v) = self.velocities.get_mut(idx) {
			*v = velocity;
		}
	}

	pub fn step(&mut self, model: &GraphModel, pin: Option<&DragState>, elapsed_ms: f64) {
		let dt = dt_scale(elapsed_ms);
		self.clock_ms += dt * FRAME_MS;

		let pinned = pin.filter(|drag| drag.node < self.positions.len());
		if let Some(drag) = pinned {
			self.positions[drag.node] = drag.point;
			self.velocities[drag.node] = Point::default();
		}
		let pinned = pinned.map(|drag| drag.node);

		self.forces.fill(Point::default());

		self.accumulate_repulsion();
		self.accumulate_springs(model);
		self.accumulate_centering();
		self.accumulate_drift();
		self.accumulate_hub_clearing();
		self.integrate(pinned, dt);
		self.resolve_overlaps(pinned);
	}

	fn accumulate_repulsion(&mut self) {
		let cfg = self.config;
		let count = self.positions.len();
		for i in 0..count {
			for j in (i + 1)..count {
				let delta = self.positions[i] - self.positions[j];
				let distance = delta.length();
				let distance_sq = (distance * distance).max(cfg.min_distance_sq);
				let mut push = cfg.repulsion / distance_sq;

				let min_distance = self.radii[i] + self.radii[j] + cfg.collision_margin;
				if distance < min_distance {
					push += (min_distance - distance) * cfg.collision_strength;
				}

				let force = direction(delta, i, j) * push;
				self.forces[i] += force;
				self.forces[j] -= force;
			}
		}
	}

	fn accumulate_springs(&mut self, model: &GraphModel) {
		for link in model.links() {
			let (Some(a), Some(b)) = (
				self.positions.get(link.source).copied(),
				self.positions.get(link.target).copied(),
			) else {
				continue;
			};
			let delta = b - a;
			let distance = delta.length().max(0.001);
			let stretch = distance - link.strength.rest_length();
			let force = delta * (stretch * link.strength.stiffness() / distance);
			self.forces[link.source] += force;
			self.forces[link.target] -= force;
		}
	}

	fn accumulate_centering(&mut self) {
		for ((force, position), pull) in self
			.forces
			.iter_mut()
			.zip(&self.positions)
			.zip(&self.center_pulls)
		{
			*force += (HUB_CENTER - *position) * *pull;
		}
	}

	fn accumulate_drift(&mut self) {
		let amplitude = self.config.drift_amplitude;
		if amplitude == 0.0 {
			return;
		}
		let t = self.clock_ms * self.config.drift_rate;
		for (force, phase) in self.forces.iter_mut().zip(&self.phases) {
			*force += Point::new(
				(t + phase).sin() * amplitude,
				(t * 0.83 + phase * 1.7).cos() * amplitude,
			);
		}
	}

	fn accumulate_hub_clearing(&mut self) {
		let strength = self.config.hub_strength;
		if strength == 0.0 {
			return;
		}
		for ((force, position), pad) in self
			.forces
			.iter_mut()
			.zip(&self.positions)
			.zip(&self.hub_pads)
		{
			let delta = *position - HUB_CENTER;
			let gap_x = HUB_HALF_WIDTH + pad - delta.x.abs();
			let gap_y = HUB_HALF_HEIGHT + pad - delta.y.abs();
			if gap_x <= 0.0 || gap_y <= 0.0 {
				continue;
			}
			if gap_x < gap_y {
				force.x += outward(delta.x) * gap_x * strength;
			} else {
				force.y += outward(delta.y) * gap_y * strength;
			}
		}
	}

	fn integrate(&mut self, pinned: Option<usize>, dt: f64) {
		let cfg = self.config;
		for i in 0..self.positions.len() {
			if pinned == Some(i) {
				continue;
			}
			let mut velocity = (self.velocities[i] + self.forces[i] * dt) * cfg.damping;
			let speed = velocity.length();
			if speed > self.max_speeds[i] {
				velocity = velocity * (self.max_speeds[i] / speed);
			}

			let mut position = self.positions[i] + velocity * dt;
			let (lo, hi) = (self.edge_pads[i], 100.0 - self.edge_pads[i]);
			if position.x < lo {
				position.x = lo;
				velocity.x = velocity.x.abs() * cfg.bounce;
			} else if position.x > hi {
				position.x = hi;
				velocity.x = -velocity.x.abs() * cfg.bounce;
			}
			if position.y < lo {
				position.y = lo;
				velocity.y = velocity.y.abs() * cfg.bounce;
			} else if position.y > hi {
				position.y = hi;
				velocity.y = -velocity.y.abs() * cfg.bounce;
			}

			self.positions[i] = position;
			self.velocities[i] = velocity;
		}
	}

	fn resolve_overlaps(&mut self, pinned: Option<usize>) {
		let margin = self.config.collision_margin;
		let count = self.positions.len();
		for i in 0..count {
			for j in (i + 1)..count {
				let delta = self.positions[i] - self.positions[j];
				let distance = delta.length();
				let min_distance = self.radii[i] + self.radii[j] + margin;
				if distance >= min_distance {
					continue;
				}
				let shift = direction(delta, i, j) * ((min_distance - distance) * 0.5);
				if pinned != Some(i) {
					self.positions[i] += shift;
				}
				if pinned != Some(j) {
					self.positions[j] -= shift;
				}
			}
		}

		for i in 0..count {
			if pinned == Some(i) {
				continue;
			}
			let pad = self.edge_pads[i];
			self.positions[i] = self.positions[i].clamp(pad, 100.0 - pad);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::types::{SkillRecord, Taxonomy};
	use crate::data::skills::portfolio_taxonomy;

	fn quiet() -> PhysicsConfig {
		PhysicsConfig {
			drift_amplitude: 0.0,
			center_pull_category: 0.0,
			center_pull_skill: 0.0,
			hub_strength: 0.0,
			..PhysicsConfig::default()
		}
	}

	fn categories(count: usize) -> GraphModel {
		let mut taxonomy = Taxonomy::default();
		for i in 0..count {
			taxonomy = taxonomy.category(
				format!("c{i}"),
				format!("Cat {i}"),
				Point::new(20.0 + 30.0 * i as f64, 50.0),
				Vec::<SkillRecord>::new(),
			);
		}
		GraphModel::build(&taxonomy).unwrap()
	}

	#[test]
	fn frame_time_is_clamped() {
		assert!((dt_scale(FRAME_MS) - 1.0).abs() < 1e-12);
		assert!((dt_scale(FRAME_MS / 2.0) - 0.5).abs() < 1e-12);
		assert_eq!(dt_scale(500.0), MAX_DT_SCALE);
		assert_eq!(dt_scale(-3.0), 0.0);
		assert!((dt_scale(f64::NAN) - 1.0).abs() < 1e-12);
	}

	#[test]
	fn isolated_node_at_rest_stays_put() {
		let model = categories(1);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, Point::new(30.0, 30.0));
		for _ in 0..20 {
			sim.step(&model, None, FRAME_MS);
		}
		assert_eq!(sim.position(0), Some(Point::new(30.0, 30.0)));
		assert_eq!(sim.velocity(0), Some(Point::default()));
	}

	#[test]
	fn drift_keeps_idle_nodes_moving() {
		let model = categories(1);
		let config = PhysicsConfig {
			drift_amplitude: 0.01,
			..quiet()
		};
		let mut sim = Simulation::new(&model, config);
		sim.set_position(0, Point::new(30.0, 30.0));
		for _ in 0..10 {
			sim.step(&model, None, FRAME_MS);
		}
		assert_ne!(sim.position(0), Some(Point::new(30.0, 30.0)));
	}

	fn bounce_off(start: Point, velocity: Point) -> (Point, Point, (f64, f64)) {
		let model = categories(1);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, start);
		sim.set_velocity(0, velocity);
		sim.step(&model, None, FRAME_MS);
		(sim.position(0).unwrap(), sim.velocity(0).unwrap(), sim.bounds(0).unwrap())
	}

	#[test]
	fn boundary_clamps_and_reflects_on_every_wall() {
		let model = categories(1);
		let (lo, hi) = Simulation::new(&model, quiet()).bounds(0).unwrap();

		let (p, v, _) = bounce_off(Point::new(hi, 50.0), Point::new(0.15, 0.0));
		assert_eq!(p.x, hi);
		assert!(v.x < 0.0, "max x: {v:?}");

		let (p, v, _) = bounce_off(Point::new(lo, 50.0), Point::new(-0.15, 0.0));
		assert_eq!(p.x, lo);
		assert!(v.x > 0.0, "min x: {v:?}");

		let (p, v, _) = bounce_off(Point::new(50.0, hi), Point::new(0.0, 0.15));
		assert_eq!(p.y, hi);
		assert!(v.y < 0.0, "max y: {v:?}");

		let (p, v, bounds) = bounce_off(Point::new(50.0, lo), Point::new(0.0, -0.1));
		assert_eq!(p.y, bounds.0);
		assert!((v.y - 0.1 * 0.94 * 0.42).abs() < 1e-12, "min y: {v:?}");
	}

	#[test]
	fn speed_is_capped_per_kind() {
		let model = categories(1);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, Point::new(30.0, 30.0));
		sim.set_velocity(0, Point::new(0.0, 3.0));
		sim.step(&model, None, FRAME_MS);
		let speed = sim.velocity(0).unwrap().length();
		assert!(speed <= sim.config().max_speed_category + 1e-12);
		assert!(speed > 0.0);
	}

	#[test]
	fn velocity_decays_without_forces() {
		let model = categories(1);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, Point::new(30.0, 30.0));
		sim.set_velocity(0, Point::new(0.01, 0.0));
		sim.step(&model, None, FRAME_MS);
		let first = sim.velocity(0).unwrap().x;
		sim.step(&model, None, FRAME_MS);
		let second = sim.velocity(0).unwrap().x;
		assert!((first - 0.01 * sim.config().damping).abs() < 1e-12);
		assert!((second - first * sim.config().damping).abs() < 1e-12);
	}

	#[test]
	fn springs_pull_stretched_links_together() {
		let model = categories(2);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, Point::new(10.0, 50.0));
		sim.set_position(1, Point::new(90.0, 50.0));
		let before = sim.position(0).unwrap().distance(sim.position(1).unwrap());
		sim.step(&model, None, FRAME_MS);
		let after = sim.position(0).unwrap().distance(sim.position(1).unwrap());
		assert!(after < before);
	}

	#[test]
	fn hub_pushes_nodes_out_along_nearest_edge() {
		let model = categories(1);
		let config = PhysicsConfig {
			hub_strength: 0.045,
			..quiet()
		};
		let mut sim = Simulation::new(&model, config);
		sim.set_position(0, Point::new(50.0, 52.0));
		sim.step(&model, None, FRAME_MS);
		let p = sim.position(0).unwrap();
		assert!(p.y > 52.0);
		assert_eq!(p.x, 50.0);
	}

	#[test]
	fn overlapping_nodes_are_separated() {
		let model = categories(2);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, Point::new(40.0, 30.0));
		sim.set_position(1, Point::new(41.0, 30.0));
		sim.step(&model, None, FRAME_MS);
		let min = sim.radius(0).unwrap() + sim.radius(1).unwrap() + sim.config().collision_margin;
		let distance = sim.position(0).unwrap().distance(sim.position(1).unwrap());
		assert!(distance >= min - 1e-9, "{distance} < {min}");
	}

	#[test]
	fn dragged_node_is_pinned_to_pointer() {
		let model = GraphModel::build(&portfolio_taxonomy()).unwrap();
		let mut sim = Simulation::new(&model, PhysicsConfig::default());
		let node = model.skills().next().unwrap().0;
		let path = [
			Point::new(20.0, 80.0),
			Point::new(21.5, 79.0),
			Point::new(50.0, 50.0),
			Point::new(0.0, 100.0),
		];
		for point in path {
			let drag = DragState { node, point };
			sim.step(&model, Some(&drag), FRAME_MS);
			assert_eq!(sim.position(node), Some(point));
			assert_eq!(sim.velocity(node), Some(Point::default()));
		}
	}

	#[test]
	fn dragged_node_still_pushes_neighbours() {
		let model = categories(2);
		let mut sim = Simulation::new(&model, quiet());
		sim.set_position(0, Point::new(40.0, 30.0));
		sim.set_position(1, Point::new(44.0, 30.0));
		let drag = DragState {
			node: 0,
			point: Point::new(40.0, 30.0),
		};
		sim.step(&model, Some(&drag), FRAME_MS);
		assert_eq!(sim.position(0), Some(Point::new(40.0, 30.0)));
		assert!(sim.position(1).unwrap().x > 44.0);
	}

	#[test]
	fn full_graph_stays_finite_and_in_bounds() {
		let model = GraphModel::build(&portfolio_taxonomy()).unwrap();
		let mut sim = Simulation::new(&model, PhysicsConfig::default());
		for frame in 0..600 {
			let elapsed = if frame % 97 == 0 { 2_000.0 } else { FRAME_MS };
			sim.step(&model, None, elapsed);
		}
		for idx in 0..model.len() {
			let p = sim.position(idx).unwrap();
			let (lo, hi) = sim.bounds(idx).unwrap();
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!((lo..=hi).contains(&p.x) && (lo..=hi).contains(&p.y));
		}
	}
}
