use log::debug;

use super::interaction::DragController;
use super::model::GraphModel;
use super::physics::{FRAME_MS, PhysicsConfig, Simulation};
use super::search::SearchResult;
use super::types::{GraphNode, Point};

/// Upper bound on how often positions are published to the renderer.
pub const COMMIT_HZ: f64 = 45.0;

/// Lets a commit through at most once per `1000 / hz` milliseconds.
#[derive(Clone, Debug)]
pub struct CommitThrottle {
	interval_ms: f64,
	last: Option<f64>,
}

impl CommitThrottle {
	pub fn new(hz: f64) -> Self {
		Self {
			interval_ms: 1000.0 / hz,
			last: None,
		}
	}

	pub fn ready(&mut self, now_ms: f64) -> bool {
		match self.last {
			Some(last) if now_ms - last < self.interval_ms => false,
			_ => {
				self.last = Some(now_ms);
				true
			}
		}
	}
}

/// Everything one mounted skill graph owns: topology, simulation, pointer
/// and search state, plus the last committed snapshot.
pub struct SkillGraphState {
	pub model: GraphModel,
	pub sim: Simulation,
	pub drag: DragController,
	pub search: SearchResult,
	pub active_skill: Option<usize>,
	pub width: f64,
	pub height: f64,
	/// Milliseconds of simulated time, used to animate link dashes.
	pub flow_time: f64,
	committed: Vec<Point>,
	throttle: CommitThrottle,
	last_frame: Option<f64>,
}

impl SkillGraphState {
	pub fn new(model: GraphModel, physics: PhysicsConfig, width: f64, height: f64) -> Self {
		let sim = Simulation::new(&model, physics);
		let committed = sim.positions().to_vec();
		Self {
			model,
			sim,
			drag: DragController::default(),
			search: SearchResult::default(),
			active_skill: None,
			width,
			height,
			flow_time: 0.0,
			committed,
			throttle: CommitThrottle::new(COMMIT_HZ),
			last_frame: None,
		}
	}

	/// Runs one physics step for the frame at `now_ms`. Returns true when the
	/// committed snapshot was refreshed and should be redrawn.
	pub fn advance(&mut self, now_ms: f64) -> bool {
		let elapsed = self
			.last_frame
			.map(|last| now_ms - last)
			.unwrap_or(FRAME_MS);
		self.last_frame = Some(now_ms);

		self.sim.step(&self.model, self.drag.active(), elapsed);
		self.flow_time += elapsed.clamp(0.0, 40.0);

		if !self.throttle.ready(now_ms) {
			return false;
		}
		self.committed.clear();
		self.committed.extend_from_slice(self.sim.positions());
		true
	}

	/// Positions as of the last commit.
	pub fn committed(&self) -> &[Point] {
		&self.committed
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn to_pixels(&self, point: Point) -> (f64, f64) {
		(point.x / 100.0 * self.width, point.y / 100.0 * self.height)
	}

	/// Percent-to-pixel factor for radii, so circles stay round.
	pub fn pixel_scale(&self) -> f64 {
		self.width.min(self.height) / 100.0
	}

	/// Topmost node whose circle contains the percentage point.
	pub fn node_at_position(&self, point: Point) -> Option<usize> {
		let (px, py) = self.to_pixels(point);
		let scale = self.pixel_scale();
		let mut found = None;
		for (idx, position) in self.committed.iter().enumerate() {
			let Some(radius) = self.sim.radius(idx) else {
				continue;
			};
			let (nx, ny) = self.to_pixels(*position);
			let (dx, dy) = (nx - px, ny - py);
			if (dx * dx + dy * dy).sqrt() <= radius * scale {
				found = Some(idx);
			}
		}
		found
	}

	/// Starts dragging `node`; a skill node also becomes the active skill.
	/// Returns true when the active skill changed.
	pub fn pointer_down(&mut self, node: usize, point: Point) -> bool {
		if !self.drag.pointer_down(node, point) {
			return false;
		}
		match self.model.node(node) {
			Some(n) if n.is_skill() && self.active_skill != Some(node) => {
				self.active_skill = Some(node);
				true
			}
			_ => false,
		}
	}

	pub fn pointer_move(&mut self, point: Point) {
		self.drag.pointer_move(point);
	}

	pub fn pointer_up(&mut self) {
		self.drag.pointer_up();
	}

	/// Recomputes the search sets. A new primary match becomes the active
	/// skill; returns true when the active skill changed.
	pub fn set_query(&mut self, query: &str) -> bool {
		let result = SearchResult::compute(&self.model, query);
		let primary_changed = result.primary != self.search.primary;
		debug!(
			"search {:?}: {} focused, {} related",
			result.query,
			result.focus.len(),
			result.related.len()
		);
		self.search = result;

		match self.search.primary {
			Some(primary) if primary_changed && self.active_skill != Some(primary) => {
				self.active_skill = Some(primary);
				true
			}
			_ => false,
		}
	}

	pub fn active_skill(&self) -> Option<&GraphNode> {
		self.active_skill.and_then(|idx| self.model.node(idx))
	}

	pub fn category_label(&self, key: &str) -> Option<&str> {
		self.model
			.categories()
			.find(|(_, node)| node.category == key)
			.map(|(_, node)| node.label.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::types::Taxonomy;
	use crate::data::skills::portfolio_taxonomy;

	fn state() -> SkillGraphState {
		let model = GraphModel::build(&portfolio_taxonomy()).unwrap();
		SkillGraphState::new(model, PhysicsConfig::default(), 1000.0, 500.0)
	}

	#[test]
	fn throttle_caps_commit_rate() {
		let mut throttle = CommitThrottle::new(COMMIT_HZ);
		assert!(throttle.ready(0.0));
		assert!(!throttle.ready(10.0));
		assert!(!throttle.ready(22.0));
		assert!(throttle.ready(23.0));
		assert!(!throttle.ready(30.0));
	}

	#[test]
	fn physics_runs_every_frame_but_commits_are_batched() {
		let mut state = state();
		assert!(state.advance(0.0));
		let snapshot = state.committed().to_vec();

		assert!(!state.advance(8.0));
		assert_eq!(state.committed(), snapshot.as_slice());
		assert_ne!(state.sim.positions(), snapshot.as_slice());

		assert!(state.advance(24.0));
		assert_eq!(state.committed(), state.sim.positions());
	}

	#[test]
	fn hit_test_finds_node_under_pointer() {
		let state = state();
		let position = state.committed()[3];
		let found = state.node_at_position(position).unwrap();
		let (nx, ny) = state.to_pixels(state.committed()[found]);
		let (px, py) = state.to_pixels(position);
		let reach = state.sim.radius(found).unwrap() * state.pixel_scale();
		assert!(((nx - px).powi(2) + (ny - py).powi(2)).sqrt() <= reach);
	}

	#[test]
	fn hit_test_misses_empty_space() {
		let taxonomy = Taxonomy::default().category("solo", "Solo", Point::new(50.0, 50.0), vec![]);
		let model = GraphModel::build(&taxonomy).unwrap();
		let state = SkillGraphState::new(model, PhysicsConfig::default(), 800.0, 600.0);
		assert_eq!(state.node_at_position(state.committed()[0]), Some(0));
		assert_eq!(state.node_at_position(Point::new(2.0, 2.0)), None);
	}

	#[test]
	fn grabbing_a_skill_selects_it() {
		let mut state = state();
		let (skill, _) = state.model.skills().next().unwrap();
		let point = state.committed()[skill];
		assert!(state.pointer_down(skill, point));
		assert_eq!(state.active_skill, Some(skill));
		assert!(state.drag.is_dragging());
		state.pointer_up();
		assert!(!state.drag.is_dragging());
	}

	#[test]
	fn grabbing_a_category_keeps_selection() {
		let mut state = state();
		let (category, _) = state.model.categories().next().unwrap();
		assert!(!state.pointer_down(category, Point::new(10.0, 10.0)));
		assert_eq!(state.active_skill, None);
		assert!(state.drag.is_dragging());
	}

	#[test]
	fn drag_pins_node_through_advance() {
		let mut state = state();
		let (skill, _) = state.model.skills().nth(2).unwrap();
		state.pointer_down(skill, Point::new(30.0, 70.0));
		state.advance(0.0);
		state.pointer_move(Point::new(35.0, 65.0));
		state.advance(16.0);
		assert_eq!(state.sim.position(skill), Some(Point::new(35.0, 65.0)));
		assert_eq!(state.sim.velocity(skill), Some(Point::default()));
	}

	#[test]
	fn search_primary_becomes_active_skill() {
		let mut state = state();
		assert!(state.set_query("Python"));
		assert_eq!(state.active_skill().map(|n| n.label.as_str()), Some("Python"));

		// Clearing the query keeps the last selection.
		assert!(!state.set_query(""));
		assert_eq!(state.active_skill().map(|n| n.label.as_str()), Some("Python"));
		assert!(state.search.focus.is_empty());
	}

	#[test]
	fn category_labels_resolve() {
		let state = state();
		assert_eq!(state.category_label("database"), Some("Database Architecture"));
		assert_eq!(state.category_label("nope"), None);
	}
}
