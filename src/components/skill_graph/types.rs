use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A point or vector in percentage-of-container units, `[0,100]` per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length_sq(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	pub fn length(self) -> f64 {
		self.length_sq().sqrt()
	}

	pub fn distance(self, other: Point) -> f64 {
		(self - other).length()
	}

	pub fn clamp(self, min: f64, max: f64) -> Self {
		Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
	}
}

impl Add for Point {
	type Output = Point;
	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;
	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl SubAssign for Point {
	fn sub_assign(&mut self, rhs: Point) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

impl Mul<f64> for Point {
	type Output = Point;
	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Category,
	Skill,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub kind: NodeKind,
	/// Key of the owning category (a category node owns itself).
	pub category: String,
	/// Declared order of the owning category; drives colour.
	pub group: usize,
	pub description: Option<String>,
}

impl GraphNode {
	pub fn is_skill(&self) -> bool {
		self.kind == NodeKind::Skill
	}
}

/// Spring class of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkStrength {
	/// Ring between category nodes.
	Core,
	/// Skill to its own category, or a same-category fill-in link.
	Branch,
	/// Intra-category chain and cross-category links.
	Web,
}

impl LinkStrength {
	pub fn rest_length(self) -> f64 {
		match self {
			LinkStrength::Core => 38.0,
			LinkStrength::Branch => 28.0,
			LinkStrength::Web => 47.0,
		}
	}

	pub fn stiffness(self) -> f64 {
		match self {
			LinkStrength::Core => 0.0072,
			LinkStrength::Branch => 0.0082,
			LinkStrength::Web => 0.0028,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Canonical id built from the sorted endpoint ids.
	pub id: String,
	pub source: usize,
	pub target: usize,
	pub strength: LinkStrength,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillRecord {
	pub name: String,
	pub description: String,
}

impl SkillRecord {
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategorySpec {
	pub key: String,
	pub label: String,
	/// Where the category's cluster is seeded before physics takes over.
	pub anchor: Point,
	pub skills: Vec<SkillRecord>,
}

/// Static category → skills input, supplied once at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Taxonomy {
	pub categories: Vec<CategorySpec>,
}

impl Taxonomy {
	pub fn category(
		mut self,
		key: impl Into<String>,
		label: impl Into<String>,
		anchor: Point,
		skills: Vec<SkillRecord>,
	) -> Self {
		self.categories.push(CategorySpec {
			key: key.into(),
			label: label.into(),
			anchor,
			skills,
		});
		self
	}
}
