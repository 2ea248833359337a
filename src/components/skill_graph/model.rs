//! Static topology built once from a [`Taxonomy`].

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use super::error::GraphError;
use super::layout::{category_position, skill_position};
use super::rng::{LAYOUT_SEED, Lcg};
use super::types::{GraphLink, GraphNode, LinkStrength, NodeKind, Point, SkillRecord, Taxonomy};

/// Skills too basic to be worth a node.
pub const EXCLUDED_SKILLS: &[&str] = &["HTML", "CSS"];

const CROSS_LINK_ATTEMPTS: usize = 40;
const CROSS_LINKS_PER_SKILL: usize = 3;
const TARGET_DEGREE: usize = 3;

/// Canonical id of the undirected pair `{a, b}`.
pub fn link_id(a: &str, b: &str) -> String {
	if a <= b {
		format!("{a}~{b}")
	} else {
		format!("{b}~{a}")
	}
}

/// Lowercase, dash-separated form of a skill name, used inside node ids.
pub fn slug(name: &str) -> String {
	let mut out = String::with_capacity(name.len());
	for ch in name.chars() {
		match ch {
			'#' => push_word(&mut out, "sharp"),
			'+' => push_word(&mut out, "plus"),
			c if c.is_alphanumeric() => out.extend(c.to_lowercase()),
			_ => {
				if !out.is_empty() && !out.ends_with('-') {
					out.push('-');
				}
			}
		}
	}
	out.trim_end_matches('-').to_string()
}

fn push_word(out: &mut String, word: &str) {
	if !out.is_empty() && !out.ends_with('-') {
		out.push('-');
	}
	out.push_str(word);
}

/// `base`, or `base-2`, `base-3`, ... when distinct names slug alike.
fn unique_id(index: &HashMap<String, usize>, base: String) -> String {
	if !index.contains_key(&base) {
		return base;
	}
	let mut n = 2;
	loop {
		let candidate = format!("{base}-{n}");
		if !index.contains_key(&candidate) {
			return candidate;
		}
		n += 1;
	}
}

fn is_excluded(skill: &SkillRecord) -> bool {
	EXCLUDED_SKILLS
		.iter()
		.any(|name| name.eq_ignore_ascii_case(skill.name.trim()))
}

struct LinkSet {
	links: Vec<GraphLink>,
	seen: HashSet<String>,
	degree: Vec<usize>,
}

impl LinkSet {
	fn new(node_count: usize) -> Self {
		Self {
			links: Vec::new(),
			seen: HashSet::new(),
			degree: vec![0; node_count],
		}
	}

	fn contains(&self, nodes: &[GraphNode], a: usize, b: usize) -> bool {
		self.seen.contains(&link_id(&nodes[a].id, &nodes[b].id))
	}

	fn insert(&mut self, nodes: &[GraphNode], a: usize, b: usize, strength: LinkStrength) -> bool {
		if a == b {
			return false;
		}
		let id = link_id(&nodes[a].id, &nodes[b].id);
		if !self.seen.insert(id.clone()) {
			return false;
		}
		self.degree[a] += 1;
		self.degree[b] += 1;
		self.links.push(GraphLink {
			id,
			source: a,
			target: b,
			strength,
		});
		true
	}
}

/// Nodes, links, adjacency and seeded initial positions. Immutable once built.
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	links: Vec<GraphLink>,
	adjacency: Vec<Vec<usize>>,
	initial_positions: Vec<Point>,
	index: HashMap<String, usize>,
}

impl GraphModel {
	pub fn build(taxonomy: &Taxonomy) -> Result<Self, GraphError> {
		let mut rng = Lcg::new(LAYOUT_SEED);
		let mut nodes: Vec<GraphNode> = Vec::new();
		let mut positions: Vec<Point> = Vec::new();
		let mut index: HashMap<String, usize> = HashMap::new();
		let mut category_nodes = Vec::with_capacity(taxonomy.categories.len());
		let mut members: Vec<Vec<usize>> = Vec::with_capacity(taxonomy.categories.len());

		for (group, category) in taxonomy.categories.iter().enumerate() {
			let id = format!("category:{}", category.key);
			if index.contains_key(&id) {
				return Err(GraphError::DuplicateCategory(category.key.clone()));
			}
			let category_idx = nodes.len();
			index.insert(id.clone(), category_idx);
			nodes.push(GraphNode {
				id,
				label: category.label.clone(),
				kind: NodeKind::Category,
				category: category.key.clone(),
				group,
				description: None,
			});
			positions.push(category_position(category.anchor, &mut rng));

			let skills: Vec<&SkillRecord> =
				category.skills.iter().filter(|s| !is_excluded(s)).collect();
			let mut skill_indices = Vec::with_capacity(skills.len());
			let mut names: HashSet<&str> = HashSet::with_capacity(skills.len());
			for (i, skill) in skills.iter().enumerate() {
				if !names.insert(skill.name.trim()) {
					return Err(GraphError::DuplicateSkill {
						category: category.key.clone(),
						name: skill.name.trim().to_string(),
					});
				}
				let id = unique_id(&index, format!("skill:{}:{}", category.key, slug(&skill.name)));
				let idx = nodes.len();
				index.insert(id.clone(), idx);
				nodes.push(GraphNode {
					id,
					label: skill.name.clone(),
					kind: NodeKind::Skill,
					category: category.key.clone(),
					group,
					description: Some(skill.description.clone()),
				});
				positions.push(skill_position(category.anchor, i, skills.len(), &mut rng));
				skill_indices.push(idx);
			}

			category_nodes.push(category_idx);
			members.push(skill_indices);
		}

		let skills: Vec<usize> = members.iter().flatten().copied().collect();
		let mut set = LinkSet::new(nodes.len());

		for (&category, skill_indices) in category_nodes.iter().zip(&members) {
			for &skill in skill_indices {
				set.insert(&nodes, skill, category, LinkStrength::Branch);
			}
		}

		for skill_indices in &members {
			for pair in skill_indices.windows(2) {
				set.insert(&nodes, pair[0], pair[1], LinkStrength::Web);
			}
			if skill_indices.len() > 2 {
				let (first, last) = (skill_indices[0], skill_indices[skill_indices.len() - 1]);
				set.insert(&nodes, first, last, LinkStrength::Web);
			}
		}

		let ring = category_nodes.len();
		if ring > 1 {
			for i in 0..ring {
				let (a, b) = (category_nodes[i], category_nodes[(i + 1) % ring]);
				set.insert(&nodes, a, b, LinkStrength::Core);
			}
		}

		if !skills.is_empty() {
			for &skill in &skills {
				let mut added = 0;
				for _ in 0..CROSS_LINK_ATTEMPTS {
					if added >= CROSS_LINKS_PER_SKILL {
						break;
					}
					let other = skills[rng.index(skills.len())];
					if other == skill || nodes[other].group == nodes[skill].group {
						continue;
					}
					if set.insert(&nodes, skill, other, LinkStrength::Web) {
						added += 1;
					}
				}
			}
		}

		for &skill in &skills {
			if set.degree[skill] >= TARGET_DEGREE {
				continue;
			}
			let origin = positions[skill];
			let mut candidates: Vec<usize> = skills
				.iter()
				.copied()
				.filter(|&other| other != skill && !set.contains(&nodes, skill, other))
				.collect();
			candidates.sort_by(|a, b| {
				positions[*a]
					.distance(origin)
					.total_cmp(&positions[*b].distance(origin))
			});
			for other in candidates {
				if set.degree[skill] >= TARGET_DEGREE {
					break;
				}
				let strength = if nodes[other].group == nodes[skill].group {
					LinkStrength::Branch
				} else {
					LinkStrength::Web
				};
				set.insert(&nodes, skill, other, strength);
			}
			debug!("filled {} up to degree {}", nodes[skill].id, set.degree[skill]);
		}

		let mut adjacency = vec![Vec::new(); nodes.len()];
		for link in &set.links {
			adjacency[link.source].push(link.target);
			adjacency[link.target].push(link.source);
		}

		info!(
			"skill graph built: {} categories, {} skills, {} links",
			category_nodes.len(),
			skills.len(),
			set.links.len()
		);

		Ok(Self {
			nodes,
			links: set.links,
			adjacency,
			initial_positions: positions,
			index,
		})
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[GraphLink] {
		&self.links
	}

	pub fn initial_positions(&self) -> &[Point] {
		&self.initial_positions
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn neighbors(&self, idx: usize) -> &[usize] {
		self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn degree(&self, idx: usize) -> usize {
		self.neighbors(idx).len()
	}

	pub fn skills(&self) -> impl Iterator<Item = (usize, &GraphNode)> {
		self.nodes.iter().enumerate().filter(|(_, n)| n.is_skill())
	}

	pub fn categories(&self) -> impl Iterator<Item = (usize, &GraphNode)> {
		self.nodes.iter().enumerate().filter(|(_, n)| !n.is_skill())
	}
}
