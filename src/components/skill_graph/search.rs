//! Query → focus/related sets and the primary match.

use std::collections::HashSet;

use super::model::GraphModel;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
	/// Lowercased, trimmed query the sets were computed from.
	pub query: String,
	pub matching_categories: HashSet<usize>,
	pub matching_skills: HashSet<usize>,
	pub focus: HashSet<usize>,
	pub related: HashSet<usize>,
	pub primary: Option<usize>,
}

impl SearchResult {
	pub fn compute(model: &GraphModel, raw_query: &str) -> Self {
		let query = raw_query.trim().to_lowercase();
		if query.is_empty() {
			return Self::default();
		}

		let matching_categories: HashSet<usize> = model
			.categories()
			.filter(|(_, node)| node.label.to_lowercase().contains(&query))
			.map(|(idx, _)| idx)
			.collect();
		let matched_keys: HashSet<&str> = matching_categories
			.iter()
			.filter_map(|&idx| model.node(idx))
			.map(|node| node.category.as_str())
			.collect();

		let matching_skills: HashSet<usize> = model
			.skills()
			.filter(|(_, node)| {
				node.label.to_lowercase().contains(&query)
					|| matched_keys.contains(node.category.as_str())
			})
			.map(|(idx, _)| idx)
			.collect();

		let focus: HashSet<usize> = matching_categories
			.union(&matching_skills)
			.copied()
			.collect();
		let mut related = focus.clone();
		for &idx in &focus {
			related.extend(model.neighbors(idx).iter().copied());
		}

		let primary = primary_match(model, &query, &matched_keys);

		Self {
			query,
			matching_categories,
			matching_skills,
			focus,
			related,
			primary,
		}
	}

	pub fn is_active(&self) -> bool {
		!self.query.is_empty()
	}

	pub fn is_focused(&self, idx: usize) -> bool {
		self.focus.contains(&idx)
	}

	pub fn is_related(&self, idx: usize) -> bool {
		self.related.contains(&idx)
	}
}

fn primary_match(model: &GraphModel, query: &str, matched_keys: &HashSet<&str>) -> Option<usize> {
	let labels: Vec<(usize, String)> = model
		.skills()
		.map(|(idx, node)| (idx, node.label.to_lowercase()))
		.collect();

	let find = |pred: &dyn Fn(&str) -> bool| {
		labels
			.iter()
			.find(|(_, label)| pred(label))
			.map(|(idx, _)| *idx)
	};

	find(&|label| label == query)
		.or_else(|| find(&|label| label.starts_with(query)))
		.or_else(|| find(&|label| label.contains(query)))
		.or_else(|| {
			model
				.skills()
				.find(|(_, node)| matched_keys.contains(node.category.as_str()))
				.map(|(idx, _)| idx)
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::types::{Point, SkillRecord, Taxonomy};
	use crate::data::skills::portfolio_taxonomy;

	fn model() -> GraphModel {
		GraphModel::build(&portfolio_taxonomy()).unwrap()
	}

	fn id(model: &GraphModel, idx: Option<usize>) -> Option<&str> {
		idx.and_then(|i| model.node(i)).map(|n| n.id.as_str())
	}

	#[test]
	fn empty_query_is_inert() {
		let model = model();
		for query in ["", "   "] {
			let result = SearchResult::compute(&model, query);
			assert!(!result.is_active());
			assert!(result.focus.is_empty());
			assert!(result.related.is_empty());
			assert_eq!(result.primary, None);
		}
	}

	#[test]
	fn exact_label_is_primary() {
		let model = model();
		let result = SearchResult::compute(&model, "TypeScript");
		assert_eq!(id(&model, result.primary), Some("skill:frontend:typescript"));
		let result = SearchResult::compute(&model, "  typescript ");
		assert_eq!(id(&model, result.primary), Some("skill:frontend:typescript"));
	}

	#[test]
	fn exact_match_beats_earlier_partial_match() {
		let taxonomy = Taxonomy::default().category(
			"lang",
			"Languages",
			Point::new(50.0, 30.0),
			vec![
				SkillRecord::new("JavaScript", ""),
				SkillRecord::new("Java", ""),
			],
		);
		let model = GraphModel::build(&taxonomy).unwrap();
		let result = SearchResult::compute(&model, "java");
		assert_eq!(id(&model, result.primary), Some("skill:lang:java"));
	}

	#[test]
	fn prefix_beats_substring() {
		let taxonomy = Taxonomy::default().category(
			"db",
			"Data",
			Point::new(50.0, 30.0),
			vec![
				SkillRecord::new("MS SQL Server", ""),
				SkillRecord::new("SQLite", ""),
			],
		);
		let model = GraphModel::build(&taxonomy).unwrap();
		let result = SearchResult::compute(&model, "sql");
		assert_eq!(id(&model, result.primary), Some("skill:db:sqlite"));
	}

	#[test]
	fn category_match_pulls_in_its_skills() {
		let model = model();
		let result = SearchResult::compute(&model, "database");
		let category = model.index_of("category:database").unwrap();
		assert!(result.matching_categories.contains(&category));
		for (idx, node) in model.skills() {
			if node.category == "database" {
				assert!(result.matching_skills.contains(&idx));
			}
		}
		assert_eq!(id(&model, result.primary), Some("skill:database:ms-sql-server"));
	}

	#[test]
	fn related_set_covers_neighbours_of_every_match() {
		let taxonomy = Taxonomy::default()
			.category(
				"mobile",
				"Mobile",
				Point::new(25.0, 30.0),
				vec![
					SkillRecord::new("React Native", ""),
					SkillRecord::new("Kotlin", ""),
				],
			)
			.category(
				"web",
				"Web",
				Point::new(75.0, 30.0),
				vec![
					SkillRecord::new("React JS", ""),
					SkillRecord::new("Vue", ""),
					SkillRecord::new("Svelte", ""),
				],
			);
		let model = GraphModel::build(&taxonomy).unwrap();
		let result = SearchResult::compute(&model, "react");

		let native = model.index_of("skill:mobile:react-native").unwrap();
		let js = model.index_of("skill:web:react-js").unwrap();
		assert!(result.matching_skills.contains(&native));
		assert!(result.matching_skills.contains(&js));
		assert_eq!(result.focus.len(), 2);
		for idx in [native, js] {
			for neighbour in model.neighbors(idx) {
				assert!(result.related.contains(neighbour));
			}
		}
		assert!(result.related.is_superset(&result.focus));
	}

	#[test]
	fn no_match_leaves_sets_empty() {
		let model = model();
		let result = SearchResult::compute(&model, "cobol");
		assert!(result.is_active());
		assert!(result.focus.is_empty());
		assert_eq!(result.primary, None);
	}
}
