use crate::components::skill_graph::{Point, SkillRecord, Taxonomy};

/// The portfolio's skill taxonomy, in display order.
pub fn portfolio_taxonomy() -> Taxonomy {
	Taxonomy::default()
		.category(
			"frontend",
			"Frontend Development",
			Point::new(22.0, 22.0),
			vec![
				SkillRecord::new("HTML", "Semantic markup for accessible pages."),
				SkillRecord::new("CSS", "Layouts, animation and responsive styling."),
				SkillRecord::new(
					"JavaScript",
					"DOM work, async flows and browser APIs without a framework.",
				),
				SkillRecord::new(
					"TypeScript",
					"Typed front ends with strict compiler settings and shared models.",
				),
				SkillRecord::new(
					"React.js",
					"Component libraries, hooks and animation-heavy single-page apps.",
				),
				SkillRecord::new(
					"Tailwind CSS",
					"Utility-first design systems and custom themes.",
				),
			],
		)
		.category(
			"backend",
			"Backend Engineering",
			Point::new(78.0, 24.0),
			vec![
				SkillRecord::new("C#", "Primary backend language for services and tooling."),
				SkillRecord::new(".NET Core", "Cross-platform services, middleware and hosting."),
				SkillRecord::new("Web API", "REST endpoints with versioning, validation and auth."),
				SkillRecord::new("FastAPI", "Lightweight Python services with typed request models."),
				SkillRecord::new("Python", "Scripting, automation and data processing."),
				SkillRecord::new(
					"Entity Framework",
					"Code-first schemas, migrations and query tuning.",
				),
			],
		)
		.category(
			"database",
			"Database Architecture",
			Point::new(82.0, 76.0),
			vec![
				SkillRecord::new(
					"MS SQL Server",
					"Schema design, stored procedures and index tuning.",
				),
				SkillRecord::new("PostgreSQL", "Relational modelling, JSONB and window functions."),
			],
		)
		.category(
			"core",
			"Core Concepts",
			Point::new(50.0, 86.0),
			vec![
				SkillRecord::new("OOP", "Encapsulation, composition and SOLID design."),
				SkillRecord::new("Collections", "Choosing the right data structure for the access pattern."),
				SkillRecord::new("Multithreading", "Tasks, synchronization and async pipelines."),
			],
		)
		.category(
			"tools",
			"DevOps & Tools",
			Point::new(18.0, 76.0),
			vec![
				SkillRecord::new("Swagger", "OpenAPI documentation generated from the code."),
				SkillRecord::new("Postman", "Collections and scripted API test runs."),
			],
		)
}
