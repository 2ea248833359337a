use leptos::prelude::*;

use crate::components::skill_graph::SkillGraph;
use crate::data::skills::portfolio_taxonomy;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let taxonomy = Signal::derive(portfolio_taxonomy);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<section id="skills" class="skills-section">
				<header class="skills-header">
					<h2>"Technical Arsenal"</h2>
					<p class="subtitle">"Drag a skill to pull it around. Search to light up related skills."</p>
				</header>
				<div class="skills-graph">
					<SkillGraph taxonomy=taxonomy />
				</div>
			</section>
		</ErrorBoundary>
	}
}
