use leptos::prelude::*;
use leptos_router::components::A;

const SECTIONS: [(&str, &str, &str); 4] = [
	(
		"/graph-explorer",
		"Graph Explorer",
		"Browse candidates, projects, skills and job roles as one connected graph.",
	),
	(
		"/matcher",
		"Matcher",
		"Pick a job role and rank candidates by how well their skills cover it.",
	),
	(
		"/add-candidate",
		"Add Candidate",
		"Create a candidate from a bio and hand-picked skills.",
	),
	(
		"/live-ingest",
		"Live Ingest",
		"Verify a Credly badge and attach its skills to a candidate.",
	),
];

/// Landing page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="page-container">
			<h1>"Welcome to Synapse"</h1>
			<p>"The talent matching and exploration platform."</p>
			<div class="home-cards">
				{SECTIONS
					.into_iter()
					.map(|(href, title, blurb)| {
						view! {
							<div class="item-card">
								<h2>
									<A href=href>{title}</A>
								</h2>
								<p>{blurb}</p>
							</div>
						}
					})
					.collect_view()}
			</div>
		</div>
	}
}
