use leptos::prelude::*;
use leptos_router::components::A;

const LINKS: [(&str, &str); 5] = [
	("/", "Home"),
	("/matcher", "Matcher"),
	("/add-candidate", "Add Candidate"),
	("/live-ingest", "Live Ingest"),
	("/graph-explorer", "Explorer"),
];

#[component]
pub fn Navbar() -> impl IntoView {
	view! {
		<nav class="navbar">
			<A href="/" attr:class="navbar-brand">
				"Synapse"
			</A>
			<ul class="navbar-nav">
				{LINKS
					.into_iter()
					.map(|(href, label)| view! { <li><A href=href>{label}</A></li> })
					.collect_view()}
			</ul>
		</nav>
	}
}
