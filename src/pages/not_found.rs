use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page-container">
			<h1>"Page not found"</h1>
			<p>
				"Nothing lives at this address. "
				<A href="/">"Back to the start page"</A>
			</p>
		</div>
	}
}
