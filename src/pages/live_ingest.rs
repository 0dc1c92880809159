use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::{error, info};

use super::{FormStatus, InFlight, StatusMessage, api_client, required_present};
use crate::api::CredlyIngestRequest;

/// Credly badge verification form.
#[component]
pub fn LiveIngest() -> impl IntoView {
	let client = api_client();
	let request = InFlight::new();

	let candidate_name = RwSignal::new(String::new());
	let candidate_title = RwSignal::new(String::new());
	let credly_url = RwSignal::new(String::new());
	let submitting = RwSignal::new(false);
	let status = RwSignal::new(None::<FormStatus>);
	let verified_skills = RwSignal::new(Vec::<String>::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let body = CredlyIngestRequest {
			candidate_name: candidate_name.get_untracked().trim().to_string(),
			candidate_title: candidate_title.get_untracked().trim().to_string(),
			credly_url: credly_url.get_untracked().trim().to_string(),
		};
		verified_skills.set(Vec::new());
		let fields = [
			body.candidate_name.as_str(),
			body.candidate_title.as_str(),
			body.credly_url.as_str(),
		];
		if !required_present(&fields) {
			status.set(Some(FormStatus::Error("All fields are required.".into())));
			return;
		}
		let (ticket, signal) = match request.begin() {
			Ok(started) => started,
			Err(err) => {
				status.set(Some(FormStatus::Error(err.user_message())));
				return;
			}
		};
		submitting.set(true);
		status.set(None);
		let client = client.clone();
		spawn_local(async move {
			let result = client.ingest_credly_badge(&body, &signal).await;
			if !ticket.is_current() {
				return;
			}
			submitting.set(false);
			match result {
				Ok(response) => {
					info!(
						"credly badge ingested for {:?}: {} skills",
						body.candidate_name,
						response.extracted_skills.len()
					);
					verified_skills.set(response.extracted_skills);
					status.set(Some(FormStatus::Success(response.message)));
					candidate_name.set(String::new());
					candidate_title.set(String::new());
					credly_url.set(String::new());
				}
				Err(err) if err.is_aborted() => {}
				Err(err) => {
					error!("failed to ingest credly badge: {err}");
					status.set(Some(FormStatus::Error(format!("Error: {}", err.user_message()))));
				}
			}
		});
	};

	view! {
		<div class="page-container">
			<h1>"Live Credential Ingestion"</h1>
			<p>
				"Enter a candidate's name and a public Credly badge URL. The badge is verified against Credly and its skills are added to the candidate in the knowledge graph."
			</p>

			<form on:submit=on_submit class="item-card add-candidate-form">
				<div class="form-group">
					<label for="name">"Candidate Name"</label>
					<input type="text" id="name" placeholder="e.g., Jane Doe" bind:value=candidate_name />
				</div>
				<div class="form-group">
					<label for="title">"Candidate Title"</label>
					<input
						type="text"
						id="title"
						placeholder="e.g., AWS Cloud Specialist"
						bind:value=candidate_title
					/>
				</div>
				<div class="form-group">
					<label for="credly-url">"Public Credly Badge URL"</label>
					<input
						type="url"
						id="credly-url"
						placeholder="https://www.credly.com/badges/..."
						bind:value=credly_url
					/>
				</div>
				<button type="submit" class="find-match-button" disabled=move || submitting.get()>
					{move || if submitting.get() { "Ingesting..." } else { "Ingest & Verify Credential" }}
				</button>
			</form>

			<StatusMessage status=status>
				{move || {
					verified_skills
						.with(|skills| !skills.is_empty())
						.then(|| {
							view! {
								<div class="extracted-skills-list">
									<strong>"Verified Skills Added:"</strong>
									<ul>
										{verified_skills
											.get()
											.into_iter()
											.map(|skill| view! { <li>{skill}</li> })
											.collect_view()}
									</ul>
								</div>
							}
						})
				}}
				<A href="/graph-explorer" attr:class="status-link">
					"Go to Graph Explorer to see the new connections!"
				</A>
			</StatusMessage>
		</div>
	}
}
