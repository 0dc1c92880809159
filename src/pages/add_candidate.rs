use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::{debug, error, info};

use super::{FormStatus, InFlight, StatusMessage, api_client, app_config, required_present};
use crate::api::ProcessTextRequest;
use crate::autocomplete::{SkillTags, filter_suggestions, should_query};
use crate::debounce::{BrowserScheduler, Debouncer};

/// Candidate form with debounced skill autocomplete.
#[component]
pub fn AddCandidate() -> impl IntoView {
	let config = app_config();
	let client = api_client();
	let suggest_request = InFlight::new();
	let submit_request = InFlight::new();
	let debouncer = StoredValue::new_local(Debouncer::new(
		config.autocomplete_debounce_ms,
		BrowserScheduler,
	));
	on_cleanup(move || debouncer.update_value(|d| d.cancel()));

	let name = RwSignal::new(String::new());
	let title = RwSignal::new(String::new());
	let bio = RwSignal::new(String::new());
	let skill_input = RwSignal::new(String::new());
	let suggestions = RwSignal::new(Vec::<String>::new());
	let tags = RwSignal::new(SkillTags::default());
	let submitting = RwSignal::new(false);
	let status = RwSignal::new(None::<FormStatus>);

	let fetch_suggestions = {
		let client = client.clone();
		let suggest_request = suggest_request.clone();
		move |query: String| {
			let Ok((ticket, signal)) = suggest_request.begin() else {
				return;
			};
			let client = client.clone();
			spawn_local(async move {
				let fetched = client.autocomplete_skills(&query, &signal).await;
				if !ticket.is_current() {
					debug!("discarding stale suggestions for {query:?}");
					return;
				}
				match fetched {
					Ok(list) => suggestions.set(tags.with_untracked(|t| filter_suggestions(list, t))),
					Err(err) if err.is_aborted() => {}
					Err(err) => {
						error!("failed to fetch skill suggestions: {err}");
						suggestions.set(Vec::new());
					}
				}
			});
		}
	};

	let stop_suggesting = {
		let suggest_request = suggest_request.clone();
		move || {
			debouncer.update_value(|d| d.cancel());
			suggest_request.cancel();
			suggestions.set(Vec::new());
		}
	};

	let on_skill_input = {
		let stop_suggesting = stop_suggesting.clone();
		let min_chars = config.autocomplete_min_chars;
		move |query: String| {
			skill_input.set(query.clone());
			if !should_query(&query, min_chars) {
				stop_suggesting();
				return;
			}
			let fetch = fetch_suggestions.clone();
			debouncer.update_value(|d| d.submit(move || fetch(query)));
		}
	};

	let add_tag = move |skill: String| {
		tags.update(|t| {
			t.add(&skill);
		});
		skill_input.set(String::new());
		stop_suggesting();
	};

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let body = ProcessTextRequest {
			name: name.get_untracked().trim().to_string(),
			title: title.get_untracked().trim().to_string(),
			text: bio.get_untracked(),
			manual_skills: tags.with_untracked(SkillTags::to_vec),
		};
		if !required_present(&[body.name.as_str(), body.title.as_str()]) {
			status.set(Some(FormStatus::Error(
				"Error: Name and Title fields are required.".into(),
			)));
			return;
		}
		let (ticket, signal) = match submit_request.begin() {
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
			let result = client.process_text(&body, &signal).await;
			if !ticket.is_current() {
				return;
			}
			submitting.set(false);
			match result {
				Ok(_) => {
					info!("candidate {:?} added with {} tagged skills", body.name, body.manual_skills.len());
					status.set(Some(FormStatus::Success(format!(
						"Candidate \"{}\" added to the graph.",
						body.name
					))));
					name.set(String::new());
					title.set(String::new());
					bio.set(String::new());
					tags.update(SkillTags::clear);
				}
				Err(err) if err.is_aborted() => {}
				Err(err) => {
					error!("failed to add candidate: {err}");
					status.set(Some(FormStatus::Error(format!(
						"Error: Could not add candidate. {}",
						err.user_message()
					))));
				}
			}
		});
	};

	view! {
		<div class="page-container">
			<h1>"Add a New Candidate"</h1>

			<form on:submit=on_submit class="item-card add-candidate-form">
				<div class="form-group">
					<label for="name">"Candidate Name"</label>
					<input type="text" id="name" placeholder="e.g., Jane Doe" bind:value=name />
				</div>
				<div class="form-group">
					<label for="title">"Job Title"</label>
					<input
						type="text"
						id="title"
						placeholder="e.g., Full Stack Developer"
						bind:value=title
					/>
				</div>

				<div class="form-group">
					<label for="manual-skills">"Manually Tag Skills"</label>
					<div class="autocomplete-container">
						<input
							type="text"
							id="manual-skills"
							autocomplete="off"
							placeholder="Start typing a skill (e.g., Ja)"
							prop:value=move || skill_input.get()
							on:input=move |ev| on_skill_input(event_target_value(&ev))
						/>
						<ul
							class="suggestions-list"
							style:display=move || {
								if suggestions.with(Vec::is_empty) { "none" } else { "block" }
							}
						>
							{move || {
								suggestions
									.get()
									.into_iter()
									.map(|skill| {
										let add_tag = add_tag.clone();
										let picked = skill.clone();
										view! { <li on:click=move |_| add_tag(picked.clone())>{skill}</li> }
									})
									.collect_view()
							}}
						</ul>
					</div>
					<div class="skill-tags-container">
						{move || {
							tags.get()
								.as_slice()
								.iter()
								.map(|skill| {
									let removed = skill.clone();
									view! {
										<div class="skill-tag">
											{skill.clone()}
											<span
												class="remove-tag"
												on:click=move |_| {
													tags.update(|t| {
														t.remove(&removed);
													});
												}
											>
												"x"
											</span>
										</div>
									}
								})
								.collect_view()
						}}
					</div>
				</div>

				<div class="form-group">
					<label for="bio">"Bio / Resume Summary (for automatic skill extraction)"</label>
					<textarea
						id="bio"
						rows="6"
						placeholder="Paste a paragraph about the candidate's experience and skills here..."
						prop:value=move || bio.get()
						on:input=move |ev| bio.set(event_target_value(&ev))
					></textarea>
				</div>

				<button type="submit" class="find-match-button" disabled=move || submitting.get()>
					{move || if submitting.get() { "Processing..." } else { "Add Candidate to Graph" }}
				</button>
			</form>

			<StatusMessage status=status>
				<A href="/graph-explorer" attr:class="status-link">
					"See the candidate in the Graph Explorer"
				</A>
			</StatusMessage>
		</div>
	}
}
