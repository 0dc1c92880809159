use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use log::{debug, error, info};

use super::{InFlight, api_client};
use crate::api::{JobRole, MatchedCandidate};
use crate::matching::{MatchView, format_score, skill_breakdown};
use crate::selection::{Selection, SelectionEvent};

/// Ranked candidates for a job role, with a per-skill breakdown on click.
#[component]
pub fn Matcher() -> impl IntoView {
	let client = api_client();
	let roles_request = InFlight::new();
	let match_request = InFlight::new();

	let roles = RwSignal::new(Vec::<JobRole>::new());
	let roles_error = RwSignal::new(None::<String>);
	let selected_role = RwSignal::new(String::new());
	let results = RwSignal::new(MatchView::Prompt);
	let open = RwSignal::new(Selection::<String>::default());

	match roles_request.begin() {
		Ok((ticket, signal)) => {
			let client = client.clone();
			spawn_local(async move {
				let fetched = client.job_roles(&signal).await;
				if !ticket.is_current() {
					return;
				}
				match fetched {
					Ok(list) => {
						info!("{} job roles available", list.len());
						roles.set(list);
					}
					Err(err) if err.is_aborted() => {}
					Err(err) => {
						error!("failed to fetch job roles: {err}");
						roles_error.set(Some(err.user_message()));
					}
				}
			});
		}
		Err(err) => roles_error.set(Some(err.user_message())),
	}

	let search = {
		let match_request = match_request.clone();
		move |role_id: String| {
			if role_id.is_empty() {
				return;
			}
			let (ticket, signal) = match match_request.begin() {
				Ok(started) => started,
				Err(err) => {
					results.set(MatchView::Failed(err.user_message()));
					return;
				}
			};
			results.set(MatchView::Loading);
			open.set(Selection::default());
			let client = client.clone();
			spawn_local(async move {
				let fetched = client.match_by_job_role(&role_id, &signal).await;
				if !ticket.is_current() {
					debug!("discarding stale match response #{}", ticket.generation());
					return;
				}
				match fetched {
					Ok(result) => results.set(MatchView::from_result(result)),
					Err(err) if err.is_aborted() => {}
					Err(err) => {
						error!("match request for {role_id} failed: {err}");
						results.set(MatchView::Failed(format!(
							"Failed to fetch matches: {}",
							err.user_message()
						)));
					}
				}
			});
		}
	};

	let query = use_query_map();
	if let Some(role) = query.with_untracked(|q| q.get("role")) {
		selected_role.set(role.clone());
		search(role);
	}

	let clear = move |_| {
		match_request.cancel();
		selected_role.set(String::new());
		results.set(MatchView::Prompt);
		open.set(Selection::default());
	};

	let find_label = move || {
		if results.with(MatchView::is_loading) {
			"Searching..."
		} else {
			"Find Match for Role"
		}
	};

	view! {
		<main class="page-container">
			<div class="matcher-container">
				<h2>"Match Candidates to a Job Role"</h2>
				<p>
					"Select a job role and the system will rank candidates by a calculated match score."
				</p>
				<div class="job-role-select-section">
					<select
						class="job-role-select"
						on:change=move |ev| selected_role.set(event_target_value(&ev))
					>
						<option value="" disabled=true selected=move || selected_role.with(String::is_empty)>
							"-- Select a Job Role --"
						</option>
						{move || {
							roles
								.get()
								.into_iter()
								.map(|role| {
									let id = role.id.clone();
									view! {
										<option
											value=role.id
											title=role.description.unwrap_or_default()
											selected=move || selected_role.with(|s| *s == id)
										>
											{role.name}
										</option>
									}
								})
								.collect_view()
						}}
					</select>
					{move || roles_error.get().map(|msg| view! { <p class="status-message error">{msg}</p> })}
				</div>
				<div class="matcher-actions">
					<button
						class="find-match-button"
						disabled=move || {
							results.with(MatchView::is_loading) || selected_role.with(String::is_empty)
						}
						on:click=move |_| search(selected_role.get_untracked())
					>
						{find_label}
					</button>
					<button class="clear-button" on:click=clear>
						"Clear"
					</button>
				</div>
			</div>

			<div class="results-container">
				<h3>"Matching Candidates"</h3>
				{move || match results.get() {
					MatchView::Prompt => {
						view! { <p>"Select a job role and click \"Find Match\" to see results."</p> }
							.into_any()
					}
					MatchView::Loading => view! { <p>"Loading results..."</p> }.into_any(),
					MatchView::Failed(msg) => {
						view! { <p class="status-message error">{msg}</p> }.into_any()
					}
					MatchView::Empty => {
						view! { <p>"No candidates found for this job role."</p> }.into_any()
					}
					MatchView::Results { required_skills, candidates } => {
						view! {
							<div>
								<p class="skills-display">
									<strong>"Required Skills for Role: "</strong>
									{required_skills.join(", ")}
								</p>
								<ul class="candidate-list">
									{candidates
										.into_iter()
										.map(|candidate| {
											view! {
												<CandidateRow
													candidate=candidate
													required_skills=required_skills.clone()
													open=open
												/>
											}
										})
										.collect_view()}
								</ul>
							</div>
						}
							.into_any()
					}
				}}
			</div>
		</main>
	}
}

/// At most one breakdown is open; clicking the open row closes it.
fn toggle_row(open: &mut Selection<String>, name: String) {
	*open = std::mem::take(open).reduce(SelectionEvent::Select(name)).into_inner();
}

#[component]
fn CandidateRow(
	candidate: MatchedCandidate,
	required_skills: Vec<String>,
	open: RwSignal<Selection<String>>,
) -> impl IntoView {
	let bars = skill_breakdown(&candidate, &required_skills);
	let key = candidate.name.clone();
	let is_open = {
		let key = key.clone();
		Signal::derive(move || open.with(|s| s.is_selected(&key)))
	};
	let toggle = move |_| {
		let key = key.clone();
		open.update(|s| toggle_row(s, key));
	};

	view! {
		<li class="candidate-row" class:open=move || is_open.get() on:click=toggle>
			<div class="candidate-info">
				<strong>{candidate.name}</strong>
				" - "
				{candidate.title}
			</div>
			<div class="candidate-score">
				<strong>"Match Score: " {format_score(candidate.total_score)}</strong>
				" / "
				{format_score(candidate.max_score)}
			</div>
			<div
				class="skill-breakdown"
				style:display=move || if is_open.get() { "block" } else { "none" }
			>
				{bars
					.into_iter()
					.map(|bar| {
						view! {
							<div class="skill-bar">
								<span class="skill-name">{bar.skill}</span>
								<div class="bar-track">
									<div
										class="bar-fill"
										style:width=format!("{:.0}%", bar.fraction * 100.0)
									></div>
								</div>
								<span class="skill-score">
									{format!("{} / {}", format_score(bar.score), format_score(bar.max))}
								</span>
							</div>
						}
					})
					.collect_view()}
			</div>
		</li>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_open_one_at_a_time() {
		let mut open = Selection::default();
		toggle_row(&mut open, "Jane".into());
		assert!(open.is_selected(&"Jane".to_string()));

		toggle_row(&mut open, "Omar".into());
		assert!(open.is_selected(&"Omar".to_string()));
		assert!(!open.is_selected(&"Jane".to_string()));

		toggle_row(&mut open, "Omar".into());
		assert_eq!(open, Selection::default());
	}
}
