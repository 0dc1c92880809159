pub mod add_candidate;
pub mod graph_explorer;
pub mod home;
pub mod live_ingest;
pub mod matcher;
pub mod not_found;

use leptos::prelude::*;
use web_sys::AbortSignal;

use crate::api::{AbortGuard, ApiClient};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::request::{RequestTracker, Ticket};

/// The app config from context, or defaults when none was provided.
fn app_config() -> AppConfig {
	use_context::<AppConfig>().unwrap_or_else(AppConfig::from_build_env)
}

fn api_client() -> ApiClient {
	ApiClient::new(&app_config().api_base_url)
}

/// One view's last-request-wins slot.
///
/// Starting a request aborts the previous one; unmounting the owning view
/// aborts the current one and makes its ticket stale.
#[derive(Clone)]
struct InFlight {
	tracker: RequestTracker,
	guard: StoredValue<Option<AbortGuard>, LocalStorage>,
}

impl InFlight {
	fn new() -> Self {
		let slot = Self {
			tracker: RequestTracker::new(),
			guard: StoredValue::new_local(None),
		};
		on_cleanup({
			let slot = slot.clone();
			move || slot.cancel()
		});
		slot
	}

	fn begin(&self) -> Result<(Ticket, AbortSignal), ApiError> {
		let guard = AbortGuard::new()?;
		let signal = guard.signal();
		let ticket = self.tracker.begin();
		self.guard.set_value(Some(guard));
		Ok((ticket, signal))
	}

	fn cancel(&self) {
		self.tracker.invalidate();
		self.guard.set_value(None);
	}
}

/// Outcome line under a form.
#[derive(Clone, Debug, PartialEq)]
enum FormStatus {
	Success(String),
	Error(String),
}

#[component]
fn StatusMessage(status: RwSignal<Option<FormStatus>>, children: ChildrenFn) -> impl IntoView {
	move || {
		let children = children.clone();
		status.get().map(|s| {
			let (class, message, success) = match s {
				FormStatus::Success(m) => ("status-message success", m, true),
				FormStatus::Error(m) => ("status-message error", m, false),
			};
			view! {
				<div class=class>
					<p>{message}</p>
					{success.then(|| children())}
				</div>
			}
		})
	}
}

fn required_present(fields: &[&str]) -> bool {
	fields.iter().all(|f| !f.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_fields_are_missing() {
		assert!(required_present(&["Jane", "Engineer"]));
		assert!(!required_present(&["Jane", "  "]));
		assert!(!required_present(&[""]));
	}
}
