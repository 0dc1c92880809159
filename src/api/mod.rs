//! HTTP client for the matching backend over the browser `fetch` API.

mod types;

use log::{debug, error};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Headers, Request, RequestInit, Response};

pub use types::*;

use crate::error::ApiError;

/// Aborts its in-flight request when dropped.
///
/// Views keep the guard of their latest request; replacing or dropping it
/// cancels the previous fetch.
pub struct AbortGuard {
	controller: AbortController,
}

impl AbortGuard {
	pub fn new() -> Result<Self, ApiError> {
		let controller = AbortController::new().map_err(|e| ApiError::Transport(js_message(&e)))?;
		Ok(Self { controller })
	}

	pub fn signal(&self) -> AbortSignal {
		self.controller.signal()
	}
}

impl Drop for AbortGuard {
	fn drop(&mut self) {
		self.controller.abort();
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Raw `{nodes, edges}` payload; shape checking is left to the graph adapter.
	pub async fn graph_data(&self, signal: &AbortSignal) -> Result<Value, ApiError> {
		self.get_json("/graph-explorer/data", signal).await
	}

	pub async fn job_roles(&self, signal: &AbortSignal) -> Result<Vec<JobRole>, ApiError> {
		self.get_json("/job-roles", signal).await
	}

	pub async fn match_by_job_role(
		&self,
		role_id: &str,
		signal: &AbortSignal,
	) -> Result<MatchResult, ApiError> {
		self.get_json(&match_path(role_id), signal).await
	}

	pub async fn autocomplete_skills(
		&self,
		query: &str,
		signal: &AbortSignal,
	) -> Result<Vec<SkillSuggestion>, ApiError> {
		self.get_json(&autocomplete_path(query), signal).await
	}

	pub async fn process_text(
		&self,
		body: &ProcessTextRequest,
		signal: &AbortSignal,
	) -> Result<ProcessTextResponse, ApiError> {
		self.post_json("/process/text", body, signal).await
	}

	pub async fn ingest_credly_badge(
		&self,
		body: &CredlyIngestRequest,
		signal: &AbortSignal,
	) -> Result<CredlyIngestResponse, ApiError> {
		self.post_json("/ingest/credly-badge", body, signal).await
	}

	pub async fn get_json<T: DeserializeOwned>(
		&self,
		path: &str,
		signal: &AbortSignal,
	) -> Result<T, ApiError> {
		let opts = RequestInit::new();
		opts.set_method("GET");
		opts.set_signal(Some(signal));
		self.send("GET", path, &opts, signal).await
	}

	pub async fn post_json<B: Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
		signal: &AbortSignal,
	) -> Result<T, ApiError> {
		let payload = serde_json::to_string(body)?;
		let headers = Headers::new().map_err(|e| ApiError::Transport(js_message(&e)))?;
		headers
			.set("Content-Type", "application/json")
			.map_err(|e| ApiError::Transport(js_message(&e)))?;

		let opts = RequestInit::new();
		opts.set_method("POST");
		opts.set_headers(&headers);
		opts.set_body(&JsValue::from_str(&payload));
		opts.set_signal(Some(signal));
		self.send("POST", path, &opts, signal).await
	}

	async fn send<T: DeserializeOwned>(
		&self,
		method: &str,
		path: &str,
		opts: &RequestInit,
		signal: &AbortSignal,
	) -> Result<T, ApiError> {
		let url = self.url(path);
		debug!("{method} {url}");
		let transport = |e: JsValue| {
			if signal.aborted() {
				ApiError::Aborted
			} else {
				ApiError::Transport(js_message(&e))
			}
		};

		let request = Request::new_with_str_and_init(&url, opts).map_err(transport)?;
		let window = web_sys::window().ok_or_else(|| ApiError::Transport("no window".into()))?;
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(transport)?
			.dyn_into()
			.map_err(|_| ApiError::Transport("fetch did not yield a Response".into()))?;

		let text = JsFuture::from(response.text().map_err(transport)?)
			.await
			.map_err(transport)?
			.as_string()
			.unwrap_or_default();

		if !response.ok() {
			let err = ApiError::Status {
				status: response.status(),
				detail: error_detail(&text),
			};
			error!("{url}: {err}");
			return Err(err);
		}
		Ok(serde_json::from_str(&text)?)
	}
}

fn match_path(role_id: &str) -> String {
	format!("/match/by-job-role/{}", urlencoding::encode(role_id))
}

fn autocomplete_path(query: &str) -> String {
	format!("/skills/autocomplete?q={}", urlencoding::encode(query))
}

/// The `detail` field of a FastAPI-style error body, as text.
fn error_detail(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;
	match value.get("detail")? {
		Value::String(s) => Some(s.clone()),
		other => Some(other.to_string()),
	}
}

fn js_message(value: &JsValue) -> String {
	if let Some(err) = value.dyn_ref::<js_sys::Error>() {
		return String::from(err.message());
	}
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn path_segments_and_queries_are_encoded() {
		assert_eq!(match_path("4:abc:12"), "/match/by-job-role/4%3Aabc%3A12");
		assert_eq!(autocomplete_path("C++ dev"), "/skills/autocomplete?q=C%2B%2B%20dev");
	}

	#[test]
	fn base_url_is_joined_without_double_slash() {
		let client = ApiClient::new("http://localhost:8000/");
		assert_eq!(client.url("/job-roles"), "http://localhost:8000/job-roles");
	}

	#[test]
	fn detail_is_read_from_error_bodies() {
		assert_eq!(
			error_detail(r#"{"detail": "Credly server returned an error: 404"}"#).as_deref(),
			Some("Credly server returned an error: 404")
		);
		assert_eq!(
			error_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#).as_deref(),
			Some(r#"[{"loc":["body"],"msg":"field required"}]"#)
		);
		assert_eq!(error_detail("Internal Server Error"), None);
		assert_eq!(error_detail(r#"{"message": "nope"}"#), None);
	}
}
