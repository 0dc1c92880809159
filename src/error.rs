//! Error taxonomy for graph loading and backend calls.

use thiserror::Error;

/// A graph payload that does not have the expected node/edge shape.
#[derive(Debug, Error)]
pub enum DataShapeError {
	/// The payload is not an object or lacks one of the required arrays.
	#[error("payload is missing the `{0}` array")]
	MissingArray(&'static str),

	/// An element of `nodes` or `edges` does not match its record shape.
	#[error("malformed entry {index} in `{field}`: {source}")]
	MalformedElement {
		/// Which array the element came from.
		field: &'static str,
		/// Position of the element within that array.
		index: usize,
		/// Underlying decode failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Failure of a single HTTP exchange with the backend.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never produced a response (offline, CORS, DNS...).
	#[error("network error: {0}")]
	Transport(String),

	/// The request was aborted because its view went away or was superseded.
	#[error("request was cancelled")]
	Aborted,

	/// The backend answered with a non-success status.
	#[error("server returned HTTP {status}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// The `detail` field of the error body, when the backend sent one.
		detail: Option<String>,
	},

	/// The response body could not be decoded.
	#[error("unexpected response body: {0}")]
	Decode(#[from] serde_json::Error),
}

impl ApiError {
	/// Text suitable for an inline error message in the requesting view.
	pub fn user_message(&self) -> String {
		match self {
			ApiError::Status {
				detail: Some(detail),
				..
			} => detail.clone(),
			other => other.to_string(),
		}
	}

	/// Whether this error only means the caller stopped waiting.
	pub fn is_aborted(&self) -> bool {
		matches!(self, ApiError::Aborted)
	}
}

/// Everything that can make a graph explorer load fail.
#[derive(Debug, Error)]
pub enum GraphLoadError {
	/// Fetching the payload failed.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// The payload arrived but had the wrong shape.
	#[error(transparent)]
	Shape(#[from] DataShapeError),
}

impl GraphLoadError {
	/// Whether this error only means the load was cancelled.
	pub fn is_aborted(&self) -> bool {
		matches!(self, GraphLoadError::Api(err) if err.is_aborted())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_detail_is_preferred_for_display() {
		let err = ApiError::Status {
			status: 400,
			detail: Some("Invalid Credly badge URL.".into()),
		};
		assert_eq!(err.user_message(), "Invalid Credly badge URL.");

		let err = ApiError::Status {
			status: 502,
			detail: None,
		};
		assert_eq!(err.user_message(), "server returned HTTP 502");
	}

	#[test]
	fn aborted_load_is_recognised_through_wrapper() {
		assert!(GraphLoadError::from(ApiError::Aborted).is_aborted());
		assert!(!GraphLoadError::from(DataShapeError::MissingArray("nodes")).is_aborted());
	}
}
