use thiserror::Error;

/// Failures surfaced by a [`SearchBackend`](crate::SearchBackend).
///
/// The pipeline never retries on any of these; it clears its results and logs
/// the error instead.
#[derive(Debug, Error)]
pub enum BackendError {
	/// The transport failed before a response was received.
	#[error("search transport failed: {0}")]
	Transport(String),

	/// The backend answered with a non-success status.
	#[error("search backend returned status {status}: {message}")]
	Status { status: u16, message: String },

	/// The response body could not be decoded.
	#[error("failed to decode search response: {0}")]
	Decode(String),

	/// One collection failed inside an otherwise successful response.
	#[error("collection '{collection}' failed: {message}")]
	Collection { collection: String, message: String },

	/// A collection named in the request does not exist on the backend.
	#[error("unknown collection '{0}'")]
	UnknownCollection(String),

	/// The response did not contain one result per requested collection.
	#[error("expected {expected} collection results, received {received}")]
	ResultCountMismatch { expected: usize, received: usize },
}

impl From<serde_json::Error> for BackendError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}
