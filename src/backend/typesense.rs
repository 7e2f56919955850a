use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use frond_search_api::{BackendError, MultiSearchRequest, MultiSearchResponse, SearchBackend};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

/// Header carrying the Typesense API key.
pub const API_KEY_HEADER: &str = "x-typesense-api-key";

/// Longest error body echoed back in a [`BackendError::Status`].
const MAX_ERROR_BODY: usize = 256;

/// [`SearchBackend`] that forwards requests to a Typesense server's
/// `multi_search` endpoint.
#[derive(Debug, Clone)]
pub struct TypesenseBackend {
	client: reqwest::Client,
	endpoint: reqwest::Url,
}

impl TypesenseBackend {
	pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
		let endpoint = multi_search_url(base_url)?;
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.default_headers(default_headers(api_key)?)
			.build()
			.context("failed to build HTTP client")?;
		Ok(Self { client, endpoint })
	}

	pub fn endpoint(&self) -> &reqwest::Url {
		&self.endpoint
	}
}

fn multi_search_url(base_url: &str) -> Result<reqwest::Url> {
	let base = base_url.trim().trim_end_matches('/');
	if base.is_empty() {
		return Err(anyhow!("typesense URL must not be empty"));
	}
	let url = reqwest::Url::parse(&format!("{base}/multi_search"))
		.with_context(|| format!("invalid typesense URL: {base_url}"))?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(anyhow!("unsupported typesense URL scheme: {other}")),
	}
}

fn default_headers(api_key: Option<&str>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	if let Some(key) = api_key {
		let mut value = HeaderValue::from_str(key).context("invalid typesense API key")?;
		value.set_sensitive(true);
		headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
	}
	Ok(headers)
}

fn truncate_body(body: &str) -> String {
	match body.char_indices().nth(MAX_ERROR_BODY) {
		Some((end, _)) => format!("{}…", &body[..end]),
		None => body.to_string(),
	}
}

#[async_trait]
impl SearchBackend for TypesenseBackend {
	async fn multi_search(
		&self,
		request: &MultiSearchRequest,
	) -> Result<MultiSearchResponse, BackendError> {
		debug!(url = %self.endpoint, searches = request.len(), "sending multi_search");
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(request)
			.send()
			.await
			.map_err(|err| BackendError::Transport(err.to_string()))?;

		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|err| BackendError::Transport(err.to_string()))?;

		if !status.is_success() {
			warn!(status = status.as_u16(), "typesense rejected multi_search");
			return Err(BackendError::Status {
				status: status.as_u16(),
				message: truncate_body(&body),
			});
		}

		Ok(serde_json::from_str(&body)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_appends_multi_search() {
		let backend =
			TypesenseBackend::new("http://localhost:8108/", Some("key"), Duration::from_secs(1))
				.expect("valid backend");
		assert_eq!(backend.endpoint().as_str(), "http://localhost:8108/multi_search");
	}

	#[test]
	fn endpoint_keeps_path_prefixes() {
		let url = multi_search_url("https://search.example.com/typesense").expect("valid url");
		assert_eq!(url.as_str(), "https://search.example.com/typesense/multi_search");
	}

	#[test]
	fn rejects_unusable_urls() {
		assert!(multi_search_url("   ").is_err());
		assert!(multi_search_url("ftp://search.example.com").is_err());
		assert!(multi_search_url("not a url").is_err());
	}

	#[test]
	fn api_key_header_is_sensitive() {
		let headers = default_headers(Some("secret")).expect("headers");
		let value = headers.get(API_KEY_HEADER).expect("api key header");
		assert!(value.is_sensitive());
		assert_eq!(value, "secret");
		assert_eq!(headers.get(CONTENT_TYPE).expect("content type"), "application/json");

		let headers = default_headers(None).expect("headers");
		assert!(headers.get(API_KEY_HEADER).is_none());
	}

	#[test]
	fn api_key_with_newline_is_rejected() {
		assert!(default_headers(Some("bad\nkey")).is_err());
	}

	#[test]
	fn long_error_bodies_are_truncated() {
		let body = "x".repeat(1_000);
		let truncated = truncate_body(&body);
		assert_eq!(truncated.chars().count(), MAX_ERROR_BODY + 1);
		assert!(truncated.ends_with('…'));
		assert_eq!(truncate_body("short"), "short");
	}

	#[tokio::test]
	async fn unreachable_server_is_a_transport_error() {
		// Port 9 (discard) on localhost is closed in test environments.
		let backend = TypesenseBackend::new("http://127.0.0.1:9", None, Duration::from_millis(500))
			.expect("valid backend");
		let err = backend
			.multi_search(&MultiSearchRequest::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::Transport(_)));
	}
}
