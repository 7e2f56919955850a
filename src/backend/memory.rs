use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use frizbee::{Config, match_list};
use frond_search_api::{
	BackendError, CollectionQuery, CollectionResult, Hit, MultiSearchRequest, MultiSearchResponse,
	SearchBackend,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

/// Datasets at or above this size are prefiltered before scoring.
const PREFILTER_ENABLE_THRESHOLD: usize = 1_000;

/// Documents keyed by collection name, in file order.
pub type Corpus = IndexMap<String, Vec<Map<String, Value>>>;

/// Fuzzy search over an in-memory corpus.
///
/// Documents are scored against every `query_by` field; the best weighted field
/// score ranks the document. Highlights are never produced, so consumers fall
/// back to wrapping matches themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
	corpus: Corpus,
}

impl MemoryBackend {
	pub fn new(corpus: Corpus) -> Self {
		Self { corpus }
	}

	/// Load a corpus shaped as `{ "<collection>": [ { ...document } ] }`.
	pub fn from_path(path: &Path) -> Result<Self> {
		let contents = fs::read_to_string(path)
			.with_context(|| format!("failed to read corpus {}", path.display()))?;
		let corpus: Corpus = serde_json::from_str(&contents)
			.with_context(|| format!("failed to parse corpus {}", path.display()))?;
		debug!(
			path = %path.display(),
			collections = corpus.len(),
			"loaded search corpus"
		);
		Ok(Self::new(corpus))
	}

	pub fn collections(&self) -> impl Iterator<Item = &str> {
		self.corpus.keys().map(String::as_str)
	}

	fn search_collection(&self, query: &CollectionQuery) -> Result<CollectionResult, BackendError> {
		let documents = self
			.corpus
			.get(&query.collection)
			.ok_or_else(|| BackendError::UnknownCollection(query.collection.clone()))?;

		let needle = query.q.trim();
		let mut ranked = rank(needle, documents, query);
		ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

		let found = ranked.len() as u64;
		let skip = query.page.saturating_sub(1).saturating_mul(query.per_page);
		let hits = ranked
			.into_iter()
			.skip(skip)
			.take(query.per_page)
			.filter_map(|(index, _)| documents.get(index))
			.map(|document| Hit {
				document: document.clone(),
				highlights: Vec::new(),
			})
			.collect();

		Ok(CollectionResult {
			hits,
			found: Some(found),
			error: None,
		})
	}
}

#[async_trait]
impl SearchBackend for MemoryBackend {
	async fn multi_search(
		&self,
		request: &MultiSearchRequest,
	) -> Result<MultiSearchResponse, BackendError> {
		let results = request
			.searches
			.iter()
			.map(|query| self.search_collection(query))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(MultiSearchResponse { results })
	}
}

/// Score every document and keep those that matched, as `(index, score)`.
fn rank(needle: &str, documents: &[Map<String, Value>], query: &CollectionQuery) -> Vec<(usize, u32)> {
	if needle.is_empty() {
		return Vec::new();
	}

	let fields: Vec<&str> = query.fields().collect();
	let weights = parse_weights(query.query_by_weights.as_deref(), fields.len());
	let config = config_for_query(needle, documents.len());
	let mut best = vec![0u32; documents.len()];

	for (field, weight) in fields.iter().zip(&weights) {
		let haystacks: Vec<String> = documents
			.iter()
			.map(|document| field_text(document, field))
			.collect();
		let haystacks: Vec<&str> = haystacks.iter().map(String::as_str).collect();
		for entry in match_list(needle, &haystacks, &config) {
			if entry.score == 0 {
				continue;
			}
			let index = entry.index as usize;
			let score = u32::from(entry.score) * weight;
			if let Some(slot) = best.get_mut(index)
				&& score > *slot
			{
				*slot = score;
			}
		}
	}

	best.into_iter()
		.enumerate()
		.filter(|(_, score)| *score > 0)
		.collect()
}

fn field_text(document: &Map<String, Value>, field: &str) -> String {
	match document.get(field) {
		Some(Value::String(text)) => text.clone(),
		Some(Value::Number(number)) => number.to_string(),
		Some(Value::Array(values)) => values
			.iter()
			.filter_map(Value::as_str)
			.collect::<Vec<_>>()
			.join(" "),
		_ => String::new(),
	}
}

/// Field weights from a comma-separated list; missing or invalid entries
/// weigh 1.
fn parse_weights(weights: Option<&str>, fields: usize) -> Vec<u32> {
	let mut parsed: Vec<u32> = weights
		.unwrap_or_default()
		.split(',')
		.map(|weight| weight.trim().parse().unwrap_or(1).max(1))
		.take(fields)
		.collect();
	parsed.resize(fields, 1);
	parsed
}

fn config_for_query(query: &str, dataset_len: usize) -> Config {
	let length = query.chars().count();
	let mut allowed_typos: u16 = match length {
		0 | 1 => 0,
		2..=4 => 1,
		5..=7 => 2,
		8..=12 => 3,
		_ => 4,
	};
	if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
		allowed_typos = allowed_typos.min(max_reasonable);
	}

	Config {
		prefilter: dataset_len >= PREFILTER_ENABLE_THRESHOLD,
		max_typos: Some(allowed_typos),
		sort: false,
		..Config::default()
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use frond_search_api::CollectionQuery;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn corpus() -> Corpus {
		serde_json::from_value(json!({
			"threads": [
				{"id": "1", "title": "Async rust patterns", "body": "tokio and futures"},
				{"id": "2", "title": "Hiking map", "body": "pile of log"},
				{"id": "3", "title": "Rusty tools", "body": "restoring old rust"},
			],
			"users": [
				{"id": "u1", "username": "ada", "first_name": "Ada", "last_name": "Lovelace"},
			],
		}))
		.expect("valid corpus")
	}

	fn query(collection: &str, q: &str, per_page: usize, page: usize) -> CollectionQuery {
		CollectionQuery {
			collection: collection.into(),
			q: q.into(),
			query_by: "title,body".into(),
			query_by_weights: Some("2,1".into()),
			per_page,
			page,
			prefix: true,
			highlight_full_fields: "title,body".into(),
			highlight_affix_num_tokens: 8,
			highlight_start_tag: "<mark>".into(),
			highlight_end_tag: "</mark>".into(),
			drop_tokens_threshold: 1,
			num_typos: 2,
		}
	}

	fn ids(result: &CollectionResult) -> Vec<String> {
		result
			.hits
			.iter()
			.filter_map(|hit| hit.text("id"))
			.collect()
	}

	#[tokio::test]
	async fn returns_one_result_per_collection_without_highlights() {
		let backend = MemoryBackend::new(corpus());
		let request = MultiSearchRequest {
			searches: vec![query("threads", "rust", 10, 1), query("users", "rust", 10, 1)],
		};
		let response = backend.multi_search(&request).await.expect("search succeeds");

		assert_eq!(response.results.len(), 2);
		let threads = &response.results[0];
		let mut matched = ids(threads);
		matched.sort();
		assert_eq!(matched, vec!["1", "3"]);
		assert_eq!(threads.found, Some(2));
		assert!(threads.hits.iter().all(|hit| hit.highlights.is_empty()));
	}

	#[tokio::test]
	async fn pages_through_ranked_hits() {
		let backend = MemoryBackend::new(corpus());
		let first = backend
			.multi_search(&MultiSearchRequest {
				searches: vec![query("threads", "rust", 1, 1)],
			})
			.await
			.expect("first page");
		let second = backend
			.multi_search(&MultiSearchRequest {
				searches: vec![query("threads", "rust", 1, 2)],
			})
			.await
			.expect("second page");
		let third = backend
			.multi_search(&MultiSearchRequest {
				searches: vec![query("threads", "rust", 1, 3)],
			})
			.await
			.expect("third page");

		assert_eq!(first.results[0].hits.len(), 1);
		assert_eq!(second.results[0].hits.len(), 1);
		assert_ne!(ids(&first.results[0]), ids(&second.results[0]));
		assert!(third.results[0].hits.is_empty());
	}

	#[tokio::test]
	async fn unknown_collection_fails_the_request() {
		let backend = MemoryBackend::new(corpus());
		let err = backend
			.multi_search(&MultiSearchRequest {
				searches: vec![query("listings", "rust", 5, 1)],
			})
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::UnknownCollection(name) if name == "listings"));
	}

	#[tokio::test]
	async fn blank_query_matches_nothing() {
		let backend = MemoryBackend::new(corpus());
		let response = backend
			.multi_search(&MultiSearchRequest {
				searches: vec![query("threads", "  ", 5, 1)],
			})
			.await
			.expect("search succeeds");
		assert!(response.results[0].hits.is_empty());
		assert_eq!(response.results[0].found, Some(0));
	}

	#[test]
	fn loads_corpus_from_file() {
		let mut file = tempfile::NamedTempFile::new().expect("temp file");
		write!(file, r#"{{"threads": [{{"id": "9", "title": "hello"}}]}}"#).expect("write corpus");

		let backend = MemoryBackend::from_path(file.path()).expect("corpus loads");
		assert_eq!(backend.collections().collect::<Vec<_>>(), vec!["threads"]);
	}

	#[test]
	fn malformed_corpus_reports_the_path() {
		let mut file = tempfile::NamedTempFile::new().expect("temp file");
		write!(file, "not json").expect("write corpus");

		let err = MemoryBackend::from_path(file.path()).unwrap_err();
		assert!(err.to_string().contains("failed to parse corpus"));
	}

	#[test]
	fn weights_default_to_one() {
		assert_eq!(parse_weights(Some("3, x"), 3), vec![3, 1, 1]);
		assert_eq!(parse_weights(None, 2), vec![1, 1]);
	}

	#[test]
	fn typo_budget_grows_with_query_length() {
		assert_eq!(config_for_query("ab", 5_000).max_typos, Some(1));
		assert_eq!(config_for_query("abcdefghijklmnop", 5_000).max_typos, Some(4));
		assert_eq!(config_for_query("a", 10).max_typos, Some(0));
		assert!(!config_for_query("abcdef", 10).prefilter);
		assert!(config_for_query("abcdef", 5_000).prefilter);
	}
}
