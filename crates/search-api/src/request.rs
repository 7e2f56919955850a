use serde::{Deserialize, Serialize};

/// A batch of per-collection searches dispatched in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSearchRequest {
	pub searches: Vec<CollectionQuery>,
}

impl MultiSearchRequest {
	/// Number of collections addressed by this request.
	#[must_use]
	pub fn len(&self) -> usize {
		self.searches.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.searches.is_empty()
	}
}

/// Parameters for a single collection search.
///
/// Field names follow the backend's wire format; comma-separated lists are
/// kept as strings because that is what the backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionQuery {
	pub collection: String,
	pub q: String,
	pub query_by: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query_by_weights: Option<String>,
	pub per_page: usize,
	pub page: usize,
	pub prefix: bool,
	pub highlight_full_fields: String,
	pub highlight_affix_num_tokens: usize,
	pub highlight_start_tag: String,
	pub highlight_end_tag: String,
	pub drop_tokens_threshold: usize,
	pub num_typos: usize,
}

impl CollectionQuery {
	/// Split `query_by` into individual field names.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.query_by
			.split(',')
			.map(str::trim)
			.filter(|field| !field.is_empty())
	}
}
