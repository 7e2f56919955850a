use frond_search_api::{CollectionQuery, MultiSearchRequest};

use super::category::CollectionSpec;

/// Total results requested per page across all collections.
pub const DEFAULT_PAGE_SIZE: usize = 15;
pub const DEFAULT_HIGHLIGHT_START: &str = "<mark>";
pub const DEFAULT_HIGHLIGHT_END: &str = "</mark>";

const HIGHLIGHT_AFFIX_TOKENS: usize = 8;
const DROP_TOKENS_THRESHOLD: usize = 1;
const NUM_TYPOS: usize = 2;

/// Per-dispatch tuning shared by every collection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
	pub page_size: usize,
	pub highlight_start_tag: String,
	pub highlight_end_tag: String,
}

impl Default for SearchParams {
	fn default() -> Self {
		Self {
			page_size: DEFAULT_PAGE_SIZE,
			highlight_start_tag: DEFAULT_HIGHLIGHT_START.to_string(),
			highlight_end_tag: DEFAULT_HIGHLIGHT_END.to_string(),
		}
	}
}

impl SearchParams {
	/// Equal share of the page for each of `collections`, rounded up.
	pub fn per_collection(&self, collections: usize) -> usize {
		if collections == 0 {
			return 0;
		}
		self.page_size.div_ceil(collections)
	}
}

/// Build one multi-collection request for `query` at `page`.
pub fn build_request(
	query: &str,
	page: usize,
	collections: &[CollectionSpec],
	params: &SearchParams,
) -> MultiSearchRequest {
	let per_page = params.per_collection(collections.len());
	let searches = collections
		.iter()
		.map(|spec| {
			let fields = spec.query_by().join(",");
			CollectionQuery {
				collection: spec.name.clone(),
				q: query.to_string(),
				query_by: fields.clone(),
				query_by_weights: spec.weights().map(|weights| {
					weights
						.iter()
						.map(u32::to_string)
						.collect::<Vec<_>>()
						.join(",")
				}),
				per_page,
				page,
				prefix: true,
				highlight_full_fields: fields,
				highlight_affix_num_tokens: HIGHLIGHT_AFFIX_TOKENS,
				highlight_start_tag: params.highlight_start_tag.clone(),
				highlight_end_tag: params.highlight_end_tag.clone(),
				drop_tokens_threshold: DROP_TOKENS_THRESHOLD,
				num_typos: NUM_TYPOS,
			}
		})
		.collect();
	MultiSearchRequest { searches }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::search::category::default_collections;

	#[test]
	fn page_is_split_evenly_rounding_up() {
		let params = SearchParams::default();
		assert_eq!(params.per_collection(1), 15);
		assert_eq!(params.per_collection(2), 8);
		assert_eq!(params.per_collection(4), 4);
		assert_eq!(params.per_collection(0), 0);
	}

	#[test]
	fn fans_out_with_collection_fields() {
		let request = build_request("ada", 2, &default_collections(), &SearchParams::default());
		assert_eq!(request.len(), 4);

		let users = &request.searches[1];
		assert_eq!(users.collection, "users");
		assert_eq!(users.query_by, "first_name,last_name,bio");
		assert_eq!(users.query_by_weights.as_deref(), Some("1,2,3"));
		assert_eq!(users.highlight_full_fields, users.query_by);
		assert_eq!(users.per_page, 4);
		assert_eq!(users.page, 2);

		let threads = &request.searches[3];
		assert_eq!(threads.query_by, "title");
		assert_eq!(threads.query_by_weights, None);
		assert_eq!(threads.highlight_start_tag, "<mark>");
	}
}
