use std::collections::HashSet;

use frond_search_api::{MultiSearchRequest, MultiSearchResponse};

use super::mapping::SearchResultItem;

/// Fold a freshly mapped page into the accumulated list.
///
/// Page 1 replaces everything. Later pages append items whose
/// `href + title` has not been seen, preserving order.
pub fn merge_page(current: &mut Vec<SearchResultItem>, page: usize, incoming: Vec<SearchResultItem>) {
	if page <= 1 {
		*current = incoming;
		return;
	}
	let mut seen: HashSet<(String, String)> = current
		.iter()
		.map(|item| (item.href.clone(), item.title.clone()))
		.collect();
	current.extend(
		incoming
			.into_iter()
			.filter(|item| seen.insert((item.href.clone(), item.title.clone()))),
	);
}

/// Whether any collection filled its share of the page, so another page may
/// exist.
pub fn has_more(request: &MultiSearchRequest, response: &MultiSearchResponse) -> bool {
	request
		.searches
		.iter()
		.zip(&response.results)
		.any(|(query, result)| query.per_page > 0 && result.hits.len() >= query.per_page)
}
