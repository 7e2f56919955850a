//! Debounced, staleness-guarded global search.
//!
//! Every edit to the text, the category or the page bumps the session's
//! request id and restarts the debounce timer. When the timer fires, the
//! request is dispatched on its own task so that later edits cancel only the
//! timer, never a request already on the wire. A response is published only if
//! its id is still the latest one, checked under the same lock that edits take,
//! so a slow response can never overwrite a newer query's results.

use std::sync::Arc;
use std::time::Duration;

use frond_search_api::{BackendError, MultiSearchRequest, MultiSearchResponse, SearchBackend};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::category::{Category, CollectionSpec, default_collections};
use super::excerpt::DEFAULT_EXCERPT_LENGTH;
use super::mapping::{MappingContext, SearchResultItem, map_hit};
use super::merge::{has_more, merge_page};
use super::request::{SearchParams, build_request};
use super::session::{Generation, SearchSession};

/// Idle time after the last edit before a search is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Static tuning for a [`SearchPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
	pub debounce: Duration,
	pub params: SearchParams,
	/// Collections searched under [`Category::All`].
	pub collections: Vec<CollectionSpec>,
	pub excerpt_length: usize,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			params: SearchParams::default(),
			collections: default_collections(),
			excerpt_length: DEFAULT_EXCERPT_LENGTH,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
	/// Empty query; nothing to show.
	#[default]
	Idle,
	/// A search is debouncing or in flight.
	Pending,
	Ready,
	/// The last search failed; results were cleared.
	Failed,
}

impl SearchStatus {
	pub fn is_settled(self) -> bool {
		!matches!(self, Self::Pending)
	}
}

/// Snapshot published to observers after every state change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchView {
	pub request_id: u64,
	pub query: String,
	pub category: String,
	pub page: usize,
	pub status: SearchStatus,
	pub items: Vec<SearchResultItem>,
	pub has_more: bool,
}

struct PipelineState {
	session: SearchSession,
	debounce: Option<JoinHandle<()>>,
}

struct Inner {
	backend: Arc<dyn SearchBackend>,
	config: PipelineConfig,
	state: Mutex<PipelineState>,
	view: watch::Sender<SearchView>,
}

/// A query frozen at edit time, dispatched once the debounce elapses.
struct Dispatch {
	id: u64,
	query: String,
	page: usize,
	collections: Vec<CollectionSpec>,
	generation: Generation,
}

/// Search-as-you-type over a [`SearchBackend`].
///
/// Must be driven from within a tokio runtime.
pub struct SearchPipeline {
	inner: Arc<Inner>,
}

impl SearchPipeline {
	pub fn new(backend: Arc<dyn SearchBackend>, config: PipelineConfig) -> Self {
		let (view, _) = watch::channel(SearchView {
			category: Category::All.to_string(),
			page: 1,
			..SearchView::default()
		});
		Self {
			inner: Arc::new(Inner {
				backend,
				config,
				state: Mutex::new(PipelineState {
					session: SearchSession::new(),
					debounce: None,
				}),
				view,
			}),
		}
	}

	pub fn config(&self) -> &PipelineConfig {
		&self.inner.config
	}

	/// Latest published view.
	pub fn view(&self) -> SearchView {
		self.inner.view.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchView> {
		self.inner.view.subscribe()
	}

	/// Replace the search text.
	pub fn set_text(&self, text: impl Into<String>) {
		let mut state = self.inner.state.lock();
		let id = state.session.set_text(text);
		Inner::schedule(&self.inner, &mut state, id);
	}

	/// Switch the category filter.
	pub fn set_category(&self, category: Category) {
		let mut state = self.inner.state.lock();
		let id = state.session.set_category(category);
		Inner::schedule(&self.inner, &mut state, id);
	}

	/// Request the next page. Ignored unless the last search settled with more
	/// results available.
	pub fn load_more(&self) -> bool {
		let mut state = self.inner.state.lock();
		let view = self.inner.view.borrow().clone();
		if view.status != SearchStatus::Ready || !view.has_more {
			return false;
		}
		let id = state.session.next_page();
		Inner::schedule(&self.inner, &mut state, id);
		true
	}

	/// Wait until the current query has settled and return its view.
	pub async fn settled(&self) -> SearchView {
		let mut receiver = self.subscribe();
		match receiver.wait_for(|view| view.status.is_settled()).await {
			Ok(view) => view.clone(),
			Err(_) => self.view(),
		}
	}
}

impl Drop for SearchPipeline {
	fn drop(&mut self) {
		if let Some(handle) = self.inner.state.lock().debounce.take() {
			handle.abort();
		}
	}
}

impl Inner {
	/// Restart the debounce for request `id`. Called with the state lock held.
	fn schedule(this: &Arc<Self>, state: &mut PipelineState, id: u64) {
		if let Some(handle) = state.debounce.take() {
			handle.abort();
			trace!(request_id = id, "debounce restarted");
		}

		let session = &state.session;
		let category = session.category().to_string();
		let query = session.query().to_string();
		let page = session.page();

		if query.is_empty() {
			this.view.send_replace(SearchView {
				request_id: id,
				category,
				page,
				..SearchView::default()
			});
			return;
		}

		let dispatch = Dispatch {
			id,
			query: query.clone(),
			page,
			collections: session.category().collections(&this.config.collections),
			generation: session.generation(),
		};
		this.view.send_modify(|view| {
			view.request_id = id;
			view.query = query;
			view.category = category;
			view.page = page;
			view.status = SearchStatus::Pending;
		});

		let debounce = this.config.debounce;
		let inner = Arc::clone(this);
		state.debounce = Some(tokio::spawn(async move {
			tokio::time::sleep(debounce).await;
			if dispatch.generation.is_current(dispatch.id) {
				tokio::spawn(inner.run(dispatch));
			}
		}));
	}

	async fn run(self: Arc<Self>, dispatch: Dispatch) {
		let request = build_request(
			&dispatch.query,
			dispatch.page,
			&dispatch.collections,
			&self.config.params,
		);
		debug!(
			request_id = dispatch.id,
			query = %dispatch.query,
			page = dispatch.page,
			collections = request.len(),
			"dispatching search"
		);

		let outcome = self
			.backend
			.multi_search(&request)
			.await
			.and_then(|response| validate(&request, response));

		if !dispatch.generation.is_current(dispatch.id) {
			debug!(
				request_id = dispatch.id,
				latest = dispatch.generation.latest(),
				"discarding stale response"
			);
			return;
		}

		let mapped = outcome.map(|response| {
			let items = self.map_response(&dispatch, &response);
			(items, has_more(&request, &response))
		});

		// Re-check under the lock so no edit can slip in before publishing.
		let state = self.state.lock();
		if !state.session.is_current(dispatch.id) {
			debug!(request_id = dispatch.id, "discarding stale response");
			return;
		}
		match mapped {
			Ok((items, more)) => {
				debug!(request_id = dispatch.id, hits = items.len(), has_more = more, "search settled");
				self.view.send_modify(|view| {
					merge_page(&mut view.items, dispatch.page, items);
					view.status = SearchStatus::Ready;
					view.has_more = more;
				});
			}
			Err(err) => {
				warn!(request_id = dispatch.id, error = %err, "search failed; clearing results");
				self.view.send_modify(|view| {
					view.items.clear();
					view.status = SearchStatus::Failed;
					view.has_more = false;
				});
			}
		}
	}

	fn map_response(&self, dispatch: &Dispatch, response: &MultiSearchResponse) -> Vec<SearchResultItem> {
		let params = &self.config.params;
		let ctx = MappingContext {
			query: &dispatch.query,
			start_tag: &params.highlight_start_tag,
			end_tag: &params.highlight_end_tag,
			excerpt_length: self.config.excerpt_length,
		};
		dispatch
			.collections
			.iter()
			.zip(&response.results)
			.flat_map(|(spec, result)| result.hits.iter().filter_map(move |hit| map_hit(spec, hit, &ctx)))
			.collect()
	}
}

/// Reject responses that cannot be trusted as a whole.
fn validate(
	request: &MultiSearchRequest,
	response: MultiSearchResponse,
) -> Result<MultiSearchResponse, BackendError> {
	if response.results.len() != request.len() {
		return Err(BackendError::ResultCountMismatch {
			expected: request.len(),
			received: response.results.len(),
		});
	}
	if let Some((query, message)) = request
		.searches
		.iter()
		.zip(&response.results)
		.find_map(|(query, result)| result.error.as_ref().map(|message| (query, message)))
	{
		return Err(BackendError::Collection {
			collection: query.collection.clone(),
			message: message.clone(),
		});
	}
	Ok(response)
}
