//! Global search: query session, request fan-out, hit mapping and merging.
//!
//! [`SearchPipeline`] ties the pieces together; the other items are exposed so
//! hosts and backends can reuse the same request and mapping rules.

mod category;
mod excerpt;
mod highlight;
mod mapping;
mod merge;
mod pipeline;
mod request;
mod session;

pub use category::{Category, CollectionKind, CollectionSpec, DEFAULT_COLLECTIONS, default_collections};
pub use excerpt::{DEFAULT_EXCERPT_LENGTH, excerpt};
pub use highlight::{escape_html, strip_markup, wrap_matches};
pub use mapping::{MappingContext, SearchResultItem, map_hit};
pub use merge::{has_more, merge_page};
pub use pipeline::{DEFAULT_DEBOUNCE, PipelineConfig, SearchPipeline, SearchStatus, SearchView};
pub use request::{
	DEFAULT_HIGHLIGHT_END, DEFAULT_HIGHLIGHT_START, DEFAULT_PAGE_SIZE, SearchParams, build_request,
};
pub use session::{Generation, SearchSession};
