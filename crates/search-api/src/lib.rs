//! Shared search contract for `frond`.
//!
//! The pipeline in the main crate talks to any multi-collection text search
//! service through [`SearchBackend`]. The request and response types mirror the
//! JSON shape of a Typesense `multi_search` call so that HTTP backends can
//! serialise them directly.

pub mod backend;
pub mod error;
pub mod request;
pub mod response;

pub use backend::SearchBackend;
pub use error::BackendError;
pub use request::{CollectionQuery, MultiSearchRequest};
pub use response::{CollectionResult, Hit, HitHighlight, MultiSearchResponse};
