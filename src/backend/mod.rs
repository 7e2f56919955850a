//! Concrete [`SearchBackend`](frond_search_api::SearchBackend) implementations.
//!
//! [`TypesenseBackend`] talks to a Typesense server over HTTP; [`MemoryBackend`]
//! fuzzy-matches a JSON corpus held in memory and is what the CLI uses when no
//! server is configured.

mod memory;
mod typesense;

pub use memory::{Corpus, MemoryBackend};
pub use typesense::{API_KEY_HEADER, TypesenseBackend};
