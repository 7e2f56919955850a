//! Headless interaction core for a content-community front end.
//!
//! The crate provides keyboard-accessible selection lists ([`listbox`]),
//! overlay primitives ([`overlay`]), the shared [`typeahead`] buffer, and a
//! debounced global search pipeline ([`search`]) that talks to any
//! [`SearchBackend`] such as the ones in [`backend`].

pub mod app_dirs;
pub mod backend;
pub mod listbox;
pub mod logging;
pub mod overlay;
pub mod search;
pub mod typeahead;

pub use frond_search_api::{BackendError, SearchBackend};
