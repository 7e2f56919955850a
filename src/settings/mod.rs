//! Configuration loading and resolution.
//!
//! `load` is the entry point; it layers default files, explicit `--config`
//! files, `FROND__*` environment variables and CLI flags, then returns a
//! validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{BackendKind, BackendSettings, ResolvedConfig};
