use std::path::PathBuf;
use std::time::Duration;

use frond::search::PipelineConfig;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Upper bound accepted for the search debounce.
pub(crate) const MAX_DEBOUNCE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
	Memory,
	Typesense,
}

impl BackendKind {
	pub(crate) fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"memory" => Some(Self::Memory),
			"typesense" => Some(Self::Typesense),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Memory => "memory",
			Self::Typesense => "typesense",
		}
	}
}

/// Connection settings for the search backend.
#[derive(Debug, Clone)]
pub struct BackendSettings {
	pub kind: BackendKind,
	pub url: Option<String>,
	pub api_key: Option<String>,
	/// JSON corpus read by the memory backend.
	pub data: Option<PathBuf>,
	pub timeout: Duration,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub pipeline: PipelineConfig,
	pub backend: BackendSettings,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
