use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use frond::app_dirs;
use frond::search::{
	CollectionSpec, DEFAULT_DEBOUNCE, DEFAULT_EXCERPT_LENGTH, DEFAULT_HIGHLIGHT_END,
	DEFAULT_HIGHLIGHT_START, DEFAULT_PAGE_SIZE, PipelineConfig, SearchParams, default_collections,
};
use indexmap::IndexSet;
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{
	BackendKind, BackendSettings, ConfigError, ConfigSources, ResolvedConfig, SettingSource,
};

const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	backend: BackendSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	debounce_ms: Option<u64>,
	page_size: Option<usize>,
	highlight_start_tag: Option<String>,
	highlight_end_tag: Option<String>,
	excerpt_length: Option<usize>,
	collections: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BackendSection {
	kind: Option<String>,
	url: Option<String>,
	api_key: Option<String>,
	data: Option<PathBuf>,
	timeout_ms: Option<u64>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values, recording
	/// which settings the command line supplied.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs, sources: &mut ConfigSources) {
		if let Some(value) = cli.page_size {
			self.search.page_size = Some(value);
			sources.page_size = Some(SettingSource::CliFlag("--page-size"));
		}
		if let Some(value) = cli.debounce_ms {
			self.search.debounce_ms = Some(value);
			sources.debounce = Some(SettingSource::CliFlag("--debounce-ms"));
		}
		if let Some(backend) = cli.backend {
			self.backend.kind = Some(backend.as_str().to_string());
			sources.backend_kind = Some(SettingSource::CliFlag("--backend"));
		}
		if let Some(url) = cli.url.clone() {
			self.backend.url = Some(url);
			sources.backend_url = Some(SettingSource::CliFlag("--url"));
		}
		if let Some(key) = cli.api_key.clone() {
			self.backend.api_key = Some(key);
		}
		if let Some(data) = cli.data.clone() {
			self.backend.data = Some(data);
			sources.backend_data = Some(SettingSource::CliFlag("--data"));
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], filling
	/// defaults and validating the result.
	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<ResolvedConfig> {
		let kind = match self.backend.kind.as_deref() {
			None => BackendKind::Memory,
			Some(value) => BackendKind::parse(value).ok_or_else(|| {
				ConfigError::invalid(
					"backend.kind",
					value,
					sources.source_for_backend_kind(),
					"expected `memory` or `typesense`",
				)
			})?,
		};

		let collections = match self.search.collections {
			None => default_collections(),
			Some(names) => {
				let names: IndexSet<String> = names
					.into_iter()
					.map(|name| name.trim().to_ascii_lowercase())
					.filter(|name| !name.is_empty())
					.collect();
				if names.is_empty() {
					return Err(ConfigError::invalid(
						"search.collections",
						"",
						SettingSource::ConfigKey("search.collections"),
						"must name at least one collection",
					)
					.into());
				}
				names.into_iter().map(CollectionSpec::new).collect()
			}
		};

		let params = SearchParams {
			page_size: self.search.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
			highlight_start_tag: self
				.search
				.highlight_start_tag
				.unwrap_or_else(|| DEFAULT_HIGHLIGHT_START.to_string()),
			highlight_end_tag: self
				.search
				.highlight_end_tag
				.unwrap_or_else(|| DEFAULT_HIGHLIGHT_END.to_string()),
		};

		let pipeline = PipelineConfig {
			debounce: self
				.search
				.debounce_ms
				.map_or(DEFAULT_DEBOUNCE, Duration::from_millis),
			params,
			collections,
			excerpt_length: self.search.excerpt_length.unwrap_or(DEFAULT_EXCERPT_LENGTH),
		};

		let data = match (kind, self.backend.data) {
			(_, Some(path)) => Some(path),
			(BackendKind::Memory, None) => app_dirs::default_corpus_path()
				.ok()
				.filter(|path| path.is_file()),
			(BackendKind::Typesense, None) => None,
		};

		let backend = BackendSettings {
			kind,
			url: self
				.backend
				.url
				.map(|url| url.trim().trim_end_matches('/').to_string()),
			api_key: self.backend.api_key.filter(|key| !key.is_empty()),
			data,
			timeout: self
				.backend
				.timeout_ms
				.map_or(DEFAULT_BACKEND_TIMEOUT, Duration::from_millis),
		};

		let config = ResolvedConfig { pipeline, backend };
		config.validate(sources)?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;
	use pretty_assertions::assert_eq;

	use super::*;

	fn raw_from_toml(contents: &str) -> RawConfig {
		config::Config::builder()
			.add_source(config::File::from_str(contents, config::FileFormat::Toml))
			.build()
			.and_then(config::Config::try_deserialize)
			.expect("valid configuration")
	}

	#[test]
	fn cli_overrides_take_precedence() {
		let cli = CliArgs::parse_from([
			"frond",
			"--page-size",
			"30",
			"--debounce-ms",
			"50",
			"--backend",
			"typesense",
			"--url",
			"http://search:8108/",
			"--api-key",
			"xyz",
		]);
		let mut raw = raw_from_toml("[search]\npage_size = 10\n[backend]\nkind = \"memory\"\n");
		let mut sources = ConfigSources::default();
		raw.apply_cli_overrides(&cli, &mut sources);

		assert_eq!(sources.page_size, Some(SettingSource::CliFlag("--page-size")));
		assert_eq!(sources.backend_kind, Some(SettingSource::CliFlag("--backend")));

		let config = raw.resolve(&sources).expect("resolves");
		assert_eq!(config.pipeline.params.page_size, 30);
		assert_eq!(config.pipeline.debounce, Duration::from_millis(50));
		assert_eq!(config.backend.kind, BackendKind::Typesense);
		assert_eq!(config.backend.url.as_deref(), Some("http://search:8108"));
		assert_eq!(config.backend.api_key.as_deref(), Some("xyz"));
	}

	#[test]
	fn file_values_fill_the_pipeline() {
		let raw = raw_from_toml(
			r#"
			[search]
			debounce_ms = 150
			highlight_start_tag = "<em>"
			highlight_end_tag = "</em>"
			excerpt_length = 80
			collections = ["Users", "threads", "users", " "]

			[backend]
			kind = "memory"
			data = "/srv/corpus.json"
			timeout_ms = 1000
			"#,
		);
		let config = raw.resolve(&ConfigSources::default()).expect("resolves");

		let names: Vec<_> = config
			.pipeline
			.collections
			.iter()
			.map(|spec| spec.name.as_str())
			.collect();
		assert_eq!(names, vec!["users", "threads"]);
		assert_eq!(config.pipeline.debounce, Duration::from_millis(150));
		assert_eq!(config.pipeline.params.highlight_start_tag, "<em>");
		assert_eq!(config.pipeline.excerpt_length, 80);
		assert_eq!(config.backend.data, Some(PathBuf::from("/srv/corpus.json")));
		assert_eq!(config.backend.timeout, Duration::from_secs(1));
	}

	#[test]
	fn unknown_backend_kind_names_its_origin() {
		let raw = raw_from_toml("[backend]\nkind = \"solr\"\n");
		let err = raw.resolve(&ConfigSources::default()).unwrap_err();
		let message = err.to_string();
		assert!(message.contains("backend.kind"));
		assert!(message.contains("configuration key `backend.kind`"));
		assert!(message.contains("value: solr"));
	}

	#[test]
	fn empty_collection_list_is_rejected() {
		let raw = raw_from_toml("[search]\ncollections = []\n[backend]\ndata = \"c.json\"\n");
		let err = raw.resolve(&ConfigSources::default()).unwrap_err();
		assert!(err.to_string().contains("search.collections"));
	}

	#[test]
	fn unknown_sections_do_not_reach_the_resolved_config() {
		let raw = raw_from_toml("[typeahead]\ntimeout_ms = 750\n[backend]\ndata = \"c.json\"\n");
		let config = raw.resolve(&ConfigSources::default()).expect("resolves");
		assert!(!format!("{config:?}").contains("typeahead"));
	}

	#[test]
	fn typesense_without_url_fails_validation() {
		let raw = raw_from_toml("[backend]\nkind = \"typesense\"\n");
		let err = raw.resolve(&ConfigSources::default()).unwrap_err();
		assert!(err.to_string().contains("backend.url"));
	}
}
