use super::{BackendKind, ConfigError, ConfigSources, MAX_DEBOUNCE, ResolvedConfig};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
	let params = &config.pipeline.params;
	if params.page_size == 0 {
		return Err(ConfigError::invalid(
			"search.page_size",
			params.page_size.to_string(),
			sources.source_for_page_size(),
			"must be greater than zero",
		));
	}

	let debounce = config.pipeline.debounce;
	if debounce > MAX_DEBOUNCE {
		return Err(ConfigError::invalid(
			"search.debounce_ms",
			debounce.as_millis().to_string(),
			sources.source_for_debounce(),
			format!("must not exceed {} ms", MAX_DEBOUNCE.as_millis()),
		));
	}

	let backend = &config.backend;
	match backend.kind {
		BackendKind::Typesense if backend.url.as_deref().is_none_or(str::is_empty) => {
			return Err(ConfigError::invalid(
				"backend.url",
				backend.url.clone().unwrap_or_default(),
				sources.source_for_backend_url(),
				"is required when backend.kind is `typesense`",
			));
		}
		BackendKind::Memory if backend.data.is_none() => {
			return Err(ConfigError::invalid(
				"backend.data",
				"",
				sources.source_for_backend_data(),
				"is required when backend.kind is `memory` and no default corpus exists",
			));
		}
		_ => {}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::time::Duration;

	use frond::search::PipelineConfig;

	use super::super::{BackendSettings, SettingSource};
	use super::*;

	fn config(kind: BackendKind) -> ResolvedConfig {
		ResolvedConfig {
			pipeline: PipelineConfig::default(),
			backend: BackendSettings {
				kind,
				url: Some("http://localhost:8108".into()),
				api_key: None,
				data: Some(PathBuf::from("/tmp/corpus.json")),
				timeout: Duration::from_secs(5),
			},
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&config(BackendKind::Memory), &ConfigSources::default()).is_ok());
		assert!(validate(&config(BackendKind::Typesense), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn rejects_zero_page_size_from_cli() {
		let mut config = config(BackendKind::Memory);
		config.pipeline.params.page_size = 0;
		let sources = ConfigSources {
			page_size: Some(SettingSource::CliFlag("--page-size")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "search.page_size");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag `--page-size`"));
	}

	#[test]
	fn rejects_long_debounce_from_environment() {
		let mut config = config(BackendKind::Memory);
		config.pipeline.debounce = Duration::from_secs(11);
		let sources = ConfigSources {
			debounce: Some(SettingSource::Environment("FROND__SEARCH__DEBOUNCE_MS")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert_eq!(err.key, "search.debounce_ms");
		assert!(err.to_string().contains("environment variable"));
		assert!(err.to_string().contains("value: 11000"));
	}

	#[test]
	fn typesense_needs_a_url() {
		let mut config = config(BackendKind::Typesense);
		config.backend.url = None;
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "backend.url");
		assert_eq!(err.origin, SettingSource::ConfigKey("backend.url"));
	}

	#[test]
	fn memory_needs_a_corpus() {
		let mut config = config(BackendKind::Memory);
		config.backend.data = None;
		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "backend.data");
	}
}
