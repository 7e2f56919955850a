use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File};
use frond::app_dirs;

use crate::cli::CliArgs;

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		Environment::with_prefix("frond")
			.separator("__")
			.try_parsing(true)
			.list_separator(",")
			.with_list_parse_key("search.collections"),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Discover the default configuration file locations that should be consulted.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".frond.toml"));
		files.push(current_dir.join("frond.toml"));
	}

	files
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;

	use super::*;

	#[test]
	fn default_files_include_current_directory_variants() {
		let files = default_config_files();
		assert!(files.iter().any(|path| path.ends_with(".frond.toml")));
		assert!(files.iter().any(|path| path.ends_with("frond.toml")));
	}

	#[test]
	fn explicit_config_file_is_merged() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("custom.toml");
		fs::write(&path, "[search]\npage_size = 42\n").expect("write config");

		let cli = CliArgs::parse_from([
			"frond".into(),
			"--no-config".into(),
			"--config".into(),
			path.into_os_string(),
		]);
		let config = build_config(&cli).expect("config builds");
		assert_eq!(config.get_int("search.page_size").expect("key present"), 42);
	}

	#[test]
	fn missing_explicit_config_file_is_an_error() {
		let dir = tempfile::tempdir().expect("tempdir");
		let missing = dir.path().join("absent.toml");
		let cli = CliArgs::parse_from([
			"frond".into(),
			"--no-config".into(),
			"--config".into(),
			missing.into_os_string(),
		]);
		assert!(build_config(&cli).is_err());
	}
}
