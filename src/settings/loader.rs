use anyhow::{Result, anyhow};

use super::raw::RawConfig;
use super::resolved::{ConfigSources, ResolvedConfig};
use super::sources::build_config;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	let mut sources = ConfigSources::from_environment();
	raw.apply_cli_overrides(cli, &mut sources);
	raw.resolve(&sources)
}
