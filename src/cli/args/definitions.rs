use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{BackendArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `frond` binary.
#[derive(Parser, Debug)]
#[command(
	name = "frond",
	version,
	long_version = long_version(),
	about = "Search a content corpus the way the frond search box does",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(value_name = "QUERY", help = "Text to search for (empty prints no results)")]
	pub(crate) query: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "FROND_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'C',
		long,
		value_name = "NAME",
		help = "Restrict the search to one collection (default: all)"
	)]
	pub(crate) category: Option<String>,
	#[arg(
		long,
		value_name = "NUM",
		default_value_t = 0,
		help = "Load this many additional pages after the first (default: 0)"
	)]
	pub(crate) pages: usize,
	#[arg(
		short = 'b',
		long,
		value_enum,
		help = "Search backend to query (default: memory)"
	)]
	pub(crate) backend: Option<BackendArg>,
	#[arg(
		long,
		value_name = "URL",
		help = "Base URL of the typesense server (default: none)"
	)]
	pub(crate) url: Option<String>,
	#[arg(
		long = "api-key",
		value_name = "KEY",
		env = "FROND_API_KEY",
		hide_env_values = true,
		help = "API key sent to the typesense server (default: none)"
	)]
	pub(crate) api_key: Option<String>,
	#[arg(
		short = 'd',
		long,
		value_name = "FILE",
		help = "JSON corpus for the memory backend (default: corpus.json in the data directory)"
	)]
	pub(crate) data: Option<PathBuf>,
	#[arg(
		long = "page-size",
		value_name = "NUM",
		help = "Results per page across all collections (default: 15)"
	)]
	pub(crate) page_size: Option<usize>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Idle time before a search is sent (default: 300)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Increase log verbosity; repeat for more detail (default: warnings only)"
	)]
	pub(crate) verbose: u8,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the results")]
	pub(crate) output: OutputFormat,
}
