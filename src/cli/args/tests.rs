use clap::{CommandFactory, Parser};

use super::options::BackendArg;
use super::{CliArgs, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn defaults_to_plain_output_without_overrides() {
	let parsed = CliArgs::parse_from(["frond", "rust"]);
	assert_eq!(parsed.query.as_deref(), Some("rust"));
	assert_eq!(parsed.output, OutputFormat::Plain);
	assert_eq!(parsed.pages, 0);
	assert_eq!(parsed.backend, None);
	assert_eq!(parsed.verbose, 0);
}

#[test]
fn parses_backend_and_tuning_flags() {
	let parsed = CliArgs::parse_from([
		"frond",
		"--backend",
		"typesense",
		"--url",
		"http://localhost:8108",
		"--page-size",
		"20",
		"--debounce-ms",
		"0",
		"-C",
		"users",
		"--pages",
		"2",
		"-vv",
		"-o",
		"json",
		"ada",
	]);
	assert_eq!(parsed.backend, Some(BackendArg::Typesense));
	assert_eq!(parsed.backend.map(BackendArg::as_str), Some("typesense"));
	assert_eq!(parsed.url.as_deref(), Some("http://localhost:8108"));
	assert_eq!(parsed.page_size, Some(20));
	assert_eq!(parsed.debounce_ms, Some(0));
	assert_eq!(parsed.category.as_deref(), Some("users"));
	assert_eq!(parsed.pages, 2);
	assert_eq!(parsed.verbose, 2);
	assert_eq!(parsed.output, OutputFormat::Json);
}
