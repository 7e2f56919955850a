//! Tracing setup for the `frond` binary and embedding hosts.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Variable holding an `EnvFilter` directive that overrides `-v`.
pub const LOG_ENV: &str = "FROND_LOG";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Filter directive for a `-v` count.
pub fn directive_for(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "frond=info,warn",
		2 => "frond=debug,info",
		_ => "frond=trace,debug",
	}
}

/// Install a stderr fmt subscriber. Later calls are no-ops, as is a call made
/// after the host already installed its own global subscriber.
pub fn initialize(verbosity: u8) {
	INITIALIZED.get_or_init(|| {
		let filter = EnvFilter::try_from_env(LOG_ENV)
			.unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)));

		let fmt_layer = tracing_subscriber::fmt::layer()
			.with_writer(std::io::stderr)
			.with_target(true);

		let _ = tracing_subscriber::registry()
			.with(filter)
			.with(fmt_layer)
			.try_init();
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_raises_the_crate_level() {
		assert_eq!(directive_for(0), "warn");
		assert_eq!(directive_for(1), "frond=info,warn");
		assert_eq!(directive_for(7), "frond=trace,debug");
	}

	#[test]
	fn repeated_initialisation_is_harmless() {
		initialize(0);
		initialize(3);
		tracing::debug!("still logging");
	}
}
