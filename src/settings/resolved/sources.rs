use std::env;
use std::fmt;

/// Where an effective setting came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

const PAGE_SIZE_ENV: &str = "FROND__SEARCH__PAGE_SIZE";
const DEBOUNCE_ENV: &str = "FROND__SEARCH__DEBOUNCE_MS";
const BACKEND_KIND_ENV: &str = "FROND__BACKEND__KIND";
const BACKEND_URL_ENV: &str = "FROND__BACKEND__URL";
const BACKEND_DATA_ENV: &str = "FROND__BACKEND__DATA";

/// Origins of the settings that validation can reject.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) page_size: Option<SettingSource>,
	pub(crate) debounce: Option<SettingSource>,
	pub(crate) backend_kind: Option<SettingSource>,
	pub(crate) backend_url: Option<SettingSource>,
	pub(crate) backend_data: Option<SettingSource>,
}

impl ConfigSources {
	/// Record settings provided through `FROND__*` variables.
	pub(crate) fn from_environment() -> Self {
		let from_env = |name: &'static str| {
			env::var_os(name)
				.filter(|value| !value.is_empty())
				.map(|_| SettingSource::Environment(name))
		};
		Self {
			page_size: from_env(PAGE_SIZE_ENV),
			debounce: from_env(DEBOUNCE_ENV),
			backend_kind: from_env(BACKEND_KIND_ENV),
			backend_url: from_env(BACKEND_URL_ENV),
			backend_data: from_env(BACKEND_DATA_ENV),
		}
	}

	pub(crate) fn source_for_page_size(&self) -> SettingSource {
		self.page_size
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.page_size"))
	}

	pub(crate) fn source_for_debounce(&self) -> SettingSource {
		self.debounce
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.debounce_ms"))
	}

	pub(crate) fn source_for_backend_kind(&self) -> SettingSource {
		self.backend_kind
			.clone()
			.unwrap_or(SettingSource::ConfigKey("backend.kind"))
	}

	pub(crate) fn source_for_backend_url(&self) -> SettingSource {
		self.backend_url
			.clone()
			.unwrap_or(SettingSource::ConfigKey("backend.url"))
	}

	pub(crate) fn source_for_backend_data(&self) -> SettingSource {
		self.backend_data
			.clone()
			.unwrap_or(SettingSource::ConfigKey("backend.data"))
	}
}
