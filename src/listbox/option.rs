use serde::{Deserialize, Serialize};

use crate::typeahead::TypeaheadItem;

/// One entry in a selectable list.
///
/// `value` identifies the option and is what gets committed; `label` is what
/// the user sees. `search_text` overrides the label for typeahead matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOption {
	pub value: String,
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_text: Option<String>,
	#[serde(default)]
	pub disabled: bool,
}

impl ListOption {
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			search_text: None,
			disabled: false,
		}
	}

	#[must_use]
	pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
		self.search_text = Some(text.into());
		self
	}

	#[must_use]
	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}
}

impl TypeaheadItem for ListOption {
	fn typeahead_text(&self) -> &str {
		self.search_text.as_deref().unwrap_or(&self.label)
	}
}

/// Position of the first option carrying `value`.
///
/// Duplicate values are not rejected; the first occurrence wins.
pub(crate) fn position_of(options: &[ListOption], value: &str) -> Option<usize> {
	options.iter().position(|option| option.value == value)
}
