use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Results for a [`MultiSearchRequest`](crate::MultiSearchRequest), one entry
/// per requested collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchResponse {
	pub results: Vec<CollectionResult>,
}

/// Hits returned by a single collection search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
	#[serde(default)]
	pub hits: Vec<Hit>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub found: Option<u64>,
	/// Per-collection error reported inside an otherwise successful response.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// A single matched document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hit {
	pub document: Map<String, Value>,
	#[serde(default)]
	pub highlights: Vec<HitHighlight>,
}

impl Hit {
	/// Return the highlight entry for `field`, if the backend produced one.
	#[must_use]
	pub fn highlight(&self, field: &str) -> Option<&HitHighlight> {
		self.highlights.iter().find(|entry| entry.field == field)
	}

	/// Read a document field as a string, accepting numbers as well.
	#[must_use]
	pub fn text(&self, field: &str) -> Option<String> {
		match self.document.get(field)? {
			Value::String(text) => Some(text.clone()),
			Value::Number(number) => Some(number.to_string()),
			_ => None,
		}
	}
}

/// Highlight information for one document field.
///
/// `value` carries the full field with highlight tags when the field was listed
/// in `highlight_full_fields`; `snippet` is the bounded excerpt around the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitHighlight {
	pub field: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub snippet: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	#[serde(default)]
	pub matched_tokens: Vec<Value>,
}
