//! Normalisation of heterogeneous hits into [`SearchResultItem`]s.

use frond_search_api::Hit;
use serde::{Deserialize, Serialize};

use super::category::{CollectionKind, CollectionSpec};
use super::excerpt::excerpt;
use super::highlight::{escape_html, wrap_matches};

/// One row of the merged result list.
///
/// `title` and `description` are HTML fragments that may contain highlight
/// tags; all other text in them is escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResultItem {
	pub title: String,
	pub description: String,
	pub href: String,
	pub category: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
}

/// Options shared by every hit mapped for one response.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
	pub query: &'a str,
	pub start_tag: &'a str,
	pub end_tag: &'a str,
	pub excerpt_length: usize,
}

impl MappingContext<'_> {
	/// Highlighted text of a short field: the server's full-field highlight,
	/// then its snippet, then a locally wrapped copy of the raw value.
	fn field(&self, hit: &Hit, field: &str) -> Option<String> {
		if let Some(highlight) = hit.highlight(field)
			&& let Some(marked) = highlight.value.as_ref().or(highlight.snippet.as_ref())
		{
			return Some(marked.clone());
		}
		hit.text(field)
			.map(|raw| wrap_matches(&raw, self.query, self.start_tag, self.end_tag))
	}

	/// Highlighted excerpt of a long field: the server's snippet, or a local
	/// excerpt around the first match.
	fn long_field(&self, hit: &Hit, field: &str) -> Option<String> {
		if let Some(snippet) = hit.highlight(field).and_then(|highlight| highlight.snippet.as_ref()) {
			return Some(snippet.clone());
		}
		hit.text(field).map(|raw| {
			let cut = excerpt(&raw, self.query, self.excerpt_length);
			wrap_matches(&cut, self.query, self.start_tag, self.end_tag)
		})
	}
}

const GENERIC_DESCRIPTION_FIELDS: [&str; 3] = ["description", "excerpt", "body"];

/// Map a hit from `spec` into a result item.
///
/// Returns `None` when the document lacks the fields needed for a title and a
/// link.
pub fn map_hit(spec: &CollectionSpec, hit: &Hit, ctx: &MappingContext<'_>) -> Option<SearchResultItem> {
	let id = hit.text("slug").or_else(|| hit.text("id"))?;
	let (title, description, avatar_url) = match spec.kind {
		CollectionKind::Listings => (
			ctx.field(hit, "name")?,
			ctx.long_field(hit, "description"),
			hit.text("image_url"),
		),
		CollectionKind::Users => {
			let names: Vec<String> = ["first_name", "last_name"]
				.iter()
				.filter_map(|field| ctx.field(hit, field))
				.filter(|name| !name.is_empty())
				.collect();
			let title = if names.is_empty() {
				escape_html(&hit.text("username")?)
			} else {
				names.join(" ")
			};
			(title, ctx.long_field(hit, "bio"), hit.text("avatar_url"))
		}
		CollectionKind::Generic => (
			ctx.field(hit, "title")?,
			GENERIC_DESCRIPTION_FIELDS
				.iter()
				.find_map(|field| ctx.long_field(hit, field)),
			hit.text("avatar_url"),
		),
	};

	let link_id = match spec.kind {
		CollectionKind::Users => hit.text("username").unwrap_or(id),
		_ => id,
	};

	Some(SearchResultItem {
		title,
		description: description.unwrap_or_default(),
		href: spec.href(&link_id),
		category: spec.name.clone(),
		avatar_url,
	})
}
