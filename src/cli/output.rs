use anyhow::Result;
use frond::search::{SearchParams, SearchStatus, SearchView, strip_markup};
use serde_json::json;
use unicode_width::UnicodeWidthStr;

/// Render the settled view as plain text with highlight markup removed.
pub(crate) fn format_plain(view: &SearchView, params: &SearchParams) -> String {
	let strip = |text: &str| {
		strip_markup(text, &params.highlight_start_tag, &params.highlight_end_tag)
	};

	match view.status {
		SearchStatus::Idle => return "No query\n".to_string(),
		SearchStatus::Failed => return format!("Search failed (query: '{}')\n", view.query),
		SearchStatus::Pending | SearchStatus::Ready => {}
	}
	if view.items.is_empty() {
		return format!("No results (query: '{}')\n", view.query);
	}

	let label_width = view
		.items
		.iter()
		.map(|item| item.category.width())
		.max()
		.unwrap_or_default();

	let mut out = String::new();
	for item in &view.items {
		let padding = " ".repeat(label_width - item.category.width());
		out.push_str(&format!(
			"{}{padding}  {}  {}\n",
			item.category,
			strip(&item.title),
			item.href
		));
		if !item.description.is_empty() {
			let indent = " ".repeat(label_width + 2);
			out.push_str(&format!("{indent}{}\n", strip(&item.description)));
		}
	}
	if view.has_more {
		out.push_str("(more results available)\n");
	}
	out
}

/// Print a plain-text representation of the settled view.
pub(crate) fn print_plain(view: &SearchView, params: &SearchParams) {
	print!("{}", format_plain(view, params));
}

/// Format the settled view as a JSON string; highlight markup is kept.
pub(crate) fn format_view_json(view: &SearchView) -> Result<String> {
	let payload = json!({
		"query": view.query,
		"category": view.category,
		"page": view.page,
		"status": view.status,
		"has_more": view.has_more,
		"items": view.items,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the settled view.
pub(crate) fn print_json(view: &SearchView) -> Result<()> {
	println!("{}", format_view_json(view)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use frond::search::SearchResultItem;
	use pretty_assertions::assert_eq;
	use serde_json::Value;

	use super::*;

	fn view() -> SearchView {
		SearchView {
			request_id: 3,
			query: "rust".into(),
			category: "all".into(),
			page: 1,
			status: SearchStatus::Ready,
			items: vec![
				SearchResultItem {
					title: "Async <mark>rust</mark> &amp; you".into(),
					description: "Notes on <mark>Rust</mark>".into(),
					href: "/threads/async-rust".into(),
					category: "threads".into(),
					avatar_url: None,
				},
				SearchResultItem {
					title: "<mark>Rust</mark>acean".into(),
					description: String::new(),
					href: "/users/ferris".into(),
					category: "users".into(),
					avatar_url: Some("https://img/ferris.png".into()),
				},
			],
			has_more: true,
		}
	}

	#[test]
	fn plain_output_strips_markup_and_aligns_categories() {
		let text = format_plain(&view(), &SearchParams::default());
		assert_eq!(
			text,
			"threads  Async rust & you  /threads/async-rust\n\
			 \x20        Notes on Rust\n\
			 users    Rustacean  /users/ferris\n\
			 (more results available)\n"
		);
	}

	#[test]
	fn plain_output_reports_failures_and_empty_queries() {
		let mut failed = view();
		failed.status = SearchStatus::Failed;
		failed.items.clear();
		assert_eq!(
			format_plain(&failed, &SearchParams::default()),
			"Search failed (query: 'rust')\n"
		);

		let idle = SearchView::default();
		assert_eq!(format_plain(&idle, &SearchParams::default()), "No query\n");
	}

	#[test]
	fn json_output_keeps_highlights() {
		let json = format_view_json(&view()).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["status"], "ready");
		assert_eq!(value["has_more"], true);
		assert_eq!(value["items"][0]["title"], "Async <mark>rust</mark> &amp; you");
		assert_eq!(value["items"][1]["avatar_url"], "https://img/ferris.png");
		assert!(value["items"][0].get("avatar_url").is_none());
	}
}
