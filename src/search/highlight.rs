//! Highlight markup helpers.

/// Escape text for embedding in HTML.
pub fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(ch),
		}
	}
	escaped
}

/// Escape `text` and wrap every case-insensitive occurrence of a query token.
///
/// Used when the backend returned no highlight for a field.
pub fn wrap_matches(text: &str, query: &str, start_tag: &str, end_tag: &str) -> String {
	let tokens: Vec<String> = query
		.split_whitespace()
		.map(str::to_lowercase)
		.filter(|token| !token.is_empty())
		.collect();
	if tokens.is_empty() {
		return escape_html(text);
	}

	let spans = match_spans(text, &tokens);
	let mut out = String::with_capacity(text.len() + spans.len() * (start_tag.len() + end_tag.len()));
	let mut cursor = 0;
	for (start, end) in spans {
		out.push_str(&escape_html(&text[cursor..start]));
		out.push_str(start_tag);
		out.push_str(&escape_html(&text[start..end]));
		out.push_str(end_tag);
		cursor = end;
	}
	out.push_str(&escape_html(&text[cursor..]));
	out
}

/// Byte ranges of non-overlapping token matches, left to right.
///
/// Matching lowercases per character, so ranges always fall on char
/// boundaries of the original text.
fn match_spans(text: &str, tokens: &[String]) -> Vec<(usize, usize)> {
	let chars: Vec<(usize, char)> = text.char_indices().collect();
	let mut spans = Vec::new();
	let mut index = 0;
	while index < chars.len() {
		let longest = tokens
			.iter()
			.filter_map(|token| matches_at(&chars, index, token))
			.max();
		match longest {
			Some(len) => {
				let start = chars[index].0;
				let end = chars.get(index + len).map_or(text.len(), |(offset, _)| *offset);
				spans.push((start, end));
				index += len;
			}
			None => index += 1,
		}
	}
	spans
}

/// Number of chars of `chars[at..]` matched by `token`, if it matches.
fn matches_at(chars: &[(usize, char)], at: usize, token: &str) -> Option<usize> {
	let mut consumed = 0;
	let mut expected = token.chars().peekable();
	while expected.peek().is_some() {
		let (_, ch) = chars.get(at + consumed)?;
		for lower in ch.to_lowercase() {
			if expected.next() != Some(lower) {
				return None;
			}
		}
		consumed += 1;
	}
	(consumed > 0).then_some(consumed)
}

/// Remove highlight tags and decode the entities produced by [`escape_html`].
pub fn strip_markup(text: &str, start_tag: &str, end_tag: &str) -> String {
	let mut plain = text.to_string();
	for tag in [start_tag, end_tag] {
		if !tag.is_empty() {
			plain = plain.replace(tag, "");
		}
	}
	plain
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escapes_markup() {
		assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
	}

	#[test]
	fn wraps_every_token_case_insensitively() {
		assert_eq!(
			wrap_matches("Rust and rusty <tools>", "rust TOOLS", "<b>", "</b>"),
			"<b>Rust</b> and <b>rust</b>y &lt;<b>tools</b>&gt;"
		);
	}

	#[test]
	fn prefers_longest_token_at_a_position() {
		assert_eq!(wrap_matches("foobar", "foo foobar", "[", "]"), "[foobar]");
	}

	#[test]
	fn handles_multibyte_text() {
		assert_eq!(wrap_matches("Crème brûlée", "brû", "[", "]"), "Crème [brû]lée");
	}

	#[test]
	fn empty_query_only_escapes() {
		assert_eq!(wrap_matches("a<b", "  ", "[", "]"), "a&lt;b");
	}

	#[test]
	fn strip_reverses_wrap() {
		let wrapped = wrap_matches("Tom & <Jerry>", "jerry", "<mark>", "</mark>");
		assert_eq!(strip_markup(&wrapped, "<mark>", "</mark>"), "Tom & <Jerry>");
	}
}
