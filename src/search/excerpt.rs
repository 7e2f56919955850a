//! Bounded excerpts of long text centred on the first query match.

/// Target excerpt length in characters.
pub const DEFAULT_EXCERPT_LENGTH: usize = 115;

const ELLIPSIS: char = '…';

/// Cut `text` down to roughly `target` characters around the first match of
/// any `query` token.
///
/// The window is centred on the match, snapped inward to word boundaries that
/// keep the match whole, and marked with an ellipsis on each side where text
/// was dropped. Without a match the excerpt starts at the beginning of the
/// text. Text already within the target is returned unchanged.
pub fn excerpt(text: &str, query: &str, target: usize) -> String {
	let chars: Vec<char> = text.chars().collect();
	let len = chars.len();
	if len <= target || target == 0 {
		return text.to_string();
	}

	let found = first_match(&chars, query);
	let (window_start, window_end) = match found {
		Some((at, match_len)) => {
			let lead = target.saturating_sub(match_len) / 2;
			let start = at.saturating_sub(lead).min(len - target);
			(start, (start + target).max(at + match_len))
		}
		None => (0, target),
	};

	// Snapping never crosses into the match.
	let (keep_from, keep_to) = found.map_or((len, 0), |(at, match_len)| (at, at + match_len));
	let start = snap_start(&chars, window_start, keep_from);
	let end = snap_end(&chars, window_end, start, start.max(keep_to));

	let mut out = String::with_capacity(target + 8);
	if start > 0 {
		out.push(ELLIPSIS);
	}
	out.extend(chars[start..end].iter());
	if end < len {
		out.push(ELLIPSIS);
	}
	out
}

/// Char index and length of the earliest match of any query token.
fn first_match(chars: &[char], query: &str) -> Option<(usize, usize)> {
	let lowered: Vec<char> = chars
		.iter()
		.map(|ch| ch.to_lowercase().next().unwrap_or(*ch))
		.collect();
	query
		.split_whitespace()
		.filter_map(|token| {
			let needle: Vec<char> = token
				.chars()
				.map(|ch| ch.to_lowercase().next().unwrap_or(ch))
				.collect();
			if needle.is_empty() || needle.len() > lowered.len() {
				return None;
			}
			lowered
				.windows(needle.len())
				.position(|window| window == needle.as_slice())
				.map(|at| (at, needle.len()))
		})
		.min_by_key(|(at, _)| *at)
}

/// Move `start` forward past a partial word and any whitespace, but never
/// beyond `limit`.
fn snap_start(chars: &[char], start: usize, limit: usize) -> usize {
	if start == 0 {
		return 0;
	}
	let mut index = start;
	if !chars[index - 1].is_whitespace() {
		while index < chars.len() && !chars[index].is_whitespace() {
			index += 1;
		}
	}
	while index < chars.len() && chars[index].is_whitespace() {
		index += 1;
	}
	// A word running into the match or past the text: keep the hard cut.
	if index >= chars.len() || index > limit { start } else { index }
}

/// Move `end` back before a partial word and trailing whitespace, but never
/// below `floor`.
fn snap_end(chars: &[char], end: usize, start: usize, floor: usize) -> usize {
	if end >= chars.len() {
		return chars.len();
	}
	let mut index = end;
	if !chars[index].is_whitespace() {
		while index > floor && !chars[index - 1].is_whitespace() {
			index -= 1;
		}
	}
	while index > floor && chars[index - 1].is_whitespace() {
		index -= 1;
	}
	if index <= start { end } else { index }
}

#[cfg(test)]
mod tests {
	use super::*;

	const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
		tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
		exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

	#[test]
	fn short_text_is_untouched() {
		assert_eq!(excerpt("short text", "text", 115), "short text");
	}

	#[test]
	fn no_match_keeps_the_start() {
		let out = excerpt(LOREM, "zebra", 40);
		assert!(out.starts_with("Lorem ipsum"));
		assert!(out.ends_with('…'));
		assert!(out.chars().count() <= 41);
	}

	#[test]
	fn centres_on_first_match_with_ellipses() {
		let out = excerpt(LOREM, "veniam", 40);
		assert!(out.starts_with('…'), "{out}");
		assert!(out.ends_with('…'), "{out}");
		assert!(out.contains("veniam"), "{out}");
		assert!(out.chars().count() <= 42, "{out}");
	}

	#[test]
	fn cuts_on_word_boundaries() {
		let out = excerpt(LOREM, "magna", 50);
		let inner = out.trim_matches('…');
		let words: Vec<&str> = LOREM.split_whitespace().collect();
		for word in inner.split_whitespace() {
			assert!(words.contains(&word), "partial word {word:?} in {out}");
		}
	}

	#[test]
	fn match_near_the_end_keeps_the_tail() {
		let out = excerpt(LOREM, "consequat", 40);
		assert!(out.starts_with('…'));
		assert!(out.ends_with("consequat."));
	}

	#[test]
	fn match_inside_a_long_token_survives() {
		let text = format!(
			"{}https://example.com/{}needle and some trailing words here to pad the text out a bit more",
			"filler words ".repeat(12),
			"a".repeat(70),
		);
		let out = excerpt(&text, "needle", 115);
		assert!(out.contains("needle"), "{out}");
		assert!(out.starts_with('…'), "{out}");
		assert!(out.chars().count() <= 117, "{out}");
	}

	#[test]
	fn match_ending_a_long_token_keeps_its_tail() {
		let text = format!("{}{}needle{}", "b".repeat(200), "c".repeat(10), " tail".repeat(40));
		let out = excerpt(&text, "needle", 60);
		assert!(out.contains("needle"), "{out}");
	}
}
