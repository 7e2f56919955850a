//! Keyboard typeahead for option lists.
//!
//! Typing a few characters in quick succession builds a query that jumps the
//! highlight to the next option whose text starts with it. The buffer forgets
//! its contents once typing pauses for longer than the idle timeout.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Idle period after which the typeahead buffer resets.
pub const DEFAULT_TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(500);

/// Anything that can be matched by the typeahead buffer.
pub trait TypeaheadItem {
	/// Text compared against the buffered query.
	fn typeahead_text(&self) -> &str;
}

impl TypeaheadItem for str {
	fn typeahead_text(&self) -> &str {
		self
	}
}

impl TypeaheadItem for String {
	fn typeahead_text(&self) -> &str {
		self
	}
}

impl TypeaheadItem for &str {
	fn typeahead_text(&self) -> &str {
		self
	}
}

/// Accumulates recently typed characters into a timed query.
#[derive(Debug, Clone)]
pub struct TypeaheadBuffer {
	query: String,
	last_input: Option<Instant>,
	timeout: Duration,
}

impl Default for TypeaheadBuffer {
	fn default() -> Self {
		Self::new(DEFAULT_TYPEAHEAD_TIMEOUT)
	}
}

impl TypeaheadBuffer {
	#[must_use]
	pub fn new(timeout: Duration) -> Self {
		Self {
			query: String::new(),
			last_input: None,
			timeout,
		}
	}

	/// Append `ch` to the buffer and restart the idle window.
	///
	/// Returns the query after the push.
	pub fn push_char(&mut self, ch: char, now: Instant) -> &str {
		self.expire(now);
		self.query.extend(ch.to_lowercase());
		self.last_input = Some(now);
		&self.query
	}

	/// Current query, or an empty string once the idle window has lapsed.
	pub fn query(&mut self, now: Instant) -> &str {
		self.expire(now);
		&self.query
	}

	pub fn clear(&mut self) {
		self.query.clear();
		self.last_input = None;
	}

	#[must_use]
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	fn expire(&mut self, now: Instant) {
		if let Some(last) = self.last_input
			&& now.saturating_duration_since(last) >= self.timeout
		{
			self.clear();
		}
	}
}

/// Find the next item after `start` whose text starts with `query`.
///
/// The scan begins just after `start` (or at the first item when `start` is
/// `None`), wraps around, and ends on `start` itself. Matching ignores case.
#[must_use]
pub fn find_next<T>(items: &[T], query: &str, start: Option<usize>) -> Option<usize>
where
	T: TypeaheadItem,
{
	let len = items.len();
	if len == 0 || query.is_empty() {
		return None;
	}

	let needle = query.to_lowercase();
	let first = start.map_or(0, |index| (index + 1) % len);
	(0..len)
		.map(|step| (first + step) % len)
		.find(|&index| starts_with_ignore_case(items[index].typeahead_text(), &needle))
}

fn starts_with_ignore_case(text: &str, lowercase_needle: &str) -> bool {
	let mut haystack = text.chars().flat_map(char::to_lowercase);
	lowercase_needle
		.chars()
		.all(|expected| haystack.next() == Some(expected))
}

/// Extract the character a key press contributes to the typeahead buffer.
///
/// Navigation keys, releases and chords with Control/Alt/Super never feed the
/// buffer. Space only counts while a query is already being typed, so that a
/// lone space can still act as the commit key.
#[must_use]
pub fn typeahead_char(key: &KeyEvent, buffer_active: bool) -> Option<char> {
	if key.kind == KeyEventKind::Release {
		return None;
	}
	let chord = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
	if key.modifiers.intersects(chord) {
		return None;
	}
	match key.code {
		KeyCode::Char(' ') if !buffer_active => None,
		KeyCode::Char(ch) if !ch.is_control() => Some(ch),
		_ => None,
	}
}
