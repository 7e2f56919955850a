use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys understood by list-style widgets, normalised from terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
	Up,
	Down,
	Home,
	End,
	Enter,
	Space,
	Escape,
	Tab,
	/// A printable character destined for the typeahead buffer.
	Char(char),
	Other,
}

impl ListKey {
	/// Normalise a key event.
	///
	/// `typeahead_active` tells whether a typeahead query is in progress, in which
	/// case a space is treated as part of the query rather than a commit.
	#[must_use]
	pub fn from_event(key: &KeyEvent, typeahead_active: bool) -> Self {
		if key.kind == KeyEventKind::Release {
			return Self::Other;
		}
		match key.code {
			KeyCode::Up => Self::Up,
			KeyCode::Down => Self::Down,
			KeyCode::Home => Self::Home,
			KeyCode::End => Self::End,
			KeyCode::Enter => Self::Enter,
			KeyCode::Esc => Self::Escape,
			KeyCode::Tab | KeyCode::BackTab => Self::Tab,
			_ => match crate::typeahead::typeahead_char(key, typeahead_active) {
				Some(ch) => Self::Char(ch),
				None if key.code == KeyCode::Char(' ') && !is_chord(key) => Self::Space,
				None => Self::Other,
			},
		}
	}
}

fn is_chord(key: &KeyEvent) -> bool {
	key.modifiers
		.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn space_commits_unless_typing() {
		assert_eq!(ListKey::from_event(&key(KeyCode::Char(' ')), false), ListKey::Space);
		assert_eq!(
			ListKey::from_event(&key(KeyCode::Char(' ')), true),
			ListKey::Char(' ')
		);
	}

	#[test]
	fn chords_are_ignored() {
		let chord = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
		assert_eq!(ListKey::from_event(&chord, false), ListKey::Other);
		assert_eq!(ListKey::from_event(&key(KeyCode::BackTab), false), ListKey::Tab);
	}

	#[test]
	fn modified_space_does_not_commit() {
		for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT, KeyModifiers::SUPER] {
			let chord = KeyEvent::new(KeyCode::Char(' '), modifiers);
			assert_eq!(ListKey::from_event(&chord, false), ListKey::Other);
		}
		let shifted = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::SHIFT);
		assert_eq!(ListKey::from_event(&shifted, false), ListKey::Space);
	}
}
