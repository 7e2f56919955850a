//! Single-value select.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::KeyEvent;
use tracing::trace;

use super::field::{BlurHandler, ChangeHandler, FieldBinding, HiddenInput};
use super::key::ListKey;
use super::navigation::{self, CloseReason, Transition};
use super::option::{ListOption, position_of};
use super::value::{ListboxError, ValueSource};
use crate::typeahead::{TypeaheadBuffer, find_next};

const WIDGET: &str = "Select";

/// A single-select list with keyboard navigation and typeahead.
///
/// Committing the currently selected option clears the selection; committing
/// any other option replaces it. Either way the list closes.
pub struct Select {
	options: Vec<ListOption>,
	value: ValueSource<Option<String>>,
	open: bool,
	highlighted: Option<usize>,
	typeahead: TypeaheadBuffer,
	name: Option<String>,
	on_change: Option<ChangeHandler<Option<String>>>,
	on_blur: Option<BlurHandler>,
}

impl Select {
	/// Create an uncontrolled select with nothing selected.
	pub fn new(options: Vec<ListOption>) -> Self {
		Self::with_source(options, ValueSource::Internal(None))
	}

	/// Create a select whose value is owned by the caller.
	pub fn controlled(options: Vec<ListOption>, value: Option<String>) -> Self {
		Self::with_source(options, ValueSource::External(value))
	}

	/// Create a controlled select wired to a form field.
	pub fn bind(options: Vec<ListOption>, field: FieldBinding<Option<String>>) -> Self {
		let FieldBinding {
			name,
			value,
			on_change,
			on_blur,
		} = field;
		let mut select = Self::with_source(options, ValueSource::External(value));
		select.name = Some(name);
		select.on_change = Some(on_change);
		select.on_blur = on_blur;
		select
	}

	fn with_source(options: Vec<ListOption>, value: ValueSource<Option<String>>) -> Self {
		Self {
			options,
			value,
			open: false,
			highlighted: None,
			typeahead: TypeaheadBuffer::default(),
			name: None,
			on_change: None,
			on_blur: None,
		}
	}

	/// Preselect `value` in an uncontrolled select.
	#[must_use]
	pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
		if !self.value.is_controlled() {
			self.value = ValueSource::Internal(Some(value.into()));
		}
		self
	}

	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	#[must_use]
	pub fn with_typeahead_timeout(mut self, timeout: Duration) -> Self {
		self.typeahead = TypeaheadBuffer::new(timeout);
		self
	}

	#[must_use]
	pub fn on_change(mut self, handler: impl FnMut(&Option<String>) + 'static) -> Self {
		self.on_change = Some(Box::new(handler));
		self
	}

	#[must_use]
	pub fn on_blur(mut self, handler: impl FnMut() + 'static) -> Self {
		self.on_blur = Some(Box::new(handler));
		self
	}

	pub fn options(&self) -> &[ListOption] {
		&self.options
	}

	/// Replace the option list. The current value is kept even if it no
	/// longer appears among the options.
	pub fn set_options(&mut self, options: Vec<ListOption>) {
		self.options = options;
		self.highlighted = navigation::clamp(self.highlighted, self.options.len());
	}

	pub fn value(&self) -> Option<&str> {
		self.value.get().as_deref()
	}

	/// The option matching the current value, if it is still listed.
	pub fn selected_option(&self) -> Option<&ListOption> {
		let value = self.value()?;
		position_of(&self.options, value).map(|index| &self.options[index])
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn is_controlled(&self) -> bool {
		self.value.is_controlled()
	}

	/// Highlighted index to render, `None` while closed.
	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted.filter(|_| self.open)
	}

	/// Highlight retained across open/close cycles.
	pub fn retained_highlight(&self) -> Option<usize> {
		self.highlighted
	}

	/// Mirror an externally owned value, e.g. after the host accepted a change.
	pub fn sync_external(&mut self, value: Option<String>) -> Result<(), ListboxError> {
		self.value.sync_external(value, WIDGET)
	}

	/// Serialised value for native form submission.
	pub fn hidden_input(&self) -> HiddenInput {
		HiddenInput {
			name: self.name.clone(),
			value: self.value().unwrap_or_default().to_string(),
		}
	}

	/// Pointer activation of the trigger.
	pub fn toggle(&mut self) -> Transition {
		if self.open {
			self.close(CloseReason::Trigger)
		} else {
			self.open()
		}
	}

	pub fn open(&mut self) -> Transition {
		if self.open {
			return Transition::None;
		}
		self.open = true;
		self.typeahead.clear();
		let len = self.options.len();
		let selected = self.value().and_then(|value| position_of(&self.options, value));
		self.highlighted = selected
			.or_else(|| navigation::clamp(self.highlighted, len))
			.or_else(|| navigation::first(len));
		trace!(highlighted = ?self.highlighted, "select opened");
		Transition::Opened
	}

	pub fn close(&mut self, reason: CloseReason) -> Transition {
		if !self.open {
			return Transition::None;
		}
		self.open = false;
		self.typeahead.clear();
		if reason.blurs()
			&& let Some(on_blur) = self.on_blur.as_mut()
		{
			on_blur();
		}
		Transition::Closed(reason)
	}

	/// Pointer-down outside the widget.
	pub fn dismiss(&mut self) -> Transition {
		self.close(CloseReason::Dismiss)
	}

	/// Feed a terminal key event.
	pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Transition {
		let typing = !self.typeahead.query(now).is_empty();
		self.handle_list_key(ListKey::from_event(key, typing), now)
	}

	pub fn handle_list_key(&mut self, key: ListKey, now: Instant) -> Transition {
		if !self.open {
			return match key {
				ListKey::Up | ListKey::Down | ListKey::Enter | ListKey::Space => self.open(),
				ListKey::Char(ch) => self.typeahead(ch, now),
				_ => Transition::None,
			};
		}

		let len = self.options.len();
		match key {
			ListKey::Down => self.highlight(navigation::next(self.highlighted, len)),
			ListKey::Up => self.highlight(navigation::previous(self.highlighted, len)),
			ListKey::Home => self.highlight(navigation::first(len)),
			ListKey::End => self.highlight(navigation::last(len)),
			ListKey::Enter | ListKey::Space => match self.highlighted {
				Some(index) => self.commit_index(index),
				None => Transition::None,
			},
			ListKey::Escape => self.close(CloseReason::Escape),
			ListKey::Tab => self.close(CloseReason::Tab),
			ListKey::Char(ch) => self.typeahead(ch, now),
			ListKey::Other => Transition::None,
		}
	}

	/// Commit the option at `index`, as when it is clicked.
	pub fn commit_index(&mut self, index: usize) -> Transition {
		if !self.open {
			return Transition::None;
		}
		let Some(option) = self.options.get(index) else {
			return Transition::None;
		};
		if option.disabled {
			return Transition::None;
		}

		let next = if self.value() == Some(option.value.as_str()) {
			None
		} else {
			Some(option.value.clone())
		};
		self.highlighted = Some(index);
		self.value.commit(next.clone());
		self.open = false;
		self.typeahead.clear();
		if let Some(on_change) = self.on_change.as_mut() {
			on_change(&next);
		}
		Transition::Committed { closed: true }
	}

	fn highlight(&mut self, index: Option<usize>) -> Transition {
		match index {
			Some(index) if self.highlighted != Some(index) => {
				self.highlighted = Some(index);
				Transition::Highlighted(index)
			}
			_ => Transition::None,
		}
	}

	fn typeahead(&mut self, ch: char, now: Instant) -> Transition {
		let query = self.typeahead.push_char(ch, now);
		match find_next(&self.options, query, self.highlighted) {
			Some(index) => self.highlight(Some(index)),
			None => Transition::None,
		}
	}
}

impl std::fmt::Debug for Select {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Select")
			.field("options", &self.options.len())
			.field("value", &self.value)
			.field("open", &self.open)
			.field("highlighted", &self.highlighted)
			.finish()
	}
}
