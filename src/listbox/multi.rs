//! Multi-value select.

use std::time::{Duration, Instant};

use indexmap::IndexSet;
use ratatui::crossterm::event::KeyEvent;
use serde_json::Value;

use super::field::{BlurHandler, ChangeHandler, FieldBinding, HiddenInput};
use super::key::ListKey;
use super::navigation::{self, CloseReason, Transition};
use super::option::{ListOption, position_of};
use super::overflow::{TagMetrics, TagOverflow, fit_tags};
use super::value::{ListboxError, ValueSource};
use crate::typeahead::{TypeaheadBuffer, find_next};

const WIDGET: &str = "MultiSelect";

/// Ordered set of selected values; insertion order is selection order.
pub type Selection = IndexSet<String>;

/// A list that toggles membership of each committed option and stays open.
///
/// Selected values are opaque: values missing from the current option list are
/// kept until the user removes them.
pub struct MultiSelect {
	options: Vec<ListOption>,
	value: ValueSource<Selection>,
	open: bool,
	highlighted: Option<usize>,
	typeahead: TypeaheadBuffer,
	name: Option<String>,
	on_change: Option<ChangeHandler<Selection>>,
	on_blur: Option<BlurHandler>,
}

impl MultiSelect {
	pub fn new(options: Vec<ListOption>) -> Self {
		Self::with_source(options, ValueSource::Internal(Selection::new()))
	}

	pub fn controlled(options: Vec<ListOption>, value: Selection) -> Self {
		Self::with_source(options, ValueSource::External(value))
	}

	pub fn bind(options: Vec<ListOption>, field: FieldBinding<Selection>) -> Self {
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

	fn with_source(options: Vec<ListOption>, value: ValueSource<Selection>) -> Self {
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

	#[must_use]
	pub fn with_default_values<I, S>(mut self, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if !self.value.is_controlled() {
			self.value = ValueSource::Internal(values.into_iter().map(Into::into).collect());
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
	pub fn on_change(mut self, handler: impl FnMut(&Selection) + 'static) -> Self {
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

	pub fn set_options(&mut self, options: Vec<ListOption>) {
		self.options = options;
		self.highlighted = navigation::clamp(self.highlighted, self.options.len());
	}

	pub fn values(&self) -> &Selection {
		self.value.get()
	}

	pub fn is_selected(&self, value: &str) -> bool {
		self.values().contains(value)
	}

	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted.filter(|_| self.open)
	}

	pub fn sync_external(&mut self, values: Selection) -> Result<(), ListboxError> {
		self.value.sync_external(values, WIDGET)
	}

	/// Serialised value as a JSON array of strings.
	pub fn hidden_input(&self) -> HiddenInput {
		let values = self.values().iter().cloned().map(Value::String).collect();
		HiddenInput {
			name: self.name.clone(),
			value: Value::Array(values).to_string(),
		}
	}

	/// Labels for the selected values, falling back to the raw value for
	/// entries that are no longer listed.
	pub fn tag_labels(&self) -> Vec<&str> {
		self.values()
			.iter()
			.map(|value| {
				position_of(&self.options, value)
					.map_or(value.as_str(), |index| self.options[index].label.as_str())
			})
			.collect()
	}

	/// How many tags fit in a trigger `width` cells wide.
	pub fn tag_overflow(&self, width: u16, metrics: TagMetrics) -> TagOverflow {
		fit_tags(self.tag_labels(), width, metrics)
	}

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
		self.highlighted = navigation::first(self.options.len());
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

	pub fn dismiss(&mut self) -> Transition {
		self.close(CloseReason::Dismiss)
	}

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

	/// Toggle the option at `index` without closing the list.
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
		let value = option.value.clone();
		self.highlighted = Some(index);
		self.toggle_value(value);
		Transition::Committed { closed: false }
	}

	/// Remove a selected value, as from a tag's remove button.
	pub fn remove(&mut self, value: &str) -> bool {
		if !self.is_selected(value) {
			return false;
		}
		self.toggle_value(value.to_string());
		true
	}

	/// Remove every selected value.
	pub fn clear(&mut self) {
		if self.values().is_empty() {
			return;
		}
		self.emit(Selection::new());
	}

	fn toggle_value(&mut self, value: String) {
		let mut next = self.values().clone();
		if !next.shift_remove(&value) {
			next.insert(value);
		}
		self.emit(next);
	}

	fn emit(&mut self, next: Selection) {
		if let Some(on_change) = self.on_change.as_mut() {
			on_change(&next);
		}
		self.value.commit(next);
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

impl std::fmt::Debug for MultiSelect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MultiSelect")
			.field("options", &self.options.len())
			.field("value", &self.value)
			.field("open", &self.open)
			.field("highlighted", &self.highlighted)
			.finish()
	}
}
