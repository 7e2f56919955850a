//! Dropdown menu root and its items.
//!
//! Activating any enabled item closes the menu, including checkbox and radio
//! items. There is no mode that keeps the menu open after a selection.

use std::rc::Rc;
use std::time::Instant;

use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::{Rect, Size};

use super::context::{OverlayContext, OverlayKind, Scope};
use super::floating::{FloatingOptions, FloatingPosition};
use super::popover::{DismissPolicy, Popover};
use crate::listbox::ListKey;
use crate::typeahead::{TypeaheadBuffer, find_next};

/// A plain action item.
pub struct MenuItem {
	pub label: String,
	pub disabled: bool,
	on_select: Option<Rc<dyn Fn()>>,
}

impl MenuItem {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			disabled: false,
			on_select: None,
		}
	}

	#[must_use]
	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	#[must_use]
	pub fn on_select(mut self, handler: impl Fn() + 'static) -> Self {
		self.on_select = Some(Rc::new(handler));
		self
	}
}

/// An item with its own on/off state.
pub struct CheckboxItem {
	pub label: String,
	pub checked: bool,
	pub disabled: bool,
	on_checked_change: Option<Rc<dyn Fn(bool)>>,
}

impl CheckboxItem {
	pub fn new(label: impl Into<String>, checked: bool) -> Self {
		Self {
			label: label.into(),
			checked,
			disabled: false,
			on_checked_change: None,
		}
	}

	#[must_use]
	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	#[must_use]
	pub fn on_checked_change(mut self, handler: impl Fn(bool) + 'static) -> Self {
		self.on_checked_change = Some(Rc::new(handler));
		self
	}
}

/// A set of mutually exclusive radio items.
pub struct RadioGroup {
	pub name: String,
	pub value: Option<String>,
	on_value_change: Option<Rc<dyn Fn(&str)>>,
}

impl RadioGroup {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: None,
			on_value_change: None,
		}
	}

	#[must_use]
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	#[must_use]
	pub fn on_value_change(mut self, handler: impl Fn(&str) + 'static) -> Self {
		self.on_value_change = Some(Rc::new(handler));
		self
	}
}

/// One choice inside a [`RadioGroup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioItem {
	pub value: String,
	pub label: String,
	pub disabled: bool,
}

impl RadioItem {
	pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			label: label.into(),
			disabled: false,
		}
	}

	#[must_use]
	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}
}

enum MenuEntry {
	Item(MenuItem),
	Checkbox(CheckboxItem),
	Radio { group: usize, item: RadioItem },
	Label(String),
	Separator,
}

impl MenuEntry {
	fn label(&self) -> &str {
		match self {
			Self::Item(item) => &item.label,
			Self::Checkbox(item) => &item.label,
			Self::Radio { item, .. } => &item.label,
			Self::Label(text) => text,
			Self::Separator => "",
		}
	}

	/// Whether the entry can be highlighted and activated.
	fn is_interactive(&self) -> bool {
		match self {
			Self::Item(item) => !item.disabled,
			Self::Checkbox(item) => !item.disabled,
			Self::Radio { item, .. } => !item.disabled,
			Self::Label(_) | Self::Separator => false,
		}
	}
}

/// Render-ready description of a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntryView<'a> {
	Item {
		label: &'a str,
		disabled: bool,
		highlighted: bool,
	},
	Checkbox {
		label: &'a str,
		checked: bool,
		disabled: bool,
		highlighted: bool,
	},
	Radio {
		label: &'a str,
		checked: bool,
		disabled: bool,
		highlighted: bool,
	},
	Label(&'a str),
	Separator,
}

/// What activating an entry did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuActivation {
	/// Disabled, non-interactive or out-of-range entry; nothing happened.
	Ignored,
	Selected,
	Toggled { checked: bool },
	Chosen { group: String, value: String },
}

/// A non-modal menu anchored to a trigger.
pub struct DropdownMenu {
	popover: Popover,
	entries: Vec<MenuEntry>,
	groups: Vec<RadioGroup>,
	highlighted: Option<usize>,
	typeahead: TypeaheadBuffer,
	/// Open session the highlight and typeahead belong to.
	session: u64,
}

impl Default for DropdownMenu {
	fn default() -> Self {
		Self::new()
	}
}

impl DropdownMenu {
	pub fn new() -> Self {
		Self {
			popover: Popover::with_kind(OverlayKind::Menu),
			entries: Vec::new(),
			groups: Vec::new(),
			highlighted: None,
			typeahead: TypeaheadBuffer::default(),
			session: 0,
		}
	}

	#[must_use]
	pub fn with_floating(mut self, options: FloatingOptions) -> Self {
		self.popover = self.popover.with_floating(options);
		self
	}

	#[must_use]
	pub fn with_dismiss_policy(mut self, policy: DismissPolicy) -> Self {
		self.popover = self.popover.with_dismiss_policy(policy);
		self
	}

	#[must_use]
	pub fn on_open_change(mut self, handler: impl Fn(bool) + 'static) -> Self {
		self.popover = self.popover.on_open_change(handler);
		self
	}

	#[must_use]
	pub fn item(mut self, item: MenuItem) -> Self {
		self.entries.push(MenuEntry::Item(item));
		self
	}

	#[must_use]
	pub fn checkbox(mut self, item: CheckboxItem) -> Self {
		self.entries.push(MenuEntry::Checkbox(item));
		self
	}

	#[must_use]
	pub fn radio_group(mut self, group: RadioGroup, items: impl IntoIterator<Item = RadioItem>) -> Self {
		let index = self.groups.len();
		self.groups.push(group);
		self.entries.extend(
			items
				.into_iter()
				.map(|item| MenuEntry::Radio { group: index, item }),
		);
		self
	}

	#[must_use]
	pub fn label(mut self, text: impl Into<String>) -> Self {
		self.entries.push(MenuEntry::Label(text.into()));
		self
	}

	#[must_use]
	pub fn separator(mut self) -> Self {
		self.entries.push(MenuEntry::Separator);
		self
	}

	pub fn context(&self) -> &OverlayContext {
		self.popover.context()
	}

	pub fn scope(&self, parent: &Scope) -> Scope {
		self.popover.scope(parent)
	}

	pub fn is_open(&self) -> bool {
		self.popover.is_open()
	}

	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted
			.filter(|_| self.is_open() && self.session == self.context().session())
	}

	/// Current value of the radio group called `name`.
	pub fn radio_value(&self, name: &str) -> Option<&str> {
		self.groups
			.iter()
			.find(|group| group.name == name)
			.and_then(|group| group.value.as_deref())
	}

	/// Checked state of the checkbox at `index`.
	pub fn is_checked(&self, index: usize) -> Option<bool> {
		match self.entries.get(index)? {
			MenuEntry::Checkbox(item) => Some(item.checked),
			MenuEntry::Radio { group, item } => {
				Some(self.groups[*group].value.as_deref() == Some(item.value.as_str()))
			}
			_ => None,
		}
	}

	pub fn entries(&self) -> Vec<MenuEntryView<'_>> {
		self.entries
			.iter()
			.enumerate()
			.map(|(index, entry)| {
				let highlighted = self.highlighted() == Some(index);
				match entry {
					MenuEntry::Item(item) => MenuEntryView::Item {
						label: &item.label,
						disabled: item.disabled,
						highlighted,
					},
					MenuEntry::Checkbox(item) => MenuEntryView::Checkbox {
						label: &item.label,
						checked: item.checked,
						disabled: item.disabled,
						highlighted,
					},
					MenuEntry::Radio { group, item } => MenuEntryView::Radio {
						label: &item.label,
						checked: self.groups[*group].value.as_deref() == Some(item.value.as_str()),
						disabled: item.disabled,
						highlighted,
					},
					MenuEntry::Label(text) => MenuEntryView::Label(text),
					MenuEntry::Separator => MenuEntryView::Separator,
				}
			})
			.collect()
	}

	pub fn open(&mut self) -> bool {
		let opened = self.popover.open();
		self.sync_session();
		opened
	}

	pub fn close(&mut self) -> bool {
		self.typeahead.clear();
		self.popover.close()
	}

	pub fn toggle(&mut self) -> bool {
		if self.is_open() {
			self.close();
			false
		} else {
			self.open()
		}
	}

	pub fn pointer_down_outside(&mut self) -> bool {
		self.popover.pointer_down_outside()
	}

	pub fn layout(&mut self, trigger: Rect, content: Size, viewport: Rect) -> Option<FloatingPosition> {
		self.popover.layout(trigger, content, viewport)
	}

	/// Feed a key event to the menu. Returns the activation outcome when the
	/// key activated an entry.
	pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Option<MenuActivation> {
		self.sync_session();
		let typing = !self.typeahead.query(now).is_empty();
		let list_key = ListKey::from_event(key, typing);

		if !self.is_open() {
			match list_key {
				ListKey::Down | ListKey::Enter | ListKey::Space => {
					self.open();
					self.highlighted = self.step(None, true);
				}
				ListKey::Up => {
					self.open();
					self.highlighted = self.step(None, false);
				}
				_ => {}
			}
			return None;
		}

		match list_key {
			ListKey::Down => self.highlighted = self.step(self.highlighted, true),
			ListKey::Up => self.highlighted = self.step(self.highlighted, false),
			ListKey::Home => self.highlighted = self.step(None, true),
			ListKey::End => self.highlighted = self.step(None, false),
			ListKey::Enter | ListKey::Space => {
				return self.highlighted.map(|index| self.activate(index));
			}
			ListKey::Escape => {
				self.popover.handle_key(key);
			}
			ListKey::Tab => {
				self.close();
			}
			ListKey::Char(ch) => {
				let query = self.typeahead.push_char(ch, now).to_string();
				if let Some(index) = self.find_interactive(&query) {
					self.highlighted = Some(index);
				}
			}
			ListKey::Other => {}
		}
		None
	}

	/// Activate the entry at `index`, as a click does.
	///
	/// Enabled entries run their handler and close the menu; checkbox and radio
	/// entries update their state first. A closed menu ignores activation.
	pub fn activate(&mut self, index: usize) -> MenuActivation {
		if !self.is_open() {
			return MenuActivation::Ignored;
		}
		let Some(entry) = self.entries.get_mut(index) else {
			return MenuActivation::Ignored;
		};
		if !entry.is_interactive() {
			return MenuActivation::Ignored;
		}

		match entry {
			MenuEntry::Item(item) => {
				let handler = item.on_select.clone();
				self.close();
				if let Some(handler) = handler {
					handler();
				}
				MenuActivation::Selected
			}
			MenuEntry::Checkbox(item) => {
				item.checked = !item.checked;
				let checked = item.checked;
				let handler = item.on_checked_change.clone();
				self.close();
				if let Some(handler) = handler {
					handler(checked);
				}
				MenuActivation::Toggled { checked }
			}
			MenuEntry::Radio { group, item } => {
				let value = item.value.clone();
				let group = &mut self.groups[*group];
				group.value = Some(value.clone());
				let name = group.name.clone();
				let handler = group.on_value_change.clone();
				self.close();
				if let Some(handler) = handler {
					handler(&value);
				}
				MenuActivation::Chosen { group: name, value }
			}
			MenuEntry::Label(_) | MenuEntry::Separator => MenuActivation::Ignored,
		}
	}

	/// Drop the highlight and typeahead left over from an earlier open
	/// session, however the menu was reopened.
	fn sync_session(&mut self) {
		let session = self.context().session();
		if self.session != session {
			self.session = session;
			self.highlighted = None;
			self.typeahead.clear();
		}
	}

	/// Next interactive entry after `from` in the given direction, wrapping.
	/// With `from == None` this is the first (or last) interactive entry.
	fn step(&self, from: Option<usize>, forward: bool) -> Option<usize> {
		let len = self.entries.len();
		if len == 0 {
			return None;
		}
		let start = match (from, forward) {
			(Some(index), true) => index + 1,
			(Some(index), false) => index + len - 1,
			(None, true) => 0,
			(None, false) => len - 1,
		};
		(0..len)
			.map(|offset| {
				if forward {
					(start + offset) % len
				} else {
					(start + len - offset) % len
				}
			})
			.find(|&index| self.entries[index].is_interactive())
	}

	fn find_interactive(&self, query: &str) -> Option<usize> {
		let candidates: Vec<usize> = (0..self.entries.len())
			.filter(|&index| self.entries[index].is_interactive())
			.collect();
		let labels: Vec<&str> = candidates
			.iter()
			.map(|&index| self.entries[index].label())
			.collect();
		let start = self
			.highlighted
			.and_then(|current| candidates.iter().position(|&index| index == current));
		find_next(&labels, query, start).map(|position| candidates[position])
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::time::Duration;

	use ratatui::crossterm::event::{KeyCode, KeyModifiers};

	use super::*;
	use crate::overlay::{Content, Trigger};

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn edit_menu(log: &Rc<RefCell<Vec<String>>>) -> DropdownMenu {
		let cut = Rc::clone(log);
		let wrap = Rc::clone(log);
		let size = Rc::clone(log);
		DropdownMenu::new()
			.label("Edit")
			.item(MenuItem::new("Cut").on_select(move || cut.borrow_mut().push("cut".into())))
			.item(MenuItem::new("Copy").disabled(true))
			.separator()
			.checkbox(
				CheckboxItem::new("Wrap lines", false)
					.on_checked_change(move |checked| wrap.borrow_mut().push(format!("wrap={checked}"))),
			)
			.radio_group(
				RadioGroup::new("size")
					.with_value("m")
					.on_value_change(move |value| size.borrow_mut().push(format!("size={value}"))),
				[RadioItem::new("s", "Small"), RadioItem::new("m", "Medium")],
			)
	}

	#[test]
	fn every_item_kind_closes_the_menu() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);

		menu.open();
		assert_eq!(menu.activate(1), MenuActivation::Selected);
		assert!(!menu.is_open());

		menu.open();
		assert_eq!(menu.activate(4), MenuActivation::Toggled { checked: true });
		assert!(!menu.is_open());
		assert_eq!(menu.is_checked(4), Some(true));

		menu.open();
		assert_eq!(
			menu.activate(5),
			MenuActivation::Chosen {
				group: "size".into(),
				value: "s".into(),
			}
		);
		assert!(!menu.is_open());
		assert_eq!(menu.radio_value("size"), Some("s"));
		assert_eq!(menu.is_checked(6), Some(false));

		assert_eq!(*log.borrow(), ["cut", "wrap=true", "size=s"]);
	}

	#[test]
	fn disabled_and_static_entries_are_inert() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		menu.open();
		assert_eq!(menu.activate(0), MenuActivation::Ignored);
		assert_eq!(menu.activate(2), MenuActivation::Ignored);
		assert_eq!(menu.activate(3), MenuActivation::Ignored);
		assert_eq!(menu.activate(42), MenuActivation::Ignored);
		assert!(menu.is_open());
		assert!(log.borrow().is_empty());
	}

	#[test]
	fn arrow_keys_skip_non_interactive_entries() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		let now = Instant::now();

		assert_eq!(menu.handle_key(&key(KeyCode::Down), now), None);
		assert!(menu.is_open());
		assert_eq!(menu.highlighted(), Some(1));

		menu.handle_key(&key(KeyCode::Down), now);
		assert_eq!(menu.highlighted(), Some(4));
		menu.handle_key(&key(KeyCode::End), now);
		assert_eq!(menu.highlighted(), Some(6));
		menu.handle_key(&key(KeyCode::Down), now);
		assert_eq!(menu.highlighted(), Some(1));
		menu.handle_key(&key(KeyCode::Up), now);
		assert_eq!(menu.highlighted(), Some(6));

		assert_eq!(
			menu.handle_key(&key(KeyCode::Enter), now),
			Some(MenuActivation::Chosen {
				group: "size".into(),
				value: "m".into(),
			})
		);
		assert!(!menu.is_open());
	}

	#[test]
	fn typeahead_jumps_to_matching_label() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		let now = Instant::now();
		menu.open();

		menu.handle_key(&key(KeyCode::Char('w')), now);
		assert_eq!(menu.highlighted(), Some(4));
		// Disabled "Copy" is never a typeahead target.
		menu.handle_key(&key(KeyCode::Char('c')), now + Duration::from_secs(1));
		assert_eq!(menu.highlighted(), Some(1));
	}

	#[test]
	fn escape_and_tab_close_without_activation() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		let now = Instant::now();

		menu.open();
		assert_eq!(menu.handle_key(&key(KeyCode::Esc), now), None);
		assert!(!menu.is_open());

		menu.open();
		menu.handle_key(&key(KeyCode::Tab), now);
		assert!(!menu.is_open());
		assert!(log.borrow().is_empty());
	}

	#[test]
	fn reopening_through_the_trigger_starts_fresh() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		let scope = menu.scope(&Scope::new());
		let trigger = Trigger::resolve(&scope, OverlayKind::Menu).expect("trigger");
		let now = Instant::now();

		menu.handle_key(&key(KeyCode::Down), now);
		menu.handle_key(&key(KeyCode::Down), now);
		assert_eq!(menu.highlighted(), Some(4));

		trigger.activate().expect("close");
		trigger.activate().expect("reopen");
		assert!(menu.is_open());
		assert_eq!(menu.highlighted(), None);

		menu.handle_key(&key(KeyCode::Down), now);
		assert_eq!(menu.highlighted(), Some(1));
	}

	#[test]
	fn closed_menu_ignores_activation() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		assert_eq!(menu.activate(1), MenuActivation::Ignored);
		assert_eq!(menu.is_checked(4), Some(false));
		assert!(log.borrow().is_empty());
	}

	#[test]
	fn handler_may_reopen_the_menu() {
		let changes = Rc::new(Cell::new(0));
		let counter = Rc::clone(&changes);
		let menu = DropdownMenu::new().on_open_change(move |_| counter.set(counter.get() + 1));
		let reopen = menu.context().clone();
		let mut menu = menu.item(MenuItem::new("Again").on_select(move || {
			reopen.set_open(true);
		}));

		menu.open();
		assert_eq!(menu.activate(0), MenuActivation::Selected);
		assert!(menu.is_open());
		assert_eq!(changes.get(), 3);
	}

	#[test]
	fn content_renders_with_menu_role() {
		let mut menu = DropdownMenu::new().item(MenuItem::new("Open"));
		let scope = menu.scope(&Scope::new());
		let trigger = Trigger::resolve(&scope, OverlayKind::Menu).expect("trigger");
		let content = Content::resolve(&scope, OverlayKind::Menu).expect("content");

		assert_eq!(trigger.props().expect("props").aria_haspopup, "menu");
		trigger.activate().expect("activate");
		let props = content.render().expect("render").expect("mounted");
		assert_eq!(props.role, "menu");

		menu.activate(0);
		assert_eq!(content.render().expect("render"), None);
	}

	#[test]
	fn entries_describe_render_state() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut menu = edit_menu(&log);
		menu.open();
		menu.handle_key(&key(KeyCode::Home), Instant::now());

		let entries = menu.entries();
		assert_eq!(entries[0], MenuEntryView::Label("Edit"));
		assert_eq!(
			entries[1],
			MenuEntryView::Item {
				label: "Cut",
				disabled: false,
				highlighted: true,
			}
		);
		assert_eq!(entries[3], MenuEntryView::Separator);
		assert_eq!(
			entries[6],
			MenuEntryView::Radio {
				label: "Medium",
				checked: true,
				disabled: false,
				highlighted: false,
			}
		);
	}
}
