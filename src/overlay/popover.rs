//! Non-modal popover root.

use std::rc::Rc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Rect, Size};

use super::context::{OverlayContext, OverlayKind, Scope};
use super::floating::{FloatingAnchor, FloatingOptions, FloatingPosition};

/// Which interactions dismiss a non-modal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissPolicy {
	pub on_escape: bool,
	pub on_outside_pointer: bool,
}

impl Default for DismissPolicy {
	fn default() -> Self {
		Self {
			on_escape: true,
			on_outside_pointer: true,
		}
	}
}

/// Floating content anchored to a trigger, dismissed by outside clicks or
/// Escape according to its [`DismissPolicy`].
#[derive(Debug)]
pub struct Popover {
	context: OverlayContext,
	anchor: FloatingAnchor,
	dismiss: DismissPolicy,
}

impl Default for Popover {
	fn default() -> Self {
		Self::new()
	}
}

impl Popover {
	pub fn new() -> Self {
		Self::with_kind(OverlayKind::Popover)
	}

	pub(crate) fn with_kind(kind: OverlayKind) -> Self {
		Self {
			context: OverlayContext::new(kind),
			anchor: FloatingAnchor::default(),
			dismiss: DismissPolicy::default(),
		}
	}

	#[must_use]
	pub fn with_floating(mut self, options: FloatingOptions) -> Self {
		self.anchor = FloatingAnchor::new(options);
		self
	}

	#[must_use]
	pub fn with_dismiss_policy(mut self, policy: DismissPolicy) -> Self {
		self.dismiss = policy;
		self
	}

	#[must_use]
	pub fn on_open_change(self, handler: impl Fn(bool) + 'static) -> Self {
		self.context.set_on_open_change(Rc::new(handler));
		self
	}

	pub fn context(&self) -> &OverlayContext {
		&self.context
	}

	pub fn scope(&self, parent: &Scope) -> Scope {
		parent.provide(&self.context)
	}

	pub fn dismiss_policy(&self) -> DismissPolicy {
		self.dismiss
	}

	pub fn is_open(&self) -> bool {
		self.context.is_open()
	}

	pub fn open(&mut self) -> bool {
		self.context.set_open(true)
	}

	pub fn close(&mut self) -> bool {
		let changed = self.context.set_open(false);
		if changed {
			self.anchor.reset();
		}
		changed
	}

	pub fn toggle(&mut self) -> bool {
		if self.is_open() {
			self.close();
			false
		} else {
			self.open();
			true
		}
	}

	/// Pointer-down that landed outside both trigger and content.
	pub fn pointer_down_outside(&mut self) -> bool {
		self.dismiss.on_outside_pointer && self.close()
	}

	/// Returns `true` when the key dismissed the popover.
	pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
		key.kind != KeyEventKind::Release
			&& key.code == KeyCode::Esc
			&& self.dismiss.on_escape
			&& self.close()
	}

	/// Recompute placement after layout, scroll or resize.
	///
	/// Does nothing while closed. Returns the new position if it moved.
	pub fn layout(&mut self, trigger: Rect, content: Size, viewport: Rect) -> Option<FloatingPosition> {
		if !self.is_open() {
			return None;
		}
		// Closing through a sub-view clears the mounted position but not the anchor.
		let unplaced = self.context.position().is_none();
		let moved = self.anchor.update(trigger, content, viewport);
		let position = self.anchor.position();
		self.context.set_position(position);
		if unplaced { position } else { moved }
	}
}
