//! Modal dialog root.

use std::rc::Rc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::context::{OverlayContext, OverlayKind, Scope};
use super::scroll_lock::Document;

/// A modal overlay that suppresses page scrolling while open.
///
/// Content is labelled by the trigger and exposes `role=dialog` with
/// `aria-modal=true`. Dropping the dialog releases its scroll lock.
#[derive(Debug)]
pub struct Dialog {
	context: OverlayContext,
}

impl Dialog {
	pub fn new(document: Document) -> Self {
		let context = OverlayContext::new(OverlayKind::Dialog);
		context.set_document(document);
		Self { context }
	}

	#[must_use]
	pub fn on_open_change(self, handler: impl Fn(bool) + 'static) -> Self {
		self.context.set_on_open_change(Rc::new(handler));
		self
	}

	pub fn context(&self) -> &OverlayContext {
		&self.context
	}

	/// Scope for the dialog's sub-views.
	pub fn scope(&self, parent: &Scope) -> Scope {
		parent.provide(&self.context)
	}

	pub fn is_open(&self) -> bool {
		self.context.is_open()
	}

	pub fn open(&self) -> bool {
		self.context.set_open(true)
	}

	pub fn close(&self) -> bool {
		self.context.set_open(false)
	}

	/// Click on the backdrop behind the dialog.
	pub fn click_overlay(&self) -> bool {
		self.close()
	}

	/// Built-in close button in the dialog's corner.
	pub fn click_close_button(&self) -> bool {
		self.close()
	}

	/// Returns `true` when the key closed the dialog.
	pub fn handle_key(&self, key: &KeyEvent) -> bool {
		key.kind != KeyEventKind::Release && key.code == KeyCode::Esc && self.close()
	}
}
