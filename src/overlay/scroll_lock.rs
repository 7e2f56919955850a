//! Document-level scroll suppression for modal overlays.
//!
//! Locks are reference counted: the first lock records the body's overflow
//! value and sets it to `hidden`; the last release restores the recorded
//! value. Nested dialogs therefore restore the original state exactly once,
//! whatever order they close in.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

const HIDDEN: &str = "hidden";

#[derive(Debug, Default)]
struct DocumentState {
	body_overflow: String,
	locks: usize,
	saved_overflow: Option<String>,
}

/// Shared handle to the host document's scroll state.
#[derive(Debug, Clone, Default)]
pub struct Document {
	inner: Rc<RefCell<DocumentState>>,
}

impl Document {
	pub fn new(body_overflow: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(DocumentState {
				body_overflow: body_overflow.into(),
				..DocumentState::default()
			})),
		}
	}

	pub fn body_overflow(&self) -> String {
		self.inner.borrow().body_overflow.clone()
	}

	/// Overwrite the body's overflow, as page code outside any dialog would.
	pub fn set_body_overflow(&self, overflow: impl Into<String>) {
		self.inner.borrow_mut().body_overflow = overflow.into();
	}

	/// Number of outstanding scroll locks.
	pub fn lock_count(&self) -> usize {
		self.inner.borrow().locks
	}

	/// Suppress page scrolling until the returned guard is dropped.
	#[must_use = "scrolling is restored as soon as the guard is dropped"]
	pub fn lock_scroll(&self) -> ScrollLock {
		let mut state = self.inner.borrow_mut();
		if state.locks == 0 {
			let previous = std::mem::replace(&mut state.body_overflow, HIDDEN.to_string());
			state.saved_overflow = Some(previous);
		}
		state.locks += 1;
		trace!(locks = state.locks, "scroll lock acquired");
		ScrollLock {
			document: self.clone(),
		}
	}
}

/// Guard returned by [`Document::lock_scroll`].
#[derive(Debug)]
pub struct ScrollLock {
	document: Document,
}

impl Drop for ScrollLock {
	fn drop(&mut self) {
		let mut state = self.document.inner.borrow_mut();
		state.locks = state.locks.saturating_sub(1);
		trace!(locks = state.locks, "scroll lock released");
		if state.locks == 0
			&& let Some(saved) = state.saved_overflow.take()
		{
			state.body_overflow = saved;
		}
	}
}
