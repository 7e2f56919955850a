//! Shared open/close state for overlay roots and the sub-views that read it.
//!
//! A root owns an [`OverlayContext`]. Sub-views never receive it directly:
//! they resolve the nearest root of their kind from a [`Scope`] and keep only
//! a weak reference, so a sub-view can never keep a dropped root alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use super::error::OverlayError;
use super::floating::FloatingPosition;
use super::scroll_lock::{Document, ScrollLock};

static NEXT_OVERLAY_ID: AtomicU64 = AtomicU64::new(1);

/// The family of root a sub-view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
	Dialog,
	Popover,
	Menu,
}

impl OverlayKind {
	fn slug(self) -> &'static str {
		match self {
			Self::Dialog => "dialog",
			Self::Popover => "popover",
			Self::Menu => "menu",
		}
	}
}

impl fmt::Display for OverlayKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Dialog => "Dialog",
			Self::Popover => "Popover",
			Self::Menu => "DropdownMenu",
		};
		f.write_str(name)
	}
}

/// Callback fired after the open state changes.
pub type OpenChangeHandler = Rc<dyn Fn(bool)>;

struct OverlayState {
	kind: OverlayKind,
	open: bool,
	/// Number of times the overlay has opened.
	sessions: u64,
	trigger_id: String,
	content_id: String,
	document: Option<Document>,
	scroll_lock: Option<ScrollLock>,
	position: Option<FloatingPosition>,
	on_open_change: Option<OpenChangeHandler>,
}

/// Strong handle held by an overlay root.
#[derive(Clone)]
pub struct OverlayContext {
	inner: Rc<RefCell<OverlayState>>,
}

impl OverlayContext {
	pub(crate) fn new(kind: OverlayKind) -> Self {
		let id = NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed);
		let base = format!("frond-{}-{id}", kind.slug());
		Self {
			inner: Rc::new(RefCell::new(OverlayState {
				kind,
				open: false,
				sessions: 0,
				trigger_id: format!("{base}-trigger"),
				content_id: format!("{base}-content"),
				document: None,
				scroll_lock: None,
				position: None,
				on_open_change: None,
			})),
		}
	}

	/// Make this overlay modal: opening it locks `document` scrolling.
	pub(crate) fn set_document(&self, document: Document) {
		self.inner.borrow_mut().document = Some(document);
	}

	pub(crate) fn set_on_open_change(&self, handler: OpenChangeHandler) {
		self.inner.borrow_mut().on_open_change = Some(handler);
	}

	pub fn kind(&self) -> OverlayKind {
		self.inner.borrow().kind
	}

	pub fn is_open(&self) -> bool {
		self.inner.borrow().open
	}

	/// Counter bumped every time the overlay opens, by any path.
	pub fn session(&self) -> u64 {
		self.inner.borrow().sessions
	}

	pub fn trigger_id(&self) -> String {
		self.inner.borrow().trigger_id.clone()
	}

	pub fn content_id(&self) -> String {
		self.inner.borrow().content_id.clone()
	}

	pub fn position(&self) -> Option<FloatingPosition> {
		self.inner.borrow().position
	}

	pub(crate) fn set_position(&self, position: Option<FloatingPosition>) {
		self.inner.borrow_mut().position = position;
	}

	/// Change the open state. Returns `true` if it actually changed.
	///
	/// The open-change handler runs after the state borrow is released, so it
	/// may freely inspect or mutate the overlay again.
	pub fn set_open(&self, open: bool) -> bool {
		let (handler, released) = {
			let mut state = self.inner.borrow_mut();
			if state.open == open {
				return false;
			}
			state.open = open;
			let released = if open {
				state.sessions += 1;
				if let Some(document) = state.document.as_ref() {
					let lock = document.lock_scroll();
					state.scroll_lock = Some(lock);
				}
				None
			} else {
				state.position = None;
				state.scroll_lock.take()
			};
			trace!(kind = %state.kind, open, "overlay open state changed");
			(state.on_open_change.clone(), released)
		};
		// Release the scroll lock outside the borrow; its drop touches the document only.
		drop(released);
		if let Some(handler) = handler {
			handler(open);
		}
		true
	}

	fn downgrade(&self) -> WeakOverlay {
		WeakOverlay {
			kind: self.kind(),
			inner: Rc::downgrade(&self.inner),
		}
	}
}

impl fmt::Debug for OverlayContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.borrow();
		f.debug_struct("OverlayContext")
			.field("kind", &state.kind)
			.field("open", &state.open)
			.field("trigger_id", &state.trigger_id)
			.finish()
	}
}

#[derive(Clone)]
struct WeakOverlay {
	kind: OverlayKind,
	inner: Weak<RefCell<OverlayState>>,
}

impl WeakOverlay {
	fn upgrade(&self, component: &'static str) -> Result<OverlayContext, OverlayError> {
		self.inner
			.upgrade()
			.map(|inner| OverlayContext { inner })
			.ok_or(OverlayError::RootDropped {
				component,
				root: self.kind,
			})
	}
}

/// The chain of overlay roots enclosing a point in the composition tree.
///
/// Scopes are cheap to clone; providing a root returns a child scope and
/// leaves the parent untouched.
#[derive(Clone, Default)]
pub struct Scope {
	providers: Vec<WeakOverlay>,
}

impl Scope {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Child scope in which `context` is the nearest root of its kind.
	#[must_use]
	pub fn provide(&self, context: &OverlayContext) -> Self {
		let mut providers = self.providers.clone();
		providers.push(context.downgrade());
		Self { providers }
	}

	fn nearest(&self, kind: OverlayKind) -> Option<&WeakOverlay> {
		self.providers.iter().rev().find(|provider| provider.kind == kind)
	}

	fn resolve(
		&self,
		kind: OverlayKind,
		component: &'static str,
	) -> Result<WeakOverlay, OverlayError> {
		self.nearest(kind)
			.cloned()
			.ok_or(OverlayError::MissingRoot {
				component,
				root: kind,
			})
	}
}

impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.providers.iter().map(|provider| provider.kind))
			.finish()
	}
}

/// Accessibility attributes for a trigger element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerProps {
	pub id: String,
	pub aria_haspopup: &'static str,
	pub aria_expanded: bool,
	pub aria_controls: Option<String>,
}

/// Attributes for mounted overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentProps {
	pub id: String,
	pub role: &'static str,
	pub aria_modal: bool,
	pub aria_labelledby: String,
	/// Placement from the floating adapter; always `None` for dialogs.
	pub position: Option<FloatingPosition>,
}

/// Element that opens and closes its root.
#[derive(Clone)]
pub struct Trigger {
	root: WeakOverlay,
	component: &'static str,
}

impl Trigger {
	pub fn resolve(scope: &Scope, kind: OverlayKind) -> Result<Self, OverlayError> {
		let component = match kind {
			OverlayKind::Dialog => "DialogTrigger",
			OverlayKind::Popover => "PopoverTrigger",
			OverlayKind::Menu => "DropdownMenuTrigger",
		};
		Ok(Self {
			root: scope.resolve(kind, component)?,
			component,
		})
	}

	/// Toggle the root, as a click on the trigger does.
	pub fn activate(&self) -> Result<bool, OverlayError> {
		let context = self.root.upgrade(self.component)?;
		let open = !context.is_open();
		context.set_open(open);
		Ok(open)
	}

	pub fn props(&self) -> Result<TriggerProps, OverlayError> {
		let context = self.root.upgrade(self.component)?;
		let open = context.is_open();
		let aria_haspopup = match self.root.kind {
			OverlayKind::Dialog | OverlayKind::Popover => "dialog",
			OverlayKind::Menu => "menu",
		};
		Ok(TriggerProps {
			id: context.trigger_id(),
			aria_haspopup,
			aria_expanded: open,
			aria_controls: open.then(|| context.content_id()),
		})
	}
}

/// The overlay body. Nothing is mounted while the root is closed.
#[derive(Clone)]
pub struct Content {
	root: WeakOverlay,
	component: &'static str,
}

impl Content {
	pub fn resolve(scope: &Scope, kind: OverlayKind) -> Result<Self, OverlayError> {
		let component = match kind {
			OverlayKind::Dialog => "DialogContent",
			OverlayKind::Popover => "PopoverContent",
			OverlayKind::Menu => "DropdownMenuContent",
		};
		Ok(Self {
			root: scope.resolve(kind, component)?,
			component,
		})
	}

	/// Attributes for the mounted content, or `None` when closed.
	pub fn render(&self) -> Result<Option<ContentProps>, OverlayError> {
		let context = self.root.upgrade(self.component)?;
		if !context.is_open() {
			return Ok(None);
		}
		let (role, aria_modal) = match self.root.kind {
			OverlayKind::Dialog => ("dialog", true),
			OverlayKind::Popover => ("dialog", false),
			OverlayKind::Menu => ("menu", false),
		};
		Ok(Some(ContentProps {
			id: context.content_id(),
			role,
			aria_modal,
			aria_labelledby: context.trigger_id(),
			position: context.position(),
		}))
	}
}

/// Element that closes its root when activated.
#[derive(Clone)]
pub struct Close {
	root: WeakOverlay,
	component: &'static str,
}

impl Close {
	pub fn resolve(scope: &Scope, kind: OverlayKind) -> Result<Self, OverlayError> {
		let component = match kind {
			OverlayKind::Dialog => "DialogClose",
			OverlayKind::Popover => "PopoverClose",
			OverlayKind::Menu => "DropdownMenuClose",
		};
		Ok(Self {
			root: scope.resolve(kind, component)?,
			component,
		})
	}

	pub fn activate(&self) -> Result<bool, OverlayError> {
		let context = self.root.upgrade(self.component)?;
		Ok(context.set_open(false))
	}
}
