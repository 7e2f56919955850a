//! Overlay primitives: [`Dialog`], [`Popover`] and [`DropdownMenu`].
//!
//! Each root owns an [`OverlayContext`]. Sub-views ([`Trigger`], [`Content`],
//! [`Close`]) are resolved from a [`Scope`] built by the root, so any nesting
//! of roots can be composed without threading props by hand.

mod context;
mod dialog;
mod error;
pub mod floating;
mod menu;
mod popover;
mod scroll_lock;

pub use context::{
	Close, Content, ContentProps, OpenChangeHandler, OverlayContext, OverlayKind, Scope, Trigger,
	TriggerProps,
};
pub use dialog::Dialog;
pub use error::OverlayError;
pub use floating::{FloatingAnchor, FloatingOptions, FloatingPosition, compute_position};
pub use menu::{
	CheckboxItem, DropdownMenu, MenuActivation, MenuEntryView, MenuItem, RadioGroup, RadioItem,
};
pub use popover::{DismissPolicy, Popover};
pub use scroll_lock::{Document, ScrollLock};
