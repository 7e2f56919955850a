//! Placement of floating content relative to its trigger.
//!
//! Given the trigger's rectangle, the floating element's size and the
//! viewport, [`compute_position`] applies an offset along the main axis, flips
//! to the opposite side when the preferred side overflows, and shifts along
//! the cross axis to stay inside the viewport. [`FloatingAnchor`] caches the
//! inputs so hosts can recompute on every scroll or resize notification.

use ratatui::layout::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	Top,
	Bottom,
	Left,
	Right,
}

impl Side {
	#[must_use]
	pub fn opposite(self) -> Self {
		match self {
			Self::Top => Self::Bottom,
			Self::Bottom => Self::Top,
			Self::Left => Self::Right,
			Self::Right => Self::Left,
		}
	}

	fn is_vertical(self) -> bool {
		matches!(self, Self::Top | Self::Bottom)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
	#[default]
	Start,
	Center,
	End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
	pub side: Side,
	pub align: Align,
}

impl Default for Placement {
	fn default() -> Self {
		Self {
			side: Side::Bottom,
			align: Align::Start,
		}
	}
}

/// Tuning for [`compute_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingOptions {
	pub placement: Placement,
	/// Gap between trigger and content along the main axis.
	pub offset: u16,
	/// Try the opposite side when the preferred side overflows.
	pub flip: bool,
	/// Minimum distance from the viewport edge along the cross axis.
	pub shift_padding: u16,
}

impl Default for FloatingOptions {
	fn default() -> Self {
		Self {
			placement: Placement::default(),
			offset: 1,
			flip: true,
			shift_padding: 1,
		}
	}
}

/// Where to draw the floating element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingPosition {
	pub x: u16,
	pub y: u16,
	/// Placement actually used after flipping.
	pub placement: Placement,
}

impl FloatingPosition {
	#[must_use]
	pub fn rect(&self, size: Size) -> Rect {
		Rect::new(self.x, self.y, size.width, size.height)
	}
}

/// Compute the position of a `floating` element anchored to `trigger`.
#[must_use]
pub fn compute_position(
	trigger: Rect,
	floating: Size,
	viewport: Rect,
	options: FloatingOptions,
) -> FloatingPosition {
	let mut placement = options.placement;
	let (mut x, mut y) = coords(trigger, floating, placement, options.offset);

	if options.flip {
		let overflow = main_overflow(x, y, floating, viewport, placement.side);
		if overflow > 0 {
			let flipped = Placement {
				side: placement.side.opposite(),
				..placement
			};
			let (fx, fy) = coords(trigger, floating, flipped, options.offset);
			if main_overflow(fx, fy, floating, viewport, flipped.side) < overflow {
				placement = flipped;
				(x, y) = (fx, fy);
			}
		}
	}

	let padding = i32::from(options.shift_padding);
	if placement.side.is_vertical() {
		x = shift(x, i32::from(floating.width), viewport.x, viewport.width, padding);
		y = shift(y, i32::from(floating.height), viewport.y, viewport.height, 0);
	} else {
		y = shift(y, i32::from(floating.height), viewport.y, viewport.height, padding);
		x = shift(x, i32::from(floating.width), viewport.x, viewport.width, 0);
	}

	FloatingPosition {
		x: to_u16(x),
		y: to_u16(y),
		placement,
	}
}

fn coords(trigger: Rect, floating: Size, placement: Placement, offset: u16) -> (i32, i32) {
	let (tx, ty) = (i32::from(trigger.x), i32::from(trigger.y));
	let (tw, th) = (i32::from(trigger.width), i32::from(trigger.height));
	let (fw, fh) = (i32::from(floating.width), i32::from(floating.height));
	let offset = i32::from(offset);

	let cross = |start: i32, trigger_len: i32, floating_len: i32| match placement.align {
		Align::Start => start,
		Align::Center => start + (trigger_len - floating_len) / 2,
		Align::End => start + trigger_len - floating_len,
	};

	match placement.side {
		Side::Bottom => (cross(tx, tw, fw), ty + th + offset),
		Side::Top => (cross(tx, tw, fw), ty - offset - fh),
		Side::Right => (tx + tw + offset, cross(ty, th, fh)),
		Side::Left => (tx - offset - fw, cross(ty, th, fh)),
	}
}

/// Cells by which the element spills past the viewport on `side`.
fn main_overflow(x: i32, y: i32, floating: Size, viewport: Rect, side: Side) -> i32 {
	let overflow = match side {
		Side::Bottom => y + i32::from(floating.height) - i32::from(viewport.bottom()),
		Side::Top => i32::from(viewport.y) - y,
		Side::Right => x + i32::from(floating.width) - i32::from(viewport.right()),
		Side::Left => i32::from(viewport.x) - x,
	};
	overflow.max(0)
}

/// Clamp `start` so that `[start, start + len)` stays within the viewport span,
/// keeping `padding` cells clear where possible.
fn shift(start: i32, len: i32, origin: u16, extent: u16, padding: i32) -> i32 {
	let min = i32::from(origin) + padding;
	let max = i32::from(origin) + i32::from(extent) - padding - len;
	if max < min {
		return i32::from(origin).max(start.min(i32::from(origin) + i32::from(extent) - len));
	}
	start.clamp(min, max)
}

fn to_u16(value: i32) -> u16 {
	u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// Cached positioning inputs that can be re-evaluated on layout changes.
#[derive(Debug, Clone, Default)]
pub struct FloatingAnchor {
	options: FloatingOptions,
	last: Option<FloatingPosition>,
}

impl FloatingAnchor {
	#[must_use]
	pub fn new(options: FloatingOptions) -> Self {
		Self {
			options,
			last: None,
		}
	}

	pub fn options(&self) -> FloatingOptions {
		self.options
	}

	/// Last computed position, if any layout has been seen yet.
	pub fn position(&self) -> Option<FloatingPosition> {
		self.last
	}

	/// Recompute after a scroll, resize or content change.
	///
	/// Returns the new position when it differs from the previous one.
	pub fn update(&mut self, trigger: Rect, floating: Size, viewport: Rect) -> Option<FloatingPosition> {
		let next = compute_position(trigger, floating, viewport, self.options);
		if self.last == Some(next) {
			return None;
		}
		self.last = Some(next);
		Some(next)
	}

	/// Forget the cached position, e.g. when the content unmounts.
	pub fn reset(&mut self) {
		self.last = None;
	}
}
