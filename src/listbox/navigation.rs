/// Why a list closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
	Escape,
	Tab,
	Commit,
	/// Pointer-down outside the trigger and the list.
	Dismiss,
	/// The trigger was activated while the list was open.
	Trigger,
}

impl CloseReason {
	/// Whether closing this way moves focus away from the widget.
	#[must_use]
	pub fn blurs(self) -> bool {
		matches!(self, Self::Tab | Self::Dismiss)
	}
}

/// Observable outcome of feeding an input to a list widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
	None,
	Opened,
	Closed(CloseReason),
	Highlighted(usize),
	/// A value was committed; the list may or may not have closed.
	Committed { closed: bool },
}

/// Next index when moving down, wrapping to the top.
pub(crate) fn next(current: Option<usize>, len: usize) -> Option<usize> {
	if len == 0 {
		return None;
	}
	Some(current.map_or(0, |index| (index + 1) % len))
}

/// Previous index when moving up, wrapping to the bottom.
pub(crate) fn previous(current: Option<usize>, len: usize) -> Option<usize> {
	if len == 0 {
		return None;
	}
	Some(current.map_or(len - 1, |index| (index % len + len - 1) % len))
}

pub(crate) fn first(len: usize) -> Option<usize> {
	(len > 0).then_some(0)
}

pub(crate) fn last(len: usize) -> Option<usize> {
	len.checked_sub(1)
}

/// Drop a highlight that no longer points inside the list.
pub(crate) fn clamp(current: Option<usize>, len: usize) -> Option<usize> {
	current.filter(|&index| index < len)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn movement_wraps_both_ways() {
		assert_eq!(next(None, 3), Some(0));
		assert_eq!(next(Some(2), 3), Some(0));
		assert_eq!(previous(None, 3), Some(2));
		assert_eq!(previous(Some(0), 3), Some(2));
		assert_eq!(next(Some(1), 0), None);
		assert_eq!(last(0), None);
	}
}
