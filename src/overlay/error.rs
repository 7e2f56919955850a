use thiserror::Error;

use super::OverlayKind;

/// Misuse of overlay sub-views.
///
/// These are programming errors: they are reported the moment a sub-view is
/// resolved or used, never deferred.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlayError {
	/// A sub-view was resolved in a scope that does not contain its root.
	#[error("`{component}` must be used within a {root}")]
	MissingRoot {
		component: &'static str,
		root: OverlayKind,
	},

	/// A sub-view outlived the root it was resolved from.
	#[error("`{component}` was used after its {root} was dropped")]
	RootDropped {
		component: &'static str,
		root: OverlayKind,
	},
}
