use thiserror::Error;

/// Errors raised by list widgets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListboxError {
	/// An external value was pushed into a widget that owns its own value.
	#[error("{widget} owns its value; construct it as controlled to sync an external value")]
	NotControlled { widget: &'static str },
}

/// Where a widget's value lives.
///
/// The source is chosen once, at construction, and never changes afterwards.
/// `External` values are authoritative: committing only reports the change and
/// the host pushes the accepted value back through
/// [`ValueSource::sync_external`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource<T> {
	External(T),
	Internal(T),
}

impl<T> ValueSource<T> {
	#[must_use]
	pub fn get(&self) -> &T {
		match self {
			Self::External(value) | Self::Internal(value) => value,
		}
	}

	#[must_use]
	pub fn is_controlled(&self) -> bool {
		matches!(self, Self::External(_))
	}

	/// Store a committed value. Returns `false` when the value is externally
	/// owned and was left untouched.
	pub(crate) fn commit(&mut self, next: T) -> bool {
		match self {
			Self::Internal(value) => {
				*value = next;
				true
			}
			Self::External(_) => false,
		}
	}

	/// Mirror a new authoritative value from the host.
	pub fn sync_external(&mut self, next: T, widget: &'static str) -> Result<(), ListboxError> {
		match self {
			Self::External(value) => {
				*value = next;
				Ok(())
			}
			Self::Internal(_) => Err(ListboxError::NotControlled { widget }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn external_values_ignore_commits() {
		let mut source = ValueSource::External(Some("a".to_string()));
		assert!(!source.commit(None));
		assert_eq!(source.get().as_deref(), Some("a"));
		source.sync_external(None, "Select").expect("controlled");
		assert_eq!(source.get(), &None);
	}

	#[test]
	fn internal_values_reject_sync() {
		let mut source = ValueSource::Internal(1);
		assert!(source.commit(2));
		assert_eq!(
			source.sync_external(3, "Select"),
			Err(ListboxError::NotControlled { widget: "Select" })
		);
		assert_eq!(*source.get(), 2);
	}
}
