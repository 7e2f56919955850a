/// Callback invoked with a widget's new value after every commit.
pub type ChangeHandler<T> = Box<dyn FnMut(&T)>;

/// Callback invoked when a widget loses focus.
pub type BlurHandler = Box<dyn FnMut()>;

/// Adapter shape for form-state libraries.
///
/// Binding a widget to a field makes it controlled: the field's value is
/// authoritative, commits are reported through `on_change`, and closing the
/// list by tabbing away or clicking outside reports `on_blur`.
pub struct FieldBinding<T> {
	pub name: String,
	pub value: T,
	pub on_change: ChangeHandler<T>,
	pub on_blur: Option<BlurHandler>,
}

impl<T> FieldBinding<T> {
	pub fn new(name: impl Into<String>, value: T, on_change: impl FnMut(&T) + 'static) -> Self {
		Self {
			name: name.into(),
			value,
			on_change: Box::new(on_change),
			on_blur: None,
		}
	}

	#[must_use]
	pub fn with_on_blur(mut self, on_blur: impl FnMut() + 'static) -> Self {
		self.on_blur = Some(Box::new(on_blur));
		self
	}
}

/// A hidden form input carrying a widget's serialised value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenInput {
	pub name: Option<String>,
	pub value: String,
}
