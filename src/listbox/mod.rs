//! Selection widgets: [`Select`] and [`MultiSelect`].
//!
//! Both are headless state machines. A host feeds them key events and pointer
//! actions, renders whatever [`Transition`] and accessor methods report, and
//! positions the open list with [`crate::overlay::floating`].

mod field;
mod key;
mod multi;
mod navigation;
mod option;
mod overflow;
mod select;
mod value;

pub use field::{BlurHandler, ChangeHandler, FieldBinding, HiddenInput};
pub use key::ListKey;
pub use multi::{MultiSelect, Selection};
pub use navigation::{CloseReason, Transition};
pub use option::ListOption;
pub use overflow::{TagMetrics, TagOverflow, fit_tags};
pub use select::Select;
pub use value::{ListboxError, ValueSource};
