//! Search categories and the per-collection field mapping.

use std::fmt;
use std::str::FromStr;

/// Collections searched when no category filter is active.
pub const DEFAULT_COLLECTIONS: [&str; 4] = ["listings", "users", "protocols", "threads"];

/// Which collections a query fans out to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
	#[default]
	All,
	/// A single named collection.
	Only(String),
}

impl Category {
	/// Resolve the collections addressed by this category.
	///
	/// A category naming a collection that is not configured still addresses
	/// that collection; the backend decides whether it exists.
	pub fn collections(&self, configured: &[CollectionSpec]) -> Vec<CollectionSpec> {
		match self {
			Self::All => configured.to_vec(),
			Self::Only(name) => vec![
				configured
					.iter()
					.find(|spec| spec.name == *name)
					.cloned()
					.unwrap_or_else(|| CollectionSpec::new(name.clone())),
			],
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.write_str("all"),
			Self::Only(name) => f.write_str(name),
		}
	}
}

impl FromStr for Category {
	type Err = std::convert::Infallible;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let value = value.trim();
		if value.is_empty() || value.eq_ignore_ascii_case("all") {
			Ok(Self::All)
		} else {
			Ok(Self::Only(value.to_ascii_lowercase()))
		}
	}
}

/// Document shape of a collection, which decides how it is queried and mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
	Listings,
	Users,
	Generic,
}

/// A searchable collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionSpec {
	pub name: String,
	pub kind: CollectionKind,
}

impl CollectionSpec {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		let kind = match name.as_str() {
			"listings" => CollectionKind::Listings,
			"users" => CollectionKind::Users,
			_ => CollectionKind::Generic,
		};
		Self { name, kind }
	}

	/// Fields searched, in backend order.
	pub fn query_by(&self) -> &'static [&'static str] {
		match self.kind {
			CollectionKind::Listings => &["name", "description"],
			CollectionKind::Users => &["first_name", "last_name", "bio"],
			CollectionKind::Generic => &["title"],
		}
	}

	/// Relative field weights, aligned with [`Self::query_by`].
	pub fn weights(&self) -> Option<&'static [u32]> {
		match self.kind {
			CollectionKind::Listings => Some(&[1, 2]),
			CollectionKind::Users => Some(&[1, 2, 3]),
			CollectionKind::Generic => None,
		}
	}

	/// Link to a document of this collection.
	pub fn href(&self, id: &str) -> String {
		format!("/{}/{id}", self.name)
	}
}

/// The collections searched under [`Category::All`] by default.
pub fn default_collections() -> Vec<CollectionSpec> {
	DEFAULT_COLLECTIONS.iter().map(|name| CollectionSpec::new(*name)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_all_and_named_categories() {
		assert_eq!("".parse::<Category>(), Ok(Category::All));
		assert_eq!("ALL".parse::<Category>(), Ok(Category::All));
		assert_eq!("Users".parse::<Category>(), Ok(Category::Only("users".into())));
	}

	#[test]
	fn field_mapping_per_kind() {
		let listings = CollectionSpec::new("listings");
		assert_eq!(listings.query_by(), ["name", "description"]);
		assert_eq!(listings.weights(), Some(&[1, 2][..]));

		let users = CollectionSpec::new("users");
		assert_eq!(users.query_by(), ["first_name", "last_name", "bio"]);
		assert_eq!(users.weights(), Some(&[1, 2, 3][..]));

		let threads = CollectionSpec::new("threads");
		assert_eq!(threads.kind, CollectionKind::Generic);
		assert_eq!(threads.query_by(), ["title"]);
		assert_eq!(threads.weights(), None);
		assert_eq!(threads.href("42"), "/threads/42");
	}

	#[test]
	fn category_narrows_collections() {
		let configured = default_collections();
		assert_eq!(Category::All.collections(&configured).len(), 4);
		let only = Category::Only("users".into()).collections(&configured);
		assert_eq!(only, vec![CollectionSpec::new("users")]);
	}
}
