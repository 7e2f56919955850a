use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::category::Category;

/// Monotonic dispatch counter shared between the session and in-flight work.
///
/// Dispatched work holds a clone and checks [`Generation::is_current`] before
/// doing anything expensive with its response.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
	fn advance(&self) -> u64 {
		self.0.fetch_add(1, Ordering::AcqRel) + 1
	}

	pub fn latest(&self) -> u64 {
		self.0.load(Ordering::Acquire)
	}

	pub fn is_current(&self, id: u64) -> bool {
		self.latest() == id
	}
}

/// Query state behind the search box.
///
/// Changing the text or the category starts over at page 1. Every change bumps
/// the request id, so at most one dispatched request can ever be current.
#[derive(Debug, Clone)]
pub struct SearchSession {
	text: String,
	category: Category,
	page: usize,
	generation: Generation,
}

impl Default for SearchSession {
	fn default() -> Self {
		Self::new()
	}
}

impl SearchSession {
	pub fn new() -> Self {
		Self {
			text: String::new(),
			category: Category::All,
			page: 1,
			generation: Generation::default(),
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// The text with surrounding whitespace removed, as sent to the backend.
	pub fn query(&self) -> &str {
		self.text.trim()
	}

	pub fn category(&self) -> &Category {
		&self.category
	}

	pub fn page(&self) -> usize {
		self.page
	}

	pub fn request_id(&self) -> u64 {
		self.generation.latest()
	}

	pub fn generation(&self) -> Generation {
		self.generation.clone()
	}

	/// Replace the raw text. Returns the new request id.
	pub fn set_text(&mut self, text: impl Into<String>) -> u64 {
		self.text = text.into();
		self.page = 1;
		self.generation.advance()
	}

	/// Switch category. Returns the new request id.
	pub fn set_category(&mut self, category: Category) -> u64 {
		self.category = category;
		self.page = 1;
		self.generation.advance()
	}

	/// Advance to the next page. Returns the new request id.
	pub fn next_page(&mut self) -> u64 {
		self.page += 1;
		self.generation.advance()
	}

	/// Whether a response tagged with `id` may still update the view.
	pub fn is_current(&self, id: u64) -> bool {
		self.generation.is_current(id)
	}
}
