use unicode_width::UnicodeWidthStr;

/// Cell sizes of the chrome around each tag in a multi-select trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMetrics {
	/// Cells added around a tag's label (borders, remove button).
	pub padding: u16,
	/// Cells between adjacent tags and before the overflow indicator.
	pub gap: u16,
}

impl Default for TagMetrics {
	fn default() -> Self {
		Self { padding: 4, gap: 1 }
	}
}

/// Result of fitting tags into a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOverflow {
	/// Leading tags that are rendered.
	pub visible: usize,
	/// Tags summarised by the "+N more" indicator.
	pub hidden: usize,
}

impl TagOverflow {
	/// Label for the overflow indicator, if any tags are hidden.
	#[must_use]
	pub fn indicator(&self) -> Option<String> {
		(self.hidden > 0).then(|| overflow_label(self.hidden))
	}
}

fn overflow_label(hidden: usize) -> String {
	format!("+{hidden} more")
}

/// Fit as many leading tags as possible into `available` cells, reserving
/// room for the "+N more" indicator whenever something is hidden.
pub fn fit_tags<'a, I>(labels: I, available: u16, metrics: TagMetrics) -> TagOverflow
where
	I: IntoIterator<Item = &'a str>,
{
	let widths: Vec<usize> = labels
		.into_iter()
		.map(|label| label.width() + usize::from(metrics.padding))
		.collect();
	let total = widths.len();
	let available = usize::from(available);
	let gap = usize::from(metrics.gap);

	let mut prefix = Vec::with_capacity(total + 1);
	prefix.push(0usize);
	for (index, width) in widths.iter().enumerate() {
		let separator = if index == 0 { 0 } else { gap };
		prefix.push(prefix[index] + separator + width);
	}

	for visible in (0..=total).rev() {
		let hidden = total - visible;
		let mut used = prefix[visible];
		if hidden > 0 {
			let separator = if visible == 0 { 0 } else { gap };
			used += separator + overflow_label(hidden).width();
		}
		if used <= available || visible == 0 {
			return TagOverflow { visible, hidden };
		}
	}

	TagOverflow {
		visible: 0,
		hidden: total,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const METRICS: TagMetrics = TagMetrics { padding: 2, gap: 1 };

	#[test]
	fn everything_fits_without_indicator() {
		let overflow = fit_tags(["one", "two"], 20, METRICS);
		assert_eq!(overflow, TagOverflow { visible: 2, hidden: 0 });
		assert_eq!(overflow.indicator(), None);
	}

	#[test]
	fn indicator_space_is_reserved() {
		// Tags take 5, 5 and 7 cells. Two tags plus " +1 more" need 19 cells,
		// exactly as many as all three tags.
		let overflow = fit_tags(["one", "two", "three"], 18, METRICS);
		assert_eq!(overflow, TagOverflow { visible: 1, hidden: 2 });
		assert_eq!(overflow.indicator().as_deref(), Some("+2 more"));

		let overflow = fit_tags(["one", "two", "three"], 19, METRICS);
		assert_eq!(overflow, TagOverflow { visible: 3, hidden: 0 });
	}

	#[test]
	fn narrow_trigger_hides_all() {
		let overflow = fit_tags(["alpha", "beta"], 3, METRICS);
		assert_eq!(overflow, TagOverflow { visible: 0, hidden: 2 });
	}
}
