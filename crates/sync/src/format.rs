//! Tag template rendering.

use crate::error::TemplateError;

/// Placeholder replaced by the external display name.
pub const INSERTION_POINT: &str = "%s";

/// A template with exactly one insertion point, checked once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
	raw: String,
	split: usize,
}

impl TagTemplate {
	pub fn parse(raw: impl Into<String>) -> Result<Self, TemplateError> {
		let raw = raw.into();
		let found = raw.matches(INSERTION_POINT).count();
		match raw.find(INSERTION_POINT) {
			Some(split) if found == 1 => Ok(Self { raw, split }),
			_ => Err(TemplateError { template: raw, found }),
		}
	}

	/// Substitutes `name` into the insertion point.
	pub fn format(&self, name: &str) -> String {
		let (before, after) = (&self.raw[..self.split], &self.raw[self.split + INSERTION_POINT.len()..]);
		let mut out = String::with_capacity(before.len() + name.len() + after.len());
		out.push_str(before);
		out.push_str(name);
		out.push_str(after);
		out
	}

	pub fn as_str(&self) -> &str {
		&self.raw
	}
}

/// One-shot form of [`TagTemplate::format`] that validates `template` first.
pub fn format(name: &str, template: &str) -> Result<String, TemplateError> {
	Ok(TagTemplate::parse(template)?.format(name))
}
