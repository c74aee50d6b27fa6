//! Field aliases and options.

use crate::reflect::Field;

/// The options that follow the alias in a tag value.
///
/// For a tag value of `"name,omitempty"` the options are `["omitempty"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions<'a> {
	raw: &'a str,
}

impl<'a> TagOptions<'a> {
	/// The option that suppresses zero values.
	pub const OMIT_EMPTY: &'static str = "omitempty";

	/// Check whether `option` is present.
	#[must_use]
	pub fn contains(&self, option: &str) -> bool {
		self.iter().any(|x| x == option)
	}

	/// Iterate over all options in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &'a str> {
		self.raw.split(',').filter(|x| !x.is_empty())
	}

	/// Check whether the `omitempty` option is present.
	#[must_use]
	pub fn omit_empty(&self) -> bool {
		self.contains(Self::OMIT_EMPTY)
	}
}

/// Split a tag value into its alias and options.
#[must_use]
pub fn parse_tag(tag: &str) -> (&str, TagOptions<'_>) {
	match tag.split_once(',') {
		Some((name, raw)) => (name, TagOptions { raw }),
		None => (tag, TagOptions::default()),
	}
}

/// Get the output key and options of `field` as declared under `tag`.
///
/// A field without the tag, or with an empty alias, is keyed by its own
/// identifier. An alias of `-` means the field must be skipped.
#[must_use]
pub fn field_alias(
	field: &Field<'_>,
	tag: &str,
) -> (&'static str, TagOptions<'static>) {
	let (alias, options) = field.tag(tag).map(parse_tag).unwrap_or_default();

	if alias.is_empty() {
		(strip_raw(field.ident()), options)
	} else {
		(alias, options)
	}
}

fn strip_raw(ident: &str) -> &str {
	ident.strip_prefix("r#").unwrap_or(ident)
}
