//! Error types for `urlform`.
use core::fmt::{self, Display};

use alloc::collections::btree_map::{self, BTreeMap};

/// The error type returned by [`Encoder::encode()`](crate::Encoder::encode).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
	/// The value was not a struct, or a pointer to one. Nothing was
	/// encoded.
	NotStruct {
		/// The name of the type of the value.
		type_name: &'static str,
	},
	/// Some fields could not be encoded. Every other field has been
	/// written to the collector.
	Fields(FieldErrors),
}

impl EncodeError {
	/// Get the field errors, if this is [`EncodeError::Fields`].
	#[must_use]
	pub fn fields(&self) -> Option<&FieldErrors> {
		match self {
			Self::Fields(x) => Some(x),
			Self::NotStruct { .. } => None,
		}
	}
}

impl Display for EncodeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotStruct { type_name } => {
				write!(f, "urlform: {type_name} is not a struct")
			},
			Self::Fields(e) => e.fmt(f),
		}
	}
}

impl std::error::Error for EncodeError {}

impl From<FieldErrors> for EncodeError {
	fn from(value: FieldErrors) -> Self {
		Self::Fields(value)
	}
}

/// The reason a single field could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldError {
	/// No encoder exists for the type of the field or, for sequences, for
	/// the type of its elements.
	NoEncoder {
		/// The identifier of the field.
		field: &'static str,
		/// The name of the type of the field.
		type_name: &'static str,
	},
	/// Fields of a nested struct could not be encoded.
	Nested(FieldErrors),
}

impl Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoEncoder { field, type_name } => write!(
				f,
				"urlform: encoder not found for field {field} of type {type_name}"
			),
			Self::Nested(e) => e.fmt(f),
		}
	}
}

impl std::error::Error for FieldError {}

/// Errors of every field that failed during one traversal, keyed by the
/// name of the offending type.
///
/// When 2 fields of the same type fail, only the last error is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
	errors: BTreeMap<&'static str, FieldError>,
}

impl FieldErrors {
	/// Create a new empty [`FieldErrors`].
	#[must_use]
	pub fn new() -> Self {
		Self { errors: BTreeMap::new() }
	}

	/// Record `error` for the type `type_name`.
	pub fn insert(&mut self, type_name: &'static str, error: FieldError) {
		self.errors.insert(type_name, error);
	}

	/// Get the error recorded for the type `type_name`.
	#[must_use]
	pub fn get(&self, type_name: &str) -> Option<&FieldError> {
		self.errors.get(type_name)
	}

	/// Check whether an error was recorded for the type `type_name`.
	#[must_use]
	pub fn contains(&self, type_name: &str) -> bool {
		self.errors.contains_key(type_name)
	}

	/// Iterate over the errors ordered by type name.
	pub fn iter(&self) -> btree_map::Iter<'_, &'static str, FieldError> {
		self.errors.iter()
	}

	/// Get the number of errors.
	#[must_use]
	pub fn len(&self) -> usize {
		self.errors.len()
	}

	/// Check whether there are no errors.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	/// Turn `self` into a [`Result`] that is only an error when at least
	/// one field failed.
	pub fn into_result(self) -> Result<(), Self> {
		if self.is_empty() {
			Ok(())
		} else {
			Err(self)
		}
	}
}

impl<'a> IntoIterator for &'a FieldErrors {
	type Item = (&'a &'static str, &'a FieldError);
	type IntoIter = btree_map::Iter<'a, &'static str, FieldError>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Some(first) = self.errors.values().next() else {
			return f.write_str("(0 errors)");
		};

		match self.len() {
			1 => write!(f, "{first}"),
			2 => write!(f, "{first} (and 1 other error)"),
			n => write!(f, "{first} (and {} other errors)", n - 1),
		}
	}
}

impl std::error::Error for FieldErrors {}
