//! Module containing the implementation for [`Encoder`].

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{EncodeError, FieldError, FieldErrors};
use crate::reflect::{Field, Kind, Reflect, Value};
use crate::registry::Registry;
use crate::tag::field_alias;
use crate::values::{Collector, Pairs, Values};

/// The tag read for field aliases unless configured otherwise.
pub const DEFAULT_ALIAS_TAG: &str = "query";

/// Encodes the fields of a struct into key/value pairs.
///
/// An [`Encoder`] holds its configuration, the tag it reads aliases from and
/// the custom encoders it knows about, and keeps no state between calls. It
/// is meant to be set up once and shared.
///
/// # Example
///
/// ```rust
/// use urlform::{Encoder, Reflect};
///
/// #[derive(Reflect)]
/// struct Search {
///     #[urlform(query = "q")]
///     text: String,
///     #[urlform(query = "page,omitempty")]
///     page: u32,
///     tags: Vec<String>,
/// }
///
/// let search = Search {
///     text: "rust lang".to_owned(),
///     page: 0,
///     tags: vec!["a".to_owned(), "b".to_owned()],
/// };
///
/// let values = Encoder::new().encode_values(&search).unwrap();
/// assert_eq!(values.encode(), "q=rust+lang&tags=a&tags=b");
/// ```
#[derive(Debug, Clone)]
pub struct Encoder {
	registry: Registry,
	alias_tag: Cow<'static, str>,
}

impl Default for Encoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Encoder {
	/// Create a new [`Encoder`] with the default options.
	#[must_use]
	pub fn new() -> Self {
		Self::builder().build()
	}

	/// Create a new builder.
	#[must_use]
	pub fn builder() -> Builder {
		Builder::new()
	}

	/// Get the tag field aliases are read from.
	#[must_use]
	pub fn alias_tag(&self) -> &str {
		&self.alias_tag
	}

	/// Change the tag field aliases are read from.
	pub fn set_alias_tag(&mut self, tag: impl Into<Cow<'static, str>>) {
		self.alias_tag = tag.into();
	}

	/// Register `f` as the encoder for `T`.
	///
	/// See [`Registry::register()`].
	pub fn register_encoder<T, F>(&mut self, f: F)
	where
		T: Reflect,
		F: Fn(&T) -> String + Send + Sync + 'static,
	{
		self.registry.register::<T, F>(f);
	}

	/// Get a reference to the custom encoders.
	#[must_use]
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Encode the fields of `src` into `dst`.
	///
	/// `src` must be a struct or a pointer to one. Fields that cannot be
	/// encoded do not stop the traversal; their errors are collected and
	/// returned together in [`EncodeError::Fields`] while every other field
	/// is still written to `dst`.
	pub fn encode<T, C>(
		&self,
		src: &T,
		mut dst: C,
	) -> Result<(), EncodeError>
	where
		T: Reflect + ?Sized,
		C: Collector,
	{
		let type_name = core::any::type_name::<T>();

		let value = match src.value() {
			Value::Pointer(Some(inner)) => inner.value(),
			value => value,
		};

		let Value::Struct(fields) = value else {
			tracing::debug!(type_name, "refusing to encode a non-struct value");
			return Err(EncodeError::NotStruct { type_name });
		};

		self.encode_fields(fields, &mut dst)
			.into_result()
			.map_err(EncodeError::Fields)
	}

	/// Encode `src` into a new [`Values`].
	pub fn encode_values<T>(&self, src: &T) -> Result<Values, EncodeError>
	where
		T: Reflect + ?Sized,
	{
		let mut values = Values::new();
		self.encode(src, &mut values)?;
		Ok(values)
	}

	/// Encode `src` into a new [`Pairs`].
	pub fn encode_pairs<T>(&self, src: &T) -> Result<Pairs, EncodeError>
	where
		T: Reflect + ?Sized,
	{
		let mut pairs = Pairs::new();
		self.encode(src, &mut pairs)?;
		Ok(pairs)
	}

	fn encode_fields(
		&self,
		fields: Vec<Field<'_>>,
		dst: &mut dyn Collector,
	) -> FieldErrors {
		let mut errors = FieldErrors::new();

		for field in fields {
			let (name, opts) = field_alias(&field, &self.alias_tag);
			if name == "-" {
				continue;
			}

			let info = field.type_info();
			let value = field.value();

			// Pointers to structs flatten into the parent, unless the pointer
			// type itself has a custom encoder.
			if let Kind::Pointer(elem) = info.kind() {
				let elem = elem();
				if elem.kind().is_struct()
					&& !self.registry.contains_id(info.id())
				{
					match value.value() {
						Value::Pointer(Some(inner)) => {
							if let Err(e) = self.encode_nested(inner, dst) {
								record(&mut errors, elem.name(), e);
							}
						},
						_ if opts.omit_empty() => {
							tracing::trace!(field = name, "skipping empty field");
						},
						_ => dst.append(name, String::from("null")),
					}
					continue;
				}
			}

			if let Some(encoder) = self.registry.resolve(&info) {
				if opts.omit_empty() && value.is_zero_value() {
					tracing::trace!(field = name, "skipping empty field");
					continue;
				}

				match encoder.encode(value) {
					Some(encoded) => dst.append(name, encoded),
					None => record(&mut errors, info.name(), no_encoder(&field)),
				}
				continue;
			}

			let elem = match info.kind() {
				Kind::Struct => {
					if let Err(e) = self.encode_nested(value, dst) {
						record(&mut errors, info.name(), e);
					}
					continue;
				},
				Kind::Slice(elem) | Kind::Array(elem) => elem(),
				_ => {
					record(&mut errors, info.name(), no_encoder(&field));
					continue;
				},
			};

			let Some(encoder) = self.registry.resolve(&elem) else {
				record(&mut errors, info.name(), no_encoder(&field));
				continue;
			};

			let items = match value.value() {
				Value::Slice(items) | Value::Array(items) => items,
				_ => Vec::new(),
			};

			if items.is_empty() && opts.omit_empty() {
				tracing::trace!(field = name, "skipping empty sequence");
				continue;
			}

			let encoded: Option<Vec<String>> =
				items.into_iter().map(|item| encoder.encode(item)).collect();
			match encoded {
				Some(encoded) => dst.replace(name, encoded),
				None => record(&mut errors, info.name(), no_encoder(&field)),
			}
		}

		errors
	}

	fn encode_nested(
		&self,
		value: &dyn Reflect,
		dst: &mut dyn Collector,
	) -> Result<(), FieldError> {
		match value.value() {
			Value::Struct(fields) => self
				.encode_fields(fields, dst)
				.into_result()
				.map_err(FieldError::Nested),
			_ => Ok(()),
		}
	}
}

fn no_encoder(field: &Field<'_>) -> FieldError {
	FieldError::NoEncoder {
		field: field.ident(),
		type_name: field.type_info().name(),
	}
}

fn record(errors: &mut FieldErrors, type_name: &'static str, e: FieldError) {
	tracing::debug!(type_name, error = %e, "failed to encode field");
	errors.insert(type_name, e);
}

/// A builder that when completed will return an [`Encoder`].
#[derive(Debug, Clone)]
pub struct Builder {
	registry: Registry,
	alias_tag: Cow<'static, str>,
}

impl Default for Builder {
	fn default() -> Self {
		Self::new()
	}
}

impl Builder {
	/// Create a new [`Builder`] with the default options.
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: Registry::new(),
			alias_tag: Cow::Borrowed(DEFAULT_ALIAS_TAG),
		}
	}

	/// Read field aliases from `tag`.
	///
	/// **Default:** `"query"`
	#[must_use]
	pub fn alias_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
		self.alias_tag = tag.into();
		self
	}

	/// Use `f` to encode values of type `T`.
	#[must_use]
	pub fn encoder<T, F>(mut self, f: F) -> Self
	where
		T: Reflect,
		F: Fn(&T) -> String + Send + Sync + 'static,
	{
		self.registry.register::<T, F>(f);
		self
	}

	/// Use these custom encoders.
	#[must_use]
	pub fn registry(mut self, registry: Registry) -> Self {
		self.registry = registry;
		self
	}

	/// Finalize the builder and build an [`Encoder`].
	#[must_use]
	pub fn build(self) -> Encoder {
		Encoder { registry: self.registry, alias_tag: self.alias_tag }
	}
}
