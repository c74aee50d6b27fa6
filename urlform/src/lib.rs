#![doc = include_str!("../README.md")]
#![allow(
	unknown_lints,
	clippy::new_without_default,
	clippy::needless_doctest_main
)]
#![warn(
	clippy::all,
	clippy::style,
	clippy::cargo,
	clippy::perf,
	clippy::correctness,
	clippy::complexity,
	clippy::deprecated,
	clippy::missing_panics_doc,
	clippy::missing_safety_doc,
	clippy::cast_lossless,
	clippy::cast_possible_wrap,
	clippy::useless_conversion,
	clippy::wrong_self_convention,
	rustdoc::all,
	rustdoc::broken_intra_doc_links
)]
#![deny(missing_docs)]

extern crate alloc;

// Lets the derive output name `::urlform` from inside this crate.
extern crate self as urlform;

#[macro_use]
mod macros;

mod impls;

pub mod encoder;
pub mod error;
pub mod reflect;
pub mod registry;
pub mod tag;
pub mod values;

pub use self::encoder::{Builder, Encoder, DEFAULT_ALIAS_TAG};
pub use self::error::{EncodeError, FieldError, FieldErrors};
pub use self::reflect::{Field, IsZero, Kind, Reflect, TypeInfo, Value};
pub use self::registry::{Registry, ScalarEncoder};
pub use self::tag::{field_alias, TagOptions};
pub use self::values::{Collector, Pairs, Values};

cfg_derive! {
	pub use urlform_macros::Reflect;
}

/// Encode `value` into a query string with the default [`Encoder`].
///
/// # Example
/// ```rust
/// #[derive(urlform::Reflect)]
/// struct Page {
///     #[urlform(query = "p")]
///     number: u32,
///     #[urlform(query = "-")]
///     cache: Vec<u8>,
/// }
///
/// let page = Page { number: 3, cache: Vec::new() };
/// assert_eq!(urlform::to_string(&page).unwrap(), "p=3");
/// ```
pub fn to_string<T>(value: &T) -> Result<String, EncodeError>
where
	T: Reflect + ?Sized,
{
	to_values(value).map(|values| values.encode())
}

/// Encode `value` into [`Values`] with the default [`Encoder`].
pub fn to_values<T>(value: &T) -> Result<Values, EncodeError>
where
	T: Reflect + ?Sized,
{
	Encoder::new().encode_values(value)
}
