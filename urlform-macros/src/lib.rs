//! Procedural macros for `urlform`.
extern crate proc_macro;
use proc_macro::TokenStream;

mod reflect;
mod util;

/// Derive `urlform::Reflect` for a struct with named fields.
///
/// Every field type must implement `Reflect` itself. Generic and tuple
/// structs are not supported.
///
/// # Attributes
///
/// Fields declare tags as `key = "value"` pairs. The encoder reads the tag
/// it is configured with (`query` by default) and splits its value into an
/// alias and options:
///
/// - `#[urlform(query = "name")]`: write the field under `name`.
/// - `#[urlform(query = "name,omitempty")]`: also skip the field when its
///   value is zero.
/// - `#[urlform(query = ",omitempty")]`: keep the field's own name.
/// - `#[urlform(query = "-")]`: never write the field.
///
/// Several tags can be declared at once, for example
/// `#[urlform(query = "q", form = "search")]`.
///
/// On the struct itself, `#[urlform(is_zero)]` makes zero checks call the
/// struct's `urlform::IsZero` implementation instead of looking at every
/// field.
///
/// # Example
///
/// ```rust,ignore
/// use urlform::Reflect;
///
/// #[derive(Reflect)]
/// struct Query {
///     #[urlform(query = "q")]
///     text: String,
///     #[urlform(query = "page,omitempty")]
///     page: u32,
/// }
///
/// let query = Query { text: "x".to_owned(), page: 0 };
/// assert_eq!(urlform::to_string(&query).unwrap(), "q=x");
/// ```
#[proc_macro_derive(Reflect, attributes(urlform))]
pub fn derive_reflect(item: TokenStream) -> TokenStream {
	self::reflect::entry(item)
}
