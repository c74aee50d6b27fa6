//! The reflection model used to walk values.
//!
//! Every encodable type implements [`Reflect`]. The trait exposes a static
//! description of the type ([`TypeInfo`]) and a view of a concrete value
//! ([`Value`]). Structs are usually described with `#[derive(Reflect)]`.

use core::any::{Any, TypeId};
use core::fmt;

use alloc::vec::Vec;

/// Upcast to [`Any`].
///
/// Implemented for every `'static` type. It exists so custom encoders can
/// downcast a `&dyn Reflect` back to its concrete type.
pub trait AsAny: Any {
	/// Get `self` as `&dyn Any`.
	fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// A type that can be inspected by the encoder.
///
/// # Example
///
/// ```rust
/// use urlform::{Kind, Reflect, TypeInfo, Value};
///
/// struct Money(i64);
///
/// impl Reflect for Money {
///     fn type_info() -> TypeInfo {
///         TypeInfo::of::<Self>(Kind::Int)
///     }
///
///     fn value(&self) -> Value<'_> {
///         Value::Int(self.0)
///     }
/// }
/// ```
pub trait Reflect: AsAny {
	/// Get the static description of this type.
	fn type_info() -> TypeInfo
	where
		Self: Sized;

	/// Get a view of this value.
	///
	/// The variant must match the [`Kind`] reported by
	/// [`Reflect::type_info()`]. A field whose value does not match cannot
	/// be encoded and is reported as
	/// [`FieldError::NoEncoder`](crate::FieldError::NoEncoder).
	fn value(&self) -> Value<'_>;

	/// Check whether this value is the zero value of its type.
	///
	/// The default implementation inspects [`Reflect::value()`]. Types that
	/// know their own notion of emptiness can override it.
	fn is_zero_value(&self) -> bool {
		self.value().is_zero()
	}
}

impl<'a> dyn Reflect + 'a {
	/// Downcast to a concrete type.
	pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	/// Check whether the concrete type behind this object is `T`.
	pub fn is<T: Reflect>(&self) -> bool {
		self.as_any().is::<T>()
	}
}

/// A capability for structs that decide for themselves whether they are
/// empty.
///
/// Derived structs use it when annotated with `#[urlform(is_zero)]`.
pub trait IsZero {
	/// Check whether `self` should be considered empty.
	fn is_zero(&self) -> bool;
}

/// The shape of a type.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Kind {
	/// A boolean.
	Bool,
	/// A signed integer.
	Int,
	/// An unsigned integer.
	Uint,
	/// A 32-bit float.
	Float32,
	/// A 64-bit float.
	Float64,
	/// A string.
	String,
	/// A pointer that may or may not hold a value of the element type.
	Pointer(fn() -> TypeInfo),
	/// A struct with named fields.
	Struct,
	/// A variable length sequence of the element type.
	Slice(fn() -> TypeInfo),
	/// A fixed length sequence of the element type.
	Array(fn() -> TypeInfo),
	/// A map.
	Map,
	/// Any other type. Only encodable with a registered encoder.
	Opaque,
}

impl Kind {
	/// Get the element type of pointers, slices and arrays.
	#[must_use]
	pub fn elem(&self) -> Option<TypeInfo> {
		match self {
			Self::Pointer(elem) | Self::Slice(elem) | Self::Array(elem) => {
				Some(elem())
			},
			_ => None,
		}
	}

	/// Check whether this is [`Kind::Struct`].
	#[must_use]
	pub fn is_struct(&self) -> bool {
		matches!(self, Self::Struct)
	}
}

/// Static description of a type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
	id: TypeId,
	name: &'static str,
	kind: Kind,
}

impl TypeInfo {
	/// Describe `T` as having shape `kind`.
	#[must_use]
	pub fn of<T: ?Sized + 'static>(kind: Kind) -> Self {
		Self { id: TypeId::of::<T>(), name: core::any::type_name::<T>(), kind }
	}

	/// Get the [`TypeId`] of the type.
	#[must_use]
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Get the name of the type.
	#[must_use]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Get the shape of the type.
	#[must_use]
	pub fn kind(&self) -> Kind {
		self.kind
	}
}

impl PartialEq for TypeInfo {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeInfo {}

/// A view of a value.
#[non_exhaustive]
pub enum Value<'a> {
	/// A boolean.
	Bool(bool),
	/// A signed integer.
	Int(i64),
	/// An unsigned integer.
	Uint(u64),
	/// A 32-bit float.
	Float32(f32),
	/// A 64-bit float.
	Float64(f64),
	/// A string.
	String(&'a str),
	/// A pointer, [`None`] when it holds nothing.
	Pointer(Option<&'a dyn Reflect>),
	/// The fields of a struct in declaration order.
	Struct(Vec<Field<'a>>),
	/// The elements of a slice.
	Slice(Vec<&'a dyn Reflect>),
	/// The elements of an array.
	Array(Vec<&'a dyn Reflect>),
	/// A map with this many entries.
	Map(usize),
	/// A value with no built-in representation.
	Opaque,
}

impl Value<'_> {
	/// Check whether this is the zero value of its type.
	///
	/// Slices and maps are zero when empty, arrays and structs when all of
	/// their elements are zero. Opaque values are never zero.
	#[must_use]
	#[allow(clippy::float_cmp)]
	pub fn is_zero(&self) -> bool {
		match self {
			Self::Bool(x) => !x,
			Self::Int(x) => *x == 0,
			Self::Uint(x) => *x == 0,
			Self::Float32(x) => *x == 0.0,
			Self::Float64(x) => *x == 0.0,
			Self::String(x) => x.is_empty(),
			Self::Pointer(x) => x.is_none(),
			Self::Struct(fields) => {
				fields.iter().all(|field| field.value().is_zero_value())
			},
			Self::Slice(items) => items.is_empty(),
			Self::Array(items) => items.iter().all(|x| x.is_zero_value()),
			Self::Map(len) => *len == 0,
			Self::Opaque => false,
		}
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(x) => f.debug_tuple("Bool").field(x).finish(),
			Self::Int(x) => f.debug_tuple("Int").field(x).finish(),
			Self::Uint(x) => f.debug_tuple("Uint").field(x).finish(),
			Self::Float32(x) => f.debug_tuple("Float32").field(x).finish(),
			Self::Float64(x) => f.debug_tuple("Float64").field(x).finish(),
			Self::String(x) => f.debug_tuple("String").field(x).finish(),
			Self::Pointer(x) => f
				.debug_tuple("Pointer")
				.field(&x.map(|x| x.value()))
				.finish(),
			Self::Struct(fields) => {
				f.debug_tuple("Struct").field(fields).finish()
			},
			Self::Slice(items) => f
				.debug_tuple("Slice")
				.field(&DebugItems(items))
				.finish(),
			Self::Array(items) => f
				.debug_tuple("Array")
				.field(&DebugItems(items))
				.finish(),
			Self::Map(len) => f.debug_tuple("Map").field(len).finish(),
			Self::Opaque => f.write_str("Opaque"),
		}
	}
}

struct DebugItems<'a, 'b>(&'b [&'a dyn Reflect]);

impl fmt::Debug for DebugItems<'_, '_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.0.iter().map(|x| x.value())).finish()
	}
}

/// A single field of a struct.
#[derive(Clone, Copy)]
pub struct Field<'a> {
	ident: &'static str,
	tags: &'static [(&'static str, &'static str)],
	type_info: TypeInfo,
	value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
	/// Describe a field named `ident` holding `value`.
	///
	/// `tags` holds the `(key, value)` tag pairs declared on the field.
	pub fn new<T: Reflect>(
		ident: &'static str,
		tags: &'static [(&'static str, &'static str)],
		value: &'a T,
	) -> Self {
		Self { ident, tags, type_info: T::type_info(), value }
	}

	/// Get the identifier of the field as declared.
	#[must_use]
	pub fn ident(&self) -> &'static str {
		self.ident
	}

	/// Get the value of the tag `key`, if the field declares it.
	#[must_use]
	pub fn tag(&self, key: &str) -> Option<&'static str> {
		self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
	}

	/// Get all tags declared on the field.
	#[must_use]
	pub fn tags(&self) -> &'static [(&'static str, &'static str)] {
		self.tags
	}

	/// Get the static description of the field's type.
	#[must_use]
	pub fn type_info(&self) -> TypeInfo {
		self.type_info
	}

	/// Get the value of the field.
	#[must_use]
	pub fn value(&self) -> &'a dyn Reflect {
		self.value
	}
}

impl fmt::Debug for Field<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("ident", &self.ident)
			.field("tags", &self.tags)
			.field("type", &self.type_info.name())
			.field("value", &self.value.value())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Money(i64);

	impl Reflect for Money {
		fn type_info() -> TypeInfo {
			TypeInfo::of::<Self>(Kind::Int)
		}

		fn value(&self) -> Value<'_> {
			Value::Int(self.0)
		}
	}

	#[test]
	fn test_downcast() {
		let money = Money(12);
		let value: &dyn Reflect = &money;

		assert!(value.is::<Money>(), "value should be Money");
		assert!(!value.is::<i64>(), "value should not be i64");
		assert_eq!(value.downcast_ref::<Money>().map(|x| x.0), Some(12));
	}

	#[test]
	fn test_zero_values() {
		assert!(Value::Bool(false).is_zero());
		assert!(!Value::Bool(true).is_zero());
		assert!(Value::Int(0).is_zero());
		assert!(!Value::Uint(3).is_zero());
		assert!(Value::Float64(0.0).is_zero());
		assert!(Value::String("").is_zero());
		assert!(!Value::String("x").is_zero());
		assert!(Value::Pointer(None).is_zero());
		assert!(Value::Map(0).is_zero());
		assert!(!Value::Opaque.is_zero());
	}

	#[test]
	fn test_array_zero_when_all_elements_zero() {
		let zero = [0_u8, 0, 0];
		let some = [0_u8, 1, 0];

		assert!(zero.is_zero_value(), "all-zero array should be zero");
		assert!(!some.is_zero_value(), "array with 1 should not be zero");
	}

	#[test]
	fn test_field_tags() {
		let money = Money(5);
		let field =
			Field::new("Price", &[("query", "price,omitempty")], &money);

		assert_eq!(field.ident(), "Price");
		assert_eq!(field.tag("query"), Some("price,omitempty"));
		assert_eq!(field.tag("json"), None);
		assert_eq!(field.type_info(), Money::type_info());
	}
}
