//! Scalar encoders and the registry of custom encoders.

use core::any::TypeId;
use core::fmt;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use std::collections::HashMap;

use crate::reflect::{Kind, Reflect, TypeInfo, Value};

/// A custom encoder function.
///
/// Custom encoders are only ever called with values of the type they were
/// registered for. [`None`] means the value was of another type.
pub type EncodeFn = dyn Fn(&dyn Reflect) -> Option<String> + Send + Sync;

/// A set of custom encoders keyed by the type they encode.
#[derive(Clone, Default)]
pub struct Registry {
	custom: HashMap<TypeId, Arc<EncodeFn>>,
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("custom", &self.custom.len())
			.finish()
	}
}

impl Registry {
	/// Create a new [`Registry`] with no custom encoders.
	#[must_use]
	pub fn new() -> Self {
		Self { custom: HashMap::new() }
	}

	/// Register `f` as the encoder for `T`.
	///
	/// The encoder takes precedence over any built-in encoder for `T`. A
	/// later registration for the same type replaces an earlier one.
	pub fn register<T, F>(&mut self, f: F)
	where
		T: Reflect,
		F: Fn(&T) -> String + Send + Sync + 'static,
	{
		let f: Arc<EncodeFn> = Arc::new(move |value: &dyn Reflect| {
			value.downcast_ref::<T>().map(&f)
		});

		self.custom.insert(TypeId::of::<T>(), f);
	}

	/// Check whether a custom encoder is registered for `T`.
	#[must_use]
	pub fn contains<T: Reflect>(&self) -> bool {
		self.contains_id(TypeId::of::<T>())
	}

	/// Check whether a custom encoder is registered for the type `id`.
	#[must_use]
	pub fn contains_id(&self, id: TypeId) -> bool {
		self.custom.contains_key(&id)
	}

	/// Get the number of custom encoders.
	#[must_use]
	pub fn len(&self) -> usize {
		self.custom.len()
	}

	/// Check whether there are no custom encoders.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.custom.is_empty()
	}

	/// Find an encoder for the type described by `info`.
	///
	/// Custom encoders are looked up first. Otherwise the kind of the type
	/// decides. Pointers always resolve, so that an absent pointer encodes
	/// as `"null"` whatever it points to. Structs, slices, arrays, maps and
	/// opaque types have no built-in encoder.
	#[must_use]
	pub fn resolve(&self, info: &TypeInfo) -> Option<ScalarEncoder<'_>> {
		if let Some(f) = self.custom.get(&info.id()) {
			return Some(ScalarEncoder::Custom(f.as_ref()));
		}

		use ScalarEncoder as E;
		let encoder = match info.kind() {
			Kind::Bool => E::Bool,
			Kind::Int => E::Int,
			Kind::Uint => E::Uint,
			Kind::Float32 => E::Float32,
			Kind::Float64 => E::Float64,
			Kind::String => E::String,
			Kind::Pointer(elem) => {
				E::Pointer(self.resolve(&elem()).map(Box::new))
			},
			_ => return None,
		};

		Some(encoder)
	}
}

/// An encoder turning a value into its string form.
#[non_exhaustive]
pub enum ScalarEncoder<'r> {
	/// A registered encoder.
	Custom(&'r EncodeFn),
	/// `true` or `false`.
	Bool,
	/// Base 10.
	Int,
	/// Base 10.
	Uint,
	/// Fixed point with 6 fractional digits.
	Float32,
	/// Fixed point with 6 fractional digits.
	Float64,
	/// The string itself.
	String,
	/// `"null"` when absent, otherwise the encoder of the element, if the
	/// element has one.
	Pointer(Option<Box<ScalarEncoder<'r>>>),
}

impl fmt::Debug for ScalarEncoder<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Custom(_) => f.write_str("Custom"),
			Self::Bool => f.write_str("Bool"),
			Self::Int => f.write_str("Int"),
			Self::Uint => f.write_str("Uint"),
			Self::Float32 => f.write_str("Float32"),
			Self::Float64 => f.write_str("Float64"),
			Self::String => f.write_str("String"),
			Self::Pointer(x) => f.debug_tuple("Pointer").field(x).finish(),
		}
	}
}

impl ScalarEncoder<'_> {
	/// Encode `value`.
	///
	/// `value` must be of the type this encoder was resolved for. Returns
	/// [`None`] for a present pointer whose element has no encoder, and for
	/// a value whose [`Value`] does not match the [`Kind`] its type reports.
	#[must_use]
	pub fn encode(&self, value: &dyn Reflect) -> Option<String> {
		use ScalarEncoder as E;
		let encoded = match (self, value.value()) {
			(E::Custom(f), _) => return f(value),
			(E::Bool, Value::Bool(x)) => x.to_string(),
			(E::Int, Value::Int(x)) => x.to_string(),
			(E::Uint, Value::Uint(x)) => x.to_string(),
			(E::Float32, Value::Float32(x)) => format_float(f64::from(x)),
			(E::Float64, Value::Float64(x)) => format_float(x),
			(E::String, Value::String(x)) => x.to_string(),
			(E::Pointer(_), Value::Pointer(None)) => String::from("null"),
			(E::Pointer(inner), Value::Pointer(Some(x))) => {
				return inner.as_ref()?.encode(x)
			},
			(_, value) => {
				tracing::debug!(?value, "value does not match its kind");
				return None;
			},
		};

		Some(encoded)
	}
}

fn format_float(x: f64) -> String {
	if x.is_nan() {
		String::from("NaN")
	} else if x.is_infinite() {
		String::from(if x > 0.0 { "+Inf" } else { "-Inf" })
	} else {
		format!("{x:.6}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug)]
	struct Money(i64);

	impl Reflect for Money {
		fn type_info() -> TypeInfo {
			TypeInfo::of::<Self>(Kind::Int)
		}

		fn value(&self) -> Value<'_> {
			Value::Int(self.0)
		}
	}

	fn encode<T: Reflect>(registry: &Registry, value: &T) -> Option<String> {
		registry.resolve(&T::type_info())?.encode(value)
	}

	#[test]
	fn test_builtin_scalars() {
		let r = Registry::new();

		assert_eq!(encode(&r, &true).as_deref(), Some("true"));
		assert_eq!(encode(&r, &false).as_deref(), Some("false"));
		assert_eq!(encode(&r, &-42_i32).as_deref(), Some("-42"));
		assert_eq!(encode(&r, &u64::MAX).as_deref(), Some("18446744073709551615"));
		assert_eq!(encode(&r, &1.5_f32).as_deref(), Some("1.500000"));
		assert_eq!(encode(&r, &0.1_f64).as_deref(), Some("0.100000"));
		assert_eq!(encode(&r, &String::from("a b")).as_deref(), Some("a b"));
	}

	#[test]
	fn test_non_finite_floats() {
		let r = Registry::new();

		assert_eq!(encode(&r, &f64::NAN).as_deref(), Some("NaN"));
		assert_eq!(encode(&r, &f32::INFINITY).as_deref(), Some("+Inf"));
		assert_eq!(encode(&r, &f64::NEG_INFINITY).as_deref(), Some("-Inf"));
	}

	#[test]
	fn test_pointers() {
		let r = Registry::new();

		assert_eq!(encode(&r, &None::<i32>).as_deref(), Some("null"));
		assert_eq!(encode(&r, &Some(7_i32)), encode(&r, &7_i32));
		assert_eq!(encode(&r, &Some(Some(true))).as_deref(), Some("true"));
		assert_eq!(encode(&r, &Box::new(3_u8)).as_deref(), Some("3"));
	}

	#[test]
	fn test_no_builtin() {
		let r = Registry::new();

		assert!(encode(&r, &vec![1_u8]).is_none(), "slices have no encoder");
		assert!(encode(&r, &[1_u8; 2]).is_none(), "arrays have no encoder");
		assert!(
			encode(&r, &Some(vec![1_u8])).is_none(),
			"present pointer to a slice has no encoding"
		);
	}

	#[test]
	fn test_absent_pointer_to_anything() {
		let r = Registry::new();

		assert!(
			r.resolve(&Option::<Vec<u8>>::type_info()).is_some(),
			"pointers always resolve"
		);
		assert_eq!(encode(&r, &None::<Vec<u8>>).as_deref(), Some("null"));
		assert_eq!(
			encode(&r, &None::<HashMap<String, String>>).as_deref(),
			Some("null")
		);
	}

	struct Liar;

	impl Reflect for Liar {
		fn type_info() -> TypeInfo {
			TypeInfo::of::<Self>(Kind::Bool)
		}

		fn value(&self) -> Value<'_> {
			Value::Int(1)
		}
	}

	#[test]
	fn test_kind_mismatch() {
		let r = Registry::new();
		assert!(encode(&r, &Liar).is_none(), "mismatch should not encode");
	}

	#[test]
	fn test_custom_precedes_builtin() {
		let mut r = Registry::new();
		r.register::<Money, _>(|m| format!("${}", m.0));

		assert!(r.contains::<Money>());
		assert!(!r.contains::<i64>());
		assert_eq!(encode(&r, &Money(5)).as_deref(), Some("$5"));
		assert_eq!(encode(&r, &Some(Money(5))).as_deref(), Some("$5"));
		assert_eq!(encode(&r, &5_i64).as_deref(), Some("5"));
	}

	#[test]
	fn test_custom_replaces_previous() {
		let mut r = Registry::new();
		r.register::<Money, _>(|_| String::from("first"));
		r.register::<Money, _>(|_| String::from("second"));

		assert_eq!(r.len(), 1);
		assert_eq!(encode(&r, &Money(1)).as_deref(), Some("second"));
	}
}
