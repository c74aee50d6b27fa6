//! [`Reflect`] implementations for std types.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use std::collections::HashMap;

use crate::reflect::{Kind, Reflect, TypeInfo, Value};

macro_rules! impl_reflect_scalar {
	($($ty:ty => $kind:ident($conv:expr)),* $(,)?) => {
		$(
			impl Reflect for $ty {
				fn type_info() -> TypeInfo {
					TypeInfo::of::<Self>(Kind::$kind)
				}

				#[allow(clippy::redundant_closure_call)]
				fn value(&self) -> Value<'_> {
					Value::$kind($conv(*self))
				}
			}
		)*
	};
}

impl_reflect_scalar! {
	bool => Bool(|x| x),
	i8 => Int(i64::from),
	i16 => Int(i64::from),
	i32 => Int(i64::from),
	i64 => Int(|x| x),
	u8 => Uint(u64::from),
	u16 => Uint(u64::from),
	u32 => Uint(u64::from),
	u64 => Uint(|x| x),
	f32 => Float32(|x| x),
	f64 => Float64(|x| x),
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
impl Reflect for isize {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Int)
	}

	fn value(&self) -> Value<'_> {
		Value::Int(*self as i64)
	}
}

#[allow(clippy::cast_possible_truncation)]
impl Reflect for usize {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Uint)
	}

	fn value(&self) -> Value<'_> {
		Value::Uint(*self as u64)
	}
}

impl Reflect for String {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::String)
	}

	fn value(&self) -> Value<'_> {
		Value::String(self.as_str())
	}
}

impl Reflect for &'static str {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::String)
	}

	fn value(&self) -> Value<'_> {
		Value::String(self)
	}
}

impl<T: Reflect> Reflect for Option<T> {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Pointer(T::type_info))
	}

	fn value(&self) -> Value<'_> {
		Value::Pointer(self.as_ref().map(|x| x as &dyn Reflect))
	}
}

impl<T: Reflect> Reflect for Box<T> {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Pointer(T::type_info))
	}

	fn value(&self) -> Value<'_> {
		Value::Pointer(Some(&**self as &dyn Reflect))
	}
}

impl<T: Reflect> Reflect for Vec<T> {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Slice(T::type_info))
	}

	fn value(&self) -> Value<'_> {
		Value::Slice(self.iter().map(|x| x as &dyn Reflect).collect())
	}
}

impl<T: Reflect> Reflect for VecDeque<T> {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Slice(T::type_info))
	}

	fn value(&self) -> Value<'_> {
		Value::Slice(self.iter().map(|x| x as &dyn Reflect).collect())
	}
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Array(T::type_info))
	}

	fn value(&self) -> Value<'_> {
		Value::Array(self.iter().map(|x| x as &dyn Reflect).collect())
	}
}

impl<K: 'static, V: 'static, S: 'static> Reflect for HashMap<K, V, S> {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Map)
	}

	fn value(&self) -> Value<'_> {
		Value::Map(self.len())
	}
}

impl<K: 'static, V: 'static> Reflect for BTreeMap<K, V> {
	fn type_info() -> TypeInfo {
		TypeInfo::of::<Self>(Kind::Map)
	}

	fn value(&self) -> Value<'_> {
		Value::Map(self.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scalar_kinds() {
		assert!(matches!(7_i8.value(), Value::Int(7)));
		assert!(matches!((-3_isize).value(), Value::Int(-3)));
		assert!(matches!(9_u16.value(), Value::Uint(9)));
		assert!(matches!(true.value(), Value::Bool(true)));
		assert!(matches!("x".value(), Value::String("x")));
		assert!(matches!(u32::type_info().kind(), Kind::Uint));
		assert!(matches!(f32::type_info().kind(), Kind::Float32));
	}

	#[test]
	fn test_pointer_elem() {
		let info = Option::<u8>::type_info();
		let elem = info.kind().elem().map(|x| x.id());

		assert_eq!(elem, Some(core::any::TypeId::of::<u8>()));
		assert!(matches!(None::<u8>.value(), Value::Pointer(None)));
		assert!(matches!(Box::new(1_u8).value(), Value::Pointer(Some(_))));
	}

	#[test]
	fn test_sequences() {
		let v = vec![1_i32, 2, 3];
		let Value::Slice(items) = v.value() else {
			panic!("Vec should be a slice");
		};
		assert_eq!(items.len(), 3);

		let a = [0_u8; 4];
		assert!(matches!(a.value(), Value::Array(ref x) if x.len() == 4));
		assert!(matches!(
			<[u8; 4]>::type_info().kind(),
			Kind::Array(_)
		));
	}

	#[test]
	fn test_maps() {
		let mut m: HashMap<&str, i32> = HashMap::new();
		assert!(m.is_zero_value(), "empty map should be zero");

		m.insert("a", 1);
		assert!(matches!(m.value(), Value::Map(1)));
	}
}
