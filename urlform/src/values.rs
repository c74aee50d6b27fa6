//! Collectors of encoded key/value pairs.

use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;
use std::collections::HashMap;

/// A sink for encoded key/value pairs.
///
/// Types implementing this trait are called 'collectors'.
pub trait Collector {
	/// Check whether `key` has been written before.
	fn contains_key(&self, key: &str) -> bool;

	/// Add `value` to the values of `key`.
	fn append(&mut self, key: &str, value: String);

	/// Drop all values of `key` and write `values` in their place.
	///
	/// Ordered collectors move `key` after every other key.
	fn replace(&mut self, key: &str, values: Vec<String>);
}

impl<C: Collector + ?Sized> Collector for &mut C {
	fn contains_key(&self, key: &str) -> bool {
		(**self).contains_key(key)
	}

	fn append(&mut self, key: &str, value: String) {
		(**self).append(key, value);
	}

	fn replace(&mut self, key: &str, values: Vec<String>) {
		(**self).replace(key, values);
	}
}

/// A plain map has no order. Replacing a key only swaps its values.
impl<S> Collector for HashMap<String, Vec<String>, S>
where
	S: core::hash::BuildHasher,
{
	fn contains_key(&self, key: &str) -> bool {
		HashMap::contains_key(self, key)
	}

	fn append(&mut self, key: &str, value: String) {
		self.entry(key.to_owned()).or_default().push(value);
	}

	fn replace(&mut self, key: &str, values: Vec<String>) {
		self.insert(key.to_owned(), values);
	}
}

/// Render pairs as `key=value&key=value` with both sides escaped.
fn render<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut out = form_urlencoded::Serializer::new(String::new());
	for (key, value) in pairs {
		out.append_pair(key, value);
	}
	out.finish()
}

/// Key/value pairs that remember the order in which keys were first written.
///
/// Every key maps to a list of values. Keys are rendered in the order they
/// were first appended, except that [`Collector::replace`] moves a key to the
/// end.
///
/// # Example
///
/// ```rust
/// use urlform::{Collector, Values};
///
/// let mut values = Values::new();
/// values.append("b", "1".to_owned());
/// values.append("a", "2".to_owned());
/// values.append("b", "3".to_owned());
///
/// assert_eq!(values.encode(), "b=1&b=3&a=2");
///
/// values.replace("b", vec!["4".to_owned()]);
/// assert_eq!(values.encode(), "a=2&b=4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
	keys: Vec<String>,
	values: HashMap<String, Vec<String>>,
}

impl Values {
	/// Create a new empty [`Values`].
	#[must_use]
	pub fn new() -> Self {
		Self { keys: Vec::new(), values: HashMap::new() }
	}

	/// Get the values of `key`.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.values.get(key).map(Vec::as_slice)
	}

	/// Get the first value of `key`.
	#[must_use]
	pub fn get_first(&self, key: &str) -> Option<&str> {
		self.get(key)?.first().map(String::as_str)
	}

	/// Iterate over the keys in output order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.keys.iter().map(String::as_str)
	}

	/// Iterate over every `(key, value)` pair in output order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.keys.iter().flat_map(move |key| {
			self.values
				.get(key)
				.into_iter()
				.flatten()
				.map(move |value| (key.as_str(), value.as_str()))
		})
	}

	/// Get the number of distinct keys.
	#[must_use]
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Check whether no key has been written.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Get the values as a plain map.
	#[must_use]
	pub fn as_map(&self) -> &HashMap<String, Vec<String>> {
		&self.values
	}

	/// Consume `self` and return the values as a plain map.
	#[must_use]
	pub fn into_map(self) -> HashMap<String, Vec<String>> {
		self.values
	}

	/// Render the values as a URL-encoded query string.
	///
	/// Keys and values are escaped. An empty [`Values`] renders as an empty
	/// string.
	#[must_use]
	pub fn encode(&self) -> String {
		render(self.iter())
	}

	fn remove_key(&mut self, key: &str) {
		if let Some(i) = self.keys.iter().position(|x| x == key) {
			self.keys.remove(i);
		}
	}
}

impl Collector for Values {
	fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	fn append(&mut self, key: &str, value: String) {
		if let Some(values) = self.values.get_mut(key) {
			values.push(value);
		} else {
			self.keys.push(key.to_owned());
			self.values.insert(key.to_owned(), vec![value]);
		}
	}

	fn replace(&mut self, key: &str, values: Vec<String>) {
		if self.values.contains_key(key) {
			self.remove_key(key);
		}

		self.keys.push(key.to_owned());
		self.values.insert(key.to_owned(), values);
	}
}

impl fmt::Display for Values {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.encode())
	}
}

impl From<Values> for HashMap<String, Vec<String>> {
	fn from(values: Values) -> Self {
		values.into_map()
	}
}

/// A flat list of key/value pairs.
///
/// Unlike [`Values`], every pair keeps its own position, so appending to a
/// key that was written before does not group the new value with the old
/// ones. [`Collector::replace`] removes every pair of the key and appends
/// the new ones at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairs {
	pairs: Vec<(String, String)>,
}

impl Pairs {
	/// Create a new empty [`Pairs`].
	#[must_use]
	pub fn new() -> Self {
		Self { pairs: Vec::new() }
	}

	/// Iterate over every pair in output order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Get the number of pairs.
	#[must_use]
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Check whether there are no pairs.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Group the pairs into a plain map.
	#[must_use]
	pub fn values(&self) -> HashMap<String, Vec<String>> {
		let mut map: HashMap<String, Vec<String>> = HashMap::new();
		for (key, value) in &self.pairs {
			map.entry(key.clone()).or_default().push(value.clone());
		}
		map
	}

	/// Consume `self` and return the pairs.
	#[must_use]
	pub fn into_inner(self) -> Vec<(String, String)> {
		self.pairs
	}

	/// Render the pairs as a URL-encoded query string.
	#[must_use]
	pub fn encode(&self) -> String {
		render(self.iter())
	}
}

impl Collector for Pairs {
	fn contains_key(&self, key: &str) -> bool {
		self.pairs.iter().any(|(k, _)| k == key)
	}

	fn append(&mut self, key: &str, value: String) {
		self.pairs.push((key.to_owned(), value));
	}

	fn replace(&mut self, key: &str, values: Vec<String>) {
		self.pairs.retain(|(k, _)| k != key);
		self.pairs
			.extend(values.into_iter().map(|value| (key.to_owned(), value)));
	}
}

impl fmt::Display for Pairs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.encode())
	}
}

cfg_serde! {
	/// Serialized as a map from each key to its list of values, in output
	/// order.
	impl serde::Serialize for Values {
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: serde::Serializer,
		{
			use serde::ser::SerializeMap;

			let mut map = serializer.serialize_map(Some(self.len()))?;
			for key in &self.keys {
				if let Some(values) = self.values.get(key) {
					map.serialize_entry(key, values)?;
				}
			}
			map.end()
		}
	}

	/// Serialized as a list of `[key, value]` pairs.
	impl serde::Serialize for Pairs {
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: serde::Serializer,
		{
			self.pairs.serialize(serializer)
		}
	}
}
