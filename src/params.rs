//! Request parameter sets and their canonical `key=value&...` rendering.
//!
//! Every request is described by a [`ParamSet`]. The signer renders it twice: once
//! unescaped for the string-to-sign, once query-escaped for the wire. Both renderings
//! share the same key order and logical pairs; only the value escaping differs.

// std
use std::collections::BTreeMap;
// crates.io
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Single parameter value; integers render as decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamValue {
	/// Free-form string value.
	Str(String),
	/// 32-bit integer value.
	Int(i32),
	/// 64-bit integer value.
	Long(i64),
}
impl ParamValue {
	fn render(&self, encode: bool, out: &mut String) {
		match self {
			Self::Str(value) if encode =>
				out.extend(form_urlencoded::byte_serialize(value.as_bytes())),
			Self::Str(value) => out.push_str(value),
			Self::Int(value) => out.push_str(&value.to_string()),
			Self::Long(value) => out.push_str(&value.to_string()),
		}
	}
}
impl Display for ParamValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Str(value) => f.write_str(value),
			Self::Int(value) => write!(f, "{value}"),
			Self::Long(value) => write!(f, "{value}"),
		}
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}
impl From<&String> for ParamValue {
	fn from(value: &String) -> Self {
		Self::Str(value.clone())
	}
}
impl From<i32> for ParamValue {
	fn from(value: i32) -> Self {
		Self::Int(value)
	}
}
impl From<u32> for ParamValue {
	fn from(value: u32) -> Self {
		Self::Long(i64::from(value))
	}
}
impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Long(value)
	}
}

/// Key/value collection describing one request.
///
/// Keys may use `_` where the service expects `.`; the substitution happens on insert, so
/// `msgBody_0` and `msgBody.0` name the same parameter. A set is owned by exactly one call
/// and must not be reused, since signing stamps it with a fresh nonce and timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamSet(BTreeMap<String, ParamValue>);
impl ParamSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a parameter.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.0.insert(normalize_key(key.into()), value.into());
	}

	/// Inserts a parameter only when a value is present.
	pub fn insert_opt<V>(&mut self, key: impl Into<String>, value: Option<V>)
	where
		V: Into<ParamValue>,
	{
		if let Some(value) = value {
			self.insert(key, value);
		}
	}

	/// Inserts `prefix.N` keys for each entry, numbering from `first`.
	pub fn insert_indexed<I, V>(&mut self, prefix: &str, first: usize, values: I)
	where
		I: IntoIterator<Item = V>,
		V: Into<ParamValue>,
	{
		for (idx, value) in values.into_iter().enumerate() {
			self.insert(format!("{prefix}.{}", first + idx), value);
		}
	}

	/// Removes a parameter, returning its previous value.
	pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
		self.0.remove(&key.replace('_', "."))
	}

	/// Returns the value stored under `key`, if any.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(&key.replace('_', "."))
	}

	/// Returns true when `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(&key.replace('_', "."))
	}

	/// Number of parameters in the set.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the set holds no parameters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Renders the set as `key=value` pairs joined by `&`, keys in byte order.
	///
	/// String values are query-escaped only when `encode` is set.
	pub fn canonical(&self, encode: bool) -> String {
		let mut buf = String::new();

		for (idx, (key, value)) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push('&');
			}

			buf.push_str(key);
			buf.push('=');
			value.render(encode, &mut buf);
		}

		buf
	}
}
impl<K, V> FromIterator<(K, V)> for ParamSet
where
	K: Into<String>,
	V: Into<ParamValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut set = Self::new();

		for (key, value) in iter {
			set.insert(key, value);
		}

		set
	}
}

fn normalize_key(key: String) -> String {
	if key.contains('_') {
		return key.replace('_', ".");
	}

	key
}
