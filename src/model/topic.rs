//! Topic attributes.

// crates.io
use serde::{Deserializer, Serializer};
// self
use crate::_prelude::*;

/// Largest number of tags or binding keys a single call may carry.
pub const MAX_TAGS: usize = 5;

/// Message matching strategy fixed when a topic is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterType {
	/// Subscriptions filter on `filterTag`.
	#[default]
	Tag,
	/// Subscriptions filter on `bindingKey` against the message routing key.
	RoutingKey,
}
impl FilterType {
	/// Wire value of the filter type.
	pub const fn code(self) -> u32 {
		match self {
			Self::Tag => 1,
			Self::RoutingKey => 2,
		}
	}

	/// Parses the wire value.
	pub const fn from_code(code: i64) -> Option<Self> {
		match code {
			1 => Some(Self::Tag),
			2 => Some(Self::RoutingKey),
			_ => None,
		}
	}
}
impl Serialize for FilterType {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u32(self.code())
	}
}
impl<'de> Deserialize<'de> for FilterType {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let code = i64::deserialize(deserializer)?;

		Self::from_code(code)
			.ok_or_else(|| serde::de::Error::custom(format!("unknown filter type {code}")))
	}
}

/// Topic attributes reported by `GetTopicAttributes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicAttributes {
	/// Messages waiting to be pushed.
	pub msg_count: Option<i64>,
	/// Maximum message size, in bytes.
	pub max_msg_size: Option<i64>,
	/// Retention period, in seconds.
	pub msg_retention_seconds: Option<i64>,
	/// Creation time, Unix seconds.
	pub create_time: Option<i64>,
	/// Last attribute change, Unix seconds.
	pub last_modify_time: Option<i64>,
	/// Whether message tracing is enabled.
	pub logging_enabled: Option<i64>,
	/// Matching strategy.
	pub filter_type: Option<FilterType>,
}
