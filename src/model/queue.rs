//! Queue attributes and message payloads.

// self
use crate::{_prelude::*, error::ValidationError, params::ParamSet};

/// Smallest message size limit the service accepts, in bytes.
pub const MIN_MSG_SIZE: u32 = 1024;
/// Largest message size limit the service accepts, in bytes.
pub const MAX_MSG_SIZE: u32 = 1_048_576;
/// Longest long-poll wait the service accepts, in seconds.
pub const MAX_POLLING_WAIT_SECONDS: u32 = 30;
/// Most entries a batch call may carry.
pub const MAX_BATCH_SIZE: usize = 16;

/// Writable queue attributes used by create and set-attributes calls.
///
/// Only fields set to `Some` are sent; the service keeps its own value for the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueMeta {
	/// Maximum number of messages the queue may hold.
	pub max_msg_heap_num: Option<u32>,
	/// Default long-poll wait for receive calls, in seconds.
	pub polling_wait_seconds: Option<u32>,
	/// Time a received message stays invisible, in seconds.
	pub visibility_timeout: Option<u32>,
	/// Maximum message size, in bytes.
	pub max_msg_size: Option<u32>,
	/// Message retention period, in seconds.
	pub msg_retention_seconds: Option<u32>,
	/// Rewind window for deleted messages, in seconds.
	pub rewind_seconds: Option<u32>,
}
impl QueueMeta {
	/// Default visibility timeout, in seconds.
	pub const DEFAULT_VISIBILITY_TIMEOUT: u32 = 30;
	/// Default message retention, in seconds.
	pub const DEFAULT_MSG_RETENTION_SECONDS: u32 = 345_600;

	/// Attributes matching the service's documented defaults.
	pub fn with_service_defaults() -> Self {
		Self {
			visibility_timeout: Some(Self::DEFAULT_VISIBILITY_TIMEOUT),
			max_msg_size: Some(MAX_MSG_SIZE),
			msg_retention_seconds: Some(Self::DEFAULT_MSG_RETENTION_SECONDS),
			..Self::default()
		}
	}

	/// Sets the maximum number of held messages.
	pub fn max_msg_heap_num(mut self, value: u32) -> Self {
		self.max_msg_heap_num = Some(value);

		self
	}

	/// Sets the default long-poll wait.
	pub fn polling_wait_seconds(mut self, value: u32) -> Self {
		self.polling_wait_seconds = Some(value);

		self
	}

	/// Sets the visibility timeout.
	pub fn visibility_timeout(mut self, value: u32) -> Self {
		self.visibility_timeout = Some(value);

		self
	}

	/// Sets the maximum message size.
	pub fn max_msg_size(mut self, value: u32) -> Self {
		self.max_msg_size = Some(value);

		self
	}

	/// Sets the retention period.
	pub fn msg_retention_seconds(mut self, value: u32) -> Self {
		self.msg_retention_seconds = Some(value);

		self
	}

	/// Sets the rewind window.
	pub fn rewind_seconds(mut self, value: u32) -> Self {
		self.rewind_seconds = Some(value);

		self
	}

	/// Returns true when no attribute is set.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	pub(crate) fn validate(&self) -> Result<(), ValidationError> {
		if let Some(size) = self.max_msg_size {
			check_msg_size(size)?;
		}
		if let Some(wait) = self.polling_wait_seconds {
			check_polling_wait(wait)?;
		}

		Ok(())
	}

	pub(crate) fn apply(&self, params: &mut ParamSet) {
		params.insert_opt("maxMsgHeapNum", self.max_msg_heap_num);
		params.insert_opt("pollingWaitSeconds", self.polling_wait_seconds);
		params.insert_opt("visibilityTimeout", self.visibility_timeout);
		params.insert_opt("maxMsgSize", self.max_msg_size);
		params.insert_opt("msgRetentionSeconds", self.msg_retention_seconds);
		params.insert_opt("rewindSeconds", self.rewind_seconds);
	}
}

/// Queue attributes reported by `GetQueueAttributes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueAttributes {
	/// Maximum number of messages the queue may hold.
	pub max_msg_heap_num: Option<i64>,
	/// Default long-poll wait, in seconds.
	pub polling_wait_seconds: Option<i64>,
	/// Visibility timeout, in seconds.
	pub visibility_timeout: Option<i64>,
	/// Maximum message size, in bytes.
	pub max_msg_size: Option<i64>,
	/// Retention period, in seconds.
	pub msg_retention_seconds: Option<i64>,
	/// Creation time, Unix seconds.
	pub create_time: Option<i64>,
	/// Last attribute change, Unix seconds.
	pub last_modify_time: Option<i64>,
	/// Messages currently visible.
	pub active_msg_num: Option<i64>,
	/// Messages currently in flight.
	pub inactive_msg_num: Option<i64>,
	/// Rewind window, in seconds.
	pub rewind_seconds: Option<i64>,
	/// Deleted messages still inside the rewind window.
	#[serde(rename = "rewindmsgNum")]
	pub rewind_msg_num: Option<i64>,
	/// Oldest unconsumed message time.
	pub min_msg_time: Option<i64>,
	/// Delayed messages waiting to become visible.
	pub delay_msg_num: Option<i64>,
}

/// Payload of `SendMessage` and `PublishMessage`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
	/// Server-generated message identifier.
	pub msg_id: String,
}

/// One entry of a batch send or publish result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgIdEntry {
	/// Server-generated message identifier.
	pub msg_id: String,
}

/// Payload of `BatchSendMessage` and `BatchPublishMessage`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchSendResponse {
	/// Identifiers in request order.
	pub msg_list: Vec<MsgIdEntry>,
}
impl BatchSendResponse {
	/// Extracts the message identifiers.
	pub fn into_ids(self) -> Vec<String> {
		self.msg_list.into_iter().map(|entry| entry.msg_id).collect()
	}
}

/// Message delivered by `ReceiveMessage` or `BatchReceiveMessage`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedMessage {
	/// Server-generated message identifier.
	pub msg_id: String,
	/// Handle required to delete this delivery.
	pub receipt_handle: String,
	/// Message body.
	pub msg_body: String,
	/// Enqueue time, Unix milliseconds.
	#[serde(default)]
	pub enqueue_time: i64,
	/// Time the message becomes visible again, Unix milliseconds.
	#[serde(default)]
	pub next_visible_time: i64,
	/// First delivery time, Unix milliseconds.
	#[serde(default)]
	pub first_dequeue_time: i64,
	/// Number of deliveries so far.
	#[serde(default)]
	pub dequeue_count: i64,
	/// Tags attached by the publisher.
	#[serde(default)]
	pub msg_tag: Vec<String>,
}

/// Payload of `BatchReceiveMessage`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchReceiveResponse {
	/// Delivered messages.
	pub msg_info_list: Vec<ReceivedMessage>,
}

pub(crate) fn check_msg_size(size: u32) -> Result<(), ValidationError> {
	check_range("maxMsgSize", i64::from(size), i64::from(MIN_MSG_SIZE), i64::from(MAX_MSG_SIZE))
}

pub(crate) fn check_polling_wait(wait: u32) -> Result<(), ValidationError> {
	check_range("pollingWaitSeconds", i64::from(wait), 0, i64::from(MAX_POLLING_WAIT_SECONDS))
}

pub(crate) fn check_range(
	field: &'static str,
	value: i64,
	min: i64,
	max: i64,
) -> Result<(), ValidationError> {
	if (min..=max).contains(&value) {
		Ok(())
	} else {
		Err(ValidationError::OutOfRange { field, value, min, max })
	}
}

pub(crate) fn check_batch(
	field: &'static str,
	len: usize,
	min: usize,
	max: usize,
) -> Result<(), ValidationError> {
	if (min..=max).contains(&len) {
		Ok(())
	} else {
		Err(ValidationError::BatchSize { field, len, min, max })
	}
}
