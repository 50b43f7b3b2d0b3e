//! Paged listing of queues, topics, and subscriptions.

// self
use crate::{_prelude::*, params::ParamSet};

/// Paging and search arguments shared by every list call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFilter {
	/// Fuzzy match on the resource name.
	pub search_word: Option<String>,
	/// Index of the first entry returned.
	pub offset: Option<u32>,
	/// Number of entries returned; the service defaults to 20.
	pub limit: Option<u32>,
}
impl ListFilter {
	/// Restricts results to names matching `search_word`.
	pub fn search_word(mut self, search_word: impl Into<String>) -> Self {
		self.search_word = Some(search_word.into());

		self
	}

	/// Sets the page start.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}

	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	pub(crate) fn apply(&self, params: &mut ParamSet) {
		let search_word =
			self.search_word.as_deref().map(str::trim).filter(|word| !word.is_empty());

		params.insert_opt("searchWord", search_word);
		params.insert_opt("offset", self.offset);
		params.insert_opt("limit", self.limit);
	}
}

/// Response of a list call that yields resource names plus a total.
pub trait NameListing {
	/// Total number of matching resources, across all pages.
	fn total_count(&self) -> u64;

	/// Names on this page, in service order.
	fn into_names(self) -> Vec<String>;
}

/// Queue entry returned by `ListQueue`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
	/// Queue identifier.
	#[serde(default)]
	pub queue_id: String,
	/// Queue name.
	pub queue_name: String,
}

/// Payload of `ListQueue`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListQueueResponse {
	/// Total number of matching queues.
	pub total_count: u64,
	/// Queues on this page.
	pub queue_list: Vec<QueueEntry>,
}
impl NameListing for ListQueueResponse {
	fn total_count(&self) -> u64 {
		self.total_count
	}

	fn into_names(self) -> Vec<String> {
		self.queue_list.into_iter().map(|entry| entry.queue_name).collect()
	}
}

/// Topic entry returned by `ListTopic`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicEntry {
	/// Topic identifier.
	#[serde(default)]
	pub topic_id: String,
	/// Topic name.
	pub topic_name: String,
}

/// Payload of `ListTopic`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTopicResponse {
	/// Total number of matching topics.
	pub total_count: u64,
	/// Topics on this page.
	pub topic_list: Vec<TopicEntry>,
}
impl NameListing for ListTopicResponse {
	fn total_count(&self) -> u64 {
		self.total_count
	}

	fn into_names(self) -> Vec<String> {
		self.topic_list.into_iter().map(|entry| entry.topic_name).collect()
	}
}

/// Subscription entry returned by `ListSubscriptionByTopic`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionEntry {
	/// Subscription identifier.
	#[serde(default)]
	pub subscription_id: String,
	/// Subscription name.
	pub subscription_name: String,
	/// Delivery protocol, `http` or `queue`.
	#[serde(default)]
	pub protocol: String,
	/// Delivery target.
	#[serde(default)]
	pub endpoint: String,
}

/// Payload of `ListSubscriptionByTopic`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListSubscriptionResponse {
	/// Total number of matching subscriptions.
	pub total_count: u64,
	/// Subscriptions on this page.
	pub subscription_list: Vec<SubscriptionEntry>,
}
impl NameListing for ListSubscriptionResponse {
	fn total_count(&self) -> u64 {
		self.total_count
	}

	fn into_names(self) -> Vec<String> {
		self.subscription_list.into_iter().map(|entry| entry.subscription_name).collect()
	}
}

/// Appends the listing's names to `out` and returns the total count.
pub fn collect_names<L>(listing: L, out: &mut impl Extend<String>) -> u64
where
	L: NameListing,
{
	let total = listing.total_count();

	out.extend(listing.into_names());

	total
}
