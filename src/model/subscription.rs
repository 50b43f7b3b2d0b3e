//! Subscription requests and attributes.

// self
use crate::{
	_prelude::*,
	api::{SubscriptionName, TopicName, name},
	error::ValidationError,
	model::{queue, topic::MAX_TAGS},
	params::ParamSet,
};

/// Delivery protocol of a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
	/// Push to an HTTP endpoint.
	Http,
	/// Push into a queue; the endpoint is the queue name.
	Queue,
}
impl Protocol {
	/// Wire value of the protocol.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Http => "http",
			Self::Queue => "queue",
		}
	}
}

/// Retry policy applied when a push fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotifyStrategy {
	/// Retry at a fixed interval, then drop.
	BackoffRetry,
	/// Retry at exponentially growing intervals for up to a day.
	#[default]
	ExponentialDecayRetry,
}
impl NotifyStrategy {
	/// Wire value of the strategy.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::BackoffRetry => "BACKOFF_RETRY",
			Self::ExponentialDecayRetry => "EXPONENTIAL_DECAY_RETRY",
		}
	}
}

/// Format of pushed message content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotifyContentFormat {
	/// JSON document wrapping the message.
	#[default]
	Json,
	/// Raw message body; required for queue delivery.
	Simplified,
}
impl NotifyContentFormat {
	/// Wire value of the format.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Json => "JSON",
			Self::Simplified => "SIMPLIFIED",
		}
	}
}

/// Arguments of a `Subscribe` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscribeRequest {
	/// Topic to subscribe to.
	pub topic: TopicName,
	/// Name of the new subscription.
	pub subscription: SubscriptionName,
	/// Delivery target: an `http://` URL or a queue name.
	pub endpoint: String,
	/// Delivery protocol.
	pub protocol: Protocol,
	/// Retry policy.
	pub notify_strategy: NotifyStrategy,
	/// Pushed content format.
	pub notify_content_format: NotifyContentFormat,
	/// Tags a message must intersect to be delivered.
	pub filter_tags: Vec<String>,
	/// Routing patterns for routing-key topics.
	pub binding_keys: Vec<String>,
}
impl SubscribeRequest {
	/// Creates a request with default strategy and format.
	pub fn new(
		topic: TopicName,
		subscription: SubscriptionName,
		endpoint: impl Into<String>,
		protocol: Protocol,
	) -> Self {
		Self {
			topic,
			subscription,
			endpoint: endpoint.into(),
			protocol,
			notify_strategy: NotifyStrategy::default(),
			notify_content_format: match protocol {
				Protocol::Http => NotifyContentFormat::Json,
				Protocol::Queue => NotifyContentFormat::Simplified,
			},
			filter_tags: Vec::new(),
			binding_keys: Vec::new(),
		}
	}

	/// Sets the retry policy.
	pub fn notify_strategy(mut self, strategy: NotifyStrategy) -> Self {
		self.notify_strategy = strategy;

		self
	}

	/// Sets the pushed content format.
	pub fn notify_content_format(mut self, format: NotifyContentFormat) -> Self {
		self.notify_content_format = format;

		self
	}

	/// Replaces the filter tags.
	pub fn filter_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.filter_tags = tags.into_iter().map(Into::into).collect();

		self
	}

	/// Replaces the binding keys.
	pub fn binding_keys<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.binding_keys = keys.into_iter().map(Into::into).collect();

		self
	}

	pub(crate) fn apply(&self, params: &mut ParamSet) -> Result<(), ValidationError> {
		let endpoint = name::required("endpoint", &self.endpoint)?;

		check_tags("filterTag", &self.filter_tags)?;
		check_tags("bindingKey", &self.binding_keys)?;
		params.insert(TopicName::FIELD, self.topic.as_ref());
		params.insert(SubscriptionName::FIELD, self.subscription.as_ref());
		params.insert("endpoint", endpoint);
		params.insert("protocol", self.protocol.as_str());
		params.insert("notifyStrategy", self.notify_strategy.as_str());
		params.insert("notifyContentFormat", self.notify_content_format.as_str());
		params.insert_indexed("filterTag", 1, &self.filter_tags);
		params.insert_indexed("bindingKey", 1, &self.binding_keys);

		Ok(())
	}
}

/// Writable subscription attributes; unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionMeta {
	/// Retry policy.
	pub notify_strategy: Option<NotifyStrategy>,
	/// Pushed content format.
	pub notify_content_format: Option<NotifyContentFormat>,
	/// Replacement filter tags.
	pub filter_tags: Vec<String>,
	/// Replacement binding keys.
	pub binding_keys: Vec<String>,
}
impl SubscriptionMeta {
	pub(crate) fn apply(&self, params: &mut ParamSet) -> Result<(), ValidationError> {
		check_tags("filterTag", &self.filter_tags)?;
		check_tags("bindingKey", &self.binding_keys)?;
		params.insert_opt("notifyStrategy", self.notify_strategy.map(NotifyStrategy::as_str));
		params.insert_opt(
			"notifyContentFormat",
			self.notify_content_format.map(NotifyContentFormat::as_str),
		);
		params.insert_indexed("filterTag", 1, &self.filter_tags);
		params.insert_indexed("bindingKey", 1, &self.binding_keys);

		Ok(())
	}
}

/// Subscription attributes reported by `GetSubscriptionAttributes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionAttributes {
	/// Account that owns the topic.
	pub topic_owner: Option<String>,
	/// Delivery target.
	pub endpoint: Option<String>,
	/// Delivery protocol.
	pub protocol: Option<Protocol>,
	/// Retry policy.
	pub notify_strategy: Option<NotifyStrategy>,
	/// Pushed content format.
	pub notify_content_format: Option<NotifyContentFormat>,
	/// Filter tags.
	#[serde(rename = "filterTag")]
	pub filter_tags: Option<Vec<String>>,
	/// Binding keys.
	#[serde(rename = "bindingKey")]
	pub binding_keys: Option<Vec<String>>,
	/// Creation time, Unix seconds.
	pub create_time: Option<i64>,
	/// Last attribute change, Unix seconds.
	pub last_modify_time: Option<i64>,
	/// Messages waiting to be pushed to this subscription.
	pub msg_count: Option<i64>,
}

pub(crate) fn check_tags(field: &'static str, tags: &[String]) -> Result<(), ValidationError> {
	queue::check_batch(field, tags.len(), 0, MAX_TAGS)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request(protocol: Protocol) -> SubscribeRequest {
		SubscribeRequest::new(
			TopicName::new("events").expect("Topic fixture should be valid."),
			SubscriptionName::new("audit").expect("Subscription fixture should be valid."),
			" http://hook.example.com/cmq ",
			protocol,
		)
	}

	#[test]
	fn subscribe_request_renders_one_based_lists() {
		let mut params = ParamSet::new();

		request(Protocol::Http)
			.filter_tags(["a", "b"])
			.binding_keys(["x.*"])
			.apply(&mut params)
			.expect("Request within limits should apply.");

		assert_eq!(
			params.canonical(false),
			"bindingKey.1=x.*&endpoint=http://hook.example.com/cmq&filterTag.1=a&filterTag.2=b\
			 &notifyContentFormat=JSON&notifyStrategy=EXPONENTIAL_DECAY_RETRY&protocol=http\
			 &subscriptionName=audit&topicName=events"
		);
	}

	#[test]
	fn queue_protocol_defaults_to_simplified_format() {
		assert_eq!(request(Protocol::Queue).notify_content_format, NotifyContentFormat::Simplified);
	}

	#[test]
	fn tag_limits_are_enforced() {
		let err = request(Protocol::Http)
			.filter_tags(["1", "2", "3", "4", "5", "6"])
			.apply(&mut ParamSet::new())
			.expect_err("Six filter tags must be rejected.");

		assert!(matches!(err, ValidationError::BatchSize { field: "filterTag", len: 6, .. }));

		let err = SubscriptionMeta {
			binding_keys: vec!["k".into(); MAX_TAGS + 1],
			..SubscriptionMeta::default()
		}
		.apply(&mut ParamSet::new())
		.expect_err("Six binding keys must be rejected.");

		assert!(matches!(err, ValidationError::BatchSize { field: "bindingKey", .. }));
	}

	#[test]
	fn blank_endpoint_is_rejected() {
		let mut request = request(Protocol::Http);

		request.endpoint = "  ".into();

		assert_eq!(
			request.apply(&mut ParamSet::new()),
			Err(ValidationError::Empty { field: "endpoint" })
		);
	}

	#[test]
	fn attributes_are_constructed_from_sparse_payloads() {
		let attrs: SubscriptionAttributes = serde_json::from_str(
			r#"{"code":0,"protocol":"queue","notifyStrategy":"BACKOFF_RETRY","filterTag":["a"],"msgCount":3}"#,
		)
		.expect("Subscription attributes should decode.");

		assert_eq!(attrs.protocol, Some(Protocol::Queue));
		assert_eq!(attrs.notify_strategy, Some(NotifyStrategy::BackoffRetry));
		assert_eq!(attrs.filter_tags.as_deref(), Some(&["a".to_owned()][..]));
		assert_eq!(attrs.endpoint, None);
		assert_eq!(attrs.msg_count, Some(3));
	}
}
