//! Shared client handle and the single invoke path every façade uses.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::{Account, Action, Queue, QueueName, Subscription, SubscriptionName, Topic, TopicName},
	config::CmqConfig,
	http::{CmqHttpClient, HttpRequest},
	model,
	obs::{self, ActionOutcome, ActionSpan},
	params::ParamSet,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestCmqClient = Client<ReqwestHttpClient>;

/// Cheap-to-clone handle pairing a transport with an immutable configuration.
///
/// Clones share both halves, so façades built from one client can be moved into
/// different tasks and called concurrently.
pub struct Client<C>
where
	C: ?Sized + CmqHttpClient,
{
	/// Transport used for every request.
	pub http_client: Arc<C>,
	/// Endpoint, credential, and timeouts.
	pub config: Arc<CmqConfig>,
}
impl<C> Client<C>
where
	C: ?Sized + CmqHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: impl Into<Arc<CmqConfig>>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), config: config.into() }
	}

	/// Façade for account-level management calls.
	pub fn account(&self) -> Account<C> {
		Account::new(self.clone())
	}

	/// Façade for one queue.
	pub fn queue(&self, name: impl AsRef<str>) -> Result<Queue<C>> {
		Ok(Queue::new(self.clone(), QueueName::new(name)?))
	}

	/// Façade for one topic.
	pub fn topic(&self, name: impl AsRef<str>) -> Result<Topic<C>> {
		Ok(Topic::new(self.clone(), TopicName::new(name)?))
	}

	/// Façade for one subscription of `topic`.
	pub fn subscription(
		&self,
		topic: impl AsRef<str>,
		subscription: impl AsRef<str>,
	) -> Result<Subscription<C>> {
		let topic = TopicName::new(topic)?;
		let subscription = SubscriptionName::new(subscription)?;

		Ok(Subscription::new(self.clone(), topic, subscription))
	}

	/// Runs one action: build params, sign, send, decode.
	///
	/// `timeout` overrides the configured request timeout; receive calls pass the
	/// long-poll deadline here.
	pub(crate) async fn invoke<T, F>(
		&self,
		action: Action,
		resource: &str,
		timeout: Option<Duration>,
		build: F,
	) -> Result<T>
	where
		T: DeserializeOwned,
		F: FnOnce(&mut ParamSet) -> Result<()>,
	{
		let span = ActionSpan::new(action, resource);

		obs::record_action_outcome(action, ActionOutcome::Attempt);

		let result = span.instrument(self.round_trip(action, timeout, build)).await;

		match &result {
			Ok(_) => obs::record_action_outcome(action, ActionOutcome::Success),
			Err(err) => {
				obs::log_action_failure(action, err);
				obs::record_action_outcome(action, ActionOutcome::Failure);

				if let Some(code) = err.vendor_code() {
					obs::record_vendor_error(action, code);
				}
			},
		}

		result
	}

	async fn round_trip<T, F>(
		&self,
		action: Action,
		timeout: Option<Duration>,
		build: F,
	) -> Result<T>
	where
		T: DeserializeOwned,
		F: FnOnce(&mut ParamSet) -> Result<()>,
	{
		let mut params = ParamSet::new();

		build(&mut params)?;
		self.config.signer().sign(action, &mut params)?;

		let request = HttpRequest::from_params(
			self.config.credential.method(),
			&self.config.base_url(),
			&params,
			timeout.or(self.config.request_timeout),
		)?;
		let response = self.http_client.execute(request).await?;

		model::decode_envelope(action, &response)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a freshly built reqwest transport.
	pub fn new(config: impl Into<Arc<CmqConfig>>) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().build()?;

		Ok(Self::with_http_client(config, ReqwestHttpClient::with_client(client)))
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), config: self.config.clone() }
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("config", &self.config).finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use url::form_urlencoded;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		api::PublishOptions,
		error::{TransportError, ValidationError},
		http::{HttpMethod, MAX_GET_URL_LEN},
		params::ParamValue,
		sign::SIGNATURE_PARAM,
	};

	const SEND_OK: &str = r#"{"code":0,"message":"","requestId":"r1","msgId":"m1"}"#;

	fn decode_body(request: &HttpRequest) -> Vec<(String, String)> {
		let body = request.body.as_deref().expect("POST request should carry a body.");

		form_urlencoded::parse(body.as_bytes()).into_owned().collect()
	}

	fn value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
		pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	#[tokio::test]
	async fn send_message_posts_signed_form() {
		let (client, transport) = recording_client([SEND_OK]);
		let queue = client.queue(" orders ").expect("Queue name should be valid.");
		let msg_id = queue.send_message("hello world", None).await.expect("Send should succeed.");

		assert_eq!(msg_id, "m1");

		let requests = transport.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, HttpMethod::Post);
		assert_eq!(requests[0].url, "https://cmq-queue-gz.api.qcloud.com/v2/index.php");
		assert_eq!(requests[0].timeout, Some(Duration::from_secs(30)));

		let pairs = decode_body(&requests[0]);

		assert_eq!(value(&pairs, "Action"), Some("SendMessage"));
		assert_eq!(value(&pairs, "queueName"), Some("orders"));
		assert_eq!(value(&pairs, "msgBody"), Some("hello world"));
		assert_eq!(value(&pairs, "SecretId"), Some(TEST_SECRET_ID));
		assert_eq!(value(&pairs, "SignatureMethod"), Some("HmacSHA256"));
		assert!(value(&pairs, "RequestClient").is_some_and(|tag| tag.starts_with("SDK_RUST_")));
		assert!(value(&pairs, SIGNATURE_PARAM).is_some());
	}

	#[tokio::test]
	async fn transmitted_signature_verifies() {
		let (client, transport) = recording_client([SEND_OK]);

		client
			.queue("orders")
			.expect("Queue name should be valid.")
			.send_message("a+b&c=d", Some(5))
			.await
			.expect("Send should succeed.");

		let pairs = decode_body(&transport.requests()[0]);
		let signature = value(&pairs, SIGNATURE_PARAM).expect("Signature should be sent.");
		let params = pairs
			.iter()
			.filter(|(key, _)| key != SIGNATURE_PARAM)
			.map(|(key, value)| (key.clone(), ParamValue::from(value)))
			.collect::<ParamSet>();
		let string_to_sign = client
			.config
			.signer()
			.string_to_sign(&params)
			.expect("String-to-sign should build.");
		let expected = client
			.config
			.credential
			.signature_method()
			.compute(TEST_SECRET_KEY.as_bytes(), &string_to_sign)
			.expect("Signature should compute.");

		assert!(string_to_sign.starts_with("POSTcmq-queue-gz.api.qcloud.com/v2/index.php?Action="));
		assert_eq!(signature, expected);
	}

	#[tokio::test]
	async fn vendor_error_surfaces_code_and_request_id() {
		let (client, _) = recording_client([r#"{"code":100,"message":"bad","requestId":"r2"}"#]);
		let err = client
			.queue("orders")
			.expect("Queue name should be valid.")
			.send_message("hi", None)
			.await
			.expect_err("Non-zero code must fail.");

		assert!(matches!(
			err,
			Error::Vendor { action: Action::SendMessage, code: 100, ref request_id, .. }
				if request_id == "r2"
		));
	}

	#[tokio::test]
	async fn oversized_get_never_reaches_transport() {
		let transport = Arc::new(RecordingHttpClient::replying([SEND_OK]));
		let config = CmqConfig::builder("https://cmq-queue-gz.api.qcloud.com", "AKID", "secret")
			.method(HttpMethod::Get)
			.build()
			.expect("GET configuration should build.");
		let client = Client::<RecordingHttpClient>::with_http_client(config, transport.clone());
		let err = client
			.queue("orders")
			.expect("Queue name should be valid.")
			.send_message("x".repeat(MAX_GET_URL_LEN), None)
			.await
			.expect_err("Oversized GET must be rejected.");

		assert!(matches!(err, Error::Validation(ValidationError::UrlTooLong { .. })));
		assert!(transport.requests().is_empty());
	}

	#[tokio::test]
	async fn validation_failures_skip_the_network() {
		let (client, transport) = recording_client::<[&str; 0], &str>([]);
		let queue = client.queue("orders").expect("Queue name should be valid.");
		let too_many = vec!["m"; 17];

		assert!(matches!(
			queue.batch_send_message(&too_many, None).await,
			Err(Error::Validation(ValidationError::BatchSize { len: 17, max: 16, .. }))
		));
		assert!(matches!(
			queue.batch_send_message::<&str>(&[], None).await,
			Err(Error::Validation(ValidationError::BatchSize { len: 0, .. }))
		));
		assert!(matches!(
			queue.batch_delete_message::<&str>(&[]).await,
			Err(Error::Validation(ValidationError::BatchSize { field: "receiptHandle", .. }))
		));
		assert!(matches!(
			queue.send_message("", None).await,
			Err(Error::Validation(ValidationError::Empty { field: "msgBody" }))
		));
		assert!(matches!(
			queue.receive_message(Some(31)).await,
			Err(Error::Validation(ValidationError::OutOfRange { field: "pollingWaitSeconds", .. }))
		));
		assert!(matches!(
			queue.batch_receive_message(0, None).await,
			Err(Error::Validation(ValidationError::OutOfRange { field: "numOfMsg", .. }))
		));
		assert!(matches!(
			client.account().create_topic("events", 512, model::FilterType::Tag).await,
			Err(Error::Validation(ValidationError::OutOfRange { field: "maxMsgSize", .. }))
		));
		let topic = client.topic("events").expect("Topic name should be valid.");

		assert!(matches!(
			topic.set_attributes(2_000_000).await,
			Err(Error::Validation(ValidationError::OutOfRange { field: "maxMsgSize", .. }))
		));
		assert!(transport.requests().is_empty());
	}

	#[tokio::test]
	async fn receive_uses_long_poll_deadline() {
		let received =
			r#"{"code":0,"requestId":"r","msgId":"m1","receiptHandle":"rh","msgBody":"hi"}"#;
		let (client, transport) = recording_client([received, received]);
		let queue = client.queue("orders").expect("Queue name should be valid.");
		let message = queue.receive_message(Some(10)).await.expect("Receive should succeed.");

		assert_eq!(message.receipt_handle, "rh");

		queue.receive_message(None).await.expect("Receive should succeed.");

		let requests = transport.requests();

		assert_eq!(requests[0].timeout, Some(Duration::from_secs(15)));
		assert_eq!(value(&decode_body(&requests[0]), "pollingWaitSeconds"), Some("10"));
		assert_eq!(requests[1].timeout, Some(Duration::from_secs(35)));
		assert_eq!(value(&decode_body(&requests[1]), "pollingWaitSeconds"), None);
	}

	#[tokio::test]
	async fn batch_calls_use_expected_indexes() {
		let batch = r#"{"code":0,"requestId":"r","msgList":[{"msgId":"a"},{"msgId":"b"}]}"#;
		let (client, transport) = recording_client([batch, batch, r#"{"code":0}"#]);
		let queue = client.queue("orders").expect("Queue name should be valid.");
		let topic = client.topic("events").expect("Topic name should be valid.");
		let ids =
			queue.batch_send_message(&["x", "y"], None).await.expect("Batch send should succeed.");

		assert_eq!(ids, ["a", "b"]);

		let options = PublishOptions::default().tags(["t"]);

		topic
			.batch_publish_message(&["x", "y"], &options)
			.await
			.expect("Batch publish should succeed.");
		queue.batch_delete_message(&["h0", "h1"]).await.expect("Batch delete should succeed.");

		let requests = transport.requests();
		let send = decode_body(&requests[0]);
		let publish = decode_body(&requests[1]);
		let delete = decode_body(&requests[2]);

		assert_eq!(value(&send, "msgBody.0"), Some("x"));
		assert_eq!(value(&send, "msgBody.1"), Some("y"));
		assert_eq!(value(&publish, "msgBody.1"), Some("x"));
		assert_eq!(value(&publish, "msgBody.2"), Some("y"));
		assert_eq!(value(&publish, "msgTag.1"), Some("t"));
		assert_eq!(value(&publish, "topicName"), Some("events"));
		assert_eq!(value(&delete, "receiptHandle.0"), Some("h0"));
		assert_eq!(value(&delete, "receiptHandle.1"), Some("h1"));
	}

	#[tokio::test]
	async fn list_names_fill_caller_collection() {
		let listing = concat!(
			r#"{"code":0,"requestId":"r","totalCount":3,"subscriptionList":"#,
			r#"[{"subscriptionName":"s1"},{"subscriptionName":"s2"}]}"#,
		);
		let (client, transport) = recording_client([listing]);
		let mut names = Vec::new();
		let total = client
			.topic("events")
			.expect("Topic name should be valid.")
			.list_subscription_names(&model::ListFilter::default().limit(2), &mut names)
			.await
			.expect("Listing should succeed.");

		assert_eq!(total, 3);
		assert_eq!(names, ["s1", "s2"]);

		let pairs = decode_body(&transport.requests()[0]);

		assert_eq!(value(&pairs, "Action"), Some("ListSubscriptionByTopic"));
		assert_eq!(value(&pairs, "limit"), Some("2"));
	}

	#[tokio::test]
	async fn subscription_calls_carry_both_names() {
		let attrs = r#"{"code":0,"requestId":"r","notifyContentFormat":"SIMPLIFIED"}"#;
		let (client, transport) = recording_client([attrs, r#"{"code":0}"#]);
		let subscription =
			client.subscription("events", "audit").expect("Subscription names should be valid.");
		let attributes = subscription.get_attributes().await.expect("Attributes should decode.");

		assert_eq!(attributes.notify_content_format, Some(model::NotifyContentFormat::Simplified));
		assert_eq!(attributes.protocol, None);

		subscription.clear_filter_tags().await.expect("Clear should succeed.");

		let requests = transport.requests();
		let clear = decode_body(&requests[1]);

		assert_eq!(value(&clear, "Action"), Some("ClearSubscriptionFilterTags"));
		assert_eq!(value(&clear, "topicName"), Some("events"));
		assert_eq!(value(&clear, "subscriptionName"), Some("audit"));
	}

	#[tokio::test]
	async fn publish_sends_body_tags_and_routing_key() {
		let (client, transport) = recording_client([SEND_OK]);
		let options = PublishOptions::default().tags(["red", "blue"]).routing_key("order.paid");
		let msg_id = client
			.topic("events")
			.expect("Topic name should be valid.")
			.publish_message("payload", &options)
			.await
			.expect("Publish should succeed.");

		assert_eq!(msg_id, "m1");

		let pairs = decode_body(&transport.requests()[0]);

		assert_eq!(value(&pairs, "Action"), Some("PublishMessage"));
		assert_eq!(value(&pairs, "topicName"), Some("events"));
		assert_eq!(value(&pairs, "msgBody"), Some("payload"));
		assert_eq!(value(&pairs, "msgTag.1"), Some("red"));
		assert_eq!(value(&pairs, "msgTag.2"), Some("blue"));
		assert_eq!(value(&pairs, "routingKey"), Some("order.paid"));
	}

	#[tokio::test]
	async fn topic_attributes_decode_and_update() {
		let attrs = r#"{"code":0,"requestId":"r","msgCount":4,"maxMsgSize":65536,"filterType":2}"#;
		let (client, transport) = recording_client([attrs, r#"{"code":0,"requestId":"r2"}"#]);
		let topic = client.topic("events").expect("Topic name should be valid.");
		let attributes = topic.get_attributes().await.expect("Attributes should decode.");

		assert_eq!(attributes.msg_count, Some(4));
		assert_eq!(attributes.max_msg_size, Some(65_536));
		assert_eq!(attributes.filter_type, Some(model::FilterType::RoutingKey));
		assert_eq!(attributes.create_time, None);

		let status = topic.set_attributes(2_048).await.expect("Update should succeed.");

		assert_eq!(status.request_id, "r2");

		let requests = transport.requests();
		let get = decode_body(&requests[0]);
		let set = decode_body(&requests[1]);

		assert_eq!(value(&get, "Action"), Some("GetTopicAttributes"));
		assert_eq!(value(&get, "topicName"), Some("events"));
		assert_eq!(value(&set, "Action"), Some("SetTopicAttributes"));
		assert_eq!(value(&set, "maxMsgSize"), Some("2048"));
	}

	#[tokio::test]
	async fn queue_set_attributes_sends_only_set_fields() {
		let (client, transport) = recording_client([r#"{"code":0,"requestId":"r"}"#]);
		let meta = model::QueueMeta::default().visibility_timeout(60).polling_wait_seconds(5);

		client
			.queue("orders")
			.expect("Queue name should be valid.")
			.set_attributes(&meta)
			.await
			.expect("Update should succeed.");

		let pairs = decode_body(&transport.requests()[0]);

		assert_eq!(value(&pairs, "Action"), Some("SetQueueAttributes"));
		assert_eq!(value(&pairs, "queueName"), Some("orders"));
		assert_eq!(value(&pairs, "visibilityTimeout"), Some("60"));
		assert_eq!(value(&pairs, "pollingWaitSeconds"), Some("5"));
		assert_eq!(value(&pairs, "maxMsgSize"), None);
		assert_eq!(value(&pairs, "msgRetentionSeconds"), None);
	}

	#[tokio::test]
	async fn subscription_set_attributes_sends_strategy_and_tags() {
		let (client, transport) = recording_client([r#"{"code":0,"requestId":"r"}"#]);
		let meta = model::SubscriptionMeta {
			notify_strategy: Some(model::NotifyStrategy::BackoffRetry),
			filter_tags: vec!["red".into(), "blue".into()],
			..Default::default()
		};

		client
			.subscription("events", "audit")
			.expect("Subscription names should be valid.")
			.set_attributes(&meta)
			.await
			.expect("Update should succeed.");

		let pairs = decode_body(&transport.requests()[0]);

		assert_eq!(value(&pairs, "Action"), Some("SetSubscriptionAttributes"));
		assert_eq!(value(&pairs, "topicName"), Some("events"));
		assert_eq!(value(&pairs, "subscriptionName"), Some("audit"));
		assert_eq!(value(&pairs, "notifyStrategy"), Some("BACKOFF_RETRY"));
		assert_eq!(value(&pairs, "filterTag.1"), Some("red"));
		assert_eq!(value(&pairs, "filterTag.2"), Some("blue"));
		assert_eq!(value(&pairs, "notifyContentFormat"), None);
		assert_eq!(value(&pairs, "bindingKey.1"), None);
	}

	#[tokio::test]
	async fn account_topic_management_round_trips() {
		let listing = concat!(
			r#"{"code":0,"requestId":"r","totalCount":5,"topicList":"#,
			r#"[{"topicId":"t-1","topicName":"events"},{"topicId":"t-2","topicName":"audit"}]}"#,
		);
		let (client, transport) = recording_client([
			listing,
			r#"{"code":0,"requestId":"r-del"}"#,
			r#"{"code":0,"requestId":"r-unsub"}"#,
		]);
		let account = client.account();
		let mut names = vec!["seen".to_owned()];
		let total = account
			.list_topic_names(&model::ListFilter::default().search_word("ev").offset(2), &mut names)
			.await
			.expect("Listing should succeed.");

		assert_eq!(total, 5);
		assert_eq!(names, ["seen", "events", "audit"]);

		let deleted = account.delete_topic(" events ").await.expect("Delete should succeed.");

		assert_eq!(deleted.request_id, "r-del");

		let unsubscribed =
			account.unsubscribe("events", "audit").await.expect("Unsubscribe should succeed.");

		assert_eq!(unsubscribed.request_id, "r-unsub");

		let requests = transport.requests();
		let list = decode_body(&requests[0]);
		let delete = decode_body(&requests[1]);
		let unsubscribe = decode_body(&requests[2]);

		assert_eq!(value(&list, "Action"), Some("ListTopic"));
		assert_eq!(value(&list, "searchWord"), Some("ev"));
		assert_eq!(value(&list, "offset"), Some("2"));
		assert_eq!(value(&list, "limit"), None);
		assert_eq!(value(&delete, "Action"), Some("DeleteTopic"));
		assert_eq!(value(&delete, "topicName"), Some("events"));
		assert_eq!(value(&unsubscribe, "Action"), Some("Unsubscribe"));
		assert_eq!(value(&unsubscribe, "topicName"), Some("events"));
		assert_eq!(value(&unsubscribe, "subscriptionName"), Some("audit"));
	}

	#[tokio::test]
	async fn exhausted_transport_maps_to_transport_error() {
		let (client, _) = recording_client::<[&str; 0], &str>([]);
		let err = client
			.account()
			.delete_queue("orders")
			.await
			.expect_err("Transport failure must propagate.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::DoRequest { timed_out: false, .. })
		));
		assert!(!err.is_local());
	}

	#[test]
	fn invalid_names_are_rejected_before_any_call() {
		let (client, _) = recording_client::<[&str; 0], &str>([]);

		assert!(matches!(
			client.queue("   "),
			Err(Error::Validation(ValidationError::Empty { field: "queueName" }))
		));
		assert!(client.subscription("events", "bad name").is_err());
	}
}
