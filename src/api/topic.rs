//! Publishing and settings of a single topic.

// self
use crate::{
	_prelude::*,
	api::{Action, TopicName, queue::non_empty_body},
	client::Client,
	http::CmqHttpClient,
	model::{
		self, BatchSendResponse, ListFilter, ListSubscriptionResponse, ResponseStatus,
		SendMessageResponse, TopicAttributes,
		queue::{self as queue_model, MAX_BATCH_SIZE},
		subscription::check_tags,
	},
	params::ParamSet,
};

/// Optional publish arguments shared by single and batch publishes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishOptions {
	/// Tags matched against subscription filter tags; at most five.
	pub tags: Vec<String>,
	/// Routing key matched against subscription binding keys.
	pub routing_key: Option<String>,
}
impl PublishOptions {
	/// Replaces the message tags.
	pub fn tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = tags.into_iter().map(Into::into).collect();

		self
	}

	/// Sets the routing key.
	pub fn routing_key(mut self, routing_key: impl Into<String>) -> Self {
		self.routing_key = Some(routing_key.into());

		self
	}

	fn apply(&self, params: &mut ParamSet) -> Result<()> {
		check_tags("msgTag", &self.tags)?;
		params.insert_indexed("msgTag", 1, &self.tags);

		let routing_key =
			self.routing_key.as_deref().map(str::trim).filter(|key| !key.is_empty());

		params.insert_opt("routingKey", routing_key);

		Ok(())
	}
}

/// Façade bound to one topic.
pub struct Topic<C>
where
	C: ?Sized + CmqHttpClient,
{
	client: Client<C>,
	name: TopicName,
}
impl<C> Topic<C>
where
	C: ?Sized + CmqHttpClient,
{
	pub(crate) fn new(client: Client<C>, name: TopicName) -> Self {
		Self { client, name }
	}

	/// Name of the bound topic.
	pub fn name(&self) -> &TopicName {
		&self.name
	}

	/// Publishes one message and returns its identifier.
	pub async fn publish_message(
		&self,
		body: impl AsRef<str>,
		options: &PublishOptions,
	) -> Result<String> {
		let body = body.as_ref();
		let response: SendMessageResponse = self
			.invoke(Action::PublishMessage, |params| {
				params.insert("msgBody", non_empty_body("msgBody", body)?);

				options.apply(params)
			})
			.await?;

		Ok(response.msg_id)
	}

	/// Publishes up to 16 messages sharing `options` and returns their identifiers.
	pub async fn batch_publish_message<S>(
		&self,
		bodies: &[S],
		options: &PublishOptions,
	) -> Result<Vec<String>>
	where
		S: AsRef<str>,
	{
		let response: BatchSendResponse = self
			.invoke(Action::BatchPublishMessage, |params| {
				queue_model::check_batch("msgBody", bodies.len(), 1, MAX_BATCH_SIZE)?;

				let bodies = bodies
					.iter()
					.map(|body| non_empty_body("msgBody", body.as_ref()))
					.collect::<Result<Vec<_>, _>>()?;

				params.insert_indexed("msgBody", 1, bodies);

				options.apply(params)
			})
			.await?;

		Ok(response.into_ids())
	}

	/// Reads the topic's attributes.
	pub async fn get_attributes(&self) -> Result<TopicAttributes> {
		self.invoke(Action::GetTopicAttributes, |_| Ok(())).await
	}

	/// Changes the maximum message size.
	pub async fn set_attributes(&self, max_msg_size: u32) -> Result<ResponseStatus> {
		self.invoke(Action::SetTopicAttributes, |params| {
			queue_model::check_msg_size(max_msg_size)?;
			params.insert("maxMsgSize", max_msg_size);

			Ok(())
		})
		.await
	}

	/// Lists one page of this topic's subscriptions.
	pub async fn list_subscriptions(
		&self,
		filter: &ListFilter,
	) -> Result<ListSubscriptionResponse> {
		self.invoke(Action::ListSubscriptionByTopic, |params| {
			filter.apply(params);

			Ok(())
		})
		.await
	}

	/// Appends one page of subscription names to `names` and returns the total match count.
	pub async fn list_subscription_names(
		&self,
		filter: &ListFilter,
		names: &mut impl Extend<String>,
	) -> Result<u64> {
		Ok(model::collect_names(self.list_subscriptions(filter).await?, names))
	}

	async fn invoke<T, F>(&self, action: Action, build: F) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
		F: FnOnce(&mut ParamSet) -> Result<()>,
	{
		self.client
			.invoke(action, &self.name, None, |params| {
				params.insert(TopicName::FIELD, self.name.as_ref());

				build(params)
			})
			.await
	}
}
impl<C> Clone for Topic<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), name: self.name.clone() }
	}
}
impl<C> Debug for Topic<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Topic").field("name", &self.name).finish()
	}
}
