//! Account-level management: queues, topics, and subscriptions.

// self
use crate::{
	_prelude::*,
	api::{Action, QueueName, SubscriptionName, TopicName},
	client::Client,
	http::CmqHttpClient,
	model::{
		self, FilterType, ListFilter, ListQueueResponse, ListTopicResponse, QueueMeta,
		ResponseStatus, SubscribeRequest,
	},
};

/// Façade for calls that are not bound to a single queue or topic.
pub struct Account<C>
where
	C: ?Sized + CmqHttpClient,
{
	client: Client<C>,
}
impl<C> Account<C>
where
	C: ?Sized + CmqHttpClient,
{
	pub(crate) fn new(client: Client<C>) -> Self {
		Self { client }
	}

	/// Creates a queue, sending only the attributes set on `meta`.
	pub async fn create_queue(
		&self,
		name: impl AsRef<str>,
		meta: &QueueMeta,
	) -> Result<ResponseStatus> {
		let name = name.as_ref();

		self.client
			.invoke(Action::CreateQueue, name, None, |params| {
				let name = QueueName::new(name)?;

				meta.validate()?;
				params.insert(QueueName::FIELD, String::from(name));
				meta.apply(params);

				Ok(())
			})
			.await
	}

	/// Deletes a queue.
	pub async fn delete_queue(&self, name: impl AsRef<str>) -> Result<ResponseStatus> {
		let name = name.as_ref();

		self.client
			.invoke(Action::DeleteQueue, name, None, |params| {
				params.insert(QueueName::FIELD, String::from(QueueName::new(name)?));

				Ok(())
			})
			.await
	}

	/// Lists one page of queues.
	pub async fn list_queues(&self, filter: &ListFilter) -> Result<ListQueueResponse> {
		self.client
			.invoke(Action::ListQueue, "", None, |params| {
				filter.apply(params);

				Ok(())
			})
			.await
	}

	/// Appends one page of queue names to `names` and returns the total match count.
	pub async fn list_queue_names(
		&self,
		filter: &ListFilter,
		names: &mut impl Extend<String>,
	) -> Result<u64> {
		Ok(model::collect_names(self.list_queues(filter).await?, names))
	}

	/// Creates a topic.
	///
	/// `max_msg_size` must lie in [`MIN_MSG_SIZE`](model::MIN_MSG_SIZE) to
	/// [`MAX_MSG_SIZE`](model::MAX_MSG_SIZE); the filter type cannot be changed later.
	pub async fn create_topic(
		&self,
		name: impl AsRef<str>,
		max_msg_size: u32,
		filter_type: FilterType,
	) -> Result<ResponseStatus> {
		let name = name.as_ref();

		self.client
			.invoke(Action::CreateTopic, name, None, |params| {
				let name = TopicName::new(name)?;

				model::queue::check_msg_size(max_msg_size)?;
				params.insert(TopicName::FIELD, String::from(name));
				params.insert("maxMsgSize", max_msg_size);
				params.insert("filterType", filter_type.code());

				Ok(())
			})
			.await
	}

	/// Deletes a topic.
	pub async fn delete_topic(&self, name: impl AsRef<str>) -> Result<ResponseStatus> {
		let name = name.as_ref();

		self.client
			.invoke(Action::DeleteTopic, name, None, |params| {
				params.insert(TopicName::FIELD, String::from(TopicName::new(name)?));

				Ok(())
			})
			.await
	}

	/// Lists one page of topics.
	pub async fn list_topics(&self, filter: &ListFilter) -> Result<ListTopicResponse> {
		self.client
			.invoke(Action::ListTopic, "", None, |params| {
				filter.apply(params);

				Ok(())
			})
			.await
	}

	/// Appends one page of topic names to `names` and returns the total match count.
	pub async fn list_topic_names(
		&self,
		filter: &ListFilter,
		names: &mut impl Extend<String>,
	) -> Result<u64> {
		Ok(model::collect_names(self.list_topics(filter).await?, names))
	}

	/// Creates a subscription on a topic.
	pub async fn subscribe(&self, request: &SubscribeRequest) -> Result<ResponseStatus> {
		self.client
			.invoke(Action::Subscribe, &request.topic, None, |params| {
				request.apply(params)?;

				Ok(())
			})
			.await
	}

	/// Deletes a subscription.
	pub async fn unsubscribe(
		&self,
		topic: impl AsRef<str>,
		subscription: impl AsRef<str>,
	) -> Result<ResponseStatus> {
		let topic = topic.as_ref();
		let subscription = subscription.as_ref();

		self.client
			.invoke(Action::Unsubscribe, topic, None, |params| {
				params.insert(TopicName::FIELD, String::from(TopicName::new(topic)?));
				params.insert(
					SubscriptionName::FIELD,
					String::from(SubscriptionName::new(subscription)?),
				);

				Ok(())
			})
			.await
	}
}
impl<C> Clone for Account<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<C> Debug for Account<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Account").finish_non_exhaustive()
	}
}
