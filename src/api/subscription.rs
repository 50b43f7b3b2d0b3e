//! Settings of a single subscription.

// self
use crate::{
	_prelude::*,
	api::{Action, SubscriptionName, TopicName},
	client::Client,
	http::CmqHttpClient,
	model::{ResponseStatus, SubscriptionAttributes, SubscriptionMeta},
	params::ParamSet,
};

/// Façade bound to one subscription of one topic.
pub struct Subscription<C>
where
	C: ?Sized + CmqHttpClient,
{
	client: Client<C>,
	topic: TopicName,
	name: SubscriptionName,
}
impl<C> Subscription<C>
where
	C: ?Sized + CmqHttpClient,
{
	pub(crate) fn new(client: Client<C>, topic: TopicName, name: SubscriptionName) -> Self {
		Self { client, topic, name }
	}

	/// Topic the subscription belongs to.
	pub fn topic(&self) -> &TopicName {
		&self.topic
	}

	/// Name of the bound subscription.
	pub fn name(&self) -> &SubscriptionName {
		&self.name
	}

	/// Reads the subscription's attributes; absent fields stay `None`.
	pub async fn get_attributes(&self) -> Result<SubscriptionAttributes> {
		self.invoke(Action::GetSubscriptionAttributes, |_| Ok(())).await
	}

	/// Updates the attributes set on `meta`.
	pub async fn set_attributes(&self, meta: &SubscriptionMeta) -> Result<ResponseStatus> {
		self.invoke(Action::SetSubscriptionAttributes, |params| Ok(meta.apply(params)?)).await
	}

	/// Removes every filter tag.
	pub async fn clear_filter_tags(&self) -> Result<ResponseStatus> {
		self.invoke(Action::ClearSubscriptionFilterTags, |_| Ok(())).await
	}

	async fn invoke<T, F>(&self, action: Action, build: F) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
		F: FnOnce(&mut ParamSet) -> Result<()>,
	{
		self.client
			.invoke(action, &self.name, None, |params| {
				params.insert(TopicName::FIELD, self.topic.as_ref());
				params.insert(SubscriptionName::FIELD, self.name.as_ref());

				build(params)
			})
			.await
	}
}
impl<C> Clone for Subscription<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), topic: self.topic.clone(), name: self.name.clone() }
	}
}
impl<C> Debug for Subscription<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Subscription")
			.field("topic", &self.topic)
			.field("name", &self.name)
			.finish()
	}
}
