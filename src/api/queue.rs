//! Message lifecycle on a single queue.

// self
use crate::{
	_prelude::*,
	api::{Action, QueueName, name},
	client::Client,
	error::ValidationError,
	http::CmqHttpClient,
	model::{
		BatchReceiveResponse, BatchSendResponse, QueueAttributes, QueueMeta, ReceivedMessage,
		ResponseStatus, SendMessageResponse,
		queue::{self, MAX_BATCH_SIZE},
	},
	params::ParamSet,
};

/// Façade bound to one queue.
pub struct Queue<C>
where
	C: ?Sized + CmqHttpClient,
{
	client: Client<C>,
	name: QueueName,
}
impl<C> Queue<C>
where
	C: ?Sized + CmqHttpClient,
{
	pub(crate) fn new(client: Client<C>, name: QueueName) -> Self {
		Self { client, name }
	}

	/// Name of the bound queue.
	pub fn name(&self) -> &QueueName {
		&self.name
	}

	/// Sends one message and returns its identifier.
	pub async fn send_message(
		&self,
		body: impl AsRef<str>,
		delay_seconds: Option<u32>,
	) -> Result<String> {
		let body = body.as_ref();
		let response: SendMessageResponse = self
			.invoke(Action::SendMessage, None, |params| {
				params.insert("msgBody", non_empty_body("msgBody", body)?);
				params.insert_opt("delaySeconds", delay_seconds);

				Ok(())
			})
			.await?;

		Ok(response.msg_id)
	}

	/// Sends up to 16 messages and returns their identifiers in request order.
	pub async fn batch_send_message<S>(
		&self,
		bodies: &[S],
		delay_seconds: Option<u32>,
	) -> Result<Vec<String>>
	where
		S: AsRef<str>,
	{
		let response: BatchSendResponse = self
			.invoke(Action::BatchSendMessage, None, |params| {
				queue::check_batch("msgBody", bodies.len(), 1, MAX_BATCH_SIZE)?;

				let bodies = bodies
					.iter()
					.map(|body| non_empty_body("msgBody", body.as_ref()))
					.collect::<Result<Vec<_>, _>>()?;

				params.insert_indexed("msgBody", 0, bodies);
				params.insert_opt("delaySeconds", delay_seconds);

				Ok(())
			})
			.await?;

		Ok(response.into_ids())
	}

	/// Receives one message, long-polling up to `polling_wait_seconds` (default 30).
	pub async fn receive_message(
		&self,
		polling_wait_seconds: Option<u32>,
	) -> Result<ReceivedMessage> {
		let timeout = self.poll_timeout(polling_wait_seconds);

		self.invoke(Action::ReceiveMessage, Some(timeout), |params| {
			insert_polling_wait(params, polling_wait_seconds)
		})
		.await
	}

	/// Receives up to `num_of_msg` messages, long-polling up to `polling_wait_seconds`.
	pub async fn batch_receive_message(
		&self,
		num_of_msg: u32,
		polling_wait_seconds: Option<u32>,
	) -> Result<Vec<ReceivedMessage>> {
		let timeout = self.poll_timeout(polling_wait_seconds);
		let response: BatchReceiveResponse = self
			.invoke(Action::BatchReceiveMessage, Some(timeout), |params| {
				queue::check_range("numOfMsg", num_of_msg.into(), 1, MAX_BATCH_SIZE as i64)?;
				insert_polling_wait(params, polling_wait_seconds)?;
				params.insert("numOfMsg", num_of_msg);

				Ok(())
			})
			.await?;

		Ok(response.msg_info_list)
	}

	/// Deletes one delivery by its receipt handle.
	pub async fn delete_message(&self, receipt_handle: impl AsRef<str>) -> Result<ResponseStatus> {
		let receipt_handle = receipt_handle.as_ref();

		self.invoke(Action::DeleteMessage, None, |params| {
			params.insert("receiptHandle", name::required("receiptHandle", receipt_handle)?);

			Ok(())
		})
		.await
	}

	/// Deletes up to 16 deliveries.
	pub async fn batch_delete_message<S>(&self, receipt_handles: &[S]) -> Result<ResponseStatus>
	where
		S: AsRef<str>,
	{
		self.invoke(Action::BatchDeleteMessage, None, |params| {
			queue::check_batch("receiptHandle", receipt_handles.len(), 1, MAX_BATCH_SIZE)?;

			let handles = receipt_handles
				.iter()
				.map(|handle| name::required("receiptHandle", handle.as_ref()))
				.collect::<Result<Vec<_>, _>>()?;

			params.insert_indexed("receiptHandle", 0, handles);

			Ok(())
		})
		.await
	}

	/// Reads the queue's attributes.
	pub async fn get_attributes(&self) -> Result<QueueAttributes> {
		self.invoke(Action::GetQueueAttributes, None, |_| Ok(())).await
	}

	/// Updates the attributes set on `meta`.
	pub async fn set_attributes(&self, meta: &QueueMeta) -> Result<ResponseStatus> {
		self.invoke(Action::SetQueueAttributes, None, |params| {
			meta.validate()?;
			meta.apply(params);

			Ok(())
		})
		.await
	}

	fn poll_timeout(&self, polling_wait_seconds: Option<u32>) -> Duration {
		self.client.config.poll_timeout(polling_wait_seconds)
	}

	async fn invoke<T, F>(&self, action: Action, timeout: Option<Duration>, build: F) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
		F: FnOnce(&mut ParamSet) -> Result<()>,
	{
		self.client
			.invoke(action, &self.name, timeout, |params| {
				params.insert(QueueName::FIELD, self.name.as_ref());

				build(params)
			})
			.await
	}
}
impl<C> Clone for Queue<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), name: self.name.clone() }
	}
}
impl<C> Debug for Queue<C>
where
	C: ?Sized + CmqHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Queue").field("name", &self.name).finish()
	}
}

/// Bodies are sent verbatim; only the empty string is rejected.
pub(crate) fn non_empty_body<'a>(
	field: &'static str,
	body: &'a str,
) -> Result<&'a str, ValidationError> {
	if body.is_empty() { Err(ValidationError::Empty { field }) } else { Ok(body) }
}

fn insert_polling_wait(params: &mut ParamSet, polling_wait_seconds: Option<u32>) -> Result<()> {
	if let Some(wait) = polling_wait_seconds {
		queue::check_polling_wait(wait)?;
		params.insert("pollingWaitSeconds", wait);
	}

	Ok(())
}
