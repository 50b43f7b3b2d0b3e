//! Typed façades over the vendor actions.
//!
//! [`Account`] covers resource management, [`Queue`] the message lifecycle of one queue,
//! [`Topic`] publishing, and [`Subscription`] per-subscription settings. Every method is
//! a single signed round trip routed through [`Client::invoke`](crate::client::Client).

pub mod account;
pub mod name;
pub mod queue;
pub mod subscription;
pub mod topic;

pub use account::*;
pub use name::*;
pub use queue::*;
pub use subscription::*;
pub use topic::*;

// self
use crate::_prelude::*;

/// Vendor actions issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
	/// Creates a queue.
	CreateQueue,
	/// Deletes a queue.
	DeleteQueue,
	/// Lists queues.
	ListQueue,
	/// Reads queue attributes.
	GetQueueAttributes,
	/// Updates queue attributes.
	SetQueueAttributes,
	/// Sends one message.
	SendMessage,
	/// Sends up to 16 messages.
	BatchSendMessage,
	/// Receives one message.
	ReceiveMessage,
	/// Receives up to 16 messages.
	BatchReceiveMessage,
	/// Deletes one delivery.
	DeleteMessage,
	/// Deletes up to 16 deliveries.
	BatchDeleteMessage,
	/// Creates a topic.
	CreateTopic,
	/// Deletes a topic.
	DeleteTopic,
	/// Lists topics.
	ListTopic,
	/// Reads topic attributes.
	GetTopicAttributes,
	/// Updates topic attributes.
	SetTopicAttributes,
	/// Publishes one message.
	PublishMessage,
	/// Publishes up to 16 messages.
	BatchPublishMessage,
	/// Creates a subscription.
	Subscribe,
	/// Deletes a subscription.
	Unsubscribe,
	/// Lists the subscriptions of a topic.
	ListSubscriptionByTopic,
	/// Reads subscription attributes.
	GetSubscriptionAttributes,
	/// Updates subscription attributes.
	SetSubscriptionAttributes,
	/// Removes every filter tag of a subscription.
	ClearSubscriptionFilterTags,
}
impl Action {
	/// Returns the value sent as `Action`.
	pub const fn as_str(self) -> &'static str {
		match self {
			Action::CreateQueue => "CreateQueue",
			Action::DeleteQueue => "DeleteQueue",
			Action::ListQueue => "ListQueue",
			Action::GetQueueAttributes => "GetQueueAttributes",
			Action::SetQueueAttributes => "SetQueueAttributes",
			Action::SendMessage => "SendMessage",
			Action::BatchSendMessage => "BatchSendMessage",
			Action::ReceiveMessage => "ReceiveMessage",
			Action::BatchReceiveMessage => "BatchReceiveMessage",
			Action::DeleteMessage => "DeleteMessage",
			Action::BatchDeleteMessage => "BatchDeleteMessage",
			Action::CreateTopic => "CreateTopic",
			Action::DeleteTopic => "DeleteTopic",
			Action::ListTopic => "ListTopic",
			Action::GetTopicAttributes => "GetTopicAttributes",
			Action::SetTopicAttributes => "SetTopicAttributes",
			Action::PublishMessage => "PublishMessage",
			Action::BatchPublishMessage => "BatchPublishMessage",
			Action::Subscribe => "Subscribe",
			Action::Unsubscribe => "Unsubscribe",
			Action::ListSubscriptionByTopic => "ListSubscriptionByTopic",
			Action::GetSubscriptionAttributes => "GetSubscriptionAttributes",
			Action::SetSubscriptionAttributes => "SetSubscriptionAttributes",
			Action::ClearSubscriptionFilterTags => "ClearSubscriptionFilterTags",
		}
	}

	/// Returns true for receive calls, which long-poll on the server.
	pub const fn is_long_poll(self) -> bool {
		matches!(self, Action::ReceiveMessage | Action::BatchReceiveMessage)
	}
}
impl Display for Action {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn action_labels_match_serde_names() {
		for action in [Action::SendMessage, Action::ListSubscriptionByTopic, Action::Unsubscribe] {
			let json = serde_json::to_string(&action).expect("Action should serialize.");

			assert_eq!(json, format!("\"{action}\""));
		}
	}

	#[test]
	fn only_receives_long_poll() {
		assert!(Action::ReceiveMessage.is_long_poll());
		assert!(Action::BatchReceiveMessage.is_long_poll());
		assert!(!Action::DeleteMessage.is_long_poll());
	}
}
