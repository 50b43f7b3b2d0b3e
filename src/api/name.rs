//! Validated resource names for queues, topics, and subscriptions.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::{_prelude::*, error::ValidationError};

macro_rules! def_name {
	($name:ident, $doc:literal, $field:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Vendor parameter name carrying this value.
			pub const FIELD: &'static str = $field;

			/// Creates a new name from a trimmed, validated view of `value`.
			pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
				let view = value.as_ref().trim();

				validate_view($field, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = ValidationError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl TryFrom<&str> for $name {
			type Error = ValidationError;

			fn try_from(value: &str) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!(stringify!($name), "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = ValidationError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

/// Longest resource name the service accepts.
pub const NAME_MAX_LEN: usize = 64;

def_name! { QueueName, "Queue name, unique per region and account.", "queueName" }
def_name! { TopicName, "Topic name, unique per region and account.", "topicName" }
def_name! { SubscriptionName, "Subscription name, unique per topic.", "subscriptionName" }

/// Returns the trimmed value, rejecting blank input.
pub(crate) fn required<'a>(
	field: &'static str,
	value: &'a str,
) -> Result<&'a str, ValidationError> {
	let view = value.trim();

	if view.is_empty() { Err(ValidationError::Empty { field }) } else { Ok(view) }
}

fn validate_view(field: &'static str, view: &str) -> Result<(), ValidationError> {
	if view.is_empty() {
		return Err(ValidationError::Empty { field });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(ValidationError::ContainsWhitespace { field });
	}
	if view.chars().count() > NAME_MAX_LEN {
		return Err(ValidationError::TooLong { field, max: NAME_MAX_LEN });
	}

	Ok(())
}
