//! Response envelope decoding shared by every action.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, api::Action, error::ResponseParseError, http::HttpResponse};

/// Fields every response carries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStatus {
	/// `0` on success, vendor error code otherwise.
	pub code: i64,
	/// Vendor error message; empty on success.
	#[serde(default)]
	pub message: String,
	/// Server-generated request identifier.
	#[serde(default)]
	pub request_id: String,
}
impl ResponseStatus {
	/// Returns true when the service reported success.
	pub fn is_success(&self) -> bool {
		self.code == 0
	}

	/// Converts a non-zero code into [`Error::Vendor`].
	pub fn into_result(self, action: Action) -> Result<Self> {
		if self.is_success() {
			Ok(self)
		} else {
			Err(Error::Vendor {
				action,
				code: self.code,
				message: self.message,
				request_id: self.request_id,
			})
		}
	}
}

/// Decodes `response` for `action`, mapping a non-zero `code` to [`Error::Vendor`].
///
/// The status fields are decoded first so error responses, which omit the payload, still
/// surface the vendor's code and request id instead of a parse error.
pub fn decode_envelope<T>(action: Action, response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	decode::<ResponseStatus>(action, response)?.into_result(action)?;

	Ok(decode(action, response)?)
}

fn decode<T>(action: Action, response: &HttpResponse) -> Result<T, ResponseParseError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_str(&response.body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| ResponseParseError {
		action,
		status: response.status,
		source,
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::SendMessageResponse;

	fn response(body: &str) -> HttpResponse {
		HttpResponse { status: 200, body: body.into() }
	}

	#[test]
	fn success_envelope_yields_payload() {
		let payload: SendMessageResponse = decode_envelope(
			Action::SendMessage,
			&response(r#"{"code":0,"message":"","requestId":"r1","msgId":"m1"}"#),
		)
		.expect("Successful envelope should decode.");

		assert_eq!(payload.msg_id, "m1");
	}

	#[test]
	fn non_zero_code_maps_to_vendor_error() {
		let err = decode_envelope::<SendMessageResponse>(
			Action::SendMessage,
			&response(r#"{"code":100,"message":"bad","requestId":"r2"}"#),
		)
		.expect_err("Non-zero code must surface as an error.");

		match err {
			Error::Vendor { action, code, message, request_id } => {
				assert_eq!(action, Action::SendMessage);
				assert_eq!(code, 100);
				assert_eq!(message, "bad");
				assert_eq!(request_id, "r2");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn malformed_json_maps_to_parse_error() {
		let err = decode_envelope::<ResponseStatus>(
			Action::DeleteQueue,
			&HttpResponse { status: 502, body: "<html>bad gateway</html>".into() },
		)
		.expect_err("Non-JSON body must fail to decode.");

		assert!(matches!(
			err,
			Error::Parse(ResponseParseError { action: Action::DeleteQueue, status: 502, .. })
		));
	}

	#[test]
	fn parse_error_reports_json_path() {
		let err = decode_envelope::<SendMessageResponse>(
			Action::SendMessage,
			&response(r#"{"code":0,"requestId":"r3","msgId":42}"#),
		)
		.expect_err("Wrong payload type must fail to decode.");

		match err {
			Error::Parse(parse) => assert_eq!(parse.source.path().to_string(), "msgId"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn missing_code_is_a_parse_error() {
		let err = decode_envelope::<ResponseStatus>(Action::ListQueue, &response("{}"))
			.expect_err("Envelope without code must fail to decode.");

		assert!(matches!(err, Error::Parse(_)));
	}
}
