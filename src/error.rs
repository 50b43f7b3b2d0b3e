//! Client-level error types shared across the signer, transport, and façades.

// self
use crate::{_prelude::*, api::Action};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Arguments rejected locally; nothing was sent.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (request construction, network, body read).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Parse(#[from] ResponseParseError),

	/// The service answered with a non-zero `code`.
	#[error("{action} failed with code {code}: {message} (request id `{request_id}`).")]
	Vendor {
		/// Action that produced the error.
		action: Action,
		/// Vendor error code.
		code: i64,
		/// Vendor error message.
		message: String,
		/// Vendor request identifier, used for support diagnostics.
		request_id: String,
	},
}
impl Error {
	/// Returns the vendor error code when the service rejected the call.
	pub fn vendor_code(&self) -> Option<i64> {
		match self {
			Self::Vendor { code, .. } => Some(*code),
			_ => None,
		}
	}

	/// Returns true when the request never left the process.
	pub fn is_local(&self) -> bool {
		matches!(
			self,
			Self::Validation(_)
				| Self::Config(_)
				| Self::Transport(TransportError::BuildRequest { .. })
		)
	}
}

/// Argument validation failures raised before any network call.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A required string argument was empty after trimming.
	#[error("Invalid parameter: {field} is empty.")]
	Empty {
		/// Vendor name of the offending field.
		field: &'static str,
	},
	/// A name contains whitespace characters.
	#[error("Invalid parameter: {field} contains whitespace.")]
	ContainsWhitespace {
		/// Vendor name of the offending field.
		field: &'static str,
	},
	/// A name exceeds the vendor's length limit.
	#[error("Invalid parameter: {field} exceeds {max} characters.")]
	TooLong {
		/// Vendor name of the offending field.
		field: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// A numeric argument lies outside the range the service accepts.
	#[error("Invalid parameter: {field} must lie in [{min}, {max}], got {value}.")]
	OutOfRange {
		/// Vendor name of the offending field.
		field: &'static str,
		/// Rejected value.
		value: i64,
		/// Inclusive lower bound.
		min: i64,
		/// Inclusive upper bound.
		max: i64,
	},
	/// A list argument holds too few or too many entries.
	#[error("Invalid parameter: {field} must hold between {min} and {max} entries, got {len}.")]
	BatchSize {
		/// Vendor name of the offending field.
		field: &'static str,
		/// Number of entries supplied.
		len: usize,
		/// Minimum entry count.
		min: usize,
		/// Maximum entry count.
		max: usize,
	},
	/// A GET request would exceed the service's URL length ceiling.
	#[error("URL length {len} exceeds the {max} byte limit for GET requests.")]
	UrlTooLong {
		/// Assembled URL length in bytes.
		len: usize,
		/// Maximum accepted length in bytes.
		max: usize,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint does not start with `https://` or `http://`.
	#[error("Endpoint `{endpoint}` must start with `https://` or `http://`.")]
	UnsupportedScheme {
		/// Endpoint as configured.
		endpoint: String,
	},
	/// Endpoint cannot be parsed as a URL.
	#[error("Endpoint `{endpoint}` is not a valid URL.")]
	InvalidEndpoint {
		/// Endpoint as configured.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request path does not start with `/`.
	#[error("Request path `{path}` must start with `/`.")]
	InvalidPath {
		/// Path as configured.
		path: String,
	},
	/// Signing key was rejected by the HMAC implementation.
	#[error("Signing key cannot be used with {method}.")]
	InvalidSigningKey {
		/// Signature method label.
		method: &'static str,
	},
	/// A required credential field is empty.
	#[error("Credential field {field} is empty.")]
	MissingCredential {
		/// Credential field name.
		field: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures, split by how far the request got.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The HTTP request could not be constructed; nothing was sent.
	#[error("HTTP request could not be constructed.")]
	BuildRequest {
		/// Transport-specific builder failure.
		#[source]
		source: BoxError,
	},
	/// The request failed before a response arrived (DNS, TCP, TLS, timeout).
	#[error("HTTP request failed before a response was received.")]
	DoRequest {
		/// Transport-specific network failure.
		#[source]
		source: BoxError,
		/// Indicates whether the configured timeout elapsed.
		timed_out: bool,
	},
	/// A response arrived but its body could not be read.
	#[error("HTTP response body could not be read.")]
	ReadBody {
		/// Transport-specific read failure.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a request construction failure.
	pub fn build_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::BuildRequest { source: Box::new(src) }
	}

	/// Wraps a network failure that did not hit the timeout.
	pub fn do_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::DoRequest { source: Box::new(src), timed_out: false }
	}

	/// Wraps a network failure caused by the request timeout.
	pub fn timed_out(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::DoRequest { source: Box::new(src), timed_out: true }
	}

	/// Wraps a body read failure.
	pub fn read_body(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::ReadBody { source: Box::new(src) }
	}
}

/// Response body was not the JSON document the action expects.
#[derive(Debug, ThisError)]
#[error("{action} returned malformed JSON (HTTP status {status}).")]
pub struct ResponseParseError {
	/// Action whose response failed to decode.
	pub action: Action,
	/// HTTP status code of the response.
	pub status: u16,
	/// Structured parsing failure, including the JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
