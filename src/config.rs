//! Client configuration: credential, request path, client tag, and timeouts.
//!
//! Configuration is assembled once through [`CmqConfigBuilder`] and then shared
//! read-only by every façade. The builder derives `Deserialize`, so the same fields can
//! be loaded from JSON or any other serde format the caller prefers.

// self
use crate::{
	_prelude::*,
	auth::{Credential, SecretKey},
	error::ConfigError,
	http::HttpMethod,
	sign::{RequestSigner, SignatureMethod},
};

/// Immutable configuration consumed by [`Client`](crate::client::Client).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CmqConfig {
	/// Endpoint, key pair, and request style.
	pub credential: Credential,
	/// Request path appended to the endpoint.
	pub path: String,
	/// Value sent as `RequestClient`.
	pub request_client: String,
	/// Timeout applied to every call except long-poll receives.
	pub request_timeout: Option<Duration>,
	/// Slack added on top of the long-poll wait for receive calls.
	pub poll_timeout_margin: Duration,
}
impl CmqConfig {
	/// Default request path of the v2 API.
	pub const DEFAULT_PATH: &'static str = "/v2/index.php";
	/// Default value sent as `RequestClient`.
	pub const DEFAULT_REQUEST_CLIENT: &'static str =
		concat!("SDK_RUST_", env!("CARGO_PKG_VERSION"));
	/// Default timeout for non-polling calls, in seconds.
	pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
	/// Default slack added to long-poll waits, in seconds.
	pub const DEFAULT_POLL_TIMEOUT_MARGIN_SECS: u64 = 5;
	/// Long-poll wait assumed when the caller does not pass one, in seconds.
	pub const DEFAULT_POLLING_WAIT_SECS: u32 = 30;

	/// Creates a new builder for the provided endpoint and key pair.
	pub fn builder(
		endpoint: impl Into<String>,
		secret_id: impl Into<String>,
		secret_key: impl Into<String>,
	) -> CmqConfigBuilder {
		CmqConfigBuilder::new(endpoint, secret_id, secret_key)
	}

	/// `endpoint + path`, the URL every request targets.
	pub fn base_url(&self) -> String {
		format!("{}{}", self.credential.endpoint(), self.path)
	}

	/// Signer bound to this configuration.
	pub fn signer(&self) -> RequestSigner<'_> {
		RequestSigner::new(&self.credential, &self.path, &self.request_client)
	}

	/// Client timeout for a receive call waiting up to `polling_wait` seconds.
	///
	/// The margin lets the server finish the poll before the client gives up.
	pub fn poll_timeout(&self, polling_wait: Option<u32>) -> Duration {
		let wait = polling_wait.unwrap_or(Self::DEFAULT_POLLING_WAIT_SECS);

		Duration::from_secs(u64::from(wait)) + self.poll_timeout_margin
	}
}

/// Builder for [`CmqConfig`] values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CmqConfigBuilder {
	/// Endpoint including `https://` or `http://`.
	pub endpoint: String,
	/// Public key identifier.
	pub secret_id: String,
	/// Shared signing key.
	pub secret_key: SecretKey,
	/// HTTP method used for every request.
	#[serde(default)]
	pub method: HttpMethod,
	/// HMAC algorithm used for signatures.
	#[serde(default)]
	pub signature_method: SignatureMethod,
	/// Request path appended to the endpoint.
	#[serde(default = "default_path")]
	pub path: String,
	/// Value sent as `RequestClient`.
	#[serde(default = "default_request_client")]
	pub request_client: String,
	/// Timeout for non-polling calls; `None` disables it.
	#[serde(default = "default_request_timeout_secs")]
	pub request_timeout_secs: Option<u64>,
	/// Slack added to long-poll waits.
	#[serde(default = "default_poll_timeout_margin_secs")]
	pub poll_timeout_margin_secs: u64,
}
impl CmqConfigBuilder {
	/// Creates a new builder seeded with the endpoint and key pair.
	pub fn new(
		endpoint: impl Into<String>,
		secret_id: impl Into<String>,
		secret_key: impl Into<String>,
	) -> Self {
		Self {
			endpoint: endpoint.into(),
			secret_id: secret_id.into(),
			secret_key: SecretKey::new(secret_key),
			method: HttpMethod::default(),
			signature_method: SignatureMethod::default(),
			path: default_path(),
			request_client: default_request_client(),
			request_timeout_secs: default_request_timeout_secs(),
			poll_timeout_margin_secs: default_poll_timeout_margin_secs(),
		}
	}

	/// Sets the HTTP method.
	pub fn method(mut self, method: HttpMethod) -> Self {
		self.method = method;

		self
	}

	/// Sets the signature algorithm.
	pub fn signature_method(mut self, signature_method: SignatureMethod) -> Self {
		self.signature_method = signature_method;

		self
	}

	/// Overrides the request path.
	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();

		self
	}

	/// Overrides the `RequestClient` tag.
	pub fn request_client(mut self, request_client: impl Into<String>) -> Self {
		self.request_client = request_client.into();

		self
	}

	/// Overrides the timeout for non-polling calls.
	pub fn request_timeout_secs(mut self, secs: Option<u64>) -> Self {
		self.request_timeout_secs = secs;

		self
	}

	/// Overrides the slack added to long-poll waits.
	pub fn poll_timeout_margin_secs(mut self, secs: u64) -> Self {
		self.poll_timeout_margin_secs = secs;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<CmqConfig, ConfigError> {
		if !self.path.starts_with('/') {
			return Err(ConfigError::InvalidPath { path: self.path });
		}

		let credential = Credential::new(self.endpoint, self.secret_id, self.secret_key)?
			.with_method(self.method)
			.with_signature_method(self.signature_method);

		Ok(CmqConfig {
			credential,
			path: self.path,
			request_client: self.request_client,
			request_timeout: self.request_timeout_secs.map(Duration::from_secs),
			poll_timeout_margin: Duration::from_secs(self.poll_timeout_margin_secs),
		})
	}
}

fn default_path() -> String {
	CmqConfig::DEFAULT_PATH.into()
}

fn default_request_client() -> String {
	CmqConfig::DEFAULT_REQUEST_CLIENT.into()
}

fn default_request_timeout_secs() -> Option<u64> {
	Some(CmqConfig::DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_poll_timeout_margin_secs() -> u64 {
	CmqConfig::DEFAULT_POLL_TIMEOUT_MARGIN_SECS
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_applies_defaults() {
		let config = CmqConfig::builder("https://cmq-queue-gz.api.qcloud.com", "AKID", "secret")
			.build()
			.expect("Default configuration should build.");

		assert_eq!(config.base_url(), "https://cmq-queue-gz.api.qcloud.com/v2/index.php");
		assert_eq!(config.credential.method(), HttpMethod::Post);
		assert_eq!(config.credential.signature_method(), SignatureMethod::HmacSha256);
		assert!(config.request_client.starts_with("SDK_RUST_"));
		assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
	}

	#[test]
	fn poll_timeout_exceeds_wait() {
		let config = CmqConfig::builder("https://example.com", "AKID", "secret")
			.poll_timeout_margin_secs(2)
			.build()
			.expect("Configuration should build.");

		assert_eq!(config.poll_timeout(Some(10)), Duration::from_secs(12));
		assert_eq!(config.poll_timeout(None), Duration::from_secs(32));
		assert_eq!(config.poll_timeout(Some(0)), Duration::from_secs(2));
	}

	#[test]
	fn builder_rejects_bad_path_and_endpoint() {
		let err = CmqConfig::builder("https://example.com", "AKID", "secret")
			.path("v2/index.php")
			.build()
			.expect_err("Relative path must be rejected.");

		assert!(matches!(err, ConfigError::InvalidPath { .. }));

		let err = CmqConfig::builder("example.com", "AKID", "secret")
			.build()
			.expect_err("Endpoint without scheme must be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn builder_deserializes_with_defaults() {
		let payload = r#"{
			"endpoint": "http://127.0.0.1:9000",
			"secret_id": "AKID",
			"secret_key": "secret",
			"method": "GET",
			"signature_method": "HmacSHA1",
			"request_timeout_secs": null
		}"#;
		let builder: CmqConfigBuilder =
			serde_json::from_str(payload).expect("Builder should deserialize.");
		let config = builder.build().expect("Deserialized builder should build.");

		assert_eq!(config.credential.method(), HttpMethod::Get);
		assert_eq!(config.credential.signature_method(), SignatureMethod::HmacSha1);
		assert_eq!(config.path, CmqConfig::DEFAULT_PATH);
		assert_eq!(config.request_timeout, None);
		assert_eq!(config.poll_timeout_margin, Duration::from_secs(5));
	}

	#[test]
	fn debug_output_redacts_secret() {
		let config = CmqConfig::builder("https://example.com", "AKID", "top-secret")
			.build()
			.expect("Configuration should build.");

		assert!(!format!("{config:?}").contains("top-secret"));
	}
}
