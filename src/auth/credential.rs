//! Immutable account credential shared by every request.

// self
use crate::{
	_prelude::*,
	auth::SecretKey,
	error::ConfigError,
	http::HttpMethod,
	sign::SignatureMethod,
};

/// Endpoint, key pair, and request style used to sign and send every call.
///
/// Constructed once and never mutated; clones are cheap enough to hand to each client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	endpoint: String,
	secret_id: String,
	secret_key: SecretKey,
	method: HttpMethod,
	signature_method: SignatureMethod,
}
impl Credential {
	/// Creates a credential with the default `POST` + `HmacSHA256` request style.
	pub fn new(
		endpoint: impl AsRef<str>,
		secret_id: impl Into<String>,
		secret_key: SecretKey,
	) -> Result<Self, ConfigError> {
		let endpoint = normalize_endpoint(endpoint.as_ref())?;
		let secret_id = secret_id.into().trim().to_owned();

		if secret_id.is_empty() {
			return Err(ConfigError::MissingCredential { field: "SecretId" });
		}
		if secret_key.is_empty() {
			return Err(ConfigError::MissingCredential { field: "SecretKey" });
		}

		Ok(Self {
			endpoint,
			secret_id,
			secret_key,
			method: HttpMethod::default(),
			signature_method: SignatureMethod::default(),
		})
	}

	/// Overrides the HTTP method used for every request.
	pub fn with_method(mut self, method: HttpMethod) -> Self {
		self.method = method;

		self
	}

	/// Overrides the HMAC algorithm used for signatures.
	pub fn with_signature_method(mut self, signature_method: SignatureMethod) -> Self {
		self.signature_method = signature_method;

		self
	}

	/// Endpoint including its scheme, without a trailing slash.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Endpoint with its literal scheme prefix removed, as used in the string-to-sign.
	pub fn host(&self) -> Result<&str, ConfigError> {
		strip_scheme(&self.endpoint)
	}

	/// Public key identifier sent as `SecretId`.
	pub fn secret_id(&self) -> &str {
		&self.secret_id
	}

	/// Shared signing key.
	pub fn secret_key(&self) -> &SecretKey {
		&self.secret_key
	}

	/// HTTP method used for every request.
	pub fn method(&self) -> HttpMethod {
		self.method
	}

	/// HMAC algorithm used for signatures.
	pub fn signature_method(&self) -> SignatureMethod {
		self.signature_method
	}
}

/// Removes the literal `https://` or `http://` prefix, rejecting anything else.
pub fn strip_scheme(endpoint: &str) -> Result<&str, ConfigError> {
	endpoint
		.strip_prefix("https://")
		.or_else(|| endpoint.strip_prefix("http://"))
		.filter(|host| !host.is_empty())
		.ok_or_else(|| ConfigError::UnsupportedScheme { endpoint: endpoint.to_owned() })
}

fn normalize_endpoint(raw: &str) -> Result<String, ConfigError> {
	let endpoint = raw.trim().trim_end_matches('/');

	strip_scheme(endpoint)?;
	Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
		endpoint: endpoint.to_owned(),
		source,
	})?;

	Ok(endpoint.to_owned())
}
