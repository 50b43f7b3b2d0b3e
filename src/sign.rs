//! Request signing for the CMQ v2 API.
//!
//! Every request carries `Action`, `Nonce`, `SecretId`, `Timestamp`, `RequestClient`, and
//! `SignatureMethod`. The string-to-sign is
//! `METHOD + HOST + PATH + "?" + canonical_unescaped_params`, where `HOST` is the endpoint
//! without its scheme. The HMAC of that string, base64-encoded, is stored as `Signature`.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{_prelude::*, api::Action, auth::Credential, error::ConfigError, params::ParamSet};

/// Parameter name carrying the computed signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// HMAC algorithms accepted by the service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// HMAC-SHA256.
	#[default]
	#[serde(rename = "HmacSHA256", alias = "sha256")]
	HmacSha256,
	/// HMAC-SHA1.
	#[serde(rename = "HmacSHA1", alias = "sha1")]
	HmacSha1,
}
impl SignatureMethod {
	/// Returns the value sent as `SignatureMethod`.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha256 => "HmacSHA256",
			SignatureMethod::HmacSha1 => "HmacSHA1",
		}
	}

	/// Computes the base64-encoded HMAC of `payload` under `secret`.
	pub fn compute(self, secret: &[u8], payload: &str) -> Result<String, ConfigError> {
		let invalid = |_| ConfigError::InvalidSigningKey { method: self.as_str() };
		let digest = match self {
			SignatureMethod::HmacSha256 => {
				let mut mac = Hmac::<Sha256>::new_from_slice(secret).map_err(invalid)?;

				mac.update(payload.as_bytes());

				mac.finalize().into_bytes().to_vec()
			},
			SignatureMethod::HmacSha1 => {
				let mut mac = Hmac::<Sha1>::new_from_slice(secret).map_err(invalid)?;

				mac.update(payload.as_bytes());

				mac.finalize().into_bytes().to_vec()
			},
		};

		Ok(STANDARD.encode(digest))
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-call values that make each signature unique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestStamp {
	/// Positive pseudo-random nonce.
	pub nonce: u32,
	/// Unix time in seconds.
	pub timestamp: i64,
}
impl RequestStamp {
	/// Draws a fresh nonce and reads the current time.
	pub fn fresh() -> Self {
		Self {
			nonce: rand::rng().random_range(1..=u32::MAX),
			timestamp: OffsetDateTime::now_utc().unix_timestamp(),
		}
	}
}

/// Outcome of signing a parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// Exact string the HMAC was computed over.
	pub string_to_sign: String,
	/// Base64-encoded signature, also stored in the parameter set.
	pub signature: String,
}

/// Signs parameter sets for one credential and request path.
#[derive(Clone, Copy, Debug)]
pub struct RequestSigner<'a> {
	credential: &'a Credential,
	path: &'a str,
	request_client: &'a str,
}
impl<'a> RequestSigner<'a> {
	/// Creates a signer for `credential` targeting `path`.
	pub fn new(credential: &'a Credential, path: &'a str, request_client: &'a str) -> Self {
		Self { credential, path, request_client }
	}

	/// Stamps `params` with a fresh nonce and timestamp, then signs them.
	pub fn sign(
		&self,
		action: Action,
		params: &mut ParamSet,
	) -> Result<SignedRequest, ConfigError> {
		self.sign_with(action, params, RequestStamp::fresh())
	}

	/// Stamps `params` with the provided values, then signs them.
	///
	/// Deterministic: identical inputs always yield identical signatures.
	pub fn sign_with(
		&self,
		action: Action,
		params: &mut ParamSet,
		stamp: RequestStamp,
	) -> Result<SignedRequest, ConfigError> {
		let method = self.credential.signature_method();

		params.remove(SIGNATURE_PARAM);
		params.insert("Action", action.as_str());
		params.insert("Nonce", stamp.nonce);
		params.insert("SecretId", self.credential.secret_id());
		params.insert("Timestamp", stamp.timestamp);
		params.insert("RequestClient", self.request_client);
		params.insert("SignatureMethod", method.as_str());

		let string_to_sign = self.string_to_sign(params)?;
		let signature =
			method.compute(self.credential.secret_key().expose().as_bytes(), &string_to_sign)?;

		params.insert(SIGNATURE_PARAM, signature.clone());

		Ok(SignedRequest { string_to_sign, signature })
	}

	/// Builds `METHOD + HOST + PATH + "?" + canonical_unescaped_params`.
	pub fn string_to_sign(&self, params: &ParamSet) -> Result<String, ConfigError> {
		Ok(format!(
			"{}{}{}?{}",
			self.credential.method().as_str(),
			self.credential.host()?,
			self.path,
			params.canonical(false),
		))
	}
}
