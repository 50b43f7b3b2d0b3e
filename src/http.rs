//! Transport primitives for CMQ calls.
//!
//! The module exposes [`CmqHttpClient`] alongside [`HttpRequest`] and [`HttpResponse`] so
//! downstream crates can plug in a custom HTTP stack. Implementations issue exactly one
//! request per call, apply the request's timeout, and classify failures into
//! [`TransportError`] without retrying.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	error::{TransportError, ValidationError},
	params::ParamSet,
};

/// Longest URL the service accepts for `GET` requests, in bytes.
pub const MAX_GET_URL_LEN: usize = 2048;

/// Content type used for every request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Future returned by [`CmqHttpClient::execute`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// HTTP methods the service accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel in a form body.
	#[default]
	Post,
}
impl HttpMethod {
	/// Returns the method token used on the wire and in the string-to-sign.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully assembled request ready for a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute URL, including the query string for `GET`.
	pub url: String,
	/// Form body for `POST`.
	pub body: Option<String>,
	/// Client-side timeout for the whole exchange.
	pub timeout: Option<Duration>,
}
impl HttpRequest {
	/// Assembles a request from signed parameters.
	///
	/// `GET` requests carry the escaped parameters in the URL and are rejected when the
	/// URL exceeds [`MAX_GET_URL_LEN`]; `POST` requests carry them as a form body.
	pub fn from_params(
		method: HttpMethod,
		base_url: &str,
		params: &ParamSet,
		timeout: Option<Duration>,
	) -> Result<Self, ValidationError> {
		let encoded = params.canonical(true);

		match method {
			HttpMethod::Get => {
				let url = format!("{base_url}?{encoded}");
				let len = url.len();

				if len > MAX_GET_URL_LEN {
					return Err(ValidationError::UrlTooLong { len, max: MAX_GET_URL_LEN });
				}

				Ok(Self { method, url, body: None, timeout })
			},
			HttpMethod::Post =>
				Ok(Self { method, url: base_url.to_owned(), body: Some(encoded), timeout }),
		}
	}
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}

/// Abstraction over HTTP transports capable of executing CMQ calls.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back many clients, and the futures they
/// return must be `Send` so façade calls can hop executors.
pub trait CmqHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues exactly one HTTP call.
	///
	/// # Error Contract
	///
	/// - [`TransportError::BuildRequest`] when the request cannot be constructed.
	/// - [`TransportError::DoRequest`] when no response arrives; set `timed_out` when the request
	///   timeout elapsed.
	/// - [`TransportError::ReadBody`] when a response arrives but its body cannot be read.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl CmqHttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
			};
			let mut builder = self
				.0
				.request(method, &request.url)
				.header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE);

			if let Some(body) = request.body {
				builder = builder.body(body);
			}
			if let Some(timeout) = request.timeout {
				builder = builder.timeout(timeout);
			}

			let prepared = builder.build().map_err(TransportError::build_request)?;
			let response = self.0.execute(prepared).await.map_err(map_send_error)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::read_body)?;

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn map_send_error(err: ReqwestError) -> TransportError {
	if err.is_builder() {
		TransportError::build_request(err)
	} else if err.is_timeout() {
		TransportError::timed_out(err)
	} else {
		TransportError::do_request(err)
	}
}
