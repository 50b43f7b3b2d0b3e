//! Async client for the CMQ message-queue HTTP API: signed requests, typed queue, topic, and
//! subscription façades, and transport-aware observability in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod params;
pub mod sign;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::Client,
		config::CmqConfig,
		error::TransportError,
		http::{CmqHttpClient, HttpFuture, HttpRequest, HttpResponse},
	};

	/// Key identifier used by test configurations.
	pub const TEST_SECRET_ID: &str = "AKIDz8krbsJ5yKBZQpn74WFkmLPx3gnPhESA";
	/// Signing key used by test configurations.
	pub const TEST_SECRET_KEY: &str = "Gu5t9xGARNpq86cd98joQYCN3Cozk1qA";

	/// Builds a configuration pointing at `endpoint` with the test key pair.
	pub fn test_config(endpoint: &str) -> CmqConfig {
		CmqConfig::builder(endpoint, TEST_SECRET_ID, TEST_SECRET_KEY)
			.build()
			.expect("Test configuration should build.")
	}

	/// Transport that records every request and replies with queued bodies.
	///
	/// Replies are served in order; once exhausted, every further call fails with
	/// [`TransportError::DoRequest`].
	#[derive(Debug, Default)]
	pub struct RecordingHttpClient {
		requests: Mutex<Vec<HttpRequest>>,
		replies: Mutex<Vec<HttpResponse>>,
	}
	impl RecordingHttpClient {
		/// Creates a transport that answers with each JSON body in turn, all with status 200.
		pub fn replying<I, S>(bodies: I) -> Self
		where
			I: IntoIterator<Item = S>,
			S: Into<String>,
		{
			let mut replies = bodies
				.into_iter()
				.map(|body| HttpResponse { status: 200, body: body.into() })
				.collect::<Vec<_>>();

			replies.reverse();

			Self { requests: Mutex::default(), replies: Mutex::new(replies) }
		}

		/// Requests seen so far.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}
	}
	impl CmqHttpClient for RecordingHttpClient {
		fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
			self.requests.lock().push(request);

			let reply = self.replies.lock().pop();

			Box::pin(async move {
				reply.ok_or_else(|| {
					TransportError::do_request(std::io::Error::other("no scripted reply left"))
				})
			})
		}
	}

	/// Builds a client over a [`RecordingHttpClient`] that answers with `bodies`.
	pub fn recording_client<I, S>(
		bodies: I,
	) -> (Client<RecordingHttpClient>, Arc<RecordingHttpClient>)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let transport = Arc::new(RecordingHttpClient::replying(bodies));
		let config = test_config("https://cmq-queue-gz.api.qcloud.com");
		let client = Client::with_http_client(config, transport.clone());

		(client, transport)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
