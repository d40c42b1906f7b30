//! Transport primitives for delivering signed requests.
//!
//! The module exposes [`SpeakerTransport`] so downstream crates can drive the
//! client with any HTTP stack. A transport receives an [`OutboundRequest`]
//! whose header set and body come straight from the signer; it must attach the
//! headers verbatim and send the body byte-for-byte, because the device
//! recomputes the `Content-MD5` digest over exactly what arrives on the wire.

// std
#[cfg(feature = "reqwest")] use std::time::Duration as StdDuration;
// self
use crate::{
	_prelude::*,
	auth::HttpMethod,
	error::TransportError,
	signer::HeaderSet,
};

/// Boxed future returned by [`SpeakerTransport::execute`].
pub type TransportFuture<'f> =
	Pin<Box<dyn Future<Output = Result<TransportReply, TransportError>> + 'f + Send>>;

/// Abstraction over HTTP transports capable of delivering signed requests.
///
/// The trait is the crate's only dependency on an HTTP stack. Implementations
/// must be `Send + Sync + 'static` so one client can be shared across
/// concurrent callers, and the returned future must be `Send` for the lifetime
/// of the in-flight request. Signing never blocks; all blocking lives behind
/// this seam, bounded by whatever per-request timeout the transport enforces.
pub trait SpeakerTransport
where
	Self: 'static + Send + Sync,
{
	/// Delivers one signed request and returns the device's reply.
	fn execute(&self, request: OutboundRequest) -> TransportFuture<'_>;
}

/// One fully signed request ready for delivery.
#[derive(Clone, Debug)]
pub struct OutboundRequest {
	/// Request verb.
	pub method: HttpMethod,
	/// Absolute device URL.
	pub url: Url,
	/// Signed header values to attach verbatim.
	pub headers: HeaderSet,
	/// Exact body the content digest covers, when present.
	pub body: Option<String>,
}

/// Raw reply captured from the device.
#[derive(Clone, Debug)]
pub struct TransportReply {
	/// HTTP status code.
	pub status: u16,
	/// Reply body, passed through unchanged.
	pub body: String,
}

/// Default per-request timeout applied by [`ReqwestTransport`].
#[cfg(feature = "reqwest")]
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Timeouts are treated as ordinary transport failures; redirect and TLS
/// policy follow whatever the supplied client was built with.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	timeout: Option<StdDuration>,
}
#[cfg(feature = "reqwest")]
impl Default for ReqwestTransport {
	fn default() -> Self {
		Self::new()
	}
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport around a default reqwest client and the default timeout.
	pub fn new() -> Self {
		Self { client: ReqwestClient::new(), timeout: Some(DEFAULT_TIMEOUT) }
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, timeout: Some(DEFAULT_TIMEOUT) }
	}

	/// Overrides the per-request timeout. `None` defers to the client's own policy.
	pub fn with_timeout(mut self, timeout: Option<StdDuration>) -> Self {
		self.timeout = timeout;

		self
	}
}
#[cfg(feature = "reqwest")]
impl SpeakerTransport for ReqwestTransport {
	fn execute(&self, request: OutboundRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = self.client.request(method, request.url);

			for (name, value) in request.headers.iter() {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}
			if let Some(timeout) = self.timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(TransportReply { status, body })
		})
	}
}
