//! Request signer for the device's HMAC authentication scheme.
//!
//! The device authenticates every request by recomputing an HMAC-SHA256 digest
//! over a colon-delimited canonical string and comparing it against the
//! `Authorization` header. [`RequestSigner::sign`] draws fresh freshness
//! parameters and produces a [`SignedRequest`] whose header set and body are
//! ready to hand to any transport; [`RequestSigner::sign_with`] accepts explicit
//! freshness so tests can pin the output.

pub mod headers;
pub mod request;

pub use headers::*;
pub use request::*;

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha256;
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{
	_prelude::*,
	auth::{Freshness, HttpMethod, Nonce, Principal, SharedSecret, Timestamp},
	error::SignError,
};

/// RFC 1123 shape of the `Date` header (`Tue, 14 Nov 2023 22:13:20 GMT`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
	"[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Signs requests with a shared secret on behalf of a principal.
///
/// Signing is a pure request-scoped computation: no locks, no caches, no
/// network I/O. A signer can be shared freely across concurrent callers.
#[derive(Clone, Debug)]
pub struct RequestSigner {
	secret: SharedSecret,
	principal: Principal,
}
impl RequestSigner {
	/// Creates a signer for the stock `admin` principal.
	pub fn new(secret: SharedSecret) -> Self {
		Self { secret, principal: Principal::default() }
	}

	/// Overrides the principal embedded in `Authorization` values.
	pub fn with_principal(mut self, principal: Principal) -> Self {
		self.principal = principal;

		self
	}

	/// Returns the principal this signer signs for.
	pub fn principal(&self) -> &Principal {
		&self.principal
	}

	/// Signs a request with a freshly drawn timestamp/nonce pair.
	pub fn sign(&self, request: &SigningRequest) -> Result<SignedRequest, SignError> {
		self.sign_with(request, Freshness::generate())
	}

	/// Signs a request with explicit freshness parameters.
	///
	/// Deterministic: fixed (secret, method, uri, payload, timestamp, nonce)
	/// inputs always produce the same digest, which is the property the device
	/// re-derives to verify the request.
	pub fn sign_with(
		&self,
		request: &SigningRequest,
		freshness: Freshness,
	) -> Result<SignedRequest, SignError> {
		let signing_string = canonical_string(request, &freshness);
		let auth_digest = hmac_sha256_hex(self.secret.expose(), &signing_string);
		let moment = freshness
			.timestamp
			.moment()
			.map_err(|source| SignError::TimestampRange { source })?;
		let date = moment.format(DATE_FORMAT).map_err(|source| SignError::DateFormat { source })?;
		let authorization = format!("hmac {}:{}:{}", self.principal, freshness.nonce, auth_digest);
		let (content_digest, content_type, body) = match request.payload() {
			Some(payload) => (
				Some(payload.digest().to_owned()),
				Some(request.content_type().to_owned()),
				Some(payload.body().to_owned()),
			),
			None => (None, None, None),
		};

		Ok(SignedRequest {
			method: request.method(),
			uri: request.uri().clone(),
			signing_string,
			auth_digest,
			nonce: freshness.nonce,
			timestamp: freshness.timestamp,
			content_digest,
			content_type,
			body,
			date,
			authorization,
		})
	}
}

/// Everything a transport needs to deliver one authenticated request.
///
/// The signing string is exposed for diagnostics and tests; the device only
/// ever sees the header values and body.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// Verb signed into the canonical string.
	pub method: HttpMethod,
	/// Path signed into the canonical string.
	pub uri: RequestUri,
	/// Canonical string the digest was computed over.
	pub signing_string: String,
	/// Lowercase hex HMAC-SHA256 digest of the signing string.
	pub auth_digest: String,
	/// Nonce drawn for this request.
	pub nonce: Nonce,
	/// Unix-seconds instant this request was signed at.
	pub timestamp: Timestamp,
	/// Lowercase hex MD5 of the body, when a payload is present.
	pub content_digest: Option<String>,
	/// Content type signed into the canonical string, when a payload is present.
	pub content_type: Option<String>,
	/// Exact serialized body the content digest covers, when a payload is present.
	pub body: Option<String>,
	/// RFC 1123 UTC date of the signing instant.
	pub date: String,
	/// `hmac {principal}:{nonce}:{digest}` header value.
	pub authorization: String,
}
impl SignedRequest {
	/// Assembles the header set an HTTP client attaches to the request.
	pub fn headers(&self) -> HeaderSet {
		HeaderSet {
			authorization: self.authorization.clone(),
			date: self.date.clone(),
			content_type: self.content_type.clone(),
			content_md5: self.content_digest.clone(),
		}
	}
}

/// Builds the colon-delimited canonical string the device verifier recomputes.
///
/// Field order and separator are fixed by device firmware and must match
/// byte-for-byte: `method:uri:timestamp:nonce`, or
/// `method:uri:contentDigest:contentType:timestamp:nonce` with a payload.
fn canonical_string(request: &SigningRequest, freshness: &Freshness) -> String {
	match request.payload() {
		Some(payload) => format!(
			"{}:{}:{}:{}:{}:{}",
			request.method(),
			request.uri(),
			payload.digest(),
			request.content_type(),
			freshness.timestamp,
			freshness.nonce,
		),
		None => format!(
			"{}:{}:{}:{}",
			request.method(),
			request.uri(),
			freshness.timestamp,
			freshness.nonce,
		),
	}
}

fn hmac_sha256_hex(key: &[u8], message: &str) -> String {
	let mut mac =
		Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length.");

	mac.update(message.as_bytes());

	hex::encode(mac.finalize().into_bytes())
}
