//! Signing-request inputs: validated URIs and canonical payload forms.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use md5::{Digest, Md5};
// self
use crate::{_prelude::*, auth::HttpMethod, error::SignError};

/// Content type assumed by the device for JSON command bodies.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Path component of a device endpoint, validated to be non-empty and rooted.
///
/// Host and query never participate in canonical signing strings; the device
/// verifier sees the path exactly as sent here.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestUri(String);
impl RequestUri {
	/// Creates a new request URI after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, UriError> {
		let view = value.as_ref();

		if view.is_empty() {
			return Err(UriError::Empty);
		}
		if !view.starts_with('/') {
			return Err(UriError::MissingLeadingSlash { uri: view.to_owned() });
		}

		Ok(Self(view.to_owned()))
	}

	/// Returns the path string signed into canonical strings.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for RequestUri {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for RequestUri {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for RequestUri {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<RequestUri> for String {
	fn from(value: RequestUri) -> Self {
		value.0
	}
}
impl TryFrom<String> for RequestUri {
	type Error = UriError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(&value)
	}
}
impl Debug for RequestUri {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "RequestUri({})", self.0)
	}
}
impl Display for RequestUri {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for RequestUri {
	type Err = UriError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

/// Error returned when request-URI validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum UriError {
	/// The URI was empty.
	#[error("Request URI cannot be empty.")]
	Empty,
	/// The URI does not begin with `/`.
	#[error("Request URI `{uri}` must begin with `/`.")]
	MissingLeadingSlash {
		/// Rejected value.
		uri: String,
	},
}

/// Canonical byte form of a request body plus its MD5 content digest.
///
/// Serialization is compact JSON (`,`/`:` separators, no spaces) with keys in
/// the order emitted by the payload's `Serialize` implementation. The digest is
/// order-sensitive and is not canonicalized further; callers fix key order
/// upstream, and the transport must send exactly [`body`](Self::body).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalPayload {
	body: String,
	digest: String,
}
impl CanonicalPayload {
	/// Serializes a payload value and computes its lowercase hex MD5 digest.
	pub fn from_value<P>(payload: &P) -> Result<Self, SignError>
	where
		P: Serialize + ?Sized,
	{
		let body = serde_json::to_string(payload).map_err(|source| SignError::Payload { source })?;
		let digest = hex::encode(Md5::digest(body.as_bytes()));

		Ok(Self { body, digest })
	}

	/// Returns the exact serialized body bytes the digest covers.
	pub fn body(&self) -> &str {
		&self.body
	}

	/// Returns the lowercase hex MD5 content digest.
	pub fn digest(&self) -> &str {
		&self.digest
	}
}

/// Immutable description of one request to sign.
#[derive(Clone, Debug)]
pub struct SigningRequest {
	method: HttpMethod,
	uri: RequestUri,
	payload: Option<CanonicalPayload>,
	content_type: String,
}
impl SigningRequest {
	/// Creates a body-less signing request.
	pub fn new(method: HttpMethod, uri: RequestUri) -> Self {
		Self { method, uri, payload: None, content_type: DEFAULT_CONTENT_TYPE.to_owned() }
	}

	/// Attaches a payload, serializing it to canonical form immediately so
	/// serialization faults surface before any signing work.
	pub fn with_payload<P>(mut self, payload: &P) -> Result<Self, SignError>
	where
		P: Serialize + ?Sized,
	{
		self.payload = Some(CanonicalPayload::from_value(payload)?);

		Ok(self)
	}

	/// Overrides the content type signed into the canonical string.
	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = content_type.into();

		self
	}

	/// Returns the request verb.
	pub fn method(&self) -> HttpMethod {
		self.method
	}

	/// Returns the request URI.
	pub fn uri(&self) -> &RequestUri {
		&self.uri
	}

	/// Returns the canonical payload, when one was attached.
	pub fn payload(&self) -> Option<&CanonicalPayload> {
		self.payload.as_ref()
	}

	/// Returns the content type signed when a payload is present.
	pub fn content_type(&self) -> &str {
		&self.content_type
	}
}
