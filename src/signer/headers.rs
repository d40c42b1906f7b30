//! Header set an HTTP client attaches verbatim to a signed request.

// self
use crate::_prelude::*;

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// `Date` header name.
pub const DATE: &str = "Date";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Content-MD5` header name.
pub const CONTENT_MD5: &str = "Content-MD5";

/// Ready-to-send header values for one signed request.
///
/// `Authorization` and `Date` are always present; `Content-Type` and
/// `Content-MD5` exist exactly when the signed request carried a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderSet {
	/// `hmac {principal}:{nonce}:{digest}` header value.
	pub authorization: String,
	/// RFC 1123 UTC date of the signing instant.
	pub date: String,
	/// Payload content type, when a body is present.
	pub content_type: Option<String>,
	/// Lowercase hex MD5 of the body, when a body is present.
	pub content_md5: Option<String>,
}
impl HeaderSet {
	/// Iterates `(name, value)` pairs in a stable order, skipping absent headers.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		[
			Some((AUTHORIZATION, self.authorization.as_str())),
			Some((DATE, self.date.as_str())),
			self.content_type.as_deref().map(|value| (CONTENT_TYPE, value)),
			self.content_md5.as_deref().map(|value| (CONTENT_MD5, value)),
		]
		.into_iter()
		.flatten()
	}
}
