//! Crate-level error types shared across the signer, transport, and client layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Signing-input or serialization failure.
	#[error(transparent)]
	Sign(#[from] SignError),
	/// Device response could not be interpreted.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Device host does not form a valid base URL.
	#[error("Device host `{host}` does not form a valid base URL.")]
	InvalidHost {
		/// Host string supplied by the caller.
		host: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request URI cannot be joined onto the device base URL.
	#[error("Request URI `{uri}` cannot be joined onto the device base URL.")]
	InvalidRequestUrl {
		/// URI that failed to join.
		uri: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Signing failures: invalid inputs rejected before any digest work, plus
/// payload serialization and clock formatting faults.
#[derive(Debug, ThisError)]
pub enum SignError {
	/// Shared secret failed validation.
	#[error(transparent)]
	Secret(#[from] crate::auth::SecretError),
	/// Request URI failed validation.
	#[error(transparent)]
	Uri(#[from] crate::signer::UriError),
	/// HTTP method is outside the device's supported verb set.
	#[error(transparent)]
	Method(#[from] crate::auth::MethodParseError),
	/// Principal identifier failed validation.
	#[error(transparent)]
	Principal(#[from] crate::auth::PrincipalError),
	/// Nonce override failed validation.
	#[error(transparent)]
	Nonce(#[from] crate::auth::NonceError),
	/// Payload could not be serialized to its canonical JSON form.
	#[error("Payload could not be serialized to canonical JSON.")]
	Payload {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Signing timestamp does not correspond to a representable instant.
	#[error("Signing timestamp is outside the representable range.")]
	TimestampRange {
		/// Underlying component-range failure.
		#[source]
		source: time::error::ComponentRange,
	},
	/// The `Date` header value could not be formatted.
	#[error("Date header could not be formatted.")]
	DateFormat {
		/// Underlying formatting failure.
		#[source]
		source: time::error::Format,
	},
}

/// Failures interpreting a device reply body.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Device returned a body that is not the expected JSON document.
	#[error("Device returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the reply, when known.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the device.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the device.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
