//! Shared-secret wrapper that redacts sensitive material and zeroizes on drop.

// crates.io
use zeroize::ZeroizeOnDrop;
// self
use crate::_prelude::*;

/// Shared device password keyed into every HMAC digest.
///
/// The inner buffer is wiped when the value is dropped, and both formatter
/// implementations redact it so the secret never reaches logs by accident.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct SharedSecret(String);
impl SharedSecret {
	/// Wraps a new secret after rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, SecretError> {
		let value = value.into();

		if value.is_empty() {
			return Err(SecretError::Empty);
		}

		Ok(Self(value))
	}

	/// Returns the secret's key bytes. Callers must avoid logging this slice.
	pub fn expose(&self) -> &[u8] {
		self.0.as_bytes()
	}
}
impl Debug for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
	}
}
impl Display for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Error returned when secret validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SecretError {
	/// The secret was empty.
	#[error("Shared secret cannot be empty.")]
	Empty,
}
