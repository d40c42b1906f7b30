//! Principal identifier carried inside the `Authorization` header value.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Default principal accepted by stock device firmware.
pub const DEFAULT_PRINCIPAL: &str = "admin";

/// User identifier embedded in the `hmac {principal}:{nonce}:{digest}` header value.
///
/// The value participates in the colon-delimited header, so colons and whitespace
/// are rejected at construction. Stock firmware only knows `admin`, which is the
/// [`Default`] value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);
impl Principal {
	/// Creates a new principal after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, PrincipalError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Default for Principal {
	fn default() -> Self {
		Self(DEFAULT_PRINCIPAL.to_owned())
	}
}
impl Deref for Principal {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Principal {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Principal> for String {
	fn from(value: Principal) -> Self {
		value.0
	}
}
impl TryFrom<String> for Principal {
	type Error = PrincipalError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for Principal {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for Principal {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Principal({})", self.0)
	}
}
impl Display for Principal {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Principal {
	type Err = PrincipalError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

/// Error returned when principal validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum PrincipalError {
	/// The principal was empty.
	#[error("Principal identifier cannot be empty.")]
	Empty,
	/// The principal contains whitespace characters.
	#[error("Principal identifier contains whitespace.")]
	ContainsWhitespace,
	/// The principal contains the `:` header delimiter.
	#[error("Principal identifier contains the `:` delimiter.")]
	ContainsDelimiter,
}

fn validate_view(view: &str) -> Result<(), PrincipalError> {
	if view.is_empty() {
		return Err(PrincipalError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(PrincipalError::ContainsWhitespace);
	}
	if view.contains(':') {
		return Err(PrincipalError::ContainsDelimiter);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_principal_is_admin() {
		assert_eq!(Principal::default().as_ref(), "admin");
	}

	#[test]
	fn principals_validate() {
		assert_eq!(Principal::new("").unwrap_err(), PrincipalError::Empty);
		assert_eq!(Principal::new("pa ging").unwrap_err(), PrincipalError::ContainsWhitespace);
		assert_eq!(Principal::new("ops:lead").unwrap_err(), PrincipalError::ContainsDelimiter);

		let principal =
			Principal::new("front-desk").expect("Principal fixture should be considered valid.");

		assert_eq!(principal.as_ref(), "front-desk");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let principal: Principal =
			serde_json::from_str("\"admin\"").expect("Principal should deserialize successfully.");

		assert_eq!(principal.as_ref(), "admin");
		assert!(serde_json::from_str::<Principal>("\"with space\"").is_err());
		assert!(serde_json::from_str::<Principal>("\"a:b\"").is_err());
	}
}
