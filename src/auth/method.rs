//! HTTP verbs accepted by the device API.

// self
use crate::_prelude::*;

/// Verbs the device's HMAC verifier recognizes inside canonical signing strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
	/// `GET` - settings reads.
	Get,
	/// `POST` - control commands.
	Post,
	/// `PUT` - persistent settings writes.
	Put,
	/// `DELETE` - settings resets.
	Delete,
}
impl HttpMethod {
	/// Returns the canonical uppercase label signed into canonical strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = MethodParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			_ if s.eq_ignore_ascii_case("GET") => Ok(HttpMethod::Get),
			_ if s.eq_ignore_ascii_case("POST") => Ok(HttpMethod::Post),
			_ if s.eq_ignore_ascii_case("PUT") => Ok(HttpMethod::Put),
			_ if s.eq_ignore_ascii_case("DELETE") => Ok(HttpMethod::Delete),
			_ => Err(MethodParseError { method: s.to_owned() }),
		}
	}
}
impl From<HttpMethod> for String {
	fn from(value: HttpMethod) -> Self {
		value.as_str().to_owned()
	}
}
impl TryFrom<String> for HttpMethod {
	type Error = MethodParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Error returned when a verb is outside the device's supported set.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("HTTP method `{method}` is not supported by the device API.")]
pub struct MethodParseError {
	/// Verb string that failed to parse.
	pub method: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn verbs_parse_case_insensitively() {
		assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
		assert_eq!("post".parse::<HttpMethod>(), Ok(HttpMethod::Post));
		assert_eq!("Put".parse::<HttpMethod>(), Ok(HttpMethod::Put));
		assert_eq!("DELETE".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
	}

	#[test]
	fn unsupported_verbs_are_rejected() {
		let err = "PATCH".parse::<HttpMethod>().unwrap_err();

		assert_eq!(err.method, "PATCH");
	}

	#[test]
	fn canonical_labels_are_uppercase() {
		assert_eq!(HttpMethod::Get.as_str(), "GET");
		assert_eq!("delete".parse::<HttpMethod>().map(|m| m.to_string()), Ok("DELETE".into()));
	}
}
