//! Per-request freshness parameters: nonce and signing timestamp.

// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

/// Smallest value a generated nonce can take.
pub const NONCE_MIN: u32 = 100_000;
/// Largest value a generated nonce can take.
pub const NONCE_MAX: u32 = 999_999;

/// Six-digit decimal nonce drawn independently for every signing operation.
///
/// The nonce's role is per-request uniqueness inside the device's short replay
/// window, not unpredictability, so generation uses the thread-local
/// general-purpose PRNG rather than a cryptographic source.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);
impl Nonce {
	/// Draws a fresh nonce from `[NONCE_MIN, NONCE_MAX]`.
	pub fn generate() -> Self {
		Self(rand::rng().random_range(NONCE_MIN..=NONCE_MAX).to_string())
	}

	/// Validates an explicit nonce, used when tests need deterministic output.
	pub fn new(value: impl AsRef<str>) -> Result<Self, NonceError> {
		let view = value.as_ref();

		if view.len() != 6 || !view.bytes().all(|b| b.is_ascii_digit()) {
			return Err(NonceError::Malformed { value: view.to_owned() });
		}

		// Six ASCII digits can still start with zero, which falls below the range.
		let parsed = view
			.parse::<u32>()
			.map_err(|_| NonceError::Malformed { value: view.to_owned() })?;

		if !(NONCE_MIN..=NONCE_MAX).contains(&parsed) {
			return Err(NonceError::OutOfRange { value: view.to_owned() });
		}

		Ok(Self(view.to_owned()))
	}

	/// Returns the decimal string signed into canonical strings.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Nonce {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for Nonce {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Nonce({})", self.0)
	}
}
impl Display for Nonce {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Nonce {
	type Err = NonceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

/// Error returned when an explicit nonce fails validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum NonceError {
	/// The nonce is not a 6-digit decimal string.
	#[error("Nonce `{value}` is not a 6-digit decimal string.")]
	Malformed {
		/// Rejected value.
		value: String,
	},
	/// The nonce falls outside `[NONCE_MIN, NONCE_MAX]`.
	#[error("Nonce `{value}` is outside the allowed range.")]
	OutOfRange {
		/// Rejected value.
		value: String,
	},
}

/// Unix-seconds signing timestamp.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);
impl Timestamp {
	/// Captures the current wall-clock time.
	pub fn now() -> Self {
		Self(OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Wraps an explicit Unix-seconds value, used for deterministic tests.
	pub const fn from_unix(secs: i64) -> Self {
		Self(secs)
	}

	/// Returns the raw Unix-seconds value.
	pub const fn unix(self) -> i64 {
		self.0
	}

	/// Resolves the timestamp back into an [`OffsetDateTime`] instant.
	pub fn moment(self) -> Result<OffsetDateTime, time::error::ComponentRange> {
		OffsetDateTime::from_unix_timestamp(self.0)
	}
}
impl Debug for Timestamp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Timestamp({})", self.0)
	}
}
impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", self.0)
	}
}

/// Timestamp + nonce pair drawn fresh for each signing operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Freshness {
	/// Unix-seconds instant the request is signed at.
	pub timestamp: Timestamp,
	/// Per-request nonce.
	pub nonce: Nonce,
}
impl Freshness {
	/// Draws a fresh timestamp/nonce pair.
	pub fn generate() -> Self {
		Self { timestamp: Timestamp::now(), nonce: Nonce::generate() }
	}

	/// Builds an explicit pair, used for deterministic tests.
	pub const fn new(timestamp: Timestamp, nonce: Nonce) -> Self {
		Self { timestamp, nonce }
	}
}
