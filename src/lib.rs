//! HMAC request signing and control client for Algo IP speakers: canonical signing strings,
//! fresh per-request nonces, and ready-to-send header sets behind one pluggable transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod obs;
pub mod signer;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::SharedSecret,
		client::SpeakerClient,
		http::ReqwestTransport,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = SpeakerClient<ReqwestTransport>;

	/// Constructs a [`SpeakerClient`] pointed at a mock device (typically an
	/// `httpmock` server URL) with the default reqwest transport.
	pub fn build_reqwest_test_client(host: &str, secret: &str) -> ReqwestTestClient {
		let secret =
			SharedSecret::new(secret).expect("Secret fixture should be valid for tests.");

		SpeakerClient::connect(host, secret)
			.expect("Test client should build against the mock device URL.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

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
#[cfg(test)] use {algo_speaker_client as _, color_eyre as _, httpmock as _};
