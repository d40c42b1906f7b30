//! Optional observability helpers for client dispatches.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `algo_speaker.request` with the `command`
//!   (endpoint family) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `algo_speaker_request_total` counter for every
//!   attempt/success/failure, labeled by `command` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Endpoint families observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
	/// Tone start/stop controls.
	Tone,
	/// Strobe start/stop controls.
	Strobe,
	/// Settings reads and writes.
	Settings,
}
impl CommandKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CommandKind::Tone => "tone",
			CommandKind::Strobe => "strobe",
			CommandKind::Settings => "settings",
		}
	}
}
impl Display for CommandKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
	/// Entry to a client dispatch.
	Attempt,
	/// Delivery completed with a 200 reply.
	Success,
	/// Signing failure, transport failure, or non-200 reply.
	Failure,
}
impl DispatchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchOutcome::Attempt => "attempt",
			DispatchOutcome::Success => "success",
			DispatchOutcome::Failure => "failure",
		}
	}
}
impl Display for DispatchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
