// self
use crate::obs::{CommandKind, DispatchOutcome};

/// Records a dispatch outcome via the global metrics recorder (when enabled).
pub fn record_dispatch_outcome(kind: CommandKind, outcome: DispatchOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"algo_speaker_request_total",
			"command" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
