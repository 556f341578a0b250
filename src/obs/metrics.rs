// self
use crate::obs::{CallOutcome, CallPhase};

/// Counter incremented for every phase attempt and its outcome.
pub const CALL_TOTAL: &str = "support_gateway_call_total";
/// Counter incremented when a session teardown could not clear the token slot.
pub const SESSION_CLEAR_FAILURE_TOTAL: &str = "support_gateway_session_clear_failure_total";

/// Records a phase outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(phase: CallPhase, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(CALL_TOTAL, "phase" => phase.as_str(), "outcome" => outcome.as_str())
		.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (phase, outcome);
}

/// Counts a token slot that refused to clear during session teardown.
pub fn count_session_clear_failure() {
	#[cfg(feature = "metrics")]
	metrics::counter!(SESSION_CLEAR_FAILURE_TOTAL).increment(1);
}
