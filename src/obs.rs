//! Optional observability helpers for gateway calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `support_gateway.call` with the `phase` and
//!   `stage` fields, plus a warning event whenever a session is torn down.
//! - Enable `metrics` to increment the `support_gateway_call_total` counter for every
//!   attempt/success/failure, labeled by `phase` + `outcome`, and the
//!   `support_gateway_session_clear_failure_total` counter when a torn-down session keeps its
//!   token.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Reports a token slot that refused to clear while a session was being torn down.
pub fn record_session_clear_failure(error: &dyn StdError) {
	warn_session_clear_failure(error);
	count_session_clear_failure();
}

/// Phases a logical call passes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallPhase {
	/// First attempt of a caller's request.
	Request,
	/// Session refresh triggered by a 401.
	Refresh,
	/// Second attempt after a successful refresh.
	Retry,
}
impl CallPhase {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallPhase::Request => "request",
			CallPhase::Refresh => "refresh",
			CallPhase::Retry => "retry",
		}
	}
}
impl Display for CallPhase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a phase.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller, or a 401 that moves the call on.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
