// self
use crate::{_prelude::*, obs::CallPhase};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by gateway calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided phase + stage.
	pub fn new(phase: CallPhase, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("support_gateway.call", phase = phase.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (phase, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a warning when a session ends and the user is sent to `location`.
pub fn record_login_redirect(location: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(location, "session ended; redirecting to login");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = location;
	}
}

/// Emits a warning when a session teardown could not clear the token slot.
pub fn warn_session_clear_failure(error: &dyn StdError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %error, "token slot could not be cleared after a failed refresh");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

/// Emits a debug event when a call reuses a token minted by a concurrent refresh.
pub fn record_refresh_coalesced() {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!("reusing token from a concurrent refresh");
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn login_redirect_noop_without_tracing() {
		record_login_redirect("/login");
		record_refresh_coalesced();
		warn_session_clear_failure(&std::io::Error::other("read-only"));
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallPhase::Refresh, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
