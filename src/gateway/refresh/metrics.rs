// std
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy)]
enum Counter {
	Attempt,
	Success,
	Failure,
	Coalesced,
	ClearFailure,
}

/// Point-in-time copy of [`RefreshMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshSnapshot {
	/// Refresh calls sent to the server.
	pub attempts: u64,
	/// Refresh calls that produced a persisted token.
	pub successes: u64,
	/// Refreshes that ended the session.
	pub failures: u64,
	/// Calls that reused a token from a concurrent refresh.
	pub coalesced: u64,
	/// Session teardowns whose token slot refused to clear.
	pub clear_failures: u64,
}

/// Per-gateway refresh counters, shared by every clone of the gateway.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	counters: [AtomicU64; 5],
}
impl RefreshMetrics {
	/// Refresh calls sent to the server.
	pub fn attempts(&self) -> u64 {
		self.get(Counter::Attempt)
	}

	/// Refresh calls that produced a persisted token.
	pub fn successes(&self) -> u64 {
		self.get(Counter::Success)
	}

	/// Refreshes that ended the session.
	pub fn failures(&self) -> u64 {
		self.get(Counter::Failure)
	}

	/// Calls that reused a token from a concurrent refresh.
	pub fn coalesced(&self) -> u64 {
		self.get(Counter::Coalesced)
	}

	/// Session teardowns whose token slot refused to clear.
	pub fn clear_failures(&self) -> u64 {
		self.get(Counter::ClearFailure)
	}

	/// Reads every counter at once.
	pub fn snapshot(&self) -> RefreshSnapshot {
		RefreshSnapshot {
			attempts: self.attempts(),
			successes: self.successes(),
			failures: self.failures(),
			coalesced: self.coalesced(),
			clear_failures: self.clear_failures(),
		}
	}

	pub(crate) fn record_attempt(&self) {
		self.bump(Counter::Attempt);
	}

	pub(crate) fn record_success(&self) {
		self.bump(Counter::Success);
	}

	pub(crate) fn record_failure(&self) {
		self.bump(Counter::Failure);
	}

	pub(crate) fn record_coalesced(&self) {
		self.bump(Counter::Coalesced);
	}

	pub(crate) fn record_clear_failure(&self) {
		self.bump(Counter::ClearFailure);
	}

	fn get(&self, counter: Counter) -> u64 {
		self.counters[counter as usize].load(Ordering::Relaxed)
	}

	fn bump(&self, counter: Counter) {
		self.counters[counter as usize].fetch_add(1, Ordering::Relaxed);
	}
}
