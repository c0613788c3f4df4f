// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for submission attempts.
#[derive(Debug, Default)]
pub struct SubmitMetrics {
	attempts: AtomicU64,
	accepted: AtomicU64,
	rejected: AtomicU64,
}
impl SubmitMetrics {
	/// Returns the total number of delivery attempts.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of attempts the endpoint accepted with a 2xx status.
	pub fn accepted(&self) -> u64 {
		self.accepted.load(Ordering::Relaxed)
	}

	/// Returns the number of attempts that were rejected or failed to complete.
	pub fn rejected(&self) -> u64 {
		self.rejected.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_accepted(&self) {
		self.accepted.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_rejected(&self) {
		self.rejected.fetch_add(1, Ordering::Relaxed);
	}
}
