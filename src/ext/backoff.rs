//! Exponential backoff budget consulted between delivery attempts.

// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

/// Bounded exponential backoff with jitter for the retrying submission flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackoffPolicy {
	/// Maximum delivery attempts, including the first.
	pub max_attempts: u32,
	/// Delay before the second attempt; doubles each attempt after that.
	pub initial_delay: Duration,
	/// Upper bound applied to computed delays and server hints alike.
	pub max_delay: Duration,
	/// Maximum random jitter added on top of each computed delay.
	pub jitter: Duration,
}
impl BackoffPolicy {
	/// Creates a policy with the provided attempt budget and crate defaults otherwise.
	pub fn with_max_attempts(max_attempts: u32) -> Self {
		Self { max_attempts, ..Self::default() }
	}

	/// Returns `true` for statuses worth retrying (408, 429, and the 5xx family).
	pub const fn retryable_status(status: u16) -> bool {
		matches!(status, 408 | 429) || status >= 500
	}

	/// Delay before the next attempt, or `None` once the attempt budget is exhausted.
	///
	/// `attempt` counts completed attempts starting at 1. A server-supplied hint wins
	/// over the computed delay; both are clamped to `max_delay`.
	pub fn delay_for(&self, attempt: u32, server_hint: Option<Duration>) -> Option<Duration> {
		if attempt >= self.max_attempts {
			return None;
		}
		if let Some(hint) = server_hint {
			return Some(hint.clamp(Duration::ZERO, self.max_delay));
		}

		// Exponent capped so the shift cannot overflow before max_delay clamps it.
		let exponent = attempt.saturating_sub(1).min(16);
		let base = self.initial_delay.saturating_mul(2_i32.saturating_pow(exponent));

		Some(base.min(self.max_delay).saturating_add(self.random_jitter()))
	}

	fn random_jitter(&self) -> Duration {
		let cap = i64::try_from(self.jitter.whole_milliseconds()).unwrap_or(i64::MAX);

		if cap <= 0 {
			return Duration::ZERO;
		}

		Duration::milliseconds(rand::rng().random_range(0..=cap))
	}
}
impl Default for BackoffPolicy {
	fn default() -> Self {
		Self {
			max_attempts: 4,
			initial_delay: Duration::milliseconds(250),
			max_delay: Duration::seconds(30),
			jitter: Duration::milliseconds(100),
		}
	}
}
