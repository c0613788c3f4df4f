//! Cached token source that re-signs before expiry with a safety margin.
//!
//! Create-once-use-once remains the default submission path; this source exists for
//! callers that fan out many sends within one validity window and want to amortize
//! signing without ever presenting a stale token. The refresh margin is jittered
//! deterministically per resource so co-located couriers do not re-sign in lockstep.

// self
use crate::{
	_prelude::*,
	auth::{SasToken, SigningRequest, TokenSigner},
};

/// Cached [`SasToken`] provider governed by a freshness margin.
///
/// Tokens handed out by the source are always stamped at the refresh instant; a pinned
/// `issued_at` on the seeded request is ignored.
pub struct CachedTokenSource {
	signer: TokenSigner,
	request: SigningRequest,
	margin: Duration,
	slot: Mutex<Option<SasToken>>,
}
impl CachedTokenSource {
	const DEFAULT_MARGIN: Duration = Duration::seconds(60);

	/// Creates a source with the default 60-second refresh margin.
	pub fn new(signer: TokenSigner, request: SigningRequest) -> Self {
		Self { signer, request, margin: Self::DEFAULT_MARGIN, slot: Mutex::new(None) }
	}

	/// Overrides the refresh margin (negative values collapse to zero).
	pub fn with_margin(mut self, margin: Duration) -> Self {
		self.margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Returns a token that outlives the effective margin, re-signing when needed.
	pub fn token(&self) -> Result<SasToken> {
		self.token_at(OffsetDateTime::now_utc())
	}

	/// Clock-injected variant of [`CachedTokenSource::token`].
	pub fn token_at(&self, now: OffsetDateTime) -> Result<SasToken> {
		let mut slot = self.slot.lock();

		if let Some(token) = slot.as_ref() {
			if !self.should_refresh(token, now) {
				return Ok(token.clone());
			}
		}

		let request = SigningRequest { issued_at: Some(now), ..self.request.clone() };
		let token = self.signer.sign(&request)?;

		*slot = Some(token.clone());

		Ok(token)
	}

	fn should_refresh(&self, token: &SasToken, now: OffsetDateTime) -> bool {
		if token.is_expired_at(now) {
			return true;
		}

		let margin = self.effective_margin();

		if margin.is_zero() {
			return false;
		}

		token.remaining_validity(now) <= margin
	}

	fn effective_margin(&self) -> Duration {
		self.margin.checked_sub(self.margin_jitter()).unwrap_or(Duration::ZERO)
	}

	fn margin_jitter(&self) -> Duration {
		let margin_secs = self.margin.whole_seconds();

		if margin_secs <= 1 {
			return Duration::ZERO;
		}

		let modulus = u64::try_from(margin_secs).unwrap_or(u64::MAX);
		let jitter_secs = self.jitter_seed() % modulus;

		if jitter_secs == 0 {
			return Duration::ZERO;
		}

		let clamped = i64::try_from(jitter_secs).unwrap_or(i64::MAX);

		Duration::seconds(clamped)
	}

	fn jitter_seed(&self) -> u64 {
		let mut hasher = DefaultHasher::new();

		self.request.namespace.hash(&mut hasher);
		self.request.resource_path.hash(&mut hasher);
		self.request.key_name.hash(&mut hasher);

		hasher.finish()
	}
}
impl Debug for CachedTokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedTokenSource")
			.field("signer", &self.signer)
			.field("request", &self.request)
			.field("margin", &self.margin)
			.finish()
	}
}
