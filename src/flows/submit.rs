//! Single-shot message submission with fresh per-call tokens.
//!
//! [`Courier::submit`] signs a token, serializes the payload, and performs exactly one
//! HTTP POST. Non-2xx responses are NOT errors at this layer; they come back inside
//! [`SubmissionResult`] with the status and body surfaced verbatim so diagnostic
//! callers can print them. Use [`SubmissionResult::ensure_accepted`] to convert
//! rejections into the typed error taxonomy.

/// Submission outcome counters.
pub mod metrics;

pub use metrics::SubmitMetrics;

// self
use crate::{
	_prelude::*,
	auth::SasToken,
	error::{ConfigError, TransportError},
	flows::Courier,
	http::{QueueHttpClient, QueueRequest},
	message::DocumentMessage,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Result of a single delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
	/// `true` when the endpoint returned a 2xx status.
	pub succeeded: bool,
	/// HTTP status code returned by the endpoint.
	pub status_code: u16,
	/// Response body surfaced verbatim for diagnostics.
	pub response_body: String,
	/// Retry-After hint, when upstream supplied one.
	pub retry_after: Option<Duration>,
}
impl SubmissionResult {
	/// Converts a rejected submission into the matching [`Error`] variant.
	///
	/// 401/403 map to [`Error::AuthorizationRejected`]; other non-2xx statuses map to
	/// [`Error::UnexpectedStatus`]. Accepted results pass through unchanged.
	pub fn ensure_accepted(self) -> Result<Self> {
		if self.succeeded {
			return Ok(self);
		}

		match self.status_code {
			status @ (401 | 403) =>
				Err(Error::AuthorizationRejected { status, body: self.response_body }),
			status => Err(Error::UnexpectedStatus { status, body: self.response_body }),
		}
	}
}

impl<C> Courier<C>
where
	C: ?Sized + QueueHttpClient,
{
	/// Signs a fresh token and performs exactly one delivery attempt.
	pub async fn submit(&self, message: &DocumentMessage) -> Result<SubmissionResult> {
		let token = self.signer.sign(&self.descriptor.signing_request())?;

		self.submit_with_token(&token, message).await
	}

	/// Performs one delivery attempt with a caller-supplied token.
	///
	/// The token must be unexpired; expired tokens fail locally before any network I/O.
	/// No retry, backoff, or idempotency handling happens here: at most one HTTP
	/// request is attempted, and a timeout means "not acknowledged", not "not
	/// delivered".
	pub async fn submit_with_token(
		&self,
		token: &SasToken,
		message: &DocumentMessage,
	) -> Result<SubmissionResult> {
		const KIND: FlowKind = FlowKind::Submit;

		let span = FlowSpan::new(KIND, "submit");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
		self.submit_metrics.record_attempt();

		let result = span
			.instrument(async move {
				let now = OffsetDateTime::now_utc();

				if token.is_expired_at(now) {
					return Err(ConfigError::TokenExpired { expired_at: token.expires_at }.into());
				}

				let url = self.descriptor.messages_url().map_err(ConfigError::from)?;
				let body = serde_json::to_vec(message).map_err(ConfigError::from)?;
				let request =
					QueueRequest { url, authorization: token.authorization_header(), body };
				let response = self
					.http_client
					.submit(request)
					.await
					.map_err(TransportError::network)?;

				Ok(SubmissionResult {
					succeeded: response.is_success(),
					status_code: response.status,
					response_body: response.body,
					retry_after: response.retry_after,
				})
			})
			.await;

		match &result {
			Ok(submission) if submission.succeeded => {
				obs::record_flow_outcome(KIND, FlowOutcome::Success);
				self.submit_metrics.record_accepted();
			},
			_ => {
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);
				self.submit_metrics.record_rejected();
			},
		}

		result
	}
}
