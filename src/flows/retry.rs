//! Bounded-retry submission flow layered over the single-shot path.
//!
//! Every attempt signs a fresh token so expiry stays relative to the attempt instant.
//! Only transport failures and retryable statuses (408/429/5xx) consume the backoff
//! budget; authorization rejections and other 4xx statuses surface immediately, and a
//! server `Retry-After` hint takes precedence over the computed delay. The final
//! attempt's outcome is returned unchanged, so callers still see the verbatim status
//! and body once the budget runs out.

// self
use crate::{
	_prelude::*,
	ext::BackoffPolicy,
	flows::{Courier, SubmissionResult},
	http::QueueHttpClient,
	message::DocumentMessage,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Courier<C>
where
	C: ?Sized + QueueHttpClient,
{
	/// Submits with bounded retries under the provided backoff policy.
	pub async fn submit_with_retry(
		&self,
		policy: &BackoffPolicy,
		message: &DocumentMessage,
	) -> Result<SubmissionResult> {
		const KIND: FlowKind = FlowKind::SubmitRetry;

		let span = FlowSpan::new(KIND, "submit_with_retry");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut attempt = 0_u32;

				loop {
					attempt += 1;

					let delay = match self.submit(message).await {
						Ok(submission) if submission.succeeded => return Ok(submission),
						Ok(submission) => {
							if !BackoffPolicy::retryable_status(submission.status_code) {
								return Ok(submission);
							}

							match policy.delay_for(attempt, submission.retry_after) {
								Some(delay) => delay,
								None => return Ok(submission),
							}
						},
						Err(Error::Transport(source)) =>
							match policy.delay_for(attempt, None) {
								Some(delay) => delay,
								None => return Err(Error::Transport(source)),
							},
						Err(other) => return Err(other),
					};

					tokio::time::sleep(delay.unsigned_abs()).await;
				}
			})
			.await;

		match &result {
			Ok(submission) if submission.succeeded =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			_ => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
