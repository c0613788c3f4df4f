//! Transport primitives for queue message submission.
//!
//! The module exposes [`QueueHttpClient`] so downstream crates can integrate custom
//! HTTP stacks without pulling this crate's default transport. Implementations perform
//! exactly one POST per call and must not retry internally; delivery policy belongs to
//! the flows layered above. Response status, body, and any `Retry-After` hint are
//! captured verbatim so callers can classify outcomes themselves.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::_prelude::*;

/// Content type attached to every submission request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Boxed future returned by [`QueueHttpClient::submit`].
pub type QueueCallFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<QueueResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of delivering one queue message per call.
///
/// The trait is the crate's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so couriers can be shared across tasks, and the returned
/// future must own whatever state it needs to remain `Send` for the in-flight request.
pub trait QueueHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes a single authenticated POST against the submission endpoint.
	fn submit(&self, request: QueueRequest) -> QueueCallFuture<'_, Self::TransportError>;
}

/// Outbound message-submission request.
#[derive(Clone, Debug)]
pub struct QueueRequest {
	/// Fully-qualified submission endpoint URL.
	pub url: Url,
	/// Rendered `Authorization` header value.
	pub authorization: String,
	/// UTF-8 JSON payload bytes.
	pub body: Vec<u8>,
}

/// Response captured from the queue endpoint.
#[derive(Clone, Debug)]
pub struct QueueResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body, surfaced verbatim for diagnostics.
	pub body: String,
	/// Retry-After hint expressed as a relative duration, if upstream supplied one.
	pub retry_after: Option<Duration>,
}
impl QueueResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Submission requests do not follow redirects or carry cookies; configure any custom
/// [`ReqwestClient`] with a request timeout so hung submissions surface as
/// [`TransportError`](crate::error::TransportError) instead of blocking the caller.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestQueueClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestQueueClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestQueueClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestQueueClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl QueueHttpClient for ReqwestQueueClient {
	type TransportError = ReqwestError;

	fn submit(&self, request: QueueRequest) -> QueueCallFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.post(request.url)
				.header(AUTHORIZATION, request.authorization)
				.header(CONTENT_TYPE, CONTENT_TYPE_JSON)
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.text().await?;

			Ok(QueueResponse { status, body, retry_after })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(secs as i64));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
