// std
use std::sync::{
	Arc,
	atomic::{AtomicU32, Ordering},
};
// self
use sas_courier::{
	auth::{DocumentId, Namespace, SasKey},
	error::Error,
	flows::Courier,
	http::{QueueCallFuture, QueueHttpClient, QueueRequest, QueueResponse},
	message::DocumentMessage,
	queue::QueueDescriptor,
	url::Url,
};

#[derive(Debug)]
enum FakeTransportError {
	ConnectionReset,
}
impl std::fmt::Display for FakeTransportError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset."),
		}
	}
}
impl std::error::Error for FakeTransportError {}

/// Fails the first `failures_before_success` calls, then accepts with HTTP 201.
struct FlakyQueueClient {
	failures_before_success: u32,
	calls: AtomicU32,
}
impl FlakyQueueClient {
	fn new(failures_before_success: u32) -> Self {
		Self { failures_before_success, calls: AtomicU32::new(0) }
	}
}
impl QueueHttpClient for FlakyQueueClient {
	type TransportError = FakeTransportError;

	fn submit(&self, _request: QueueRequest) -> QueueCallFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let call = self.calls.fetch_add(1, Ordering::SeqCst);

			if call < self.failures_before_success {
				Err(FakeTransportError::ConnectionReset)
			} else {
				Ok(QueueResponse { status: 201, body: String::new(), retry_after: None })
			}
		})
	}
}

fn build_courier(client: Arc<FlakyQueueClient>) -> Courier<FlakyQueueClient> {
	let descriptor = QueueDescriptor::builder(
		Namespace::new("sb-test").expect("Failed to build test namespace."),
	)
	.build()
	.expect("Failed to build test queue descriptor.");

	Courier::with_http_client(
		descriptor,
		SasKey::new("dGVzdGtleQ==").expect("Failed to build test shared-access key."),
		client,
	)
}

fn test_message() -> DocumentMessage {
	DocumentMessage::new(
		Url::parse("https://stdocclass.blob.core.windows.net/documents/search-test.pdf")
			.expect("Failed to parse test blob URL."),
		DocumentId::new("sb-fake-transport").expect("Failed to build test document id."),
		"search-test.pdf",
	)
}

#[tokio::test]
async fn transport_failures_surface_as_transport_errors() {
	let client = Arc::new(FlakyQueueClient::new(u32::MAX));
	let courier = build_courier(client.clone());
	let err = courier
		.submit(&test_message())
		.await
		.expect_err("Transport failure must not produce a submission result.");

	assert!(matches!(err, Error::Transport(_)));
	assert_eq!(client.calls.load(Ordering::SeqCst), 1);
	assert_eq!(courier.submit_metrics.rejected(), 1);
}

#[cfg(feature = "retry")]
mod retry {
	// crates.io
	use time::Duration;
	// self
	use super::*;
	use sas_courier::ext::BackoffPolicy;

	fn fast_policy(max_attempts: u32) -> BackoffPolicy {
		BackoffPolicy {
			max_attempts,
			initial_delay: Duration::milliseconds(2),
			max_delay: Duration::milliseconds(10),
			jitter: Duration::ZERO,
		}
	}

	#[tokio::test]
	async fn transport_failures_consume_the_attempt_budget() {
		let client = Arc::new(FlakyQueueClient::new(u32::MAX));
		let courier = build_courier(client.clone());
		let err = courier
			.submit_with_retry(&fast_policy(3), &test_message())
			.await
			.expect_err("Exhausted transport retries must surface the last error.");

		assert!(matches!(err, Error::Transport(_)));
		assert_eq!(client.calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn recovery_after_transport_failures_returns_the_accepted_result() {
		let client = Arc::new(FlakyQueueClient::new(2));
		let courier = build_courier(client.clone());
		let result = courier
			.submit_with_retry(&fast_policy(5), &test_message())
			.await
			.expect("Recovered submission should complete.");

		assert!(result.succeeded);
		assert_eq!(result.status_code, 201);
		assert_eq!(client.calls.load(Ordering::SeqCst), 3);
		assert_eq!(courier.submit_metrics.attempts(), 3);
		assert_eq!(courier.submit_metrics.accepted(), 1);
		assert_eq!(courier.submit_metrics.rejected(), 2);
	}
}
