#![cfg(all(feature = "reqwest", feature = "retry"))]

// crates.io
use httpmock::prelude::*;
// self
use sas_courier::{_preludet::*, auth::DocumentId, ext::BackoffPolicy, message::DocumentMessage};

fn test_message() -> DocumentMessage {
	DocumentMessage::new(
		Url::parse("https://stdocclass.blob.core.windows.net/documents/search-test.pdf")
			.expect("Failed to parse test blob URL."),
		DocumentId::new("sb-retry-rust").expect("Failed to build test document id."),
		"search-test.pdf",
	)
}

fn submission_endpoint(server: &MockServer) -> Url {
	Url::parse(&server.url("/document-queue/messages"))
		.expect("Mock submission endpoint should parse successfully.")
}

fn fast_policy(max_attempts: u32) -> BackoffPolicy {
	BackoffPolicy {
		max_attempts,
		initial_delay: Duration::milliseconds(5),
		max_delay: Duration::milliseconds(20),
		jitter: Duration::ZERO,
	}
}

#[tokio::test]
async fn server_errors_consume_the_whole_attempt_budget() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/document-queue/messages");
			then.status(503).body("service busy");
		})
		.await;
	let courier = build_reqwest_test_courier(submission_endpoint(&server));
	let result = courier
		.submit_with_retry(&fast_policy(3), &test_message())
		.await
		.expect("Exhausted retries still surface the final result.");

	assert!(!result.succeeded);
	assert_eq!(result.status_code, 503);
	assert_eq!(mock.hits_async().await, 3);
	assert_eq!(courier.submit_metrics.attempts(), 3);
}

#[tokio::test]
async fn authorization_rejections_are_never_retried() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/document-queue/messages");
			then.status(403).body("claim is invalid");
		})
		.await;
	let courier = build_reqwest_test_courier(submission_endpoint(&server));
	let result = courier
		.submit_with_retry(&fast_policy(5), &test_message())
		.await
		.expect("Rejections are results at this layer, not errors.");

	assert!(!result.succeeded);
	assert_eq!(result.status_code, 403);
	assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn accepted_submissions_stop_the_loop_immediately() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/document-queue/messages");
			then.status(201);
		})
		.await;
	let courier = build_reqwest_test_courier(submission_endpoint(&server));
	let result = courier
		.submit_with_retry(&fast_policy(5), &test_message())
		.await
		.expect("Accepted submission should complete.");

	assert!(result.succeeded);
	assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn recovery_mid_budget_returns_the_accepted_result() {
	let server = MockServer::start_async().await;
	let mut failing = server
		.mock_async(|when, then| {
			when.method(POST).path("/document-queue/messages");
			then.status(503).body("service busy");
		})
		.await;
	let courier = build_reqwest_test_courier(submission_endpoint(&server));
	let message = test_message();
	let send = tokio::spawn({
		let courier = courier.clone();
		let message = message.clone();

		async move { courier.submit_with_retry(&fast_policy(10), &message).await }
	});

	// Let a few attempts fail, then swap the endpoint to accept the next one. The
	// accepting mock is registered before the failing one is removed so no attempt can
	// fall through unmatched.
	while failing.hits_async().await < 2 {
		tokio::time::sleep(std::time::Duration::from_millis(2)).await;
	}

	let accepting = server
		.mock_async(|when, then| {
			when.method(POST).path("/document-queue/messages");
			then.status(201);
		})
		.await;

	failing.delete_async().await;

	let result = send
		.await
		.expect("Retry task should not panic.")
		.expect("Recovered submission should complete.");

	assert!(result.succeeded);
	assert_eq!(result.status_code, 201);
	assert_eq!(accepting.hits_async().await, 1);
}
