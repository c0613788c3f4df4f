//! Demonstrates the bounded-retry flow against a mock endpoint that keeps returning
//! HTTP 503, showing how the budget is consumed and the final result surfaced.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use sas_courier::{
	auth::{DocumentId, Namespace, SasKey},
	ext::BackoffPolicy,
	flows::ReqwestCourier,
	message::DocumentMessage,
	queue::QueueDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let busy_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/document-queue/messages");
			then.status(503).header("retry-after", "1").body("service busy");
		})
		.await;
	let descriptor = QueueDescriptor::builder(Namespace::new("sb-demo")?)
		.endpoint_override(Url::parse(&server.url("/document-queue/messages"))?)
		.build()?;
	let courier = ReqwestCourier::new(descriptor, SasKey::new("ZGVtby1rZXk=")?);
	let message = DocumentMessage::new(
		Url::parse("https://stdocclass.blob.core.windows.net/documents/search-test.pdf")?,
		DocumentId::new("sb-demo-retry")?,
		"search-test.pdf",
	)
	.with_property("Origin", "demo");
	let policy = BackoffPolicy::with_max_attempts(3);
	let result = courier.submit_with_retry(&policy, &message).await?;

	println!(
		"Final outcome after {} attempts: HTTP {} ({}).",
		courier.submit_metrics.attempts(),
		result.status_code,
		result.response_body,
	);

	busy_mock.assert_hits_async(3).await;

	Ok(())
}
