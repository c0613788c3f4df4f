//! Sends one document-classification message with environment-sourced configuration,
//! mirroring a one-shot diagnostic invocation against a real namespace.
//!
//! Required: `SERVICE_BUS_SAS_KEY`. Optional: `SERVICE_BUS_NAMESPACE`,
//! `SERVICE_BUS_KEY_NAME`, `SERVICE_BUS_QUEUE`.

// std
use std::env;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use sas_courier::{
	auth::{DocumentId, KeyName, Namespace, SasKey},
	flows::ReqwestCourier,
	message::DocumentMessage,
	queue::QueueDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let namespace =
		env::var("SERVICE_BUS_NAMESPACE").unwrap_or_else(|_| "sb-doc-class".into());
	let key_name = env::var("SERVICE_BUS_KEY_NAME")
		.unwrap_or_else(|_| "RootManageSharedAccessKey".into());
	let queue = env::var("SERVICE_BUS_QUEUE").unwrap_or_else(|_| "document-queue".into());
	let key = env::var("SERVICE_BUS_SAS_KEY")?;
	let descriptor = QueueDescriptor::builder(Namespace::new(namespace)?)
		.resource_path(queue)
		.key_name(KeyName::new(key_name)?)
		.build()?;
	let courier = ReqwestCourier::new(descriptor, SasKey::new(key)?);
	let message = DocumentMessage::new(
		Url::parse("https://stdocclass.blob.core.windows.net/documents/search-test.pdf")?,
		DocumentId::new("sb-test-rust")?,
		"search-test.pdf",
	);
	let result = courier.submit(&message).await?.ensure_accepted()?;

	println!("Queue accepted the message with HTTP {}.", result.status_code);

	Ok(())
}
