//! Queue message payload for the document-classification pipeline.

// self
use crate::{_prelude::*, auth::DocumentId};

/// JSON payload submitted to the queue endpoint.
///
/// Field names serialize in PascalCase to match the downstream consumer's contract.
/// The token construction never depends on message content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMessage {
	/// Fully-qualified blob location the consumer should classify.
	pub blob_url: Url,
	/// Caller-assigned correlation identifier.
	pub document_id: DocumentId,
	/// Original file name of the document.
	pub file_name: String,
	/// Additional diagnostic properties merged into the JSON object as-is.
	#[serde(flatten)]
	pub properties: BTreeMap<String, serde_json::Value>,
}
impl DocumentMessage {
	/// Creates a message with the three mandatory pipeline fields.
	pub fn new(blob_url: Url, document_id: DocumentId, file_name: impl Into<String>) -> Self {
		Self { blob_url, document_id, file_name: file_name.into(), properties: BTreeMap::new() }
	}

	/// Attaches an extra top-level property to the JSON object.
	pub fn with_property(
		mut self,
		key: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self.properties.insert(key.into(), value.into());

		self
	}
}
