//! High-level submission flows powered by the courier.

pub mod submit;

#[cfg(feature = "retry")] mod retry;

pub use submit::*;

// self
use crate::{
	_prelude::*,
	auth::{SasKey, TokenSigner},
	http::QueueHttpClient,
	queue::QueueDescriptor,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestQueueClient;

#[cfg(feature = "reqwest")]
/// Courier specialized for the crate's default reqwest transport.
pub type ReqwestCourier = Courier<ReqwestQueueClient>;

/// Coordinates token signing and message submission against a single queue descriptor.
///
/// The courier owns the HTTP client, the pure signer, and the descriptor so flow
/// implementations can focus on delivery semantics. It is stateless across calls:
/// every submission signs a fresh token and performs exactly one independent unit of
/// work, so cloned couriers can be used from many tasks without coordination.
#[derive(Clone)]
pub struct Courier<C>
where
	C: ?Sized + QueueHttpClient,
{
	/// HTTP client wrapper used for every outbound queue request.
	pub http_client: Arc<C>,
	/// Queue descriptor defining the target entity and token parameters.
	pub descriptor: QueueDescriptor,
	/// Pure token signer owning the shared-access key.
	pub signer: TokenSigner,
	/// Shared counters for submission outcomes.
	pub submit_metrics: Arc<SubmitMetrics>,
}
impl<C> Courier<C>
where
	C: ?Sized + QueueHttpClient,
{
	/// Creates a courier that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: QueueDescriptor,
		key: SasKey,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			signer: TokenSigner::new(key),
			submit_metrics: Default::default(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl Courier<ReqwestQueueClient> {
	/// Creates a courier that provisions its own reqwest-backed transport.
	///
	/// Use [`Courier::with_http_client`] to supply a preconfigured [`ReqwestQueueClient`]
	/// (for example one with a request timeout) instead.
	pub fn new(descriptor: QueueDescriptor, key: SasKey) -> Self {
		Self::with_http_client(descriptor, key, ReqwestQueueClient::default())
	}
}
impl<C> Debug for Courier<C>
where
	C: ?Sized + QueueHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Courier")
			.field("descriptor", &self.descriptor)
			.field("signer", &self.signer)
			.finish()
	}
}
