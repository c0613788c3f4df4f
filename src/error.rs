//! Courier-level error types shared across signing, flows, and transports.

// self
use crate::_prelude::*;

/// Courier-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical courier error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or signing-input problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Queue endpoint rejected the shared-access signature (HTTP 401/403).
	#[error("Queue endpoint rejected the authorization token with HTTP {status}.")]
	AuthorizationRejected {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Response body surfaced verbatim for diagnostics.
		body: String,
	},
	/// Queue endpoint returned a non-2xx status outside the authorization family.
	#[error("Queue endpoint returned unexpected HTTP {status}.")]
	UnexpectedStatus {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Response body surfaced verbatim for diagnostics.
		body: String,
	},
}

/// Signing-input and configuration failures raised before any network activity.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Shared-access keys carry the HMAC secret and must not be empty.
	#[error("Shared-access key must not be empty.")]
	EmptyKey,
	/// Namespace and resource path do not combine into a parseable resource URI.
	#[error("Namespace and resource path do not form a valid resource URI.")]
	InvalidResourceUri {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token validity windows are relative to the signing instant and must be positive.
	#[error("Token validity window must be positive.")]
	NonPositiveValidity,
	/// The computed expiry instant fell outside the supported timestamp range.
	#[error("The computed token expiry exceeds the supported timestamp range.")]
	ExpiryOutOfRange,
	/// Token expired before the submission was attempted.
	#[error("Token expired at {expired_at} before the submission was attempted.")]
	TokenExpired {
		/// Expiry instant of the rejected token.
		expired_at: OffsetDateTime,
	},
	/// Message payload could not be serialized to JSON.
	#[error("Message payload could not be serialized to JSON.")]
	SerializeMessage(#[from] serde_json::Error),
	/// Queue descriptor failed validation.
	#[error("Queue descriptor failed validation.")]
	Descriptor(#[from] crate::queue::QueueDescriptorError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the queue endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the queue endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
