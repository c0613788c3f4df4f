//! Queue descriptor data structures, builder, and validation.
//!
//! A descriptor pins down everything needed to address one queue entity: namespace,
//! entity path, shared-access policy name, token validity window, and (for tests or
//! private gateways) an optional submission endpoint override. The secret key is NOT
//! part of the descriptor; callers pass it to the courier separately so descriptors
//! stay safe to log and serialize.

// self
use crate::{
	_prelude::*,
	auth::{DEFAULT_DOMAIN_SUFFIX, DEFAULT_VALIDITY_WINDOW, KeyName, Namespace, SigningRequest},
};

/// Entity path used when the caller does not override it.
pub const DEFAULT_RESOURCE_PATH: &str = "document-queue";
/// Shared-access policy name used when the caller does not override it.
pub const DEFAULT_KEY_NAME: &str = "RootManageSharedAccessKey";

/// Errors raised while constructing or validating queue descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum QueueDescriptorError {
	/// Resource path is mandatory for all flows.
	#[error("Missing resource path.")]
	EmptyResourcePath,
	/// Resource path contains a character that would corrupt the resource URI.
	#[error("Resource path contains the disallowed character {character:?}.")]
	InvalidResourcePath {
		/// Offending character.
		character: char,
	},
	/// Validity window must be positive.
	#[error("Validity window must be positive.")]
	NonPositiveValidity,
	/// Namespace + path must combine into a parseable resource URI.
	#[error("Descriptor does not form a valid resource URI.")]
	InvalidResourceUri {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint overrides must use HTTPS unless they target loopback.
	#[error("The endpoint override must use HTTPS: {url}.")]
	InsecureEndpointOverride {
		/// Override URL that failed validation.
		url: String,
	},
}

/// Immutable queue descriptor consumed by signing and submission flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDescriptor {
	/// Queue namespace (left-most host label of the resource URI).
	pub namespace: Namespace,
	/// Entity path under the namespace.
	pub resource_path: String,
	/// Host suffix appended to the namespace.
	pub domain_suffix: String,
	/// Shared-access policy name presented in the token.
	pub key_name: KeyName,
	/// Token validity window.
	pub validity_window: Duration,
	/// Optional submission URL override used verbatim instead of the derived
	/// `…/messages` URL; intended for tests and private gateways.
	pub endpoint_override: Option<Url>,
}
impl QueueDescriptor {
	/// Creates a new builder for the provided namespace.
	pub fn builder(namespace: Namespace) -> QueueDescriptorBuilder {
		QueueDescriptorBuilder::new(namespace)
	}

	/// Canonical resource URI string the token signature covers.
	pub fn resource_uri(&self) -> String {
		format!("https://{}.{}/{}", self.namespace, self.domain_suffix, self.resource_path)
	}

	/// Fully-qualified message-submission URL (`…/messages`, or the override verbatim).
	pub fn messages_url(&self) -> Result<Url, QueueDescriptorError> {
		if let Some(url) = &self.endpoint_override {
			return Ok(url.clone());
		}

		Url::parse(&format!("{}/messages", self.resource_uri()))
			.map_err(|e| QueueDescriptorError::InvalidResourceUri { source: e })
	}

	/// Signing request seeded from this descriptor.
	pub fn signing_request(&self) -> SigningRequest {
		SigningRequest::new(self.namespace.clone(), &self.resource_path, self.key_name.clone())
			.with_domain_suffix(&self.domain_suffix)
			.with_validity_window(self.validity_window)
	}

	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), QueueDescriptorError> {
		validate_resource_path(&self.resource_path)?;

		if self.validity_window <= Duration::ZERO {
			return Err(QueueDescriptorError::NonPositiveValidity);
		}

		Url::parse(&self.resource_uri())
			.map_err(|e| QueueDescriptorError::InvalidResourceUri { source: e })?;

		if let Some(url) = &self.endpoint_override {
			validate_endpoint_override(url)?;
		}

		Ok(())
	}
}

/// Builder for [`QueueDescriptor`] values.
#[derive(Debug)]
pub struct QueueDescriptorBuilder {
	/// Namespace for the descriptor being constructed.
	pub namespace: Namespace,
	/// Entity path under the namespace (defaults to `document-queue`).
	pub resource_path: String,
	/// Host suffix appended to the namespace.
	pub domain_suffix: String,
	/// Shared-access policy name (defaults to `RootManageSharedAccessKey`).
	pub key_name: Option<KeyName>,
	/// Token validity window (defaults to one hour).
	pub validity_window: Duration,
	/// Optional submission endpoint override.
	pub endpoint_override: Option<Url>,
}
impl QueueDescriptorBuilder {
	/// Creates a new builder seeded with the provided namespace and crate defaults.
	pub fn new(namespace: Namespace) -> Self {
		Self {
			namespace,
			resource_path: DEFAULT_RESOURCE_PATH.into(),
			domain_suffix: DEFAULT_DOMAIN_SUFFIX.into(),
			key_name: None,
			validity_window: DEFAULT_VALIDITY_WINDOW,
			endpoint_override: None,
		}
	}

	/// Sets the entity path.
	pub fn resource_path(mut self, path: impl Into<String>) -> Self {
		self.resource_path = path.into();

		self
	}

	/// Overrides the host suffix for sovereign-cloud namespaces.
	pub fn domain_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.domain_suffix = suffix.into();

		self
	}

	/// Sets the shared-access policy name.
	pub fn key_name(mut self, key_name: KeyName) -> Self {
		self.key_name = Some(key_name);

		self
	}

	/// Overrides the token validity window.
	pub fn validity_window(mut self, window: Duration) -> Self {
		self.validity_window = window;

		self
	}

	/// Sets the submission endpoint override.
	pub fn endpoint_override(mut self, url: Url) -> Self {
		self.endpoint_override = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<QueueDescriptor, QueueDescriptorError> {
		let key_name = match self.key_name {
			Some(key_name) => key_name,
			None => KeyName::new(DEFAULT_KEY_NAME)
				.expect("Default key name is a valid identifier."),
		};
		let descriptor = QueueDescriptor {
			namespace: self.namespace,
			resource_path: self.resource_path,
			domain_suffix: self.domain_suffix,
			key_name,
			validity_window: self.validity_window,
			endpoint_override: self.endpoint_override,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

fn validate_resource_path(path: &str) -> Result<(), QueueDescriptorError> {
	if path.is_empty() {
		return Err(QueueDescriptorError::EmptyResourcePath);
	}
	if path.starts_with('/') || path.ends_with('/') {
		return Err(QueueDescriptorError::InvalidResourcePath { character: '/' });
	}
	if let Some(character) =
		path.chars().find(|&c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '#'))
	{
		return Err(QueueDescriptorError::InvalidResourcePath { character });
	}

	Ok(())
}

fn validate_endpoint_override(url: &Url) -> Result<(), QueueDescriptorError> {
	if url.scheme() == "https" || is_loopback(url) {
		Ok(())
	} else {
		Err(QueueDescriptorError::InsecureEndpointOverride { url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
