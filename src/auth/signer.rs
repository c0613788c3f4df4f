//! SAS construction: percent-encoding sets, signing requests, and the token signer.
//!
//! The signature is computed over `percentEncode(resourceUri) + "\n" + expiry` with
//! HMAC-SHA256, keyed by the shared-access key's UTF-8 bytes. Two percent-encoding
//! conventions coexist by service contract: the resource URI uses the plus-for-space
//! convention with `:` and `/` escaped, while the base64 signature bytes use the plain
//! convention that leaves `/` bare and escapes `+`/`=`. The asymmetry must never be
//! normalized away; the receiving service validates against exactly this chain.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{KeyName, Namespace, SasKey, SasToken},
	error::ConfigError,
	obs::{FlowKind, FlowSpan},
};

/// Host suffix appended to the namespace unless a sovereign-cloud suffix is supplied.
pub const DEFAULT_DOMAIN_SUFFIX: &str = "servicebus.windows.net";
/// Validity window applied when the caller does not override it.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::seconds(3_600);

type HmacSha256 = Hmac<Sha256>;

/// Escapes applied to the canonical resource URI (`sr` field): everything except
/// unreserved ASCII and space, which maps to `+` afterwards.
const RESOURCE_URI_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~').remove(b' ');
/// Escapes applied to the base64 signature (`sig` field): everything except unreserved
/// ASCII and `/`, so `+` and the `=` padding are escaped while `/` stays bare.
const SIGNATURE_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~').remove(b'/');

/// Percent-encodes the canonical resource URI with the plus-for-space convention.
pub(crate) fn encode_resource_uri(uri: &str) -> String {
	utf8_percent_encode(uri, RESOURCE_URI_ENCODE_SET).to_string().replace(' ', "+")
}

/// Percent-encodes signature bytes with the plain convention, keeping `/` bare.
pub(crate) fn encode_signature(base64: &str) -> String {
	utf8_percent_encode(base64, SIGNATURE_ENCODE_SET).to_string()
}

/// Immutable input to token creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningRequest {
	/// Queue namespace the token grants access to.
	pub namespace: Namespace,
	/// Entity path under the namespace (queue or topic name).
	pub resource_path: String,
	/// Host suffix appended to the namespace.
	pub domain_suffix: String,
	/// Shared-access policy name the signature is attributed to.
	pub key_name: KeyName,
	/// Validity window applied relative to the issued-at instant.
	pub validity_window: Duration,
	/// Fixed issued-at instant for deterministic signing; defaults to the current clock.
	pub issued_at: Option<OffsetDateTime>,
}
impl SigningRequest {
	/// Creates a request with the default domain suffix and validity window.
	pub fn new(
		namespace: Namespace,
		resource_path: impl Into<String>,
		key_name: KeyName,
	) -> Self {
		Self {
			namespace,
			resource_path: resource_path.into(),
			domain_suffix: DEFAULT_DOMAIN_SUFFIX.into(),
			key_name,
			validity_window: DEFAULT_VALIDITY_WINDOW,
			issued_at: None,
		}
	}

	/// Overrides the validity window (defaults to one hour).
	pub fn with_validity_window(mut self, window: Duration) -> Self {
		self.validity_window = window;

		self
	}

	/// Pins the issued-at instant used for expiry computation.
	pub fn with_issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Overrides the host suffix for sovereign-cloud namespaces.
	pub fn with_domain_suffix(mut self, suffix: impl Into<String>) -> Self {
		self.domain_suffix = suffix.into();

		self
	}

	/// Canonical `https://{namespace}.{suffix}/{path}` string the signature covers.
	///
	/// The raw formatted string is signed, not a URL-normalized form; parsing is used
	/// for validation only.
	pub fn resource_uri(&self) -> Result<String, ConfigError> {
		let canonical =
			format!("https://{}.{}/{}", self.namespace, self.domain_suffix, self.resource_path);

		Url::parse(&canonical).map_err(|e| ConfigError::InvalidResourceUri { source: e })?;

		Ok(canonical)
	}
}

/// Pure token-construction component owning the shared-access key.
///
/// Signing performs no network I/O and never validates the key against the service;
/// an invalid or revoked key surfaces later as an authorization rejection.
#[derive(Clone)]
pub struct TokenSigner {
	key: SasKey,
}
impl TokenSigner {
	/// Creates a signer for the provided key.
	pub fn new(key: SasKey) -> Self {
		Self { key }
	}

	/// Derives a fresh [`SasToken`] for the request.
	///
	/// Deterministic given identical inputs and an identical pinned issued-at instant.
	/// Each call produces exactly one token for one use; callers issuing requests more
	/// than a few seconds apart must sign again.
	pub fn sign(&self, request: &SigningRequest) -> Result<SasToken> {
		let _guard = FlowSpan::new(FlowKind::Sign, "sign").entered();

		if request.validity_window <= Duration::ZERO {
			return Err(ConfigError::NonPositiveValidity.into());
		}

		let canonical = request.resource_uri()?;
		let resource_uri = encode_resource_uri(&canonical);
		let issued_at = request.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expiry = issued_at
			.unix_timestamp()
			.checked_add(request.validity_window.whole_seconds())
			.ok_or(ConfigError::ExpiryOutOfRange)?;
		let expires_at =
			OffsetDateTime::from_unix_timestamp(expiry).map_err(|_| ConfigError::ExpiryOutOfRange)?;
		let string_to_sign = format!("{resource_uri}\n{expiry}");
		let mut mac = HmacSha256::new_from_slice(self.key.expose().as_bytes())
			.expect("HMAC-SHA256 accepts keys of any length.");

		mac.update(string_to_sign.as_bytes());

		let signature = encode_signature(&BASE64_STANDARD.encode(mac.finalize().into_bytes()));

		Ok(SasToken { resource_uri, expires_at, signature, key_name: request.key_name.clone() })
	}
}
impl Debug for TokenSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSigner").field("key", &"<redacted>").finish()
	}
}
