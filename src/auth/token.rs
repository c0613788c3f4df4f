//! Signed token model and `Authorization` header rendering.

// self
use crate::{_prelude::*, auth::KeyName};

/// Authorization scheme prefix for rendered tokens.
pub const TOKEN_SCHEME: &str = "SharedAccessSignature";

/// Time-bounded shared-access token derived from a signing request.
///
/// Tokens have no identity beyond their rendered string form. They are meant to be
/// created fresh per submission and discarded afterwards; the receiving service accepts
/// them only until the expiry instant.
#[derive(Clone, PartialEq, Eq)]
pub struct SasToken {
	/// Percent-encoded canonical resource URI (`sr` field).
	pub resource_uri: String,
	/// Expiry instant, rendered as unix seconds in the `se` field.
	pub expires_at: OffsetDateTime,
	/// Percent-encoded base64 HMAC digest (`sig` field).
	pub(crate) signature: String,
	/// Shared-access policy name (`skn` field).
	pub key_name: KeyName,
}
impl SasToken {
	/// Renders the value presented in the `Authorization` header.
	pub fn authorization_header(&self) -> String {
		format!(
			"{TOKEN_SCHEME} sr={}&sig={}&se={}&skn={}",
			self.resource_uri,
			self.signature,
			self.expires_at.unix_timestamp(),
			self.key_name,
		)
	}

	/// Percent-encoded signature field. Callers must avoid logging this string.
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// Remaining validity relative to `instant`; negative once expired.
	pub fn remaining_validity(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}

	/// Returns `true` once `instant` reaches the expiry instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Convenience check against the current UTC clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}
impl Debug for SasToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SasToken")
			.field("resource_uri", &self.resource_uri)
			.field("expires_at", &self.expires_at)
			.field("signature", &"<redacted>")
			.field("key_name", &self.key_name)
			.finish()
	}
}
