//! Shared-access key wrapper that redacts sensitive material.

// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted shared-access key keeping the HMAC secret out of logs.
///
/// The key string is hashed as raw UTF-8 bytes, exactly as supplied; base64-looking
/// values are NOT decoded first.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SasKey(String);
impl SasKey {
	/// Wraps a new key after rejecting empty values.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		if value.is_empty() {
			return Err(ConfigError::EmptyKey);
		}

		Ok(Self(value))
	}

	/// Returns the inner key material. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl TryFrom<String> for SasKey {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for SasKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SasKey").field(&"<redacted>").finish()
	}
}
impl Display for SasKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn key_formatters_redact() {
		let key = SasKey::new("dGVzdGtleQ==").expect("Failed to build key fixture.");

		assert_eq!(format!("{key:?}"), "SasKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");
	}

	#[test]
	fn empty_keys_are_rejected() {
		assert!(matches!(SasKey::new(""), Err(ConfigError::EmptyKey)));
		assert!(serde_json::from_str::<SasKey>("\"\"").is_err());
	}
}
