//! Strongly typed identifiers enforced across the courier domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $allowed:expr) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view, $allowed)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value, $allowed)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (namespace, key name, document).
		kind: &'static str,
	},
	/// The identifier contains a character outside its allowed set.
	#[error("{kind} identifier contains the disallowed character {character:?}.")]
	DisallowedCharacter {
		/// Kind of identifier (namespace, key name, document).
		kind: &'static str,
		/// Offending character.
		character: char,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (namespace, key name, document).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! {
	Namespace,
	"Queue namespace forming the left-most host label of the resource URI.",
	"Namespace",
	|c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}
def_id! {
	KeyName,
	"Shared-access policy name presented in the `skn` token field.",
	"KeyName",
	|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}
def_id! {
	DocumentId,
	"Caller-assigned correlation identifier attached to queue messages.",
	"DocumentId",
	|c: char| c.is_ascii_graphic()
}

fn validate_view(
	kind: &'static str,
	view: &str,
	allowed: impl Fn(char) -> bool,
) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if let Some(character) = view.chars().find(|&c| !allowed(c)) {
		return Err(IdentifierError::DisallowedCharacter { kind, character });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn namespaces_reject_host_breaking_characters() {
		assert!(Namespace::new("sb-doc-class-1764130250").is_ok());
		assert!(Namespace::new("").is_err(), "Empty namespaces must be rejected.");
		assert!(Namespace::new("sb.evil.example").is_err(), "Dots would splice host labels.");
		assert!(Namespace::new("sb/queue").is_err(), "Slashes would splice the URI path.");
		assert!(Namespace::new("SB-TEST").is_err(), "Host labels are signed lowercase.");
		assert!(Namespace::new("sb test").is_err());
	}

	#[test]
	fn key_names_stay_header_safe() {
		assert!(KeyName::new("RootManageSharedAccessKey").is_ok());
		assert!(KeyName::new("send-policy_v1.2").is_ok());
		assert!(KeyName::new("a&b").is_err(), "Ampersands would splice the token fields.");
		assert!(KeyName::new("a=b").is_err());
		assert!(KeyName::new("with space").is_err());
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let payload = "\"sb-test\"";
		let namespace: Namespace =
			serde_json::from_str(payload).expect("Namespace should deserialize successfully.");

		assert_eq!(namespace.as_ref(), "sb-test");
		assert!(serde_json::from_str::<Namespace>("\"sb test\"").is_err());
		assert!(serde_json::from_str::<DocumentId>("\"doc\\u0000id\"").is_err());
	}

	#[test]
	fn length_limits_apply() {
		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		DocumentId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(DocumentId::new(&too_long).is_err());
	}
}
