// crates.io
use percent_encoding::percent_decode_str;
use time::OffsetDateTime;
// self
use sas_courier::auth::{KeyName, Namespace, SasKey, SigningRequest, TokenSigner};

// Reference values computed once with an independent HMAC-SHA256 implementation for
// namespace `sb-test`, path `document-queue`, key `dGVzdGtleQ==` (raw UTF-8, not
// base64-decoded), issued at unix 1700000000 with a 3600-second window.
const REFERENCE_URI: &str = "https%3A%2F%2Fsb-test.servicebus.windows.net%2Fdocument-queue";
const REFERENCE_SIGNATURE: &str = "po/NhhN/v46Wdua/JiIbhXiFdPYy3JVsgiO2eghuIzY%3D";
const REFERENCE_HEADER: &str = "SharedAccessSignature \
	sr=https%3A%2F%2Fsb-test.servicebus.windows.net%2Fdocument-queue\
	&sig=po/NhhN/v46Wdua/JiIbhXiFdPYy3JVsgiO2eghuIzY%3D\
	&se=1700003600\
	&skn=RootManageSharedAccessKey";

fn instant(unix: i64) -> OffsetDateTime {
	OffsetDateTime::from_unix_timestamp(unix).expect("Fixture instant should be in range.")
}

fn reference_request() -> SigningRequest {
	SigningRequest::new(
		Namespace::new("sb-test").expect("Failed to build reference namespace."),
		"document-queue",
		KeyName::new("RootManageSharedAccessKey").expect("Failed to build reference key name."),
	)
	.with_issued_at(instant(1_700_000_000))
}

fn signer_for(key: &str) -> TokenSigner {
	TokenSigner::new(SasKey::new(key).expect("Failed to build signer key."))
}

#[test]
fn known_answer_token_matches_the_reference_vector() {
	let token = signer_for("dGVzdGtleQ==")
		.sign(&reference_request())
		.expect("Reference request should sign successfully.");

	assert_eq!(token.resource_uri, REFERENCE_URI);
	assert_eq!(token.expires_at.unix_timestamp(), 1_700_003_600);
	assert_eq!(token.signature(), REFERENCE_SIGNATURE);
	assert_eq!(token.authorization_header(), REFERENCE_HEADER);
}

#[test]
fn signing_is_deterministic_for_a_pinned_instant() {
	let signer = signer_for("dGVzdGtleQ==");
	let first =
		signer.sign(&reference_request()).expect("First signing attempt should succeed.");
	let second =
		signer.sign(&reference_request()).expect("Second signing attempt should succeed.");

	assert_eq!(first.authorization_header(), second.authorization_header());
}

#[test]
fn single_byte_key_changes_flip_the_signature() {
	let baseline = signer_for("dGVzdGtleQ==")
		.sign(&reference_request())
		.expect("Baseline request should sign successfully.");
	let flipped = signer_for("dGVzdGtleQ=-")
		.sign(&reference_request())
		.expect("Flipped-key request should sign successfully.");

	assert_ne!(baseline.signature(), flipped.signature());
	// Independently computed for the flipped key.
	assert_eq!(flipped.signature(), "0HllOCSdZkzwWvyAbQNHpLDcqjJS96hdIW3HiZzB6c4%3D");
}

#[test]
fn resource_uri_round_trips_through_percent_decoding() {
	let token = signer_for("dGVzdGtleQ==")
		.sign(&reference_request())
		.expect("Reference request should sign successfully.");
	let decoded = percent_decode_str(&token.resource_uri)
		.decode_utf8()
		.expect("Encoded resource URI should decode as UTF-8.");

	assert_eq!(decoded, "https://sb-test.servicebus.windows.net/document-queue");
}

// Digests containing `+` must escape it as `%2B` while `/` stays bare; this key/instant
// pair produces both characters in one signature.
#[test]
fn plus_and_slash_survive_the_asymmetric_signature_encoding() {
	let request = SigningRequest::new(
		Namespace::new("sb-doc-class").expect("Failed to build vector namespace."),
		"document-queue",
		KeyName::new("RootManageSharedAccessKey").expect("Failed to build vector key name."),
	)
	.with_issued_at(instant(1_764_130_250));
	let token = signer_for("s3cr3t-key")
		.sign(&request)
		.expect("Vector request should sign successfully.");

	assert_eq!(token.expires_at.unix_timestamp(), 1_764_133_850);
	assert_eq!(token.signature(), "PQrhMIdNAb%2BqfhtQCNpwBOLvSkeHjcNeUm6mfL/ukcQ%3D");
}
