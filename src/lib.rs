//! Shared-access-signature courier: sign time-bounded HMAC-SHA256 queue tokens and submit JSON
//! messages to Service Bus-style HTTP endpoints through one minimal, transport-agnostic client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod message;
pub mod obs;
pub mod queue;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{KeyName, Namespace, SasKey},
		flows::Courier,
		http::ReqwestQueueClient,
		queue::QueueDescriptor,
	};

	/// Courier type alias used by reqwest-backed integration tests.
	pub type ReqwestTestCourier = Courier<ReqwestQueueClient>;

	/// Shared-access key fixture used across signer vectors and transport tests.
	pub const TEST_KEY: &str = "dGVzdGtleQ==";

	/// Builds the `sb-test`/`document-queue` descriptor pointed at a mock submission endpoint.
	pub fn test_descriptor(endpoint: Url) -> QueueDescriptor {
		QueueDescriptor::builder(
			Namespace::new("sb-test").expect("Failed to build test namespace."),
		)
		.key_name(
			KeyName::new("RootManageSharedAccessKey").expect("Failed to build test key name."),
		)
		.endpoint_override(endpoint)
		.build()
		.expect("Failed to build test queue descriptor.")
	}

	/// Constructs a [`Courier`] backed by the default reqwest transport and the fixture key.
	pub fn build_reqwest_test_courier(endpoint: Url) -> ReqwestTestCourier {
		Courier::new(
			test_descriptor(endpoint),
			SasKey::new(TEST_KEY).expect("Failed to build test shared-access key."),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, hash_map::DefaultHasher},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::{Hash, Hasher},
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, sas_courier as _, tokio as _};
