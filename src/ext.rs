//! Delivery policies kept separate from the pure signing logic.
//!
//! The crate's default remains create-once-use-once with exactly one delivery attempt
//! per call. These extensions layer production policies on top without touching the
//! signing path: a bounded backoff budget for the retrying flow and a cached token
//! source for callers that fan out many sends.

pub mod backoff;
pub mod token_source;

pub use backoff::*;
pub use token_source::*;
