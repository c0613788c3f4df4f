//! Queue descriptor module shared by signing and submission flows.

pub mod descriptor;

pub use descriptor::*;
