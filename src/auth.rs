//! Auth-domain identifiers, key material, token models, and the signer.

pub mod id;
pub mod key;
pub mod signer;
pub mod token;

pub use id::*;
pub use key::*;
pub use signer::*;
pub use token::*;
