//! Authentication-domain types: shared secret, principal, verbs, and freshness.

pub mod freshness;
pub mod method;
pub mod principal;
pub mod secret;

pub use freshness::*;
pub use method::*;
pub use principal::*;
pub use secret::*;
