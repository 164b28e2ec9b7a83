//! TLS configuration and certificate pinning.

pub mod hsts;
pub mod pinning;

pub use hsts::{HstsEntry, HstsStore};
pub use pinning::{spki_hash, PinSet, PinStore, SpkiHash};
