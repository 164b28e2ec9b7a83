//! Cookie management.
//!
//! Session-scoped, in-memory cookie storage with RFC 6265 semantics:
//!
//! - **Storage**: cookie jar ([`CookieMonster`](monster::CookieMonster)) with LRU eviction
//! - **Representation**: single-cookie type ([`CanonicalCookie`](canonical_cookie::CanonicalCookie))
//! - **Public suffix validation**: [`psl`] guards against supercookie attacks
//!
//! No persistence to disk and no extraction of cookies from an installed
//! browser's own storage: this jar is owned by a [`crate::session::Session`]
//! and lives exactly as long as it does.

pub mod canonical_cookie;
pub mod monster;
pub mod psl;
