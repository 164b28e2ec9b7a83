//! Fingerprint Profile (spec component A).
//!
//! A profile is pure data plus deterministic assembly rules: given
//! `(profile, target URL, user overrides)` it yields the exact header
//! sequence a request must carry. The TLS/H2 side of the same profile lives
//! in [`crate::emulation`] (`Emulation::tls_options`/`http2_options`), built
//! by the teacher's `emulation::profiles::chrome` module; this module adds
//! the catalog-by-name lookup and the header composition contract spec §4.A
//! requires on top of it.
//!
//! Only one profile ships built-in, per spec §9's resolution of the open
//! question ("an implementer must choose one concrete profile to ship"):
//! `"chrome-124-desktop-windows"`. Additional profiles are a data-only
//! extension (add a match arm in [`lookup`]); there is no registration API
//! because the catalog is process-wide immutable data, not mutable state.

use crate::emulation::profiles::chrome::Chrome;
use crate::emulation::{Emulation, EmulationFactory};
use crate::error::CoreError;
use crate::http::orderedheaders::OrderedHeaderMap;
use http::Method;
use url::Url;

/// The exact order spec §3 names for the default request header template.
/// `Host`/`:authority` and `Cookie` are not in this list: they are derived
/// per-request from the URL and the session's cookie jar, not static profile
/// data, and are appended after the template (rule 2).
pub const HEADER_TEMPLATE_ORDER: [&str; 12] = [
    "sec-ch-ua",
    "sec-ch-ua-mobile",
    "sec-ch-ua-platform",
    "upgrade-insecure-requests",
    "user-agent",
    "accept",
    "sec-fetch-site",
    "sec-fetch-mode",
    "sec-fetch-user",
    "sec-fetch-dest",
    "accept-encoding",
    "accept-language",
];

/// An immutable, named fingerprint profile (spec §3 `FingerprintProfile`).
///
/// Cheap to clone (an `Arc`-free value type wrapping [`Emulation`], which is
/// itself cheap); a [`crate::session::Session`] holds one for its lifetime
/// and it never mutates — "refreshing" a profile means building a new
/// `Session` (spec §3 invariant).
#[derive(Clone)]
pub struct FingerprintProfile {
    name: &'static str,
    chrome_major: u32,
    emulation: Emulation,
}

impl FingerprintProfile {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn chrome_major(&self) -> u32 {
        self.chrome_major
    }

    pub fn emulation(&self) -> &Emulation {
        &self.emulation
    }
}

/// Look up a built-in profile by name. The only name guaranteed to exist is
/// `"chrome-124-desktop-windows"` (an alias, `"chrome-124"`, is accepted for
/// convenience). Unknown names are a configuration error, not a panic or a
/// silent fallback — mirrors `SessionConfigBuilder::build`'s closed-field
/// validation (spec §9 "dynamic typing of configuration" redesign note).
pub fn lookup(name: &str) -> Result<FingerprintProfile, CoreError> {
    match name {
        "chrome-124-desktop-windows" | "chrome-124" => Ok(FingerprintProfile {
            name: "chrome-124-desktop-windows",
            chrome_major: 124,
            emulation: Chrome::V124.emulation(),
        }),
        other => Err(CoreError::ConfigError {
            detail: format!("unknown fingerprint profile \"{other}\""),
        }),
    }
}

/// `compose_request_headers(profile, url, method, body_present, user_overrides)`
/// from spec §4.A. Rules, in order:
///
/// 1. Start with the profile's default template, in [`HEADER_TEMPLATE_ORDER`].
/// 2. Substitute `Host` from the URL (appended; HTTP/2's `:authority`
///    pseudo-header is synthesized by the H2 layer from the same URL, not by
///    this function, since pseudo-headers aren't representable in an
///    `OrderedHeaderMap` of regular header fields).
/// 3. If a body is present and the caller has not already set
///    `Content-Length`/`Transfer-Encoding` in `user_overrides`, reserve the
///    `Content-Length` slot (the exact byte count is filled in by
///    `HttpNetworkTransaction` once the body bytes are known; this function
///    only decides whether the slot should exist and where).
/// 4. Apply `user_overrides` last. `OrderedHeaderMap::insert` updates in
///    place when the name already exists, so a header present in the
///    template keeps its template position even when overridden — exactly
///    rule 4's "preserving the position of any header already in the
///    template".
/// 5. Header names are never lowercased by *this* function beyond what the
///    profile template already specifies; note that the `http` crate (and
///    therefore `hyper`'s H1/H2 codecs) mandates ASCII-lowercase
///    `HeaderName`s at the type level, so case-sensitive wire fingerprinting
///    of header *names* is outside what this transport stack can emulate —
///    documented in `DESIGN.md` as a known limitation shared with the
///    teacher's existing header-handling code.
pub fn compose_request_headers(
    profile: &FingerprintProfile,
    url: &Url,
    _method: &Method,
    body_present: bool,
    user_overrides: &[(String, String)],
) -> Result<OrderedHeaderMap, CoreError> {
    let mut out = OrderedHeaderMap::new();
    let invalid = |_| CoreError::ProtocolError {
        detail: "invalid header name or value while composing profile headers".to_string(),
    };

    for name in HEADER_TEMPLATE_ORDER {
        if let Some(value) = profile.emulation.headers().get(name) {
            if let Ok(s) = value.to_str() {
                out.insert(name, s).map_err(invalid)?;
            }
        }
    }

    if let Some(host) = url.host_str() {
        out.insert("host", host).map_err(invalid)?;
    }

    let has_length_or_encoding = user_overrides.iter().any(|(k, _)| {
        k.eq_ignore_ascii_case("content-length") || k.eq_ignore_ascii_case("transfer-encoding")
    });
    if body_present && !has_length_or_encoding {
        out.insert("content-length", "0").map_err(invalid)?;
    }

    for (k, v) in user_overrides {
        out.insert(k, v).map_err(invalid)?;
    }

    Ok(out)
}
