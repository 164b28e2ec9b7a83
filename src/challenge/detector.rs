//! Challenge Detector (spec component D).
//!
//! Classifies a response in a single scan of at most `SCAN_WINDOW` bytes of
//! the body, O(body-scan), by the precedence spec §4.D lays out top to
//! bottom. Styled after `base::loadstate`'s small, total enum-classification
//! modules rather than anything stateful.

use super::{ChallengeKind, Detection, DetectionEvidence};
use http::{HeaderMap, StatusCode};

/// Minimum scan window spec §4.D requires (16 KiB); callers may hand in more
/// if the full body is already materialized and cheap to scan.
pub const MIN_SCAN_WINDOW: usize = 16 * 1024;

/// `Detector::classify(status, headers, body)` from spec §4.D.
///
/// `body_prefix` is the first `N ≥ MIN_SCAN_WINDOW` bytes of the response
/// body (or the whole body, if shorter); `body_truncated` tells the detector
/// whether more body existed beyond what it was given, so it can set
/// [`DetectionEvidence::evidence_incomplete`] for the Solver to consult.
pub fn classify(
    status: StatusCode,
    headers: &HeaderMap,
    body_prefix: &[u8],
    body_truncated: bool,
) -> Detection {
    let body = String::from_utf8_lossy(body_prefix);
    let server_is_cloudflare = header_contains(headers, "server", "cloudflare");

    // Rule 1: rate limited.
    let cf_mitigated_challenge = header_contains(headers, "cf-mitigated", "challenge");
    if status == StatusCode::TOO_MANY_REQUESTS || (cf_mitigated_challenge && status.as_u16() == 429) {
        let mut markers = vec!["status=429"];
        if cf_mitigated_challenge {
            markers.push("cf-mitigated: challenge");
        }
        return Detection::Challenge(
            ChallengeKind::RateLimited,
            DetectionEvidence { markers, evidence_incomplete: false },
        );
    }

    // Rule 2: JS interstitial.
    let has_challenge_platform = body.contains("/cdn-cgi/challenge-platform/");
    let has_chl_opt = body.contains("window._cf_chl_opt");
    if status == StatusCode::FORBIDDEN && server_is_cloudflare && has_challenge_platform && has_chl_opt {
        return Detection::Challenge(
            ChallengeKind::JsInterstitial,
            DetectionEvidence {
                markers: vec!["status=403", "server: cloudflare", "/cdn-cgi/challenge-platform/", "window._cf_chl_opt"],
                evidence_incomplete: body_truncated,
            },
        );
    }

    // Rule 3: interactive (Turnstile).
    if body.contains("cf-turnstile") {
        return Detection::Challenge(
            ChallengeKind::Interactive,
            DetectionEvidence { markers: vec!["cf-turnstile"], evidence_incomplete: body_truncated },
        );
    }

    // Rule 4: managed wait.
    let has_managed_token = body.contains("name=\"cf_chl_managed_tk\"") || body.contains("cType: 'managed'");
    if status == StatusCode::SERVICE_UNAVAILABLE && has_managed_token {
        return Detection::Challenge(
            ChallengeKind::ManagedWait,
            DetectionEvidence {
                markers: vec!["status=503", "managed-challenge form token"],
                evidence_incomplete: body_truncated,
            },
        );
    }

    // Rule 5: evidence was incomplete and the response otherwise looked like
    // it could be an interstitial that simply got cut off; still resolves to
    // `None` here (the Solver, not the detector, decides whether to give up
    // or re-fetch more body) but the markers record why we hesitated.
    Detection::None
}

fn header_contains(headers: &HeaderMap, name: &str, needle: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().contains(needle))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for (k, v) in pairs {
            h.insert(
                http::header::HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        h
    }

    #[test]
    fn none_for_plain_200() {
        let headers = headers_with(&[]);
        let d = classify(StatusCode::OK, &headers, b"ok", false);
        assert!(matches!(d, Detection::None));
    }

    #[test]
    fn rate_limited_on_429() {
        let headers = headers_with(&[]);
        let d = classify(StatusCode::TOO_MANY_REQUESTS, &headers, b"", false);
        assert_eq!(d.kind(), Some(ChallengeKind::RateLimited));
    }

    #[test]
    fn js_interstitial_requires_all_markers() {
        let headers = headers_with(&[("server", "cloudflare")]);
        let body = b"<html>window._cf_chl_opt = {}; /cdn-cgi/challenge-platform/h/b</html>";
        let d = classify(StatusCode::FORBIDDEN, &headers, body, false);
        assert_eq!(d.kind(), Some(ChallengeKind::JsInterstitial));
    }

    #[test]
    fn js_interstitial_not_detected_without_server_header() {
        let headers = headers_with(&[]);
        let body = b"window._cf_chl_opt = {}; /cdn-cgi/challenge-platform/h/b";
        let d = classify(StatusCode::FORBIDDEN, &headers, body, false);
        assert!(matches!(d, Detection::None));
    }

    #[test]
    fn interactive_turnstile_marker() {
        let headers = headers_with(&[]);
        let body = b"<div class=\"cf-turnstile\" data-sitekey=\"x\"></div>";
        let d = classify(StatusCode::OK, &headers, body, false);
        assert_eq!(d.kind(), Some(ChallengeKind::Interactive));
    }

    #[test]
    fn managed_wait_on_503_with_token() {
        let headers = headers_with(&[]);
        let body = b"<form><input name=\"cf_chl_managed_tk\" value=\"1\"></form>";
        let d = classify(StatusCode::SERVICE_UNAVAILABLE, &headers, body, false);
        assert_eq!(d.kind(), Some(ChallengeKind::ManagedWait));
    }

    #[test]
    fn truncated_evidence_is_flagged() {
        let headers = headers_with(&[("server", "cloudflare")]);
        let body = b"window._cf_chl_opt = {}; /cdn-cgi/challenge-platform/h/b";
        let d = classify(StatusCode::FORBIDDEN, &headers, body, true);
        match d {
            Detection::Challenge(_, evidence) => assert!(evidence.evidence_incomplete),
            Detection::None => panic!("expected a challenge classification"),
        }
    }

    #[test]
    fn precedence_rate_limited_before_js_interstitial() {
        // status 429 with cloudflare markers still classifies as RateLimited
        // (rule 1 precedes rule 2).
        let headers = headers_with(&[("server", "cloudflare"), ("cf-mitigated", "challenge")]);
        let body = b"window._cf_chl_opt = {}; /cdn-cgi/challenge-platform/h/b";
        let d = classify(StatusCode::TOO_MANY_REQUESTS, &headers, body, false);
        assert_eq!(d.kind(), Some(ChallengeKind::RateLimited));
    }
}
