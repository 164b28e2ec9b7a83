//! Request Pipeline (spec component J): the public entry point's
//! orchestration. `Session::request` is a thin wrapper around [`run`],
//! which flows a [`SessionRequest`] through the Gate (H) → Rate Limiter (G)
//! → fingerprint/cookie composition (I) → Transport (B) → Detector (D) →
//! Solver (F), exactly the sequence spec §4.J numbers, as one flat async
//! function rather than a callback chain (spec §9's "coroutine control
//! flow" redesign note): `Permit`/`Ticket` are held in local bindings for
//! the whole function and released by `Drop` on every exit path, including
//! the early `?` returns for `OriginDenied`/`GateBusy`/`DeadlineExceeded`.

use crate::challenge::detector;
use crate::challenge::solver::{self, ReissueRequest, ReissuedResponse};
use crate::challenge::{ChallengeKind, ChallengeRecord, Detection};
use crate::config::ChallengeSolveMode;
use crate::error::{CoreError, NetErrorExt, PartialResponse};
use crate::event::{Event, Timing};
use crate::fingerprint;
use crate::http::requestbody::RequestBody;
use crate::http::retry::RetryConfig;
use crate::session::{Session, SessionRequest, SessionResponse};
use crate::urlrequest::job::URLRequestHttpJob;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::time::{Duration, Instant, SystemTime};
use url::Url;

/// What one transport round-trip (spec component B) yielded, stripped down
/// to what the Detector/Solver need plus the URL actually reached (after
/// this job's own redirect following).
struct RawExecution {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    final_url: Url,
}

/// A GET/HEAD request with an empty body is safe to retry per spec §7; any
/// other method, or one carrying a body that may already have been sent on
/// the wire, is not (spec §8 property 10, "no retry on non-idempotent
/// bodies").
fn idempotent_retry_config(method: &Method, body: &RequestBody) -> RetryConfig {
    let idempotent = matches!(*method, Method::GET | Method::HEAD);
    if idempotent && body.is_empty() {
        RetryConfig { max_attempts: 2, base_delay_ms: 250, max_delay_ms: 1000, jitter_factor: 0.0 }
    } else {
        RetryConfig::no_retry()
    }
}

/// Runs one transport round-trip: composes profile headers over
/// `user_headers`, builds a fresh [`URLRequestHttpJob`] (which follows its
/// own redirects and absorbs/attaches cookies via the session's jar as it
/// goes, per `HttpNetworkTransaction`), and materializes the response body
/// so the Detector has something to scan. Also feeds the response status to
/// the session's `RateLimiter` so 429/503 adaptation (spec §4.G) applies to
/// every round-trip of a logical request, not just the first.
async fn execute_once(
    session: &Session,
    method: Method,
    url: Url,
    user_headers: Vec<(String, String)>,
    body: RequestBody,
    deadline: Duration,
) -> Result<RawExecution, CoreError> {
    let composed = fingerprint::compose_request_headers(
        &session.profile,
        &url,
        &method,
        !body.is_empty(),
        &user_headers,
    )?;

    let mut job = URLRequestHttpJob::new(session.factory.clone(), url.clone(), session.cookie_jar.clone());
    job.set_method(method.clone());
    job.set_body(body.clone());
    job.set_max_redirects(session.config.follow_redirects.min(u8::MAX as u32) as u8);
    job.set_retry_config(idempotent_retry_config(&method, &body));
    if let Some(h2_opts) = session.profile.emulation().http2_options() {
        job.set_h2_fingerprint(h2_opts.to_h2_fingerprint());
    }
    for (name, value) in composed.iter() {
        if let Ok(v) = value.to_str() {
            job.add_header(name.as_str(), v);
        }
    }

    match tokio::time::timeout(deadline, job.start()).await {
        Err(_elapsed) => return Err(CoreError::DeadlineExceeded { partial: None }),
        Ok(Err(net_err)) => return Err(net_err.into_core_error(None)),
        Ok(Ok(())) => {}
    }

    let final_url = job.current_url().clone();
    let mut response = job
        .take_response()
        .ok_or_else(|| crate::base::neterror::NetError::ConnectionClosed.into_core_error(None))?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .bytes()
        .await
        .map_err(|e| e.into_core_error(Some(PartialResponse { status, headers: headers.clone() })))?;

    if let Some(origin) = origin_of(&final_url) {
        if let Some(new_rate) = session.rate_limiter.observe_response(&origin, status).await {
            session.events.emit(Event::RateLimitAdjusted { origin, new_rate });
        }
    }

    Ok(RawExecution { status, headers, body, final_url })
}

fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let port = url.port_or_known_default().unwrap_or(0);
    Some(format!("{host}:{port}"))
}

/// The Request Pipeline proper (spec §4.J steps 1-10).
#[tracing::instrument(skip(session, request), fields(method = %request.method, url = %request.url))]
pub async fn run(session: &Session, request: SessionRequest) -> Result<SessionResponse, CoreError> {
    let overall_start = Instant::now();
    let deadline = request.deadline.unwrap_or(session.config.default_deadline);
    let deadline_at = overall_start + deadline;
    let remaining = move || deadline_at.saturating_duration_since(Instant::now());

    // Step 1: Permit = Gate.acquire(deadline) or fail GateBusy.
    let _permit = session.gate.acquire_permit(remaining()).await?;

    // Step 2: origin whitelist, before any network activity (spec §4.I / S5).
    let host = request
        .url
        .host_str()
        .ok_or_else(|| CoreError::ProtocolError { detail: "request URL has no host".to_string() })?
        .to_string();
    if let Some(whitelist) = &session.config.origin_whitelist {
        if !whitelist.contains(&host) {
            return Err(CoreError::OriginDenied { host });
        }
    }

    // Step 3: Ticket = RateLimiter.acquire(origin, deadline).
    let origin = origin_of(&request.url)
        .ok_or_else(|| CoreError::ProtocolError { detail: "request URL has no resolvable origin".to_string() })?;
    let _ticket = session.rate_limiter.acquire(&origin, remaining()).await?;

    let request_id = session.next_request_id();
    session.events.emit(Event::RequestStarted { request_id, origin: origin.clone() });
    session.note_request_issued();

    // Steps 4-6: compose headers, attach cookies (inside the transaction),
    // execute, absorb Set-Cookie (also inside the transaction).
    let raw = execute_once(
        session,
        request.method.clone(),
        request.url.clone(),
        request.headers.clone(),
        request.body.clone(),
        remaining(),
    )
    .await?;

    // Step 7: classify.
    let decision = detector::classify(raw.status, &raw.headers, &raw.body, false);

    let (final_raw, challenge_record) = match decision {
        Detection::None => (raw, None),
        Detection::Challenge(kind, _evidence) => {
            session.note_challenge_seen();
            if session.cookie_jar.has_valid_clearance(&request.url) {
                // A tagged clearance cookie is already good (spec §4.C): skip
                // the Solver entirely rather than re-running detect→extract→
                // evaluate→resubmit→verify for a challenge the edge should
                // not have posed in the first place.
                (raw, Some(already_cleared_record(kind)))
            } else if session.config.challenge_solve == ChallengeSolveMode::Off {
                (raw, Some(unsolved_record(kind)))
            } else {
                let original = ReissueRequest {
                    method: request.method.clone(),
                    url: request.url.clone(),
                    extra_headers: request.headers.clone(),
                    body: request.body.clone(),
                };
                let initial = ReissuedResponse { status: raw.status, headers: raw.headers.clone(), body: raw.body.clone() };
                let resolver = match session.config.challenge_solve {
                    ChallengeSolveMode::ExternalInteractive => session.interactive_resolver.as_deref(),
                    _ => None,
                };
                let reissue = |r: ReissueRequest| async move {
                    let exec = execute_once(session, r.method, r.url, r.extra_headers, r.body, remaining()).await?;
                    Ok(ReissuedResponse { status: exec.status, headers: exec.headers, body: exec.body })
                };
                let (solved, record) = solver::solve(
                    original,
                    kind,
                    initial,
                    reissue,
                    &session.solver_config,
                    resolver,
                    session.events.as_ref(),
                    request_id,
                )
                .await;
                if record.success {
                    session.note_challenge_solved();
                }
                let final_raw = RawExecution {
                    status: solved.status,
                    headers: solved.headers,
                    body: solved.body,
                    final_url: raw.final_url,
                };
                (final_raw, Some(record))
            }
        }
    };

    let total = overall_start.elapsed();
    session.events.emit(Event::RequestCompleted { request_id, timing: timing_for(total), status: final_raw.status });

    if let Some(record) = &challenge_record {
        if !record.success {
            if let Some(cause) = &record.failure_cause {
                return Err((**cause).clone());
            }
        }
    }

    Ok(SessionResponse {
        status: final_raw.status,
        headers: final_raw.headers,
        body: final_raw.body,
        final_url: final_raw.final_url,
        timing: timing_for(total),
        challenge: challenge_record,
        session_id: session.id(),
    })
}

/// A challenge the detector flagged but the jar's existing tagged clearance
/// cookie already covers (spec §4.C's "skip redundant solves" fast path):
/// reported to the caller as solved, without a single Solver step run.
fn already_cleared_record(kind: ChallengeKind) -> ChallengeRecord {
    ChallengeRecord {
        kind,
        detected_at: SystemTime::now(),
        extracted_script: None,
        solution: None,
        solve_wall_time: Duration::ZERO,
        success: true,
        failure_cause: None,
    }
}

/// A challenge detected under `ChallengeSolveMode::Off`: reported to the
/// caller, never attempted.
fn unsolved_record(kind: ChallengeKind) -> ChallengeRecord {
    ChallengeRecord {
        kind,
        detected_at: SystemTime::now(),
        extracted_script: None,
        solution: None,
        solve_wall_time: Duration::ZERO,
        success: false,
        failure_cause: None,
    }
}

/// Phase timings beyond total wall time (DNS/connect/TLS handshake/first
/// byte) require instrumentation hooks in `socket::connectjob`/`socket::tls`
/// this transport stack does not yet expose; left `None` until that
/// instrumentation lands (see `DESIGN.md`).
fn timing_for(total: Duration) -> Timing {
    Timing { dns: None, connect: None, tls_handshake: None, first_byte: None, total }
}
