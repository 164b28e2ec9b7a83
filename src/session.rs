//! Session (spec component I).
//!
//! Binds one immutable [`FingerprintProfile`](crate::fingerprint::FingerprintProfile),
//! one [`CookieMonster`](crate::cookies::monster::CookieMonster) jar, a
//! per-origin [`RateLimiter`](crate::ratelimit::RateLimiter), a
//! [`ConcurrencyGate`](crate::gate::ConcurrencyGate), and the
//! [`Solver`](crate::challenge::solver) configuration for a sequence of
//! related requests. Cheap to construct (no network I/O happens in
//! [`Session::new`]) — grounded on `client::Client`'s builder, generalized
//! from "one transport + cookie store" to the full spec §3 `Session`
//! composition plus the challenge engine and admission controls.
//!
//! Per spec §9's redesign note ("globally shared scraper singletons"),
//! `Session`s are independent and own their cookie jar and (by default)
//! their own `ConcurrencyGate`; [`Session::with_shared_gate`] opts into the
//! process-wide gate spec §4.H describes as the alternative.

use crate::challenge::solver::{self, InteractiveResolver};
use crate::challenge::ChallengeRecord;
use crate::config::SessionConfig;
use crate::cookies::monster::CookieMonster;
use crate::error::CoreError;
use crate::event::{EventSink, NullSink, Timing};
use crate::fingerprint::{self, FingerprintProfile};
use crate::gate::ConcurrencyGate;
use crate::http::requestbody::RequestBody;
use crate::http::streamfactory::HttpStreamFactory;
use crate::ratelimit::RateLimiter;
use crate::socket::pool::ClientSocketPool;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Opaque correlation token (spec §9 redesign note: "avoid strong
/// back-references"; `Response` carries this instead of a pointer back to
/// its `Session`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

fn next_session_id() -> SessionId {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    SessionId(COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// One request as accepted by [`Session::request`] (spec §3 `Request`).
/// `url`/`method`/`body` are required; everything else defaults.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Overrides `SessionConfig::default_deadline` for this request only.
    pub deadline: Option<Duration>,
}

impl SessionRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: Vec::new(), body: RequestBody::Empty, deadline: None }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    pub fn deadline(mut self, d: Duration) -> Self {
        self.deadline = Some(d);
        self
    }
}

/// One response as returned by [`Session::request`] (spec §3 `Response`).
/// The body is always materialized here: automatic challenge detection
/// requires inspecting response content, so the streaming mode spec §3
/// mentions as an alternative is left to callers who bypass `Session` and
/// drive [`crate::urlrequest::URLRequestHttpJob`] directly for a raw
/// streamed body (see `DESIGN.md`).
#[derive(Debug, Clone)]
pub struct SessionResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub final_url: Url,
    pub timing: Timing,
    pub challenge: Option<ChallengeRecord>,
    pub session_id: SessionId,
}

#[derive(Debug, Default)]
struct SessionCounters {
    requests_issued: AtomicU64,
    challenges_seen: AtomicU64,
    challenges_solved: AtomicU64,
}

/// Debug/export snapshot (spec §4.I `session.snapshot()`). No persistence
/// guarantees — this is for inspection, not serialization to disk (spec §1
/// explicitly excludes session persistence from the core).
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: SessionId,
    pub profile_name: &'static str,
    pub requests_issued: u64,
    pub challenges_seen: u64,
    pub challenges_solved: u64,
    pub cookies_stored: usize,
}

pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) profile: FingerprintProfile,
    pub(crate) cookie_jar: Arc<CookieMonster>,
    pub(crate) factory: Arc<HttpStreamFactory>,
    pub(crate) gate: ConcurrencyGate,
    pub(crate) rate_limiter: RateLimiter,
    pub(crate) config: SessionConfig,
    pub(crate) solver_config: solver::SolverConfig,
    pub(crate) interactive_resolver: Option<Arc<dyn InteractiveResolver>>,
    pub(crate) events: Arc<dyn EventSink>,
    counters: SessionCounters,
    next_request_id: AtomicU64,
}

impl Session {
    /// `new_session(config)` from spec §6. Validates nothing itself (the
    /// config arrived pre-validated from `SessionConfigBuilder::build`);
    /// looks up the named fingerprint profile and builds a fresh connection
    /// pool/gate/rate-limiter for this session.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let profile = fingerprint::lookup(&config.profile)?;
        let pool = Arc::new(ClientSocketPool::new(profile.emulation().tls_options().cloned()));
        let factory = Arc::new(HttpStreamFactory::new(pool));
        let gate = ConcurrencyGate::new(config.max_concurrency);
        let rate_limiter = RateLimiter::new(config.rate_per_second, config.rate_burst);
        let solver_config = solver::SolverConfig {
            max_attempts: 3,
            sandbox_limits: crate::sandbox::SandboxLimits {
                memory_bytes: config.sandbox_memory_limit,
                wall_time: config.sandbox_wall_time,
            },
        };
        Ok(Self {
            id: next_session_id(),
            profile,
            cookie_jar: Arc::new(CookieMonster::new()),
            factory,
            gate,
            rate_limiter,
            config,
            solver_config,
            interactive_resolver: None,
            events: Arc::new(NullSink),
            counters: SessionCounters::default(),
            next_request_id: AtomicU64::new(1),
        })
    }

    /// Opt into a `ConcurrencyGate` shared with other `Session`s (spec
    /// §4.H's process-wide-pool alternative), replacing the fresh
    /// per-session one `new` created.
    pub fn with_shared_gate(mut self, gate: ConcurrencyGate) -> Self {
        self.gate = gate;
        self
    }

    /// Install the `Interactive`-challenge resolver spec §6 describes
    /// (only consulted when `config.challenge_solve` is
    /// `ExternalInteractive`).
    pub fn with_interactive_resolver(mut self, resolver: Arc<dyn InteractiveResolver>) -> Self {
        self.interactive_resolver = Some(resolver);
        self
    }

    /// Subscribe an `EventSink` to this session's typed event stream (spec §6).
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    /// `session.request(request) → Response` (spec §4.I / §4.J).
    #[tracing::instrument(skip(self, request), fields(session_id = ?self.id, method = %request.method, url = %request.url))]
    pub async fn request(&self, request: SessionRequest) -> Result<SessionResponse, CoreError> {
        crate::pipeline::run(self, request).await
    }

    /// `session.batch(requests) → sequence of Response` (spec §6):
    /// preserves input order, executes subject to the session's
    /// concurrency and rate controls (each `request()` call already
    /// acquires its own `Permit`/`Ticket`, so running them concurrently
    /// here is bounded exactly the same as issuing them one at a time).
    pub async fn batch(&self, requests: Vec<SessionRequest>) -> Vec<Result<SessionResponse, CoreError>> {
        let futures = requests.into_iter().map(|r| self.request(r));
        futures::future::join_all(futures).await
    }

    /// `session.close() → void` (spec §4.I): releases pooled connections
    /// held by this session's transport. `HttpStreamFactory`'s pool is
    /// reference-counted per `(scheme, host, port, profile)`, so closing
    /// drops this session's share of it; connections with no remaining
    /// owner are torn down when their idle timeout elapses.
    pub fn close(&self) {
        self.factory.close_idle_connections();
    }

    /// `session.snapshot() → SessionState` (spec §4.I): debugging/export
    /// only, no persistence guarantees (spec §1 excludes disk persistence).
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            id: self.id,
            profile_name: self.profile.name(),
            requests_issued: self.counters.requests_issued.load(Ordering::Relaxed),
            challenges_seen: self.counters.challenges_seen.load(Ordering::Relaxed),
            challenges_solved: self.counters.challenges_solved.load(Ordering::Relaxed),
            cookies_stored: self.cookie_jar.total_cookie_count(),
        }
    }

    pub(crate) fn next_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn note_request_issued(&self) {
        self.counters.requests_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn note_challenge_seen(&self) {
        self.counters.challenges_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn note_challenge_solved(&self) {
        self.counters.challenges_solved.fetch_add(1, Ordering::Relaxed);
    }
}

/// `new_session(config) → Session` (spec §6's top-level entry point).
pub fn new_session(config: SessionConfig) -> Result<Session, CoreError> {
    Session::new(config)
}
