//! Typed event stream.
//!
//! The core never owns a logging backend or metrics exporter (spec §1
//! excludes those as external collaborators); instead it publishes
//! structural events an optional subscriber can turn into logs or metrics.
//! `tracing` spans/events carry the same fields for anyone consuming the
//! core as a `tracing::Subscriber` instead.

use crate::challenge::ChallengeKind;
use http::StatusCode;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Timing {
    pub dns: Option<Duration>,
    pub connect: Option<Duration>,
    pub tls_handshake: Option<Duration>,
    pub first_byte: Option<Duration>,
    pub total: Duration,
}

#[derive(Debug, Clone)]
pub enum Event {
    RequestStarted {
        request_id: u64,
        origin: String,
    },
    ChallengeDetected {
        request_id: u64,
        kind: ChallengeKind,
    },
    ChallengeSolved {
        request_id: u64,
        duration: Duration,
    },
    ChallengeFailed {
        request_id: u64,
        cause: String,
    },
    RateLimitAdjusted {
        origin: String,
        new_rate: f64,
    },
    RequestCompleted {
        request_id: u64,
        timing: Timing,
        status: StatusCode,
    },
}

/// A sink for [`Event`]s. `emit` must return promptly: the core calls it
/// synchronously on the request path and never awaits it, so a sink that
/// needs to do I/O (write to a file, push to a metrics collector) is
/// expected to queue internally rather than block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// An `EventSink` that drops every event. Used when a session is built
/// without an explicit sink.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}
