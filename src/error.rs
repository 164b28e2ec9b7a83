//! Top-level error taxonomy.
//!
//! `CoreError` is the single error type returned across the public surface
//! (`Session::request`, `Pipeline::run`, `Solver::solve`, …). Lower layers
//! raise their own narrower error types (`NetError` for transport/DNS/TLS,
//! `SandboxError` for JS evaluation) which are folded into `CoreError` at
//! the point they cross a subsystem boundary, the same way
//! `base::context::IoResultExt` folds `io::Error` into `NetError`.

use crate::base::neterror::NetError;
use crate::challenge::ChallengeKind;
use crate::sandbox::SandboxError;
use http::{HeaderMap, StatusCode};
use std::sync::Arc;
use thiserror::Error;

/// Snapshot of whatever response data was available when an error occurred,
/// for diagnostics. Populated only when the error was encountered at or
/// after the first byte of a response.
#[derive(Debug, Clone)]
pub struct PartialResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

/// The reason a [`ChallengeUnsolvable`](CoreError::ChallengeUnsolvable) was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsolvableReason {
    /// Detector classified the response as `Interactive`; solving requires a
    /// human or an `interactive_resolver` callback the session did not supply.
    Interactive,
    /// The challenge HTML/script could not be parsed.
    Extract,
    /// The JS sandbox could not evaluate the extracted script.
    Sandbox,
    /// The resubmission did not yield a clearance cookie or a clean 200.
    Verify,
    /// `max_attempts` was exhausted without success.
    MaxAttempts,
    /// The edge kept returning 429/503 through every retry attempt.
    RateLimited,
}

#[derive(Debug, Error, Clone)]
pub enum CoreError {
    #[error("transport error: {source}")]
    TransportError {
        #[source]
        source: NetError,
        retriable: bool,
        partial: Option<PartialResponse>,
    },

    #[error("request deadline exceeded")]
    DeadlineExceeded { partial: Option<PartialResponse> },

    #[error("redirect limit exceeded")]
    TooManyRedirects { limit: u32 },

    #[error("concurrency gate busy: no permit acquired before deadline")]
    GateBusy,

    #[error("origin {host} is not in the session whitelist")]
    OriginDenied { host: String },

    #[error("challenge could not be solved: {reason:?}")]
    ChallengeUnsolvable {
        reason: UnsolvableReason,
        kind: Option<ChallengeKind>,
    },

    #[error("sandbox wall-time limit exceeded")]
    SandboxTimeout,

    #[error("sandbox memory limit exceeded")]
    SandboxMemory,

    #[error("protocol error: {detail}")]
    ProtocolError { detail: String },

    #[error("invalid session configuration: {detail}")]
    ConfigError { detail: String },
}

impl CoreError {
    /// A short, stable code suitable for metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::TransportError { .. } => "transport_error",
            CoreError::DeadlineExceeded { .. } => "deadline_exceeded",
            CoreError::TooManyRedirects { .. } => "too_many_redirects",
            CoreError::GateBusy => "gate_busy",
            CoreError::OriginDenied { .. } => "origin_denied",
            CoreError::ChallengeUnsolvable { .. } => "challenge_unsolvable",
            CoreError::SandboxTimeout => "sandbox_timeout",
            CoreError::SandboxMemory => "sandbox_memory",
            CoreError::ProtocolError { .. } => "protocol_error",
            CoreError::ConfigError { .. } => "config_error",
        }
    }

    /// Whether this error class is safe to retry per spec's propagation policy
    /// (idempotent methods only, decided by the caller — this only reports
    /// whether the error itself is of a retriable transport class).
    pub fn is_retriable_transport(&self) -> bool {
        matches!(self, CoreError::TransportError { retriable: true, .. })
    }

    pub fn from_sandbox(err: SandboxError) -> Self {
        match err {
            SandboxError::Timeout => CoreError::SandboxTimeout,
            SandboxError::MemoryExceeded => CoreError::SandboxMemory,
            SandboxError::Evaluation(_) => CoreError::ChallengeUnsolvable {
                reason: UnsolvableReason::Sandbox,
                kind: None,
            },
        }
    }
}

/// Folds a lower-level [`NetError`] into a [`CoreError::TransportError`].
pub trait NetErrorExt {
    fn into_core_error(self, partial: Option<PartialResponse>) -> CoreError;
}

impl NetErrorExt for NetError {
    fn into_core_error(self, partial: Option<PartialResponse>) -> CoreError {
        let retriable = self.is_retriable();
        CoreError::TransportError {
            source: self,
            retriable,
            partial,
        }
    }
}

/// Cheaply shareable error, used where a `CoreError` needs to be stored
/// (e.g. in a `ChallengeRecord::failure_cause`) without forcing a clone of
/// large inner data.
pub type SharedCoreError = Arc<CoreError>;
