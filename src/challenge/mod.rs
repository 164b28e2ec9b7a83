//! The challenge engine (spec components D and F): detection, extraction,
//! sandboxed evaluation, and resubmission of edge-protection interstitials.
//!
//! Submodules:
//! - [`detector`]: classifies a response (spec §4.D)
//! - [`extract`]: pulls script/form fields out of a `JsInterstitial` body
//! - [`solver`]: drives the detect→extract→evaluate→resubmit→verify state
//!   machine (spec §4.F)

pub mod detector;
pub mod extract;
pub mod solver;

use std::time::Duration;

/// `ChallengeKind` (spec §4.D): a closed, total tagged variant — no open
/// polymorphism, per spec §9's redesign note replacing "class-based dynamic
/// dispatch for challenges".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    JsInterstitial,
    Interactive,
    ManagedWait,
    RateLimited,
}

/// What the [`detector`] saw and why it classified the response the way it
/// did, plus whether the body scan was cut short.
#[derive(Debug, Clone, Default)]
pub struct DetectionEvidence {
    pub markers: Vec<&'static str>,
    /// `true` when the body was truncated at the detector's scan window
    /// before a full classification could be made with certainty — the
    /// Solver consults this before giving up (spec §4.D).
    pub evidence_incomplete: bool,
}

/// Outcome of the detector's classification (spec §4.D): either no
/// challenge, or a kind plus the evidence that fired.
#[derive(Debug, Clone)]
pub enum Detection {
    None,
    Challenge(ChallengeKind, DetectionEvidence),
}

impl Detection {
    pub fn kind(&self) -> Option<ChallengeKind> {
        match self {
            Detection::None => None,
            Detection::Challenge(kind, _) => Some(*kind),
        }
    }
}

/// Immutable once `success` is set (spec §3 invariant) — the solver builds
/// this up field-by-field internally but only ever exposes it to callers
/// after the outcome is final.
#[derive(Debug, Clone)]
pub struct ChallengeRecord {
    pub kind: ChallengeKind,
    pub detected_at: std::time::SystemTime,
    pub extracted_script: Option<String>,
    pub solution: Option<String>,
    pub solve_wall_time: Duration,
    pub success: bool,
    pub failure_cause: Option<crate::error::SharedCoreError>,
}
