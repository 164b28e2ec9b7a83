//! Concurrency Gate (spec component H).
//!
//! A bounded-permit admission pool shared across all `Session`s by default
//! (spec §4.H): `acquire_permit` blocks cooperatively (no spinning) until a
//! permit is free or `deadline` elapses, in FIFO order. Grounded on the
//! teacher's `socket::pool::ClientSocketPool` bounded-slot-with-queue
//! pattern, simplified from per-group priority queueing (pool.rs) to a flat
//! process-wide bound since spec §4.H's gate has no priority concept — just
//! "FIFO with per-request deadline" — which is exactly `tokio::sync::Semaphore`'s
//! acquire order.

use crate::error::CoreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// A held admission slot. Dropping it returns the permit to the pool
/// (spec §3 `Permit`/`Ticket` invariant: held for exactly the lifetime of
/// one in-flight request).
pub struct Permit {
    _inner: OwnedPermitGuard,
}

/// Bounded-permit pool. Cheap to clone (wraps an `Arc`); share one instance
/// across `Session`s to get the process-wide gate spec §4.H describes as the
/// default, or give each `Session` its own for per-Session bounding.
#[derive(Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    in_flight: Arc<AtomicUsize>,
}

impl ConcurrencyGate {
    /// `capacity` is the total number of permits (spec default 1,000).
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently checked out.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Number of permits currently available.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Acquire a permit, honoring `deadline` as a relative duration from now.
    /// A request whose deadline elapses while queued returns
    /// `CoreError::GateBusy` without ever touching the network (spec §4.H).
    pub async fn acquire_permit(&self, deadline: Duration) -> Result<Permit, CoreError> {
        let semaphore = self.semaphore.clone();
        let acquire = semaphore.acquire_owned();
        let result = tokio::time::timeout(deadline, acquire).await;
        match result {
            Ok(Ok(inner)) => {
                self.in_flight.fetch_add(1, Ordering::Relaxed);
                Ok(Permit { _inner: OwnedPermitGuard::new(inner, self.in_flight.clone()) })
            }
            Ok(Err(_closed)) => Err(CoreError::GateBusy),
            Err(_elapsed) => Err(CoreError::GateBusy),
        }
    }
}

/// Wraps the raw owned permit so dropping it also decrements `in_flight`,
/// which otherwise only the semaphore itself would track.
struct OwnedPermitGuard {
    permit: Option<tokio::sync::OwnedSemaphorePermit>,
    in_flight: Arc<AtomicUsize>,
}

impl OwnedPermitGuard {
    fn new(permit: tokio::sync::OwnedSemaphorePermit, in_flight: Arc<AtomicUsize>) -> Self {
        Self { permit: Some(permit), in_flight }
    }
}

impl Drop for OwnedPermitGuard {
    fn drop(&mut self) {
        self.permit.take();
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }
}
