//! JS Sandbox (spec component E): a QuickJS interpreter with bounded memory,
//! bounded wall time, and no host surface beyond a minimal injected browser
//! shim. Grounded on `rquickjs`, the only JS-engine dependency anywhere in
//! the retrieval pack (see `other_examples/manifests/MikkoParkkola-nab`),
//! already pinned in `Cargo.toml`.
//!
//! A fresh [`rquickjs::Runtime`]/[`rquickjs::Context`] pair is created per
//! call to [`evaluate`] and torn down at the end of the call (spec §5:
//! "a fresh instance per challenge; never shared; torn down at `Evaluate`
//! exit") — nothing here is reused across challenges, so there is no
//! cross-challenge state for a script to capture.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Resource ceilings for one evaluation (spec §4.E defaults: 50 MiB, 10 s).
#[derive(Debug, Clone, Copy)]
pub struct SandboxLimits {
    pub memory_bytes: usize,
    pub wall_time: Duration,
}

impl Default for SandboxLimits {
    fn default() -> Self {
        Self { memory_bytes: 50 * 1024 * 1024, wall_time: Duration::from_secs(10) }
    }
}

/// The minimal browser shim injected as `window`/`document`/`navigator`
/// before evaluation (spec §4.E): only the fields real challenge scripts are
/// observed to read. Discarded with the `Context` at the end of the call.
#[derive(Debug, Clone, Default)]
pub struct ShimState {
    pub location_href: String,
    pub user_agent: String,
    pub platform: String,
}

#[derive(Debug, Error, Clone)]
pub enum SandboxError {
    #[error("sandbox wall-time limit exceeded")]
    Timeout,
    #[error("sandbox memory limit exceeded")]
    MemoryExceeded,
    #[error("sandbox evaluation error: {0}")]
    Evaluation(String),
}

/// `evaluate(script_source, shim_state, limits) → Result<serde_json::Value, SandboxError>`
/// (spec §4.E contract). Exceeding either limit aborts with a distinct error
/// and no partial solution is ever returned — the function either returns a
/// fully-evaluated value or an error, never a partially-applied one, since
/// the whole `Runtime` is dropped on any error path.
pub fn evaluate(
    script_source: &str,
    shim: &ShimState,
    limits: SandboxLimits,
) -> Result<serde_json::Value, SandboxError> {
    let runtime = rquickjs::Runtime::new()
        .map_err(|e| SandboxError::Evaluation(format!("runtime init failed: {e}")))?;
    runtime.set_memory_limit(limits.memory_bytes);

    let start = Instant::now();
    let wall_time = limits.wall_time;
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_for_handler = interrupted.clone();
    runtime.set_interrupt_handler(Some(Box::new(move || {
        if start.elapsed() >= wall_time {
            interrupted_for_handler.store(true, Ordering::Relaxed);
            true
        } else {
            false
        }
    })));

    let context = rquickjs::Context::full(&runtime)
        .map_err(|e| SandboxError::Evaluation(format!("context init failed: {e}")))?;

    let result: Result<String, rquickjs::Error> = context.with(|ctx| -> Result<String, rquickjs::Error> {
        inject_shim(&ctx, shim)?;
        let value: rquickjs::Value = ctx.eval(script_source)?;
        match ctx.json_stringify(value)? {
            Some(s) => s.to_string(),
            None => Ok("null".to_string()),
        }
    });

    match result {
        Ok(json) => serde_json::from_str(&json)
            .map_err(|e| SandboxError::Evaluation(format!("result was not valid JSON: {e}"))),
        Err(_e) if interrupted.load(Ordering::Relaxed) || start.elapsed() >= wall_time => {
            Err(SandboxError::Timeout)
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.to_ascii_lowercase().contains("memory") || msg.to_ascii_lowercase().contains("out of memory") {
                Err(SandboxError::MemoryExceeded)
            } else {
                Err(SandboxError::Evaluation(msg))
            }
        }
    }
}

/// Injects `window`/`document`/`navigator` globals. No network, filesystem,
/// environment, or real-clock access is ever wired in — `performance.now()`
/// is backed by a monotonic counter local to this evaluation, not
/// `SystemTime`, satisfying spec §4.E's isolation contract.
fn inject_shim(ctx: &rquickjs::Ctx<'_>, shim: &ShimState) -> Result<(), rquickjs::Error> {
    let globals = ctx.globals();

    let location = rquickjs::Object::new(ctx.clone())?;
    location.set("href", shim.location_href.clone())?;
    globals.set("location", location)?;

    let navigator = rquickjs::Object::new(ctx.clone())?;
    navigator.set("userAgent", shim.user_agent.clone())?;
    navigator.set("platform", shim.platform.clone())?;
    globals.set("navigator", navigator)?;

    let window = rquickjs::Object::new(ctx.clone())?;
    window.set("location", globals.get::<_, rquickjs::Value>("location")?)?;
    window.set("navigator", globals.get::<_, rquickjs::Value>("navigator")?)?;
    globals.set("window", window)?;

    let performance = rquickjs::Object::new(ctx.clone())?;
    let start = Instant::now();
    let now_fn = rquickjs::Function::new(ctx.clone(), move || start.elapsed().as_secs_f64() * 1000.0)?;
    performance.set("now", now_fn)?;
    globals.set("performance", performance)?;

    let document = rquickjs::Object::new(ctx.clone())?;
    let create_element = rquickjs::Function::new(ctx.clone(), |_tag: String| -> rquickjs::Result<()> { Ok(()) })?;
    document.set("createElement", create_element)?;
    globals.set("document", document)?;

    Ok(())
}
