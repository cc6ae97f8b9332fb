//! Pluggable sink for faults that must never affect data flow: panics inside `tap`/`on` handlers,
//! `Signal` subscriber panics, `Gate` callback panics (spec.md §4.2, §4.4, §7 "Handler errors").
//!
//! Grounded on the teacher's Design Notes item "process-wide `console.error` logging for handler
//! faults -> route to a pluggable sink ... default to stderr" (SPEC_FULL.md §9), realized here
//! with `tracing` as the default instead of stderr, matching this crate's ambient logging choice.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

pub trait FaultSink: Send + Sync + 'static {
    fn report(&self, context: &str, message: &str);
}

#[derive(Default)]
pub struct TracingFaultSink;

impl FaultSink for TracingFaultSink {
    fn report(&self, context: &str, message: &str) {
        tracing::warn!(context, message, "handler fault caught and suppressed");
    }
}

pub fn default_sink() -> Arc<dyn FaultSink> {
    Arc::new(TracingFaultSink)
}

/// Runs `f`, catching any panic and routing it through `sink` instead of unwinding into the
/// stage's driving task.
pub fn guard<R>(sink: &Arc<dyn FaultSink>, context: &str, f: impl FnOnce() -> R) -> Option<R> {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic with non-string payload".to_string());
            sink.report(context, &message);
            None
        }
    }
}
