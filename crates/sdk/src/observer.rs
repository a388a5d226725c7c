//! Pluggable sink for per-request log events.

/// Receives the request executor's log events.
///
/// The executor calls [`info`](Self::info) once on success and
/// [`error`](Self::error) once on failure, except for resource reads.
pub trait RequestObserver: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards events to `tracing` under the `ghost_sdk::requests` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn info(&self, message: &str) {
        tracing::info!(target: "ghost_sdk::requests", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "ghost_sdk::requests", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ghost_sdk::requests", "{}", message);
    }
}
