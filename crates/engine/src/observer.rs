//! Notifications raised toward the caller of the engine.

/// Receives a callback after each mutating operation.
///
/// `data_changed` fires once per successful mutation, `error_occurred` once per
/// failed one, with the error message meant for the user.
pub trait EngineObserver {
    fn data_changed(&self) {}

    fn error_occurred(&self, _message: &str) {}
}

/// Default observer: forwards notifications to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl EngineObserver for TracingObserver {
    fn data_changed(&self) {
        tracing::debug!("data changed");
    }

    fn error_occurred(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
