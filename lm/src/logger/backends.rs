//! BaseLogger adapters over the `log` and `tracing` facades

use super::BaseLogger;

/// Default `log` target for lines written by [`LogBackend`]
pub const DEFAULT_TARGET: &str = "logmanager";

/// Writes through the `log` facade
///
/// Level checks are answered by the installed `log` logger, so whatever
/// filtering the application configured (env_logger, etc.) applies.
#[derive(Debug, Clone)]
pub struct LogBackend {
    target: String,
}

impl LogBackend {
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }

    pub fn with_target(target: impl Into<String>) -> Self {
        Self { target: target.into() }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseLogger for LogBackend {
    fn info(&self, text: &str) {
        log::info!(target: self.target.as_str(), "{}", text);
    }

    fn debug(&self, text: &str) {
        log::debug!(target: self.target.as_str(), "{}", text);
    }

    fn error(&self, text: &str) {
        log::error!(target: self.target.as_str(), "{}", text);
    }

    fn debug_enabled(&self) -> bool {
        log::log_enabled!(target: self.target.as_str(), log::Level::Debug)
    }

    fn error_enabled(&self) -> bool {
        log::log_enabled!(target: self.target.as_str(), log::Level::Error)
    }
}

/// Writes through `tracing` events
///
/// Level checks ask the current subscriber via `tracing::enabled!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl BaseLogger for TracingBackend {
    fn info(&self, text: &str) {
        tracing::info!(target: "logmanager", "{}", text);
    }

    fn debug(&self, text: &str) {
        tracing::debug!(target: "logmanager", "{}", text);
    }

    fn error(&self, text: &str) {
        tracing::error!(target: "logmanager", "{}", text);
    }

    fn debug_enabled(&self) -> bool {
        tracing::enabled!(target: "logmanager", tracing::Level::DEBUG)
    }

    fn error_enabled(&self) -> bool {
        tracing::enabled!(target: "logmanager", tracing::Level::ERROR)
    }
}
