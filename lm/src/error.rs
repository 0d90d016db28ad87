//! LogManager error types

use thiserror::Error;

use crate::progress::ProgressEvent;

/// Failure reported by an agent notifier while delivering a notice
#[derive(Debug, Error)]
#[error("Agent notice failed: {0}")]
pub struct NoticeError(pub String);

/// Errors that can occur while logging or tracking progress
#[derive(Debug, Error)]
pub enum LogManagerError {
    #[error("Method not supported: {method}")]
    MethodNotSupported { method: String },

    #[error("Progress event '{event}' for '{name}' received before '{name}_start'")]
    PrecociousProgressEvent { name: String, event: ProgressEvent },

    #[error("Progress counter '{name}' overflowed")]
    CounterOverflow { name: String },

    #[error("Unknown agent provider: '{0}'. Supported: none, log")]
    UnknownAgentProvider(String),

    #[error(transparent)]
    Notice(#[from] NoticeError),
}

impl LogManagerError {
    /// Check if this error came from the agent notifier
    pub fn is_notice_failure(&self) -> bool {
        matches!(self, LogManagerError::Notice(_))
    }
}
