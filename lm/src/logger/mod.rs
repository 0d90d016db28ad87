//! Base loggers the LogManager writes formatted lines to
//!
//! A base logger is the final sink: it receives fully formatted text and
//! answers level checks. The LogManager never decides on its own whether a
//! debug or error line is wanted; it asks the base logger first.

mod backends;
mod memory;

pub use backends::{LogBackend, TracingBackend};
pub use memory::{LogRecord, MemoryLogger};

/// Sink for formatted log lines
pub trait BaseLogger: Send + Sync {
    fn info(&self, text: &str);

    fn debug(&self, text: &str);

    fn error(&self, text: &str);

    /// Whether debug lines would be written
    fn debug_enabled(&self) -> bool;

    /// Whether error lines would be written
    fn error_enabled(&self) -> bool;
}
