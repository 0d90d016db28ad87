//! LogManager - contextual logging with progress tracking
//!
//! A [`LogManager`] wraps a base logger and a monitoring-agent notifier and
//! carries a map of context data that is appended to every line it writes.
//!
//! # Core Concepts
//!
//! - **Context data**: ordered key/value pairs attached to every log line
//!   and every agent notice
//! - **Compaction**: long messages are cut to `message_size_limit` leading
//!   characters plus a tail
//! - **Agent forwarding**: errors go to the agent as full reports, traces as
//!   advisory notices
//! - **Progress counters**: `start` / `iteration` / `finish` events stored
//!   in the context data itself
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use logmanager::{ContextData, ErrorReport, LogManager, MemoryLogger};
//!
//! let logger = Arc::new(MemoryLogger::new());
//! let mut lm = LogManager::new(ContextData::from([("request_id", "r-17")]), logger.clone(), None)?;
//!
//! lm.start_progress("rows", Some(3))?;
//! for _ in 0..3 {
//!     lm.record_iteration("rows")?;
//! }
//! lm.finish_progress("rows")?;
//! lm.error(ErrorReport::new().message("import failed"))?;
//! # Ok::<(), logmanager::LogManagerError>(())
//! ```
//!
//! # Modules
//!
//! - [`manager`] - the contextual logger
//! - [`logger`] - base logger trait and adapters
//! - [`agent`] - agent notifier trait, adapters and factory
//! - [`context`] - context data
//! - [`progress`] - progress events
//! - [`config`] - configuration types and loading

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod exception;
pub mod logger;
pub mod manager;
pub mod message;
pub mod progress;
pub mod report;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use agent::{
    AgentNotifier, AgentPayload, LogNotifier, MemoryNotifier, Notice, NoticeOptions, NoticePayload, NullNotifier,
    create_notifier,
};
pub use config::{AgentConfig, Config, ConfigOverrides};
pub use context::{ContextData, ContextValue};
pub use error::{LogManagerError, NoticeError};
pub use exception::Exception;
pub use logger::{BaseLogger, LogBackend, LogRecord, MemoryLogger, TracingBackend};
pub use manager::LogManager;
pub use message::{DEFAULT_MESSAGE_SIZE_LIMIT, Message, compact};
pub use progress::ProgressEvent;
pub use report::ErrorReport;
