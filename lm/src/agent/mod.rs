//! Monitoring agent notifiers
//!
//! The LogManager forwards errors and traces to an external monitoring
//! agent through the [`AgentNotifier`] trait. Which notifier is used is
//! decided by [`create_notifier`] from the `agent.provider` config value.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

mod builtin;
mod memory;

pub use builtin::{AGENT_TARGET, LogNotifier, NullNotifier};
pub use memory::{MemoryNotifier, Notice, NoticePayload};

use crate::config::Config;
use crate::context::ContextData;
use crate::error::{LogManagerError, NoticeError};
use crate::exception::Exception;

/// What is being reported
#[derive(Debug, Clone, Copy)]
pub enum AgentPayload<'a> {
    Message(&'a str),
    Exception(&'a Exception),
}

impl AgentPayload<'_> {
    /// Human-readable summary of the payload
    pub fn describe(&self) -> String {
        match self {
            AgentPayload::Message(text) => text.to_string(),
            AgentPayload::Exception(exc) => format!("{}: {}", exc.class_name(), exc.describe()),
        }
    }
}

/// Options attached to every notice
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoticeOptions {
    /// Advisory notice that must not count as an error event
    pub trace_only: bool,
    pub custom_params: ContextData,
}

/// Receives error and trace reports
pub trait AgentNotifier: Send + Sync {
    fn notice_error(&self, payload: AgentPayload<'_>, options: NoticeOptions) -> Result<(), NoticeError>;
}

/// Build the notifier named by `config.agent.provider`
///
/// Supports "none" and "log" providers.
pub fn create_notifier(config: &Config) -> Result<Arc<dyn AgentNotifier>, LogManagerError> {
    debug!(provider = %config.agent.provider, "create_notifier: called");
    match config.agent.provider.as_str() {
        "none" => {
            debug!("create_notifier: creating null notifier");
            Ok(Arc::new(NullNotifier))
        }
        "log" => {
            debug!("create_notifier: creating log notifier");
            Ok(Arc::new(LogNotifier::new()))
        }
        other => {
            debug!(provider = %other, "create_notifier: unknown provider");
            Err(LogManagerError::UnknownAgentProvider(other.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;

    #[test]
    fn test_create_known_providers() {
        assert!(create_notifier(&Config::default()).is_ok());

        let config = Config::default().merge(&ConfigOverrides::default().agent_provider("log"));
        assert!(create_notifier(&config).is_ok());
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = Config::default().merge(&ConfigOverrides::default().agent_provider("newrelic"));
        match create_notifier(&config) {
            Err(LogManagerError::UnknownAgentProvider(name)) => assert_eq!(name, "newrelic"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_payload_describe() {
        let exc = Exception::new("Timeout", Some("took too long".to_string()));
        assert_eq!(AgentPayload::Exception(&exc).describe(), "Timeout: took too long");
        assert_eq!(AgentPayload::Message("plain").describe(), "plain");
    }
}
