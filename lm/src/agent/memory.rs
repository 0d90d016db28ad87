//! In-memory agent notifier

use std::sync::Mutex;

use super::{AgentNotifier, AgentPayload, NoticeOptions};
use crate::error::NoticeError;
use crate::exception::Exception;

/// Owned copy of a payload kept by [`MemoryNotifier`]
#[derive(Debug, Clone, PartialEq)]
pub enum NoticePayload {
    Message(String),
    Exception(Exception),
}

/// A notice received by [`MemoryNotifier`]
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub payload: NoticePayload,
    pub options: NoticeOptions,
}

/// Keeps every notice in memory, optionally failing each delivery
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
    failure: Option<String>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose every delivery fails with `reason` after recording
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            notices: Mutex::new(Vec::new()),
            failure: Some(reason.into()),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AgentNotifier for MemoryNotifier {
    fn notice_error(&self, payload: AgentPayload<'_>, options: NoticeOptions) -> Result<(), NoticeError> {
        let payload = match payload {
            AgentPayload::Message(text) => NoticePayload::Message(text.to_string()),
            AgentPayload::Exception(exc) => NoticePayload::Exception(exc.clone()),
        };
        self.notices
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Notice { payload, options });

        match &self.failure {
            Some(reason) => Err(NoticeError(reason.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_notices() {
        let notifier = MemoryNotifier::new();
        let exc = Exception::new("Timeout", None);

        notifier
            .notice_error(AgentPayload::Message("first"), NoticeOptions::default())
            .unwrap();
        notifier
            .notice_error(
                AgentPayload::Exception(&exc),
                NoticeOptions {
                    trace_only: true,
                    ..Default::default()
                },
            )
            .unwrap();

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].payload, NoticePayload::Message("first".to_string()));
        assert!(!notices[0].options.trace_only);
        assert_eq!(notices[1].payload, NoticePayload::Exception(exc));
        assert!(notices[1].options.trace_only);
    }

    #[test]
    fn test_failing_notifier() {
        let notifier = MemoryNotifier::failing("agent unreachable");
        let err = notifier
            .notice_error(AgentPayload::Message("x"), NoticeOptions::default())
            .unwrap_err();

        assert_eq!(err.0, "agent unreachable");
        assert_eq!(notifier.len(), 1);
    }
}
