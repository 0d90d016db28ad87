//! Notifiers that need no external agent

use super::{AgentNotifier, AgentPayload, NoticeOptions};
use crate::error::NoticeError;

/// `log` target notices are written to by [`LogNotifier`]
pub const AGENT_TARGET: &str = "agent";

/// Discards every notice
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl AgentNotifier for NullNotifier {
    fn notice_error(&self, _payload: AgentPayload<'_>, _options: NoticeOptions) -> Result<(), NoticeError> {
        Ok(())
    }
}

/// Writes notices to the `agent` log target
///
/// Trace-only notices go out at warn, full reports at error. Custom params
/// are attached as a JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl AgentNotifier for LogNotifier {
    fn notice_error(&self, payload: AgentPayload<'_>, options: NoticeOptions) -> Result<(), NoticeError> {
        let params = serde_json::to_string(&options.custom_params).map_err(|e| NoticeError(e.to_string()))?;
        if options.trace_only {
            log::warn!(target: AGENT_TARGET, "trace: {} custom_params={}", payload.describe(), params);
        } else {
            log::error!(target: AGENT_TARGET, "error: {} custom_params={}", payload.describe(), params);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextData;
    use crate::exception::Exception;
    use crate::test_support::capture;
    use log::{Level, LevelFilter};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_trace_only_goes_to_warn() {
        let captured = capture(LevelFilter::Trace);
        let options = NoticeOptions {
            trace_only: true,
            custom_params: ContextData::from([("job", 7)]),
        };

        LogNotifier::new()
            .notice_error(AgentPayload::Message("slow import"), options)
            .unwrap();

        let records = captured.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[0].target, AGENT_TARGET);
        assert_eq!(records[0].text, r#"trace: slow import custom_params={"job":7}"#);
    }

    #[test]
    #[serial]
    fn test_full_report_goes_to_error() {
        let captured = capture(LevelFilter::Trace);
        let exc = Exception::new("Timeout", Some("took too long".to_string()));

        LogNotifier::new()
            .notice_error(AgentPayload::Exception(&exc), NoticeOptions::default())
            .unwrap();

        let records = captured.records();
        assert_eq!(records[0].level, Level::Error);
        assert_eq!(records[0].text, "error: Timeout: took too long custom_params={}");
    }

    #[test]
    #[serial]
    fn test_null_notifier_writes_nothing() {
        let captured = capture(LevelFilter::Trace);
        NullNotifier
            .notice_error(AgentPayload::Message("ignored"), NoticeOptions::default())
            .unwrap();
        assert!(captured.records().is_empty());
    }
}
