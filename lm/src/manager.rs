//! LogManager - contextual logger with progress tracking
//!
//! Every line written through a LogManager carries the current context data
//! (`<text>. Data: key: value, ...`). Errors are also forwarded to the
//! monitoring agent unless suppressed.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::agent::{AgentNotifier, AgentPayload, NoticeOptions, create_notifier};
use crate::config::{Config, ConfigOverrides};
use crate::context::{ContextData, ContextValue};
use crate::error::LogManagerError;
use crate::exception::Exception;
use crate::logger::BaseLogger;
use crate::message::{Message, compact};
use crate::progress::{INFO_EVERY, ProgressEvent, format_float, percent, timer_key, total_key};
use crate::report::ErrorReport;

/// Contextual logger
///
/// Progress counters and merges mutate the context data, so they take
/// `&mut self`; share a LogManager across threads behind a lock.
pub struct LogManager {
    data: ContextData,
    config: Config,
    logger: Arc<dyn BaseLogger>,
    notifier: Arc<dyn AgentNotifier>,
}

impl LogManager {
    /// Create a logger, building the agent notifier from the merged config
    pub fn new(
        data: ContextData,
        logger: Arc<dyn BaseLogger>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, LogManagerError> {
        let config = match overrides {
            Some(overrides) => Config::default().merge(overrides),
            None => Config::default(),
        };
        let notifier = create_notifier(&config)?;
        Ok(Self::with_notifier(data, logger, config, notifier))
    }

    /// Create a logger with an explicit config and notifier
    pub fn with_notifier(
        data: ContextData,
        logger: Arc<dyn BaseLogger>,
        config: Config,
        notifier: Arc<dyn AgentNotifier>,
    ) -> Self {
        debug!(keys = data.len(), limit = config.message_size_limit, "LogManager::new: called");
        Self {
            data,
            config,
            logger,
            notifier,
        }
    }

    /// New logger over `data` with default config, merged with `other`
    pub fn merged(
        data: ContextData,
        logger: Arc<dyn BaseLogger>,
        other: Option<&LogManager>,
    ) -> Result<Self, LogManagerError> {
        let mut instance = Self::new(data, logger, None)?;
        instance.merge(other);
        Ok(instance)
    }

    /// Union own data with `other`'s; `other` wins on key collision
    pub fn merge(&mut self, other: Option<&LogManager>) -> &mut Self {
        if let Some(other) = other {
            self.data.merge(&other.data);
        }
        self
    }

    pub fn data(&self) -> &ContextData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ContextData {
        &mut self.data
    }

    pub fn set_data(&mut self, data: ContextData) {
        self.data = data;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn info<'a>(&self, text: impl Into<Message<'a>>) -> Result<(), LogManagerError> {
        self.write_info(text.into(), false)
    }

    /// Log at info and send the text to the agent as a trace-only notice
    pub fn info_notify<'a>(&self, text: impl Into<Message<'a>>) -> Result<(), LogManagerError> {
        self.write_info(text.into(), true)
    }

    /// Log at debug; does nothing at all if debug is disabled
    pub fn debug<'a>(&self, text: impl Into<Message<'a>>) -> Result<(), LogManagerError> {
        self.write_debug(text.into(), false)
    }

    pub fn debug_notify<'a>(&self, text: impl Into<Message<'a>>) -> Result<(), LogManagerError> {
        self.write_debug(text.into(), true)
    }

    pub fn debug_enabled(&self) -> bool {
        self.logger.debug_enabled()
    }

    fn write_info(&self, text: Message<'_>, notify_agent: bool) -> Result<(), LogManagerError> {
        let text = text.resolve();
        if notify_agent {
            self.trace_notice(&text)?;
        }
        self.logger.info(&self.format_for_log(&text));
        Ok(())
    }

    fn write_debug(&self, text: Message<'_>, notify_agent: bool) -> Result<(), LogManagerError> {
        if !self.debug_enabled() {
            return Ok(());
        }
        let text = text.resolve();
        if notify_agent {
            self.trace_notice(&text)?;
        }
        self.logger.debug(&self.format_for_log(&text));
        Ok(())
    }

    fn trace_notice(&self, text: &str) -> Result<(), LogManagerError> {
        let options = NoticeOptions {
            trace_only: true,
            custom_params: self.data.clone(),
        };
        self.notifier.notice_error(AgentPayload::Message(text), options)?;
        Ok(())
    }

    /// Log an error and, unless suppressed, report it to the agent
    ///
    /// Nothing happens when the base logger has errors disabled.
    pub fn error(&self, mut report: ErrorReport<'_>) -> Result<(), LogManagerError> {
        if !self.logger.error_enabled() {
            return Ok(());
        }

        let message = report.take_message();
        self.logger.error(&self.format_error(report.exception, message.as_deref()));

        if report.suppress_notification {
            return Ok(());
        }

        report.message = message;
        self.notify_agent(report, false)
    }

    /// Send a report to the agent
    ///
    /// Custom params default to the context data. An exception is sent as
    /// is; otherwise the resolved message is sent.
    pub fn notify_agent(&self, mut report: ErrorReport<'_>, trace_only: bool) -> Result<(), LogManagerError> {
        let options = NoticeOptions {
            trace_only,
            custom_params: report.custom_params.take().unwrap_or_else(|| self.data.clone()),
        };

        match report.exception {
            Some(exception) => self.notifier.notice_error(AgentPayload::Exception(exception), options)?,
            None => {
                let message = report.take_message().unwrap_or_default();
                self.notifier.notice_error(AgentPayload::Message(&message), options)?;
            }
        }
        Ok(())
    }

    /// Report to the agent as trace-only, never as a full error
    pub fn error_on_agent(&self, report: ErrorReport<'_>) -> Result<(), LogManagerError> {
        self.notify_agent(report, true)
    }

    /// Report to the agent as trace-only
    pub fn trace_on_agent(&self, report: ErrorReport<'_>) -> Result<(), LogManagerError> {
        self.notify_agent(report, true)
    }

    /// Context data as `key1: value1, key2: value2`
    pub fn context_string(&self) -> String {
        self.data.to_string()
    }

    /// `<text>. Data: <context>`, each half compacted
    pub fn format_for_log(&self, text: &str) -> String {
        let context = self.context_string();
        format!("{}. Data: {}", self.compact(text), self.compact(&context))
    }

    pub fn compact<'s>(&self, msg: &'s str) -> Cow<'s, str> {
        compact(msg, self.config.message_size_limit)
    }

    fn format_error(&self, exception: Option<&Exception>, message: Option<&str>) -> String {
        let message = match message {
            Some(message) => message.to_string(),
            None => exception.map(Exception::describe).unwrap_or_default(),
        };

        let mut out = String::new();
        if let Some(exception) = exception {
            out.push_str(&format!("Exception: {}. ", exception.class_name()));
        }
        out.push_str(&format!("Message: {}. ", self.format_for_log(&message)));
        if let Some(exception) = exception {
            out.push_str(&format!("Backtrace: {}", exception.backtrace().join(" | ")));
        }
        out
    }

    /// Start (or restart) the progress counter `name`
    pub fn start_progress(&mut self, name: &str, total: Option<u64>) -> Result<(), LogManagerError> {
        self.data.insert(name, 0);
        self.data.insert(timer_key(name), Utc::now());
        if let Some(total) = total {
            self.data.insert(total_key(name), total);
        }
        self.info(ProgressEvent::Start.line(name))
    }

    /// Count one iteration of `name`
    ///
    /// Lines go out at debug every time and at info every 1000 iterations.
    pub fn record_iteration(&mut self, name: &str) -> Result<(), LogManagerError> {
        let count = self
            .data
            .get(name)
            .and_then(ContextValue::as_int)
            .ok_or_else(|| precocious(name, ProgressEvent::Iteration))?
            .checked_add(1)
            .ok_or_else(|| LogManagerError::CounterOverflow { name: name.to_string() })?;
        self.data.insert(name, count);
        let promote = count % INFO_EVERY == 0;

        if let Some(total) = self.data.get(&total_key(name)).and_then(ContextValue::as_f64) {
            let line = format!("{}_percent: {}%", name, format_float(percent(count, total)));
            if promote {
                self.info(line.as_str())?;
            }
            self.debug(line)?;
        }

        let line = ProgressEvent::Iteration.line(name);
        if promote {
            self.info(line.as_str())?;
        }
        self.debug(line)
    }

    /// Replace the start timestamp of `name` with `"<elapsed> secs"`
    pub fn finish_progress(&mut self, name: &str) -> Result<(), LogManagerError> {
        let key = timer_key(name);
        let started = self
            .data
            .get(&key)
            .and_then(ContextValue::as_time)
            .ok_or_else(|| precocious(name, ProgressEvent::Finish))?;

        let elapsed = Utc::now().signed_duration_since(started);
        let secs = elapsed
            .num_microseconds()
            .map_or(elapsed.num_seconds() as f64, |us| us as f64 / 1_000_000.0);
        self.data.insert(key, format!("{} secs", format_float(secs)));
        self.info(ProgressEvent::Finish.line(name))
    }

    /// Run a progress event given by method name, e.g. `job_start`
    ///
    /// `total` only matters for start events.
    pub fn dispatch(&mut self, method: &str, total: Option<u64>) -> Result<(), LogManagerError> {
        let (name, event) = ProgressEvent::parse_method(method).ok_or_else(|| LogManagerError::MethodNotSupported {
            method: method.to_string(),
        })?;
        match event {
            ProgressEvent::Start => self.start_progress(name, total),
            ProgressEvent::Iteration => self.record_iteration(name),
            ProgressEvent::Finish => self.finish_progress(name),
        }
    }

    /// Whether [`dispatch`](Self::dispatch) accepts `method`
    pub fn responds_to(&self, method: &str) -> bool {
        ProgressEvent::parse_method(method).is_some()
    }
}

fn precocious(name: &str, event: ProgressEvent) -> LogManagerError {
    LogManagerError::PrecociousProgressEvent {
        name: name.to_string(),
        event,
    }
}

impl fmt::Debug for LogManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogManager")
            .field("data", &self.data)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
