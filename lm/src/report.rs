//! Arguments of an error or agent report

use std::fmt;

use crate::context::ContextData;
use crate::exception::Exception;

/// Builder for the arguments of [`LogManager::error`] and the agent methods
///
/// When the report is sent, its message is chosen in this order: the lazy
/// producer's result, the explicit message, the exception's message (or its
/// generic representation), and finally the progname.
///
/// [`LogManager::error`]: crate::LogManager::error
#[derive(Default)]
pub struct ErrorReport<'a> {
    pub(crate) progname: Option<String>,
    pub(crate) exception: Option<&'a Exception>,
    pub(crate) message: Option<String>,
    pub(crate) producer: Option<Box<dyn FnOnce() -> String + 'a>>,
    pub(crate) suppress_notification: bool,
    pub(crate) custom_params: Option<ContextData>,
}

impl<'a> ErrorReport<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progname(mut self, progname: impl Into<String>) -> Self {
        self.progname = Some(progname.into());
        self
    }

    pub fn exception(mut self, exception: &'a Exception) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message computed only if the report is actually sent
    pub fn message_with(mut self, producer: impl FnOnce() -> String + 'a) -> Self {
        self.producer = Some(Box::new(producer));
        self
    }

    /// Log locally but skip the agent
    pub fn suppress_notification(mut self) -> Self {
        self.suppress_notification = true;
        self
    }

    /// Params sent to the agent instead of the logger's context data
    pub fn custom_params(mut self, params: ContextData) -> Self {
        self.custom_params = Some(params);
        self
    }

    /// Resolve the message, consuming the producer if there is one
    pub(crate) fn take_message(&mut self) -> Option<String> {
        self.producer
            .take()
            .map(|produce| produce())
            .or_else(|| self.message.clone())
            .or_else(|| self.exception.map(Exception::describe))
            .or_else(|| self.progname.clone())
    }
}

impl fmt::Debug for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReport")
            .field("progname", &self.progname)
            .field("exception", &self.exception)
            .field("message", &self.message)
            .field("lazy", &self.producer.is_some())
            .field("suppress_notification", &self.suppress_notification)
            .field("custom_params", &self.custom_params)
            .finish()
    }
}
