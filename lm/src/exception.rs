//! Exception snapshots handed to the logger and the agent
//!
//! An [`Exception`] is a detached copy of an error: its type name, its
//! message, a generic representation used when the message is empty, and
//! the chain of causes standing in for a backtrace.

use std::error::Error as StdError;

/// Snapshot of an error for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exception {
    class_name: String,
    message: Option<String>,
    repr: String,
    backtrace: Vec<String>,
}

impl Exception {
    pub fn new(class_name: impl Into<String>, message: Option<String>) -> Self {
        let class_name = class_name.into();
        let repr = format!("#<{}>", class_name);
        Self {
            class_name,
            message: message.filter(|m| !m.is_empty()),
            repr,
            backtrace: Vec::new(),
        }
    }

    /// Capture an error: `Display` becomes the message, `Debug` the
    /// representation and the `source()` chain the backtrace
    pub fn from_error<E: StdError>(err: &E) -> Self {
        let message = err.to_string();
        let mut backtrace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            backtrace.push(cause.to_string());
            source = cause.source();
        }
        Self {
            class_name: short_type_name::<E>().to_string(),
            message: Some(message).filter(|m| !m.is_empty()),
            repr: format!("{:?}", err),
            backtrace,
        }
    }

    /// Capture an `eyre::Report`, including its context chain
    pub fn from_report(report: &eyre::Report) -> Self {
        let message = report.to_string();
        let backtrace = report.chain().skip(1).map(|cause| cause.to_string()).collect();
        Self {
            class_name: "eyre::Report".to_string(),
            message: Some(message).filter(|m| !m.is_empty()),
            repr: format!("{:?}", report),
            backtrace,
        }
    }

    pub fn with_backtrace(mut self, frames: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.backtrace = frames.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_repr(mut self, repr: impl Into<String>) -> Self {
        self.repr = repr.into();
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn backtrace(&self) -> &[String] {
        &self.backtrace
    }

    /// Message if present, otherwise the generic representation
    pub fn describe(&self) -> String {
        self.message.clone().unwrap_or_else(|| self.repr.clone())
    }
}

/// Last path segment of a type name, keeping generic arguments intact
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
