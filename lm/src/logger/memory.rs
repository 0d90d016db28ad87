//! In-memory base logger

use std::sync::Mutex;

use log::{Level, LevelFilter};

use super::BaseLogger;

/// A line written to a [`MemoryLogger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub text: String,
}

/// Keeps every written line in memory
///
/// Lines above `max_level` are dropped, matching what a filtered real logger
/// would do.
#[derive(Debug)]
pub struct MemoryLogger {
    max_level: LevelFilter,
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    /// Logger that accepts every level
    pub fn new() -> Self {
        Self::with_max_level(LevelFilter::Trace)
    }

    pub fn with_max_level(max_level: LevelFilter) -> Self {
        Self {
            max_level,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Texts written at `level`, in order
    pub fn lines(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.text.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, level: Level, text: &str) {
        if level <= self.max_level {
            self.lock().push(LogRecord {
                level,
                text: text.to_string(),
            });
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseLogger for MemoryLogger {
    fn info(&self, text: &str) {
        self.push(Level::Info, text);
    }

    fn debug(&self, text: &str) {
        self.push(Level::Debug, text);
    }

    fn error(&self, text: &str) {
        self.push(Level::Error, text);
    }

    fn debug_enabled(&self) -> bool {
        Level::Debug <= self.max_level
    }

    fn error_enabled(&self) -> bool {
        Level::Error <= self.max_level
    }
}
