//! Process-wide `log` capture for unit tests that go through the log facade
//!
//! Only one `log` logger can ever be installed, so every test using this
//! must be `#[serial]`.

use std::sync::{LazyLock, Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

pub(crate) struct CaptureLogger {
    records: Mutex<Vec<Captured>>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Captured {
    pub level: Level,
    pub target: String,
    pub text: String,
}

impl CaptureLogger {
    pub fn records(&self) -> Vec<Captured> {
        self.records.lock().unwrap().clone()
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records.lock().unwrap().push(Captured {
                level: record.level(),
                target: record.target().to_string(),
                text: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

static LOGGER: LazyLock<CaptureLogger> = LazyLock::new(|| CaptureLogger {
    records: Mutex::new(Vec::new()),
});
static INIT: Once = Once::new();

/// Install the capture logger (once), set the max level and clear history
pub(crate) fn capture(max_level: LevelFilter) -> &'static CaptureLogger {
    INIT.call_once(|| {
        log::set_logger(&*LOGGER).unwrap();
    });
    log::set_max_level(max_level);
    LOGGER.records.lock().unwrap().clear();
    &LOGGER
}
