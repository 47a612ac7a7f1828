//! Log capture for unit tests.

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

/// Installs the capturing logger for the test binary. Records are kept for the whole run, so tests look for
/// messages that only they can produce.
pub fn capture_logs() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Whether a warning containing `text` was logged.
pub fn warned(text: &str) -> bool {
    LOGGER
        .records
        .lock()
        .map(|records| {
            records
                .iter()
                .any(|(level, message)| *level == Level::Warn && message.contains(text))
        })
        .unwrap_or(false)
}
