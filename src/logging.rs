#![cfg(feature = "std")]

use log::{LevelFilter, Metadata, Record};
use std::env;

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

/// Install a stdout logger with the level taken from the `BROADSIDE_LOG`
/// environment variable, defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    let level = env::var("BROADSIDE_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
