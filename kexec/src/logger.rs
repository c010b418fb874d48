//! `log` backend writing straight to stderr
//!
//! Lines carry the same one-letter level prefixes as the kernel console
//! (`[E]`, `[W]`, `[I]`, `[D]`, `[T]`).

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::console::{Console, STDERR};
use crate::gateway::LinuxGateway;

static LOGGER: RawLogger = RawLogger;

pub struct RawLogger;

impl RawLogger {
    fn prefix(level: Level) -> &'static str {
        match level {
            Level::Error => "[E]",
            Level::Warn => "[W]",
            Level::Info => "[I]",
            Level::Debug => "[D]",
            Level::Trace => "[T]",
        }
    }

    fn format(record: &Record) -> String {
        format!("{} {}\n", Self::prefix(record.level()), record.args())
    }
}

impl Log for RawLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        let _ = Console::new(&LinuxGateway, STDERR).write_all(line.as_bytes());
    }

    fn flush(&self) {}
}

/// Install the raw logger as the global `log` backend
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
