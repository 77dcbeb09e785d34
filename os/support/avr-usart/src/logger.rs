use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use log::{LevelFilter, Log, Metadata, Record};
use tinyprintf::Printer;

use crate::Usart;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggerError {
    #[error("a logger is already installed")]
    AlreadyInstalled,
}

/// `log` backend writing `"[LEVEL] target: message\n"` lines to a USART.
pub struct UsartLogger {
    max_level: LevelFilter,
    usart: Usart,
}

impl UsartLogger {
    #[must_use]
    pub const fn new(usart: Usart, max_level: LevelFilter) -> Self {
        Self { max_level, usart }
    }

    /// Call this once during early init.
    ///
    /// # Errors
    /// [`LoggerError::AlreadyInstalled`] if this or any other logger was
    /// installed before.
    pub fn init(self) -> Result<(), LoggerError> {
        static INSTALLED: AtomicBool = AtomicBool::new(false);
        static mut LOGGER: Option<UsartLogger> = None;

        if INSTALLED.swap(true, Ordering::AcqRel) {
            return Err(LoggerError::AlreadyInstalled);
        }

        let max_level = self.max_level;

        // SAFETY: the INSTALLED flag lets exactly one caller reach this point,
        // and nothing else reads LOGGER before `set_logger` publishes it.
        let logger: &'static Self = unsafe {
            let slot = &mut *(&raw mut LOGGER);
            slot.insert(self)
        };

        log::set_logger(logger).map_err(|_| LoggerError::AlreadyInstalled)?;
        log::set_max_level(max_level);
        Ok(())
    }
}

/// Writes one `"[LEVEL] target: message\n"` line.
fn write_record(out: &mut impl fmt::Write, record: &Record) -> fmt::Result {
    writeln!(
        out,
        "[{}] {}: {}",
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // The USART never fails; an error here comes from a `Display` impl in
        // the message, which ends the line early. There is no channel left to
        // report it on.
        let _ = write_record(&mut Printer::new(self.usart), record);
    }

    fn flush(&self) {
        // Bytes leave through UDRn as soon as they are written.
    }
}
