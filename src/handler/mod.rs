/// Log handlers
///
/// A handler receives every record at or above its threshold. The set is closed:
/// a rotating file handler and a console handler that is either active or inert.

pub mod console;
pub mod format;
pub mod rotating;

use std::io;
use crate::level::Level;
use crate::logger::LogRecord;

pub use console::ConsoleHandler;
pub use rotating::RotatingFileHandler;

#[derive(Debug)]
pub enum Handler {
    RotatingFile(RotatingFileHandler),
    Console(ConsoleHandler),
}

impl Handler {
    pub fn level(&self) -> Level {
        match self {
            Handler::RotatingFile(h) => h.level(),
            Handler::Console(h) => h.level(),
        }
    }

    pub fn is_handling(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Short name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Handler::RotatingFile(_) => "rotating_file",
            Handler::Console(ConsoleHandler::Active { .. }) => "console",
            Handler::Console(ConsoleHandler::Inert { .. }) => "inert",
        }
    }

    pub fn handle(&self, record: &LogRecord) -> io::Result<()> {
        match self {
            Handler::RotatingFile(h) => h.handle(record),
            Handler::Console(h) => h.handle(record),
        }
    }
}
