/// Console handler: colored stderr output in development, inert otherwise.

use std::io::{self, Write};
use crate::handler::format;
use crate::level::Level;
use crate::logger::LogRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleHandler {
    /// Writes every accepted record to stderr
    Active { level: Level, colorize: bool },
    /// Accepts records at its threshold and discards them without any I/O
    Inert { level: Level },
}

impl ConsoleHandler {
    /// Active colored handler in development, inert handler everywhere else.
    pub fn for_environment(is_dev: bool, level: Level) -> Self {
        if is_dev {
            ConsoleHandler::Active { level, colorize: true }
        } else {
            ConsoleHandler::Inert { level }
        }
    }

    pub fn level(&self) -> Level {
        match self {
            ConsoleHandler::Active { level, .. } | ConsoleHandler::Inert { level } => *level,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ConsoleHandler::Active { .. })
    }

    pub fn handle(&self, record: &LogRecord) -> io::Result<()> {
        match self {
            ConsoleHandler::Active { colorize, .. } => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(format::line(record, *colorize).as_bytes())
            }
            ConsoleHandler::Inert { .. } => Ok(()),
        }
    }
}
