/// Rotating file handler
///
/// Thin wrapper around `tracing_appender::rolling::RollingFileAppender`. The
/// log file path is split into a prefix (file stem) and suffix (extension);
/// with daily rotation `logs/app.log` is written as `logs/app.2026-10-19.log`.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;
use crate::config::Rotation;
use crate::errors::LogwireError;
use crate::handler::format;
use crate::level::Level;
use crate::logger::LogRecord;

pub struct RotatingFileHandler {
    level: Level,
    path: PathBuf,
    max_files: usize,
    rotation: Rotation,
    appender: RollingFileAppender,
}

impl RotatingFileHandler {
    /// Open the appender for `path`. The parent directory must already exist.
    ///
    /// `max_files == 0` keeps every rotated file.
    pub fn new(
        path: &Path,
        max_files: usize,
        level: Level,
        rotation: Rotation,
    ) -> Result<Self, LogwireError> {
        let dir = crate::precondition::log_directory(path);
        let prefix = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LogwireError::Appender(format!("Invalid log file name: {}", path.display())))?;

        let mut builder = RollingFileAppender::builder()
            .rotation(rotation.into())
            .filename_prefix(prefix);
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            builder = builder.filename_suffix(ext);
        }
        if max_files > 0 {
            builder = builder.max_log_files(max_files);
        }
        let appender = builder.build(&dir)?;

        Ok(RotatingFileHandler {
            level,
            path: path.to_path_buf(),
            max_files,
            rotation,
            appender,
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn handle(&self, record: &LogRecord) -> io::Result<()> {
        let mut writer = self.appender.make_writer();
        writer.write_all(format::line(record, false).as_bytes())?;
        writer.flush()
    }
}

impl fmt::Debug for RotatingFileHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotatingFileHandler")
            .field("level", &self.level)
            .field("path", &self.path)
            .field("max_files", &self.max_files)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}
