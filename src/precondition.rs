/// Log directory preconditions
///
/// The directory holding the log file must exist and be writable before the
/// rotating file handler is built. Failures are returned as `PreconditionError`
/// and are meant to end the process (see `setup::exit_on_failure`).

use std::fs::DirBuilder;
use std::path::{Path, PathBuf};
use crate::errors::PreconditionError;

/// Permissions for a newly created log directory (rwxrwxr-x, before umask).
pub const LOG_DIR_MODE: u32 = 0o775;

/// Directory containing `logfile`; a bare file name lives in `.`.
pub fn log_directory(logfile: &Path) -> PathBuf {
    match logfile.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Make sure the directory for `logfile` exists and is writable.
///
/// Creates missing directories recursively. Returns the directory on success.
pub fn ensure_log_directory(logfile: &Path) -> Result<PathBuf, PreconditionError> {
    let dir = log_directory(logfile);

    if !dir.is_dir() {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(LOG_DIR_MODE);
        }
        builder
            .create(&dir)
            .map_err(|source| PreconditionError::CreateDirectory { path: dir.clone(), source })?;
        tracing::debug!(dir = %dir.display(), "created log directory");
    }

    if !is_writable(&dir) {
        return Err(PreconditionError::NotWritable { path: dir });
    }

    Ok(dir)
}

#[cfg(unix)]
fn is_writable(dir: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(dir.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(dir: &Path) -> bool {
    std::fs::metadata(dir)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
