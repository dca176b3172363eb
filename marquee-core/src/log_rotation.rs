//! Size-based rotation for the sync log file.
//!
//! Keeps a single generation of history:
//!   sync.log → sync.log.old  (any previous `.old` is discarded)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Rotate once the log grows past this size (5 MiB).
pub const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;

/// Rotate `log_path` if its size exceeds `max_bytes`.
///
/// Rotation removes `<name>.old` if present, then renames `<name>` to
/// `<name>.old`. No replacement file is created; the next writer opening the
/// log in append mode creates it.
///
/// Returns `true` if rotation occurred, `false` if the file was at or under
/// the threshold (or did not exist yet).
///
/// # Errors
/// Returns `io::Error` on filesystem failures other than a missing log file.
pub fn rotate_if_needed(log_path: &Path, max_bytes: u64) -> io::Result<bool> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };

    if size <= max_bytes {
        return Ok(false);
    }

    let backup = backup_path(log_path);
    if backup.exists() {
        fs::remove_file(&backup)?;
    }
    fs::rename(log_path, &backup)?;

    tracing::debug!(path = %log_path.display(), size, "log file rotated");
    Ok(true)
}

/// `<log_path>.old`, appended to the full file name (`sync.log` → `sync.log.old`).
pub fn backup_path(log_path: &Path) -> PathBuf {
    let mut name = log_path.as_os_str().to_owned();
    name.push(".old");
    PathBuf::from(name)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
