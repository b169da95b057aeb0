// SPDX-License-Identifier: MPL-2.0
//! Writing diagnostic reports to disk.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;

/// Errors that can occur during diagnostic report export.
#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Serialization(serde_json::Error),
    /// No data directory could be determined for the report.
    NoDirectory,
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Serialization(err) => write!(f, "serialization error: {err}"),
            Self::NoDirectory => write!(f, "no diagnostics directory available"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NoDirectory => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// Format: `sales_lens_diagnostics_YYYYMMDD_HHMMSS.json`, local time.
#[must_use]
pub fn generate_default_filename() -> String {
    let now = Local::now();
    format!("sales_lens_diagnostics_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `content` next to `path` first, then renames it into place.
///
/// # Errors
///
/// Returns an error if writing or renaming fails.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
