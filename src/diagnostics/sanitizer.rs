// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error categories.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Categories of warnings shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// No file was selected for upload.
    NoFile,
    /// The upload is neither PDF nor CSV.
    UnsupportedFormat,
    /// The settings file could not be read.
    ConfigurationIssue,
    /// A clear was requested with no dataset to clear.
    NothingToClear,
    /// A merge was requested with fewer than two datasets.
    NotEnoughDatasets,
    Other,
}

/// Categories of errors shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// File read/write failures.
    IoError,
    /// A diagnostics report could not be written.
    ExportError,
    /// The server reported a failed analysis.
    AnalysisFailed,
    Other,
}

static PATH_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    // Unix home/temp/system paths, `~/`, Windows drive and UNC paths.
    // A path ends at whitespace, a quote, a parenthesis or a bracket.
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|/var/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#"|\\\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Replaces file paths in `message` with `<path>`.
///
/// ```
/// use sales_lens::diagnostics::sanitize_message;
///
/// let msg = "Cannot read /home/ana/sales/q3.csv";
/// assert_eq!(sanitize_message(msg), "Cannot read <path>");
/// assert_eq!(sanitize_message("Invalid format"), "Invalid format");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    PATH_PATTERNS.replace_all(message, "<path>").into_owned()
}
