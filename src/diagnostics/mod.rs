// SPDX-License-Identifier: MPL-2.0
//! Structured activity log for the dashboard.
//!
//! Components send typed events through a [`DiagnosticsHandle`]; the
//! [`DiagnosticsCollector`] keeps the most recent ones in a
//! [`CircularBuffer`] and exports them as a JSON report.
//!
//! # Privacy
//!
//! Warning, error and action detail strings are passed through
//! [`sanitize_message`] before they are stored, so reports carry no file
//! paths.

mod buffer;
mod collector;
mod events;
mod export;
mod report;
mod sanitizer;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    AppStateEvent, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction, WarningEvent,
};
pub use export::{generate_default_filename, write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent, SystemInfo};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
