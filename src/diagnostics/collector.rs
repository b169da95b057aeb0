// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! The collector owns the event buffer. Other components get a
//! [`DiagnosticsHandle`] and send events over a bounded channel; the app
//! drains the channel on each tick.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::export::{generate_default_filename, write_atomic, ExportError};
use super::{
    sanitize_message, AppStateEvent, BufferCapacity, CircularBuffer, DiagnosticEvent,
    DiagnosticEventKind, DiagnosticReport, ErrorEvent, ReportMetadata, SerializableEvent,
    SystemInfo, UserAction, WarningEvent,
};

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone. Sending never blocks: when the channel is full the
/// event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        self.send(DiagnosticEventKind::UserAction {
            action,
            details: details.map(|d| sanitize_message(&d)),
        });
    }

    pub fn log_state(&self, state: AppStateEvent) {
        self.send(DiagnosticEventKind::AppState { state });
    }

    /// Logs a warning. File paths in the message are replaced.
    pub fn log_warning(&self, event: WarningEvent) {
        self.send(DiagnosticEventKind::Warning {
            event: WarningEvent {
                message: sanitize_message(&event.message),
                ..event
            },
        });
    }

    /// Logs an error. File paths in the message are replaced.
    pub fn log_error(&self, event: ErrorEvent) {
        self.send(DiagnosticEventKind::Error {
            event: ErrorEvent {
                message: sanitize_message(&event.message),
                ..event
            },
        });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Kept to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for relative event timestamps.
    collection_started_at: Instant,
    /// Wall-clock start, for report metadata.
    collection_started_at_utc: DateTime<Utc>,
    locale: String,
}

const DEFAULT_CHANNEL_CAPACITY: usize = 100;

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
            locale: String::new(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// UI locale recorded in exported reports.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Moves every queued event into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Logs an action directly to the buffer, bypassing the channel.
    pub fn log_action(&mut self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&mut self, action: UserAction, details: Option<String>) {
        // Drain first so direct entries stay in order with queued ones.
        self.process_pending();
        self.buffer.push(DiagnosticEvent::new(DiagnosticEventKind::UserAction {
            action,
            details: details.map(|d| sanitize_message(&d)),
        }));
    }

    pub fn log_state(&mut self, state: AppStateEvent) {
        self.process_pending();
        self.buffer
            .push(DiagnosticEvent::new(DiagnosticEventKind::AppState { state }));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Serializes the buffer as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        self.build_report().to_json()
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.kind.clone(),
                )
            })
            .collect();

        let metadata = ReportMetadata::new(
            self.collection_started_at_utc,
            collection_duration_ms,
            events.len(),
        );

        DiagnosticReport::new(metadata, SystemInfo::collect(self.locale.clone()), events)
    }

    /// Writes a report to `path` atomically and returns the path written.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail.
    /// Returns `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;

        write_atomic(path, &json)?;

        Ok(path.to_path_buf())
    }

    /// Writes a report with a timestamped name into `dir`.
    ///
    /// # Errors
    ///
    /// See [`export_to_file`](Self::export_to_file).
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        self.export_to_file(dir.as_ref().join(generate_default_filename()))
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{ErrorType, WarningType};
    use tempfile::tempdir;

    #[test]
    fn handle_events_arrive_after_process_pending() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_action(UserAction::ChooseFile);
        handle.log_state(AppStateEvent::ProgressCompleted);
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn handle_sanitizes_warning_and_error_messages() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_warning(WarningEvent::new(
            WarningType::UnsupportedFormat,
            "Rejected /home/ana/sales.xlsx",
        ));
        handle.log_error(ErrorEvent::new(
            ErrorType::IoError,
            "Cannot write C:\\Users\\ana\\report.json",
        ));
        collector.process_pending();

        let messages: Vec<_> = collector
            .iter()
            .filter_map(|event| match &event.kind {
                DiagnosticEventKind::Warning { event } => Some(event.message.clone()),
                DiagnosticEventKind::Error { event } => Some(event.message.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(messages, vec!["Rejected <path>", "Cannot write <path>"]);
    }

    #[test]
    fn direct_logging_keeps_queued_events_first() {
        let mut collector = DiagnosticsCollector::default();
        collector
            .handle()
            .log_state(AppStateEvent::ProgressStarted { steps: 2 });

        collector.log_action(UserAction::ExportDiagnostics);

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert!(matches!(kinds[0], DiagnosticEventKind::AppState { .. }));
        assert!(matches!(kinds[1], DiagnosticEventKind::UserAction { .. }));
    }

    #[test]
    fn full_channel_drops_events_without_blocking() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..DEFAULT_CHANNEL_CAPACITY + 5 {
            handle.log_action(UserAction::DismissNotification);
        }

        collector.process_pending();
        assert_eq!(collector.len(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn buffer_evicts_beyond_capacity() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10));
        for index in 0..15 {
            collector.log_action(UserAction::SelectDataset { index });
        }
        assert_eq!(collector.len(), 10);
        assert_eq!(collector.capacity(), 10);
    }

    #[test]
    fn export_to_dir_writes_named_report() {
        let dir = tempdir().expect("temp dir");
        let mut collector = DiagnosticsCollector::default();
        collector.set_locale("id");
        collector.log_state(AppStateEvent::FlashAdopted { count: 3 });

        let path = collector.export_to_dir(dir.path()).expect("export");

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("sales_lens_diagnostics_"));
        let json = std::fs::read_to_string(&path).expect("read report");
        let report: DiagnosticReport = serde_json::from_str(&json).expect("valid report");
        assert_eq!(report.metadata.event_count, 1);
        assert_eq!(report.system_info.locale, "id");
    }
}
