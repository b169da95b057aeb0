// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report structures for JSON export.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DiagnosticEventKind;

// =============================================================================
// Report Metadata
// =============================================================================

/// Metadata about a diagnostic report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Unique identifier for this report (UUID v4)
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Version of the dashboard that generated the report
    pub app_version: String,
    pub collection_started_at: DateTime<Utc>,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at,
            collection_duration_ms,
            event_count,
        }
    }
}

// =============================================================================
// Environment
// =============================================================================

/// Build target and UI locale the report was produced with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub cpu_arch: String,
    pub locale: String,
}

impl SystemInfo {
    #[must_use]
    pub fn collect(locale: impl Into<String>) -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            cpu_arch: std::env::consts::ARCH.to_string(),
            locale: locale.into(),
        }
    }
}

// =============================================================================
// Serializable Event
// =============================================================================

/// A diagnostic event with its timestamp made relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self { timestamp_ms, kind }
    }
}

// =============================================================================
// Report Summary
// =============================================================================

/// Event counts by type, e.g. `"warning": 2`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReportSummary {
    pub event_counts: BTreeMap<String, usize>,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut event_counts = BTreeMap::new();
        for event in events {
            let type_name = match &event.kind {
                DiagnosticEventKind::UserAction { .. } => "user_action",
                DiagnosticEventKind::AppState { .. } => "app_state",
                DiagnosticEventKind::Warning { .. } => "warning",
                DiagnosticEventKind::Error { .. } => "error",
            };
            *event_counts.entry(type_name.to_string()).or_insert(0) += 1;
        }
        Self { event_counts }
    }
}

// =============================================================================
// Diagnostic Report
// =============================================================================

/// A complete diagnostic report ready for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub system_info: SystemInfo,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}

impl DiagnosticReport {
    /// Creates a report, computing the summary from `events`.
    #[must_use]
    pub fn new(
        metadata: ReportMetadata,
        system_info: SystemInfo,
        events: Vec<SerializableEvent>,
    ) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            system_info,
            events,
            summary,
        }
    }

    /// Exports the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
