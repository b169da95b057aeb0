// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! Events describe what the user did and how the dashboard reacted, so an
//! exported report can be read as a timeline next to a bug description.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{ErrorType, WarningType};

/// User-initiated actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    /// Open the native file dialog.
    ChooseFile,

    /// Submit a file for analysis.
    SubmitUpload {
        /// How the file arrived (`file_dialog`, `drag_drop`).
        source: String,
    },

    /// Switch the active dataset.
    SelectDataset { index: usize },

    /// Merge every dataset into a new one.
    CombineDatasets,

    /// Ask for a destructive action; opens the confirmation dialog.
    RequestClear { target: String },

    /// Accept the pending destructive action.
    ConfirmClear { target: String },

    /// Dismiss the pending destructive action.
    CancelClear { target: String },

    /// Close a toast with its dismiss button.
    DismissNotification,

    /// Save a diagnostics report.
    ExportDiagnostics,
}

/// Application state transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// The dashboard finished booting.
    AppStarted { locale: String },

    /// Server-rendered banners were turned into toasts.
    FlashAdopted { count: usize },

    /// A progress run began.
    ProgressStarted { steps: usize },

    /// The current progress run finished successfully.
    ProgressCompleted,

    /// The current progress run failed.
    ProgressFailed { reason: String },

    /// An analyzed upload joined the dataset history.
    DatasetAdded { total: usize },

    /// The active dataset changed.
    DatasetSwitched { index: usize },

    /// Datasets were merged into a new active dataset.
    DatasetsCombined { count: usize },

    /// The active dataset was removed.
    DatasetCleared { remaining: usize },

    /// Every dataset was removed.
    AllDataCleared { count: usize },
}

/// A non-critical issue shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_module: Option<String>,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
            source_module: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, module: impl Into<String>) -> Self {
        self.source_module = Some(module.into());
        self
    }
}

/// A failure shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_module: Option<String>,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            source_module: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, module: impl Into<String>) -> Self {
        self.source_module = Some(module.into());
        self
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self::with_timestamp(kind, Instant::now())
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        /// Optional context (e.g. a sanitized filename).
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    AppState {
        state: AppStateEvent,
    },
    Warning {
        event: WarningEvent,
    },
    Error {
        event: ErrorEvent,
    },
}
