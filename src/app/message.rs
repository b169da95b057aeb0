// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::confirm;
use crate::ui::notifications;
use crate::ui::progress::RunId;
use crate::ui::upload;
use std::path::PathBuf;
use std::time::Instant;

/// How the server answered an analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Succeeded,
    Failed(String),
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Notification(notifications::NotificationMessage),
    Upload(upload::Message),
    Confirm(confirm::Message),
    /// Periodic tick driving toast expiry, flash stagger and progress steps.
    Tick(Instant),
    /// Result from the open file dialog.
    FileDialogResult(Option<PathBuf>),
    /// A file is dragged over the window.
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// The analysis started by `run` finished.
    AnalysisFinished {
        run: RunId,
        outcome: AnalysisOutcome,
    },
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `id`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (diagnostic reports).
    /// Takes precedence over `SALES_LENS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (settings.toml).
    /// Takes precedence over `SALES_LENS_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Banners rendered before startup, as `category:text`.
    pub flashes: Vec<String>,
}
