// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[notifications]` - Toast lifetime, flash banner stagger, optional visible cap
//! - `[progress]` - Analysis progress script and simulated completion delay
//! - `[diagnostics]` - Event buffer capacity
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `SALES_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use sales_lens::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.general.language = Some("id".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::notifications::Settings as NotificationSettings;
use crate::ui::progress::ProgressScript;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "id").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default = "default_duration_ms", skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,

    /// Delay between adopted flash banners, in milliseconds.
    #[serde(default = "default_stagger_ms", skip_serializing_if = "Option::is_none")]
    pub stagger_ms: Option<u64>,

    /// Maximum number of toasts on screen. Unset means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            stagger_ms: default_stagger_ms(),
            max_visible: None,
        }
    }
}

/// A configured progress step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressStepConfig {
    /// Text shown while the step is current.
    pub message: String,
    /// Offset from the start of the run, in milliseconds.
    #[serde(default)]
    pub offset_ms: u64,
}

/// Analysis progress settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressConfig {
    /// Custom steps. When empty, the built-in localized analysis script is used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<ProgressStepConfig>,

    /// Delay after which an analysis is reported complete, in milliseconds.
    #[serde(
        default = "default_simulated_completion_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub simulated_completion_ms: Option<u64>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            simulated_completion_ms: default_simulated_completion_ms(),
        }
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Toast timings, clamped to supported ranges.
    #[must_use]
    pub fn notification_settings(&self) -> NotificationSettings {
        let duration_ms = self
            .notifications
            .duration_ms
            .unwrap_or(DEFAULT_NOTIFICATION_DURATION_MS)
            .min(MAX_NOTIFICATION_DURATION_MS);
        let stagger_ms = self
            .notifications
            .stagger_ms
            .unwrap_or(DEFAULT_FLASH_STAGGER_MS)
            .min(MAX_FLASH_STAGGER_MS);

        NotificationSettings {
            default_duration: Duration::from_millis(duration_ms),
            stagger: Duration::from_millis(stagger_ms),
            max_visible: self.notifications.max_visible.filter(|max| *max > 0),
        }
    }

    /// Progress script for an upload, clamped to supported ranges.
    #[must_use]
    pub fn progress_script(&self) -> ProgressScript {
        let completion_ms = self
            .progress
            .simulated_completion_ms
            .unwrap_or(DEFAULT_SIMULATED_COMPLETION_MS)
            .clamp(1, MAX_SIMULATED_COMPLETION_MS);
        ProgressScript::from_config(&self.progress.steps, Duration::from_millis(completion_ms))
    }

    /// Diagnostics buffer capacity, clamped to supported ranges.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> usize {
        self.diagnostics
            .buffer_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
            .clamp(MIN_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_duration_ms() -> Option<u64> {
    Some(DEFAULT_NOTIFICATION_DURATION_MS)
}

fn default_stagger_ms() -> Option<u64> {
    Some(DEFAULT_FLASH_STAGGER_MS)
}

fn default_simulated_completion_ms() -> Option<u64> {
    Some(DEFAULT_SIMULATED_COMPLETION_MS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(_) => (
                    Config::default(),
                    Some("notification-config-load-error".to_string()),
                ),
            };
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("id".to_string()),
                theme_mode: ThemeMode::Light,
            },
            notifications: NotificationsConfig {
                duration_ms: Some(2500),
                stagger_ms: Some(150),
                max_visible: Some(4),
            },
            progress: ProgressConfig {
                steps: vec![ProgressStepConfig {
                    message: "Reading ledger".to_string(),
                    offset_ms: 0,
                }],
                simulated_completion_ms: Some(3000),
            },
            diagnostics: DiagnosticsConfig {
                buffer_capacity: Some(200),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_reports_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general]\ntheme_mode = \"sepia\"\n")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_loads_defaults_silently() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[notifications]\nstagger_ms = 500\n").expect("write");

        let config = load_from_path(&config_path).expect("load");

        assert_eq!(config.notifications.stagger_ms, Some(500));
        assert_eq!(
            config.notifications.duration_ms,
            Some(DEFAULT_NOTIFICATION_DURATION_MS)
        );
        assert_eq!(config.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn notification_settings_are_clamped() {
        let config = Config {
            notifications: NotificationsConfig {
                duration_ms: Some(10 * MAX_NOTIFICATION_DURATION_MS),
                stagger_ms: None,
                max_visible: Some(0),
            },
            ..Config::default()
        };
        let settings = config.notification_settings();

        assert_eq!(
            settings.default_duration,
            Duration::from_millis(MAX_NOTIFICATION_DURATION_MS)
        );
        assert_eq!(settings.stagger, Duration::from_millis(DEFAULT_FLASH_STAGGER_MS));
        assert_eq!(settings.max_visible, None);
    }

    #[test]
    fn default_progress_script_uses_analysis_steps() {
        let script = Config::default().progress_script();
        assert_eq!(script.steps(), ProgressScript::analysis().steps());
        assert_eq!(
            script.completion_after(),
            Duration::from_millis(DEFAULT_SIMULATED_COMPLETION_MS)
        );
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let mut config = Config::default();
        assert_eq!(config.diagnostics_capacity(), DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
        config.diagnostics.buffer_capacity = Some(1);
        assert_eq!(config.diagnostics_capacity(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
