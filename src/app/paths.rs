// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`SALES_LENS_DATA_DIR`, `SALES_LENS_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate, with the application name appended

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "SalesLens";

/// Subdirectory of the data directory receiving diagnostic reports.
const DIAGNOSTICS_DIR: &str = "diagnostics";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "SALES_LENS_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "SALES_LENS_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` CLI arguments.
///
/// Only the first call has an effect; returns `false` for later calls.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) -> bool {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    data_set && config_set
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform_dir: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application data directory (diagnostic reports).
///
/// - Linux: `~/.local/share/SalesLens/`
/// - macOS: `~/Library/Application Support/SalesLens/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\SalesLens\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the application config directory (`settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}

/// Returns the directory diagnostic reports are exported to.
pub fn get_diagnostics_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|mut path| {
        path.push(DIAGNOSTICS_DIR);
        path
    })
}
