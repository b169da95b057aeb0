// SPDX-License-Identifier: MPL-2.0
//! Dashboard presentation layer.
//!
//! Components keep their own state and render from it; the app owns one of
//! each and forwards messages ("state down, messages up").
//!
//! - [`notifications`] - Toast queue and flash banner adoption
//! - [`progress`] - Scripted progress toasts for a running analysis
//! - [`confirm`] - Confirmation dialog for destructive actions
//! - [`upload`] - File selection, drop zone and dataset history
//! - [`design_tokens`] - Colors, spacing and sizing constants
//! - [`theming`] - Light/Dark/System theme mode

pub mod confirm;
pub mod design_tokens;
pub mod notifications;
pub mod progress;
pub mod theming;
pub mod upload;
