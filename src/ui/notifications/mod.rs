// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Notifications appear temporarily to inform
//! users about actions (upload accepted, analysis finished, errors) without
//! blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for scheduling and lifecycle management
//! - [`flash`] - Adoption of server-rendered flash banners
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//! use std::time::Instant;
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::success("notification-upload-accepted"), Instant::now());
//!
//! // In your view function, render toasts
//! let toast_overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```
//!
//! # Design Considerations
//!
//! - Toast duration: 5s unless the notification asks otherwise
//! - No visible cap by default; toasts stack
//! - Position: top-right corner

mod flash;
mod manager;
mod notification;
mod toast;

pub use flash::{FlashBanner, FlashSource};
pub use manager::{Manager, Message as NotificationMessage, Settings};
pub use notification::{Content, Lifetime, Notification, NotificationId, Severity};
pub use toast::Toast;
