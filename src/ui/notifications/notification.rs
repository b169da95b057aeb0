// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines icon and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully (green).
    Success,
    /// Failure reported to the user (red).
    Error,
    /// Something worth attention that did not stop the operation (orange).
    Warning,
    /// Neutral message (blue). Fallback for unknown labels.
    #[default]
    Info,
}

impl Severity {
    /// All severities, in display order.
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Parses a severity label, falling back to [`Severity::Info`] for
    /// anything unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" | "danger" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    /// Returns the canonical label for this severity.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Returns the symbolic icon name for this severity.
    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Info => "info-circle",
        }
    }

    /// Returns the text glyph drawn in the toast for this severity.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Success => "\u{2714}",
            Severity::Error => "\u{2716}",
            Severity::Warning => "\u{26A0}",
            Severity::Info => "\u{2139}",
        }
    }

    /// Returns the primary color for this severity level.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }
}

/// What a notification says.
///
/// Messages produced by the application are localization keys resolved at
/// render time. Text that arrives already formatted (server flash messages,
/// caller-built failure reasons) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Localized {
        key: String,
        args: Vec<(String, String)>,
    },
    Plain(String),
}

impl Content {
    /// Resolves the displayed text.
    #[must_use]
    pub fn resolve(&self, i18n: &I18n) -> String {
        match self {
            Content::Plain(text) => text.clone(),
            Content::Localized { key, args } if args.is_empty() => i18n.tr(key),
            Content::Localized { key, args } => {
                let args: Vec<(&str, &str)> =
                    args.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                i18n.tr_with_args(key, &args)
            }
        }
    }

    /// Returns the localization key, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Content::Localized { key, .. } => Some(key),
            Content::Plain(_) => None,
        }
    }

    /// Returns true when the raw content (plain text, key or any argument
    /// value) contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            Content::Plain(text) => text.contains(needle),
            Content::Localized { key, args } => {
                key.contains(needle) || args.iter().any(|(_, v)| v.contains(needle))
            }
        }
    }
}

/// How long a notification stays on screen once shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// Use the manager's configured default duration.
    #[default]
    Default,
    /// Dismiss after this duration.
    For(Duration),
    /// Stay until dismissed or superseded.
    Sticky,
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique identifier for this notification.
    id: NotificationId,
    /// Severity level (determines color and icon).
    severity: Severity,
    /// The message to show.
    content: Content,
    /// Requested on-screen lifetime.
    lifetime: Lifetime,
    /// When this notification became visible. `None` until the manager shows it.
    shown_at: Option<Instant>,
    /// Resolved dismissal deadline, set when shown.
    expires_at: Option<Instant>,
}

impl Notification {
    /// Creates a new notification with the given severity and message key.
    ///
    /// The `message_key` should be a valid i18n key that will be resolved
    /// at render time.
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self::with_content(
            severity,
            Content::Localized {
                key: message_key.into(),
                args: Vec::new(),
            },
        )
    }

    /// Creates a notification that shows `text` verbatim.
    pub fn plain(severity: Severity, text: impl Into<String>) -> Self {
        Self::with_content(severity, Content::Plain(text.into()))
    }

    fn with_content(severity: Severity, content: Content) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            content,
            lifetime: Lifetime::Default,
            shown_at: None,
            expires_at: None,
        }
    }

    /// Creates a success notification.
    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    /// Creates an info notification.
    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    /// Creates a warning notification.
    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    /// Creates an error notification.
    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds an argument for message interpolation.
    ///
    /// Ignored for plain-text notifications.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Content::Localized { args, .. } = &mut self.content {
            args.push((key.into(), value.into()));
        }
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the manager default.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.lifetime = Lifetime::For(duration);
        self
    }

    /// Keeps the notification on screen until it is dismissed.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.lifetime = Lifetime::Sticky;
        self
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Returns the i18n message key, if the content is localized.
    #[must_use]
    pub fn message_key(&self) -> Option<&str> {
        self.content.key()
    }

    /// Returns the requested lifetime.
    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Returns when this notification became visible.
    #[must_use]
    pub fn shown_at(&self) -> Option<Instant> {
        self.shown_at
    }

    /// Returns the instant this notification is due for removal.
    #[must_use]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Marks the notification as visible from `now`, resolving its deadline.
    pub(super) fn mark_shown(&mut self, now: Instant, default_duration: Duration) {
        self.shown_at = Some(now);
        self.expires_at = match self.lifetime {
            Lifetime::Default => Some(now + default_duration),
            Lifetime::For(duration) => Some(now + duration),
            Lifetime::Sticky => None,
        };
    }

    /// Returns whether this notification is due for removal at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::success("test");
        let n2 = Notification::success("test");
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn severity_colors_are_distinct() {
        let success = Severity::Success.color();
        let info = Severity::Info.color();
        let warning = Severity::Warning.color();
        let error = Severity::Error.color();

        assert_ne!(success, info);
        assert_ne!(success, warning);
        assert_ne!(success, error);
        assert_ne!(info, warning);
        assert_ne!(info, error);
        assert_ne!(warning, error);
    }

    #[test]
    fn severity_icons_follow_category() {
        assert_eq!(Severity::Success.icon_name(), "check-circle");
        assert_eq!(Severity::Error.icon_name(), "exclamation-circle");
        assert_eq!(Severity::Warning.icon_name(), "exclamation-triangle");
        assert_eq!(Severity::Info.icon_name(), "info-circle");
    }

    #[test]
    fn severity_labels_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_label(severity.label()), severity);
        }
    }

    #[test]
    fn unknown_severity_label_falls_back_to_info() {
        assert_eq!(Severity::from_label("critical"), Severity::Info);
        assert_eq!(Severity::from_label(""), Severity::Info);
        assert_eq!(Severity::from_label(" Danger "), Severity::Error);
    }

    #[test]
    fn notification_builder_pattern_works() {
        let notification = Notification::error("test-error")
            .with_arg("filename", "sales.csv")
            .with_arg("rows", "1024");

        assert_eq!(notification.severity(), Severity::Error);
        assert_eq!(notification.message_key(), Some("test-error"));
        match notification.content() {
            Content::Localized { args, .. } => assert_eq!(args.len(), 2),
            Content::Plain(_) => panic!("expected localized content"),
        }
    }

    #[test]
    fn plain_notifications_ignore_arguments() {
        let notification = Notification::plain(Severity::Info, "Uploaded").with_arg("a", "b");
        assert_eq!(notification.content(), &Content::Plain("Uploaded".into()));
        assert!(notification.message_key().is_none());
    }

    #[test]
    fn notification_constructors_set_correct_severity() {
        assert_eq!(Notification::success("").severity(), Severity::Success);
        assert_eq!(Notification::info("").severity(), Severity::Info);
        assert_eq!(Notification::warning("").severity(), Severity::Warning);
        assert_eq!(Notification::error("").severity(), Severity::Error);
    }

    #[test]
    fn mark_shown_resolves_deadline_from_lifetime() {
        let now = Instant::now();
        let default = Duration::from_secs(5);

        let mut defaulted = Notification::info("a");
        defaulted.mark_shown(now, default);
        assert_eq!(defaulted.expires_at(), Some(now + default));

        let mut custom = Notification::info("b").auto_dismiss(Duration::from_millis(250));
        custom.mark_shown(now, default);
        assert!(!custom.is_expired(now + Duration::from_millis(249)));
        assert!(custom.is_expired(now + Duration::from_millis(250)));

        let mut sticky = Notification::info("c").sticky();
        sticky.mark_shown(now, default);
        assert!(!sticky.is_expired(now + Duration::from_secs(3600)));
    }

    #[test]
    fn content_mentions_checks_arguments() {
        let content = Notification::error("progress-failed")
            .with_arg("message", "disk full")
            .content()
            .clone();
        assert!(content.mentions("disk full"));
        assert!(!content.mentions("network"));
    }
}
