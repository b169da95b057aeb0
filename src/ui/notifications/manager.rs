// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` handles display timing, deferred display and dismissal of
//! notifications. Time never comes from the wall clock here: every
//! operation takes the current `Instant` so that the update loop (and tests)
//! decide when timers elapse.

use super::notification::{Content, Notification, NotificationId, Severity};
use crate::app::config::{DEFAULT_FLASH_STAGGER_MS, DEFAULT_NOTIFICATION_DURATION_MS};
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for promoting scheduled notifications and checking auto-dismiss timers.
    Tick(Instant),
}

/// Timing parameters for a [`Manager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Lifetime applied to notifications that do not request their own.
    pub default_duration: Duration,
    /// Delay between consecutive adopted flash banners.
    pub stagger: Duration,
    /// Optional cap on simultaneously visible toasts. `None` stacks freely.
    pub max_visible: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
            stagger: Duration::from_millis(DEFAULT_FLASH_STAGGER_MS),
            max_visible: None,
        }
    }
}

/// A notification waiting for its display instant.
#[derive(Debug)]
struct Scheduled {
    due: Instant,
    notification: Notification,
}

/// Manages visible and scheduled notifications.
#[derive(Debug, Default)]
pub struct Manager {
    /// Currently visible notifications (oldest first).
    visible: VecDeque<Notification>,
    /// Notifications waiting to be displayed, ordered by due instant then
    /// registration order.
    scheduled: Vec<Scheduled>,
    settings: Settings,
    /// Optional diagnostics handle for logging warnings/errors.
    diagnostics: Option<DiagnosticsHandle>,
}

impl Manager {
    /// Creates a new empty notification manager with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager with explicit timings.
    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Returns the active timings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Replaces the timings. Already visible notifications keep their deadlines.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Sets the diagnostics handle for logging warnings and errors.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Shows a plain-text message right away.
    ///
    /// `severity` is a free-form label; anything other than `success`,
    /// `error`, `warning` or `info` is shown as `info`. A `None` duration
    /// uses the configured default.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: &str,
        duration: Option<Duration>,
        now: Instant,
    ) -> NotificationId {
        let mut notification = Notification::plain(Severity::from_label(severity), message);
        if let Some(duration) = duration {
            notification = notification.auto_dismiss(duration);
        }
        self.push(notification, now)
    }

    /// Pushes a notification to be displayed immediately.
    ///
    /// Visible toasts stack without limit unless `max_visible` is set, in
    /// which case the oldest visible toast makes room for the new one.
    ///
    /// Warnings and errors are logged to the diagnostics system.
    pub fn push(&mut self, mut notification: Notification, now: Instant) -> NotificationId {
        self.log_to_diagnostics(&notification);

        let id = notification.id();
        notification.mark_shown(now, self.settings.default_duration);
        self.visible.push_back(notification);

        if let Some(max) = self.settings.max_visible {
            while self.visible.len() > max.max(1) {
                self.visible.pop_front();
            }
        }
        id
    }

    /// Defers a notification until `now + delay`.
    ///
    /// It becomes visible on the first [`Manager::tick`] at or after that
    /// instant. Notifications due at the same instant appear in the order
    /// they were scheduled.
    pub fn schedule(
        &mut self,
        notification: Notification,
        delay: Duration,
        now: Instant,
    ) -> NotificationId {
        let id = notification.id();
        let due = now + delay;
        let position = self.scheduled.partition_point(|entry| entry.due <= due);
        self.scheduled
            .insert(position, Scheduled { due, notification });
        id
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed. Dismissing
    /// an unknown or already removed notification is a no-op.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            return true;
        }

        if let Some(pos) = self
            .scheduled
            .iter()
            .position(|entry| entry.notification.id() == id)
        {
            self.scheduled.remove(pos);
            return true;
        }

        false
    }

    /// Processes a tick: shows scheduled notifications that are due, then
    /// removes visible ones whose lifetime has elapsed.
    pub fn tick(&mut self, now: Instant) {
        let due_count = self.scheduled.partition_point(|entry| entry.due <= now);
        let due: Vec<Scheduled> = self.scheduled.drain(..due_count).collect();
        for entry in due {
            // Lifetimes count from the scheduled instant, not from a late tick.
            self.push(entry.notification, entry.due);
        }

        self.visible.retain(|n| !n.is_expired(now));
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick(now) => {
                self.tick(*now);
            }
        }
    }

    /// Returns the currently visible notifications, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    /// Returns a visible notification by ID.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.visible.iter().find(|n| n.id() == id)
    }

    /// Returns whether the notification is currently on screen.
    #[must_use]
    pub fn is_visible(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of visible notifications.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Returns the number of notifications waiting for their display instant.
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Returns the due instants of scheduled notifications, in display order.
    pub fn scheduled_due(&self) -> impl Iterator<Item = (NotificationId, Instant)> + '_ {
        self.scheduled
            .iter()
            .map(|entry| (entry.notification.id(), entry.due))
    }

    /// Returns whether there are any notifications (visible or scheduled).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.scheduled.is_empty()
    }

    /// Clears all notifications (visible and scheduled).
    pub fn clear(&mut self) {
        self.visible.clear();
        self.scheduled.clear();
    }

    /// Keeps only the notifications (visible and scheduled) matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Notification) -> bool) {
        self.visible.retain(|n| keep(n));
        self.scheduled.retain(|entry| keep(&entry.notification));
    }

    fn log_to_diagnostics(&self, notification: &Notification) {
        let Some(handle) = &self.diagnostics else {
            return;
        };
        let message = match notification.content() {
            Content::Localized { key, .. } => key.clone(),
            Content::Plain(text) => text.clone(),
        };
        match notification.severity() {
            Severity::Warning => {
                handle.log_warning(WarningEvent::new(WarningType::Other, message));
            }
            Severity::Error => {
                handle.log_error(ErrorEvent::new(ErrorType::Other, message));
            }
            Severity::Success | Severity::Info => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert_eq!(manager.visible_count(), 0);
        assert_eq!(manager.scheduled_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn notify_is_visible_immediately_and_gone_after_duration() {
        let mut manager = Manager::new();
        let start = Instant::now();

        let id = manager.notify("Saved", "success", Some(ms(2000)), start);
        assert!(manager.is_visible(id));

        manager.tick(start + ms(1999));
        assert!(manager.is_visible(id));

        manager.tick(start + ms(2000));
        assert!(!manager.is_visible(id));
    }

    #[test]
    fn notify_defaults_to_five_seconds() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.notify("hello", "info", None, start);

        manager.tick(start + ms(4999));
        assert!(manager.is_visible(id));
        manager.tick(start + ms(5000));
        assert!(!manager.is_visible(id));
    }

    #[test]
    fn notify_with_unknown_severity_uses_info() {
        let mut manager = Manager::new();
        let id = manager.notify("hello", "fatal", None, Instant::now());
        assert_eq!(manager.get(id).map(Notification::severity), Some(Severity::Info));
    }

    #[test]
    fn zero_duration_is_removed_on_next_tick() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.notify("flash", "info", Some(Duration::ZERO), start);
        assert!(manager.is_visible(id));
        manager.tick(start);
        assert!(!manager.is_visible(id));
    }

    #[test]
    fn toasts_stack_without_limit_by_default() {
        let mut manager = Manager::new();
        let now = Instant::now();
        for i in 0..25 {
            manager.push(Notification::success(format!("test-{i}")), now);
        }
        assert_eq!(manager.visible_count(), 25);
    }

    #[test]
    fn max_visible_evicts_oldest() {
        let mut manager = Manager::with_settings(Settings {
            max_visible: Some(2),
            ..Settings::default()
        });
        let now = Instant::now();
        let first = manager.push(Notification::info("first"), now);
        let second = manager.push(Notification::info("second"), now);
        let third = manager.push(Notification::info("third"), now);

        assert!(!manager.is_visible(first));
        assert!(manager.is_visible(second));
        assert!(manager.is_visible(third));
    }

    #[test]
    fn dismiss_removes_from_visible() {
        let mut manager = Manager::new();
        let id = manager.push(Notification::success("test"), Instant::now());

        assert!(manager.dismiss(id));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn dismiss_twice_is_safe() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.notify("bye", "info", Some(ms(10)), start);

        assert!(manager.dismiss(id));
        assert!(!manager.dismiss(id));

        // The elapsed timer must not disturb anything either.
        manager.tick(start + ms(10));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn dismiss_nonexistent_returns_false() {
        let mut manager = Manager::new();
        let fake_id = Notification::success("temp").id();

        assert!(!manager.dismiss(fake_id));
    }

    #[test]
    fn scheduled_notification_appears_when_due() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.schedule(Notification::info("later"), ms(300), start);

        assert!(!manager.is_visible(id));
        assert_eq!(manager.scheduled_count(), 1);

        manager.tick(start + ms(299));
        assert!(!manager.is_visible(id));

        manager.tick(start + ms(300));
        assert!(manager.is_visible(id));
        assert_eq!(manager.scheduled_count(), 0);
    }

    #[test]
    fn late_tick_counts_lifetime_from_due_instant() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.schedule(
            Notification::info("late").auto_dismiss(ms(1000)),
            ms(100),
            start,
        );

        manager.tick(start + ms(1100));
        assert!(!manager.is_visible(id));
    }

    #[test]
    fn scheduled_ties_keep_registration_order() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let a = manager.schedule(Notification::info("a"), ms(100), start);
        let b = manager.schedule(Notification::info("b"), ms(50), start);
        let c = manager.schedule(Notification::info("c"), ms(100), start);

        let order: Vec<_> = manager.scheduled_due().map(|(id, _)| id).collect();
        assert_eq!(order, vec![b, a, c]);

        manager.tick(start + ms(100));
        let shown: Vec<_> = manager.visible().map(Notification::id).collect();
        assert_eq!(shown, vec![b, a, c]);
    }

    #[test]
    fn dismiss_cancels_scheduled_notification() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.schedule(Notification::info("never"), ms(300), start);

        assert!(manager.dismiss(id));
        manager.tick(start + ms(300));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn clear_removes_all() {
        let mut manager = Manager::new();
        let now = Instant::now();

        for i in 0..5 {
            manager.push(Notification::success(format!("test-{i}")), now);
        }
        manager.schedule(Notification::info("later"), ms(10), now);

        manager.clear();
        assert_eq!(manager.visible_count(), 0);
        assert_eq!(manager.scheduled_count(), 0);
    }

    #[test]
    fn handle_message_dismiss() {
        let mut manager = Manager::new();
        let id = manager.push(Notification::success("test"), Instant::now());

        manager.handle_message(&Message::Dismiss(id));
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn sticky_notifications_survive_ticks() {
        let mut manager = Manager::new();
        let start = Instant::now();
        let id = manager.push(Notification::error("test-error").sticky(), start);

        manager.handle_message(&Message::Tick(start + Duration::from_secs(600)));
        assert!(manager.is_visible(id));

        manager.dismiss(id);
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn retain_filters_visible_and_scheduled() {
        let mut manager = Manager::new();
        let now = Instant::now();
        manager.push(Notification::error("upload-error-format"), now);
        manager.push(Notification::success("analysis-done"), now);
        manager.schedule(Notification::error("upload-error-empty"), ms(10), now);

        manager.retain(|n| !n.message_key().is_some_and(|k| k.starts_with("upload-error-")));

        assert_eq!(manager.visible_count(), 1);
        assert_eq!(manager.scheduled_count(), 0);
    }
}
