// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the timer tick while anything time-based is pending.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Routes window events: file hover/drop for the upload panel and close
/// requests for cleanup.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        event::Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        event::Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        _ => None,
    })
}

/// Ticks while toasts are visible or scheduled, or a progress run is active.
pub fn create_tick_subscription(has_notifications: bool, progress_running: bool) -> Subscription<Message> {
    if has_notifications || progress_running {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
