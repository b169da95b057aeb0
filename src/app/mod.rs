// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the dashboard components.
//!
//! The `App` owns one notification manager and one progress sequencer and
//! hands the manager to the sequencer on each call. Startup turns any
//! pending flash banners (CLI `--flash` values and a config load warning)
//! into staggered toasts.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{AnalysisOutcome, Flags, Message};

use crate::diagnostics::{AppStateEvent, BufferCapacity, DiagnosticsCollector};
use crate::i18n::fluent::I18n;
use crate::ui::confirm::ConfirmDialog;
use crate::ui::notifications::{self, FlashBanner};
use crate::ui::progress::Sequencer;
use crate::ui::theming::ThemeMode;
use crate::ui::upload::State as UploadState;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    theme_mode: ThemeMode,
    notifications: notifications::Manager,
    sequencer: Sequencer,
    confirm: ConfirmDialog,
    upload: UploadState,
    diagnostics: DiagnosticsCollector,
    /// Banners rendered before the toast system was up; adopted at boot.
    flashes: Vec<FlashBanner>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", self.i18n.current_locale())
            .field("visible_toasts", &self.notifications.visible_count())
            .field("progress", &self.sequencer.state())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 640;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

#[must_use]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || App::new(boot_state.borrow_mut().take().unwrap_or_default());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        (Self::with_config(flags, config, config_warning, Instant::now()), Task::none())
    }

    /// Builds the app from an already loaded configuration.
    ///
    /// `config_warning` is an i18n key; it is shown as the first flash banner.
    fn with_config(
        flags: Flags,
        config: Config,
        config_warning: Option<String>,
        now: Instant,
    ) -> Self {
        let i18n = I18n::new(flags.lang, &config);

        let mut diagnostics =
            DiagnosticsCollector::new(BufferCapacity::new(config.diagnostics_capacity()));
        diagnostics.set_locale(i18n.current_locale().to_string());

        let mut notifications = notifications::Manager::with_settings(config.notification_settings());
        notifications.set_diagnostics(diagnostics.handle());
        let mut sequencer = Sequencer::new();
        sequencer.set_diagnostics(diagnostics.handle());

        let mut flashes: Vec<FlashBanner> = config_warning
            .map(|key| FlashBanner::new("warning", i18n.tr(&key)))
            .into_iter()
            .chain(flags.flashes.iter().map(|raw| FlashBanner::parse(raw)))
            .collect();

        diagnostics.log_state(AppStateEvent::AppStarted {
            locale: i18n.current_locale().to_string(),
        });
        let adopted = notifications.adopt_existing_messages(&mut flashes, now);
        if adopted > 0 {
            diagnostics.log_state(AppStateEvent::FlashAdopted { count: adopted });
        }

        Self {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            notifications,
            sequencer,
            confirm: ConfirmDialog::new(),
            upload: UploadState::new(),
            diagnostics,
            flashes,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("app-title");
        match self.upload.active_dataset() {
            Some(dataset) => format!("{dataset} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            self.notifications.has_notifications(),
            self.sequencer.is_running(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let now = match &message {
            Message::Tick(instant) => *instant,
            _ => Instant::now(),
        };
        self.update_at(message, now)
    }

    fn update_at(&mut self, message: Message, now: Instant) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            config: &self.config,
            notifications: &mut self.notifications,
            sequencer: &mut self.sequencer,
            confirm: &mut self.confirm,
            upload: &mut self.upload,
            diagnostics: &mut self.diagnostics,
        };

        match message {
            Message::Tick(_) => update::handle_tick(&mut ctx, now),
            Message::Notification(notification_message) => {
                update::handle_notification_message(&mut ctx, notification_message)
            }
            Message::Upload(upload_message) => {
                update::handle_upload_message(&mut ctx, upload_message, now)
            }
            Message::Confirm(confirm_message) => {
                update::handle_confirm_message(&mut ctx, confirm_message, now)
            }
            Message::FileDialogResult(path) => {
                update::submit_upload(&mut ctx, path, "file_dialog", now)
            }
            Message::FileHovered => {
                ctx.upload.set_drag_over(true);
                Task::none()
            }
            Message::FilesHoveredLeft => {
                ctx.upload.set_drag_over(false);
                Task::none()
            }
            Message::FileDropped(path) => {
                ctx.upload.set_drag_over(false);
                update::submit_upload(&mut ctx, Some(path), "drag_drop", now)
            }
            Message::AnalysisFinished { run, outcome } => {
                update::handle_analysis_finished(&mut ctx, run, outcome, now)
            }
            Message::WindowCloseRequested(id) => {
                ctx.diagnostics.process_pending();
                window::close(id)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            upload: &self.upload,
            notifications: &self.notifications,
            confirm: &self.confirm,
        })
    }
}
