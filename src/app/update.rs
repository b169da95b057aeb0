// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Each handler takes the instant it runs at so tests can drive time
//! explicitly; the runtime passes `Instant::now()` or the tick instant.

use super::config::Config;
use super::message::AnalysisOutcome;
use super::{paths, Message};
use crate::diagnostics::{
    AppStateEvent, DiagnosticsCollector, ErrorEvent, ErrorType, UserAction, WarningEvent,
    WarningType,
};
use crate::ui::confirm::{self, ConfirmDialog, DestructiveAction};
use crate::ui::notifications::{self, Notification};
use crate::ui::progress::{RunId, Sequencer};
use crate::ui::upload::{self, validate_upload, State as UploadState};
use iced::Task;
use std::path::PathBuf;
use std::time::Instant;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub config: &'a Config,
    pub notifications: &'a mut notifications::Manager,
    pub sequencer: &'a mut Sequencer,
    pub confirm: &'a mut ConfirmDialog,
    pub upload: &'a mut UploadState,
    pub diagnostics: &'a mut DiagnosticsCollector,
}

/// Advances every timer: flash stagger, toast expiry and progress steps.
pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick(now);
    ctx.sequencer.tick(now, ctx.notifications);
    ctx.diagnostics.process_pending();
    Task::none()
}

pub fn handle_notification_message(
    ctx: &mut UpdateContext<'_>,
    message: notifications::NotificationMessage,
) -> Task<Message> {
    if let notifications::NotificationMessage::Dismiss(_) = message {
        ctx.diagnostics.log_action(UserAction::DismissNotification);
    }
    ctx.notifications.handle_message(&message);
    Task::none()
}

pub fn handle_upload_message(
    ctx: &mut UpdateContext<'_>,
    message: upload::Message,
    now: Instant,
) -> Task<Message> {
    match message {
        upload::Message::ChooseFile => {
            ctx.diagnostics.log_action(UserAction::ChooseFile);
            open_file_dialog()
        }
        upload::Message::SelectDataset(index) => {
            ctx.diagnostics
                .log_action(UserAction::SelectDataset { index });
            if let Some(name) = ctx.upload.select(index) {
                let notification =
                    Notification::info("notification-dataset-switched").with_arg("name", name);
                ctx.notifications.push(notification, now);
                ctx.diagnostics
                    .log_state(AppStateEvent::DatasetSwitched { index });
            }
            Task::none()
        }
        upload::Message::CombineDatasets => {
            ctx.diagnostics.log_action(UserAction::CombineDatasets);
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
            combine_datasets(ctx, &stamp, now);
            Task::none()
        }
        upload::Message::RequestClear(action) => {
            ctx.diagnostics.log_action(UserAction::RequestClear {
                target: action.label().to_string(),
            });
            ctx.confirm.request(action);
            Task::none()
        }
        upload::Message::ExportDiagnostics => {
            ctx.diagnostics.log_action(UserAction::ExportDiagnostics);
            export_diagnostics(ctx, now);
            Task::none()
        }
    }
}

fn combine_datasets(ctx: &mut UpdateContext<'_>, stamp: &str, now: Instant) {
    let Some(count) = ctx.upload.combine(stamp) else {
        ctx.diagnostics.handle().log_warning(
            WarningEvent::new(
                WarningType::NotEnoughDatasets,
                ctx.upload.datasets().len().to_string(),
            )
            .with_source("datasets"),
        );
        ctx.notifications
            .push(Notification::warning("notification-combine-needs-two"), now);
        return;
    };

    ctx.diagnostics
        .log_state(AppStateEvent::DatasetsCombined { count });
    let name = ctx.upload.active_dataset().unwrap_or_default().to_string();
    let notification = Notification::success("notification-datasets-combined")
        .with_arg("count", count.to_string())
        .with_arg("name", name);
    ctx.notifications.push(notification, now);
}

fn open_file_dialog() -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .add_filter("PDF / CSV", &upload::ACCEPTED_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::FileDialogResult,
    )
}

fn export_diagnostics(ctx: &mut UpdateContext<'_>, now: Instant) {
    ctx.diagnostics.process_pending();
    let result = paths::get_diagnostics_dir()
        .ok_or(crate::diagnostics::ExportError::NoDirectory)
        .and_then(|dir| ctx.diagnostics.export_to_dir(dir));

    match result {
        Ok(path) => {
            let notification = Notification::success("notification-diagnostics-exported")
                .with_arg("path", path.display().to_string());
            ctx.notifications.push(notification, now);
        }
        Err(err) => {
            let notification = Notification::error("notification-diagnostics-export-error")
                .with_arg("error", err.to_string());
            ctx.notifications.push(notification, now);
            ctx.diagnostics.handle().log_error(
                ErrorEvent::new(ErrorType::ExportError, err.to_string()).with_source("diagnostics"),
            );
        }
    }
}

/// Validates `path` and, when accepted, starts the analysis progress run.
///
/// The simulated server answers after the configured delay with a
/// [`Message::AnalysisFinished`] tagged with the new run.
pub fn submit_upload(
    ctx: &mut UpdateContext<'_>,
    path: Option<PathBuf>,
    source: &str,
    now: Instant,
) -> Task<Message> {
    let file = match validate_upload(path.as_deref()) {
        Ok(file) => file,
        Err(rejection) => {
            ctx.notifications
                .push(Notification::error(rejection.i18n_key()), now);
            let warning_type = match rejection {
                upload::UploadRejection::NoFile => WarningType::NoFile,
                upload::UploadRejection::UnsupportedFormat => WarningType::UnsupportedFormat,
            };
            let detail = path.map(|p| p.display().to_string()).unwrap_or_default();
            ctx.diagnostics
                .handle()
                .log_warning(WarningEvent::new(warning_type, detail).with_source("upload"));
            return Task::none();
        }
    };

    ctx.diagnostics.log_action_with_details(
        UserAction::SubmitUpload {
            source: source.to_string(),
        },
        Some(file.display_name()),
    );
    ctx.upload.begin_analysis(file);

    let script = ctx.config.progress_script();
    let run = ctx
        .sequencer
        .start(script.steps().to_vec(), ctx.notifications, now);
    let delay = script.completion_after();

    // The timer must be created by the executor, not inside `update`.
    Task::perform(
        async move { tokio::time::sleep(delay).await },
        move |()| Message::AnalysisFinished {
            run,
            outcome: AnalysisOutcome::Succeeded,
        },
    )
}

/// Ends the run `run` unless a newer upload superseded it.
pub fn handle_analysis_finished(
    ctx: &mut UpdateContext<'_>,
    run: RunId,
    outcome: AnalysisOutcome,
    now: Instant,
) -> Task<Message> {
    if ctx.sequencer.run_id() != Some(run) {
        return Task::none();
    }

    match outcome {
        AnalysisOutcome::Succeeded => {
            if ctx.upload.finish_analysis().is_some() {
                ctx.diagnostics.log_state(AppStateEvent::DatasetAdded {
                    total: ctx.upload.datasets().len(),
                });
            }
            ctx.sequencer.complete(ctx.notifications, now);
        }
        AnalysisOutcome::Failed(reason) => {
            ctx.upload.abort_analysis();
            ctx.sequencer.fail(reason, ctx.notifications, now);
        }
    }
    Task::none()
}

pub fn handle_confirm_message(
    ctx: &mut UpdateContext<'_>,
    message: confirm::Message,
    now: Instant,
) -> Task<Message> {
    match ctx.confirm.update(message) {
        confirm::Event::Confirmed(action) => {
            ctx.diagnostics.log_action(UserAction::ConfirmClear {
                target: action.label().to_string(),
            });
            clear_data(ctx, action, now);
        }
        confirm::Event::Cancelled(action) => {
            ctx.diagnostics.log_action(UserAction::CancelClear {
                target: action.label().to_string(),
            });
        }
        confirm::Event::None => {}
    }
    Task::none()
}

fn clear_data(ctx: &mut UpdateContext<'_>, action: DestructiveAction, now: Instant) {
    let cleared = match action {
        DestructiveAction::ClearAllData => match ctx.upload.clear_all() {
            0 => None,
            count => {
                ctx.diagnostics
                    .log_state(AppStateEvent::AllDataCleared { count });
                Some(Notification::success("notification-all-cleared"))
            }
        },
        DestructiveAction::ClearCurrentData => ctx.upload.clear_current().map(|name| {
            ctx.diagnostics.log_state(AppStateEvent::DatasetCleared {
                remaining: ctx.upload.datasets().len(),
            });
            Notification::success("notification-dataset-cleared").with_arg("name", name)
        }),
    };

    let notification = cleared.unwrap_or_else(|| {
        ctx.diagnostics.handle().log_warning(
            WarningEvent::new(WarningType::NothingToClear, action.label()).with_source("datasets"),
        );
        let key = match action {
            DestructiveAction::ClearAllData => "notification-nothing-to-delete",
            DestructiveAction::ClearCurrentData => "notification-no-active-dataset",
        };
        Notification::warning(key)
    });
    ctx.notifications.push(notification, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::{Content, Manager, Severity};
    use crate::ui::progress::ProgressEvent;
    use std::time::Duration;

    struct Fixture {
        config: Config,
        notifications: Manager,
        sequencer: Sequencer,
        confirm: ConfirmDialog,
        upload: UploadState,
        diagnostics: DiagnosticsCollector,
    }

    impl Fixture {
        fn new() -> Self {
            let config = Config::default();
            Self {
                notifications: Manager::with_settings(config.notification_settings()),
                config,
                sequencer: Sequencer::new(),
                confirm: ConfirmDialog::new(),
                upload: UploadState::new(),
                diagnostics: DiagnosticsCollector::default(),
            }
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                config: &self.config,
                notifications: &mut self.notifications,
                sequencer: &mut self.sequencer,
                confirm: &mut self.confirm,
                upload: &mut self.upload,
                diagnostics: &mut self.diagnostics,
            }
        }

        fn drop_file(&mut self, name: &str, now: Instant) {
            let _ = submit_upload(&mut self.ctx(), Some(PathBuf::from(name)), "drag_drop", now);
        }

        fn analyze(&mut self, name: &str, now: Instant) {
            self.drop_file(name, now);
            let run = self.sequencer.run_id().expect("run started");
            let _ = handle_analysis_finished(&mut self.ctx(), run, AnalysisOutcome::Succeeded, now);
            self.notifications.clear();
        }

        fn keys(&self) -> Vec<String> {
            self.notifications
                .visible()
                .filter_map(|n| n.message_key().map(str::to_string))
                .collect()
        }
    }

    #[test]
    fn rejected_upload_shows_error_and_starts_nothing() {
        let mut fx = Fixture::new();
        let now = Instant::now();

        fx.drop_file("sales.xlsx", now);

        assert_eq!(fx.keys(), vec!["notification-upload-unsupported-format"]);
        assert!(!fx.sequencer.is_running());
        assert!(fx.upload.in_flight().is_none());
    }

    #[test]
    fn accepted_upload_runs_progress_then_completes() {
        let mut fx = Fixture::new();
        let start = Instant::now();

        fx.drop_file("q1.csv", start);
        assert_eq!(fx.keys(), vec!["progress-step-upload"]);

        let _ = handle_tick(&mut fx.ctx(), start + Duration::from_millis(3000));
        assert_eq!(fx.keys(), vec!["progress-step-analyze"]);

        let run = fx.sequencer.run_id().expect("run in progress");
        let later = start + Duration::from_millis(7000);
        let _ = handle_analysis_finished(&mut fx.ctx(), run, AnalysisOutcome::Succeeded, later);

        assert_eq!(fx.keys(), vec!["progress-complete"]);
        assert_eq!(fx.upload.datasets(), ["q1.csv".to_string()]);
        assert!(!fx.sequencer.is_running());
    }

    #[test]
    fn superseded_run_completion_is_ignored() {
        let mut fx = Fixture::new();
        let start = Instant::now();

        fx.drop_file("q1.csv", start);
        let first = fx.sequencer.run_id().expect("first run");
        fx.drop_file("q2.pdf", start + Duration::from_millis(500));

        let _ = handle_analysis_finished(
            &mut fx.ctx(),
            first,
            AnalysisOutcome::Succeeded,
            start + Duration::from_millis(7000),
        );

        assert!(fx.sequencer.is_running());
        assert!(fx.upload.datasets().is_empty());
        assert_eq!(fx.keys(), vec!["progress-step-upload"]);
    }

    #[test]
    fn failed_analysis_names_reason() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.drop_file("q1.pdf", now);
        let run = fx.sequencer.run_id().expect("run");

        let _ = handle_analysis_finished(
            &mut fx.ctx(),
            run,
            AnalysisOutcome::Failed("PDF has no tables".to_string()),
            now,
        );

        let toasts: Vec<_> = fx.notifications.visible().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity(), Severity::Error);
        assert!(toasts[0].content().mentions("PDF has no tables"));
        assert!(fx.upload.in_flight().is_none());
    }

    #[test]
    fn clear_requires_confirmation() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.drop_file("q1.csv", now);
        let run = fx.sequencer.run_id().expect("run");
        let _ = handle_analysis_finished(&mut fx.ctx(), run, AnalysisOutcome::Succeeded, now);
        fx.notifications.clear();

        let _ = handle_upload_message(
            &mut fx.ctx(),
            upload::Message::RequestClear(DestructiveAction::ClearCurrentData),
            now,
        );
        assert_eq!(fx.upload.datasets().len(), 1);
        assert!(fx.confirm.is_open());

        let _ = handle_confirm_message(&mut fx.ctx(), confirm::Message::Confirm, now);
        assert!(fx.upload.datasets().is_empty());
        assert_eq!(fx.keys(), vec!["notification-dataset-cleared"]);
    }

    #[test]
    fn clearing_empty_history_warns() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.confirm.request(DestructiveAction::ClearAllData);

        let _ = handle_confirm_message(&mut fx.ctx(), confirm::Message::Confirm, now);

        let toasts: Vec<_> = fx.notifications.visible().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity(), Severity::Warning);
        assert_eq!(fx.keys(), vec!["notification-nothing-to-delete"]);
    }

    #[test]
    fn clearing_without_active_dataset_names_the_missing_dataset() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.confirm.request(DestructiveAction::ClearCurrentData);

        let _ = handle_confirm_message(&mut fx.ctx(), confirm::Message::Confirm, now);

        assert_eq!(fx.keys(), vec!["notification-no-active-dataset"]);
    }

    #[test]
    fn combining_a_single_dataset_warns() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.analyze("q1.csv", now);

        combine_datasets(&mut fx.ctx(), "20240105_093000", now);

        assert_eq!(fx.keys(), vec!["notification-combine-needs-two"]);
        assert_eq!(fx.upload.datasets().len(), 1);
        assert_eq!(fx.upload.active_dataset(), Some("q1.csv"));
    }

    #[test]
    fn combining_datasets_adds_active_merge_and_reports_count() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.analyze("q1.csv", now);
        fx.analyze("q2.pdf", now);

        combine_datasets(&mut fx.ctx(), "20240105_093000", now);

        assert_eq!(fx.keys(), vec!["notification-datasets-combined"]);
        let toast = fx.notifications.visible().next().expect("success toast");
        assert_eq!(toast.severity(), Severity::Success);
        assert!(toast.content().mentions("Gabungan_20240105_093000"));
        assert_eq!(fx.upload.datasets().len(), 3);
        assert_eq!(fx.upload.active_dataset(), Some("Gabungan_20240105_093000"));
    }

    #[test]
    fn combine_message_is_routed_from_the_panel() {
        let mut fx = Fixture::new();
        let now = Instant::now();

        let _ = handle_upload_message(&mut fx.ctx(), upload::Message::CombineDatasets, now);

        assert_eq!(fx.keys(), vec!["notification-combine-needs-two"]);
    }

    #[test]
    fn cancelled_clear_keeps_data() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        fx.drop_file("q1.csv", now);
        let run = fx.sequencer.run_id().expect("run");
        let _ = handle_analysis_finished(&mut fx.ctx(), run, AnalysisOutcome::Succeeded, now);
        fx.confirm.request(DestructiveAction::ClearAllData);

        let _ = handle_confirm_message(&mut fx.ctx(), confirm::Message::Cancel, now);

        assert_eq!(fx.upload.datasets().len(), 1);
        assert!(!fx.confirm.is_open());
    }

    #[test]
    fn tick_drains_queued_diagnostics() {
        let mut fx = Fixture::new();
        fx.notifications.set_diagnostics(fx.diagnostics.handle());
        let now = Instant::now();
        fx.notifications
            .push(Notification::warning("notification-nothing-to-delete"), now);
        assert!(fx.diagnostics.is_empty());

        let _ = handle_tick(&mut fx.ctx(), now);

        assert_eq!(fx.diagnostics.len(), 1);
    }

    #[test]
    fn event_driven_progress_shares_the_same_toast_slot() {
        let mut fx = Fixture::new();
        let now = Instant::now();
        let step = ProgressEvent::Step(Content::Plain("Reading page 3".to_string()));

        fx.sequencer.apply(step, &mut fx.notifications, now);
        fx.sequencer
            .apply(ProgressEvent::Completed, &mut fx.notifications, now);

        assert_eq!(fx.keys(), vec!["progress-complete"]);
    }
}
