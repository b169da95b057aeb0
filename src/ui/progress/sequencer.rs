// SPDX-License-Identifier: MPL-2.0
//! Progress sequencer state machine.
//!
//! A run shows one step message at a time: each step retires the toast of
//! the step before it, so at most one progress toast is ever on screen.
//! The run ends when the caller reports completion or failure, which
//! replaces the step toast with a single terminal toast and returns the
//! sequencer to idle.

use super::step::{ProgressEvent, ProgressStep};
use crate::diagnostics::{AppStateEvent, DiagnosticsHandle};
use crate::ui::notifications::{Content, Manager, Notification, NotificationId, Severity};
use std::time::Instant;

/// Identifies one run of the sequencer.
///
/// Completion reports carry the id of the run they belong to so that a
/// report for a superseded run can be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(u64);

/// Observable sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
}

#[derive(Debug)]
struct Run {
    id: RunId,
    steps: Vec<ProgressStep>,
    started_at: Instant,
    next_step: usize,
}

/// Plays progress steps through a notification [`Manager`].
#[derive(Debug, Default)]
pub struct Sequencer {
    run: Option<Run>,
    /// The step toast currently owned by the sequencer.
    active: Option<NotificationId>,
    runs_started: u64,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Sequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the diagnostics handle for logging run transitions.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn state(&self) -> State {
        if self.run.is_some() {
            State::Running
        } else {
            State::Idle
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Returns the id of the current run, if any.
    #[must_use]
    pub fn run_id(&self) -> Option<RunId> {
        self.run.as_ref().map(|run| run.id)
    }

    /// Returns the step toast currently on screen, if any.
    #[must_use]
    pub fn active_notification(&self) -> Option<NotificationId> {
        self.active
    }

    /// Returns how many scripted steps of the current run have not fired yet.
    #[must_use]
    pub fn pending_steps(&self) -> usize {
        self.run
            .as_ref()
            .map_or(0, |run| run.steps.len() - run.next_step)
    }

    /// Starts a new run. Steps fire at their offset from `now`; steps with
    /// equal offsets fire in the order given.
    ///
    /// A run already in progress is replaced: its step toast is retired and
    /// its remaining steps never show.
    pub fn start(
        &mut self,
        mut steps: Vec<ProgressStep>,
        manager: &mut Manager,
        now: Instant,
    ) -> RunId {
        self.retire(manager);
        steps.sort_by_key(ProgressStep::offset);

        self.runs_started += 1;
        let id = RunId(self.runs_started);
        let step_count = steps.len();
        self.run = Some(Run {
            id,
            steps,
            started_at: now,
            next_step: 0,
        });
        self.log(AppStateEvent::ProgressStarted { steps: step_count });

        // Steps at offset zero show right away.
        self.tick(now, manager);
        id
    }

    /// Fires every step that is due at `now`.
    pub fn tick(&mut self, now: Instant, manager: &mut Manager) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        let mut due = Vec::new();
        while let Some(step) = run.steps.get(run.next_step) {
            let fire_at = run.started_at + step.offset();
            if fire_at > now {
                break;
            }
            due.push((step.message().clone(), fire_at));
            run.next_step += 1;
        }

        for (message, fire_at) in due {
            self.show_step(message, manager, fire_at);
        }
    }

    /// Ends the current run successfully. Valid in any state.
    pub fn complete(&mut self, manager: &mut Manager, now: Instant) -> NotificationId {
        self.retire(manager);
        self.run = None;
        self.log(AppStateEvent::ProgressCompleted);
        manager.push(Notification::success("progress-complete"), now)
    }

    /// Ends the current run with an error toast naming `message`. Valid in
    /// any state.
    pub fn fail(
        &mut self,
        message: impl Into<String>,
        manager: &mut Manager,
        now: Instant,
    ) -> NotificationId {
        let message = message.into();
        self.retire(manager);
        self.run = None;
        self.log(AppStateEvent::ProgressFailed {
            reason: message.clone(),
        });
        manager.push(
            Notification::error("progress-failed").with_arg("message", message),
            now,
        )
    }

    /// Applies a progress report pushed by the operation itself.
    ///
    /// A step received while idle opens a run with no scripted steps.
    pub fn apply(
        &mut self,
        event: ProgressEvent,
        manager: &mut Manager,
        now: Instant,
    ) -> Option<NotificationId> {
        match event {
            ProgressEvent::Step(message) => {
                if self.run.is_none() {
                    self.start(Vec::new(), manager, now);
                }
                Some(self.show_step(message, manager, now))
            }
            ProgressEvent::Completed => Some(self.complete(manager, now)),
            ProgressEvent::Failed(reason) => Some(self.fail(reason, manager, now)),
        }
    }

    fn show_step(&mut self, message: Content, manager: &mut Manager, at: Instant) -> NotificationId {
        self.retire(manager);
        let notification = match message {
            Content::Plain(text) => Notification::plain(Severity::Info, text),
            Content::Localized { key, args } => args
                .into_iter()
                .fold(Notification::info(key), |n, (k, v)| n.with_arg(k, v)),
        };
        let id = manager.push(notification.sticky(), at);
        self.active = Some(id);
        id
    }

    fn retire(&mut self, manager: &mut Manager) {
        if let Some(id) = self.active.take() {
            manager.dismiss(id);
        }
    }

    fn log(&self, event: AppStateEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_state(event);
        }
    }
}
