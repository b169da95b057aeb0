// SPDX-License-Identifier: MPL-2.0
//! Progress steps, scripts and events.

use crate::app::config::{DEFAULT_SIMULATED_COMPLETION_MS, ProgressStepConfig};
use crate::ui::notifications::Content;
use std::time::Duration;

/// One message of a progress timeline, shown `offset` after the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    message: Content,
    offset: Duration,
}

impl ProgressStep {
    /// Creates a step whose message is a localization key.
    pub fn localized(key: impl Into<String>, offset: Duration) -> Self {
        Self {
            message: Content::Localized {
                key: key.into(),
                args: Vec::new(),
            },
            offset,
        }
    }

    /// Creates a step that shows `text` verbatim.
    pub fn plain(text: impl Into<String>, offset: Duration) -> Self {
        Self {
            message: Content::Plain(text.into()),
            offset,
        }
    }

    #[must_use]
    pub fn message(&self) -> &Content {
        &self.message
    }

    #[must_use]
    pub fn offset(&self) -> Duration {
        self.offset
    }
}

impl From<&ProgressStepConfig> for ProgressStep {
    fn from(config: &ProgressStepConfig) -> Self {
        Self::plain(config.message.clone(), Duration::from_millis(config.offset_ms))
    }
}

/// A named timeline of steps plus the delay after which the caller treats
/// the operation as finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressScript {
    steps: Vec<ProgressStep>,
    completion_after: Duration,
}

impl ProgressScript {
    #[must_use]
    pub fn new(steps: Vec<ProgressStep>, completion_after: Duration) -> Self {
        Self {
            steps,
            completion_after,
        }
    }

    /// The upload-and-analyze timeline shown while a sales file is processed.
    #[must_use]
    pub fn analysis() -> Self {
        let step = |key: &str, ms: u64| ProgressStep::localized(key, Duration::from_millis(ms));
        Self::new(
            vec![
                step("progress-step-upload", 0),
                step("progress-step-extract", 1500),
                step("progress-step-analyze", 3000),
                step("progress-step-cluster", 4500),
                step("progress-step-charts", 6000),
            ],
            Duration::from_millis(DEFAULT_SIMULATED_COMPLETION_MS),
        )
    }

    /// Builds a script from configured steps, falling back to
    /// [`ProgressScript::analysis`] when none are configured.
    #[must_use]
    pub fn from_config(steps: &[ProgressStepConfig], completion_after: Duration) -> Self {
        if steps.is_empty() {
            return Self {
                completion_after,
                ..Self::analysis()
            };
        }
        Self::new(steps.iter().map(ProgressStep::from).collect(), completion_after)
    }

    #[must_use]
    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    #[must_use]
    pub fn completion_after(&self) -> Duration {
        self.completion_after
    }
}

/// A discrete progress report pushed by whoever performs the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A new stage started; supersedes the previous stage message.
    Step(Content),
    /// The operation finished successfully.
    Completed,
    /// The operation failed with a human-readable reason.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_script_is_ordered_and_finishes_after_last_step() {
        let script = ProgressScript::analysis();
        let offsets: Vec<_> = script.steps().iter().map(ProgressStep::offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort();
        assert_eq!(offsets, sorted);
        assert!(script.completion_after() > *offsets.last().expect("non-empty script"));
    }

    #[test]
    fn configured_steps_are_plain_text() {
        let configured = vec![ProgressStepConfig {
            message: "Reading invoices".into(),
            offset_ms: 250,
        }];
        let script = ProgressScript::from_config(&configured, Duration::from_secs(2));

        assert_eq!(script.steps().len(), 1);
        assert_eq!(
            script.steps()[0].message(),
            &Content::Plain("Reading invoices".into())
        );
        assert_eq!(script.steps()[0].offset(), Duration::from_millis(250));
        assert_eq!(script.completion_after(), Duration::from_secs(2));
    }

    #[test]
    fn empty_config_uses_analysis_steps_with_configured_completion() {
        let script = ProgressScript::from_config(&[], Duration::from_secs(9));
        assert_eq!(script.steps(), ProgressScript::analysis().steps());
        assert_eq!(script.completion_after(), Duration::from_secs(9));
    }
}
