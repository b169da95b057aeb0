// SPDX-License-Identifier: MPL-2.0
//! Multi-step progress feedback for long-running operations.
//!
//! The analysis backend does not report its progress, so the default feed
//! is a [`ProgressScript`]: fixed messages at fixed offsets from the moment
//! the upload is submitted. Callers that do receive real progress can feed
//! [`ProgressEvent`]s into the same [`Sequencer`] instead.
//!
//! Either way the sequencer keeps a single progress toast on screen (the
//! latest step) and finishes with one success or error toast.

mod sequencer;
mod step;

pub use sequencer::{RunId, Sequencer, State};
pub use step::{ProgressEvent, ProgressScript, ProgressStep};
