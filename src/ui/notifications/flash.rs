// SPDX-License-Identifier: MPL-2.0
//! Adoption of server-rendered flash banners.
//!
//! Flash messages arrive as status banners carrying a presentation class
//! (`alert-success`, `alert-danger`, ...). On startup they are converted into
//! toasts, one every `stagger` so several banners do not pop up at once,
//! and the original banners are removed from their source.

use super::manager::Manager;
use super::notification::{Notification, Severity};
use std::time::Instant;

/// A status banner as rendered by the server, before adoption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashBanner {
    /// Presentation classes attached to the banner.
    pub classes: Vec<String>,
    /// Banner text. `None` when the banner has no message element.
    pub text: Option<String>,
}

impl FlashBanner {
    /// Builds a banner from a category (`success`, `error`, `warning`,
    /// `info`) and its text, using the same class the server templates emit.
    pub fn new(category: &str, text: impl Into<String>) -> Self {
        let class = match Severity::from_label(category) {
            Severity::Error => "alert-danger",
            Severity::Success => "alert-success",
            Severity::Warning => "alert-warning",
            Severity::Info => "alert-info",
        };
        Self {
            classes: vec!["alert".to_string(), class.to_string()],
            text: Some(text.into()),
        }
    }

    /// Parses a `category:text` pair as accepted on the command line.
    ///
    /// Without a colon the whole argument is the text and the category is
    /// `info`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((category, text)) => Self::new(category, text.trim()),
            None => Self::new("info", raw.trim()),
        }
    }

    /// Maps the banner's presentation classes to a severity.
    ///
    /// The first recognized class wins. Banners without a recognized class
    /// are informational.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.classes
            .iter()
            .find_map(|class| category_for_class(class))
            .unwrap_or(Severity::Info)
    }
}

fn category_for_class(class: &str) -> Option<Severity> {
    match class.strip_prefix("alert-").unwrap_or(class) {
        "success" => Some(Severity::Success),
        "danger" | "error" => Some(Severity::Error),
        "warning" => Some(Severity::Warning),
        "info" => Some(Severity::Info),
        _ => None,
    }
}

/// The surface flash banners are read from and removed from.
pub trait FlashSource {
    /// Number of banners currently on the surface.
    fn banner_count(&self) -> usize;

    /// Returns the banner at `index`, if it still exists.
    fn banner(&self, index: usize) -> Option<&FlashBanner>;

    /// Removes every banner from the surface. Called once all banners were
    /// read.
    fn remove_all(&mut self);
}

impl FlashSource for Vec<FlashBanner> {
    fn banner_count(&self) -> usize {
        self.len()
    }

    fn banner(&self, index: usize) -> Option<&FlashBanner> {
        self.get(index)
    }

    fn remove_all(&mut self) {
        self.clear();
    }
}

impl Manager {
    /// Converts every banner of `source` into a toast and empties the source.
    ///
    /// The banner at position `index` is scheduled `index * stagger` after
    /// `now`. Banners that are missing or carry no text are skipped without
    /// affecting the others. Returns the number of toasts scheduled.
    pub fn adopt_existing_messages(&mut self, source: &mut impl FlashSource, now: Instant) -> usize {
        let stagger = self.settings().stagger;
        let mut adopted = 0;

        for index in 0..source.banner_count() {
            let Some(banner) = source.banner(index) else {
                continue;
            };
            let Some(text) = banner.text.as_deref().map(str::trim) else {
                continue;
            };
            if text.is_empty() {
                continue;
            }

            let notification = Notification::plain(banner.severity(), text);
            let delay = stagger * u32::try_from(index).unwrap_or(u32::MAX);
            self.schedule(notification, delay, now);
            adopted += 1;
        }

        source.remove_all();
        adopted
    }
}
