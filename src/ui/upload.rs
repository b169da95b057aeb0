// SPDX-License-Identifier: MPL-2.0
//! Upload panel: file selection, drop zone and the session's dataset list.
//!
//! The analysis itself happens on the server; this panel only decides
//! whether a file may be submitted and remembers which uploads were
//! analyzed during the session.

use crate::i18n::fluent::I18n;
use crate::ui::confirm::DestructiveAction;
use crate::ui::design_tokens::{border, opacity, palette, radius, spacing, typography};
use iced::widget::{button, container, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::path::{Path, PathBuf};

/// File extensions the analysis backend accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["pdf", "csv"];

/// Fewest datasets that can be merged into one.
pub const MIN_COMBINED_DATASETS: usize = 2;

/// Kind of sales document being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Csv,
}

/// A file that passed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub kind: UploadKind,
}

impl UploadFile {
    /// File name shown to the user.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Why a file was refused before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    /// No file was selected.
    NoFile,
    /// The extension is not one of [`ACCEPTED_EXTENSIONS`].
    UnsupportedFormat,
}

impl UploadRejection {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadRejection::NoFile => "notification-upload-no-file",
            UploadRejection::UnsupportedFormat => "notification-upload-unsupported-format",
        }
    }
}

/// Checks that `path` names a PDF or CSV file.
pub fn validate_upload(path: Option<&Path>) -> Result<UploadFile, UploadRejection> {
    let path = path
        .filter(|p| p.file_name().is_some())
        .ok_or(UploadRejection::NoFile)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(UploadRejection::UnsupportedFormat)?;

    let kind = match extension.as_str() {
        "pdf" => UploadKind::Pdf,
        "csv" => UploadKind::Csv,
        _ => return Err(UploadRejection::UnsupportedFormat),
    };

    Ok(UploadFile {
        path: path.to_path_buf(),
        kind,
    })
}

#[derive(Debug, Clone)]
pub enum Message {
    ChooseFile,
    SelectDataset(usize),
    CombineDatasets,
    RequestClear(DestructiveAction),
    ExportDiagnostics,
}

/// Upload panel state.
#[derive(Debug, Default)]
pub struct State {
    /// Names of datasets analyzed this session, oldest first.
    datasets: Vec<String>,
    active: Option<usize>,
    /// A file is being dragged over the window.
    drag_over: bool,
    /// The file currently being analyzed.
    in_flight: Option<UploadFile>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_drag_over(&mut self, drag_over: bool) {
        self.drag_over = drag_over;
    }

    #[must_use]
    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// Marks `file` as submitted for analysis.
    pub fn begin_analysis(&mut self, file: UploadFile) {
        self.drag_over = false;
        self.in_flight = Some(file);
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<&UploadFile> {
        self.in_flight.as_ref()
    }

    /// Records the in-flight upload as a dataset and makes it active.
    ///
    /// Returns the dataset name, or `None` if nothing was in flight.
    pub fn finish_analysis(&mut self) -> Option<String> {
        let file = self.in_flight.take()?;
        let name = file.display_name();
        self.datasets.push(name.clone());
        self.active = Some(self.datasets.len() - 1);
        Some(name)
    }

    /// Forgets the in-flight upload after a failed analysis.
    pub fn abort_analysis(&mut self) -> Option<UploadFile> {
        self.in_flight.take()
    }

    #[must_use]
    pub fn datasets(&self) -> &[String] {
        &self.datasets
    }

    #[must_use]
    pub fn active_dataset(&self) -> Option<&str> {
        self.active.and_then(|i| self.datasets.get(i)).map(String::as_str)
    }

    /// Switches the active dataset. Returns its name, or `None` for an
    /// out-of-range index.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index >= self.datasets.len() {
            return None;
        }
        self.active = Some(index);
        self.datasets.get(index).map(String::as_str)
    }

    /// Removes the active dataset. The dataset before it becomes active,
    /// or the first one when the removed dataset was first.
    pub fn clear_current(&mut self) -> Option<String> {
        let index = self.active.filter(|i| *i < self.datasets.len())?;
        let removed = self.datasets.remove(index);
        self.active = index
            .checked_sub(1)
            .or_else(|| (!self.datasets.is_empty()).then_some(0));
        Some(removed)
    }

    /// Appends a dataset merging every dataset in the history and makes it
    /// active. The merged dataset is named `Gabungan_<stamp>`.
    ///
    /// Returns how many datasets were merged, or `None` when fewer than two
    /// exist.
    pub fn combine(&mut self, stamp: &str) -> Option<usize> {
        let count = self.datasets.len();
        if count < MIN_COMBINED_DATASETS {
            return None;
        }
        self.datasets.push(format!("Gabungan_{stamp}"));
        self.active = Some(count);
        Some(count)
    }

    /// Removes every dataset and returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let count = self.datasets.len();
        self.datasets.clear();
        self.active = None;
        count
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let busy = self.in_flight.is_some();

        let drop_hint = match &self.in_flight {
            Some(file) => {
                let filename = file.display_name();
                i18n.tr_with_args("upload-analyzing", &[("filename", filename.as_str())])
            }
            None if self.drag_over => i18n.tr("upload-drop-release"),
            None => i18n.tr("upload-drop-hint"),
        };

        // A new upload replaces the one in flight.
        let choose = button(Text::new(i18n.tr("upload-choose-file"))).on_press(Message::ChooseFile);

        let drag_over = self.drag_over;
        let drop_zone = Container::new(
            Column::new()
                .spacing(spacing::SM)
                .align_x(alignment::Horizontal::Center)
                .push(Text::new(drop_hint).size(typography::BODY_LG))
                .push(Text::new(i18n.tr("upload-accepted-formats")).size(typography::CAPTION))
                .push(choose),
        )
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .style(move |theme: &Theme| drop_zone_style(theme, drag_over));

        let mut datasets = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("datasets-title")).size(typography::TITLE_SM));
        if self.datasets.is_empty() {
            datasets = datasets.push(Text::new(i18n.tr("datasets-empty")).size(typography::BODY_SM));
        }
        for (index, name) in self.datasets.iter().enumerate() {
            let label = if self.active == Some(index) {
                format!("\u{25B6} {name}")
            } else {
                name.clone()
            };
            datasets = datasets.push(
                button(Text::new(label).size(typography::BODY))
                    .on_press(Message::SelectDataset(index))
                    .style(button::text),
            );
        }

        let actions = Row::new()
            .spacing(spacing::SM)
            .push(
                button(Text::new(i18n.tr("datasets-combine")))
                    .on_press_maybe((!busy).then_some(Message::CombineDatasets))
                    .style(button::secondary),
            )
            .push(
                button(Text::new(i18n.tr("datasets-clear-current")))
                    .on_press_maybe((!busy).then_some(Message::RequestClear(
                        DestructiveAction::ClearCurrentData,
                    )))
                    .style(button::secondary),
            )
            .push(
                button(Text::new(i18n.tr("datasets-clear-all")))
                    .on_press_maybe(
                        (!busy).then_some(Message::RequestClear(DestructiveAction::ClearAllData)),
                    )
                    .style(button::danger),
            )
            .push(
                button(Text::new(i18n.tr("diagnostics-export")))
                    .on_press(Message::ExportDiagnostics)
                    .style(button::text),
            );

        Column::new()
            .spacing(spacing::LG)
            .padding(spacing::LG)
            .push(Text::new(i18n.tr("app-title")).size(typography::TITLE_LG))
            .push(drop_zone)
            .push(datasets)
            .push(actions)
            .into()
    }
}

fn drop_zone_style(theme: &Theme, drag_over: bool) -> container::Style {
    let accent = if drag_over {
        palette::PRIMARY_500
    } else {
        palette::GRAY_400
    };
    let background = if drag_over {
        Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::PRIMARY_200
        }
    } else {
        theme.extended_palette().background.weak.color
    };

    container::Style {
        background: Some(iced::Background::Color(background)),
        border: iced::Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
