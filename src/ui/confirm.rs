// SPDX-License-Identifier: MPL-2.0
//! Confirmation dialog for destructive actions.
//!
//! Clearing datasets cannot be undone, so the request first opens a dialog
//! and only a confirmation releases the action to the caller.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Actions that need the user's confirmation before running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestructiveAction {
    /// Remove every dataset of the session.
    ClearAllData,
    /// Remove the active dataset only.
    ClearCurrentData,
}

impl DestructiveAction {
    /// Localization key of the question shown in the dialog.
    #[must_use]
    pub fn prompt_key(self) -> &'static str {
        match self {
            DestructiveAction::ClearAllData => "confirm-clear-all",
            DestructiveAction::ClearCurrentData => "confirm-clear-current",
        }
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DestructiveAction::ClearAllData => "clear_all_data",
            DestructiveAction::ClearCurrentData => "clear_current_data",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Confirm,
    Cancel,
}

/// What the caller must do after a dialog message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    Confirmed(DestructiveAction),
    Cancelled(DestructiveAction),
}

#[derive(Debug, Default)]
pub struct ConfirmDialog {
    pending: Option<DestructiveAction>,
}

impl ConfirmDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `action`, replacing any unanswered request.
    pub fn request(&mut self, action: DestructiveAction) {
        self.pending = Some(action);
    }

    #[must_use]
    pub fn pending(&self) -> Option<DestructiveAction> {
        self.pending
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Closes the dialog and releases the pending action.
    pub fn confirm(&mut self) -> Option<DestructiveAction> {
        self.pending.take()
    }

    /// Closes the dialog, dropping the pending action.
    pub fn cancel(&mut self) -> Option<DestructiveAction> {
        self.pending.take()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Confirm => self.confirm().map_or(Event::None, Event::Confirmed),
            Message::Cancel => self.cancel().map_or(Event::None, Event::Cancelled),
        }
    }

    /// Renders the dialog card, or nothing when no request is pending.
    pub fn view<'a>(&self, i18n: &'a I18n) -> Option<Element<'a, Message>> {
        let action = self.pending?;

        let prompt = Text::new(i18n.tr(action.prompt_key())).size(typography::BODY_LG);
        let buttons = Row::new()
            .spacing(spacing::SM)
            .push(
                button(Text::new(i18n.tr("confirm-cancel")))
                    .on_press(Message::Cancel)
                    .style(button::secondary),
            )
            .push(
                button(Text::new(i18n.tr("confirm-accept")))
                    .on_press(Message::Confirm)
                    .style(button::danger),
            );

        let card = Container::new(
            Column::new()
                .spacing(spacing::MD)
                .align_x(alignment::Horizontal::Right)
                .push(prompt)
                .push(buttons),
        )
        .width(Length::Fixed(sizing::DIALOG_WIDTH))
        .padding(spacing::LG)
        .style(dialog_style);

        Some(
            Container::new(card)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(backdrop_style)
                .into(),
        )
    }
}

fn dialog_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.base.color,
        )),
        border: iced::Border {
            color: palette::ERROR_500,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_releases_pending_action_once() {
        let mut dialog = ConfirmDialog::new();
        dialog.request(DestructiveAction::ClearAllData);
        assert!(dialog.is_open());

        assert_eq!(dialog.confirm(), Some(DestructiveAction::ClearAllData));
        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn cancel_closes_without_confirming() {
        let mut dialog = ConfirmDialog::new();
        dialog.request(DestructiveAction::ClearCurrentData);

        assert_eq!(
            dialog.update(Message::Cancel),
            Event::Cancelled(DestructiveAction::ClearCurrentData)
        );
        assert_eq!(dialog.update(Message::Confirm), Event::None);
    }

    #[test]
    fn new_request_replaces_unanswered_one() {
        let mut dialog = ConfirmDialog::new();
        dialog.request(DestructiveAction::ClearCurrentData);
        dialog.request(DestructiveAction::ClearAllData);

        assert_eq!(
            dialog.update(Message::Confirm),
            Event::Confirmed(DestructiveAction::ClearAllData)
        );
    }

    #[test]
    fn closed_dialog_renders_nothing() {
        let dialog = ConfirmDialog::new();
        let i18n = I18n::default();
        assert!(dialog.view(&i18n).is_none());
    }

    #[test]
    fn prompts_are_distinct() {
        assert_ne!(
            DestructiveAction::ClearAllData.prompt_key(),
            DestructiveAction::ClearCurrentData.prompt_key()
        );
    }
}
