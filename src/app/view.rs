// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layers, bottom to top: upload panel, toast overlay, confirmation dialog.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::confirm::ConfirmDialog;
use crate::ui::notifications::{self, Toast};
use crate::ui::upload::State as UploadState;
use iced::widget::{Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub upload: &'a UploadState,
    pub notifications: &'a notifications::Manager,
    pub confirm: &'a ConfirmDialog,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let panel = Container::new(ctx.upload.view(ctx.i18n).map(Message::Upload))
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(panel)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification));

    if let Some(dialog) = ctx.confirm.view(ctx.i18n) {
        layers = layers.push(dialog.map(Message::Confirm));
    }

    layers.into()
}
