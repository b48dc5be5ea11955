// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! A toolbar with the title and the Show/Clear actions, a placeholder list,
//! and the toast overlay attached over everything.

use super::Message;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::toasts::{self, ToastCollection, ToastStack};
use iced::widget::{button, container, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub toasts: &'a ToastCollection,
    pub stack: &'a ToastStack,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content = Column::new()
        .push(toolbar(ctx.i18n, !ctx.toasts.is_empty()))
        .push(list(ctx.i18n))
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .width(Length::Fill)
        .height(Length::Fill);

    toasts::attach(content, ctx.stack, ctx.toasts, Message::Toasts)
}

fn toolbar(i18n: &I18n, has_toasts: bool) -> Element<'_, Message> {
    let title = Text::new(i18n.tr("window-title")).size(typography::TITLE_LG);

    let clear = button(Text::new(i18n.tr("toolbar-clear")).size(typography::BODY))
        .style(button::secondary)
        .on_press_maybe(has_toasts.then_some(Message::ClearToasts));

    let show = button(Text::new(i18n.tr("toolbar-show")).size(typography::BODY))
        .style(button::primary)
        .on_press(Message::ShowToast);

    Row::new()
        .push(title)
        .push(Space::new().width(Length::Fill))
        .push(clear)
        .push(show)
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn list(i18n: &I18n) -> Element<'_, Message> {
    let row = Container::new(Text::new(i18n.tr("list-dummy-row")).size(typography::BODY))
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(container::rounded_box);

    Column::new().push(row).width(Length::Fill).into()
}
