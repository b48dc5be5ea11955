// SPDX-License-Identifier: MPL-2.0
//! Renderable toast content.
//!
//! Toasts do not store widgets (Iced rebuilds the widget tree on every
//! `view`). They store a value implementing [`Renderable`], which produces a
//! fresh [`Element`] whenever the stack is drawn.

use super::stack::Message;
use super::toast::ToastId;
use crate::ui::design_tokens::{opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, text, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Something a toast can display.
pub trait Renderable {
    /// Builds the widget tree for this content.
    fn render(&self) -> Element<'_, Message>;
}

/// Leading glyph of a [`Banner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerIcon {
    #[default]
    Share,
    Info,
    Success,
    Warning,
}

impl BannerIcon {
    fn glyph(self) -> &'static str {
        match self {
            BannerIcon::Share => "⇪",
            BannerIcon::Info => "ℹ",
            BannerIcon::Success => "✓",
            BannerIcon::Warning => "⚠",
        }
    }
}

/// A pill-shaped card with an icon, a message and a close button.
///
/// The close button emits [`Message::Dismiss`] for the toast the banner was
/// built for.
#[derive(Debug, Clone)]
pub struct Banner {
    id: ToastId,
    icon: BannerIcon,
    message: String,
}

impl Banner {
    pub fn new(id: ToastId, message: impl Into<String>) -> Self {
        Self {
            id,
            icon: BannerIcon::default(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: BannerIcon) -> Self {
        self.icon = icon;
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Renderable for Banner {
    fn render(&self) -> Element<'_, Message> {
        let icon = Text::new(self.icon.glyph()).size(typography::TITLE_SM);

        let message = Text::new(self.message.as_str())
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        let dismiss = button(Text::new("✕").size(typography::BODY_LG))
            .on_press(Message::Dismiss(self.id))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [icon] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(icon)
            .push(
                Container::new(message)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss);

        Container::new(
            Container::new(content)
                .width(Length::Fill)
                .padding([spacing::SM, spacing::MD])
                .style(pill_style),
        )
        .width(Length::Fill)
        .max_width(sizing::TOAST_MAX_WIDTH)
        .padding([0.0, spacing::LG])
        .into()
    }
}

/// Bare text in the same pill, without a dismiss button.
#[derive(Debug, Clone)]
pub struct Plain {
    message: String,
}

impl Plain {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Renderable for Plain {
    fn render(&self) -> Element<'_, Message> {
        Container::new(
            Container::new(Text::new(self.message.as_str()).size(typography::BODY))
                .width(Length::Fill)
                .padding([spacing::SM, spacing::MD])
                .style(pill_style),
        )
        .width(Length::Fill)
        .max_width(sizing::TOAST_MAX_WIDTH)
        .padding([0.0, spacing::LG])
        .into()
    }
}

fn pill_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.base.color,
        )),
        border: iced::Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: iced::Shadow {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::BLACK
            },
            ..shadow::MD
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered => Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: base.text,
        border: iced::Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toasts::Toast;

    #[test]
    fn banner_keeps_message() {
        let toast = Toast::new(|id| Banner::new(id, "Hello World!"));
        let _ = toast.content().render();

        let banner = Banner::new(toast.id(), "Hello World!").icon(BannerIcon::Info);
        assert_eq!(banner.message(), "Hello World!");
        assert_eq!(banner.icon, BannerIcon::Info);
    }

    #[test]
    fn banner_icons_have_distinct_glyphs() {
        let glyphs = [
            BannerIcon::Share.glyph(),
            BannerIcon::Info.glyph(),
            BannerIcon::Success.glyph(),
            BannerIcon::Warning.glyph(),
        ];
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn pill_style_is_fully_rounded() {
        let style = pill_style(&Theme::Dark);
        assert!(style.background.is_some());
        assert_eq!(style.border.radius, iced::border::Radius::from(radius::FULL));
    }

    #[test]
    fn dismiss_button_is_transparent_until_hovered() {
        let theme = Theme::Light;
        assert!(dismiss_button_style(&theme, button::Status::Active)
            .background
            .is_none());
        assert!(dismiss_button_style(&theme, button::Status::Hovered)
            .background
            .is_some());
    }
}
