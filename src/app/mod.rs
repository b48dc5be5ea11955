// SPDX-License-Identifier: MPL-2.0
//! Application root: a single screen hosting the toast overlay.
//!
//! `App` owns the [`ToastCollection`] for its whole lifetime and lends it to
//! the [`ToastStack`] overlay: mutably in `update`, immutably in `view`.

pub mod config;
mod message;
pub mod paths;
mod view;

pub use message::{Flags, Message};

use crate::i18n::fluent::I18n;
use crate::ui::theming::ThemeMode;
use crate::ui::toasts::{Banner, BannerIcon, Curve, Toast, ToastCollection, ToastStack};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    toasts: ToastCollection,
    stack: ToastStack,
    /// Toasts shown so far, used to number the demo message.
    shown: u32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("toasts", &self.toasts.len())
            .field("mode", &self.stack.mode())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 400;
pub const MIN_WINDOW_WIDTH: u32 = 360;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    paths::init_cli_override(flags.config_dir.clone());

    // iced 0.14 requires an `Fn` boot function.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the application from a loaded configuration.
    ///
    /// A config warning (an i18n key) is shown as a warning toast.
    pub fn new_with_config(
        flags: Flags,
        config: &config::Config,
        config_warning: Option<String>,
    ) -> Self {
        let i18n = I18n::new(flags.lang, config);
        let mut toasts = ToastCollection::new();
        let stack = ToastStack::new(&mut toasts, config.toasts.stack_config());

        let mut app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            toasts,
            stack,
            shown: 0,
        };

        if let Some(key) = config_warning {
            let message = app.i18n.tr(&key);
            app.push_banner(BannerIcon::Warning, message);
        }

        app
    }

    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        (Self::new_with_config(flags, &config, config_warning), Task::none())
    }

    #[must_use]
    pub fn toasts(&self) -> &ToastCollection {
        &self.toasts
    }

    #[must_use]
    pub fn stack(&self) -> &ToastStack {
        &self.stack
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        self.stack.subscription().map(Message::Toasts)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Toasts(toasts_message) => {
                self.stack.update(toasts_message, &mut self.toasts);
            }
            Message::ShowToast => {
                self.shown += 1;
                let message = self
                    .i18n
                    .tr_with_args("toast-greeting", &[("number", self.shown.into())]);
                self.push_banner(BannerIcon::Share, message);
            }
            Message::ClearToasts => {
                tracing::debug!(count = self.toasts.len(), "clearing toasts");
                self.toasts.clear();
                self.stack.sync(&self.toasts);
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            toasts: &self.toasts,
            stack: &self.stack,
        })
    }

    /// Appends a banner toast with the bouncy entry animation.
    fn push_banner(&mut self, icon: BannerIcon, message: String) {
        let toast = Toast::new(|id| Banner::new(id, message).icon(icon));
        self.toasts.animate(Curve::Bouncy, |toasts| toasts.push(toast));
        self.stack.sync(&self.toasts);
    }
}
