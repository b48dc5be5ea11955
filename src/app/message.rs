// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::toasts;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Forwarded to the toast overlay.
    Toasts(toasts::Message),
    /// The "Show" toolbar button was pressed.
    ShowToast,
    /// The "Clear" toolbar button was pressed.
    ClearToasts,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `TOAST_DECK_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
