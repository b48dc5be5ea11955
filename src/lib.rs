// SPDX-License-Identifier: MPL-2.0
//! `toast_deck` is a stacked toast overlay for the Iced GUI framework.
//!
//! Toasts collapse into a depth-scaled deck at the bottom of the window,
//! expand into a list on tap and are dismissed with a leftward swipe. The
//! overlay lives in [`ui::toasts`]; [`app`] is a small demo host with Fluent
//! localization and TOML preferences.

pub mod app;
pub mod error;
pub mod i18n;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
