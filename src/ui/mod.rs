// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! - [`toasts`] - Stacked toast overlay (collection, geometry, gestures, widgets)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod theming;
pub mod toasts;
