// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[toasts]` - Toast overlay tunables (dismiss threshold, spacing, animation)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `TOAST_DECK_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_deck::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use crate::ui::toasts::StackConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// i18n key of the toast shown when `settings.toml` cannot be read.
pub const LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Toast overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastsConfig {
    /// Leftward fling distance that dismisses a toast.
    #[serde(
        default = "default_dismiss_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_threshold: Option<f32>,

    /// Gap between toasts in the expanded list.
    #[serde(
        default = "default_expanded_spacing",
        skip_serializing_if = "Option::is_none"
    )]
    pub expanded_spacing: Option<f32>,

    /// Distance between the window bottom and the front toast.
    #[serde(
        default = "default_bottom_padding",
        skip_serializing_if = "Option::is_none"
    )]
    pub bottom_padding: Option<f32>,

    /// Duration of bouncy transitions in milliseconds.
    #[serde(
        default = "default_animation_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation_ms: Option<u64>,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            dismiss_threshold: default_dismiss_threshold(),
            expanded_spacing: default_expanded_spacing(),
            bottom_padding: default_bottom_padding(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl ToastsConfig {
    /// Overlay settings with every value clamped to its bounds.
    #[must_use]
    pub fn stack_config(&self) -> StackConfig {
        StackConfig {
            dismiss_threshold: clamp_f32(
                self.dismiss_threshold,
                DEFAULT_DISMISS_THRESHOLD,
                MIN_DISMISS_THRESHOLD,
                MAX_DISMISS_THRESHOLD,
            ),
            expanded_spacing: clamp_f32(
                self.expanded_spacing,
                DEFAULT_EXPANDED_SPACING,
                0.0,
                MAX_EXPANDED_SPACING,
            ),
            bottom_padding: clamp_f32(
                self.bottom_padding,
                DEFAULT_BOTTOM_PADDING,
                0.0,
                MAX_BOTTOM_PADDING,
            ),
            animation: Duration::from_millis(
                self.animation_ms
                    .unwrap_or(DEFAULT_ANIMATION_MS)
                    .clamp(MIN_ANIMATION_MS, MAX_ANIMATION_MS),
            ),
        }
    }
}

/// Falls back to `default` for missing or non-finite values, then clamps.
fn clamp_f32(value: Option<f32>, default: f32, min: f32, max: f32) -> f32 {
    value
        .filter(|v| v.is_finite())
        .unwrap_or(default)
        .clamp(min, max)
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Toast overlay settings.
    #[serde(default)]
    pub toasts: ToastsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_dismiss_threshold() -> Option<f32> {
    Some(DEFAULT_DISMISS_THRESHOLD)
}

fn default_expanded_spacing() -> Option<f32> {
    Some(DEFAULT_EXPANDED_SPACING)
}

fn default_bottom_padding() -> Option<f32> {
    Some(DEFAULT_BOTTOM_PADDING)
}

fn default_animation_ms() -> Option<u64> {
    Some(DEFAULT_ANIMATION_MS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with an i18n key describing what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
