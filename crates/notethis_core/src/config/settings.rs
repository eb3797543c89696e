//! User settings and tooltip configuration stores.
//!
//! # Responsibility
//! - Persist theme mode and UI zoom selection between runs.
//! - Expose host-configurable tooltip text with a global kill switch.
//!
//! # Invariants
//! - Loading never fails; absent or malformed files yield defaults.
//! - `ui_scale_index` always indexes into [`UI_SCALE_FACTORS`] after load.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{load_json_or_default, ConfigError, ConfigResult};

/// Zoom factors selectable by the host UI; index 0 is the default.
pub const UI_SCALE_FACTORS: [f64; 3] = [1.0, 1.5, 2.0];

/// Theme selection persisted in user settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    /// Collapses `System` into a concrete theme using the host's answer to
    /// "does the platform currently prefer dark?".
    pub fn effective(self, system_prefers_dark: bool) -> ThemeMode {
        match self {
            ThemeMode::System if system_prefers_dark => ThemeMode::Dark,
            ThemeMode::System => ThemeMode::Light,
            concrete => concrete,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub theme_mode: ThemeMode,
    pub ui_scale_index: usize,
}

impl UserSettings {
    /// Loads settings, normalizing an out-of-range zoom index back to 0.
    pub fn load(path: &Path) -> Self {
        let mut settings: UserSettings = load_json_or_default(path, "user_settings");
        if settings.ui_scale_index >= UI_SCALE_FACTORS.len() {
            settings.ui_scale_index = 0;
        }
        settings
    }

    /// Writes settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let encoded = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, encoded).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "event=settings_save module=config status=ok path={} theme={:?} scale_index={}",
            path.display(),
            self.theme_mode,
            self.ui_scale_index
        );
        Ok(())
    }

    /// Current zoom factor.
    pub fn ui_scale(&self) -> f64 {
        UI_SCALE_FACTORS[self.ui_scale_index.min(UI_SCALE_FACTORS.len() - 1)]
    }

    /// Selects a zoom index; out-of-range values are ignored.
    ///
    /// Returns whether the index was accepted.
    pub fn set_ui_scale_index(&mut self, index: usize) -> bool {
        if index >= UI_SCALE_FACTORS.len() {
            return false;
        }
        self.ui_scale_index = index;
        true
    }
}

/// Tooltip text configuration.
///
/// `enabled == false` suppresses every tooltip the host would create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub enabled: bool,
    pub buttons: BTreeMap<String, String>,
}

impl TooltipConfig {
    pub fn load(path: &Path) -> Self {
        load_json_or_default(path, "tooltips")
    }

    /// Configured text for a tooltip key, trimmed, or the fallback.
    pub fn tooltip_text(&self, key: &str, fallback: &str) -> String {
        self.buttons
            .get(key)
            .map(String::as_str)
            .unwrap_or(fallback)
            .trim()
            .to_string()
    }
}
