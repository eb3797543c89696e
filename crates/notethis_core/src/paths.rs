//! Filesystem layout for application data.
//!
//! # Responsibility
//! - Define where notes, templates and settings files live.
//! - Keep the note file naming convention in one place.
//!
//! # Invariants
//! - Note files are named `<FILE_PREFIX><NNN><FILE_SUFFIX>` with a
//!   zero-padded three digit sequence number.
//! - All derived paths are children of one base directory.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix shared by every note file name.
pub const FILE_PREFIX: &str = "note_A";
/// Extension (with dot) shared by notes and templates.
pub const FILE_SUFFIX: &str = ".md";
/// Interval between unconditional autosave ticks.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Resolved application directory layout.
///
/// The host shell constructs one of these at startup and threads it through
/// session and storage construction instead of relying on ambient globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    base_dir: PathBuf,
}

impl AppPaths {
    /// Creates a layout rooted at the given base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Platform default base directory under the user's local data dir.
    pub fn default_base_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notethis")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.base_dir.join("notes")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join("templates")
    }

    pub fn settings_dir(&self) -> PathBuf {
        self.base_dir.join("settings")
    }

    pub fn tokens_config_path(&self) -> PathBuf {
        self.settings_dir().join("tokens.json")
    }

    pub fn tooltips_config_path(&self) -> PathBuf {
        self.settings_dir().join("tooltips.json")
    }

    pub fn user_settings_path(&self) -> PathBuf {
        self.settings_dir().join("user_settings.json")
    }

    /// Creates the notes, templates and settings directories when absent.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.notes_dir())?;
        std::fs::create_dir_all(self.templates_dir())?;
        std::fs::create_dir_all(self.settings_dir())?;
        Ok(())
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new(Self::default_base_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::AppPaths;

    #[test]
    fn derived_paths_are_children_of_base() {
        let paths = AppPaths::new("/tmp/notethis-test");
        assert!(paths.notes_dir().starts_with(paths.base_dir()));
        assert!(paths.tokens_config_path().starts_with(paths.settings_dir()));
        assert!(paths.user_settings_path().ends_with("user_settings.json"));
    }
}
