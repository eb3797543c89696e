//! JSON-backed configuration stores.
//!
//! # Responsibility
//! - Load token definitions, user settings and tooltip text from disk.
//! - Persist user settings back to disk.
//!
//! # Invariants
//! - A missing or malformed file always degrades to the type's default
//!   value; loading never fails.
//! - Saving creates parent directories and reports real errors.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub mod settings;
pub mod tokens;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error for configuration write paths. Read paths degrade to defaults
/// instead of surfacing errors.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "config io failure at `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "config encode failure at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Reads and decodes a JSON file, falling back to `T::default()` when the
/// file is absent or cannot be parsed.
fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(
                "event=config_load module=config status=default what={what} path={} reason={err}",
                path.display()
            );
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(
                "event=config_load module=config status=ok what={what} path={}",
                path.display()
            );
            value
        }
        Err(err) => {
            warn!(
                "event=config_load module=config status=malformed what={what} path={} error={err}",
                path.display()
            );
            T::default()
        }
    }
}
