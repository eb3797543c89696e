//! Template file store.
//!
//! # Responsibility
//! - Enumerate and read note templates from the templates directory.
//!
//! # Invariants
//! - Listing is sorted by file name, so a `NN_` prefix controls order.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::note_store::{StorageError, StorageResult};

/// Store over one templates directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
    suffix: String,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    /// Lists template files sorted by name, creating the directory when
    /// absent.
    pub fn list_templates(&self) -> StorageResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let entries = std::fs::read_dir(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let mut templates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                continue;
            };
            if name.ends_with(&self.suffix) {
                templates.push(path);
            }
        }

        templates.sort();
        Ok(templates)
    }

    /// Reads template text as UTF-8.
    pub fn read_template(&self, path: &Path) -> StorageResult<String> {
        std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Display label for a template: the stem with its ordering prefix (text
/// up to the first underscore) removed.
pub fn template_label(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default();
    match stem.split_once('_') {
        Some((_, label)) => label.to_string(),
        None => stem.to_string(),
    }
}
