//! Editing session service.
//!
//! # Responsibility
//! - Track the current note identity, creation time and last-saved text.
//! - Drive the save/open/delete/new-note lifecycle over the note store.
//!
//! # Invariants
//! - A note receives its file number and creation timestamp on first save
//!   and keeps both until the session moves to another note.
//! - Saving identical resolved text is a no-op (`Unchanged`).
//! - Autosave writes a backup of the prior content; manual save does not.
//!
//! All state lives in this explicit context; the crate keeps no ambient
//! session globals.

use chrono::{Local, NaiveDateTime};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::config::tokens::ConfigCache;
use crate::paths::{AppPaths, FILE_PREFIX, FILE_SUFFIX};
use crate::storage::note_store::{NoteStore, StorageError};
use crate::tokens::{apply, resolve};

pub type SessionResult<T> = Result<T, SessionError>;

/// Error for session lifecycle operations.
#[derive(Debug)]
pub enum SessionError {
    /// Save rejected: the editor text is empty or whitespace-only.
    EmptyNote,
    Storage(StorageError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "nothing to save: note text is empty"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyNote => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Who triggered the save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Manual,
    Autosave,
}

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Text was written; `resolved_text` is the post-substitution content
    /// the editor should display.
    Saved {
        path: PathBuf,
        resolved_text: String,
    },
    /// Resolved text matched the last save; nothing was written.
    Unchanged,
    /// Autosave fired with an empty editor; nothing was written.
    SkippedEmpty,
}

/// Mutable editing context threaded through all note operations.
pub struct NoteSession {
    store: NoteStore,
    tokens_config_path: PathBuf,
    file_prefix: String,
    configs: ConfigCache,
    current_note: Option<PathBuf>,
    created_at: Option<NaiveDateTime>,
    last_saved_text: String,
}

impl NoteSession {
    /// Creates a session over the standard application layout.
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            store: NoteStore::new(paths.notes_dir(), FILE_PREFIX, FILE_SUFFIX),
            tokens_config_path: paths.tokens_config_path(),
            file_prefix: FILE_PREFIX.to_string(),
            configs: ConfigCache::new(),
            current_note: None,
            created_at: None,
            last_saved_text: String::new(),
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Path of the note being edited, once one has been allocated.
    pub fn current_note(&self) -> Option<&Path> {
        self.current_note.as_deref()
    }

    /// Whether the editor text differs from the last persisted text.
    pub fn is_dirty(&self, editor_text: &str) -> bool {
        editor_text.trim_end() != self.last_saved_text
    }

    /// Saves the editor text, resolving tokens first.
    ///
    /// Manual saves reject empty text with [`SessionError::EmptyNote`];
    /// autosaves quietly skip it. The first save of a new note allocates
    /// the next sequential file and the creation timestamp.
    pub fn save(&mut self, editor_text: &str, mode: SaveMode) -> SessionResult<SaveOutcome> {
        let text = editor_text.trim_end();
        if text.is_empty() {
            return match mode {
                SaveMode::Manual => Err(SessionError::EmptyNote),
                SaveMode::Autosave => Ok(SaveOutcome::SkippedEmpty),
            };
        }

        let now = Local::now().naive_local();
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        let path = match self.current_note.clone() {
            Some(path) => path,
            None => {
                let path = self.store.next_note_file()?;
                self.current_note = Some(path.clone());
                path
            }
        };

        let resolved = self.resolve_text(text, &path, self.created_at, now);
        if resolved == self.last_saved_text {
            return Ok(SaveOutcome::Unchanged);
        }

        self.store
            .write_note(&path, &resolved, mode == SaveMode::Autosave)?;
        self.last_saved_text = resolved.clone();

        info!(
            "event=note_save module=session status=ok mode={mode:?} path={}",
            path.display()
        );
        Ok(SaveOutcome::Saved {
            path,
            resolved_text: resolved,
        })
    }

    /// Saves the editor text as a brand-new note, regardless of the
    /// current note identity, and switches the session to the copy.
    pub fn save_as_copy(&mut self, editor_text: &str) -> SessionResult<SaveOutcome> {
        let text = editor_text.trim_end();
        if text.is_empty() {
            return Err(SessionError::EmptyNote);
        }

        let path = self.store.next_note_file()?;
        let now = Local::now().naive_local();
        let resolved = self.resolve_text(text, &path, Some(now), now);

        self.store.write_note(&path, &resolved, false)?;
        self.current_note = Some(path.clone());
        self.created_at = Some(now);
        self.last_saved_text = resolved.clone();

        info!(
            "event=note_save_copy module=session status=ok path={}",
            path.display()
        );
        Ok(SaveOutcome::Saved {
            path,
            resolved_text: resolved,
        })
    }

    /// Opens an existing note and returns the text for the editor.
    ///
    /// The creation timestamp is derived from file metadata; the dirty
    /// snapshot resets to the loaded text.
    pub fn open(&mut self, path: &Path) -> SessionResult<String> {
        let text = self.store.read_note(path)?;
        let editor_text = text.trim_end().to_string();

        self.current_note = Some(path.to_path_buf());
        self.created_at = Some(self.store.created_at(path));
        self.last_saved_text = editor_text.clone();

        info!(
            "event=note_open module=session status=ok path={}",
            path.display()
        );
        Ok(editor_text)
    }

    /// Deletes a note file; a missing file still counts as success.
    ///
    /// Returns `true` when the deleted note was the one being edited, in
    /// which case the session resets to a fresh empty note.
    pub fn delete(&mut self, path: &Path) -> SessionResult<bool> {
        self.store.delete_note(path)?;

        if self.current_note.as_deref() == Some(path) {
            self.reset();
            return Ok(true);
        }
        Ok(false)
    }

    /// Starts a fresh note, optionally seeded from template text, and
    /// returns the initial editor text.
    pub fn new_note(&mut self, template_text: Option<&str>) -> String {
        self.reset();
        template_text
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default()
    }

    fn reset(&mut self) {
        self.current_note = None;
        self.created_at = None;
        self.last_saved_text.clear();
    }

    fn resolve_text(
        &mut self,
        text: &str,
        path: &Path,
        created_at: Option<NaiveDateTime>,
        updated_at: NaiveDateTime,
    ) -> String {
        let config = self.configs.load(&self.tokens_config_path);
        let values = resolve(&config, Some(path), created_at, updated_at, &self.file_prefix);
        apply(text, &values)
    }
}
