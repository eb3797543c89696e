//! Note file store.
//!
//! # Responsibility
//! - Own the sequential numbering scheme and backup-on-overwrite writes.
//! - Derive titles, labels and creation timestamps from note files.
//!
//! # Invariants
//! - `next_note_file` returns max existing number + 1, starting at 1.
//! - Lexicographic listing order equals numeric order for the fixed-width
//!   zero-padded names this store writes.
//! - At most one `.bak` file is retained per note.

use chrono::{DateTime, Local, NaiveDateTime};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub type StorageResult<T> = Result<T, StorageError>;

/// Error for note/template persistence operations.
#[derive(Debug)]
pub enum StorageError {
    Io { path: PathBuf, source: io::Error },
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage io failure at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,6}\s+(.*)$").expect("valid heading regex"));

/// Width of the zero-padded sequence number in note file names.
const NOTE_NUMBER_WIDTH: usize = 3;

/// Store over one notes directory with a fixed name convention.
#[derive(Debug, Clone)]
pub struct NoteStore {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

impl NoteStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists note files matching the name convention, sorted by name.
    ///
    /// Creates the notes directory when it does not exist yet.
    pub fn list_notes(&self) -> StorageResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::io(&self.dir, source))?;

        let entries =
            std::fs::read_dir(&self.dir).map_err(|source| StorageError::io(&self.dir, source))?;
        let mut notes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::io(&self.dir, source))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                continue;
            };
            if name.starts_with(&self.prefix) && name.ends_with(&self.suffix) {
                notes.push(path);
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// Path for the next note: highest existing sequence number plus one.
    ///
    /// Names whose stem is not `<prefix><digits>` are ignored; an empty
    /// directory starts at number 1.
    pub fn next_note_file(&self) -> StorageResult<PathBuf> {
        let mut max_number = 0u32;
        for path in self.list_notes()? {
            if let Some(number) = self.note_number(&path) {
                max_number = max_number.max(number);
            }
        }

        Ok(self.dir.join(format!(
            "{}{:0width$}{}",
            self.prefix,
            max_number + 1,
            self.suffix,
            width = NOTE_NUMBER_WIDTH
        )))
    }

    /// Sequence number parsed from a note path, when well-formed.
    pub fn note_number(&self, path: &Path) -> Option<u32> {
        let stem = path.file_stem()?.to_str()?;
        stem.strip_prefix(self.prefix.as_str())?.parse().ok()
    }

    /// Writes note text, normalized to exactly one trailing newline.
    ///
    /// With `backup`, an existing file at `path` is first renamed to
    /// `<name>.bak`, replacing any prior backup.
    pub fn write_note(&self, path: &Path, text: &str, backup: bool) -> StorageResult<()> {
        if backup && path.exists() {
            let backup_path = backup_path_for(path);
            match std::fs::remove_file(&backup_path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(StorageError::io(&backup_path, source)),
            }
            std::fs::rename(path, &backup_path)
                .map_err(|source| StorageError::io(path, source))?;
        }

        let mut normalized = text.trim_end_matches('\n').to_string();
        normalized.push('\n');
        std::fs::write(path, normalized).map_err(|source| StorageError::io(path, source))?;

        info!(
            "event=note_write module=storage status=ok path={} backup={backup}",
            path.display()
        );
        Ok(())
    }

    /// Reads note text as UTF-8.
    pub fn read_note(&self, path: &Path) -> StorageResult<String> {
        std::fs::read_to_string(path).map_err(|source| StorageError::io(path, source))
    }

    /// Deletes a note; a missing file counts as success.
    pub fn delete_note(&self, path: &Path) -> StorageResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                info!(
                    "event=note_delete module=storage status=ok path={}",
                    path.display()
                );
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::io(path, source)),
        }
    }

    /// Creation timestamp from file metadata.
    ///
    /// Falls back to the modification time on filesystems without birth
    /// time, and to the current time when metadata cannot be read at all.
    pub fn created_at(&self, path: &Path) -> NaiveDateTime {
        std::fs::metadata(path)
            .ok()
            .and_then(|meta| meta.created().or_else(|_| meta.modified()).ok())
            .map(|time| DateTime::<Local>::from(time).naive_local())
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// One-line listing label: `title (filename) - preview`.
    pub fn note_label(&self, path: &Path, max_chars: usize) -> StorageResult<String> {
        let text = self.read_note(path)?;
        let text = text.trim();

        let name = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default();

        let title = extract_title(text);
        let title: &str = if title.is_empty() { stem } else { title.as_str() };

        let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut preview = if compact.chars().count() > max_chars {
            let cut: String = compact.chars().take(max_chars).collect();
            format!("{}...", cut.trim_end())
        } else {
            compact
        };
        if preview.is_empty() {
            preview = "(empty note)".to_string();
        }

        Ok(format!("{title} ({name}) - {preview}"))
    }
}

/// Backup path for a note: the full file name plus `.bak`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Title of a note: its first non-blank line, with a markdown heading
/// marker (1-6 `#` plus whitespace) stripped when present.
pub fn extract_title(text: &str) -> String {
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            return caps[1].trim().to_string();
        }
        return line.to_string();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::{backup_path_for, extract_title};
    use std::path::Path;

    #[test]
    fn title_comes_from_first_non_blank_line() {
        assert_eq!(extract_title("\n\nplain line\nsecond"), "plain line");
        assert_eq!(extract_title("  ## Heading two  \nbody"), "Heading two");
        assert_eq!(extract_title("####### not a heading"), "####### not a heading");
        assert_eq!(extract_title("   \n\t\n"), "");
    }

    #[test]
    fn backup_name_appends_bak_to_full_file_name() {
        assert_eq!(
            backup_path_for(Path::new("/notes/note_A004.md")),
            Path::new("/notes/note_A004.md.bak")
        );
    }
}
