//! Note export to Markdown, plain text and PDF.
//!
//! # Responsibility
//! - Detect the target format from the destination extension.
//! - Write the exported document in one shot.
//!
//! # Invariants
//! - Empty text and unsupported formats fail before anything is written,
//!   so a failed export never leaves a partial file behind.
//! - Text formats end with exactly one trailing newline.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod pdf;

pub type ExportResult<T> = Result<T, ExportError>;

/// Error for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// Nothing to export: the text is empty or whitespace-only.
    EmptyText,
    /// Destination extension does not map to a supported format.
    UnsupportedFormat(String),
    Io { path: PathBuf, source: io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "nothing to export: note text is empty"),
            Self::UnsupportedFormat(extension) => {
                write!(f, "cannot export to unsupported format `{extension}`")
            }
            Self::Io { path, source } => {
                write!(f, "export io failure at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Text,
    Pdf,
}

impl ExportFormat {
    /// Detects the format from a destination path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "md" => Some(Self::Markdown),
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Text => "Text",
            Self::Pdf => "PDF",
        }
    }
}

/// Exports note text to `path`, choosing the format by extension.
///
/// Markdown and text exports write the content verbatim plus one trailing
/// newline; PDF exports render a naive paginated document. Returns the
/// detected format so callers can phrase a status message.
pub fn export_note(text: &str, path: &Path) -> ExportResult<ExportFormat> {
    if text.trim().is_empty() {
        return Err(ExportError::EmptyText);
    }

    let format = ExportFormat::from_path(path).ok_or_else(|| {
        ExportError::UnsupportedFormat(
            path.extension()
                .and_then(|extension| extension.to_str())
                .unwrap_or("(none)")
                .to_string(),
        )
    })?;

    let bytes = match format {
        ExportFormat::Markdown | ExportFormat::Text => {
            let mut normalized = text.trim_end_matches('\n').to_string();
            normalized.push('\n');
            normalized.into_bytes()
        }
        ExportFormat::Pdf => pdf::render_pdf(text),
    };

    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "event=note_export module=export status=ok format={} path={}",
        format.label(),
        path.display()
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::ExportFormat;
    use std::path::Path;

    #[test]
    fn format_detection_is_case_insensitive_on_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.MD")),
            Some(ExportFormat::Markdown)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.pdf")),
            Some(ExportFormat::Pdf)
        );
        assert_eq!(ExportFormat::from_path(Path::new("out.docx")), None);
        assert_eq!(ExportFormat::from_path(Path::new("out")), None);
    }
}
