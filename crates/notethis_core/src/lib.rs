//! Core domain logic for NoteThis.
//! This crate is the single source of truth for note lifecycle invariants.

pub mod config;
pub mod export;
pub mod logging;
pub mod paths;
pub mod service;
pub mod storage;
pub mod tokens;

pub use config::settings::{ThemeMode, TooltipConfig, UserSettings, UI_SCALE_FACTORS};
pub use config::tokens::{ConfigCache, TokenConfig, TokenSource, TokenSpec};
pub use config::{ConfigError, ConfigResult};
pub use export::{export_note, ExportError, ExportFormat, ExportResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use paths::{AppPaths, AUTOSAVE_INTERVAL, FILE_PREFIX, FILE_SUFFIX};
pub use service::session::{NoteSession, SaveMode, SaveOutcome, SessionError, SessionResult};
pub use storage::note_store::{extract_title, NoteStore, StorageError, StorageResult};
pub use storage::template_store::{template_label, TemplateStore};
pub use tokens::{apply, resolve, TokenValues};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
