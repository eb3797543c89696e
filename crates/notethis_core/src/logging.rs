//! Logging bootstrap for the core crate.
//!
//! # Responsibility
//! - Initialize file-based rotating logs exactly once per process.
//! - Keep log events stable `key=value` text for later inspection.
//!
//! # Invariants
//! - Initialization is idempotent for an identical level/directory pair.
//! - A second initialization with a conflicting configuration is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "notethis";
const LOG_ROTATE_BYTES: u64 = 5 * 1024 * 1024;
const LOG_KEEP_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();

struct ActiveLogging {
    level: &'static str,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts rotating file logging under `log_dir`.
///
/// Repeat calls with the same level and directory are no-ops; calls that
/// would change an already active configuration return an error string.
///
/// # Errors
/// - Unsupported level name.
/// - Directory creation or logger backend failure.
/// - Conflict with an earlier initialization.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), String> {
    let level = normalize_level(level)?;
    let dir = log_dir.as_ref().to_path_buf();

    let init_dir = dir.clone();
    let active = ACTIVE.get_or_try_init(|| -> Result<ActiveLogging, String> {
        std::fs::create_dir_all(&init_dir).map_err(|err| {
            format!(
                "cannot create log directory `{}`: {err}",
                init_dir.display()
            )
        })?;

        let handle = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(init_dir.as_path())
                    .basename(LOG_BASENAME),
            )
            .rotate(
                Criterion::Size(LOG_ROTATE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(LOG_KEEP_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        info!(
            "event=logging_init module=core status=ok level={level} dir={} version={}",
            init_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(ActiveLogging {
            level,
            dir: init_dir,
            _handle: handle,
        })
    })?;

    if active.dir != dir || active.level != level {
        return Err(format!(
            "logging already active at `{}` level `{}`; refusing to switch to `{}` level `{}`",
            active.dir.display(),
            active.level,
            dir.display(),
            level
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

/// Default level for the current build mode: `debug` in debug builds,
/// `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn normalize_level_accepts_aliases_and_rejects_garbage() {
        assert_eq!(normalize_level(" WARNING ").unwrap(), "warn");
        assert_eq!(normalize_level("Info").unwrap(), "info");
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("notethis-log-{}-{nanos}", std::process::id()));

        init_logging("info", &dir).expect("first init should succeed");
        init_logging("info", &dir).expect("same config should be idempotent");

        let conflict = init_logging("debug", &dir).expect_err("level conflict should fail");
        assert!(conflict.contains("refusing to switch"));

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir);
    }
}
