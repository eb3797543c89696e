//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notethis_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use notethis_core::AppPaths;

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from the desktop shell.
    let paths = AppPaths::default();
    println!("notethis_core version={}", notethis_core::core_version());
    println!("notethis_core notes_dir={}", paths.notes_dir().display());
}
