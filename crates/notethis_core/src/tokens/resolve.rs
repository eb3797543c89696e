//! Token value resolution.
//!
//! # Responsibility
//! - Map every configured token name to its string value for one save.
//!
//! # Invariants
//! - Globals are copied verbatim (scalars coerced to strings).
//! - A spec whose format string cannot be rendered is omitted from the
//!   result, leaving its placeholder literal in the output.
//! - `created_at` falls back to `updated_at` when absent.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use log::debug;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::config::tokens::{TokenConfig, TokenSource};

/// Resolved token name-to-value mapping, built fresh per substitution call.
pub type TokenValues = BTreeMap<String, String>;

/// Computes the value for every global constant and valid token spec.
///
/// `file_identity` is the note file the text is being saved to, when one
/// has been allocated; `created_at` is the note creation time when known.
pub fn resolve(
    config: &TokenConfig,
    file_identity: Option<&Path>,
    created_at: Option<NaiveDateTime>,
    updated_at: NaiveDateTime,
    file_prefix: &str,
) -> TokenValues {
    let mut values = TokenValues::new();
    let note_created_at = created_at.unwrap_or(updated_at);

    for (name, value) in config.global_values() {
        values.insert(name.to_string(), value);
    }

    for (name, spec) in config.token_specs() {
        let format = spec.format_or_default();
        let resolved = match spec.source {
            TokenSource::Date | TokenSource::Time | TokenSource::Datetime => {
                format_timestamp(updated_at, format)
            }
            TokenSource::Hostname => Some(local_hostname()),
            TokenSource::NoteId => Some(note_id(file_identity, file_prefix)),
            TokenSource::CreatedAt => format_timestamp(note_created_at, format),
            TokenSource::UpdatedAt => format_timestamp(updated_at, format),
        };

        match resolved {
            Some(value) => {
                values.insert(name.to_string(), value);
            }
            None => {
                debug!(
                    "event=token_resolve module=tokens status=skipped token={name} format={format}"
                );
            }
        }
    }

    values
}

/// Renders a timestamp with a strftime-style format string.
///
/// Returns `None` for format strings chrono cannot parse or render; the
/// `%-d` day-without-leading-zero directive is handled natively by chrono's
/// no-padding modifier.
pub fn format_timestamp(value: NaiveDateTime, format: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut rendered = String::new();
    write!(rendered, "{}", value.format_with_items(items.into_iter())).ok()?;
    Some(rendered)
}

/// Local machine hostname, or the empty string when it cannot be read.
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default()
}

/// Note identifier derived from the file name by stripping the prefix.
///
/// Returns the empty string when no file identity was allocated yet.
pub fn note_id(file_identity: Option<&Path>, file_prefix: &str) -> String {
    let Some(path) = file_identity else {
        return String::new();
    };
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    stem.strip_prefix(file_prefix).unwrap_or(stem).to_string()
}
