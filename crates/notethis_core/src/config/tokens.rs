//! Token grammar configuration.
//!
//! # Responsibility
//! - Decode the `tokens.json` document into typed token definitions.
//! - Cache one immutable configuration per source path.
//!
//! # Invariants
//! - A configuration is immutable once loaded and shared by reference.
//! - Malformed groups or specs are skipped during iteration, never errors.
//! - Iteration order is deterministic (group name, then token name).

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::load_json_or_default;

/// Format applied when a date-like token spec omits `format`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d";

/// Data category a token draws its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    Date,
    Time,
    Datetime,
    Hostname,
    NoteId,
    CreatedAt,
    UpdatedAt,
}

/// One named token definition inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenSpec {
    pub source: TokenSource,
    #[serde(default)]
    pub format: Option<String>,
}

impl TokenSpec {
    /// Format string to apply, falling back to [`DEFAULT_TIMESTAMP_FORMAT`].
    pub fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_TIMESTAMP_FORMAT)
    }
}

/// Top-level token configuration document.
///
/// `globals` and `tokens` keep raw JSON values so that one malformed entry
/// cannot poison the rest of the document; [`TokenConfig::token_specs`]
/// validates entry by entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub globals: BTreeMap<String, JsonValue>,
    pub tokens: BTreeMap<String, JsonValue>,
}

impl TokenConfig {
    /// Loads a configuration file, degrading to the empty configuration
    /// when the file is absent or malformed.
    pub fn load(path: &Path) -> Self {
        load_json_or_default(path, "tokens")
    }

    /// Global constants coerced to strings, in name order.
    pub fn global_values(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.globals
            .iter()
            .map(|(name, value)| (name.as_str(), scalar_to_string(value)))
    }

    /// Valid token specs across all groups, in group-then-name order.
    ///
    /// Non-object groups, non-object specs and specs with a missing or
    /// unknown `source` are silently skipped.
    pub fn token_specs(&self) -> impl Iterator<Item = (&str, TokenSpec)> + '_ {
        self.tokens
            .values()
            .filter_map(JsonValue::as_object)
            .flat_map(|group| {
                group.iter().filter_map(|(name, raw)| {
                    serde_json::from_value::<TokenSpec>(raw.clone())
                        .ok()
                        .map(|spec| (name.as_str(), spec))
                })
            })
    }

    /// Token names offered for insertion menus: globals first, then every
    /// valid grouped token.
    pub fn token_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.globals.keys().cloned().collect();
        names.extend(self.token_specs().map(|(name, _)| name.to_string()));
        names
    }
}

fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Per-path cache of loaded token configurations.
///
/// Owned by the application context so cache lifetime is explicit rather
/// than process-global. An entry, once loaded, is reused for the life of
/// the cache.
#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: HashMap<PathBuf, Arc<TokenConfig>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached configuration for `path`, loading it on first use.
    pub fn load(&mut self, path: &Path) -> Arc<TokenConfig> {
        if let Some(config) = self.entries.get(path) {
            return Arc::clone(config);
        }

        let config = Arc::new(TokenConfig::load(path));
        self.entries.insert(path.to_path_buf(), Arc::clone(&config));
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenConfig, TokenSource};

    fn config_from(json: &str) -> TokenConfig {
        serde_json::from_str(json).expect("test config should parse")
    }

    #[test]
    fn token_specs_skip_malformed_entries() {
        let config = config_from(
            r#"{
                "globals": {"APP": "NoteThis"},
                "tokens": {
                    "date": {
                        "TODAY": {"source": "date", "format": "%Y-%m-%d"},
                        "BROKEN": "not-a-spec",
                        "NO_SOURCE": {"format": "%Y"},
                        "ALIEN": {"source": "moon_phase"}
                    },
                    "busted": 17
                }
            }"#,
        );

        let specs: Vec<_> = config.token_specs().collect();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].0, "TODAY");
        assert_eq!(specs[0].1.source, TokenSource::Date);
    }

    #[test]
    fn token_names_cover_globals_and_valid_specs() {
        let config = config_from(
            r#"{
                "globals": {"APP": "NoteThis"},
                "tokens": {"date": {"TODAY": {"source": "date"}, "BAD": 3}}
            }"#,
        );
        assert_eq!(config.token_names(), vec!["APP", "TODAY"]);
    }

    #[test]
    fn global_values_coerce_scalars_to_strings() {
        let config = config_from(r#"{"globals": {"APP": "NoteThis", "YEAR": 2026, "BETA": true}}"#);
        let values: Vec<_> = config.global_values().collect();
        assert!(values.contains(&("APP", "NoteThis".to_string())));
        assert!(values.contains(&("YEAR", "2026".to_string())));
        assert!(values.contains(&("BETA", "true".to_string())));
    }

    #[test]
    fn missing_file_loads_empty_config() {
        let config = TokenConfig::load(std::path::Path::new("/nonexistent/tokens.json"));
        assert_eq!(config, TokenConfig::default());
    }
}
