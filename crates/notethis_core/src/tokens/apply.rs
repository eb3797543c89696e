//! Placeholder substitution over note text.
//!
//! # Responsibility
//! - Replace `[NAME]` placeholders with resolved values in a single pass.
//!
//! # Invariants
//! - Matching is left-to-right and non-overlapping.
//! - Placeholders without a resolved value are kept verbatim, brackets
//!   included.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::resolve::TokenValues;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([A-Z0-9_]+)\]").expect("valid placeholder regex"));

/// Rewrites every known placeholder in `text` using `values`.
pub fn apply(text: &str, values: &TokenValues) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::apply;
    use crate::tokens::TokenValues;

    fn values(pairs: &[(&str, &str)]) -> TokenValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn known_placeholders_are_replaced() {
        let map = values(&[("APP", "NoteThis"), ("TODAY", "2026-02-19")]);
        assert_eq!(apply("[APP] on [TODAY]", &map), "NoteThis on 2026-02-19");
    }

    #[test]
    fn unknown_placeholders_are_fixed_points() {
        assert_eq!(apply("[UNKNOWN]", &TokenValues::new()), "[UNKNOWN]");
    }

    #[test]
    fn lowercase_and_partial_brackets_are_not_placeholders() {
        let map = values(&[("APP", "NoteThis")]);
        assert_eq!(apply("[app] [APP [APP]", &map), "[app] [APP NoteThis");
    }

    #[test]
    fn replacement_values_are_inserted_literally() {
        // A resolved value containing brackets must not be re-scanned.
        let map = values(&[("A", "[B]"), ("B", "boom")]);
        assert_eq!(apply("[A]", &map), "[B]");
    }
}
