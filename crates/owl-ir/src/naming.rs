//! Identifier helpers
//!
//! Display names in the IR are derived from IRIs or labels; the emitters
//! turn them into field names.

use regex::Regex;
use std::sync::LazyLock;

static FIRST_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(.)([A-Z][a-z]+)").expect("valid regex"));
static ALL_CAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("valid regex"));

/// Remove spaces, `/` and `-` so a label can be used as a type name.
pub fn clean_string(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, ' ' | '/' | '-')).collect()
}

/// Last segment of an absolute IRI, e.g. `https://example.com/Resource` -> `Resource`.
///
/// Fragment IRIs (`http://example.com/onto#Storage`) yield the fragment.
pub fn name_from_iri(iri: &str) -> &str {
    iri.rsplit(|c: char| c == '/' || c == '#')
        .next()
        .unwrap_or_default()
}

/// Local part of an abbreviated IRI, e.g. `prop:enabled` -> `enabled`.
///
/// Inputs without a prefix separator are returned unchanged.
pub fn name_without_prefix(abbreviated: &str) -> &str {
    abbreviated
        .split_once(':')
        .map_or(abbreviated, |(_, name)| name)
}

/// Convert a camel-case name to snake case, e.g. `OSLogging` -> `os_logging`.
pub fn to_snake_case(s: &str) -> String {
    let cleaned = clean_string(s);
    let snake = FIRST_CAP.replace_all(&cleaned, "${1}_${2}");
    let snake = ALL_CAP.replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

/// English plural of a type name, e.g. `Availability` -> `Availabilities`.
pub fn to_plural(s: &str) -> String {
    match s.strip_suffix('y') {
        Some(stem) => format!("{stem}ies"),
        None => format!("{s}s"),
    }
}
