//! Text normalization helpers shared by scoring and rendering.
//!
//! Every function is total: any input yields a (possibly empty) string.

use serde_json::Value;

/// Collapses every whitespace run (non-breaking spaces included) to a single
/// ASCII space and trims both ends.
pub fn sanitize(text: &str) -> String {
    text.split(is_space)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_space(c: char) -> bool {
    // char::is_whitespace already covers U+00A0; the BOM is not White_Space.
    c.is_whitespace() || c == '\u{feff}'
}

/// Sanitizes, then replaces the five HTML-reserved characters with entities.
/// Single pass, so entity output is never re-escaped.
pub fn escape_html(text: &str) -> String {
    let sanitized = sanitize(text);
    let mut escaped = String::with_capacity(sanitized.len());
    for c in sanitized.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Sanitizes and upper-cases the first character only.
pub fn sentence_case(text: &str) -> String {
    let sanitized = sanitize(text);
    let mut chars = sanitized.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sanitizes each entry and drops the ones that end up empty.
pub fn normalize_list<S: AsRef<str>>(list: &[S]) -> Vec<String> {
    list.iter()
        .map(|item| sanitize(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// String conversion for loosely-typed JSON input: null becomes "",
/// scalars use their display form, compound values their JSON text.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
