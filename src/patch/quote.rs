//! Value quoting heuristics for JSON-like targets.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").expect("valid regex")
});
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

/// How a raw value is classified before it is written into a JSON-like file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    AlreadyQuoted,
    Ipv4,
    Number,
    Word,
    Unrecognized,
}

pub fn classify(value: &str) -> ValueShape {
    if is_quoted(value) {
        ValueShape::AlreadyQuoted
    } else if IPV4.is_match(value) {
        ValueShape::Ipv4
    } else if DIGITS.is_match(value) {
        ValueShape::Number
    } else if WORD.is_match(value) {
        ValueShape::Word
    } else {
        ValueShape::Unrecognized
    }
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

/// Wrap `value` in double quotes unless it is already quoted or numeric.
///
/// Values that match none of the known shapes are passed through unchanged
/// with a warning.
pub fn quote_if_needed(value: &str) -> String {
    match classify(value) {
        ValueShape::AlreadyQuoted | ValueShape::Number => value.to_string(),
        ValueShape::Ipv4 | ValueShape::Word => format!("\"{}\"", value),
        ValueShape::Unrecognized => {
            warn!(value, "Value has an unrecognized shape, writing it unquoted");
            value.to_string()
        }
    }
}
