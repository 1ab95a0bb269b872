//! Schema-unaware value coercion
//!
//! A command line value is interpreted by its spelling alone. The first rule
//! that matches wins:
//!
//! 1. `[a,b,c]` becomes a list of strings (elements are never coerced)
//! 2. `true` / `false` become booleans
//! 3. `^[0-9]+$` becomes an integer
//! 4. anything else stays a string

use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static INTEGER_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("integer literal pattern is valid"));

/// A scalar or list value inferred from command line text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CoercedValue {
    /// `true` or `false`
    Bool(bool),
    /// Unsigned decimal literal
    Int(i64),
    /// Anything that is not one of the other forms
    Str(String),
    /// Bracketed, comma separated list
    List(Vec<String>),
}

impl CoercedValue {
    /// Human readable name of the variant, used in schema mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            CoercedValue::Bool(_) => "boolean",
            CoercedValue::Int(_) => "integer",
            CoercedValue::Str(_) => "string",
            CoercedValue::List(_) => "list",
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedValue::Bool(b) => write!(f, "{b}"),
            CoercedValue::Int(i) => write!(f, "{i}"),
            CoercedValue::Str(s) => write!(f, "{s}"),
            CoercedValue::List(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

/// Coerces a scalar value: boolean literal, integer literal or raw string
///
/// # Examples
///
/// ```
/// use rancher_config::cmdline::{coerce, CoercedValue};
///
/// assert_eq!(coerce("true"), CoercedValue::Bool(true));
/// assert_eq!(coerce("42"), CoercedValue::Int(42));
/// assert_eq!(coerce("tty0"), CoercedValue::Str("tty0".to_string()));
/// ```
pub fn coerce(text: &str) -> CoercedValue {
    match text {
        "true" => return CoercedValue::Bool(true),
        "false" => return CoercedValue::Bool(false),
        _ => {}
    }

    if INTEGER_LITERAL.is_match(text) {
        let value = text.parse::<i64>().unwrap_or_else(|e| {
            // Only reachable on overflow; the literal is still an integer.
            tracing::warn!(value = %text, error = %e, "Integer literal out of range, saturating");
            i64::MAX
        });
        return CoercedValue::Int(value);
    }

    CoercedValue::Str(text.to_string())
}

/// Coerces a full token value, checking for a bracketed list first
///
/// List elements are trimmed and stay strings. `[]` holds a single empty
/// element, the same as any other empty slot such as the middle of `[a,,b]`.
pub fn coerce_value(text: &str) -> CoercedValue {
    if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') {
        let inner = &text[1..text.len() - 1];
        return CoercedValue::List(inner.split(',').map(|s| s.trim().to_string()).collect());
    }

    coerce(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("true", CoercedValue::Bool(true) ; "true literal")]
    #[test_case("false", CoercedValue::Bool(false) ; "false literal")]
    #[test_case("0", CoercedValue::Int(0) ; "zero")]
    #[test_case("007", CoercedValue::Int(7) ; "leading zeros")]
    #[test_case("1024", CoercedValue::Int(1024) ; "plain integer")]
    #[test_case("-1", CoercedValue::Str("-1".to_string()) ; "signed is a string")]
    #[test_case("1.5", CoercedValue::Str("1.5".to_string()) ; "float is a string")]
    #[test_case("True", CoercedValue::Str("True".to_string()) ; "boolean is case sensitive")]
    #[test_case("ext4", CoercedValue::Str("ext4".to_string()) ; "plain string")]
    #[test_case("", CoercedValue::Str(String::new()) ; "empty string")]
    fn test_coerce(input: &str, expected: CoercedValue) {
        assert_eq!(coerce(input), expected);
    }

    #[test]
    fn test_coerce_integer_overflow_keeps_integer_kind() {
        let value = coerce("99999999999999999999999");
        assert_eq!(value, CoercedValue::Int(i64::MAX));
        assert_eq!(value.kind(), "integer");
    }

    #[test_case("[docker,network]", &["docker", "network"] ; "two items")]
    #[test_case("[8.8.8.8]", &["8.8.8.8"] ; "single item")]
    #[test_case("[true,1]", &["true", "1"] ; "elements not coerced")]
    #[test_case("[ a , b ]", &["a", "b"] ; "elements trimmed")]
    #[test_case("[a,,b]", &["a", "", "b"] ; "empty element kept")]
    #[test_case("[]", &[""] ; "empty brackets hold one empty element")]
    fn test_coerce_value_list(input: &str, expected: &[&str]) {
        let expected = expected.iter().map(|s| s.to_string()).collect();
        assert_eq!(coerce_value(input), CoercedValue::List(expected));
    }

    #[test]
    fn test_coerce_value_unbalanced_brackets_are_strings() {
        assert_eq!(coerce_value("["), CoercedValue::Str("[".to_string()));
        assert_eq!(coerce_value("[a"), CoercedValue::Str("[a".to_string()));
        assert_eq!(coerce_value("a]"), CoercedValue::Str("a]".to_string()));
    }

    #[test]
    fn test_coerce_value_falls_back_to_scalar() {
        assert_eq!(coerce_value("12"), CoercedValue::Int(12));
        assert_eq!(coerce_value("false"), CoercedValue::Bool(false));
    }

    #[test]
    fn test_kind_and_display() {
        let list = CoercedValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.kind(), "list");
        assert_eq!(list.to_string(), "[a,b]");
        assert_eq!(CoercedValue::Int(3).kind(), "integer");
    }
}
