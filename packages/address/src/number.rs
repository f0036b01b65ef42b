//! House number and ZIP code extraction.

use regex::Regex;
use std::sync::LazyLock;

use crate::sanitize::collapse_whitespace;

/// A standalone five-digit run (the ZIP+4 tail is not part of the match).
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("valid regex"));

/// Returns the digits of the first token of a street name.
///
/// Only the first token is inspected, so "Main St 12" yields `None` and
/// "123A Main St" yields `"123"`.
#[must_use]
pub fn extract_street_number(street_name: &str) -> Option<String> {
    let collapsed = collapse_whitespace(street_name);
    let first = collapsed.split(' ').next()?;
    let digits: String = first.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Removes the first token (the house number) from a street name.
#[must_use]
pub fn strip_first_token(street_name: &str) -> String {
    street_name
        .split_whitespace()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the five-digit ZIP code contained in the input, if any.
#[must_use]
pub fn extract_zip_code(input: &str) -> Option<String> {
    ZIP_RE.find(input).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_leading_number() {
        assert_eq!(extract_street_number("123 Main St").as_deref(), Some("123"));
        assert_eq!(extract_street_number("  42   Elm").as_deref(), Some("42"));
    }

    #[test]
    fn strips_letters_from_number_token() {
        assert_eq!(extract_street_number("123A Main St").as_deref(), Some("123"));
    }

    #[test]
    fn only_first_token_counts() {
        assert_eq!(extract_street_number("Main St 12"), None);
        assert_eq!(extract_street_number(""), None);
    }

    #[test]
    fn strips_first_token() {
        assert_eq!(strip_first_token("123 Main  St"), "Main St");
        assert_eq!(strip_first_token("123"), "");
    }

    #[test]
    fn extracts_zip() {
        assert_eq!(extract_zip_code("10001-1234").as_deref(), Some("10001"));
        assert_eq!(extract_zip_code("78701").as_deref(), Some("78701"));
        assert_eq!(extract_zip_code(" TX 78701 ").as_deref(), Some("78701"));
    }

    #[test]
    fn rejects_short_and_long_zips() {
        assert_eq!(extract_zip_code("123"), None);
        assert_eq!(extract_zip_code("123456"), None);
        assert_eq!(extract_zip_code(""), None);
    }
}
