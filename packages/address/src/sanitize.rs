//! Character-level text cleanup shared by every normalization step.
//!
//! Free-text address fields arrive with arbitrary punctuation, casing and
//! spacing. Everything downstream assumes the output of [`sanitize`]:
//! letters, digits and single spaces only.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters that survive sanitization. The literal `.5` is kept
/// so half-unit addresses like "Unit 3.5" are not turned into "Unit 35".
static KEEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.5|[\p{L}\p{Nd}\s]+").expect("valid regex"));

/// Regex to collapse whitespace runs into a single space.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Removes every character that is not a letter, digit or whitespace
/// (preserving `.5`), then collapses and trims whitespace.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let kept: String = KEEP_RE.find_iter(input).map(|m| m.as_str()).collect();
    collapse_whitespace(&kept)
}

/// Collapses internal whitespace runs to one space and trims the ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RE.replace_all(input, " ").trim().to_string()
}

/// Uppercases the first character of every word and lowercases the rest.
#[must_use]
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                let mut upper = first.to_uppercase();
                upper
                    .next()
                    .into_iter()
                    .chain(upper.flat_map(char::to_lowercase))
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trims the value and maps empty strings to `None`.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation() {
        assert_eq!(sanitize("123 Main St., #4"), "123 Main St 4");
    }

    #[test]
    fn keeps_accented_letters() {
        assert_eq!(sanitize("Calle Peñasco, Bogotá"), "Calle Peñasco Bogotá");
    }

    #[test]
    fn preserves_half_unit() {
        assert_eq!(sanitize("Unit 3.5"), "Unit 3.5");
        assert_eq!(sanitize("St. 5th"), "St 5th");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize("  100   N\tState  "), "100 N State");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("#-/,"), "");
    }

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("new YORK"), "New York");
        assert_eq!(title_case("  main   street "), "Main Street");
        assert_eq!(title_case("4a"), "4a");
    }

    #[test]
    fn title_case_is_stable() {
        for input in ["straße", "ßtraße", "o'BRIEN", "ÉLAN vital", "5TH"] {
            let once = title_case(&sanitize(input));
            assert_eq!(title_case(&sanitize(&once)), once, "{input}");
        }
    }

    #[test]
    fn non_empty_drops_blank() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" x ")).as_deref(), Some("x"));
    }
}
