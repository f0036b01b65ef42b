//! Unit (apartment / suite) number extraction and normalization.
//!
//! Street names frequently carry the unit inline: "123 Main St Apt 4A",
//! "929 Morreene Rd A13", "Main St 515 B". Extraction runs in two tiers:
//!
//! 1. **Keyword**: a unit keyword (`apt`, `unit` by default) is followed
//!    by the unit token.
//! 2. **Heuristic**: without a keyword, the trailing tokens are scanned
//!    from the end for something shaped like a unit ("B", "515",
//!    "A15", "515B"), skipping directional abbreviations and never
//!    accepting a 5-digit run (that is a ZIP code leaking into the
//!    street field).

use regex::Regex;
use std::sync::LazyLock;

use crate::orientation::is_orientation_abbreviation;
use crate::sanitize::sanitize;

/// A lone letter, or 1-4 digits (optionally `.5`) with an optional
/// letter on either side.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z]?\d{1,4}(?:\.5)?[a-z]?\b|\b[a-z]\b").expect("valid regex")
});

/// Words that are never unit numbers on their own.
static LETTER_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}{2,}").expect("valid regex"));

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// Maximum length of the digit run in a split "515 B" style unit.
const MAX_UNIT_DIGITS: usize = 4;

/// Default keywords, checked in order.
pub const DEFAULT_UNIT_KEYWORDS: &[&str] = &["apt", "unit"];

/// A unit number found in a street name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMatch {
    /// Normalized unit number.
    pub unit: String,
    /// Indices of the whitespace-delimited tokens of the input that
    /// produced the unit (keyword included), in ascending order.
    pub tokens: Vec<usize>,
}

impl UnitMatch {
    /// Returns `street_name` without the tokens that made up this unit.
    #[must_use]
    pub fn strip_from(&self, street_name: &str) -> String {
        street_name
            .split_whitespace()
            .enumerate()
            .filter(|(idx, _)| !self.tokens.contains(idx))
            .map(|(_, token)| token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Canonicalizes a raw unit token: letters-only words are removed, the
/// result is uppercased and digits are moved in front of letters.
/// Letters that end up side by side after the move form a word too and
/// are dropped.
///
/// `"B4"` becomes `"4B"`, `"Unit 7"` becomes `"7"`, `"C3D"` becomes
/// `"3"`, `"Apt"` becomes `None`.
#[must_use]
pub fn normalize_unit_number(raw: &str) -> Option<String> {
    let cleaned = sanitize(raw);
    let without_words = LETTER_RUN_RE.replace_all(&cleaned, "");
    let upper: String = without_words
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    let (letters, digits): (String, String) = upper.chars().partition(|c| c.is_alphabetic());
    let unit = if letters.chars().nth(1).is_some() {
        digits
    } else {
        digits + &letters
    };

    if unit.is_empty() { None } else { Some(unit) }
}

/// Extracts a unit number from a street name using the default keywords.
#[must_use]
pub fn extract_unit_number(street_name: &str) -> Option<String> {
    find_unit_number(street_name, DEFAULT_UNIT_KEYWORDS).map(|m| m.unit)
}

/// Locates a unit number in a street name, trying each keyword in order
/// before falling back to the trailing-token heuristic.
///
/// When a keyword is present the keyword tier decides alone, even if it
/// finds nothing usable after the keyword.
#[must_use]
pub fn find_unit_number<S: AsRef<str>>(street_name: &str, keywords: &[S]) -> Option<UnitMatch> {
    if street_name.trim().is_empty() {
        return None;
    }

    let spans: Vec<(usize, usize)> = TOKEN_RE
        .find_iter(street_name)
        .map(|m| (m.start(), m.end()))
        .collect();

    for keyword in keywords {
        if let Some(start) = find_keyword(street_name, keyword.as_ref()) {
            return keyword_unit(street_name, &spans, start, keyword.as_ref().len());
        }
    }

    heuristic_unit(street_name, &spans)
}

/// Byte offset of the first occurrence of `keyword` that starts a word
/// and is not followed by another letter ("Apt4" matches, "Unity" does
/// not).
fn find_keyword(haystack: &str, keyword: &str) -> Option<usize> {
    if keyword.is_empty() {
        return None;
    }
    let lower = haystack.to_ascii_lowercase();
    let keyword = keyword.to_ascii_lowercase();

    lower.match_indices(&keyword).map(|(pos, _)| pos).find(|&pos| {
        let starts_word = haystack[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let ends_word = haystack[pos + keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphabetic());
        starts_word && ends_word
    })
}

fn token_index_at(spans: &[(usize, usize)], byte: usize) -> Option<usize> {
    spans
        .iter()
        .position(|&(start, end)| byte >= start && byte < end)
}

fn keyword_unit(
    street_name: &str,
    spans: &[(usize, usize)],
    keyword_start: usize,
    keyword_len: usize,
) -> Option<UnitMatch> {
    let keyword_end = keyword_start + keyword_len;
    let rest = &street_name[keyword_end..];
    let skipped = rest.len()
        - rest
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .len();
    let token_start = keyword_end + skipped;
    let raw = street_name[token_start..].split_whitespace().next()?;

    let unit = normalize_unit_number(raw)?;
    let first = token_index_at(spans, keyword_start)?;
    let last = token_index_at(spans, token_start)?;

    log::trace!("Keyword unit '{unit}' from '{street_name}'");
    Some(UnitMatch {
        unit,
        tokens: (first..=last).collect(),
    })
}

/// One candidate token (or recombined token pair) of the heuristic tier.
struct Candidate {
    text: String,
    tokens: Vec<usize>,
}

fn is_digit_run(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_UNIT_DIGITS
        && token.chars().all(|c| c.is_ascii_digit())
}

fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Merges a trailing "515 B" / "A 515" pair into one "515A" candidate.
fn recombine(candidates: &mut Vec<Candidate>) {
    if candidates.len() < 2 {
        return;
    }
    let last = &candidates[0];
    let before = &candidates[1];

    let combined = if is_digit_run(&last.text) && is_single_letter(&before.text) {
        Some(format!("{}{}", last.text, before.text))
    } else if is_single_letter(&last.text) && is_digit_run(&before.text) {
        Some(format!("{}{}", before.text, last.text))
    } else {
        None
    };

    if let Some(text) = combined {
        let mut tokens = vec![before.tokens[0], last.tokens[0]];
        tokens.sort_unstable();
        candidates.drain(0..2);
        candidates.insert(0, Candidate { text, tokens });
    }
}

fn heuristic_unit(street_name: &str, spans: &[(usize, usize)]) -> Option<UnitMatch> {
    // The first token is the house number (or the first street word once
    // the number has been removed) and is never a unit.
    let mut candidates: Vec<Candidate> = spans
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .map(|(idx, &(start, end))| Candidate {
            text: street_name[start..end].to_string(),
            tokens: vec![idx],
        })
        .filter(|c| !is_orientation_abbreviation(&c.text))
        .collect();

    recombine(&mut candidates);

    candidates.into_iter().find_map(|candidate| {
        let found = UNIT_RE.find(&candidate.text)?;
        let unit = normalize_unit_number(found.as_str())?;
        log::trace!("Heuristic unit '{unit}' from '{street_name}'");
        Some(UnitMatch {
            unit,
            tokens: candidate.tokens,
        })
    })
}
