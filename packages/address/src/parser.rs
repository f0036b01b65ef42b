//! Free-text address parsing.
//!
//! A rough tokenizer splits a one-line address into loosely labelled
//! pieces ([`RoughAddress`]); those pieces are then run through the
//! normalization pipeline. The tokenizer is pluggable through
//! [`AddressTokenizer`]; [`UsAddressTokenizer`] handles the common
//! `"street, city, ST 12345"` shapes.

use regex::Regex;
use std::sync::LazyLock;

use address_normalizer_models::{NormalizedAddress, RawAddressInput, RoughAddress};

use crate::orientation::orientation_from_token;
use crate::pipeline::{DEFAULT_NORMALIZER, Normalizer};
use crate::sanitize::collapse_whitespace;
use crate::suffix::is_street_suffix;

/// "PO Box", "P.O. Box", "p o box" ...
static PO_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bp\.?\s*o\.?\s+box").expect("valid regex"));

static ZIP_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").expect("valid regex"));

static STATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}\.?$").expect("valid regex"));

/// Secondary-unit designators that introduce a unit token.
const UNIT_DESIGNATORS: &[&str] = &[
    "apt",
    "apartment",
    "unit",
    "ste",
    "suite",
    "rm",
    "room",
    "fl",
    "floor",
    "#",
];

/// Splits a free-text address into rough labelled tokens.
pub trait AddressTokenizer {
    /// Returns `None` when the input cannot be parsed at all.
    fn tokenize(&self, raw: &str) -> Option<RoughAddress>;
}

impl<F> AddressTokenizer for F
where
    F: Fn(&str) -> Option<RoughAddress>,
{
    fn tokenize(&self, raw: &str) -> Option<RoughAddress> {
        self(raw)
    }
}

/// Comma-aware tokenizer for US-style one-line addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsAddressTokenizer;

impl AddressTokenizer for UsAddressTokenizer {
    fn tokenize(&self, raw: &str) -> Option<RoughAddress> {
        let parts: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let (first, rest) = parts.split_first()?;

        let mut rough = RoughAddress::default();
        let mut street_tokens: Vec<&str> = first.split_whitespace().collect();

        if let Some((last, middle)) = rest.split_last() {
            let mut tail: Vec<&str> = last.split_whitespace().collect();
            let (state, zip) = peel_state_zip(&mut tail, 0);
            rough.state = state;
            rough.zip = zip;
            rough.city = if tail.is_empty() {
                middle.last().map(ToString::to_string)
            } else {
                Some(tail.join(" "))
            };
        } else {
            let (state, zip) = peel_state_zip(&mut street_tokens, 2);
            rough.state = state;
            rough.zip = zip;
            let city = split_trailing_city(&mut street_tokens);
            rough.city = city;
        }

        fill_street(&mut rough, street_tokens);
        rough.street.is_some().then_some(rough)
    }
}

/// Pops a trailing ZIP and two-letter state off `tokens`, keeping at least
/// `keep` tokens in place.
fn peel_state_zip(tokens: &mut Vec<&str>, keep: usize) -> (Option<String>, Option<String>) {
    let mut zip = None;
    if tokens.len() > keep && tokens.last().is_some_and(|t| ZIP_TOKEN_RE.is_match(t)) {
        zip = tokens.pop().map(ToString::to_string);
    }

    let mut state = None;
    if tokens.len() > keep && tokens.last().is_some_and(|t| STATE_TOKEN_RE.is_match(t)) {
        state = tokens
            .pop()
            .map(|t| t.trim_end_matches('.').to_uppercase());
    }

    (state, zip)
}

fn is_unit_designator(token: &str) -> bool {
    let token = token.trim_end_matches('.').to_ascii_lowercase();
    UNIT_DESIGNATORS.contains(&token.as_str())
}

/// Without commas, everything after the last street suffix (and any unit
/// that follows it) is taken to be the city.
fn split_trailing_city(tokens: &mut Vec<&str>) -> Option<String> {
    let suffix_idx = tokens
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find(|(_, t)| is_street_suffix(t))
        .map(|(idx, _)| idx)?;

    let mut street_end = suffix_idx + 1;
    if let Some(next) = tokens.get(street_end) {
        if is_unit_designator(next) {
            street_end = (street_end + 2).min(tokens.len());
        } else if next.starts_with('#') {
            street_end += 1;
        }
    }

    if street_end >= tokens.len() {
        return None;
    }
    let city = tokens.split_off(street_end).join(" ");
    Some(city)
}

/// Labels number, prefix, street, type and unit within the street tokens.
fn fill_street(rough: &mut RoughAddress, mut tokens: Vec<&str>) {
    if let Some(idx) = tokens.iter().position(|t| is_unit_designator(t)) {
        if idx + 1 < tokens.len() {
            rough.sec_unit_num = Some(tokens[idx + 1].trim_start_matches('#').to_string());
            tokens.truncate(idx);
        }
    } else if let Some(idx) = tokens
        .iter()
        .position(|t| t.len() > 1 && t.starts_with('#'))
    {
        rough.sec_unit_num = Some(tokens[idx][1..].to_string());
        tokens.truncate(idx);
    }

    let mut tokens = tokens.into_iter().peekable();

    if let Some(first) = tokens.next_if(|t| t.starts_with(|c: char| c.is_ascii_digit())) {
        rough.number = Some(first.to_string());
    }

    let mut rest: Vec<&str> = tokens.collect();
    if rest.len() > 1 && orientation_from_token(rest[0].trim_end_matches('.')).is_some() {
        rough.prefix = Some(rest.remove(0).trim_end_matches('.').to_string());
    }

    if rest.len() > 1 && rest.last().is_some_and(|t| is_street_suffix(t.trim_end_matches('.'))) {
        rough.street_type = rest.pop().map(|t| t.trim_end_matches('.').to_string());
    }

    if !rest.is_empty() {
        rough.street = Some(rest.join(" "));
    }
}

/// Returns `true` if the text refers to a post office box.
#[must_use]
pub fn is_po_box(raw: &str) -> bool {
    PO_BOX_RE.is_match(raw)
}

impl Normalizer {
    /// Parses a free-text address with the given tokenizer and normalizes
    /// the result.
    ///
    /// Returns `None` for PO Box addresses (when configured to reject
    /// them) and for input the tokenizer cannot parse.
    pub fn parse_with<T: AddressTokenizer + ?Sized>(
        &self,
        raw: &str,
        tokenizer: &T,
    ) -> Option<NormalizedAddress> {
        let collapsed = collapse_whitespace(raw);

        if self.config().reject_po_box && is_po_box(&collapsed) {
            log::debug!("Rejecting PO Box address '{collapsed}'");
            return None;
        }

        let Some(rough) = tokenizer.tokenize(&collapsed) else {
            log::debug!("Tokenizer could not parse '{collapsed}'");
            return None;
        };

        Some(self.normalize(&RawAddressInput::from(rough)))
    }

    /// Parses a free-text address with [`UsAddressTokenizer`].
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<NormalizedAddress> {
        self.parse_with(raw, &UsAddressTokenizer)
    }
}

/// Parses and normalizes a free-text address with the default
/// configuration and tokenizer.
#[must_use]
pub fn parse_address_string(raw: &str) -> Option<NormalizedAddress> {
    DEFAULT_NORMALIZER.parse(raw)
}

#[cfg(test)]
mod tests {
    use address_normalizer_models::{NormalizerConfig, Orientation};

    use super::*;

    #[test]
    fn rejects_po_boxes() {
        assert_eq!(parse_address_string("PO Box 12345, Austin, TX 78701"), None);
        assert_eq!(parse_address_string("p.o.  box 9, Austin, TX"), None);
        assert!(is_po_box("Po   Box 1"));
        assert!(!is_po_box("123 Pobox Rd"));
    }

    #[test]
    fn rejects_po_box_run_into_number() {
        assert!(is_po_box("PO BOX12"));
        assert_eq!(parse_address_string("PO BOX12, Austin, TX 78701"), None);
        assert_eq!(parse_address_string("P.O. BOX7, Austin, TX 78701"), None);
    }

    #[test]
    fn po_box_allowed_when_configured() {
        let normalizer = Normalizer::new(NormalizerConfig {
            reject_po_box: false,
            ..NormalizerConfig::default()
        });
        let parsed = normalizer.parse("PO Box 12, Austin, TX 78701").unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Austin"));
    }

    #[test]
    fn tokenizes_comma_separated_address() {
        let rough = UsAddressTokenizer
            .tokenize("123 N Main St Apt 4, Austin, TX 78701")
            .unwrap();
        assert_eq!(
            rough,
            RoughAddress {
                number: Some("123".to_string()),
                prefix: Some("N".to_string()),
                street: Some("Main".to_string()),
                street_type: Some("St".to_string()),
                sec_unit_num: Some("4".to_string()),
                city: Some("Austin".to_string()),
                state: Some("TX".to_string()),
                zip: Some("78701".to_string()),
            }
        );
    }

    #[test]
    fn tokenizes_city_and_state_in_one_part() {
        let rough = UsAddressTokenizer
            .tokenize("1600 Pennsylvania Ave NW, Washington DC 20500")
            .unwrap();
        assert_eq!(rough.street.as_deref(), Some("Pennsylvania Ave NW"));
        assert_eq!(rough.street_type, None);
        assert_eq!(rough.city.as_deref(), Some("Washington"));
        assert_eq!(rough.state.as_deref(), Some("DC"));
        assert_eq!(rough.zip.as_deref(), Some("20500"));
    }

    #[test]
    fn tokenizes_without_commas() {
        let rough = UsAddressTokenizer
            .tokenize("500 W 5th Ave Anchorage AK 99501")
            .unwrap();
        assert_eq!(rough.number.as_deref(), Some("500"));
        assert_eq!(rough.prefix.as_deref(), Some("W"));
        assert_eq!(rough.street.as_deref(), Some("5th"));
        assert_eq!(rough.street_type.as_deref(), Some("Ave"));
        assert_eq!(rough.city.as_deref(), Some("Anchorage"));
        assert_eq!(rough.state.as_deref(), Some("AK"));
        assert_eq!(rough.zip.as_deref(), Some("99501"));
    }

    #[test]
    fn tokenizes_hash_unit() {
        let rough = UsAddressTokenizer.tokenize("77 Elm Rd #12, Boston, MA").unwrap();
        assert_eq!(rough.sec_unit_num.as_deref(), Some("12"));
        assert_eq!(rough.street.as_deref(), Some("Elm"));
        assert_eq!(rough.street_type.as_deref(), Some("Rd"));
        assert_eq!(rough.zip, None);
    }

    #[test]
    fn fails_without_street() {
        assert_eq!(UsAddressTokenizer.tokenize(""), None);
        assert_eq!(UsAddressTokenizer.tokenize(" , , "), None);
        assert_eq!(UsAddressTokenizer.tokenize("123"), None);
        assert_eq!(parse_address_string("123, Austin, TX"), None);
    }

    #[test]
    fn parses_and_normalizes() {
        let parsed = parse_address_string("123  n main street apt 4b, austin, tx 78701-1234").unwrap();
        assert_eq!(parsed.street_number.as_deref(), Some("123"));
        assert_eq!(parsed.street_prefix, Some(Orientation::North));
        assert_eq!(parsed.street_name.as_deref(), Some("Main"));
        assert_eq!(parsed.street_suffix.as_deref(), Some("St"));
        assert_eq!(parsed.unit_number.as_deref(), Some("4B"));
        assert_eq!(parsed.city.as_deref(), Some("Austin"));
        assert_eq!(parsed.state_code.as_deref(), Some("TX"));
        assert_eq!(parsed.zip.as_deref(), Some("78701"));
        assert_eq!(
            parsed.display.as_deref(),
            Some("123 N Main St 4B, Austin, TX 78701")
        );
    }

    #[test]
    fn uses_custom_tokenizer() {
        let tokenizer = |raw: &str| {
            Some(RoughAddress {
                street: Some(raw.to_string()),
                ..RoughAddress::default()
            })
        };
        let parsed = Normalizer::default()
            .parse_with("42 wallaby way", &tokenizer)
            .unwrap();
        assert_eq!(parsed.street_display.as_deref(), Some("42 Wallaby Way"));
    }

    #[test]
    fn custom_tokenizer_failure_is_none() {
        let tokenizer = |_: &str| -> Option<RoughAddress> { None };
        assert_eq!(Normalizer::default().parse_with("anything", &tokenizer), None);
    }
}
