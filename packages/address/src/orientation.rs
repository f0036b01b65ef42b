//! Directional prefix detection.
//!
//! Street names arrive as "N Main", "North Main", "Main N" or with a
//! separate prefix field that duplicates a word of the name. This module
//! decides which [`Orientation`] (if any) is the street's prefix and
//! removes it from the name.

use std::str::FromStr;

use address_normalizer_models::Orientation;

use crate::suffix::is_street_suffix;

/// Parses a single token as an orientation, accepting either the
/// abbreviation or the full name in any case.
#[must_use]
pub fn orientation_from_token(token: &str) -> Option<Orientation> {
    Orientation::from_str(token.trim()).ok()
}

/// Returns `true` if the token is one of the short abbreviations
/// (`N`, `NE`, ... `NW`). Full names do not count.
#[must_use]
pub fn is_orientation_abbreviation(token: &str) -> bool {
    Orientation::all()
        .iter()
        .any(|o| o.abbreviation().eq_ignore_ascii_case(token))
}

/// Pulls an orientation out of a street name.
///
/// The first token wins if it is a direction. Otherwise the first
/// direction found anywhere in the name is taken. Returns the orientation
/// and the remaining name.
#[must_use]
pub fn extract_from_street_name(street_name: &str) -> (Option<Orientation>, String) {
    let tokens: Vec<&str> = street_name.split_whitespace().collect();

    let found = tokens
        .iter()
        .enumerate()
        .find_map(|(idx, token)| orientation_from_token(token).map(|o| (idx, o)));

    let Some((idx, orientation)) = found else {
        return (None, tokens.join(" "));
    };

    let remaining = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, t)| *t)
        .collect::<Vec<_>>()
        .join(" ");

    (Some(orientation), remaining)
}

/// A word naming the street itself: letters only, more than one of them,
/// and neither a direction nor a street suffix.
fn is_name_word(token: &str) -> bool {
    token.chars().nth(1).is_some()
        && token.chars().all(char::is_alphabetic)
        && orientation_from_token(token).is_none()
        && !is_street_suffix(token)
}

/// Removes every token of `street_name` that means the same direction as
/// `prefix` (so "N" + "North Main" does not display as "N North Main").
///
/// The name is left alone unless a word naming the street survives, so
/// "W" + "West St" stays "West St".
#[must_use]
pub fn strip_synonyms(street_name: &str, prefix: Orientation) -> String {
    let tokens: Vec<&str> = street_name.split_whitespace().collect();
    if !tokens.iter().any(|token| is_name_word(token)) {
        return tokens.join(" ");
    }
    tokens
        .into_iter()
        .filter(|token| orientation_from_token(token) != Some(prefix))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves the street prefix from an explicit prefix field and the
/// street name. Returns the prefix and the street name with it removed.
///
/// An explicit prefix that is not a direction is discarded and the name
/// is searched instead.
#[must_use]
pub fn resolve_prefix(
    prefix: Option<&str>,
    street_name: Option<&str>,
) -> (Option<Orientation>, Option<String>) {
    let explicit = prefix.and_then(|p| {
        let parsed = orientation_from_token(p);
        if parsed.is_none() {
            log::debug!("Dropping unrecognized street prefix '{p}'");
        }
        parsed
    });

    let Some(name) = street_name else {
        return (explicit, None);
    };

    if let Some(orientation) = explicit {
        return (Some(orientation), Some(strip_synonyms(name, orientation)));
    }

    match extract_from_street_name(name) {
        (Some(orientation), remaining) => {
            log::trace!("Extracted street prefix {orientation} from '{name}'");
            (Some(orientation), Some(strip_synonyms(&remaining, orientation)))
        }
        (None, remaining) => (None, Some(remaining)),
    }
}

/// Finds a direction inside a full display string.
///
/// Whole-token abbreviations are checked first, left to right. If none
/// match, the earliest full direction name appearing anywhere in the
/// string is returned.
#[must_use]
pub fn extract_from_display_string(display: &str) -> Option<Orientation> {
    let by_abbreviation = display.split_whitespace().find_map(|token| {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric());
        Orientation::all()
            .iter()
            .copied()
            .find(|o| o.abbreviation().eq_ignore_ascii_case(token))
    });
    if by_abbreviation.is_some() {
        return by_abbreviation;
    }

    let lower = display.to_lowercase();
    Orientation::all()
        .iter()
        .filter_map(|o| {
            lower
                .find(&o.full_name().to_lowercase())
                .map(|pos| (pos, *o))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, o)| o)
}
