//! The normalization pipeline.
//!
//! A [`RawAddressInput`] is turned into a [`NormalizedAddress`] by a fixed
//! sequence of steps. Each step takes the working [`Draft`] by value and
//! returns the next one, and only touches a field that is not resolved
//! yet. Number, unit and suffix extraction repeat until the street name
//! stops shrinking. Explicit input therefore always wins over inference,
//! and running the pipeline on its own output changes nothing.

use std::sync::LazyLock;

use address_normalizer_models::{
    AddressType, NormalizedAddress, NormalizerConfig, RawAddressInput,
};

use crate::display::{full_display, street_display};
use crate::number::{extract_street_number, extract_zip_code, strip_first_token};
use crate::orientation::resolve_prefix;
use crate::sanitize::{non_empty, sanitize, title_case};
use crate::suffix::canonical_suffix;
use crate::unit::{find_unit_number, normalize_unit_number};

pub(crate) static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Normalizes an address with the default configuration.
#[must_use]
pub fn normalize_address(input: &RawAddressInput) -> NormalizedAddress {
    DEFAULT_NORMALIZER.normalize(input)
}

/// Address normalizer bound to a [`NormalizerConfig`].
///
/// Holds no mutable state; a single instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

/// Working state threaded through the pipeline steps.
#[derive(Debug, Clone)]
struct Draft {
    address: NormalizedAddress,
    /// Caller-supplied prefix text, resolved in [`resolve_street_prefix`].
    prefix_input: Option<String>,
    /// Caller-supplied display, only kept for coordinate addresses.
    display_input: Option<String>,
}

impl Normalizer {
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Runs the full pipeline over `input`. The input is not modified.
    #[must_use]
    pub fn normalize(&self, input: &RawAddressInput) -> NormalizedAddress {
        let draft = self.prepare(input);
        let draft = resolve_street_prefix(draft);
        let draft = self.split_street_name(draft);
        let draft = canonicalize_suffix(draft);
        let draft = demote_lone_prefix(draft);
        let draft = decide_type(draft);
        finish(draft)
    }

    /// Casing, sanitization and defaults for every text field.
    fn prepare(&self, input: &RawAddressInput) -> Draft {
        let titled =
            |value: &Option<String>| clean(value.as_deref().map(|v| title_case(&sanitize(v))));
        let upper = |value: &Option<String>| clean(value.as_deref().map(str::to_uppercase));

        let country_code =
            upper(&input.country_code).or_else(|| non_empty(Some(&self.config.default_country_code)));

        Draft {
            address: NormalizedAddress {
                street_number: clean(input.street_number.clone()),
                street_prefix: None,
                street_name: titled(&input.street_name),
                street_suffix: titled(&input.street_suffix),
                unit_number: input
                    .unit_number
                    .as_deref()
                    .and_then(normalize_unit_number),
                city: titled(&input.city),
                county: titled(&input.county),
                state_code: upper(&input.state_code),
                zip: input.zip.as_deref().and_then(|zip| {
                    extract_zip_code(zip).or_else(|| clean(Some(zip.to_uppercase())))
                }),
                country_code,
                latitude: input.latitude,
                longitude: input.longitude,
                street_display: None,
                display: None,
                address_type: input.address_type,
            },
            prefix_input: clean(input.street_prefix.clone()),
            display_input: input.display.clone(),
        }
    }

    /// Number, unit and suffix resolution, repeated until a round leaves
    /// the address unchanged. Each round only removes street name tokens.
    fn split_street_name(&self, mut draft: Draft) -> Draft {
        loop {
            let before = draft.address.clone();
            draft = resolve_street_number(draft);
            draft = self.resolve_unit_number(draft);
            draft = resolve_street_suffix(draft);
            if draft.address == before {
                return draft;
            }
        }
    }

    /// Pulls the unit out of the street name, or strips a trailing copy
    /// of an explicit unit from it.
    fn resolve_unit_number(&self, mut draft: Draft) -> Draft {
        let addr = &mut draft.address;
        let Some(name) = addr.street_name.take() else {
            return draft;
        };

        let name = match addr.unit_number.clone() {
            Some(unit) => strip_trailing_token(&name, |token| token.eq_ignore_ascii_case(&unit)),
            None => match find_unit_number(&name, &self.config.unit_keywords) {
                Some(found) => {
                    log::trace!("Extracted unit '{}' from '{name}'", found.unit);
                    let stripped = found.strip_from(&name);
                    addr.unit_number = Some(found.unit);
                    stripped
                }
                None => name,
            },
        };

        addr.street_name = non_empty(Some(&name));
        draft
    }
}

/// Sanitizes a text field, mapping empty results to `None`.
fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| sanitize(&v)).filter(|v| !v.is_empty())
}

/// Drops the last token of `name` if `matches` accepts it and it is not
/// the only token.
fn strip_trailing_token(name: &str, matches: impl Fn(&str) -> bool) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, rest)) if !rest.is_empty() && matches(*last) => rest.join(" "),
        _ => tokens.join(" "),
    }
}

fn resolve_street_prefix(mut draft: Draft) -> Draft {
    let (prefix, name) = resolve_prefix(
        draft.prefix_input.as_deref(),
        draft.address.street_name.as_deref(),
    );
    draft.address.street_prefix = prefix;
    draft.address.street_name = non_empty(name.as_deref());
    draft
}

fn resolve_street_number(mut draft: Draft) -> Draft {
    let addr = &mut draft.address;
    if addr.street_number.is_some() {
        return draft;
    }
    let Some(name) = addr.street_name.as_deref() else {
        return draft;
    };
    if let Some(number) = extract_street_number(name) {
        log::trace!("Extracted street number '{number}' from '{name}'");
        addr.street_name = non_empty(Some(&strip_first_token(name)));
        addr.street_number = Some(number);
    }
    draft
}

/// Infers the suffix from the last word of the street name, or strips
/// the last word when it repeats an explicit suffix.
///
/// An explicit suffix is canonicalized first; one that is not a known
/// suffix is dropped and the name is searched as if none was given.
fn resolve_street_suffix(draft: Draft) -> Draft {
    let mut draft = canonicalize_suffix(draft);
    let addr = &mut draft.address;
    let Some(name) = addr.street_name.as_deref() else {
        return draft;
    };

    let name = if let Some(suffix) = addr.street_suffix.as_deref() {
        strip_trailing_token(name, |token| canonical_suffix(token) == Some(suffix))
    } else {
        let tokens: Vec<&str> = name.split_whitespace().collect();
        match tokens.split_last() {
            Some((last, rest)) if !rest.is_empty() => match canonical_suffix(last) {
                Some(canonical) => {
                    log::trace!("Inferred street suffix '{canonical}' from '{name}'");
                    addr.street_suffix = Some(canonical.to_string());
                    rest.join(" ")
                }
                None => tokens.join(" "),
            },
            _ => tokens.join(" "),
        }
    };

    addr.street_name = non_empty(Some(&name));
    draft
}

fn canonicalize_suffix(mut draft: Draft) -> Draft {
    let addr = &mut draft.address;
    addr.street_suffix = addr.street_suffix.take().and_then(|suffix| {
        let canonical = canonical_suffix(&suffix);
        if canonical.is_none() {
            log::debug!("Dropping unrecognized street suffix '{suffix}'");
        }
        canonical.map(ToString::to_string)
    });
    draft
}

/// A direction on its own ("North") is the street's name, not a prefix.
fn demote_lone_prefix(mut draft: Draft) -> Draft {
    let addr = &mut draft.address;
    if addr.street_name.is_none() {
        if let Some(prefix) = addr.street_prefix.take() {
            addr.street_name = Some(prefix.abbreviation().to_string());
        }
    }
    draft
}

/// Decides between a street address and a coordinate pair, but only when
/// the caller supplied coordinates at all.
fn decide_type(mut draft: Draft) -> Draft {
    let addr = &mut draft.address;
    if addr.latitude.is_none() && addr.longitude.is_none() {
        return draft;
    }
    if addr.street_name.is_some() && addr.street_number.is_some() {
        addr.address_type = Some(AddressType::Address);
    } else if addr.latitude.is_some() && addr.longitude.is_some() {
        addr.address_type = Some(AddressType::Coordinates);
    }
    draft
}

fn finish(draft: Draft) -> NormalizedAddress {
    let mut addr = draft.address;

    if addr.address_type == Some(AddressType::Coordinates) {
        addr.street_number = None;
        addr.street_prefix = None;
        addr.street_name = None;
        addr.street_suffix = None;
        addr.unit_number = None;
        addr.street_display = None;
        addr.display = draft.display_input;
    } else {
        addr.street_display = street_display(&addr);
        addr.display = full_display(&addr);
    }

    addr
}
