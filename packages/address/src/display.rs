//! Human-readable display strings composed from normalized components.

use address_normalizer_models::{AddressType, NormalizedAddress};

/// Joins the non-empty, trimmed parts with `separator`.
fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>, separator: &str) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// `"{number} {prefix} {name} {suffix} {unit}"`, or `None` without a
/// street name.
#[must_use]
pub fn street_display(addr: &NormalizedAddress) -> Option<String> {
    let name = addr.street_name.as_deref().filter(|n| !n.trim().is_empty())?;
    none_if_empty(join_present(
        [
            addr.street_number.as_deref(),
            addr.street_prefix.map(|p| p.abbreviation()),
            Some(name),
            addr.street_suffix.as_deref(),
            addr.unit_number.as_deref(),
        ],
        " ",
    ))
}

/// `"{city}, {state} {zip}"`, dropping whichever side is empty.
#[must_use]
pub fn city_state_string(addr: &NormalizedAddress) -> Option<String> {
    if addr.city.is_none() && addr.state_code.is_none() && addr.zip.is_none() {
        return None;
    }
    let state_zip = join_present([addr.state_code.as_deref(), addr.zip.as_deref()], " ");
    none_if_empty(join_present(
        [addr.city.as_deref(), Some(state_zip.as_str())],
        ", ",
    ))
}

/// Street display and city/state joined with a comma.
#[must_use]
pub fn full_display(addr: &NormalizedAddress) -> Option<String> {
    let street = street_display(addr);
    let city_state = city_state_string(addr);
    none_if_empty(join_present(
        [street.as_deref(), city_state.as_deref()],
        ", ",
    ))
}

/// Returns `true` if the address is a street address that still lacks
/// coordinates.
#[must_use]
pub fn needs_geocoding(addr: &NormalizedAddress) -> bool {
    addr.address_type != Some(AddressType::Coordinates)
        && addr.street_name.is_some()
        && (addr.latitude.is_none() || addr.longitude.is_none())
}

/// Builds a one-line `"street, city, state zip"` query for a geocoder.
///
/// The unit number is left out; geocoders resolve buildings, not units.
#[must_use]
pub fn geocoder_query(addr: &NormalizedAddress) -> Option<String> {
    let street = street_display(&NormalizedAddress {
        unit_number: None,
        ..addr.clone()
    })?;
    let city_state = city_state_string(addr);
    Some(join_present(
        [Some(street.as_str()), city_state.as_deref()],
        ", ",
    ))
}
