#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the postal address normalizer.
//!
//! This crate contains only data types, configuration structs, and simple
//! conversions. The normalization logic itself lives in
//! `address_normalizer`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Discriminates a structured street address from a bare geographic point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AddressType {
    /// Structured street address (number, street name, city, ...).
    Address,
    /// A latitude/longitude pair with a free-text display string only.
    Coordinates,
}

/// A compass direction attached to a street name.
///
/// Parses (case-insensitively) from either the abbreviation or the full
/// name, and always displays as the canonical uppercase abbreviation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Orientation {
    #[serde(rename = "N")]
    #[strum(to_string = "N", serialize = "North")]
    North,
    #[serde(rename = "NE")]
    #[strum(to_string = "NE", serialize = "Northeast")]
    Northeast,
    #[serde(rename = "E")]
    #[strum(to_string = "E", serialize = "East")]
    East,
    #[serde(rename = "SE")]
    #[strum(to_string = "SE", serialize = "Southeast")]
    Southeast,
    #[serde(rename = "S")]
    #[strum(to_string = "S", serialize = "South")]
    South,
    #[serde(rename = "SW")]
    #[strum(to_string = "SW", serialize = "Southwest")]
    Southwest,
    #[serde(rename = "W")]
    #[strum(to_string = "W", serialize = "West")]
    West,
    #[serde(rename = "NW")]
    #[strum(to_string = "NW", serialize = "Northwest")]
    Northwest,
}

impl Orientation {
    /// Canonical uppercase abbreviation (`"N"`, `"NE"`, ...).
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::Northeast => "NE",
            Self::East => "E",
            Self::Southeast => "SE",
            Self::South => "S",
            Self::Southwest => "SW",
            Self::West => "W",
            Self::Northwest => "NW",
        }
    }

    /// Title-cased full name (`"North"`, `"Northeast"`, ...).
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::Northeast => "Northeast",
            Self::East => "East",
            Self::Southeast => "Southeast",
            Self::South => "South",
            Self::Southwest => "Southwest",
            Self::West => "West",
            Self::Northwest => "Northwest",
        }
    }

    /// Returns all variants, intercardinals before cardinals so that a
    /// substring scan sees `"Northwest"` before `"North"`.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Northeast,
            Self::Southeast,
            Self::Southwest,
            Self::Northwest,
            Self::North,
            Self::East,
            Self::South,
            Self::West,
        ]
    }
}

/// Untrusted, partially populated address record as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAddressInput {
    pub street_number: Option<String>,
    pub street_prefix: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub unit_number: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state_code: Option<String>,
    pub zip: Option<String>,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Caller-supplied display string. Only kept for [`AddressType::Coordinates`].
    pub display: Option<String>,
    #[serde(rename = "type")]
    pub address_type: Option<AddressType>,
}

/// Canonical address produced by the normalization pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizedAddress {
    pub street_number: Option<String>,
    pub street_prefix: Option<Orientation>,
    pub street_name: Option<String>,
    /// Canonical title-case abbreviation (`"St"`, `"Ave"`, ...).
    pub street_suffix: Option<String>,
    /// Digits first, then letters, uppercase (`"4B"`).
    pub unit_number: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state_code: Option<String>,
    /// Five-digit ZIP code.
    pub zip: Option<String>,
    pub country_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Street-only display string, `None` when there is no street name.
    pub street_display: Option<String>,
    /// Full display string, `None` when nothing is present.
    pub display: Option<String>,
    #[serde(rename = "type")]
    pub address_type: Option<AddressType>,
}

/// Structured key a persistence layer can use to find an existing address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressKey {
    pub state_code: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub street_name: Option<String>,
    pub street_number: Option<String>,
    pub unit_number: Option<String>,
}

/// Number of decimal places coordinates are compared at.
pub const COORDINATE_PRECISION: i32 = 6;

impl NormalizedAddress {
    /// Key for lookups on the structured components.
    #[must_use]
    pub fn lookup_key(&self) -> AddressKey {
        AddressKey {
            state_code: self.state_code.clone(),
            city: self.city.clone(),
            zip: self.zip.clone(),
            street_name: self.street_name.clone(),
            street_number: self.street_number.clone(),
            unit_number: self.unit_number.clone(),
        }
    }

    /// Lowercased display string for case-insensitive exact matching.
    #[must_use]
    pub fn display_key(&self) -> Option<String> {
        self.display.as_deref().map(str::to_lowercase)
    }

    /// Latitude/longitude rounded to [`COORDINATE_PRECISION`] decimal
    /// places, as integer micro-degrees.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coordinate_key(&self) -> Option<(i64, i64)> {
        let scale = 10_f64.powi(COORDINATE_PRECISION);
        let lat = self.latitude?;
        let lng = self.longitude?;
        Some(((lat * scale).round() as i64, (lng * scale).round() as i64))
    }
}

impl From<&NormalizedAddress> for RawAddressInput {
    fn from(addr: &NormalizedAddress) -> Self {
        Self {
            street_number: addr.street_number.clone(),
            street_prefix: addr.street_prefix.map(|o| o.abbreviation().to_string()),
            street_name: addr.street_name.clone(),
            street_suffix: addr.street_suffix.clone(),
            unit_number: addr.unit_number.clone(),
            city: addr.city.clone(),
            county: addr.county.clone(),
            state_code: addr.state_code.clone(),
            zip: addr.zip.clone(),
            country_code: addr.country_code.clone(),
            latitude: addr.latitude,
            longitude: addr.longitude,
            display: addr.display.clone(),
            address_type: addr.address_type,
        }
    }
}

/// Rough token output of a free-text address tokenizer.
///
/// Field names follow the tokenizer's own vocabulary, not the
/// normalized record's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoughAddress {
    pub number: Option<String>,
    pub prefix: Option<String>,
    pub street: Option<String>,
    #[serde(rename = "type")]
    pub street_type: Option<String>,
    pub sec_unit_num: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl From<RoughAddress> for RawAddressInput {
    fn from(rough: RoughAddress) -> Self {
        Self {
            street_number: rough.number,
            street_prefix: rough.prefix,
            street_name: rough.street,
            street_suffix: rough.street_type,
            unit_number: rough.sec_unit_num,
            city: rough.city,
            state_code: rough.state,
            zip: rough.zip,
            ..Self::default()
        }
    }
}

/// Tunables for the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Country code applied when the input has none.
    #[serde(default = "default_country_code")]
    pub default_country_code: String,

    /// Keywords introducing a unit number, searched in order.
    #[serde(default = "default_unit_keywords")]
    pub unit_keywords: Vec<String>,

    /// Whether free-text input mentioning a PO Box is rejected.
    #[serde(default = "default_true")]
    pub reject_po_box: bool,
}

fn default_country_code() -> String {
    "US".to_string()
}

fn default_unit_keywords() -> Vec<String> {
    vec!["apt".to_string(), "unit".to_string()]
}

const fn default_true() -> bool {
    true
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_country_code: default_country_code(),
            unit_keywords: default_unit_keywords(),
            reject_po_box: default_true(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_orientation_from_either_form() {
        assert_eq!(Orientation::from_str("NW"), Ok(Orientation::Northwest));
        assert_eq!(Orientation::from_str("nw"), Ok(Orientation::Northwest));
        assert_eq!(
            Orientation::from_str("northwest"),
            Ok(Orientation::Northwest)
        );
        assert_eq!(Orientation::from_str("North"), Ok(Orientation::North));
        assert!(Orientation::from_str("Main").is_err());
    }

    #[test]
    fn displays_orientation_as_abbreviation() {
        assert_eq!(Orientation::Southeast.to_string(), "SE");
        assert_eq!(Orientation::West.as_ref(), "W");
        for o in Orientation::all() {
            assert_eq!(o.to_string(), o.abbreviation());
        }
    }

    #[test]
    fn all_lists_every_orientation_once() {
        let mut all = Orientation::all().to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn deserializes_raw_input_with_missing_fields() {
        let raw: RawAddressInput =
            serde_json::from_str(r#"{"streetName":"N Main Street","type":"Address"}"#).unwrap();
        assert_eq!(raw.street_name.as_deref(), Some("N Main Street"));
        assert_eq!(raw.address_type, Some(AddressType::Address));
        assert!(raw.zip.is_none());
    }

    #[test]
    fn serializes_prefix_as_abbreviation() {
        let addr = NormalizedAddress {
            street_prefix: Some(Orientation::Northeast),
            ..NormalizedAddress::default()
        };
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["streetPrefix"], "NE");
    }

    #[test]
    fn rounds_coordinate_key_to_six_places() {
        let addr = NormalizedAddress {
            latitude: Some(30.267_153_4),
            longitude: Some(-97.743_060_9),
            ..NormalizedAddress::default()
        };
        assert_eq!(addr.coordinate_key(), Some((30_267_153, -97_743_061)));
    }

    #[test]
    fn coordinate_key_requires_both_coordinates() {
        let addr = NormalizedAddress {
            latitude: Some(30.0),
            ..NormalizedAddress::default()
        };
        assert_eq!(addr.coordinate_key(), None);
    }

    #[test]
    fn display_key_is_lowercase() {
        let addr = NormalizedAddress {
            display: Some("123 Main St, Austin, TX 78701".to_string()),
            ..NormalizedAddress::default()
        };
        assert_eq!(
            addr.display_key().as_deref(),
            Some("123 main st, austin, tx 78701")
        );
    }

    #[test]
    fn maps_rough_tokens_into_raw_input() {
        let rough = RoughAddress {
            number: Some("123".to_string()),
            street: Some("Main".to_string()),
            street_type: Some("St".to_string()),
            sec_unit_num: Some("4".to_string()),
            state: Some("TX".to_string()),
            ..RoughAddress::default()
        };
        let raw = RawAddressInput::from(rough);
        assert_eq!(raw.street_number.as_deref(), Some("123"));
        assert_eq!(raw.street_suffix.as_deref(), Some("St"));
        assert_eq!(raw.unit_number.as_deref(), Some("4"));
        assert_eq!(raw.state_code.as_deref(), Some("TX"));
    }

    #[test]
    fn config_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.default_country_code, "US");
        assert_eq!(config.unit_keywords, vec!["apt", "unit"]);
        assert!(config.reject_po_box);
    }
}
