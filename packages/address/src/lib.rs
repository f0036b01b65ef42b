#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Postal address normalization.
//!
//! Address records arrive from many sources with inconsistent casing,
//! stray punctuation, directions and units folded into the street name,
//! and suffixes spelled every possible way. This crate turns them into a
//! canonical [`NormalizedAddress`] so that two spellings of the same
//! place compare equal.
//!
//! # Pipeline
//!
//! 1. Sanitize and case-normalize every text field
//! 2. Resolve the directional prefix
//! 3. Split the house number off the street name
//! 4. Find the unit number (keyword first, then a heuristic)
//! 5. Infer or strip the street suffix and map it to its USPS form
//! 6. Decide between a street address and a coordinate-only record
//! 7. Build the display strings
//!
//! Normalizing a normalized address returns it unchanged.
//!
//! # Usage
//!
//! ```rust
//! use address_normalizer::{RawAddressInput, normalize_address};
//!
//! let address = normalize_address(&RawAddressInput {
//!     street_name: Some("123 n main street apt 4".to_string()),
//!     city: Some("austin".to_string()),
//!     state_code: Some("tx".to_string()),
//!     ..RawAddressInput::default()
//! });
//! assert_eq!(address.display.as_deref(), Some("123 N Main St 4, Austin, TX"));
//! ```

pub mod config;
pub mod display;
pub mod number;
pub mod orientation;
pub mod parser;
pub mod pipeline;
pub mod sanitize;
pub mod suffix;
pub mod unit;

pub use address_normalizer_models::{
    AddressKey, AddressType, NormalizedAddress, NormalizerConfig, Orientation, RawAddressInput,
    RoughAddress,
};
pub use config::{config_from_toml_str, load_config};
pub use display::{geocoder_query, needs_geocoding};
pub use number::{extract_street_number, extract_zip_code};
pub use orientation::orientation_from_token;
pub use parser::{AddressTokenizer, UsAddressTokenizer, is_po_box, parse_address_string};
pub use pipeline::{Normalizer, normalize_address};
pub use suffix::{canonical_suffix, is_canonical_suffix};
pub use unit::{extract_unit_number, normalize_unit_number};

/// Errors from loading normalizer configuration.
///
/// Normalization itself never fails; unusable input produces empty
/// fields instead.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// Malformed TOML configuration.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
