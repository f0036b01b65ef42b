//! Loading [`NormalizerConfig`] from TOML.
//!
//! Every key is optional; anything left out falls back to the defaults
//! (`US`, `["apt", "unit"]`, PO Boxes rejected).
//!
//! ```toml
//! default_country_code = "CA"
//! unit_keywords = ["apt", "unit", "ste"]
//! reject_po_box = false
//! ```

use std::path::Path;

use address_normalizer_models::NormalizerConfig;

use crate::AddressError;

/// Parses a configuration from a TOML string.
///
/// # Errors
///
/// * If the TOML is malformed or a key has the wrong type
pub fn config_from_toml_str(toml_str: &str) -> Result<NormalizerConfig, AddressError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Reads and parses a TOML configuration file.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the TOML is malformed or a key has the wrong type
pub fn load_config(path: impl AsRef<Path>) -> Result<NormalizerConfig, AddressError> {
    let path = path.as_ref();
    log::debug!("Loading normalizer config from {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    config_from_toml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(config_from_toml_str("").unwrap(), NormalizerConfig::default());
    }

    #[test]
    fn overrides_individual_keys() {
        let config = config_from_toml_str(
            r#"
default_country_code = "CA"
unit_keywords = ["ste"]
"#,
        )
        .unwrap();
        assert_eq!(config.default_country_code, "CA");
        assert_eq!(config.unit_keywords, vec!["ste".to_string()]);
        assert!(config.reject_po_box);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = config_from_toml_str("reject_po_box = \"nope\"").unwrap_err();
        assert!(matches!(err, AddressError::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config("/nonexistent/normalizer.toml").unwrap_err();
        assert!(matches!(err, AddressError::Io(_)));
    }

    #[test]
    fn loads_file_from_disk() {
        let path = std::env::temp_dir().join("address_normalizer_config_test.toml");
        std::fs::write(&path, "reject_po_box = false\n").unwrap();
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.reject_po_box);
        assert_eq!(config.default_country_code, "US");
    }
}
