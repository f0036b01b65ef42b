#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the address normalizer.

use std::io::Read as _;
use std::path::PathBuf;

use address_normalizer::{
    NormalizedAddress, Normalizer, NormalizerConfig, RawAddressInput, load_config,
    unit::find_unit_number,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "address_normalizer", about = "Postal address normalization tool")]
struct Cli {
    /// Path to a TOML normalizer config. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize structured address records
    Normalize {
        /// A JSON address object or array of objects. Read from stdin
        /// when omitted.
        #[arg(long)]
        json: Option<String>,
        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Parse and normalize a free-text address
    Parse {
        /// One-line address (e.g., "123 N Main St Apt 4, Austin, TX 78701")
        text: String,
    },
    /// Extract the unit number from a street string
    Unit {
        /// Street text (e.g., "123 Main St Apt 4A")
        street: String,
    },
}

/// Accepts either a single JSON object or an array of them.
fn read_inputs(json: &str) -> Result<Vec<RawAddressInput>, serde_json::Error> {
    if json.trim_start().starts_with('[') {
        serde_json::from_str(json)
    } else {
        serde_json::from_str(json).map(|input| vec![input])
    }
}

fn to_json(addresses: &[NormalizedAddress], compact: bool) -> Result<String, serde_json::Error> {
    match (addresses, compact) {
        ([single], true) => serde_json::to_string(single),
        ([single], false) => serde_json::to_string_pretty(single),
        (_, true) => serde_json::to_string(addresses),
        (_, false) => serde_json::to_string_pretty(addresses),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => NormalizerConfig::default(),
    };
    let normalizer = Normalizer::new(config);

    match cli.command {
        Commands::Normalize { json, compact } => {
            let json = if let Some(json) = json {
                json
            } else {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            };

            let inputs = read_inputs(&json)?;
            log::info!("Normalizing {} address(es)", inputs.len());

            let normalized: Vec<NormalizedAddress> =
                inputs.iter().map(|input| normalizer.normalize(input)).collect();
            println!("{}", to_json(&normalized, compact)?);
        }
        Commands::Parse { text } => {
            let address = normalizer.parse(&text);
            if address.is_none() {
                log::warn!("Could not parse address '{text}'");
            }
            println!("{}", serde_json::to_string_pretty(&address)?);
        }
        Commands::Unit { street } => {
            match find_unit_number(&street, &normalizer.config().unit_keywords) {
                Some(found) => println!("{}", found.unit),
                None => log::info!("No unit number found in '{street}'"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_single_object() {
        let inputs = read_inputs(r#"{"streetName": "123 Main St", "city": "Austin"}"#).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].street_name.as_deref(), Some("123 Main St"));
    }

    #[test]
    fn reads_array() {
        let inputs = read_inputs(r#" [{"city": "Austin"}, {"zip": "78701"}]"#).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].zip.as_deref(), Some("78701"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(read_inputs("{not json").is_err());
    }

    #[test]
    fn single_result_is_not_wrapped() {
        let normalized = vec![NormalizedAddress::default()];
        assert!(to_json(&normalized, true).unwrap().starts_with('{'));
        let two = vec![NormalizedAddress::default(), NormalizedAddress::default()];
        assert!(to_json(&two, true).unwrap().starts_with('['));
    }

    #[test]
    fn parses_cli_arguments() {
        let cli = Cli::try_parse_from(["address_normalizer", "unit", "123 Main St Apt 4", "--config", "x.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Unit { street } if street == "123 Main St Apt 4"));
    }
}
