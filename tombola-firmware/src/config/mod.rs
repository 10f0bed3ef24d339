//! Configuration loading and parsing
//!
//! The spinner configuration is embedded from tombola.toml at build time
//! and parsed at boot by a custom no_std parser.

pub mod toml;

use defmt::*;
use tombola_core::config::SpinnerConfig;

pub use toml::{parse_config, ParseError};

/// Parse the embedded configuration, falling back to the built-in defaults
///
/// build.rs rejects most broken files, so the fallback only triggers when
/// the host check and the firmware parser disagree.
pub fn load_config(input: &str) -> SpinnerConfig {
    match parse_config(input) {
        Ok(config) => {
            info!(
                "Parsed embedded configuration: {} reels, label {}",
                config.slot_count(),
                config.prize_label.as_str()
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            SpinnerConfig::default()
        }
    }
}
