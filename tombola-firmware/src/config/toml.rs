//! Simple TOML parser for spinner configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! Tombola configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Single-line integer arrays: finals = [4, 7, 2, 9, 1]
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Inline tables
//! - Dotted keys

use heapless::Vec;

use tombola_core::config::{ConfigError, SpinnerConfig, TimingConfig, MAX_SLOTS};

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Parsed values rejected by validation
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Spinner,
    Timing,
}

/// Parse TOML configuration into SpinnerConfig
///
/// Keys missing from the file keep their reference defaults. The result is
/// validated before it is returned.
pub fn parse_config(input: &str) -> Result<SpinnerConfig, ParseError> {
    let mut config = SpinnerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        // Parse key = value
        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "spinner" or "timing"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "spinner" => Ok(Section::Spinner),
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a digit array like "[4, 7, 2, 9, 1]"
fn parse_digits(value: &str) -> Result<Vec<u8, MAX_SLOTS>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut digits = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        digits
            .push(parse_int(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }

    Ok(digits)
}

/// Apply a key-value pair to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut SpinnerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Spinner => apply_spinner_value(key, value, config),
        Section::Timing => apply_timing_value(key, value, &mut config.timing),
        Section::Root => Err(ParseError::UnknownKey),
    }
}

fn apply_spinner_value(
    key: &str,
    value: &str,
    config: &mut SpinnerConfig,
) -> Result<(), ParseError> {
    match key {
        "seeds" => config.seeds = parse_digits(value)?,
        "finals" => config.finals = parse_digits(value)?,
        "prize_label" => config.set_prize_label(parse_string(value)?)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_timing_value(
    key: &str,
    value: &str,
    timing: &mut TimingConfig,
) -> Result<(), ParseError> {
    match key {
        "base_ticks" => timing.base_ticks = parse_int(value)?,
        "tick_increment" => timing.tick_increment = parse_int(value)?,
        "min_delay_ms" => timing.min_delay_ms = parse_int(value)?,
        "delay_range_ms" => timing.delay_range_ms = parse_int(value)?,
        "easing_exponent" => timing.easing_exponent = parse_int(value)?,
        "result_delay_ms" => timing.result_delay_ms = parse_int(value)?,
        "blink_period_ms" => timing.blink_period_ms = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
