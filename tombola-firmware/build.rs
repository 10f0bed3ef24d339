//! Build script for tombola-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates tombola.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tombola_core::config::{
    TimingConfig, DEFAULT_SLOT_COUNT, MAX_EASING_EXPONENT, MAX_LABEL_LEN, MAX_SLOTS,
};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate tombola.toml configuration at compile time
fn validate_config() {
    // Re-run if tombola.toml changes
    println!("cargo:rerun-if-changed=tombola.toml");

    let config_path = Path::new("tombola.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: tombola.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a tombola.toml configuration file.        ║\n\
            ║  Please create one in the tombola-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read tombola.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in tombola.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    let reels = validate_spinner(&config, &mut errors);
    validate_timing(&config, reels, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in tombola.toml                    ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=tombola.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [spinner] and [timing] are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match (name.as_str(), value) {
            ("spinner" | "timing", toml::Value::Table(_)) => {}
            ("spinner" | "timing", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown top-level entry '{}'", name)),
        }
    }
}

/// Read a digit array, collecting errors
fn digit_array(table: &toml::Table, key: &str, errors: &mut Vec<String>) -> Option<usize> {
    let value = table.get(key)?;
    let Some(items) = value.as_array() else {
        errors.push(format!("[spinner] {} must be an array", key));
        return None;
    };

    for (i, item) in items.iter().enumerate() {
        match item.as_integer() {
            Some(digit) if (0..=9).contains(&digit) => {}
            _ => errors.push(format!("[spinner] {}[{}] must be a digit 0-9", key, i)),
        }
    }

    Some(items.len())
}

/// Validate reel digits and the prize label, returning the reel count
fn validate_spinner(config: &toml::Value, errors: &mut Vec<String>) -> usize {
    let Some(spinner) = config.get("spinner").and_then(|s| s.as_table()) else {
        return DEFAULT_SLOT_COUNT;
    };

    for key in spinner.keys() {
        if !["seeds", "finals", "prize_label"].contains(&key.as_str()) {
            errors.push(format!("[spinner] unknown key '{}'", key));
        }
    }

    let seeds = digit_array(spinner, "seeds", errors).unwrap_or(DEFAULT_SLOT_COUNT);
    let finals = digit_array(spinner, "finals", errors).unwrap_or(DEFAULT_SLOT_COUNT);

    if seeds != finals {
        errors.push(format!(
            "[spinner] {} seeds but {} finals, lengths must match",
            seeds, finals
        ));
    }
    if seeds == 0 {
        errors.push("[spinner] at least one reel is required".to_string());
    }
    if seeds > MAX_SLOTS || finals > MAX_SLOTS {
        errors.push(format!("[spinner] at most {} reels are supported", MAX_SLOTS));
    }

    match spinner.get("prize_label") {
        Some(toml::Value::String(label)) if label.len() > MAX_LABEL_LEN => {
            errors.push(format!(
                "[spinner] prize_label longer than {} characters",
                MAX_LABEL_LEN
            ));
        }
        Some(toml::Value::String(_)) | None => {}
        Some(_) => errors.push("[spinner] prize_label must be a string".to_string()),
    }

    seeds.max(finals)
}

/// Validate timing values against the types the firmware stores them in
fn validate_timing(config: &toml::Value, reels: usize, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };

    let limits: [(&str, i64, i64); 7] = [
        ("base_ticks", 1, u16::MAX as i64),
        ("tick_increment", 0, u16::MAX as i64),
        ("min_delay_ms", 0, u32::MAX as i64),
        ("delay_range_ms", 0, u32::MAX as i64),
        ("easing_exponent", 0, MAX_EASING_EXPONENT as i64),
        ("result_delay_ms", 0, u32::MAX as i64),
        ("blink_period_ms", 1, u32::MAX as i64),
    ];

    for key in timing.keys() {
        if !limits.iter().any(|(name, _, _)| *name == key.as_str()) {
            errors.push(format!("[timing] unknown key '{}'", key));
        }
    }

    for (key, min, max) in limits {
        match timing.get(key) {
            Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
            Some(toml::Value::Integer(_)) => {
                errors.push(format!("[timing] {} must be {}-{}", key, min, max));
            }
            Some(_) => errors.push(format!("[timing] {} must be an integer", key)),
            None => {}
        }
    }

    // The last reel's tick budget must fit the firmware's u16 counter
    let defaults = TimingConfig::default();
    let ticks = |key: &str, default: u16| {
        timing
            .get(key)
            .and_then(|v| v.as_integer())
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(default)
    };
    let reel_timing = TimingConfig {
        base_ticks: ticks("base_ticks", defaults.base_ticks),
        tick_increment: ticks("tick_increment", defaults.tick_increment),
        ..defaults
    };
    if reel_timing.last_slot_ticks(reels).is_none() {
        errors.push(format!(
            "[timing] base_ticks + {} * tick_increment exceeds {}",
            reels.saturating_sub(1),
            u16::MAX
        ));
    }
}
