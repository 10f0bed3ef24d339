//! Configuration type definitions
//!
//! These types describe one spinner: how many reels it has, where each reel
//! starts and stops, and the timing constants of the spin and reveal.

use core::fmt;

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of reels
pub const MAX_SLOTS: usize = 8;

/// Maximum prize label length
pub const MAX_LABEL_LEN: usize = 16;

/// Largest accepted easing exponent
pub const MAX_EASING_EXPONENT: u8 = 8;

/// Largest digit a reel can display
pub const MAX_DIGIT: u8 = 9;

/// Reference reel count
pub const DEFAULT_SLOT_COUNT: usize = 5;

/// Reference seed digits
pub const DEFAULT_SEEDS: [u8; DEFAULT_SLOT_COUNT] = [1, 1, 1, 1, 1];

/// Reference winning digits
pub const DEFAULT_FINALS: [u8; DEFAULT_SLOT_COUNT] = [4, 7, 2, 9, 1];

/// Reference prize label
pub const DEFAULT_PRIZE_LABEL: &str = "1ST PRIZE";

/// Configuration errors
///
/// Returned when a spinner is built from an inconsistent configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No reels configured
    NoSlots,
    /// More reels than `MAX_SLOTS`
    TooManySlots,
    /// Seed and final digit lists differ in length
    SlotCountMismatch { seeds: u8, finals: u8 },
    /// A seed or final digit is not a single decimal digit
    DigitOutOfRange { slot: u8, value: u8 },
    /// Reels must tick at least once
    ZeroBaseTicks,
    /// Tick count of the last reel does not fit in `u16`
    TickOverflow,
    /// Easing exponent above `MAX_EASING_EXPONENT`
    ExponentTooLarge,
    /// Blink period of zero
    ZeroBlinkPeriod,
    /// Prize label longer than `MAX_LABEL_LEN`
    LabelTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoSlots => write!(f, "no reels configured"),
            ConfigError::TooManySlots => write!(f, "more than {} reels", MAX_SLOTS),
            ConfigError::SlotCountMismatch { seeds, finals } => {
                write!(f, "{} seed digits but {} final digits", seeds, finals)
            }
            ConfigError::DigitOutOfRange { slot, value } => {
                write!(f, "reel {} digit {} is out of range", slot, value)
            }
            ConfigError::ZeroBaseTicks => write!(f, "base tick count must be at least 1"),
            ConfigError::TickOverflow => write!(f, "tick count of last reel overflows"),
            ConfigError::ExponentTooLarge => {
                write!(f, "easing exponent above {}", MAX_EASING_EXPONENT)
            }
            ConfigError::ZeroBlinkPeriod => write!(f, "blink period must be non-zero"),
            ConfigError::LabelTooLong => {
                write!(f, "prize label longer than {} characters", MAX_LABEL_LEN)
            }
        }
    }
}

/// Spin and reveal timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Ticks performed by reel 0
    pub base_ticks: u16,
    /// Extra ticks per reel index
    pub tick_increment: u16,
    /// Delay between the fastest ticks (ms)
    pub min_delay_ms: u32,
    /// Delay added at full progress (ms)
    pub delay_range_ms: u32,
    /// Power applied to progress when growing the delay
    pub easing_exponent: u8,
    /// Delay between the last reel stopping and the reveal (ms)
    pub result_delay_ms: u32,
    /// Prize label blink half-period (ms)
    pub blink_period_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_ticks: 20,
            tick_increment: 5,
            min_delay_ms: 40,
            delay_range_ms: 600,
            easing_exponent: 3,
            result_delay_ms: 800,
            blink_period_ms: 500,
        }
    }
}

impl TimingConfig {
    /// Total ticks for the reel at `index`
    ///
    /// Depends only on the index, never on the digits involved.
    pub fn ticks_for_slot(&self, index: usize) -> u16 {
        let extra = (index as u32) * (self.tick_increment as u32);
        (self.base_ticks as u32 + extra).min(u16::MAX as u32) as u16
    }

    /// Tick budget of the last of `slot_count` reels
    ///
    /// `None` if it does not fit in `u16`.
    pub fn last_slot_ticks(&self, slot_count: usize) -> Option<u16> {
        let last = u32::try_from(slot_count.saturating_sub(1)).ok()?;
        let extra = last.checked_mul(self.tick_increment as u32)?;
        u16::try_from(self.base_ticks as u32 + extra).ok()
    }
}

/// Spinner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpinnerConfig {
    /// Digit each reel shows before (and at the start of) a spin
    pub seeds: Vec<u8, MAX_SLOTS>,
    /// Digit each reel locks onto
    pub finals: Vec<u8, MAX_SLOTS>,
    /// Spin and reveal timing
    pub timing: TimingConfig,
    /// Label shown once all reels have stopped
    pub prize_label: String<MAX_LABEL_LEN>,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        let mut prize_label = String::new();
        let _ = prize_label.push_str(DEFAULT_PRIZE_LABEL);

        Self {
            seeds: Vec::from_slice(&DEFAULT_SEEDS).unwrap_or_default(),
            finals: Vec::from_slice(&DEFAULT_FINALS).unwrap_or_default(),
            timing: TimingConfig::default(),
            prize_label,
        }
    }
}

impl SpinnerConfig {
    /// Build a configuration from digit slices
    pub fn from_digits(
        seeds: &[u8],
        finals: &[u8],
        timing: TimingConfig,
    ) -> Result<Self, ConfigError> {
        let seeds = Vec::from_slice(seeds).map_err(|_| ConfigError::TooManySlots)?;
        let finals = Vec::from_slice(finals).map_err(|_| ConfigError::TooManySlots)?;

        let config = Self {
            seeds,
            finals,
            timing,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the prize label
    pub fn set_prize_label(&mut self, label: &str) -> Result<(), ConfigError> {
        let mut new_label = String::new();
        new_label
            .push_str(label)
            .map_err(|_| ConfigError::LabelTooLong)?;
        self.prize_label = new_label;
        Ok(())
    }

    /// Number of reels
    pub fn slot_count(&self) -> usize {
        self.seeds.len()
    }

    /// Check the configuration for setup defects
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seeds.is_empty() {
            return Err(ConfigError::NoSlots);
        }

        if self.seeds.len() != self.finals.len() {
            return Err(ConfigError::SlotCountMismatch {
                seeds: self.seeds.len() as u8,
                finals: self.finals.len() as u8,
            });
        }

        for (slot, (&seed, &fin)) in self.seeds.iter().zip(self.finals.iter()).enumerate() {
            for value in [seed, fin] {
                if value > MAX_DIGIT {
                    return Err(ConfigError::DigitOutOfRange {
                        slot: slot as u8,
                        value,
                    });
                }
            }
        }

        let timing = &self.timing;
        if timing.base_ticks == 0 {
            return Err(ConfigError::ZeroBaseTicks);
        }

        if timing.last_slot_ticks(self.seeds.len()).is_none() {
            return Err(ConfigError::TickOverflow);
        }

        if timing.easing_exponent > MAX_EASING_EXPONENT {
            return Err(ConfigError::ExponentTooLarge);
        }

        if timing.blink_period_ms == 0 {
            return Err(ConfigError::ZeroBlinkPeriod);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SpinnerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.slot_count(), 5);
        assert_eq!(config.finals.as_slice(), &[4, 7, 2, 9, 1]);
        assert_eq!(config.prize_label.as_str(), "1ST PRIZE");
    }

    #[test]
    fn test_ticks_for_slot() {
        let timing = TimingConfig::default();
        assert_eq!(timing.ticks_for_slot(0), 20);
        assert_eq!(timing.ticks_for_slot(1), 25);
        assert_eq!(timing.ticks_for_slot(4), 40);
    }

    #[test]
    fn test_last_slot_ticks() {
        let timing = TimingConfig::default();
        assert_eq!(timing.last_slot_ticks(5), Some(40));
        assert_eq!(timing.last_slot_ticks(1), Some(20));
        assert_eq!(timing.last_slot_ticks(0), Some(20));

        let timing = TimingConfig {
            base_ticks: 65_000,
            tick_increment: 100,
            ..TimingConfig::default()
        };
        // 65_000 + 5 * 100 fits, 65_000 + 6 * 100 does not
        assert_eq!(timing.last_slot_ticks(6), Some(65_500));
        assert_eq!(timing.last_slot_ticks(7), None);
        assert_eq!(timing.last_slot_ticks(usize::MAX), None);
    }

    #[test]
    fn test_mismatched_lengths() {
        let result = SpinnerConfig::from_digits(&[1, 1, 1], &[4, 7], TimingConfig::default());
        assert_eq!(
            result,
            Err(ConfigError::SlotCountMismatch { seeds: 3, finals: 2 })
        );
    }

    #[test]
    fn test_no_slots() {
        let result = SpinnerConfig::from_digits(&[], &[], TimingConfig::default());
        assert_eq!(result, Err(ConfigError::NoSlots));
    }

    #[test]
    fn test_too_many_slots() {
        let digits = [1u8; MAX_SLOTS + 1];
        let result = SpinnerConfig::from_digits(&digits, &digits, TimingConfig::default());
        assert_eq!(result, Err(ConfigError::TooManySlots));
    }

    #[test]
    fn test_digit_out_of_range() {
        let result = SpinnerConfig::from_digits(&[1, 1], &[4, 12], TimingConfig::default());
        assert_eq!(
            result,
            Err(ConfigError::DigitOutOfRange { slot: 1, value: 12 })
        );
    }

    #[test]
    fn test_timing_errors() {
        let mut timing = TimingConfig::default();
        timing.base_ticks = 0;
        assert_eq!(
            SpinnerConfig::from_digits(&[1], &[2], timing),
            Err(ConfigError::ZeroBaseTicks)
        );

        let mut timing = TimingConfig::default();
        timing.base_ticks = u16::MAX;
        timing.tick_increment = 1;
        assert_eq!(
            SpinnerConfig::from_digits(&[1, 1], &[2, 2], timing),
            Err(ConfigError::TickOverflow)
        );

        let mut timing = TimingConfig::default();
        timing.easing_exponent = MAX_EASING_EXPONENT + 1;
        assert_eq!(
            SpinnerConfig::from_digits(&[1], &[2], timing),
            Err(ConfigError::ExponentTooLarge)
        );

        let mut timing = TimingConfig::default();
        timing.blink_period_ms = 0;
        assert_eq!(
            SpinnerConfig::from_digits(&[1], &[2], timing),
            Err(ConfigError::ZeroBlinkPeriod)
        );
    }

    #[test]
    fn test_prize_label() {
        let mut config = SpinnerConfig::default();
        assert!(config.set_prize_label("GRAND PRIZE").is_ok());
        assert_eq!(config.prize_label.as_str(), "GRAND PRIZE");
        assert_eq!(
            config.set_prize_label("THIS LABEL IS FAR TOO LONG"),
            Err(ConfigError::LabelTooLong)
        );
        assert_eq!(config.prize_label.as_str(), "GRAND PRIZE");
    }
}
