//! Deceleration curve
//!
//! Maps a reel's progress to the delay before its next tick. Early ticks
//! come at `min_delay_ms`; the delay grows with `progress^easing_exponent`
//! up to `min_delay_ms + delay_range_ms`.

use super::executor::Millis;
use crate::config::TimingConfig;

/// Delay before the next tick of a reel
///
/// `ticks_elapsed` is the number of ticks already applied, `ticks_total`
/// the reel's tick budget. Computes `range * elapsed^e / total^e` exactly
/// in integers with a single final truncation, so the curve is identical on
/// every target.
pub fn tick_delay(timing: &TimingConfig, ticks_elapsed: u16, ticks_total: u16) -> Millis {
    let total = ticks_total.max(1) as u64;
    let done = (ticks_elapsed as u64).min(total);
    let range = timing.delay_range_ms as u64;

    let scaled = exact_scale(range, done, total, timing.easing_exponent)
        .unwrap_or_else(|| stepwise_scale(range, done, total, timing.easing_exponent));

    timing.min_delay_ms as Millis + scaled
}

/// `range * done^exp / total^exp`, `None` if the numerator overflows `u128`
fn exact_scale(range: u64, done: u64, total: u64, exp: u8) -> Option<u64> {
    let mut numerator = range as u128;
    let mut denominator = 1u128;
    for _ in 0..exp {
        numerator = numerator.checked_mul(done as u128)?;
        denominator = denominator.checked_mul(total as u128)?;
    }

    // done <= total, so the quotient never exceeds range
    Some((numerator / denominator) as u64)
}

/// Same curve, truncating after every power step
fn stepwise_scale(range: u64, done: u64, total: u64, exp: u8) -> u64 {
    let mut scaled = range;
    for _ in 0..exp {
        scaled = scaled * done / total;
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_reference_curve() {
        let timing = TimingConfig::default();

        // Half way: 40 + 0.125 * 600
        assert_eq!(tick_delay(&timing, 10, 20), 115);
        // Full progress: 40 + 600
        assert_eq!(tick_delay(&timing, 20, 20), 640);
        // First tick barely moves the curve
        assert_eq!(tick_delay(&timing, 1, 20), 40);
    }

    #[test]
    fn test_delay_grows_with_progress() {
        let timing = TimingConfig::default();
        let mut last = 0;
        for done in 1..=40 {
            let delay = tick_delay(&timing, done, 40);
            assert!(delay >= last);
            assert!(delay >= timing.min_delay_ms as Millis);
            assert!(delay <= (timing.min_delay_ms + timing.delay_range_ms) as Millis);
            last = delay;
        }
    }

    #[test]
    fn test_linear_and_flat_exponents() {
        let mut timing = TimingConfig::default();

        timing.easing_exponent = 1;
        assert_eq!(tick_delay(&timing, 5, 20), 40 + 150);

        timing.easing_exponent = 0;
        assert_eq!(tick_delay(&timing, 1, 20), 640);
    }

    #[test]
    fn test_single_truncation() {
        let timing = TimingConfig::default();

        // 600 * 27 / 8000 = 2.025; truncating per step would give 1
        assert_eq!(tick_delay(&timing, 3, 20), 42);
        // 600 * 343 / 8000 = 25.725
        assert_eq!(tick_delay(&timing, 7, 20), 65);
    }

    #[test]
    fn test_overflow_falls_back_to_stepwise() {
        let timing = TimingConfig {
            delay_range_ms: u32::MAX,
            easing_exponent: 8,
            ..TimingConfig::default()
        };

        assert_eq!(exact_scale(u32::MAX as u64, 65_000, 65_535, 8), None);

        let delay = tick_delay(&timing, 65_000, 65_535);
        let expected = stepwise_scale(u32::MAX as u64, 65_000, 65_535, 8);
        assert_eq!(delay, 40 + expected);
        assert!(delay <= 40 + u32::MAX as Millis);

        // Full progress stays exact on the fallback path
        assert_eq!(tick_delay(&timing, 65_535, 65_535), 40 + u32::MAX as Millis);
    }

    #[test]
    fn test_zero_total_does_not_divide_by_zero() {
        let timing = TimingConfig::default();
        assert_eq!(tick_delay(&timing, 0, 0), 40);
    }
}
