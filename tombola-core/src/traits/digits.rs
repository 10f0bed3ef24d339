//! Digit source for spinning reels
//!
//! The digits shown while a reel spins are cosmetic. Any generator works;
//! tests substitute a scripted source to make runs deterministic.

use rand_core::RngCore;

/// Smallest digit shown while spinning
pub const SPIN_DIGIT_MIN: u8 = 1;

/// Largest digit shown while spinning
pub const SPIN_DIGIT_MAX: u8 = 9;

/// Source of spinning digits
pub trait DigitSource {
    /// Next digit, uniform in `SPIN_DIGIT_MIN..=SPIN_DIGIT_MAX`
    ///
    /// Zero is never produced while spinning.
    fn next_digit(&mut self) -> u8;
}

impl<T: DigitSource + ?Sized> DigitSource for &mut T {
    fn next_digit(&mut self) -> u8 {
        (**self).next_digit()
    }
}

/// Adapts any `rand_core` generator into a digit source
pub struct RngDigits<R>(pub R);

impl<R: RngCore> DigitSource for RngDigits<R> {
    fn next_digit(&mut self) -> u8 {
        let span = (SPIN_DIGIT_MAX - SPIN_DIGIT_MIN + 1) as u32;
        SPIN_DIGIT_MIN + (self.0.next_u32() % span) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counter standing in for a hardware generator
    struct StepRng(u32);

    impl RngCore for StepRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.0;
            self.0 = self.0.wrapping_add(1);
            value
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.next_u32() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_digits_cover_one_to_nine() {
        let mut rng = RngDigits(StepRng(0));
        let mut seen = [false; 10];

        for _ in 0..90 {
            let digit = rng.next_digit();
            assert!((SPIN_DIGIT_MIN..=SPIN_DIGIT_MAX).contains(&digit));
            seen[digit as usize] = true;
        }

        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_large_values_stay_in_range() {
        let mut rng = RngDigits(StepRng(u32::MAX - 4));
        for _ in 0..10 {
            let digit = rng.next_digit();
            assert!((1..=9).contains(&digit));
        }
    }
}
