//! Property tests for the spin cycle over random configurations

use proptest::prelude::*;

use tombola_core::config::{SpinnerConfig, TimingConfig, MAX_EASING_EXPONENT, MAX_SLOTS};
use tombola_core::scheduler::{Millis, SpinScheduler};
use tombola_core::state::Event;
use tombola_core::traits::DigitSource;

/// Replays a digit script in a loop
#[derive(Debug, Clone)]
struct Script {
    digits: Vec<u8>,
    pos: usize,
}

impl DigitSource for Script {
    fn next_digit(&mut self) -> u8 {
        let digit = self.digits[self.pos % self.digits.len()];
        self.pos += 1;
        digit
    }
}

fn timing_strategy() -> impl Strategy<Value = TimingConfig> {
    (
        1u16..=30,
        0u16..=10,
        0u32..=100,
        0u32..=1_000,
        0u8..=MAX_EASING_EXPONENT,
        0u32..=2_000,
    )
        .prop_map(
            |(base_ticks, tick_increment, min_delay_ms, delay_range_ms, easing_exponent, result_delay_ms)| {
                TimingConfig {
                    base_ticks,
                    tick_increment,
                    min_delay_ms,
                    delay_range_ms,
                    easing_exponent,
                    result_delay_ms,
                    ..TimingConfig::default()
                }
            },
        )
}

fn config_strategy() -> impl Strategy<Value = SpinnerConfig> {
    (1usize..=MAX_SLOTS, timing_strategy()).prop_flat_map(|(n, timing)| {
        (
            prop::collection::vec(0u8..=9, n),
            prop::collection::vec(0u8..=9, n),
        )
            .prop_map(move |(seeds, finals)| {
                SpinnerConfig::from_digits(&seeds, &finals, timing).unwrap()
            })
    })
}

fn script_strategy() -> impl Strategy<Value = Script> {
    prop::collection::vec(1u8..=9, 1..16).prop_map(|digits| Script { digits, pos: 0 })
}

/// Run one cycle from t=0, delivering each timer at its deadline
fn run_cycle(sched: &mut SpinScheduler, digits: &mut Script) -> Vec<(Millis, Event)> {
    let mut log = Vec::new();
    sched.start(0);
    while let Some(deadline) = sched.next_deadline() {
        for event in sched.advance(deadline, digits) {
            log.push((deadline, event));
        }
    }
    log
}

proptest! {
    /// Every reel stops after exactly its tick budget, on its final digit
    #[test]
    fn prop_slots_terminate_after_budget(config in config_strategy(), digits in script_strategy()) {
        let timing = config.timing;
        let mut digits = digits;
        let mut sched = SpinScheduler::new(config).unwrap();
        run_cycle(&mut sched, &mut digits);

        for (i, slot) in sched.slots().iter().enumerate() {
            let expected = timing.base_ticks + i as u16 * timing.tick_increment;
            prop_assert_eq!(slot.ticks_elapsed, expected);
            prop_assert!(slot.stopped);
            prop_assert_eq!(slot.current_value, slot.final_value);
        }
    }

    /// Reels further right never stop earlier
    #[test]
    fn prop_stop_times_follow_index(config in config_strategy(), digits in script_strategy()) {
        let n = config.slot_count();
        let mut digits = digits;
        let mut sched = SpinScheduler::new(config).unwrap();
        let log = run_cycle(&mut sched, &mut digits);

        let mut stop_times = vec![None; n];
        for (t, event) in &log {
            if let Event::SlotStopped { slot, .. } = event {
                prop_assert!(stop_times[*slot as usize].is_none());
                stop_times[*slot as usize] = Some(*t);
            }
        }

        let stop_times: Vec<Millis> = stop_times.into_iter().map(Option::unwrap).collect();
        for pair in stop_times.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    /// All-stopped fires once, right after the last reel stops
    #[test]
    fn prop_all_stopped_exactly_once(config in config_strategy(), digits in script_strategy()) {
        let n = config.slot_count();
        let mut digits = digits;
        let mut sched = SpinScheduler::new(config).unwrap();
        let log = run_cycle(&mut sched, &mut digits);

        let positions: Vec<usize> = log
            .iter()
            .enumerate()
            .filter(|(_, (_, e))| *e == Event::AllStopped)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(positions.len(), 1);

        let stops_before = log[..positions[0]]
            .iter()
            .filter(|(_, e)| matches!(e, Event::SlotStopped { .. }))
            .count();
        prop_assert_eq!(stops_before, n);
        prop_assert_eq!(sched.stopped_count(), n);
    }

    /// The reveal trails all-stopped by the result delay and fires once
    #[test]
    fn prop_reveal_after_result_delay(
        config in config_strategy(),
        digits in script_strategy(),
        step in 20u64..=500,
    ) {
        let result_delay = config.timing.result_delay_ms as Millis;
        let mut digits = digits;
        let mut sched = SpinScheduler::new(config).unwrap();
        sched.start(0);

        // Coarse, late deliveries instead of exact deadlines
        let mut now = 0;
        let mut stopped_at = None;
        let mut revealed_at = None;
        while sched.next_deadline().is_some() {
            for event in sched.advance(now, &mut digits) {
                match event {
                    Event::AllStopped => stopped_at = Some(now),
                    Event::Revealed => {
                        prop_assert!(revealed_at.is_none());
                        prop_assert!(!sched.is_spinning());
                        revealed_at = Some(now);
                    }
                    _ => {}
                }
            }
            if sched.is_spinning() {
                prop_assert!(!sched.show_result());
            }
            now += step;
        }

        let stopped_at = stopped_at.unwrap();
        let revealed_at = revealed_at.unwrap();
        prop_assert!(revealed_at >= stopped_at + result_delay);
        prop_assert!(sched.show_result());
    }

    /// Spinning digits stay inside 1..=9 for any RNG output
    #[test]
    fn prop_rng_digits_in_range(words in prop::collection::vec(any::<u32>(), 1..64)) {
        use tombola_core::traits::RngDigits;

        struct Words(Vec<u32>, usize);

        impl rand_core::RngCore for Words {
            fn next_u32(&mut self) -> u32 {
                let word = self.0[self.1 % self.0.len()];
                self.1 += 1;
                word
            }
            fn next_u64(&mut self) -> u64 {
                self.next_u32() as u64
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }

        let count = words.len();
        let mut digits = RngDigits(Words(words, 0));
        for _ in 0..count {
            let digit = digits.next_digit();
            prop_assert!((1..=9).contains(&digit));
        }
    }
}
