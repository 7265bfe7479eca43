use std::time::{Duration, Instant};

use crate::constants::TIMER_HZ;

/// # Timers
/// The delay and sound timers count down towards 0 at 60Hz regardless of how
/// fast instructions are executed.
///
/// The 60Hz clock is free-running: it is anchored at the first `tick` and
/// advances in whole periods, so ticks stay aligned to wall-clock time
/// whatever the step rate. If several periods have gone by since the last
/// tick they are coalesced into a single decrement.
#[derive(Clone, Debug)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    period: Duration,
    last_tick: Option<Instant>,
}

impl Timers {
    pub fn new() -> Self {
        Timers {
            delay: 0,
            sound: 0,
            period: Duration::from_secs(1) / TIMER_HZ,
            last_tick: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Decrements both timers if a 60Hz period has elapsed by `now`.
    ///
    /// Returns true exactly when the sound timer went from 1 to 0.
    pub fn tick(&mut self, now: Instant) -> bool {
        let last_tick = match self.last_tick {
            Some(last_tick) => last_tick,
            None => {
                self.last_tick = Some(now);
                return false;
            }
        };

        let elapsed = now.saturating_duration_since(last_tick);
        let periods = elapsed.as_nanos() / self.period.as_nanos();
        if periods == 0 {
            return false;
        }
        self.last_tick = Some(last_tick + self.period * periods as u32);

        self.delay = self.delay.saturating_sub(1);
        let beep = self.sound == 1;
        self.sound = self.sound.saturating_sub(1);
        beep
    }

    /// Re-anchor the 60Hz clock at the next `tick`
    pub fn restart(&mut self) {
        self.last_tick = None;
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_timers {
    use super::*;
    use proptest::prelude::*;

    /// Steps `timers` every `step` until the delay timer hits 0 and returns
    /// how long that took
    fn time_to_zero(start: u8, step: Duration) -> Duration {
        let mut timers = Timers::new();
        timers.delay = start;
        let origin = Instant::now();
        let mut now = origin;
        timers.tick(now);
        while timers.delay > 0 {
            now += step;
            timers.tick(now);
        }
        now - origin
    }

    #[test]
    fn test_first_tick_only_anchors() {
        let mut timers = Timers::new();
        timers.delay = 5;
        timers.tick(Instant::now());
        assert_eq!(timers.delay, 5);
    }

    #[test]
    fn test_decrements_after_a_period() {
        let mut timers = Timers::new();
        timers.delay = 5;
        timers.sound = 5;
        let start = Instant::now();
        timers.tick(start);
        timers.tick(start + timers.period() / 2);
        assert_eq!(timers.delay, 5);
        timers.tick(start + timers.period());
        assert_eq!(timers.delay, 4);
        assert_eq!(timers.sound, 4);
    }

    #[test]
    fn test_multiple_periods_coalesce() {
        let mut timers = Timers::new();
        timers.delay = 10;
        let start = Instant::now();
        timers.tick(start);
        timers.tick(start + timers.period() * 5);
        assert_eq!(timers.delay, 9);
    }

    #[test]
    fn test_never_goes_below_zero() {
        let mut timers = Timers::new();
        let start = Instant::now();
        timers.tick(start);
        timers.tick(start + timers.period());
        assert_eq!(timers.delay, 0);
        assert_eq!(timers.sound, 0);
    }

    #[test]
    fn test_beeps_when_sound_reaches_zero() {
        let mut timers = Timers::new();
        timers.sound = 2;
        let start = Instant::now();
        let period = timers.period();
        assert!(!timers.tick(start));
        assert!(!timers.tick(start + period));
        assert!(timers.tick(start + period * 2));
        assert!(!timers.tick(start + period * 3));
        assert_eq!(timers.sound, 0);
    }

    #[test]
    fn test_restart_reanchors() {
        let mut timers = Timers::new();
        timers.delay = 3;
        let start = Instant::now();
        timers.tick(start);
        timers.restart();
        timers.tick(start + timers.period() * 4);
        assert_eq!(timers.delay, 3);
    }

    proptest! {
        #[test]
        fn test_decay_is_rate_invariant(start in 1u8..=255, steps_per_second in 60u64..5000) {
            let period = Timers::new().period();
            let step = Duration::from_nanos(1_000_000_000 / steps_per_second);
            let elapsed = time_to_zero(start, step);
            let expected = period * u32::from(start);
            prop_assert!(elapsed >= expected);
            prop_assert!(elapsed <= expected + period);
        }
    }
}
