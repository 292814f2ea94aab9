//! Fixed-timestep driver.
//!
//! Real elapsed time is accumulated into a lag budget; every whole tick in the
//! budget is one simulation step. Rendering may run at any rate in between.

use std::time::Duration;

use termblocks_types::FRAMES_PER_SECOND;

/// One simulation tick at 60 Hz.
pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / FRAMES_PER_SECOND as u64);

/// Lag is capped so a long stall (suspended terminal, debugger) does not
/// replay seconds of ticks in one burst.
pub const MAX_LAG: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    lag: Duration,
    max_lag: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        assert!(!step.is_zero(), "timestep must be positive");
        Self {
            step,
            lag: Duration::ZERO,
            max_lag: MAX_LAG.max(step),
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn lag(&self) -> Duration {
        self.lag
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.lag = (self.lag + elapsed).min(self.max_lag);
    }

    /// Consume one tick from the budget if there is one.
    pub fn next_tick(&mut self) -> bool {
        if self.lag >= self.step {
            self.lag -= self.step;
            true
        } else {
            false
        }
    }

    /// Accumulate `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulate(elapsed);
        let mut ticks = 0;
        while self.next_tick() {
            ticks += 1;
        }
        ticks
    }

    /// Time until the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.lag)
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.lag(), Duration::from_millis(5));
        assert_eq!(clock.advance(Duration::from_millis(5)), 1);
        assert_eq!(clock.lag(), Duration::ZERO);
    }

    #[test]
    fn test_lag_is_capped() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_secs(10)), 25);
    }

    #[test]
    fn test_until_next() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10));
        clock.accumulate(Duration::from_millis(4));
        assert_eq!(clock.until_next(), Duration::from_millis(6));
    }

    #[test]
    fn test_sixty_hz_tick() {
        assert_eq!(TICK.as_nanos(), 16_666_666);
    }
}
