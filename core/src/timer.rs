use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_nanos(1);

/// # Timers
/// The delay and sound timers count down towards 0 at 60Hz.
/// While the sound timer is above 0 a tone should be playing.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers by one, stopping at 0
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

/// # Clock
/// Converts elapsed wall-clock time into a whole number of ticks at a fixed rate.
///
/// Time that doesn't add up to a whole tick is carried over to the next call, so the
/// long-run tick rate matches `hz` however unevenly time is fed in. Rates above 1GHz
/// are held to a 1ns period.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Clock {
    period: Duration,
    accumulated: Duration,
}

impl Clock {
    pub fn new(hz: u32) -> Self {
        Clock {
            period: (Duration::from_secs(1) / hz.max(1)).max(MIN_PERIOD),
            accumulated: Duration::from_secs(0),
        }
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulated += elapsed;
    }

    /// Time left until the next tick is owed; zero if one already is
    pub fn until_tick(&self) -> Duration {
        self.period
            .checked_sub(self.accumulated)
            .unwrap_or_else(|| Duration::from_secs(0))
    }

    /// Consumes one owed tick, if any
    pub fn take_tick(&mut self) -> bool {
        if self.accumulated >= self.period {
            self.accumulated -= self.period;
            true
        } else {
            false
        }
    }
}
