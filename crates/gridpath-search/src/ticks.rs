//! Tick sources: what a [`SearchRun`](crate::SearchRun) waits on between
//! ticks.

use std::time::Duration;

/// Something that can wait out the delay between two ticks.
pub trait TickSource {
    /// Block (or pretend to) for `delay`.
    fn wait(&mut self, delay: Duration);
}

/// Real wall-clock ticks using [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepTicks;

impl TickSource for SleepTicks {
    fn wait(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// A test clock: records every requested delay and returns immediately.
#[derive(Debug, Default, Clone)]
pub struct ManualTicks {
    waits: Vec<Duration>,
}

impl ManualTicks {
    /// Create a clock with no recorded waits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delay requested so far, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    /// Sum of all requested delays.
    pub fn elapsed(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl TickSource for ManualTicks {
    fn wait(&mut self, delay: Duration) {
        self.waits.push(delay);
    }
}
