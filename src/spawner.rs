use std::time::Duration;

/// Elapsed-time accumulator deciding when the next pipe is due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipeSpawner {
    interval: Duration,
    elapsed: Duration,
}

impl PipeSpawner {
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "spawn interval must be non-zero");

        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the clock by `dt` and returns how many spawns fell due.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;

        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }

        due
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
