/// Millisecond frame clock.
///
/// Ticks come from a monotonic source supplied by the caller, so the clock
/// itself is deterministic under test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    last_tick: u64,
    current_tick: u64,
}

impl FrameClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            last_tick: start_ms,
            current_tick: start_ms,
        }
    }

    /// Move to `now_ms` and return the elapsed seconds since the previous tick.
    pub fn advance(&mut self, now_ms: u64) -> f32 {
        self.last_tick = self.current_tick;
        self.current_tick = now_ms;
        self.delta_seconds()
    }

    /// `(current - last) / 1000` for the most recent advance.
    pub fn delta_seconds(&self) -> f32 {
        self.current_tick.saturating_sub(self.last_tick) as f32 / 1000.0
    }

    /// Start measuring from `now_ms`, discarding any time spent before it.
    pub fn restart(&mut self, now_ms: u64) {
        *self = Self::new(now_ms);
    }
}
