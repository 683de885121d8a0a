use std::collections::VecDeque;

/// Rolling window over the most recent frame deltas, in seconds.
///
/// Fed with [`FrameReport::delta_seconds`](crate::FrameReport) once per
/// rendered frame.
#[derive(Debug, Clone)]
pub struct FrameStats {
    samples: VecDeque<f32>,
    window: usize,
}

impl FrameStats {
    /// Keep the last `window` frames; at least one.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Add one frame. Negative or non-finite deltas count as zero.
    pub fn record(&mut self, dt: f32) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(if dt.is_finite() { dt.max(0.0) } else { 0.0 });
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn average_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32 * 1000.0
    }

    pub fn max_ms(&self) -> f32 {
        self.samples.iter().copied().fold(0.0, f32::max) * 1000.0
    }

    /// Frames per second over the window; zero until time has passed.
    pub fn fps(&self) -> f32 {
        let total: f32 = self.samples.iter().sum();
        if total > 0.0 {
            self.samples.len() as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_sixty_hz() {
        let mut stats = FrameStats::new(120);
        for _ in 0..60 {
            stats.record(1.0 / 60.0);
        }
        assert_eq!(stats.count(), 60);
        assert!((stats.fps() - 60.0).abs() < 1e-2);
        assert!((stats.average_ms() - 16.667).abs() < 1e-2);
    }

    #[test]
    fn hitch_shows_in_max_and_drops_out_of_window() {
        let mut stats = FrameStats::new(4);
        stats.record(0.016);
        stats.record(0.250);
        assert!((stats.max_ms() - 250.0).abs() < 1e-3);

        for _ in 0..4 {
            stats.record(0.016);
        }
        assert_eq!(stats.count(), 4);
        assert!((stats.max_ms() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn first_frame_with_zero_delta() {
        let mut stats = FrameStats::new(8);
        assert_eq!(stats.fps(), 0.0);
        stats.record(0.0);
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.average_ms(), 0.0);
        stats.record(0.020);
        assert!((stats.fps() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn bad_deltas_count_as_zero() {
        let mut stats = FrameStats::new(0);
        stats.record(f32::NAN);
        assert_eq!(stats.count(), 1);
        stats.record(-1.0);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.max_ms(), 0.0);
    }
}
