/// Timing of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Host timestamp of this frame (ms, monotonic).
    pub now_ms: f64,
    /// Wall time since the previous frame.
    pub elapsed_ms: f32,
    /// Elapsed time relative to the 60fps baseline, capped.
    pub delta: f32,
    /// Uncapped elapsed seconds, used for phase timers.
    pub seconds: f32,
}

/// Converts host frame timestamps into normalized deltas.
///
/// Force coefficients are tuned per 60fps frame, so each step scales them
/// by `delta`. The cap keeps a long stall (background tab) from turning
/// into one enormous step.
pub struct FrameClock {
    previous_ms: Option<f64>,
    baseline_ms: f32,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(baseline_ms: f32, max_delta: f32) -> Self {
        Self {
            previous_ms: None,
            baseline_ms,
            max_delta,
        }
    }

    /// Advance to `now_ms`. The first call reports zero elapsed time.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let elapsed_ms = match self.previous_ms {
            Some(prev) => (now_ms - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.previous_ms = Some(now_ms);
        FrameTime {
            now_ms,
            elapsed_ms,
            delta: (elapsed_ms / self.baseline_ms).min(self.max_delta),
            seconds: elapsed_ms / 1000.0,
        }
    }

    /// Timestamp of the last frame, if any.
    #[cfg(test)]
    pub fn last(&self) -> Option<f64> {
        self.previous_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new(16.666, 2.2);
        let t = clock.tick(1000.0);
        assert_eq!(t.elapsed_ms, 0.0);
        assert_eq!(t.delta, 0.0);
    }

    #[test]
    fn one_baseline_frame_is_unit_delta() {
        let mut clock = FrameClock::new(16.666, 2.2);
        clock.tick(0.0);
        let t = clock.tick(16.666);
        assert!((t.delta - 1.0).abs() < 1e-4);
        assert!((t.seconds - 0.016666).abs() < 1e-6);
    }

    #[test]
    fn stall_is_capped() {
        let mut clock = FrameClock::new(16.666, 2.2);
        clock.tick(0.0);
        let t = clock.tick(5000.0);
        assert_eq!(t.delta, 2.2);
        assert_eq!(t.seconds, 5.0, "phase timers see the real elapsed time");
    }

    #[test]
    fn backwards_timestamp_is_clamped() {
        let mut clock = FrameClock::new(16.666, 2.2);
        clock.tick(100.0);
        let t = clock.tick(50.0);
        assert_eq!(t.elapsed_ms, 0.0);
        assert_eq!(clock.last(), Some(50.0));
    }
}
