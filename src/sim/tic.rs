use std::time::{Duration, Instant};

/// Longest step handed to the simulation, in seconds.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Monotonic frame timer.
///
/// Movement is integrated with the real elapsed time, capped so that a
/// stall (window drag, breakpoint) cannot teleport the player.
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: Instant::now(),
            max_dt,
        }
    }

    /// Seconds since the previous call (or construction), capped.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        cap_dt(dt, self.max_dt)
    }
}

#[inline]
pub fn cap_dt(elapsed: Duration, max_dt: f32) -> f32 {
    elapsed.as_secs_f32().min(max_dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_frames_are_capped() {
        assert_eq!(cap_dt(Duration::from_secs(3), 0.1), 0.1);
        assert!((cap_dt(Duration::from_millis(16), 0.1) - 0.016).abs() < 1e-6);
        assert_eq!(cap_dt(Duration::ZERO, 0.1), 0.0);
    }

    #[test]
    fn tick_is_bounded() {
        let mut clock = FrameClock::new(0.05);
        std::thread::sleep(Duration::from_millis(2));
        let dt = clock.tick();
        assert!(dt > 0.0 && dt <= 0.05);
    }
}
