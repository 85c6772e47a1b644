//! Frame-rate limiter.

use std::thread;
use std::time::{Duration, Instant};

/// Measures time between ticks and sleeps so that ticks happen at most
/// `fps` times per second.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self { FrameClock::new() }
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last: Instant::now() }
    }

    /// Block until at least `1 / fps` s have passed since the previous tick,
    /// then return the seconds actually elapsed.  `fps == 0` disables the
    /// limit.
    pub fn tick(&mut self, fps: u32) -> f32 {
        if fps > 0 {
            let period = Duration::from_secs_f64(1.0 / fps as f64);
            let spent = self.last.elapsed();
            if spent < period {
                thread::sleep(period - spent);
            }
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_waits_for_the_frame_period() {
        let mut clock = FrameClock::new();
        clock.tick(0);
        let dt = clock.tick(50);
        assert!(dt >= 0.019, "dt = {}", dt);
    }

    #[test]
    fn unlimited_tick_is_nonnegative() {
        let mut clock = FrameClock::new();
        assert!(clock.tick(0) >= 0.0);
    }
}
