//! Tuning constants and the game's configuration.

/// Configuration for one game.
#[derive(Clone, Debug, PartialEq)]
pub struct FlapConfig {
    /// Playing field, in surface pixels.
    pub width:  usize,
    pub height: usize,

    // ── pipes ────────────────────────────────────────────────────────────
    /// Height of the gap band.
    pub pipe_gap:       f32,
    pub pipe_width:     f32,
    /// Leftward speed, px/s.
    pub pipe_speed:     f32,
    /// Seconds between pipe spawns.
    pub spawn_interval: f32,

    // ── bird ─────────────────────────────────────────────────────────────
    /// Scales the smaller hand stroke (px) × dt (s) into lift (px).
    pub flap_gain:   f32,
    /// Fall per tick without lift, px.  Not scaled by dt.
    pub drift:       f32,
    pub bird_radius: f32,

    /// Seed for gap placement; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for FlapConfig {
    fn default() -> Self {
        FlapConfig {
            width:          800,
            height:         600,
            pipe_gap:       180.0,
            pipe_width:     100.0,
            pipe_speed:     100.0,
            spawn_interval: 3.0,
            flap_gain:      40.0,
            drift:          7.0,
            bird_radius:    30.0,
            seed:           None,
        }
    }
}

impl FlapConfig {
    /// The bird's fixed horizontal position.
    pub fn bird_x(&self) -> f32 { self.width as f32 / 3.0 }

    /// Most pipes that can be alive at once: enough to cover the screen plus
    /// one spawning and one leaving.
    pub fn pipe_capacity(&self) -> usize {
        let spacing = (self.pipe_speed * self.spawn_interval).max(1.0);
        let span = self.width as f32 + self.pipe_width;
        (span / spacing).ceil() as usize + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_covers_the_screen() {
        // 300 px between pipes over 900 px of travel
        assert_eq!(FlapConfig::default().pipe_capacity(), 5);
    }

    #[test]
    fn bird_sits_a_third_in() {
        let cfg = FlapConfig { width: 900, ..FlapConfig::default() };
        assert_eq!(cfg.bird_x(), 300.0);
    }
}
