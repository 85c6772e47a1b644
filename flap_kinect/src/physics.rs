//! Bird physics: the flap signal from two hands, and the bird's height.
//!
//! Heights are surface pixels with y growing downward, so a hand's "rise"
//! in its sampled coordinate is a downward arm stroke, and lift moves the
//! bird toward y = 0.

/// Both hands' vertical positions for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandSample {
    pub left:  f32,
    pub right: f32,
}

/// Lift for one tick: the smaller of the two hands' positive-only strokes,
/// scaled by `gain` and `dt`.
pub fn flap_delta(prev: HandSample, current: HandSample, dt: f32, gain: f32) -> f32 {
    let left = (current.left - prev.left).max(0.0);
    let right = (current.right - prev.right).max(0.0);
    dt.max(0.0) * gain * left.min(right)
}

/// Keeps the previous tick's sample for one-step deltas.
#[derive(Clone, Debug, Default)]
pub struct FlapTracker {
    prev: Option<HandSample>,
}

impl FlapTracker {
    pub fn new() -> Self { FlapTracker::default() }

    pub fn previous(&self) -> Option<HandSample> { self.prev }

    /// Feed this tick's sample (or `None` when the hands are not tracked)
    /// and get the lift.  Losing tracking forgets the previous sample, so
    /// the first tick after reacquiring yields no lift.
    pub fn observe(&mut self, sample: Option<HandSample>, dt: f32, gain: f32) -> f32 {
        let lift = match (self.prev, sample) {
            (Some(prev), Some(cur)) => flap_delta(prev, cur, dt, gain),
            _ => 0.0,
        };
        self.prev = sample;
        lift
    }
}

/// The player's vertical position, always within `[0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bird {
    pub y: f32,
}

impl Bird {
    pub fn new(y: f32) -> Self { Bird { y } }

    /// Move up by `lift`.
    pub fn flap(&mut self, lift: f32, height: f32) {
        self.y = (self.y - lift).clamp(0.0, height.max(0.0));
    }

    /// Fall by `amount`.
    pub fn drift(&mut self, amount: f32, height: f32) {
        self.y = (self.y + amount).clamp(0.0, height.max(0.0));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn hands(left: f32, right: f32) -> HandSample { HandSample { left, right } }

    #[test]
    fn delta_uses_smaller_stroke() {
        let d = flap_delta(hands(100.0, 100.0), hands(110.0, 104.0), 0.5, 40.0);
        assert_eq!(d, 0.5 * 40.0 * 4.0);
    }

    #[test]
    fn one_hand_moving_up_gives_no_lift() {
        let d = flap_delta(hands(100.0, 100.0), hands(90.0, 150.0), 0.5, 40.0);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn negative_dt_gives_no_lift() {
        assert_eq!(flap_delta(hands(0.0, 0.0), hands(10.0, 10.0), -1.0, 40.0), 0.0);
    }

    #[test]
    fn tracker_needs_a_previous_sample() {
        let mut t = FlapTracker::new();
        assert_eq!(t.observe(Some(hands(100.0, 100.0)), 0.25, 40.0), 0.0);
        assert_eq!(t.observe(Some(hands(102.0, 103.0)), 0.25, 40.0), 20.0);
        assert_eq!(t.previous(), Some(hands(102.0, 103.0)));
    }

    #[test]
    fn losing_tracking_forgets_previous() {
        let mut t = FlapTracker::new();
        t.observe(Some(hands(100.0, 100.0)), 0.25, 40.0);
        assert_eq!(t.observe(None, 0.25, 40.0), 0.0);
        assert_eq!(t.previous(), None);
        assert_eq!(t.observe(Some(hands(300.0, 300.0)), 0.25, 40.0), 0.0);
    }

    #[test]
    fn flap_clamps_at_top() {
        let mut b = Bird::new(10.0);
        b.flap(50.0, 600.0);
        assert_eq!(b.y, 0.0);
    }

    #[test]
    fn drift_clamps_at_bottom() {
        let mut b = Bird::new(596.0);
        b.drift(7.0, 600.0);
        assert_eq!(b.y, 600.0);
        b.drift(7.0, 600.0);
        assert_eq!(b.y, 600.0);
    }

    #[test]
    fn position_stays_in_field_for_any_input() {
        let mut b = Bird::new(300.0);
        let mut t = FlapTracker::new();
        let strokes = [0.0, 500.0, -300.0, 1e6, 12.5, -1e6, 0.0, 80.0];
        for (i, dt) in [0.0, 0.033, 0.5, 2.0, 10.0].iter().cycle().take(40).enumerate() {
            let s = strokes[i % strokes.len()];
            let lift = t.observe(Some(hands(s, s)), *dt, 40.0);
            if lift != 0.0 { b.flap(lift, 600.0) } else { b.drift(7.0, 600.0) }
            assert!((0.0..=600.0).contains(&b.y), "y = {}", b.y);
        }
    }
}
