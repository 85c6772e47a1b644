//! The game state and its per-tick update.
//!
//! `FlapGame` owns everything that changes between ticks; the framework's
//! loop calls [`Game::step`] and [`Game::draw`] on it.

use log::{info, warn};

use kinect_frame::canvas::{blend, Canvas, BLACK, BLUE, GREEN, RED, WHITE};
use kinect_frame::joint::JointType;
use kinect_frame::{FrameContext, FrameError, FrameKind, Game};

use crate::config::FlapConfig;
use crate::physics::{Bird, FlapTracker, HandSample};
use crate::pipe::PipeField;

const LIP_H:        i32 = 12;
const LIP_OVERHANG: i32 = 4;

/// What the sensor reported this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tracking {
    /// Both hands of the first body are tracked.
    Hands,
    /// A body is tracked but at least one hand is not.
    NoHands,
    NoBody,
}

pub struct FlapGame {
    config:   FlapConfig,
    bird:     Bird,
    tracker:  FlapTracker,
    pipes:    PipeField,
    collided: bool,
    passed:   u32,
    tracking: Tracking,
}

impl FlapGame {
    pub fn new(config: FlapConfig) -> Self {
        let bird = Bird::new(config.height as f32 / 2.0);
        let pipes = PipeField::new(&config);
        FlapGame {
            config,
            bird,
            tracker: FlapTracker::new(),
            pipes,
            collided: false,
            passed: 0,
            tracking: Tracking::NoBody,
        }
    }

    pub fn config(&self)   -> &FlapConfig { &self.config }
    pub fn bird_y(&self)   -> f32         { self.bird.y }
    pub fn pipes(&self)    -> &PipeField  { &self.pipes }
    /// The bird is inside a pipe's column and outside its gap.
    pub fn collided(&self) -> bool        { self.collided }
    pub fn passed(&self)   -> u32         { self.passed }
    pub fn tracking(&self) -> Tracking    { self.tracking }

    /// One tick given this tick's hand sample.
    ///
    /// Pipes move and the bird is tested against them before new pipes
    /// spawn; then the bird either rises by the flap lift or, with no lift,
    /// falls by the fixed drift.
    pub fn advance(&mut self, dt: f32, hands: Option<HandSample>) {
        let dt = dt.max(0.0);
        let height = self.config.height as f32;
        let bird_x = self.config.bird_x();

        self.pipes.advance(dt);
        let was_collided = self.collided;
        self.collided = !self.pipes.is_point_safe(bird_x, self.bird.y);
        if self.collided && !was_collided {
            info!("hit a pipe at y={:.1}", self.bird.y);
        }
        self.passed += self.pipes.mark_passed(bird_x) as u32;
        self.pipes.spawn_due(dt);

        let lift = self.tracker.observe(hands, dt, self.config.flap_gain);
        if lift != 0.0 {
            self.bird.flap(lift, height);
        } else {
            self.bird.drift(self.config.drift, height);
        }
    }

    /// Both hands of the first tracked body, in surface pixels.
    fn read_hands(&mut self, ctx: &mut FrameContext<'_>) -> Result<Option<HandSample>, FrameError> {
        let bodies = ctx.sensor.active_bodies()?;
        let Some((body, _)) = bodies.first() else {
            self.set_tracking(Tracking::NoBody);
            return Ok(None);
        };
        if !(ctx.sensor.joint_is_tracked(body, JointType::HandLeft)
            && ctx.sensor.joint_is_tracked(body, JointType::HandRight))
        {
            self.set_tracking(Tracking::NoHands);
            return Ok(None);
        }
        let surface = ctx.surface_size();
        let joints = ctx.sensor.joint_positions(body, surface)?;
        self.set_tracking(Tracking::Hands);
        Ok(Some(HandSample {
            left:  joints[JointType::HandLeft.index()].y,
            right: joints[JointType::HandRight.index()].y,
        }))
    }

    fn set_tracking(&mut self, tracking: Tracking) {
        if tracking != self.tracking {
            match tracking {
                Tracking::Hands => info!("hands tracked"),
                other           => warn!("tracking lost: {:?}", other),
            }
            self.tracking = tracking;
        }
    }
}

impl Game for FlapGame {
    fn init(&mut self, ctx: &mut FrameContext<'_>) -> Result<(), FrameError> {
        // joint_positions needs the color frame size
        ctx.sensor.frame_size(FrameKind::Color)?;
        info!("{}x{} field, pipe every {}s", self.config.width, self.config.height, self.config.spawn_interval);
        Ok(())
    }

    fn step(&mut self, ctx: &mut FrameContext<'_>, dt: f32) {
        let hands = match self.read_hands(ctx) {
            Ok(hands) => hands,
            Err(e) => {
                warn!("sensor: {}", e);
                None
            }
        };
        self.advance(dt, hands);
    }

    fn draw(&self, canvas: &mut Canvas) {
        let lip = blend(GREEN, BLACK, 0.35);
        for (top, bottom) in self.pipes.rects() {
            for (x, y, w, h) in [top, bottom] {
                canvas.fill_rect(x as i32, y as i32, w as i32, h as i32, GREEN);
            }
            // darker lips on the gap edges
            let (x, w) = (top.0 as i32 - LIP_OVERHANG, top.2 as i32 + 2 * LIP_OVERHANG);
            canvas.fill_rect(x, (top.1 + top.3) as i32 - LIP_H, w, LIP_H, lip);
            canvas.fill_rect(x, bottom.1 as i32, w, LIP_H, lip);
        }
        canvas.fill_circle(
            self.config.bird_x() as i32,
            self.bird.y as i32,
            self.config.bird_radius as i32,
            BLUE,
        );

        let status = match self.tracking {
            Tracking::Hands   => "TRACKING",
            Tracking::NoHands => "NO HANDS",
            Tracking::NoBody  => "NO BODY",
        };
        canvas.draw_label(&format!("{}  PIPES {}", status, self.passed), 8, 8, 2, WHITE);
    }

    fn background(&self) -> u32 {
        if self.collided { RED } else { BLACK }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use kinect_frame::game::step_and_draw;
    use kinect_frame::joint::{Body, BodyFrame, ColorPoint, Joint};
    use kinect_frame::replay::ReplaySensor;
    use kinect_frame::{FrameSources, Sensor};
    use crate::pipe::Pipe;

    fn make_game() -> FlapGame {
        FlapGame::new(FlapConfig { seed: Some(1), ..FlapConfig::default() })
    }

    fn hands(left: f32, right: f32) -> Option<HandSample> {
        Some(HandSample { left, right })
    }

    /// A body with both hands at the given color-frame heights (1920×1080).
    fn body_frame(left_y: f32, right_y: f32) -> BodyFrame {
        let body = Body::tracked()
            .with_joint(JointType::HandLeft,  Joint::at(ColorPoint { x: 700.0,  y: left_y }))
            .with_joint(JointType::HandRight, Joint::at(ColorPoint { x: 1200.0, y: right_y }));
        BodyFrame::new(vec![body])
    }

    fn replay(frames: Vec<BodyFrame>) -> Sensor {
        Sensor::open(FrameSources::color_and_body(), ReplaySensor::from_frames(frames, false)).unwrap()
    }

    #[test]
    fn starts_mid_field() {
        let g = make_game();
        assert_eq!(g.bird_y(), 300.0);
        assert!(!g.collided());
    }

    #[test]
    fn no_tracking_drifts_down() {
        let mut g = make_game();
        g.advance(1.0 / 30.0, None);
        assert_eq!(g.bird_y(), 307.0);
    }

    #[test]
    fn drift_stops_at_bottom() {
        let mut g = make_game();
        for _ in 0..100 {
            g.advance(1.0 / 30.0, None);
        }
        assert_eq!(g.bird_y(), 600.0);
    }

    #[test]
    fn both_hands_stroking_lifts_by_smaller_stroke() {
        let mut g = make_game();
        g.advance(0.25, hands(100.0, 100.0));
        let y = g.bird_y();
        g.advance(0.25, hands(110.0, 106.0));
        assert_eq!(g.bird_y(), y - 0.25 * 40.0 * 6.0);
    }

    #[test]
    fn still_hands_drift() {
        let mut g = make_game();
        g.advance(0.25, hands(100.0, 100.0));
        let y = g.bird_y();
        g.advance(0.25, hands(100.0, 100.0));
        assert_eq!(g.bird_y(), y + 7.0);
    }

    #[test]
    fn pipe_spawns_every_three_seconds() {
        let mut g = make_game();
        for _ in 0..12 {
            g.advance(0.25, None);
        }
        assert_eq!(g.pipes().spawned(), 1);
        for _ in 0..24 {
            g.advance(0.25, None);
        }
        assert_eq!(g.pipes().spawned(), 3);
    }

    #[test]
    fn first_pipe_after_90_ticks_at_30_hz() {
        let mut g = make_game();
        for _ in 0..89 {
            g.advance(1.0 / 30.0, None);
        }
        assert_eq!(g.pipes().spawned(), 0);
        g.advance(1.0 / 30.0, None);
        assert_eq!(g.pipes().spawned(), 1);
    }

    #[test]
    fn hitting_a_pipe_turns_background_red() {
        let mut g = make_game();
        // column over the bird, gap band 10..190, bird at 300
        g.pipes.push(Pipe::new(g.config.bird_x(), 100.0));
        g.advance(0.0, None);
        assert!(g.collided());
        assert_eq!(g.background(), RED);
    }

    #[test]
    fn flying_through_the_gap_is_safe() {
        let mut g = make_game();
        g.pipes.push(Pipe::new(g.config.bird_x(), 300.0));
        g.advance(0.0, None);
        assert!(!g.collided());
    }

    #[test]
    fn collision_is_not_game_over() {
        let mut g = make_game();
        g.pipes.push(Pipe::new(g.config.bird_x(), 100.0));
        g.advance(0.0, None);
        assert!(g.collided());
        // the pipe scrolls on and the bird keeps flying
        g.advance(2.0, None);
        assert!(!g.collided());
        assert_eq!(g.passed(), 1);
    }

    #[test]
    fn clear_field_is_black() {
        let mut g = make_game();
        g.advance(0.25, None);
        assert!(!g.collided());
        assert_eq!(g.background(), BLACK);
    }

    #[test]
    fn step_reads_hands_from_sensor() {
        // 1080 → 600 px: 540 → 300, 567 → 315, 576 → 320
        let mut sensor = replay(vec![body_frame(540.0, 540.0), body_frame(567.0, 576.0)]);
        let mut g = make_game();
        let mut ctx = FrameContext { sensor: &mut sensor, width: 800, height: 600 };
        g.init(&mut ctx).unwrap();

        g.step(&mut ctx, 0.25);
        assert_eq!(g.tracking(), Tracking::Hands);
        let y = g.bird_y();
        g.step(&mut ctx, 0.25);
        assert!((g.bird_y() - (y - 0.25 * 40.0 * 15.0)).abs() < 1e-3, "y = {}", g.bird_y());
    }

    #[test]
    fn step_without_bodies_drifts() {
        let mut sensor = replay(vec![BodyFrame::default()]);
        let mut g = make_game();
        let mut ctx = FrameContext { sensor: &mut sensor, width: 800, height: 600 };
        g.step(&mut ctx, 1.0 / 30.0);
        assert_eq!(g.tracking(), Tracking::NoBody);
        assert_eq!(g.bird_y(), 307.0);
    }

    #[test]
    fn one_hand_untracked_counts_as_lost() {
        let body = Body::tracked()
            .with_joint(JointType::HandLeft, Joint::at(ColorPoint { x: 700.0, y: 500.0 }));
        let mut sensor = replay(vec![BodyFrame::new(vec![body])]);
        let mut g = make_game();
        let mut ctx = FrameContext { sensor: &mut sensor, width: 800, height: 600 };
        g.step(&mut ctx, 1.0 / 30.0);
        assert_eq!(g.tracking(), Tracking::NoHands);
        assert_eq!(g.bird_y(), 307.0);
    }

    #[test]
    fn draw_puts_bird_and_pipes_on_canvas() {
        let mut sensor = replay(vec![BodyFrame::default()]);
        let mut g = make_game();
        let mut canvas = Canvas::new(800, 600);
        let mut ctx = FrameContext { sensor: &mut sensor, width: 800, height: 600 };
        step_and_draw(&mut g, &mut ctx, 3.0, &mut canvas);

        let bird = (g.config().bird_x() as usize, g.bird_y() as usize);
        assert_eq!(canvas.get(bird.0, bird.1), Some(BLUE));
        // new pipe column straddles the right edge; the taller half reaches
        // its screen edge past the lip
        let center = g.pipes().pipes().next().unwrap().gap_center();
        let row = if center > 300.0 { 0 } else { 599 };
        assert_eq!(canvas.get(780, row), Some(GREEN));
    }
}
