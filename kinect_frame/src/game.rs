//! The game interface and the fixed-tick loop that drives it.
//!
//! A game is a strategy object implementing [`Game`]; [`run`] owns the
//! window, the clock and the sensor and calls into the game once per tick:
//!
//! 1. `dt = clock.tick(fps)`
//! 2. poll window input → sensor backend, then the game (quit ends the loop)
//! 3. `game.step(ctx, dt)`
//! 4. fill background, `game.draw(canvas)`, present

use log::info;

use crate::canvas::{Canvas, BLACK};
use crate::clock::FrameClock;
use crate::error::FrameError;
use crate::sensor::Sensor;
use crate::window::{InputEvent, Surface};

// ════════════════════════════════════════════════════════════════════════════
// FrameConfig
// ════════════════════════════════════════════════════════════════════════════

/// Window and loop settings.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameConfig {
    pub width:  usize,
    pub height: usize,
    /// Target ticks per second.
    pub fps:    u32,
    pub title:  String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            width:  800,
            height: 600,
            fps:    30,
            title:  "KinectFrame".to_string(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Game trait
// ════════════════════════════════════════════════════════════════════════════

/// What a game sees each tick besides `dt`.
pub struct FrameContext<'a> {
    pub sensor: &'a mut Sensor,
    pub width:  usize,
    pub height: usize,
}

impl FrameContext<'_> {
    pub fn surface_size(&self) -> (usize, usize) { (self.width, self.height) }
}

pub trait Game {
    /// Called once before the first tick.
    fn init(&mut self, _ctx: &mut FrameContext<'_>) -> Result<(), FrameError> { Ok(()) }

    /// Advance the game by `dt` seconds.
    fn step(&mut self, ctx: &mut FrameContext<'_>, dt: f32);

    /// Draw over the already-cleared canvas.
    fn draw(&self, canvas: &mut Canvas);

    /// Color the canvas is cleared to before [`Game::draw`].
    fn background(&self) -> u32 { BLACK }

    fn on_event(&mut self, _event: &InputEvent) {}
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the window and drive `game` until the user quits.
pub fn run<G: Game>(mut game: G, config: FrameConfig, mut sensor: Sensor) -> Result<(), FrameError> {
    let mut surface = Surface::open(&config.title, config.width, config.height)?;
    let mut clock = FrameClock::new();

    game.init(&mut FrameContext { sensor: &mut sensor, width: config.width, height: config.height })?;
    info!("running \"{}\" at {}x{} @ {} fps", config.title, config.width, config.height, config.fps);

    while surface.is_open() {
        let dt = clock.tick(config.fps);

        for event in surface.poll_events() {
            if event == InputEvent::Quit {
                info!("quit requested");
                return Ok(());
            }
            sensor.on_input(&event);
            game.on_event(&event);
        }

        let mut ctx = FrameContext { sensor: &mut sensor, width: config.width, height: config.height };
        step_and_draw(&mut game, &mut ctx, dt, surface.canvas());
        surface.present()?;
    }

    Ok(())
}

/// One tick without a window: step, clear, draw.
pub fn step_and_draw<G: Game>(game: &mut G, ctx: &mut FrameContext<'_>, dt: f32, canvas: &mut Canvas) {
    game.step(ctx, dt);
    canvas.fill(game.background());
    game.draw(canvas);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RED;
    use crate::joint::BodyFrame;
    use crate::replay::ReplaySensor;
    use crate::sensor::FrameSources;

    #[derive(Default)]
    struct Counter {
        steps:   usize,
        elapsed: f32,
    }

    impl Game for Counter {
        fn step(&mut self, _ctx: &mut FrameContext<'_>, dt: f32) {
            self.steps += 1;
            self.elapsed += dt;
        }
        fn draw(&self, canvas: &mut Canvas) {
            canvas.fill_rect(0, 0, 1, 1, RED);
        }
        fn background(&self) -> u32 { 0xFF202020 }
    }

    #[test]
    fn step_and_draw_clears_then_draws() {
        let mut sensor = Sensor::open(
            FrameSources::color_and_body(),
            ReplaySensor::from_frames(vec![BodyFrame::default()], false),
        ).unwrap();
        let mut game = Counter::default();
        let mut canvas = Canvas::new(4, 4);
        let mut ctx = FrameContext { sensor: &mut sensor, width: 4, height: 4 };

        step_and_draw(&mut game, &mut ctx, 0.5, &mut canvas);
        step_and_draw(&mut game, &mut ctx, 0.25, &mut canvas);

        assert_eq!(game.steps, 2);
        assert_eq!(game.elapsed, 0.75);
        assert_eq!(canvas.get(0, 0), Some(RED));
        assert_eq!(canvas.get(3, 3), Some(0xFF202020));
    }

    #[test]
    fn default_config_is_30_fps() {
        let cfg = FrameConfig::default();
        assert_eq!((cfg.width, cfg.height, cfg.fps), (800, 600, 30));
    }
}
