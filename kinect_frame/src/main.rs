//! skeleton_view: draws every tracked body over the color feed.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use kinect_frame::canvas::{rgb, Canvas};
use kinect_frame::joint::{HandState, JointPosition, JointType, BONES, JOINT_COUNT};
use kinect_frame::replay::ReplaySensor;
use kinect_frame::sensor::PixelFrame;
use kinect_frame::sim::SimulatedSensor;
use kinect_frame::{run, FrameConfig, FrameContext, FrameKind, FrameSources, Game, Sensor};

const BODY_COLORS: [u32; 6] = [
    rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255),
    rgb(255, 255, 0), rgb(255, 0, 255), rgb(0, 255, 255),
];
const BONE_WIDTH: i32 = 8;

/// Length of the hand marker's pointer, px.
const HAND_REACH: f32 = 28.0;

#[derive(Parser)]
#[command(name = "skeleton_view")]
#[command(about = "Show tracked skeletons over the sensor's color feed")]
struct Cli {
    #[arg(long, default_value_t = 500)]
    width: usize,
    #[arg(long, default_value_t = 300)]
    height: usize,
    /// Replay body frames from a newline-delimited JSON recording
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Restart the replay when it ends
    #[arg(long)]
    loop_replay: bool,
}

/// One body as it will be drawn this tick.
struct BodyPose {
    slot:       usize,
    joints:     [JointPosition; JOINT_COUNT],
    tracked:    [bool; JOINT_COUNT],
    hand_left:  HandState,
    hand_right: HandState,
}

impl BodyPose {
    fn has(&self, joint: JointType) -> bool { self.tracked[joint.index()] }

    fn at(&self, joint: JointType) -> JointPosition { self.joints[joint.index()] }
}

fn hand_color(state: HandState) -> Option<u32> {
    match state {
        HandState::Open   => Some(rgb(0, 200, 0)),
        HandState::Closed => Some(rgb(220, 0, 0)),
        HandState::Lasso  => Some(rgb(0, 120, 255)),
        HandState::Unknown | HandState::NotTracked => None,
    }
}

/// Marker at the wrist, pointing toward the hand tip.  Open hands get a wide
/// disc, closed ones a small fist, lasso a bare pointer.
fn draw_hand(canvas: &mut Canvas, wrist: JointPosition, tip: JointPosition, state: HandState) {
    let Some(color) = hand_color(state) else { return };
    let angle = (tip.y - wrist.y).atan2(tip.x - wrist.x);
    let end = (wrist.x + HAND_REACH * angle.cos(), wrist.y + HAND_REACH * angle.sin());
    canvas.draw_line(wrist.x as i32, wrist.y as i32, end.0 as i32, end.1 as i32, 6, color);
    let radius = match state {
        HandState::Open   => 16,
        HandState::Closed => 9,
        _                 => 0,
    };
    if radius > 0 {
        canvas.fill_circle(end.0 as i32, end.1 as i32, radius, color);
    }
}

#[derive(Default)]
struct SkeletonView {
    color:  Option<PixelFrame>,
    bodies: Vec<BodyPose>,
}

impl Game for SkeletonView {
    fn step(&mut self, ctx: &mut FrameContext<'_>, _dt: f32) {
        let surface = ctx.surface_size();
        if let Ok(Some(frame)) = ctx.sensor.get_frame(FrameKind::Color) {
            self.color = frame.as_pixels().cloned();
        }
        self.bodies.clear();
        let Ok(bodies) = ctx.sensor.active_bodies() else { return };
        for (body, slot) in bodies {
            let Ok(joints) = ctx.sensor.joint_positions(&body, surface) else { continue };
            let tracked = JointType::ALL.map(|ty| ctx.sensor.joint_is_tracked(&body, ty));
            self.bodies.push(BodyPose {
                slot,
                joints,
                tracked,
                hand_left: body.hand_left,
                hand_right: body.hand_right,
            });
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        if let Some(frame) = &self.color {
            canvas.blit_scaled(frame);
        }
        for pose in &self.bodies {
            let color = BODY_COLORS[pose.slot % BODY_COLORS.len()];
            for (a, b) in BONES {
                if !(pose.has(a) && pose.has(b)) {
                    continue;
                }
                let (p, q) = (pose.at(a), pose.at(b));
                canvas.draw_line(p.x as i32, p.y as i32, q.x as i32, q.y as i32, BONE_WIDTH, color);
            }
            for (wrist, tip, state) in [
                (JointType::WristLeft,  JointType::HandTipLeft,  pose.hand_left),
                (JointType::WristRight, JointType::HandTipRight, pose.hand_right),
            ] {
                if pose.has(wrist) && pose.has(tip) {
                    draw_hand(canvas, pose.at(wrist), pose.at(tip), state);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = FrameConfig {
        width:  cli.width,
        height: cli.height,
        title:  "Skeleton View".to_string(),
        ..FrameConfig::default()
    };

    let sources = FrameSources::color_and_body();
    let sensor = match &cli.replay {
        Some(path) => {
            let replay = ReplaySensor::open(path, cli.loop_replay)
                .with_context(|| format!("failed to load replay {}", path.display()))?;
            Sensor::open(sources, replay)?
        }
        None => Sensor::open(sources, SimulatedSensor::new((config.width, config.height)))?,
    };

    run(SkeletonView::default(), config, sensor).context("skeleton view stopped")
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
