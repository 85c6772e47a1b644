//! flap_kinect: interactive entry point.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use flap_kinect::{FlapConfig, FlapGame};
use kinect_frame::replay::ReplaySensor;
use kinect_frame::sim::SimulatedSensor;
use kinect_frame::{run, FrameConfig, FrameSources, Sensor};

#[derive(Parser)]
#[command(name = "flap_kinect")]
#[command(about = "Flap between the pipes with your arms")]
struct Cli {
    #[arg(long, default_value_t = 800)]
    width: usize,
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// Target ticks per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Seed for pipe placement
    #[arg(long)]
    seed: Option<u64>,
    /// Replay body frames from a newline-delimited JSON recording
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Restart the replay when it ends
    #[arg(long)]
    loop_replay: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = FlapConfig {
        width:  cli.width,
        height: cli.height,
        seed:   cli.seed,
        ..FlapConfig::default()
    };
    let frame = FrameConfig {
        width:  cli.width,
        height: cli.height,
        fps:    cli.fps,
        title:  "FlapPyKinect".to_string(),
    };

    let sources = FrameSources::color_and_body();
    let sensor = match &cli.replay {
        Some(path) => {
            let replay = ReplaySensor::open(path, cli.loop_replay)
                .with_context(|| format!("failed to load replay {}", path.display()))?;
            Sensor::open(sources, replay)?
        }
        None => {
            info!("no replay given; mouse drives the hands (T toggles tracking)");
            Sensor::open(sources, SimulatedSensor::new((cli.width, cli.height)))?
        }
    };

    run(FlapGame::new(config), frame, sensor).context("game loop failed")
}
