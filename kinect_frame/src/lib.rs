//! # kinect_frame
//!
//! A thin framework for games driven by a skeletal-tracking depth sensor:
//! sensor frames and body queries, a software canvas, and a fixed-tick
//! window loop.
//!
//! ## Pieces
//!
//! | Module | Role |
//! |---|---|
//! | [`sensor`] | `Sensor` over any `BodySource`: cached frames, tracked bodies, color → surface mapping |
//! | [`joint`] | the 25 joints, tracking states, `Body` / `BodyFrame` |
//! | [`sim`] | pointer-driven body, for running without hardware |
//! | [`replay`] | body frames from newline-delimited JSON recordings |
//! | [`canvas`] | ARGB buffer: rects, circles, thick lines, scaled blits, 3×5 font |
//! | [`window`] | `minifb` window, input events, page flip |
//! | [`game`] | the `Game` trait and `run` loop |
//!
//! A game implements [`game::Game`] and hands itself to [`game::run`]
//! together with a [`sensor::Sensor`]; the loop ticks at `FrameConfig::fps`
//! (30 by default).

pub mod error;
pub mod joint;
pub mod sensor;
pub mod sim;
pub mod replay;
pub mod canvas;
pub mod clock;
pub mod window;
pub mod game;

pub use error::FrameError;
pub use game::{run, FrameConfig, FrameContext, Game};
pub use sensor::{BodySource, FrameKind, FrameSources, Sensor};
