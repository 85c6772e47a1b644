//! # flap_kinect
//!
//! Flap between the pipes by stroking both arms downward in front of a
//! skeletal-tracking sensor.
//!
//! ## Rules
//!
//! * A pipe appears at the right edge every 3 s and scrolls left at 100 px/s.
//! * Each tick, the smaller of the two hands' downward strokes lifts the
//!   bird; with no lift (including no body in view) it sinks 7 px.
//! * Entering a pipe's column outside its gap turns the background red.
//!   Nothing else happens: there is no game over.
//!
//! ## Simulation controls
//!
//! Without `--replay`, the pointer stands in for both hands: move the mouse
//! down quickly to flap.  `T` toggles tracking, `Esc`/`Q` quits.

pub mod config;
pub mod physics;
pub mod pipe;
pub mod game;

pub use config::FlapConfig;
pub use game::FlapGame;
