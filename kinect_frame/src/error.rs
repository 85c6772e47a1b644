//! Error type shared by the sensor, replay and window layers.

use std::fmt;
use std::io;

use crate::sensor::FrameKind;

#[derive(Debug)]
pub enum FrameError {
    /// `Sensor::open` was called without requesting any frame source.
    NoFrameSources,

    /// The frame kind was not requested when the sensor was opened.
    InvalidFrame(FrameKind),

    /// Size was asked of a frame that carries no pixels (the body frame).
    NotAPixelFrame(FrameKind),

    /// The window could not be created or updated.
    Window(String),

    Io(io::Error),

    /// A replay line could not be decoded.  `line` is 1-based.
    Replay { line: usize, message: String },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NoFrameSources =>
                write!(f, "sensor opened with no frame sources"),
            FrameError::InvalidFrame(kind) =>
                write!(f, "{:?} frames were not requested from the sensor", kind),
            FrameError::NotAPixelFrame(kind) =>
                write!(f, "{:?} frames have no pixel size", kind),
            FrameError::Window(msg) =>
                write!(f, "window error: {}", msg),
            FrameError::Io(e) =>
                write!(f, "i/o error: {}", e),
            FrameError::Replay { line, message } =>
                write!(f, "replay line {}: {}", line, message),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FrameError {
    fn from(e: io::Error) -> Self { FrameError::Io(e) }
}

impl From<minifb::Error> for FrameError {
    fn from(e: minifb::Error) -> Self { FrameError::Window(e.to_string()) }
}
