//! Replay backend: body frames from a recording instead of a live sensor.
//!
//! The recording format is newline-delimited JSON, one [`BodyFrame`] per
//! line, with joints keyed by name and given in color-frame pixels:
//!
//! ```text
//! {"bodies":[{"tracked":true,"joints":{"HandLeft":{"color":{"x":700,"y":400}},
//!                                      "HandRight":{"color":{"x":1200,"y":410}}},
//!             "hand_right":"Closed"}]}
//! ```
//!
//! `hand_left`/`hand_right` are optional and default to `Unknown`.
//!
//! Each body poll consumes one line.  Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::error::FrameError;
use crate::joint::BodyFrame;
use crate::sensor::{BodySource, Frame, FrameKind};

/// Color frame size of a Kinect v2, which recordings are expressed in.
pub const COLOR_SIZE: (usize, usize) = (1920, 1080);
/// Depth and body-index frame size of a Kinect v2.
pub const DEPTH_SIZE: (usize, usize) = (512, 424);

pub struct ReplaySensor {
    frames:  Vec<BodyFrame>,
    cursor:  usize,
    looping: bool,
}

impl ReplaySensor {
    pub fn from_frames(frames: Vec<BodyFrame>, looping: bool) -> Self {
        ReplaySensor { frames, cursor: 0, looping }
    }

    pub fn from_reader<R: BufRead>(reader: R, looping: bool) -> Result<Self, FrameError> {
        let mut frames = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: BodyFrame = serde_json::from_str(&line)
                .map_err(|e| FrameError::Replay { line: i + 1, message: e.to_string() })?;
            frames.push(frame);
        }
        debug!("parsed {} replay frames", frames.len());
        Ok(ReplaySensor::from_frames(frames, looping))
    }

    pub fn open<P: AsRef<Path>>(path: P, looping: bool) -> Result<Self, FrameError> {
        let path = path.as_ref();
        let replay = ReplaySensor::from_reader(BufReader::new(File::open(path)?), looping)?;
        info!("replaying {} frames from {}", replay.len(), path.display());
        Ok(replay)
    }

    pub fn len(&self) -> usize { self.frames.len() }

    pub fn is_empty(&self) -> bool { self.frames.is_empty() }

    /// True once a non-looping replay has handed out every frame.
    pub fn finished(&self) -> bool {
        !self.looping && self.cursor >= self.frames.len()
    }
}

impl BodySource for ReplaySensor {
    fn frame_size(&self, kind: FrameKind) -> (usize, usize) {
        match kind {
            FrameKind::Color => COLOR_SIZE,
            _                => DEPTH_SIZE,
        }
    }

    fn poll(&mut self, kind: FrameKind) -> Option<Frame> {
        if kind != FrameKind::Body || self.frames.is_empty() {
            return None;
        }
        if self.cursor >= self.frames.len() {
            if !self.looping {
                return None;
            }
            self.cursor = 0;
        }
        let frame = self.frames[self.cursor].clone();
        self.cursor += 1;
        Some(Frame::Bodies(frame))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{Body, HandState, JointType};

    const RECORDING: &str = r#"
{"bodies":[{"tracked":true,"joints":{"HandLeft":{"color":{"x":700.0,"y":400.0}}},"hand_left":"Lasso"}]}

{"bodies":[]}
"#;

    #[test]
    fn parses_lines_and_skips_blanks() {
        let r = ReplaySensor::from_reader(RECORDING.as_bytes(), false).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.frames[0].bodies[0].joint(JointType::HandLeft).color.y, 400.0);
        assert_eq!(r.frames[0].bodies[0].hand_left, HandState::Lasso);
    }

    #[test]
    fn bad_line_reports_its_number() {
        let text = "{\"bodies\":[]}\nnot json\n";
        match ReplaySensor::from_reader(text.as_bytes(), false) {
            Err(FrameError::Replay { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected replay error, got {:?}", other.err()),
        }
    }

    #[test]
    fn non_looping_replay_runs_out() {
        let mut r = ReplaySensor::from_frames(vec![BodyFrame::default()], false);
        assert!(r.poll(FrameKind::Body).is_some());
        assert!(r.poll(FrameKind::Body).is_none());
        assert!(r.finished());
    }

    #[test]
    fn looping_replay_wraps() {
        let frames = vec![BodyFrame::new(vec![Body::tracked()]), BodyFrame::default()];
        let mut r = ReplaySensor::from_frames(frames.clone(), true);
        for expected in frames.iter().chain(frames.iter()) {
            assert_eq!(r.poll(FrameKind::Body), Some(Frame::Bodies(expected.clone())));
        }
        assert!(!r.finished());
    }

    #[test]
    fn replay_has_no_pixel_frames() {
        let mut r = ReplaySensor::from_frames(vec![BodyFrame::default()], true);
        assert!(r.poll(FrameKind::Color).is_none());
        assert_eq!(r.frame_size(FrameKind::Color), COLOR_SIZE);
    }
}
