//! Sensor access: frame sources, cached frames and body queries.
//!
//! The public interface is [`Sensor`], which wraps any [`BodySource`]
//! backend.  Consumers don't need to know whether frames come from real
//! hardware, the pointer-driven simulator or a replay file.

use std::collections::HashMap;

use log::info;

use crate::error::FrameError;
use crate::joint::{Body, BodyFrame, JointPosition, JointType, TrackingState, JOINT_COUNT, MAX_BODY_COUNT};
use crate::window::InputEvent;

// ════════════════════════════════════════════════════════════════════════════
// Frame kinds and sources
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Color,
    Depth,
    BodyIndex,
    Body,
}

impl FrameKind {
    pub fn is_pixel_frame(self) -> bool { self != FrameKind::Body }
}

/// Which frame readers to open on the sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSources {
    pub color:      bool,
    pub depth:      bool,
    pub body_index: bool,
    pub body:       bool,
}

impl FrameSources {
    /// Color + body: enough for screen-space skeletons.
    pub fn color_and_body() -> Self {
        FrameSources { color: true, body: true, ..FrameSources::default() }
    }

    pub fn contains(&self, kind: FrameKind) -> bool {
        match kind {
            FrameKind::Color     => self.color,
            FrameKind::Depth     => self.depth,
            FrameKind::BodyIndex => self.body_index,
            FrameKind::Body      => self.body,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.color || self.depth || self.body_index || self.body)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frames
// ════════════════════════════════════════════════════════════════════════════

/// A color, depth or body-index image, already converted to ARGB.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelFrame {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Pixels(PixelFrame),
    Bodies(BodyFrame),
}

impl Frame {
    pub fn as_pixels(&self) -> Option<&PixelFrame> {
        match self {
            Frame::Pixels(p) => Some(p),
            Frame::Bodies(_) => None,
        }
    }

    pub fn as_bodies(&self) -> Option<&BodyFrame> {
        match self {
            Frame::Bodies(b) => Some(b),
            Frame::Pixels(_) => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// BodySource trait: one interface for hw, sim and replay
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver sensor frames.
pub trait BodySource {
    /// Pixel dimensions of frames of `kind`.  Body frames have no size;
    /// callers never ask for it.
    fn frame_size(&self, kind: FrameKind) -> (usize, usize);

    /// The newest frame of `kind`, or `None` when nothing new arrived since
    /// the last poll.
    fn poll(&mut self, kind: FrameKind) -> Option<Frame>;

    fn max_body_count(&self) -> usize { MAX_BODY_COUNT }

    /// Window input, for backends that are driven by it.
    fn on_input(&mut self, _event: &InputEvent) {}
}

// ════════════════════════════════════════════════════════════════════════════
// Sensor
// ════════════════════════════════════════════════════════════════════════════

pub struct Sensor {
    backend:     Box<dyn BodySource>,
    sources:     FrameSources,
    frames:      HashMap<FrameKind, Frame>,
    frame_sizes: HashMap<FrameKind, (usize, usize)>,
}

impl Sensor {
    /// Open `backend` with the requested frame readers.
    pub fn open<B: BodySource + 'static>(sources: FrameSources, backend: B) -> Result<Self, FrameError> {
        if sources.is_empty() {
            return Err(FrameError::NoFrameSources);
        }
        info!("sensor opened with {:?}", sources);
        Ok(Sensor {
            backend: Box::new(backend),
            sources,
            frames: HashMap::new(),
            frame_sizes: HashMap::new(),
        })
    }

    pub fn sources(&self) -> FrameSources { self.sources }

    /// Last frame of `kind`, refreshed from the backend when a new one is
    /// available.  `Ok(None)` means no frame has arrived yet.
    pub fn get_frame(&mut self, kind: FrameKind) -> Result<Option<&Frame>, FrameError> {
        if !self.sources.contains(kind) {
            return Err(FrameError::InvalidFrame(kind));
        }
        if let Some(frame) = self.backend.poll(kind) {
            self.frames.insert(kind, frame);
        }
        Ok(self.frames.get(&kind))
    }

    /// `(width, height)` of a pixel frame.
    pub fn frame_size(&mut self, kind: FrameKind) -> Result<(usize, usize), FrameError> {
        if !kind.is_pixel_frame() {
            return Err(FrameError::NotAPixelFrame(kind));
        }
        if !self.sources.contains(kind) {
            return Err(FrameError::InvalidFrame(kind));
        }
        let backend = &self.backend;
        Ok(*self.frame_sizes.entry(kind).or_insert_with(|| backend.frame_size(kind)))
    }

    /// Tracked bodies of the latest body frame, each with its slot index.
    pub fn active_bodies(&mut self) -> Result<Vec<(Body, usize)>, FrameError> {
        let max = self.backend.max_body_count();
        let frame = self.get_frame(FrameKind::Body)?;
        let Some(bodies) = frame.and_then(Frame::as_bodies) else {
            return Ok(Vec::new());
        };
        Ok(bodies.bodies.iter()
            .take(max)
            .enumerate()
            .filter(|(_, b)| b.tracked)
            .map(|(i, b)| (*b, i))
            .collect())
    }

    pub fn joint_is_tracked(&self, body: &Body, joint: JointType) -> bool {
        body.joint(joint).state == TrackingState::Tracked
    }

    /// Every joint of `body` mapped from color-frame space onto a surface of
    /// `surface` = `(width, height)` pixels.
    pub fn joint_positions(
        &mut self,
        body: &Body,
        surface: (usize, usize),
    ) -> Result<[JointPosition; JOINT_COUNT], FrameError> {
        let (fw, fh) = self.frame_size(FrameKind::Color)?;
        let (sw, sh) = (surface.0 as f32, surface.1 as f32);
        let (fw, fh) = (fw.max(1) as f32, fh.max(1) as f32);
        Ok(body.joints.map(|j| JointPosition {
            x: j.color.x / fw * sw,
            y: j.color.y / fh * sh,
        }))
    }

    /// Raw camera-space x/y of every joint (no screen conversion).
    pub fn camera_positions(&self, body: &Body) -> [JointPosition; JOINT_COUNT] {
        body.joints.map(|j| JointPosition { x: j.camera.x, y: j.camera.y })
    }

    /// Forward window input to the backend.
    pub fn on_input(&mut self, event: &InputEvent) {
        self.backend.on_input(event);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{CameraPoint, ColorPoint, Joint};

    /// Hands out one fixed body frame per poll and counts size lookups.
    struct FixedSource {
        bodies:     BodyFrame,
        size_calls: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl BodySource for FixedSource {
        fn frame_size(&self, _kind: FrameKind) -> (usize, usize) {
            self.size_calls.set(self.size_calls.get() + 1);
            (1920, 1080)
        }
        fn poll(&mut self, kind: FrameKind) -> Option<Frame> {
            match kind {
                FrameKind::Body => Some(Frame::Bodies(self.bodies.clone())),
                _ => None,
            }
        }
    }

    fn hand_body(x: f32, y: f32) -> Body {
        Body::tracked().with_joint(JointType::HandLeft, Joint::at(ColorPoint { x, y }))
    }

    fn sensor_with(bodies: Vec<Body>) -> Sensor {
        let src = FixedSource { bodies: BodyFrame::new(bodies), size_calls: Default::default() };
        Sensor::open(FrameSources::color_and_body(), src).unwrap()
    }

    #[test]
    fn open_without_sources_fails() {
        let src = FixedSource { bodies: BodyFrame::default(), size_calls: Default::default() };
        let err = Sensor::open(FrameSources::default(), src).err().unwrap();
        assert!(matches!(err, FrameError::NoFrameSources));
    }

    #[test]
    fn unrequested_frame_is_invalid() {
        let mut s = sensor_with(vec![]);
        assert!(matches!(s.get_frame(FrameKind::Depth), Err(FrameError::InvalidFrame(FrameKind::Depth))));
        assert!(matches!(s.frame_size(FrameKind::Depth), Err(FrameError::InvalidFrame(_))));
    }

    #[test]
    fn body_frame_has_no_size() {
        let mut s = sensor_with(vec![]);
        assert!(matches!(s.frame_size(FrameKind::Body), Err(FrameError::NotAPixelFrame(_))));
    }

    #[test]
    fn color_frame_not_yet_arrived_is_none() {
        let mut s = sensor_with(vec![]);
        assert!(s.get_frame(FrameKind::Color).unwrap().is_none());
    }

    #[test]
    fn frame_size_is_cached() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let src = FixedSource { bodies: BodyFrame::default(), size_calls: calls.clone() };
        let mut s = Sensor::open(FrameSources::color_and_body(), src).unwrap();
        assert_eq!(s.frame_size(FrameKind::Color).unwrap(), (1920, 1080));
        assert_eq!(s.frame_size(FrameKind::Color).unwrap(), (1920, 1080));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn active_bodies_skips_untracked_slots() {
        let mut s = sensor_with(vec![Body::default(), hand_body(0.0, 0.0), Body::default()]);
        let active = s.active_bodies().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].1, 1);
    }

    #[test]
    fn active_bodies_caps_at_max_body_count() {
        let mut s = sensor_with(vec![Body::tracked(); MAX_BODY_COUNT + 2]);
        assert_eq!(s.active_bodies().unwrap().len(), MAX_BODY_COUNT);
    }

    #[test]
    fn joint_positions_scale_to_surface() {
        let mut s = sensor_with(vec![]);
        let body = hand_body(960.0, 540.0);
        let pos = s.joint_positions(&body, (800, 600)).unwrap();
        let hand = pos[JointType::HandLeft.index()];
        assert!((hand.x - 400.0).abs() < 1e-3);
        assert!((hand.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn joint_positions_need_color_frames() {
        let src = FixedSource { bodies: BodyFrame::default(), size_calls: Default::default() };
        let mut s = Sensor::open(FrameSources { body: true, ..Default::default() }, src).unwrap();
        assert!(matches!(
            s.joint_positions(&Body::tracked(), (800, 600)),
            Err(FrameError::InvalidFrame(FrameKind::Color))
        ));
    }

    #[test]
    fn camera_positions_skip_scaling() {
        let s = sensor_with(vec![]);
        let mut joint = Joint::at(ColorPoint { x: 960.0, y: 540.0 });
        joint.camera = CameraPoint { x: 0.25, y: -0.5, z: 2.0 };
        let body = Body::tracked().with_joint(JointType::Head, joint);
        let head = s.camera_positions(&body)[JointType::Head.index()];
        assert_eq!((head.x, head.y), (0.25, -0.5));
    }

    #[test]
    fn joint_is_tracked_checks_state() {
        let s = sensor_with(vec![]);
        let body = hand_body(1.0, 1.0);
        assert!(s.joint_is_tracked(&body, JointType::HandLeft));
        assert!(!s.joint_is_tracked(&body, JointType::HandRight));
    }
}
