//! Simulation backend: a pointer-driven body for running without hardware.
//!
//! One body stands in the middle of the frame.  Both hands follow the
//! pointer's height, so moving the mouse down quickly is an arm stroke.
//!
//! | Input | Effect |
//! |---|---|
//! | mouse move / drag | hands follow the pointer's y |
//! | left button held | both hands `Closed` (otherwise `Open`) |
//! | `T` | toggle tracking (simulates the player stepping out of view) |

use log::info;

use crate::joint::{Body, BodyFrame, ColorPoint, HandState, Joint, JointType};
use crate::replay::{COLOR_SIZE, DEPTH_SIZE};
use crate::sensor::{BodySource, Frame, FrameKind};
use crate::window::{InputEvent, Key};

pub struct SimulatedSensor {
    surface:  (usize, usize),
    /// Pointer position in surface pixels, once the mouse has been seen.
    pointer:  Option<(f32, f32)>,
    grip:     bool,
    tracking: bool,
}

impl SimulatedSensor {
    /// `surface` is the size of the window the pointer moves over.
    pub fn new(surface: (usize, usize)) -> Self {
        SimulatedSensor { surface, pointer: None, grip: false, tracking: true }
    }

    pub fn is_tracking(&self) -> bool { self.tracking }

    /// State reported for both hands.
    pub fn hand_state(&self) -> HandState {
        if self.grip { HandState::Closed } else { HandState::Open }
    }

    /// The simulated body, in color-frame pixels.
    pub fn body(&self) -> Option<Body> {
        if !self.tracking {
            return None;
        }
        let (_, py) = self.pointer?;
        let (cw, ch) = (COLOR_SIZE.0 as f32, COLOR_SIZE.1 as f32);
        let hand_y = py / self.surface.1.max(1) as f32 * ch;
        let cx = cw / 2.0;

        let at = |x: f32, y: f32| Joint::at(ColorPoint { x, y });
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

        let shoulder_y = 0.36 * ch;
        let (shoulder_l, shoulder_r) = (cx - 0.10 * cw, cx + 0.10 * cw);
        let (hand_l, hand_r) = (cx - 0.25 * cw, cx + 0.25 * cw);

        let mut body = Body::tracked();
        for (ty, x, y) in [
            (JointType::Head,          cx,         0.25 * ch),
            (JointType::Neck,          cx,         0.32 * ch),
            (JointType::SpineShoulder, cx,         0.35 * ch),
            (JointType::SpineMid,      cx,         0.50 * ch),
            (JointType::SpineBase,     cx,         0.62 * ch),
            (JointType::ShoulderLeft,  shoulder_l, shoulder_y),
            (JointType::ShoulderRight, shoulder_r, shoulder_y),
            (JointType::ElbowLeft,  lerp(shoulder_l, hand_l, 0.5), lerp(shoulder_y, hand_y, 0.5)),
            (JointType::ElbowRight, lerp(shoulder_r, hand_r, 0.5), lerp(shoulder_y, hand_y, 0.5)),
            (JointType::WristLeft,  lerp(shoulder_l, hand_l, 0.9), lerp(shoulder_y, hand_y, 0.9)),
            (JointType::WristRight, lerp(shoulder_r, hand_r, 0.9), lerp(shoulder_y, hand_y, 0.9)),
            (JointType::HandLeft,      hand_l,     hand_y),
            (JointType::HandRight,     hand_r,     hand_y),
            (JointType::HandTipLeft,  lerp(shoulder_l, hand_l, 1.1), lerp(shoulder_y, hand_y, 1.1)),
            (JointType::HandTipRight, lerp(shoulder_r, hand_r, 1.1), lerp(shoulder_y, hand_y, 1.1)),
            (JointType::HipLeft,       cx - 0.05 * cw, 0.63 * ch),
            (JointType::HipRight,      cx + 0.05 * cw, 0.63 * ch),
            (JointType::KneeLeft,      cx - 0.06 * cw, 0.78 * ch),
            (JointType::KneeRight,     cx + 0.06 * cw, 0.78 * ch),
            (JointType::AnkleLeft,     cx - 0.06 * cw, 0.92 * ch),
            (JointType::AnkleRight,    cx + 0.06 * cw, 0.92 * ch),
            (JointType::FootLeft,      cx - 0.08 * cw, 0.95 * ch),
            (JointType::FootRight,     cx + 0.08 * cw, 0.95 * ch),
        ] {
            body.set_joint(ty, at(x, y));
        }
        body.hand_left = self.hand_state();
        body.hand_right = self.hand_state();
        Some(body)
    }
}

impl BodySource for SimulatedSensor {
    fn frame_size(&self, kind: FrameKind) -> (usize, usize) {
        match kind {
            FrameKind::Color => COLOR_SIZE,
            _                => DEPTH_SIZE,
        }
    }

    fn poll(&mut self, kind: FrameKind) -> Option<Frame> {
        if kind != FrameKind::Body {
            return None;
        }
        Some(Frame::Bodies(BodyFrame::new(self.body().into_iter().collect())))
    }

    fn on_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseMotion { x, y }
            | InputEvent::MouseDrag { x, y } => self.pointer = Some((x, y)),
            InputEvent::MouseDown { x, y } => {
                self.pointer = Some((x, y));
                self.grip = true;
            }
            InputEvent::MouseUp { x, y } => {
                self.pointer = Some((x, y));
                self.grip = false;
            }
            InputEvent::KeyDown(Key::T) => {
                self.tracking = !self.tracking;
                info!("simulated tracking {}", if self.tracking { "on" } else { "off" });
            }
            _ => {}
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
