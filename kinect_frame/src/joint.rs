//! Skeleton data: joint types, tracking states and per-body joint tables.
//!
//! Positions come in two spaces, both filled in by the sensor backend:
//!
//! * **camera space**: metres, origin at the sensor, y up.
//! * **color space**: pixels of the color frame (1920×1080 on Kinect v2),
//!   y down.  [`crate::sensor::Sensor::joint_positions`] rescales these to the
//!   output surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Joints per body.
pub const JOINT_COUNT: usize = 25;

/// Body slots reported per body frame.
pub const MAX_BODY_COUNT: usize = 6;

// ════════════════════════════════════════════════════════════════════════════
// JointType
// ════════════════════════════════════════════════════════════════════════════

/// The 25 tracked joints, in sensor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JointType {
    SpineBase,
    SpineMid,
    Neck,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
    SpineShoulder,
    HandTipLeft,
    ThumbLeft,
    HandTipRight,
    ThumbRight,
}

impl JointType {
    pub const ALL: [JointType; JOINT_COUNT] = [
        JointType::SpineBase,    JointType::SpineMid,      JointType::Neck,
        JointType::Head,         JointType::ShoulderLeft,  JointType::ElbowLeft,
        JointType::WristLeft,    JointType::HandLeft,      JointType::ShoulderRight,
        JointType::ElbowRight,   JointType::WristRight,    JointType::HandRight,
        JointType::HipLeft,      JointType::KneeLeft,      JointType::AnkleLeft,
        JointType::FootLeft,     JointType::HipRight,      JointType::KneeRight,
        JointType::AnkleRight,   JointType::FootRight,     JointType::SpineShoulder,
        JointType::HandTipLeft,  JointType::ThumbLeft,     JointType::HandTipRight,
        JointType::ThumbRight,
    ];

    /// Slot of this joint in a body's joint table.
    pub fn index(self) -> usize { self as usize }
}

/// Bones drawn by skeleton overlays: torso, arms and legs.
pub const BONES: [(JointType, JointType); 20] = [
    (JointType::Head,          JointType::Neck),
    (JointType::Neck,          JointType::SpineShoulder),
    (JointType::SpineShoulder, JointType::SpineMid),
    (JointType::SpineMid,      JointType::SpineBase),
    (JointType::SpineShoulder, JointType::ShoulderLeft),
    (JointType::ShoulderLeft,  JointType::ElbowLeft),
    (JointType::ElbowLeft,     JointType::WristLeft),
    (JointType::WristLeft,     JointType::HandLeft),
    (JointType::SpineShoulder, JointType::ShoulderRight),
    (JointType::ShoulderRight, JointType::ElbowRight),
    (JointType::ElbowRight,    JointType::WristRight),
    (JointType::WristRight,    JointType::HandRight),
    (JointType::SpineBase,     JointType::HipLeft),
    (JointType::HipLeft,       JointType::KneeLeft),
    (JointType::KneeLeft,      JointType::AnkleLeft),
    (JointType::AnkleLeft,     JointType::FootLeft),
    (JointType::SpineBase,     JointType::HipRight),
    (JointType::HipRight,      JointType::KneeRight),
    (JointType::KneeRight,     JointType::AnkleRight),
    (JointType::AnkleRight,    JointType::FootRight),
];

// ════════════════════════════════════════════════════════════════════════════
// Positions
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TrackingState {
    #[default]
    NotTracked,
    Inferred,
    Tracked,
}

/// What a hand is doing, as classified by the sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandState {
    #[default]
    Unknown,
    NotTracked,
    Open,
    Closed,
    /// Two fingers out, pointing.
    Lasso,
}

impl HandState {
    pub fn is_unknown(&self) -> bool { *self == HandState::Unknown }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorPoint {
    pub x: f32,
    pub y: f32,
}

/// A joint position on the output surface, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JointPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    #[serde(default)]
    pub camera: CameraPoint,
    #[serde(default)]
    pub color:  ColorPoint,
    /// A joint listed in a replay file is tracked unless it says otherwise.
    #[serde(default = "tracked")]
    pub state:  TrackingState,
}

fn tracked() -> TrackingState { TrackingState::Tracked }

impl Joint {
    /// A tracked joint at `color` with no camera-space depth.
    pub fn at(color: ColorPoint) -> Self {
        Joint { camera: CameraPoint::default(), color, state: TrackingState::Tracked }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Body / BodyFrame
// ════════════════════════════════════════════════════════════════════════════

/// One body slot.  Untracked slots still carry a (meaningless) joint table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BodyRecord", into = "BodyRecord")]
pub struct Body {
    pub tracked:    bool,
    pub joints:     [Joint; JOINT_COUNT],
    pub hand_left:  HandState,
    pub hand_right: HandState,
}

impl Body {
    pub fn joint(&self, joint: JointType) -> &Joint {
        &self.joints[joint.index()]
    }

    pub fn set_joint(&mut self, joint: JointType, value: Joint) {
        self.joints[joint.index()] = value;
    }

    /// Builder form of [`Body::set_joint`].
    pub fn with_joint(mut self, joint: JointType, value: Joint) -> Self {
        self.set_joint(joint, value);
        self
    }

    /// An empty tracked body (every joint untracked).
    pub fn tracked() -> Self {
        Body { tracked: true, ..Body::default() }
    }
}

/// Serialized shape of a [`Body`]: only the joints that were reported.
#[derive(Serialize, Deserialize)]
struct BodyRecord {
    #[serde(default)]
    tracked: bool,
    #[serde(default)]
    joints:  BTreeMap<JointType, Joint>,
    #[serde(default, skip_serializing_if = "HandState::is_unknown")]
    hand_left:  HandState,
    #[serde(default, skip_serializing_if = "HandState::is_unknown")]
    hand_right: HandState,
}

impl From<BodyRecord> for Body {
    fn from(r: BodyRecord) -> Self {
        let mut body = Body {
            tracked: r.tracked,
            hand_left: r.hand_left,
            hand_right: r.hand_right,
            ..Body::default()
        };
        for (ty, joint) in r.joints {
            body.set_joint(ty, joint);
        }
        body
    }
}

impl From<Body> for BodyRecord {
    fn from(b: Body) -> Self {
        let joints = JointType::ALL.iter()
            .filter(|ty| b.joint(**ty).state != TrackingState::NotTracked)
            .map(|ty| (*ty, *b.joint(*ty)))
            .collect();
        BodyRecord { tracked: b.tracked, joints, hand_left: b.hand_left, hand_right: b.hand_right }
    }
}

/// All body slots seen in one sensor frame.  A slot's index is its position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyFrame {
    pub bodies: Vec<Body>,
}

impl BodyFrame {
    pub fn new(bodies: Vec<Body>) -> Self { BodyFrame { bodies } }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
