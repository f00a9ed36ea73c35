use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Anatomical landmarks reported by the pose estimator (18 total).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    Neck,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    pub const ALL: [Joint; 18] = [
        Joint::Nose,
        Joint::Neck,
        Joint::LeftEye,
        Joint::RightEye,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::Neck => "neck",
            Joint::LeftEye => "left_eye",
            Joint::RightEye => "right_eye",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
        }
    }
}

/// Normalized 2D position. Origin is top-left once it has been through the filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single joint as produced by the estimator, before filtering.
/// Coordinates are bottom-up normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawJoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

/// Everything the estimator returned for one frame.
pub type RawPose = HashMap<Joint, RawJoint>;

/// Filtered joints for one frame. Joints below the confidence threshold are
/// absent rather than present with a default position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JointObservation {
    points: HashMap<Joint, Point>,
}

impl JointObservation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, joint: Joint, point: Point) {
        self.points.insert(joint, point);
    }

    pub fn get(&self, joint: Joint) -> Option<Point> {
        self.points.get(&joint).copied()
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.points.contains_key(&joint)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Joints in declaration order, for stable rendering.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, Point)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(move |joint| self.get(*joint).map(|point| (*joint, point)))
    }

    /// Fetch a fixed set of joints; `None` if any one of them is missing.
    pub fn require<const N: usize>(&self, joints: [Joint; N]) -> Option<[Point; N]> {
        let mut out = [Point::new(0.0, 0.0); N];
        for (slot, joint) in out.iter_mut().zip(joints) {
            *slot = self.get(joint)?;
        }
        Some(out)
    }
}

impl FromIterator<(Joint, Point)> for JointObservation {
    fn from_iter<I: IntoIterator<Item = (Joint, Point)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
