use serde::Serialize;

use super::joint::{Joint, JointObservation, Point};

/// Bone topology handed to the renderer.
pub const CONNECTIONS: [(Joint, Joint); 21] = [
    (Joint::LeftEye, Joint::RightEye),
    (Joint::LeftEye, Joint::LeftShoulder),
    (Joint::RightEye, Joint::RightShoulder),
    (Joint::LeftShoulder, Joint::LeftElbow),
    (Joint::LeftElbow, Joint::LeftWrist),
    (Joint::RightShoulder, Joint::RightElbow),
    (Joint::RightElbow, Joint::RightWrist),
    (Joint::LeftShoulder, Joint::LeftHip),
    (Joint::RightShoulder, Joint::RightHip),
    (Joint::LeftHip, Joint::RightHip),
    (Joint::LeftHip, Joint::LeftKnee),
    (Joint::LeftKnee, Joint::LeftAnkle),
    (Joint::RightHip, Joint::RightKnee),
    (Joint::RightKnee, Joint::RightAnkle),
    (Joint::Nose, Joint::LeftEye),
    (Joint::Nose, Joint::RightEye),
    (Joint::Nose, Joint::LeftEar),
    (Joint::Nose, Joint::RightEar),
    (Joint::Neck, Joint::LeftShoulder),
    (Joint::Neck, Joint::RightShoulder),
    (Joint::Neck, Joint::Nose),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Index into [`CONNECTIONS`]; renderers key their palette on it.
    pub index: usize,
    pub from: Point,
    pub to: Point,
}

/// Bones whose two endpoints are both present in this frame.
pub fn visible_segments(obs: &JointObservation) -> Vec<Segment> {
    CONNECTIONS
        .iter()
        .enumerate()
        .filter_map(|(index, (start, end))| {
            Some(Segment {
                index,
                from: obs.get(*start)?,
                to: obs.get(*end)?,
            })
        })
        .collect()
}

/// Map a normalized point into view pixels. Front camera feeds are mirrored.
pub fn to_view_point(point: Point, width: f64, height: f64, mirrored: bool) -> Point {
    let x = point.x * width;
    Point {
        x: if mirrored { width - x } else { x },
        y: point.y * height,
    }
}
