use super::joint::{Joint, JointObservation};

/// Metres represented by one full normalized frame height. Assumes the person
/// stands at a distance where the frame spans roughly their own height.
pub const DEFAULT_FRAME_HEIGHT_M: f64 = 1.75;

/// Rough standing height from the nose-to-feet span.
pub fn estimate_body_height(obs: &JointObservation, frame_height_m: f64) -> Option<f64> {
    let [nose, left_ankle, right_ankle] =
        obs.require([Joint::Nose, Joint::LeftAnkle, Joint::RightAnkle])?;

    let foot_y = (left_ankle.y + right_ankle.y) / 2.0;
    Some((foot_y - nose.y) * frame_height_m)
}
