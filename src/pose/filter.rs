use super::joint::{Joint, JointObservation, Point, RawPose};

/// Joints at or below this confidence are dropped.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.1;

/// Keep joints whose confidence is strictly above `threshold` and flip the
/// vertical axis so the origin sits at the top-left.
pub fn filter_joints(raw: &RawPose, threshold: f64) -> JointObservation {
    Joint::ALL
        .iter()
        .filter_map(|joint| {
            let detected = raw.get(joint)?;
            (detected.confidence > threshold)
                .then(|| (*joint, Point::new(detected.x, 1.0 - detected.y)))
        })
        .collect()
}
