use serde::{Deserialize, Serialize};

/// Device orientation as reported by the host. Passed in explicitly on
/// change; nothing here listens for platform notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    /// Face up, face down, or not yet known.
    Unknown,
}

impl Orientation {
    /// Rotation the capture connection needs for upright frames.
    pub fn rotation_degrees(&self) -> u16 {
        match self {
            Orientation::LandscapeLeft => 180,
            Orientation::LandscapeRight => 0,
            Orientation::PortraitUpsideDown => 270,
            Orientation::Portrait | Orientation::Unknown => 90,
        }
    }
}
