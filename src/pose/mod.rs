pub mod filter;
pub mod height;
pub mod joint;
pub mod skeleton;
pub mod source;

pub use filter::{filter_joints, DEFAULT_CONFIDENCE_THRESHOLD};
pub use height::{estimate_body_height, DEFAULT_FRAME_HEIGHT_M};
pub use joint::{Joint, JointObservation, Point, RawJoint, RawPose};
pub use skeleton::{to_view_point, visible_segments, Segment, CONNECTIONS};
pub use source::{DetectorError, Frame, KeypointSource};
