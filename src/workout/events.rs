use serde::Serialize;

use crate::{
    db::WorkoutRecord, orientation::Orientation, pose::JointObservation,
    recognizer::FrameOutcome,
};

/// Everything the UI layer needs, pushed one way. Subscribers get these
/// from [`super::WorkoutController::subscribe`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WorkoutEvent {
    CountdownTick {
        remaining: u32,
    },
    Started {
        exercise_name: String,
    },
    Tick {
        elapsed_secs: u64,
        calories_burned: f64,
        calories_label: String,
    },
    /// Joints seen before the workout started; draw them, count nothing.
    Preview {
        joints: JointObservation,
    },
    Frame {
        outcome: FrameOutcome,
        estimated_height_m: Option<f64>,
    },
    OrientationChanged {
        orientation: Orientation,
        rotation_degrees: u16,
    },
    Ended {
        record: Option<WorkoutRecord>,
    },
    SaveFailed {
        record: WorkoutRecord,
        error: String,
    },
}
