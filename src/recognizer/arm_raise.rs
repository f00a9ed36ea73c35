use crate::pose::{Joint, JointObservation};

use super::{ExerciseKind, ExerciseRecognizer, FrameOutcome, SkipReason, Transition};

const ARM_JOINTS: [Joint; 4] = [
    Joint::LeftWrist,
    Joint::RightWrist,
    Joint::LeftShoulder,
    Joint::RightShoulder,
];

/// Both wrists above their shoulders. A rep is a raise followed by a lower.
#[derive(Debug, Clone, Default)]
pub struct ArmRaiseRecognizer {
    raised: bool,
    reps: u32,
}

impl ArmRaiseRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raised(&self) -> bool {
        self.raised
    }
}

/// The raw signal for one frame, `None` when a wrist or shoulder is missing.
pub fn arms_raised(joints: &JointObservation) -> Option<bool> {
    let [left_wrist, right_wrist, left_shoulder, right_shoulder] = joints.require(ARM_JOINTS)?;
    Some(left_wrist.y < left_shoulder.y && right_wrist.y < right_shoulder.y)
}

impl ExerciseRecognizer for ArmRaiseRecognizer {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::ArmRaise
    }

    fn observe(&mut self, joints: &JointObservation) -> FrameOutcome {
        let Some(raised) = arms_raised(joints) else {
            return FrameOutcome {
                joints: joints.clone(),
                rep_count: self.reps,
                transition: None,
                skipped: Some(SkipReason::MissingJoints),
            };
        };

        let transition = match (self.raised, raised) {
            (false, true) => Some(Transition::Raised),
            (true, false) => {
                self.reps += 1;
                Some(Transition::Lowered)
            }
            _ => None,
        };
        self.raised = raised;

        FrameOutcome {
            joints: joints.clone(),
            rep_count: self.reps,
            transition,
            skipped: None,
        }
    }

    fn rep_count(&self) -> u32 {
        self.reps
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
