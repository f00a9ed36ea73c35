//! Per-exercise rep recognizers.
//!
//! Each recognizer owns its phase and counter and consumes the same filtered
//! [`JointObservation`] stream. Nothing here holds observable state for the
//! UI: every frame returns a [`FrameOutcome`] that the caller forwards.

pub mod arm_raise;
pub mod squat;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::pose::JointObservation;

pub use arm_raise::ArmRaiseRecognizer;
pub use squat::{SquatPhase, SquatPolicy, SquatRecognizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    /// Squat: top to bottom.
    Descended,
    /// Squat: bottom to top. Completes a rep.
    Ascended,
    /// Arm raise: wrists went above shoulders.
    Raised,
    /// Arm raise: wrists came back down. Completes a rep.
    Lowered,
}

impl Transition {
    pub fn completes_rep(&self) -> bool {
        matches!(self, Transition::Ascended | Transition::Lowered)
    }
}

/// Why a frame was not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    MissingJoints,
    LegsCrossed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutcome {
    pub joints: JointObservation,
    pub rep_count: u32,
    pub transition: Option<Transition>,
    pub skipped: Option<SkipReason>,
}

impl FrameOutcome {
    pub fn transition_occurred(&self) -> bool {
        self.transition.is_some()
    }
}

pub trait ExerciseRecognizer: Send {
    fn kind(&self) -> ExerciseKind;

    fn observe(&mut self, joints: &JointObservation) -> FrameOutcome;

    fn rep_count(&self) -> u32;

    /// Back to the initial phase with a zero count.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseKind {
    Squat,
    ArmRaise,
}

impl ExerciseKind {
    /// Case-insensitive; spaces, underscores and hyphens are ignored.
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "squat" | "squats" => Some(ExerciseKind::Squat),
            "armraise" | "armraises" => Some(ExerciseKind::ArmRaise),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squat",
            ExerciseKind::ArmRaise => "Arm Raise",
        }
    }
}

pub fn recognizer_for(name: &str, squat_policy: SquatPolicy) -> Result<Box<dyn ExerciseRecognizer>> {
    let Some(kind) = ExerciseKind::parse(name) else {
        bail!("no recognizer for exercise '{name}'");
    };

    Ok(match kind {
        ExerciseKind::Squat => Box::new(SquatRecognizer::new(squat_policy)),
        ExerciseKind::ArmRaise => Box::new(ArmRaiseRecognizer::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_loosely() {
        assert_eq!(ExerciseKind::parse("Squat"), Some(ExerciseKind::Squat));
        assert_eq!(ExerciseKind::parse("arm_raise"), Some(ExerciseKind::ArmRaise));
        assert_eq!(ExerciseKind::parse("Arm Raise"), Some(ExerciseKind::ArmRaise));
        assert_eq!(ExerciseKind::parse("lunges"), None);
    }

    #[test]
    fn unknown_exercise_is_an_error() {
        let err = recognizer_for("Push Ups", SquatPolicy::Gated).err().unwrap();
        assert!(err.to_string().contains("Push Ups"));
    }

    #[test]
    fn registry_builds_matching_recognizer() {
        let squat = recognizer_for("squat", SquatPolicy::Ungated).unwrap();
        assert_eq!(squat.kind(), ExerciseKind::Squat);
        assert_eq!(squat.rep_count(), 0);

        let arms = recognizer_for("ARM-RAISE", SquatPolicy::Gated).unwrap();
        assert_eq!(arms.kind(), ExerciseKind::ArmRaise);
    }
}
