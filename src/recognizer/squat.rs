use serde::{Deserialize, Serialize};

use crate::pose::{Joint, JointObservation, Point};

use super::{ExerciseKind, ExerciseRecognizer, FrameOutcome, SkipReason, Transition};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

const LEG_JOINTS: [Joint; 4] = [
    Joint::LeftHip,
    Joint::RightHip,
    Joint::LeftKnee,
    Joint::RightKnee,
];

/// Which squat rules apply. The two behave differently on scissored legs,
/// so the choice is explicit configuration rather than a silent default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SquatPolicy {
    /// Also requires both ankles and ignores frames where the legs look
    /// crossed (left knee and left ankle both right of their partners).
    #[default]
    Gated,
    /// Hip and knee ordering only.
    Ungated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SquatPhase {
    #[default]
    Top,
    Bottom,
}

/// Counts squats from the vertical order of the hip and knee midpoints.
///
/// In top-down coordinates a standing person has knees below the hips
/// (`knee_y > hip_y`). A deep squat from a low camera brings the knee line
/// above the hip line (`knee_y < hip_y`). A rep is one Bottom to Top edge.
#[derive(Debug, Clone)]
pub struct SquatRecognizer {
    policy: SquatPolicy,
    phase: SquatPhase,
    reps: u32,
    legs_crossed: bool,
}

impl SquatRecognizer {
    pub fn new(policy: SquatPolicy) -> Self {
        Self {
            policy,
            phase: SquatPhase::Top,
            reps: 0,
            legs_crossed: false,
        }
    }

    pub fn policy(&self) -> SquatPolicy {
        self.policy
    }

    pub fn phase(&self) -> SquatPhase {
        self.phase
    }

    fn evaluate(&mut self, joints: &JointObservation) -> Result<Option<Transition>, SkipReason> {
        let [left_hip, right_hip, left_knee, right_knee] =
            joints.require(LEG_JOINTS).ok_or(SkipReason::MissingJoints)?;

        if self.policy == SquatPolicy::Gated {
            let [left_ankle, right_ankle] = joints
                .require([Joint::LeftAnkle, Joint::RightAnkle])
                .ok_or(SkipReason::MissingJoints)?;

            let crossed = legs_crossed(left_knee, right_knee, left_ankle, right_ankle);
            if crossed {
                if !self.legs_crossed {
                    log_warn!("legs crossed; keep feet apart and in line with the knees");
                }
                self.legs_crossed = true;
                return Err(SkipReason::LegsCrossed);
            }
            self.legs_crossed = false;
        }

        let hip_y = (left_hip.y + right_hip.y) / 2.0;
        let knee_y = (left_knee.y + right_knee.y) / 2.0;

        let transition = match self.phase {
            SquatPhase::Top if knee_y < hip_y => {
                self.phase = SquatPhase::Bottom;
                Some(Transition::Descended)
            }
            SquatPhase::Bottom if knee_y > hip_y => {
                self.phase = SquatPhase::Top;
                self.reps += 1;
                log_debug!("squat rep {}", self.reps);
                Some(Transition::Ascended)
            }
            _ => None,
        };

        Ok(transition)
    }
}

fn legs_crossed(left_knee: Point, right_knee: Point, left_ankle: Point, right_ankle: Point) -> bool {
    left_knee.x > right_knee.x && left_ankle.x > right_ankle.x
}

impl ExerciseRecognizer for SquatRecognizer {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Squat
    }

    fn observe(&mut self, joints: &JointObservation) -> FrameOutcome {
        let (transition, skipped) = match self.evaluate(joints) {
            Ok(transition) => (transition, None),
            Err(reason) => (None, Some(reason)),
        };

        FrameOutcome {
            joints: joints.clone(),
            rep_count: self.reps,
            transition,
            skipped,
        }
    }

    fn rep_count(&self) -> u32 {
        self.reps
    }

    fn reset(&mut self) {
        self.phase = SquatPhase::Top;
        self.reps = 0;
        self.legs_crossed = false;
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::pose::{Joint, JointObservation, Point};

    /// Legs-only frame. `knee_above_hip` picks bottom vs top; `crossed`
    /// swaps left and right x for both knees and ankles.
    pub fn legs(knee_above_hip: bool, crossed: bool) -> JointObservation {
        let hip_y = 0.6;
        let knee_y = if knee_above_hip { 0.5 } else { 0.75 };
        let (left_x, right_x) = if crossed { (0.6, 0.4) } else { (0.4, 0.6) };

        [
            (Joint::LeftHip, Point::new(0.42, hip_y)),
            (Joint::RightHip, Point::new(0.58, hip_y)),
            (Joint::LeftKnee, Point::new(left_x, knee_y)),
            (Joint::RightKnee, Point::new(right_x, knee_y)),
            (Joint::LeftAnkle, Point::new(left_x, 0.9)),
            (Joint::RightAnkle, Point::new(right_x, 0.9)),
        ]
        .into_iter()
        .collect()
    }

    pub fn top() -> JointObservation {
        legs(false, false)
    }

    pub fn bottom() -> JointObservation {
        legs(true, false)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{bottom, legs, top};
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn without(obs: JointObservation, joint: Joint) -> JointObservation {
        obs.iter().filter(|(j, _)| *j != joint).collect()
    }

    #[test]
    fn counts_each_full_cycle_once() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
        for _ in 0..4 {
            squat.observe(&top());
            squat.observe(&bottom());
            squat.observe(&bottom());
            squat.observe(&top());
        }
        assert_eq!(squat.rep_count(), 4);
        assert_eq!(squat.phase(), SquatPhase::Top);
    }

    #[test]
    fn rep_is_counted_on_the_way_up_only() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);

        let down = squat.observe(&bottom());
        assert_eq!(down.transition, Some(Transition::Descended));
        assert_eq!(down.rep_count, 0);

        let up = squat.observe(&top());
        assert_eq!(up.transition, Some(Transition::Ascended));
        assert_eq!(up.rep_count, 1);
        assert!(up.transition_occurred());
    }

    #[test]
    fn standing_from_start_counts_nothing() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
        for _ in 0..10 {
            let outcome = squat.observe(&top());
            assert_eq!(outcome.transition, None);
        }
        assert_eq!(squat.rep_count(), 0);
    }

    #[test]
    fn crossed_legs_block_transitions() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);

        let outcome = squat.observe(&legs(true, true));
        assert_eq!(outcome.skipped, Some(SkipReason::LegsCrossed));
        assert_eq!(outcome.transition, None);
        assert_eq!(squat.phase(), SquatPhase::Top);

        squat.observe(&bottom());
        let outcome = squat.observe(&legs(false, true));
        assert_eq!(outcome.skipped, Some(SkipReason::LegsCrossed));
        assert_eq!(squat.phase(), SquatPhase::Bottom);
        assert_eq!(squat.rep_count(), 0);
    }

    #[test]
    fn ungated_policy_ignores_crossing_and_ankles() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Ungated);
        squat.observe(&legs(true, true));
        let outcome = squat.observe(&without(legs(false, true), Joint::LeftAnkle));
        assert_eq!(outcome.skipped, None);
        assert_eq!(squat.rep_count(), 1);
    }

    #[test]
    fn gated_policy_needs_ankles() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
        let outcome = squat.observe(&without(bottom(), Joint::RightAnkle));
        assert_eq!(outcome.skipped, Some(SkipReason::MissingJoints));
        assert_eq!(squat.phase(), SquatPhase::Top);
    }

    #[test]
    fn missing_hip_or_knee_holds_state() {
        for joint in LEG_JOINTS {
            let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
            squat.observe(&bottom());

            let outcome = squat.observe(&without(top(), joint));
            assert_eq!(outcome.skipped, Some(SkipReason::MissingJoints));
            assert_eq!(outcome.transition, None);
            assert_eq!(squat.phase(), SquatPhase::Bottom);
            assert_eq!(squat.rep_count(), 0);
        }
    }

    #[test]
    fn level_knees_and_hips_do_nothing() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Ungated);
        let level: JointObservation = top()
            .iter()
            .map(|(joint, point)| (joint, Point::new(point.x, 0.6)))
            .collect();

        assert_eq!(squat.observe(&level).transition, None);
        squat.observe(&bottom());
        assert_eq!(squat.observe(&level).transition, None);
        assert_eq!(squat.rep_count(), 0);
    }

    #[test]
    fn reset_returns_to_top_with_zero_reps() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
        squat.observe(&bottom());
        squat.observe(&top());
        squat.observe(&bottom());
        squat.reset();
        assert_eq!(squat.rep_count(), 0);
        assert_eq!(squat.phase(), SquatPhase::Top);
    }

    #[test]
    fn random_streams_never_decrease_the_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
        let mut previous = 0;
        let mut ascents = 0;

        for _ in 0..5_000 {
            let mut frame = legs(rng.gen_bool(0.5), rng.gen_bool(0.2));
            if rng.gen_bool(0.1) {
                frame = without(frame, LEG_JOINTS[rng.gen_range(0..LEG_JOINTS.len())]);
            }

            let outcome = squat.observe(&frame);
            assert!(outcome.rep_count >= previous);
            assert!(outcome.rep_count - previous <= 1);
            if outcome.transition == Some(Transition::Ascended) {
                ascents += 1;
                assert_eq!(outcome.rep_count, previous + 1);
            } else {
                assert_eq!(outcome.rep_count, previous);
            }
            previous = outcome.rep_count;
        }

        assert_eq!(squat.rep_count(), ascents);
    }

    #[test]
    fn crossed_fourth_cycle_is_not_counted_until_uncrossed() {
        let mut squat = SquatRecognizer::new(SquatPolicy::Gated);
        for _ in 0..3 {
            squat.observe(&top());
            squat.observe(&bottom());
            squat.observe(&top());
        }
        assert_eq!(squat.rep_count(), 3);

        squat.observe(&legs(true, true));
        squat.observe(&legs(false, true));
        assert_eq!(squat.rep_count(), 3);

        squat.observe(&bottom());
        squat.observe(&top());
        assert_eq!(squat.rep_count(), 4);
    }
}
