use serde::{Deserialize, Serialize};

use crate::{metrics::CalorieAccumulator, settings::WorkoutParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum WorkoutPhase {
    Countdown { remaining: u32 },
    Running,
    Ended,
}

/// Totals of one exercise attempt, from the end of the countdown onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSession {
    pub exercise_name: String,
    pub rep_count: u32,
    pub elapsed_secs: u64,
    pub calories_burned: f64,
    pub intensity: f64,
    pub body_weight_kg: f64,
}

/// What one tick of the clock did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickEvent {
    Countdown { remaining: u32 },
    Started,
    Elapsed { elapsed_secs: u64, calories_burned: f64 },
    /// Clock already ended; nothing happened.
    Idle,
}

/// Logical one-second clock for a workout.
///
/// Counts down from `countdown_secs` to zero one tick at a time; the tick
/// after reaching zero starts the workout. While running, every tick adds a
/// second and that second's calories. Nothing here reads wall time, so the
/// owner decides what a tick is.
#[derive(Debug, Clone)]
pub struct WorkoutClock {
    phase: WorkoutPhase,
    exercise_name: String,
    elapsed_secs: u64,
    rep_count: u32,
    calories: CalorieAccumulator,
}

impl WorkoutClock {
    pub fn new(params: &WorkoutParams) -> Self {
        Self {
            phase: WorkoutPhase::Countdown {
                remaining: params.countdown_secs,
            },
            exercise_name: params.exercise_name.clone(),
            elapsed_secs: 0,
            rep_count: 0,
            calories: CalorieAccumulator::new(params.intensity, params.body_weight_kg),
        }
    }

    pub fn phase(&self) -> WorkoutPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == WorkoutPhase::Running
    }

    pub fn tick(&mut self) -> TickEvent {
        match self.phase {
            WorkoutPhase::Countdown { remaining } if remaining > 0 => {
                let remaining = remaining - 1;
                self.phase = WorkoutPhase::Countdown { remaining };
                TickEvent::Countdown { remaining }
            }
            WorkoutPhase::Countdown { .. } => {
                self.phase = WorkoutPhase::Running;
                TickEvent::Started
            }
            WorkoutPhase::Running => {
                self.elapsed_secs += 1;
                let calories_burned = self.calories.tick();
                TickEvent::Elapsed {
                    elapsed_secs: self.elapsed_secs,
                    calories_burned,
                }
            }
            WorkoutPhase::Ended => TickEvent::Idle,
        }
    }

    /// Take the recognizer's count. Ignored unless running, and never lowers
    /// the stored count.
    pub fn record_reps(&mut self, rep_count: u32) -> bool {
        if !self.is_running() || rep_count <= self.rep_count {
            return false;
        }
        self.rep_count = rep_count;
        true
    }

    pub fn snapshot(&self) -> ExerciseSession {
        ExerciseSession {
            exercise_name: self.exercise_name.clone(),
            rep_count: self.rep_count,
            elapsed_secs: self.elapsed_secs,
            calories_burned: self.calories.calories_burned(),
            intensity: self.calories.intensity(),
            body_weight_kg: self.calories.body_weight_kg(),
        }
    }

    /// Stop the clock. Yields the session the first time, and only if the
    /// countdown had finished.
    pub fn end(&mut self) -> Option<ExerciseSession> {
        let previous = std::mem::replace(&mut self.phase, WorkoutPhase::Ended);
        match previous {
            WorkoutPhase::Running => Some(self.snapshot()),
            WorkoutPhase::Countdown { .. } | WorkoutPhase::Ended => None,
        }
    }
}
