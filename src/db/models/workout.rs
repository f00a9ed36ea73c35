use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workout::ExerciseSession;

/// A finished workout as stored. Never updated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub exercise_name: String,
    pub date: DateTime<Utc>,
    pub reps: u32,
    pub duration_secs: f64,
    pub calories_burned: f64,
    pub intensity: f64,
}

impl WorkoutRecord {
    pub fn from_session(session: &ExerciseSession, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise_name: session.exercise_name.clone(),
            date,
            reps: session.rep_count,
            duration_secs: session.elapsed_secs as f64,
            calories_burned: session.calories_burned,
            intensity: session.intensity,
        }
    }
}
