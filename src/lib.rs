pub mod db;
pub mod metrics;
pub mod orientation;
pub mod pose;
pub mod recognizer;
pub mod settings;
pub mod utils;
pub mod workout;

use std::path::Path;

use anyhow::Result;
use log::info;

pub use db::{Database, ProfileUpdate, UserProfile, WorkoutRecord, WorkoutStore};
pub use orientation::Orientation;
pub use pose::{Frame, KeypointSource, RawPose};
pub use settings::{SettingsStore, WorkoutParams, WorkoutSettings};
pub use workout::{WorkoutController, WorkoutEnd, WorkoutEvent, WorkoutSnapshot};

/// Everything the host app holds on to for its lifetime.
pub struct App {
    pub db: Database,
    pub settings: SettingsStore,
    pub workouts: WorkoutController<Database>,
}

impl App {
    /// Open (or create) the store and settings under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self> {
        utils::logging::init_logging();
        info!("FitFirst starting up...");

        std::fs::create_dir_all(data_dir)?;

        let db = Database::new(data_dir.join("fitfirst.sqlite3"))?;
        let settings = SettingsStore::new(data_dir.join("settings.json"))?;
        let workouts = WorkoutController::new(std::sync::Arc::new(db.clone()));

        Ok(Self {
            db,
            settings,
            workouts,
        })
    }

    /// Current settings, with body weight taken from the saved profile.
    pub async fn workout_params(&self) -> Result<WorkoutParams> {
        let profile = self.db.primary_profile().await?;
        Ok(WorkoutParams::resolve(&self.settings.workout(), profile.as_ref()))
    }

    pub async fn start_workout(&self) -> Result<WorkoutSnapshot> {
        let params = self.workout_params().await?;
        self.workouts.start_workout(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[tokio::test]
    async fn opens_fresh_data_dir_and_uses_profile_weight() {
        let dir = std::env::temp_dir().join(format!("fitfirst-app-{}", uuid::Uuid::new_v4()));
        let app = App::open(&dir).unwrap();

        let params = app.workout_params().await.unwrap();
        assert_eq!(params.body_weight_kg, 80.2);
        assert_eq!(params.countdown_secs, 5);

        let profile = UserProfile::new(
            "Sam",
            NaiveDate::from_ymd_opt(1992, 6, 1).unwrap(),
            "Male",
            72.0,
            180.0,
            "sam@example.com",
            "555-0100",
            Utc::now(),
        );
        app.db.insert_profile(&profile).await.unwrap();

        let snapshot = app.start_workout().await.unwrap();
        assert_eq!(snapshot.session.body_weight_kg, 72.0);
        assert_eq!(snapshot.session.exercise_name, "Squat");

        let end = app.workouts.end_workout().await.unwrap();
        assert!(end.record.is_none());
        assert!(app.db.list_workouts().await.unwrap().is_empty());

        drop(app);
        let _ = std::fs::remove_dir_all(dir);
    }
}
