use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
};

use crate::{
    db::UserProfile,
    pose::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_FRAME_HEIGHT_M},
    recognizer::SquatPolicy,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkoutSettings {
    pub exercise_name: String,
    pub countdown_secs: u32,
    /// MET value used for calorie accrual.
    pub intensity_met: f64,
    /// Used when no profile has been saved yet.
    pub default_weight_kg: f64,
    /// Metres spanned by the full frame height, for the body height estimate.
    pub frame_height_m: f64,
    pub confidence_threshold: f64,
    pub squat_policy: SquatPolicy,
    /// Front camera preview is mirrored.
    pub mirrored: bool,
}

impl Default for WorkoutSettings {
    fn default() -> Self {
        Self {
            exercise_name: "Squat".into(),
            countdown_secs: 5,
            intensity_met: 3.5,
            default_weight_kg: 80.2,
            frame_height_m: DEFAULT_FRAME_HEIGHT_M,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            squat_policy: SquatPolicy::Gated,
            mirrored: true,
        }
    }
}

/// Everything a single workout needs, fixed for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutParams {
    pub exercise_name: String,
    pub countdown_secs: u32,
    pub intensity: f64,
    pub body_weight_kg: f64,
    pub frame_height_m: f64,
    pub confidence_threshold: f64,
    pub squat_policy: SquatPolicy,
}

impl WorkoutParams {
    /// Settings supply the defaults; a stored profile overrides body weight.
    pub fn resolve(settings: &WorkoutSettings, profile: Option<&UserProfile>) -> Self {
        let body_weight_kg = profile
            .map(|profile| profile.weight_kg)
            .unwrap_or(settings.default_weight_kg);

        Self {
            exercise_name: settings.exercise_name.clone(),
            countdown_secs: settings.countdown_secs,
            intensity: settings.intensity_met,
            body_weight_kg,
            frame_height_m: settings.frame_height_m,
            confidence_threshold: settings.confidence_threshold,
            squat_policy: settings.squat_policy,
        }
    }
}

impl Default for WorkoutParams {
    fn default() -> Self {
        Self::resolve(&WorkoutSettings::default(), None)
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<WorkoutSettings>,
}

impl SettingsStore {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable as settings.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring invalid settings at {}: {err}", path.display());
                WorkoutSettings::default()
            })
        } else {
            WorkoutSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn workout(&self) -> WorkoutSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_workout(&self, settings: WorkoutSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: WorkoutSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data;
        Ok(())
    }

    fn persist(&self, data: &WorkoutSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("fitfirst-settings-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let store = SettingsStore::new(scratch_path()).unwrap();
        let settings = store.workout();
        assert_eq!(settings.countdown_secs, 5);
        assert_eq!(settings.intensity_met, 3.5);
        assert_eq!(settings.default_weight_kg, 80.2);
        assert_eq!(settings.squat_policy, SquatPolicy::Gated);
    }

    #[test]
    fn updates_survive_reopen() {
        let path = scratch_path();
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_workout(WorkoutSettings {
                intensity_met: 5.0,
                squat_policy: SquatPolicy::Ungated,
                ..WorkoutSettings::default()
            })
            .unwrap();

        let reopened = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reopened.workout().intensity_met, 5.0);
        assert_eq!(reopened.workout().squat_policy, SquatPolicy::Ungated);

        fs::write(&path, r#"{ "mirrored": false }"#).unwrap();
        store.reload().unwrap();
        assert!(!store.workout().mirrored);
        assert_eq!(store.workout().intensity_met, 3.5);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn garbage_file_falls_back_and_partial_file_fills_defaults() {
        let path = scratch_path();
        fs::write(&path, "not json").unwrap();
        assert_eq!(SettingsStore::new(path.clone()).unwrap().workout(), WorkoutSettings::default());

        fs::write(&path, r#"{ "countdownSecs": 3 }"#).unwrap();
        let settings = SettingsStore::new(path.clone()).unwrap().workout();
        assert_eq!(settings.countdown_secs, 3);
        assert_eq!(settings.exercise_name, "Squat");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn profile_overrides_body_weight() {
        let profile = UserProfile::new(
            "Kai",
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            "Female",
            61.5,
            168.0,
            "kai@example.com",
            "555",
            Utc::now(),
        );
        let settings = WorkoutSettings::default();

        let params = WorkoutParams::resolve(&settings, Some(&profile));
        assert_eq!(params.body_weight_kg, 61.5);
        assert_eq!(params.intensity, 3.5);

        let params = WorkoutParams::resolve(&settings, None);
        assert_eq!(params.body_weight_kg, 80.2);
        assert_eq!(params.frame_height_m, 1.75);
    }
}
