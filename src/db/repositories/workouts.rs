use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_u32},
    models::WorkoutRecord,
};

const WORKOUT_COLUMNS: &str =
    "id, exercise_name, date, reps, duration_secs, calories_burned, intensity";

fn row_to_workout(row: &Row) -> Result<WorkoutRecord> {
    let date: String = row.get("date")?;
    let reps: i64 = row.get("reps")?;

    Ok(WorkoutRecord {
        id: row.get("id")?,
        exercise_name: row.get("exercise_name")?,
        date: parse_datetime(&date, "date")?,
        reps: to_u32(reps, "reps")?,
        duration_secs: row.get("duration_secs")?,
        calories_burned: row.get("calories_burned")?,
        intensity: row.get("intensity")?,
    })
}

impl Database {
    pub async fn insert_workout(&self, record: &WorkoutRecord) -> Result<()> {
        let record = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO workouts (id, exercise_name, date, reps, duration_secs, calories_burned, intensity, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.exercise_name,
                    record.date.to_rfc3339(),
                    i64::from(record.reps),
                    record.duration_secs,
                    record.calories_burned,
                    record.intensity,
                    Utc::now().to_rfc3339(),
                ],
            )
            .context("failed to insert workout")?;
            Ok(())
        })
        .await
    }

    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<WorkoutRecord>> {
        let workout_id = workout_id.to_string();
        self.execute(move |conn| {
            let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;

            stmt.query_row(params![workout_id], |row| Ok(row_to_workout(row)))
                .optional()?
                .transpose()
        })
        .await
    }

    /// Newest first.
    pub async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>> {
        self.execute(|conn| {
            let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts ORDER BY date DESC");
            let mut stmt = conn.prepare(&sql)?;

            let mut rows = stmt.query([])?;
            let mut workouts = Vec::new();
            while let Some(row) = rows.next()? {
                workouts.push(row_to_workout(row)?);
            }

            Ok(workouts)
        })
        .await
    }

    pub async fn list_workouts_paginated(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<WorkoutRecord>> {
        let limit = limit as i64;
        let offset = offset as i64;
        self.execute(move |conn| {
            let sql = format!(
                "SELECT {WORKOUT_COLUMNS} FROM workouts ORDER BY date DESC LIMIT ?1 OFFSET ?2"
            );
            let mut stmt = conn.prepare(&sql)?;

            let mut rows = stmt.query(params![limit, offset])?;
            let mut workouts = Vec::new();
            while let Some(row) = rows.next()? {
                workouts.push(row_to_workout(row)?);
            }

            Ok(workouts)
        })
        .await
    }

    /// Returns whether a row was removed.
    pub async fn delete_workout(&self, workout_id: &str) -> Result<bool> {
        let workout_id = workout_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM workouts WHERE id = ?1", params![workout_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(name: &str, reps: u32, minutes_after: i64) -> WorkoutRecord {
        WorkoutRecord {
            id: uuid::Uuid::new_v4().to_string(),
            exercise_name: name.into(),
            date: Utc.with_ymd_and_hms(2024, 9, 17, 8, 0, 0).unwrap()
                + Duration::minutes(minutes_after),
            reps,
            duration_secs: 60.0,
            calories_burned: 4.9,
            intensity: 3.5,
        }
    }

    #[tokio::test]
    async fn insert_then_get() {
        let db = Database::open_in_memory().unwrap();
        let workout = record("Squat", 10, 0);

        db.insert_workout(&workout).await.unwrap();
        let loaded = db.get_workout(&workout.id).await.unwrap();

        assert_eq!(loaded, Some(workout));
    }

    #[tokio::test]
    async fn missing_workout_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_workout("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_pages() {
        let db = Database::open_in_memory().unwrap();
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            db.insert_workout(&record(name, i as u32, i as i64)).await.unwrap();
        }

        let names: Vec<String> = db
            .list_workouts()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.exercise_name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);

        let page = db.list_workouts_paginated(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].exercise_name, "second");
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let db = Database::open_in_memory().unwrap();
        let workout = record("Squat", 3, 0);
        db.insert_workout(&workout).await.unwrap();
        assert!(db.insert_workout(&workout).await.is_err());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_went() {
        let db = Database::open_in_memory().unwrap();
        let workout = record("Squat", 3, 0);
        db.insert_workout(&workout).await.unwrap();

        assert!(db.delete_workout(&workout.id).await.unwrap());
        assert!(!db.delete_workout(&workout.id).await.unwrap());
        assert!(db.list_workouts().await.unwrap().is_empty());
    }
}
