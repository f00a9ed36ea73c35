use anyhow::{bail, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{format_date, parse_date, parse_datetime},
    models::UserProfile,
};

const PROFILE_COLUMNS: &str = "id, name, date_of_birth, sex, weight_kg, height_cm, email, phone_number, profile_picture, created_at, updated_at";

fn row_to_profile(row: &Row) -> Result<UserProfile> {
    let date_of_birth: String = row.get("date_of_birth")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(UserProfile {
        id: row.get("id")?,
        name: row.get("name")?,
        date_of_birth: parse_date(&date_of_birth, "date_of_birth")?,
        sex: row.get("sex")?,
        weight_kg: row.get("weight_kg")?,
        height_cm: row.get("height_cm")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
        profile_picture: row.get("profile_picture")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_profile(&self, profile: &UserProfile) -> Result<()> {
        let record = profile.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO user_profiles (id, name, date_of_birth, sex, weight_kg, height_cm, email, phone_number, profile_picture, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    record.id,
                    record.name,
                    format_date(record.date_of_birth),
                    record.sex,
                    record.weight_kg,
                    record.height_cm,
                    record.email,
                    record.phone_number,
                    record.profile_picture,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    /// Overwrite every editable column of an existing profile.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<()> {
        let record = profile.clone();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE user_profiles
                 SET name = ?1,
                     date_of_birth = ?2,
                     sex = ?3,
                     weight_kg = ?4,
                     height_cm = ?5,
                     email = ?6,
                     phone_number = ?7,
                     profile_picture = ?8,
                     updated_at = ?9
                 WHERE id = ?10",
                params![
                    record.name,
                    format_date(record.date_of_birth),
                    record.sex,
                    record.weight_kg,
                    record.height_cm,
                    record.email,
                    record.phone_number,
                    record.profile_picture,
                    record.updated_at.to_rfc3339(),
                    record.id,
                ],
            )?;

            if rows_affected == 0 {
                bail!("Profile not found");
            }

            Ok(())
        })
        .await
    }

    pub async fn get_profile(&self, profile_id: &str) -> Result<Option<UserProfile>> {
        let profile_id = profile_id.to_string();
        self.execute(move |conn| {
            let sql = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = ?1");
            let mut stmt = conn.prepare(&sql)?;

            stmt.query_row(params![profile_id], |row| Ok(row_to_profile(row)))
                .optional()?
                .transpose()
        })
        .await
    }

    /// The installation's profile. Nothing stops several rows existing, so
    /// the oldest one wins.
    pub async fn primary_profile(&self) -> Result<Option<UserProfile>> {
        self.execute(|conn| {
            let sql = format!(
                "SELECT {PROFILE_COLUMNS} FROM user_profiles ORDER BY created_at ASC LIMIT 1"
            );
            let mut stmt = conn.prepare(&sql)?;

            stmt.query_row([], |row| Ok(row_to_profile(row)))
                .optional()?
                .transpose()
        })
        .await
    }

    pub async fn delete_profile(&self, profile_id: &str) -> Result<bool> {
        let profile_id = profile_id.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM user_profiles WHERE id = ?1", params![profile_id])?;
            Ok(rows_affected > 0)
        })
        .await
    }
}
