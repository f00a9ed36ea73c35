use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub email: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted from the edit form. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub sex: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<Vec<u8>>,
}

impl UserProfile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        sex: impl Into<String>,
        weight_kg: f64,
        height_cm: f64,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            date_of_birth,
            sex: sex.into(),
            weight_kg,
            height_cm,
            email: email.into(),
            phone_number: phone_number.into(),
            profile_picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole years between birth and `today`; zero for future birth dates.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let dob = self.date_of_birth;
        let mut years = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    pub fn age(&self) -> u32 {
        self.age_on(Utc::now().date_naive())
    }

    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        let ProfileUpdate {
            name,
            date_of_birth,
            sex,
            weight_kg,
            height_cm,
            email,
            phone_number,
            profile_picture,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(date_of_birth) = date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(sex) = sex {
            self.sex = sex;
        }
        if let Some(weight_kg) = weight_kg {
            self.weight_kg = weight_kg;
        }
        if let Some(height_cm) = height_cm {
            self.height_cm = height_cm;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = phone_number;
        }
        if profile_picture.is_some() {
            self.profile_picture = profile_picture;
        }
        self.updated_at = now;
    }
}
