use std::future::Future;

use anyhow::Result;

use super::{connection::Database, models::WorkoutRecord};

/// Where finished workouts go. The SQLite [`Database`] is the production
/// implementation; the seam lets the session controller run against
/// anything that can take a record.
pub trait WorkoutStore: Send + Sync + 'static {
    fn save_workout(&self, record: &WorkoutRecord) -> impl Future<Output = Result<()>> + Send;
}

impl WorkoutStore for Database {
    fn save_workout(&self, record: &WorkoutRecord) -> impl Future<Output = Result<()>> + Send {
        self.insert_workout(record)
    }
}
