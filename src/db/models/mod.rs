pub mod profile;
pub mod workout;

pub use profile::{ProfileUpdate, UserProfile};
pub use workout::WorkoutRecord;
