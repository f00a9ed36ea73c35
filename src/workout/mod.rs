//! Workout lifecycle: countdown, live rep counting and the final record.

mod controller;
mod events;
mod frames;
mod state;

pub use controller::{WorkoutController, WorkoutEnd, WorkoutSnapshot};
pub use events::WorkoutEvent;
pub use frames::FrameSender;
pub use state::{ExerciseSession, TickEvent, WorkoutClock, WorkoutPhase};
