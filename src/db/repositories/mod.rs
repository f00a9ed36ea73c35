mod profiles;
mod workouts;
