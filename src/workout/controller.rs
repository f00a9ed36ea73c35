use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use log::{error, info};
use serde::Serialize;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{self, Duration, Instant},
};

use crate::{
    db::{WorkoutRecord, WorkoutStore},
    metrics::format_calories,
    orientation::Orientation,
    pose::{estimate_body_height, filter_joints, KeypointSource, RawPose},
    recognizer::{recognizer_for, ExerciseRecognizer, FrameOutcome},
    settings::WorkoutParams,
    utils::logging::debug_mode,
};

use super::{
    events::WorkoutEvent,
    frames::{FramePump, FrameSender},
    state::{ExerciseSession, TickEvent, WorkoutClock, WorkoutPhase},
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_debug;

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSnapshot {
    pub phase: WorkoutPhase,
    pub session: ExerciseSession,
    pub orientation: Orientation,
}

/// Result of ending a workout. `record` is `None` when the workout ended
/// before its countdown finished; `persisted` carries any store failure.
#[derive(Debug)]
pub struct WorkoutEnd {
    pub record: Option<WorkoutRecord>,
    pub persisted: Result<()>,
}

impl WorkoutEnd {
    pub fn is_saved(&self) -> bool {
        self.record.is_some() && self.persisted.is_ok()
    }
}

struct ActiveWorkout {
    params: WorkoutParams,
    clock: WorkoutClock,
    recognizer: Box<dyn ExerciseRecognizer>,
}

#[derive(Default)]
struct ControllerState {
    workout: Option<ActiveWorkout>,
    orientation: Orientation,
}

pub struct WorkoutController<S: WorkoutStore> {
    state: Arc<Mutex<ControllerState>>,
    store: Arc<S>,
    events: broadcast::Sender<WorkoutEvent>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    frames: Arc<Mutex<FramePump>>,
    tick_interval: Duration,
    heartbeat_every_ticks: u32,
}

impl<S: WorkoutStore> Clone for WorkoutController<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            store: self.store.clone(),
            events: self.events.clone(),
            ticker: self.ticker.clone(),
            frames: self.frames.clone(),
            tick_interval: self.tick_interval,
            heartbeat_every_ticks: self.heartbeat_every_ticks,
        }
    }
}

impl<S: WorkoutStore> WorkoutController<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            state: Arc::new(Mutex::new(ControllerState::default())),
            store,
            events,
            ticker: Arc::new(Mutex::new(None)),
            frames: Arc::new(Mutex::new(FramePump::new())),
            tick_interval: Duration::from_secs(1),
            heartbeat_every_ticks: if debug_mode() { 1 } else { 10 },
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkoutEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Option<WorkoutSnapshot> {
        let state = self.state.lock().await;
        let workout = state.workout.as_ref()?;
        Some(WorkoutSnapshot {
            phase: workout.clock.phase(),
            session: workout.clock.snapshot(),
            orientation: state.orientation,
        })
    }

    pub async fn orientation(&self) -> Orientation {
        self.state.lock().await.orientation
    }

    pub async fn start_workout(&self, params: WorkoutParams) -> Result<WorkoutSnapshot> {
        let recognizer = recognizer_for(&params.exercise_name, params.squat_policy)?;

        let snapshot = {
            let mut state = self.state.lock().await;
            if state.workout.is_some() {
                bail!("workout already active");
            }

            info!(
                "Starting {} workout: {}s countdown, {} MET, {} kg",
                params.exercise_name, params.countdown_secs, params.intensity, params.body_weight_kg
            );

            let clock = WorkoutClock::new(&params);
            let snapshot = WorkoutSnapshot {
                phase: clock.phase(),
                session: clock.snapshot(),
                orientation: state.orientation,
            };
            state.workout = Some(ActiveWorkout {
                params,
                clock,
                recognizer,
            });
            snapshot
        };

        self.spawn_ticker().await;
        Ok(snapshot)
    }

    /// Run `source` on a background task for the rest of the workout. Frames
    /// go in through the returned sender.
    pub async fn attach_source<K: KeypointSource>(&self, source: K) -> Result<FrameSender> {
        if self.state.lock().await.workout.is_none() {
            bail!("no active workout to attach a keypoint source to");
        }

        let state = self.state.clone();
        let events = self.events.clone();
        self.frames.lock().await.start(source, move |pose| {
            let state = state.clone();
            let events = events.clone();
            async move {
                handle_pose(&state, &events, &pose).await;
            }
        })
    }

    /// Feed one estimator result directly. Returns the outcome only while
    /// the workout is running.
    pub async fn process_pose(&self, raw: &RawPose) -> Option<FrameOutcome> {
        handle_pose(&self.state, &self.events, raw).await
    }

    pub async fn set_orientation(&self, orientation: Orientation) {
        {
            let mut state = self.state.lock().await;
            if state.orientation == orientation {
                return;
            }
            state.orientation = orientation;
        }

        self.emit(WorkoutEvent::OrientationChanged {
            orientation,
            rotation_degrees: orientation.rotation_degrees(),
        });
    }

    pub async fn end_workout(&self) -> Result<WorkoutEnd> {
        let session = {
            let mut state = self.state.lock().await;
            let mut workout = state
                .workout
                .take()
                .ok_or_else(|| anyhow!("no active workout to end"))?;
            workout.clock.end()
        };

        self.cancel_ticker().await;
        if let Err(err) = self.frames.lock().await.stop().await {
            error!("Failed to stop frame pump: {err:#}");
        }

        let Some(session) = session else {
            info!("Workout ended during countdown; nothing to save");
            self.emit(WorkoutEvent::Ended { record: None });
            return Ok(WorkoutEnd {
                record: None,
                persisted: Ok(()),
            });
        };

        let record = WorkoutRecord::from_session(&session, Utc::now());
        let persisted = self.store.save_workout(&record).await;

        match &persisted {
            Ok(()) => {
                info!(
                    "Saved workout {}: {} reps in {}s, {}",
                    record.id,
                    record.reps,
                    session.elapsed_secs,
                    format_calories(record.calories_burned)
                );
                self.emit(WorkoutEvent::Ended {
                    record: Some(record.clone()),
                });
            }
            Err(err) => {
                error!("Failed to save workout {}: {err:#}", record.id);
                self.emit(WorkoutEvent::SaveFailed {
                    record: record.clone(),
                    error: format!("{err:#}"),
                });
            }
        }

        Ok(WorkoutEnd {
            record: Some(record),
            persisted,
        })
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let events = self.events.clone();
        let tick_interval = self.tick_interval;
        let heartbeat_every = self.heartbeat_every_ticks;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + tick_interval, tick_interval);
            let mut ticks: u32 = 0;
            loop {
                interval.tick().await;

                let (tick, session) = {
                    let mut guard = state.lock().await;
                    let Some(workout) = guard.workout.as_mut() else {
                        break;
                    };
                    (workout.clock.tick(), workout.clock.snapshot())
                };

                let event = match tick {
                    TickEvent::Countdown { remaining } => WorkoutEvent::CountdownTick { remaining },
                    TickEvent::Started => WorkoutEvent::Started {
                        exercise_name: session.exercise_name.clone(),
                    },
                    TickEvent::Elapsed {
                        elapsed_secs,
                        calories_burned,
                    } => WorkoutEvent::Tick {
                        elapsed_secs,
                        calories_burned,
                        calories_label: format_calories(calories_burned),
                    },
                    TickEvent::Idle => break,
                };
                let _ = events.send(event);

                ticks = ticks.wrapping_add(1);
                if ticks % heartbeat_every == 0 {
                    log_debug!(
                        "workout heartbeat: {}s, {} reps, {:.2} cal",
                        session.elapsed_secs,
                        session.rep_count,
                        session.calories_burned
                    );
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    fn emit(&self, event: WorkoutEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

async fn handle_pose(
    state: &Mutex<ControllerState>,
    events: &broadcast::Sender<WorkoutEvent>,
    raw: &RawPose,
) -> Option<FrameOutcome> {
    let (event, outcome) = {
        let mut guard = state.lock().await;
        let workout = guard.workout.as_mut()?;
        let joints = filter_joints(raw, workout.params.confidence_threshold);

        if workout.clock.is_running() {
            let outcome = workout.recognizer.observe(&joints);
            workout.clock.record_reps(outcome.rep_count);
            let estimated_height_m = estimate_body_height(&outcome.joints, workout.params.frame_height_m);
            let event = WorkoutEvent::Frame {
                outcome: outcome.clone(),
                estimated_height_m,
            };
            (event, Some(outcome))
        } else {
            (WorkoutEvent::Preview { joints }, None)
        }
    };

    let _ = events.send(event);
    outcome
}
