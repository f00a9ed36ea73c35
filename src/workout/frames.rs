use std::future::Future;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use anyhow::{bail, Context, Result};
use log::info;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
    time::Duration,
};
use tokio_util::sync::CancellationToken;

use crate::pose::{Frame, KeypointSource, RawPose};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

const DETECT_TIMEOUT_SECS: u64 = 2;

/// Camera-side handle. Offers frames to the detector without ever waiting:
/// a frame that arrives while the previous one is still being analysed is
/// dropped.
#[derive(Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<Frame>,
    busy: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
}

impl FrameSender {
    /// Returns whether the frame was taken.
    pub fn offer(&self, frame: Frame) -> bool {
        if self.busy.swap(true, Ordering::AcqRel) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Closed(_)) => {
                self.busy.store(false, Ordering::Release);
                false
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

pub(crate) struct FramePump {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl FramePump {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn the detection task. Every pose the source produces is handed to
    /// `deliver`, one at a time, in frame order.
    pub fn start<K, F, Fut>(&mut self, source: K, deliver: F) -> Result<FrameSender>
    where
        K: KeypointSource,
        F: FnMut(RawPose) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.handle.is_some() {
            bail!("frame pump already active");
        }

        let (tx, rx) = mpsc::channel(1);
        let busy = Arc::new(AtomicBool::new(false));
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(frame_loop(
            source,
            rx,
            busy.clone(),
            cancel_token.clone(),
            deliver,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        info!("Frame pump started");

        Ok(FrameSender {
            tx,
            busy,
            dropped: Arc::new(AtomicU64::new(0)),
        })
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("frame pump task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}

async fn frame_loop<K, F, Fut>(
    source: K,
    mut rx: mpsc::Receiver<Frame>,
    busy: Arc<AtomicBool>,
    cancel_token: CancellationToken,
    mut deliver: F,
) where
    K: KeypointSource,
    F: FnMut(RawPose) -> Fut + Send,
    Fut: Future<Output = ()> + Send,
{
    loop {
        let frame = tokio::select! {
            frame = rx.recv() => match frame {
                Some(frame) => frame,
                None => break,
            },
            _ = cancel_token.cancelled() => break,
        };
        let timestamp_ms = frame.timestamp_ms;

        let detected = tokio::select! {
            result = tokio::time::timeout(Duration::from_secs(DETECT_TIMEOUT_SECS), source.detect(frame)) => result,
            _ = cancel_token.cancelled() => break,
        };

        match detected {
            Ok(Ok(pose)) => deliver(pose).await,
            Ok(Err(err)) => log_debug!("skipping frame {timestamp_ms}: {err}"),
            Err(_) => log_warn!(
                "pose detection timeout (> {}s) on frame {timestamp_ms}",
                DETECT_TIMEOUT_SECS
            ),
        }

        busy.store(false, Ordering::Release);
    }

    log_info!("frame pump shutting down");
}
