use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use super::joint::RawPose;

/// One captured video frame, opaque to this crate.
#[derive(Debug, Clone)]
pub struct Frame {
    pub timestamp_ms: u64,
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("no person in frame")]
    NoPerson,

    #[error("pose inference failed: {0}")]
    InferenceFailed(String),
}

/// The pose estimator. Runs off the session's state; one call in flight at a
/// time per instance.
pub trait KeypointSource: Send + Sync + 'static {
    fn detect(&self, frame: Frame) -> impl Future<Output = Result<RawPose, DetectorError>> + Send;
}
