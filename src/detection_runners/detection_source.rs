use std::sync::Arc;
use async_trait::async_trait;
use crate::common::{CapturedFrame, DetectionBatch};
use crate::error::ScanError;

/// Anything that turns one captured frame into a batch of detections.
#[async_trait]
pub trait DetectionSource: Send + Sync {
    /// Analyzes `frame`. Every error is treated by the scan loop as a dropped tick.
    async fn detect(&self, frame: &CapturedFrame) -> Result<DetectionBatch, ScanError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "detector"
    }
}

#[async_trait]
impl<T: DetectionSource + ?Sized> DetectionSource for Arc<T> {
    async fn detect(&self, frame: &CapturedFrame) -> Result<DetectionBatch, ScanError> {
        (**self).detect(frame).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
