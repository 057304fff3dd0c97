use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("No frame available yet")]
    NoFrame,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {text}")]
    UnexpectedStatus { status: StatusCode, text: String },

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid frame size {0}x{1}")]
    InvalidFrameSize(u32, u32),

    #[error("Invalid API url: {0}")]
    InvalidUrl(String),

    #[error("Scanner is not running inside a tokio runtime")]
    NoRuntime,
}

impl ScanError {
    /// Failures that only cost the current tick. Anything else needs the caller's attention.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ScanError::NoFrame
                | ScanError::Request(_)
                | ScanError::UnexpectedStatus { .. }
                | ScanError::Json(_)
                | ScanError::Image(_)
        )
    }
}
