use std::time::Duration;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use crate::common::{CapturedFrame, DetectionBatch, ScanConfig};
use crate::detection_runners::DetectionSource;
use crate::error::ScanError;

pub const PREDICT_ENDPOINT: &str = "predict";

/// Posts frames to the remote inference endpoint as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    http_client: Client,
    predict_url: String,
}

impl HttpDetector {
    pub fn new(config: &ScanConfig) -> Result<Self, ScanError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(http_client, &config.endpoint(PREDICT_ENDPOINT)))
    }

    pub fn with_client(http_client: Client, predict_url: &str) -> Self {
        Self {
            http_client,
            predict_url: predict_url.to_string(),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

/// Builds the `file` part the endpoint expects for a frame.
pub(crate) fn frame_part(frame: &CapturedFrame) -> Result<Part, ScanError> {
    Ok(Part::bytes(frame.bytes.clone())
        .file_name(frame.file_name.clone())
        .mime_str(&frame.mime)?)
}

/// Parses a `{"detections": [...]}` response body.
pub fn parse_detections(body: &str) -> Result<DetectionBatch, ScanError> {
    Ok(serde_json::from_str::<DetectionBatch>(body)?)
}

#[async_trait]
impl DetectionSource for HttpDetector {
    async fn detect(&self, frame: &CapturedFrame) -> Result<DetectionBatch, ScanError> {
        let form = Form::new().part("file", frame_part(frame)?);
        let response = self.http_client.post(&self.predict_url).multipart(form).send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ScanError::UnexpectedStatus { status, text });
        }
        parse_detections(&text)
    }

    fn name(&self) -> &str {
        &self.predict_url
    }
}
