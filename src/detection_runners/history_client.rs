use std::time::Duration;
use reqwest::multipart::Form;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use crate::common::{CapturedFrame, DetectionBatch, ScanConfig};
use crate::data::{CompanyHistoryFilter, SavedScan, ScanEvent, ScanEvents, ScanOwner, ScanRecord};
use crate::detection_runners::http_detector::frame_part;
use crate::error::ScanError;

pub const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Default, Deserialize)]
struct HistoryPage {
    #[serde(default)]
    history: Vec<ScanRecord>,
}

/// Client for the remote scan history store.
///
/// Successful saves and deletes are announced on the attached [`ScanEvents`] bus.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    http_client: Client,
    base_url: Url,
    events: ScanEvents,
}

impl HistoryClient {
    pub fn new(config: &ScanConfig, events: ScanEvents) -> Result<Self, ScanError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.request_timeout())
            .build()?;
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ScanError::InvalidUrl(config.api_base_url.clone()));
        }
        Ok(Self {
            http_client,
            base_url,
            events,
        })
    }

    pub fn events(&self) -> &ScanEvents {
        &self.events
    }

    /// Appends `segments` to the base url, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ScanError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScanError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Saves a scan: the frame, its detections and a Clean/Attention status.
    ///
    /// # Errors
    /// * If the POST request can't be made or its body can't be read.
    /// * If the store answers with a non-2xx status.
    pub async fn save_scan(&self, token: &str, frame: &CapturedFrame, batch: &DetectionBatch,
                           owner: &ScanOwner) -> Result<SavedScan, ScanError> {
        let form = Form::new()
            .part("file", frame_part(frame)?)
            .text("detections", serde_json::to_string(&batch.detections)?)
            .text("status", batch.status().to_string())
            .text("user_id", owner.user_id.clone())
            .text("user_email", owner.user_email.clone());

        let response = self.http_client
            .post(self.url(&["save_scan"])?)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let saved: SavedScan = serde_json::from_str(&success_text(response).await?)?;

        log::info!("Scan {} saved ({} detection(s), {})", saved.id, batch.len(), batch.status());
        self.events.publish(ScanEvent::ScanSaved { id: saved.id.clone() });
        Ok(saved)
    }

    /// Lists the caller's most recent scans, newest first.
    pub async fn list(&self, token: &str, limit: u32) -> Result<Vec<ScanRecord>, ScanError> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        let response = self.http_client
            .get(self.url(&["history"])?)
            .bearer_auth(token)
            .query(&[("limit", limit)])
            .send()
            .await?;
        parse_history(&success_text(response).await?)
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<(), ScanError> {
        let response = self.http_client
            .delete(self.url(&["history", id])?)
            .bearer_auth(token)
            .send()
            .await?;
        success_text(response).await?;

        log::info!("Scan {} deleted", id);
        self.events.publish(ScanEvent::ScanDeleted { id: id.to_string() });
        Ok(())
    }

    /// Company-wide history for the admin view.
    pub async fn company_history(&self, token: &str, filter: &CompanyHistoryFilter) -> Result<Vec<ScanRecord>, ScanError> {
        let today = chrono::Local::now().date_naive();
        let response = self.http_client
            .get(self.url(&["company", "history"])?)
            .bearer_auth(token)
            .query(&filter.query_pairs(today))
            .send()
            .await?;
        parse_history(&success_text(response).await?)
    }

    /// Downloads the PDF report of one scan.
    pub async fn report(&self, token: &str, id: &str) -> Result<Vec<u8>, ScanError> {
        let response = self.http_client
            .get(self.url(&["report", id])?)
            .bearer_auth(token)
            .send()
            .await?;
        let report = success_bytes(response).await?;
        log::debug!("Report for scan {} downloaded ({} bytes)", id, report.len());
        Ok(report)
    }
}

/// Parses a `{"history": [...]}` response body.
pub fn parse_history(body: &str) -> Result<Vec<ScanRecord>, ScanError> {
    Ok(serde_json::from_str::<HistoryPage>(body)?.history)
}

async fn success_text(response: Response) -> Result<String, ScanError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        Ok(text)
    } else {
        log::warn!("History store returned {}: {}", status, text);
        Err(ScanError::UnexpectedStatus { status, text })
    }
}

async fn success_bytes(response: Response) -> Result<Vec<u8>, ScanError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.bytes().await?.to_vec());
    }
    let text = response.text().await?;
    log::warn!("History store returned {}: {}", status, text);
    Err(ScanError::UnexpectedStatus { status, text })
}
