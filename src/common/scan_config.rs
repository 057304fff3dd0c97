use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::common::{CoordinateSpace, FrameSize, DEFAULT_COLOR};
use crate::data::FsAccess;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_API_URL: &str = "DEFECT_API_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "DEFECT_POLL_INTERVAL_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub api_base_url: String,
    pub poll_interval_ms: u64,
    pub reference_width: u32,
    pub reference_height: u32,
    pub default_color: String,
    pub request_timeout_ms: u64,
    pub history_limit: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            poll_interval_ms: 500,
            reference_width: 640,
            reference_height: 480,
            default_color: DEFAULT_COLOR.to_string(),
            request_timeout_ms: 10_000,
            history_limit: 20,
        }
    }
}

impl ScanConfig {
    pub fn new(api_base_url: String, poll_interval_ms: u64,
               reference_width: u32, reference_height: u32,
               default_color: String, request_timeout_ms: u64,
               history_limit: u32) -> Self {
        Self {
            api_base_url,
            poll_interval_ms,
            reference_width,
            reference_height,
            default_color,
            request_timeout_ms,
            history_limit,
        }
    }

    /// Loads `~/.config/defect_overlay/config.json` when present, then applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = FsAccess::Config.path()?.join(CONFIG_FILE_NAME);
        let config = if path.exists() {
            Self::from_file(&path)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };
        config.with_env_overrides()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: ScanConfig = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.as_ref().display(), e))?;
        log::info!("Loaded scan config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_POLL_INTERVAL_MS).ok(),
        )
    }

    pub fn with_overrides(mut self, api_url: Option<String>, poll_interval_ms: Option<String>) -> anyhow::Result<Self> {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(ms) = poll_interval_ms {
            self.poll_interval_ms = ms.trim().parse()
                .map_err(|e| anyhow::anyhow!("{} must be a number of milliseconds: {}", ENV_POLL_INTERVAL_MS, e))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_ms == 0 {
            anyhow::bail!("poll interval must be greater than zero");
        }
        FrameSize::new(self.reference_width, self.reference_height)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn reference_space(&self) -> anyhow::Result<CoordinateSpace> {
        Ok(CoordinateSpace::reference(self.reference_width, self.reference_height)?)
    }

    /// Joins an endpoint path onto the API base url.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn to_string(&self) -> String {
        format!("API Base URL: {}\n\
        Poll Interval: {}ms\n\
        Reference Frame: {}x{}\n\
        Default Color: {}\n\
        Request Timeout: {}ms\n\
        History Limit: {}",
                self.api_base_url, self.poll_interval_ms,
                self.reference_width, self.reference_height,
                self.default_color, self.request_timeout_ms, self.history_limit)
    }
}
