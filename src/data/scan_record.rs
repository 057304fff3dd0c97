use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::common::{Detection, ScanStatus};

/// One saved scan as the history store returns it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<serde_json::Value>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub status: ScanStatus,
    #[serde(default)]
    pub defects: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub detections: Vec<Detection>,
    #[serde(default)]
    pub company_id: Option<String>,
}

impl ScanRecord {
    /// Number of defects on this scan, preferring the stored detections over the `defects` counter.
    pub fn defect_count(&self) -> u32 {
        if self.detections.is_empty() {
            self.defects.unwrap_or(0)
        } else {
            self.detections.len() as u32
        }
    }

    /// Distinct class labels in first-seen order.
    pub fn defect_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for det in &self.detections {
            let label = det.get_label();
            if !types.contains(&label) {
                types.push(label);
            }
        }
        types
    }
}

/// Identity attached to a saved scan.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOwner {
    pub user_id: String,
    pub user_email: String,
}

impl ScanOwner {
    pub fn new(user_id: &str, user_email: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
        }
    }
}

/// Response of the history store after a scan is saved.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedScan {
    pub id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl TimeRange {
    pub fn from_str(range: &str) -> Option<Self> {
        match range.to_lowercase().as_str() {
            "all" => Some(TimeRange::All),
            "today" => Some(TimeRange::Today),
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            _ => None,
        }
    }

    /// First day included by this range, counted back from `today`.
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeRange::All => None,
            TimeRange::Today => Some(today),
            TimeRange::Week => today.checked_sub_days(Days::new(7)),
            TimeRange::Month => today.checked_sub_months(Months::new(1)),
        }
    }
}

/// Filters for the company-wide history used by the admin view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompanyHistoryFilter {
    pub defect_type: Option<String>,
    pub user_id: Option<String>,
    pub time_range: TimeRange,
}

impl CompanyHistoryFilter {
    pub fn with_defect_type(mut self, defect_type: &str) -> Self {
        self.defect_type = Some(defect_type.to_string());
        self
    }

    pub fn with_user_id(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    pub fn query_pairs(&self, today: NaiveDate) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(defect_type) = self.defect_type.as_ref().filter(|d| !d.eq_ignore_ascii_case("all")) {
            pairs.push(("defect_type", defect_type.clone()));
        }
        if let Some(user_id) = self.user_id.as_ref().filter(|u| !u.is_empty()) {
            pairs.push(("user_id", user_id.clone()));
        }
        if let Some(start) = self.time_range.start_date(today) {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}
