use std::fmt;
use serde::{Deserialize, Serialize};
use crate::common::Detection;

/// All detections returned by one analysis call. A new batch replaces the old one wholesale.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    #[serde(default)]
    pub detections: Vec<Detection>,
}

impl DetectionBatch {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    pub fn status(&self) -> ScanStatus {
        ScanStatus::for_batch(self)
    }
}

impl From<Vec<Detection>> for DetectionBatch {
    fn from(detections: Vec<Detection>) -> Self {
        Self::new(detections)
    }
}

impl<'a> IntoIterator for &'a DetectionBatch {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

/// Classification stored alongside a saved scan.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    Clean,
    Attention,
    #[default]
    Pending,
    #[serde(untagged)]
    Other(String),
}

impl ScanStatus {
    pub fn for_batch(batch: &DetectionBatch) -> Self {
        if batch.is_empty() {
            ScanStatus::Clean
        } else {
            ScanStatus::Attention
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ScanStatus::Clean => "Clean",
            ScanStatus::Attention => "Attention",
            ScanStatus::Pending => "Pending",
            ScanStatus::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
