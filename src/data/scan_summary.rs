use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::common::{color_for_label, ScanStatus, DEFAULT_COLOR};
use crate::data::ScanRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassCount {
    pub name: String,
    pub count: u32,
    pub color: String,
}

/// Dashboard totals over a set of scan records.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total: usize,
    pub defects: u32,
    pub pending: usize,
    pub active_users: usize,
    pub classes: Vec<ClassCount>,
}

impl ScanSummary {
    pub fn from_records(records: &[ScanRecord]) -> Self {
        Self::from_records_with_color(records, DEFAULT_COLOR)
    }

    pub fn from_records_with_color(records: &[ScanRecord], default_color: &str) -> Self {
        let mut classes: Vec<ClassCount> = Vec::new();
        let mut users = HashSet::new();
        let mut defects = 0;
        let mut pending = 0;

        for record in records {
            defects += record.defect_count();
            if record.status == ScanStatus::Pending {
                pending += 1;
            }
            if let Some(user) = &record.user_id {
                users.insert(user.as_str());
            }
            for det in &record.detections {
                let name = det.get_label();
                match classes.iter_mut().find(|c| c.name == name) {
                    Some(entry) => entry.count += 1,
                    None => {
                        let color = color_for_label(&name, default_color).to_string();
                        classes.push(ClassCount { name, count: 1, color });
                    }
                }
            }
        }

        Self {
            total: records.len(),
            defects,
            pending,
            active_users: users.len(),
            classes,
        }
    }

    pub fn count_for(&self, class_name: &str) -> u32 {
        self.classes
            .iter()
            .find(|c| c.name == class_name)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}
