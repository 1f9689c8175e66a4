use crate::libs::journal::ActivityEntry;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Activity row with every field pre-rendered, shared by the table view,
/// the CSV export and the remote payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedEntry {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Employee")]
    pub employee_id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Remark")]
    pub remark: String,
}

impl From<&ActivityEntry> for FormattedEntry {
    fn from(entry: &ActivityEntry) -> Self {
        Self {
            timestamp: format_timestamp(&entry.timestamp),
            employee_id: entry.employee_id.clone(),
            status: entry.status.to_string(),
            response: entry.response.clone(),
            remark: entry.remark.clone(),
        }
    }
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// `HH:MM:SS`; negative input renders as zero.
pub fn format_hms(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// `MM:SS`, minutes are not wrapped at 60.
pub fn format_mmss(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Remark fragment describing how long a grace period ran before the answer.
pub fn format_exceeded(secs: i64) -> String {
    let secs = secs.max(0);
    if secs == 0 {
        return "Returned immediately.".to_string();
    }
    format!("Exceeded time: {}h {}m {}s.", secs / 3600, (secs % 3600) / 60, secs % 60)
}
