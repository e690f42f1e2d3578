//! Job records extracted from console reports

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of the `Scheduled` column, e.g. `18-Apr-12 20:30`
const SCHEDULED_FORMAT: &str = "%d-%b-%y %H:%M";

/// One row of the scheduled-jobs table
///
/// Values are kept exactly as printed; blank columns are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingJob {
    pub level: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub priority: String,
    pub date: String,
    pub time: String,
    pub name: String,
    pub volume: String,
}

impl UpcomingJob {
    /// Scheduled run time, if the date and time columns parse
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let stamp = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&stamp, SCHEDULED_FORMAT).ok()
    }
}

/// A job listed by `show disabled`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledJob {
    pub name: String,
}
