use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Priority, SessionKind};

/// One session template inside a weekly plan
///
/// Templates reference subjects and topics by name, not by id; names are
/// resolved (and missing entities created) only when the plan is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTemplate {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration: u32,
    pub subject_name: String,
    pub topic_name: Option<String>,
    pub priority: Option<Priority>,
    pub kind: Option<SessionKind>,
    pub goal: Option<String>,
}

/// A saved plan of sessions that can be applied to the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub sessions: Vec<SessionTemplate>,
}
