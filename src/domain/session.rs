use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// What kind of work a session is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Review,
    NewTopic,
    Practice,
    ExamPrep,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::NewTopic => "new_topic",
            Self::Practice => "practice",
            Self::ExamPrep => "exam_prep",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Review => "Review",
            Self::NewTopic => "New topic",
            Self::Practice => "Practice",
            Self::ExamPrep => "Exam prep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Planned mental load of a session, set when the session is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExertionLevel {
    Low,
    Medium,
    High,
}

/// How hard the session actually felt, reported after completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeltDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A single planned or completed unit of study work
///
/// Invariant: `feedback_difficulty` is only ever set while `completed` is
/// true. Reopening a session clears its feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub user_id: String,
    pub subject_id: String,
    pub topic_id: Option<String>,
    /// Calendar date in the device-local timezone
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    /// Duration in minutes (5-300)
    pub duration: u32,
    pub kind: SessionKind,
    pub goal: String,
    pub priority: Priority,
    pub completed: bool,
    pub exertion: Option<ExertionLevel>,
    pub feedback_difficulty: Option<FeltDifficulty>,
}

/// Input for creating a session; the store assigns the id and owner
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub subject_id: String,
    pub topic_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration: u32,
    pub kind: SessionKind,
    pub goal: String,
    pub priority: Priority,
    pub exertion: Option<ExertionLevel>,
}

/// Partial edit of a planned session
///
/// Completion is not part of a patch: the incomplete/complete transition
/// carries reward semantics and goes through `Store::complete_session` /
/// `Store::reopen_session`.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub subject_id: Option<String>,
    /// `Some(None)` detaches the session from its topic
    pub topic_id: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration: Option<u32>,
    pub kind: Option<SessionKind>,
    pub goal: Option<String>,
    pub priority: Option<Priority>,
    pub exertion: Option<Option<ExertionLevel>>,
}
