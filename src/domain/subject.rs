use serde::{Deserialize, Serialize};

/// A subject of study (e.g. "Math"), owner of topics and sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub user_id: String,
    /// Display name, at most 100 characters
    pub name: String,
    /// Hex color used by the UI layer
    pub color: String,
}

/// Declared difficulty of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A topic within a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub subject_id: String,
    /// Display name, at most 100 characters
    pub name: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub exam_relevant: bool,
}
