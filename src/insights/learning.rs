//! Learning insights over recent session feedback
//!
//! Three independent read-only analyses of completed sessions that carry
//! post-completion felt-difficulty feedback. Each contributes at most one
//! insight; the combined list is capped at three.

use chrono::{Days, NaiveDate};

use crate::domain::{FeltDifficulty, StudySession, Subject};

/// How many recent feedback sessions per subject the struggle check looks at
const RECENT_PER_SUBJECT: usize = 7;

/// Fraction of hard ratings above which a subject counts as a struggle
const HARD_THRESHOLD: f64 = 0.6;

/// Sample size for the balance check
const BALANCE_SAMPLE: usize = 15;

/// Minimum feedback sessions before the balance check activates
const BALANCE_MIN_TOTAL: usize = 5;

/// Kind of learning insight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    SubjectHard,
    YesterdayOverload,
    GoodBalance,
}

/// A coaching hint derived from recent session feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningInsight {
    pub kind: InsightKind,
    pub message: &'static str,
    pub subject_id: Option<String>,
    pub subject_name: Option<String>,
}

/// Compute up to three insights from the session history.
///
/// `sessions_for_date` must return a date's sessions in chronological order;
/// `today` fixes the "yesterday" boundary so callers control the clock.
pub fn compute_learning_insights<F>(
    sessions: &[StudySession],
    subjects: &[Subject],
    sessions_for_date: F,
    today: NaiveDate,
) -> Vec<LearningInsight>
where
    F: Fn(NaiveDate) -> Vec<StudySession>,
{
    let mut insights = Vec::new();

    insights.extend(subject_hard_insights(sessions, subjects));
    if let Some(overload) = yesterday_overload_insight(&sessions_for_date, today) {
        insights.push(overload);
    }
    if let Some(balance) = good_balance_insight(sessions) {
        insights.push(balance);
    }

    insights.truncate(3);
    insights
}

/// Completed feedback-bearing sessions, newest first by date then start time
fn feedback_sessions_newest_first(sessions: &[StudySession]) -> Vec<&StudySession> {
    let mut with_feedback: Vec<&StudySession> = sessions
        .iter()
        .filter(|s| s.completed && s.feedback_difficulty.is_some())
        .collect();
    with_feedback.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.start_time.cmp(&a.start_time))
    });
    with_feedback
}

/// One insight per subject whose recent feedback skews hard
fn subject_hard_insights(
    sessions: &[StudySession],
    subjects: &[Subject],
) -> Vec<LearningInsight> {
    let recent = feedback_sessions_newest_first(sessions);
    let mut insights = Vec::new();

    for subject in subjects {
        let subject_sessions: Vec<&&StudySession> = recent
            .iter()
            .filter(|s| s.subject_id == subject.id)
            .take(RECENT_PER_SUBJECT)
            .collect();
        if subject_sessions.len() < 2 {
            continue;
        }

        let hard = subject_sessions
            .iter()
            .filter(|s| s.feedback_difficulty == Some(FeltDifficulty::Hard))
            .count();
        if hard as f64 / subject_sessions.len() as f64 > HARD_THRESHOLD {
            insights.push(LearningInsight {
                kind: InsightKind::SubjectHard,
                message: "This subject has felt tough lately. \
                          Want to plan shorter sessions for it?",
                subject_id: Some(subject.id.clone()),
                subject_name: Some(subject.name.clone()),
            });
        }
    }

    insights
}

/// Generic overload hint when yesterday was rated heavily hard
fn yesterday_overload_insight<F>(sessions_for_date: &F, today: NaiveDate) -> Option<LearningInsight>
where
    F: Fn(NaiveDate) -> Vec<StudySession>,
{
    let yesterday = today.checked_sub_days(Days::new(1))?;
    let day_sessions: Vec<StudySession> = sessions_for_date(yesterday)
        .into_iter()
        .filter(|s| s.completed && s.feedback_difficulty.is_some())
        .collect();

    let hard_total = day_sessions
        .iter()
        .filter(|s| s.feedback_difficulty == Some(FeltDifficulty::Hard))
        .count();

    let mut consecutive_hard = 0;
    let mut back_to_back = false;
    for session in &day_sessions {
        if session.feedback_difficulty == Some(FeltDifficulty::Hard) {
            consecutive_hard += 1;
            if consecutive_hard >= 2 {
                back_to_back = true;
                break;
            }
        } else {
            consecutive_hard = 0;
        }
    }

    if hard_total > 2 || back_to_back {
        Some(LearningInsight {
            kind: InsightKind::YesterdayOverload,
            message: "Yesterday had a lot of demanding sessions. \
                      Plan something lighter today?",
            subject_id: None,
            subject_name: None,
        })
    } else {
        None
    }
}

/// Positive note when recent feedback is spread across all difficulties
fn good_balance_insight(sessions: &[StudySession]) -> Option<LearningInsight> {
    let recent = feedback_sessions_newest_first(sessions);
    if recent.len() < BALANCE_MIN_TOTAL {
        return None;
    }

    let sample = &recent[..recent.len().min(BALANCE_SAMPLE)];
    let count = |d: FeltDifficulty| sample.iter().filter(|s| s.feedback_difficulty == Some(d)).count();
    let easy = count(FeltDifficulty::Easy);
    let medium = count(FeltDifficulty::Medium);
    let hard = count(FeltDifficulty::Hard);

    let least = easy.min(medium).min(hard);
    if least as f64 / sample.len() as f64 >= 0.2 {
        Some(LearningInsight {
            kind: InsightKind::GoodBalance,
            message: "Your study load is well balanced right now.",
            subject_id: None,
            subject_name: None,
        })
    } else {
        None
    }
}
