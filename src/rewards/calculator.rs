//! Coin reward calculation for completed sessions
//!
//! Pure and deterministic: the caller supplies the streak, the number of
//! sessions already completed on the session's date, and the weekend flag.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::{ExertionLevel, FeltDifficulty, StudySession};

/// Itemized coin payout for one completed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardBreakdown {
    pub base: u32,
    pub duration_bonus: u32,
    pub difficulty_bonus: u32,
    pub streak_bonus: u32,
    pub weekend_bonus: u32,
    pub combo_bonus: u32,
    pub total: u32,
    /// Human-readable reasons for the components that fired, in a fixed order
    pub reasons: Vec<String>,
}

/// Calculate the coin reward for a completed session.
///
/// `sessions_today` is the number of sessions already completed on the
/// session's calendar date before this one.
pub fn calculate_reward(
    session: &StudySession,
    streak: u32,
    sessions_today: u32,
    is_weekend: bool,
) -> RewardBreakdown {
    let mut reasons = Vec::new();
    let base = 10;
    let mut duration_bonus = 0;
    let mut difficulty_bonus = 0;
    let mut streak_bonus = 0;
    let mut weekend_bonus = 0;
    let mut combo_bonus = 0;

    reasons.push("Base reward".to_string());

    // Longer sessions pay more; highest band wins
    if session.duration >= 90 {
        duration_bonus = 10;
        reasons.push("Long session (+10)".to_string());
    } else if session.duration >= 60 {
        duration_bonus = 5;
        reasons.push("Medium session (+5)".to_string());
    }

    // Felt difficulty after completion, falling back to planned exertion
    let felt = session.feedback_difficulty;
    let planned = session.exertion;
    if felt == Some(FeltDifficulty::Hard) || planned == Some(ExertionLevel::High) {
        difficulty_bonus = 10;
        reasons.push("Hard session (+10)".to_string());
    } else if felt == Some(FeltDifficulty::Medium) || planned == Some(ExertionLevel::Medium) {
        difficulty_bonus = 5;
        reasons.push("Medium difficulty (+5)".to_string());
    }

    // Every full week of streak pays; exact multiples of 7 are milestones
    if streak >= 7 && streak % 7 == 0 {
        streak_bonus = 5;
        reasons.push(format!("Streak milestone day {streak} (+5)"));
    } else if streak >= 7 {
        streak_bonus = (streak / 7) * 2;
        if streak_bonus > 0 {
            reasons.push(format!("Streak bonus (+{streak_bonus})"));
        }
    }

    // Weekend bonus applies to the subtotal before the combo bonus
    if is_weekend {
        let subtotal = base + duration_bonus + difficulty_bonus + streak_bonus;
        weekend_bonus = subtotal / 2;
        if weekend_bonus > 0 {
            reasons.push("Weekend bonus (+50%)".to_string());
        }
    }

    if sessions_today >= 5 {
        combo_bonus = 20;
        reasons.push("5+ sessions today (+20)".to_string());
    } else if sessions_today >= 3 {
        combo_bonus = 10;
        reasons.push("3+ sessions today (+10)".to_string());
    }

    let total = base + duration_bonus + difficulty_bonus + streak_bonus + weekend_bonus + combo_bonus;

    RewardBreakdown {
        base,
        duration_bonus,
        difficulty_bonus,
        streak_bonus,
        weekend_bonus,
        combo_bonus,
        total,
        reasons,
    }
}

/// Check whether a calendar date falls on a weekend
pub fn is_weekend_date(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, SessionKind};
    use chrono::NaiveTime;

    fn session(duration: u32) -> StudySession {
        StudySession {
            id: "s1".to_string(),
            user_id: "local".to_string(),
            subject_id: "sub1".to_string(),
            topic_id: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration,
            kind: SessionKind::Review,
            goal: String::new(),
            priority: Priority::Medium,
            completed: true,
            exertion: None,
            feedback_difficulty: None,
        }
    }

    #[test]
    fn duration_bonus_bands() {
        assert_eq!(calculate_reward(&session(90), 0, 0, false).duration_bonus, 10);
        assert_eq!(calculate_reward(&session(120), 0, 0, false).duration_bonus, 10);
        assert_eq!(calculate_reward(&session(60), 0, 0, false).duration_bonus, 5);
        assert_eq!(calculate_reward(&session(89), 0, 0, false).duration_bonus, 5);
        assert_eq!(calculate_reward(&session(59), 0, 0, false).duration_bonus, 0);
        assert_eq!(calculate_reward(&session(5), 0, 0, false).duration_bonus, 0);
    }

    #[test]
    fn base_always_awarded() {
        let b = calculate_reward(&session(30), 0, 0, false);
        assert_eq!(b.base, 10);
        assert_eq!(b.total, 10);
        assert_eq!(b.reasons, vec!["Base reward".to_string()]);
    }

    #[test]
    fn difficulty_prefers_hard_over_medium() {
        let mut s = session(30);
        s.feedback_difficulty = Some(FeltDifficulty::Hard);
        s.exertion = Some(ExertionLevel::Medium);
        assert_eq!(calculate_reward(&s, 0, 0, false).difficulty_bonus, 10);

        s.feedback_difficulty = Some(FeltDifficulty::Medium);
        s.exertion = None;
        assert_eq!(calculate_reward(&s, 0, 0, false).difficulty_bonus, 5);

        s.feedback_difficulty = None;
        s.exertion = Some(ExertionLevel::High);
        assert_eq!(calculate_reward(&s, 0, 0, false).difficulty_bonus, 10);

        s.exertion = Some(ExertionLevel::Low);
        assert_eq!(calculate_reward(&s, 0, 0, false).difficulty_bonus, 0);
    }

    #[test]
    fn streak_milestone_vs_running_bonus() {
        assert_eq!(calculate_reward(&session(30), 6, 0, false).streak_bonus, 0);
        // Exact multiple of 7: flat milestone
        assert_eq!(calculate_reward(&session(30), 7, 0, false).streak_bonus, 5);
        assert_eq!(calculate_reward(&session(30), 14, 0, false).streak_bonus, 5);
        // Between milestones: 2 per full week
        assert_eq!(calculate_reward(&session(30), 8, 0, false).streak_bonus, 2);
        assert_eq!(calculate_reward(&session(30), 15, 0, false).streak_bonus, 4);
    }

    #[test]
    fn weekend_bonus_is_half_of_pre_weekend_subtotal() {
        let mut s = session(90);
        s.feedback_difficulty = Some(FeltDifficulty::Hard);
        let b = calculate_reward(&s, 0, 5, true);
        // subtotal 10 + 10 + 10 = 30, weekend 15, combo 20
        assert_eq!(b.weekend_bonus, 15);
        assert_eq!(b.total, 30 + 15 + 20);

        let off = calculate_reward(&s, 0, 5, false);
        assert_eq!(off.weekend_bonus, 0);
    }

    #[test]
    fn combo_bonus_bands() {
        assert_eq!(calculate_reward(&session(30), 0, 2, false).combo_bonus, 0);
        assert_eq!(calculate_reward(&session(30), 0, 3, false).combo_bonus, 10);
        assert_eq!(calculate_reward(&session(30), 0, 4, false).combo_bonus, 10);
        assert_eq!(calculate_reward(&session(30), 0, 5, false).combo_bonus, 20);
        assert_eq!(calculate_reward(&session(30), 0, 9, false).combo_bonus, 20);
    }

    #[test]
    fn full_weekend_scenario_totals_72() {
        let mut s = session(90);
        s.feedback_difficulty = Some(FeltDifficulty::Hard);
        let b = calculate_reward(&s, 14, 5, true);
        assert_eq!(b.base, 10);
        assert_eq!(b.duration_bonus, 10);
        assert_eq!(b.difficulty_bonus, 10);
        assert_eq!(b.streak_bonus, 5);
        assert_eq!(b.weekend_bonus, 17); // floor(35 * 0.5)
        assert_eq!(b.combo_bonus, 20);
        assert_eq!(b.total, 72);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let mut s = session(75);
        s.exertion = Some(ExertionLevel::Medium);
        let a = calculate_reward(&s, 9, 3, true);
        let b = calculate_reward(&s, 9, 3, true);
        assert_eq!(a, b);
    }

    #[test]
    fn weekend_date_check() {
        // 2025-03-01 is a Saturday
        assert!(is_weekend_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(is_weekend_date(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()));
        assert!(!is_weekend_date(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()));
    }
}
