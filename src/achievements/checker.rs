//! Achievement checking logic
//!
//! Evaluates the definition table against an aggregate stats snapshot.
//! Unlocking is idempotent: already-unlocked achievements are never
//! re-evaluated, and `newly_unlocked` is ordered by definition order.

use chrono::{DateTime, Utc};

use super::definitions::{AchievementId, AchievementState, ACHIEVEMENTS};

/// Aggregate stats an achievement condition can look at
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsSnapshot {
    /// Completed session count
    pub total_sessions: u64,
    /// Current visit streak in days
    pub streak: u32,
    /// Current coin balance
    pub coins: u32,
    /// Highest level among all pets
    pub max_pet_level: u32,
    pub unlocked_pets: usize,
    pub total_pets: usize,
}

/// Result of an achievement check
#[derive(Debug, Clone)]
pub struct AchievementCheck {
    /// Full state vector after the check
    pub achievements: Vec<AchievementState>,
    /// Ids flipped to unlocked by this check, in definition order
    pub newly_unlocked: Vec<AchievementId>,
}

/// Whether the stats meet the unlock condition for an achievement
fn condition_met(id: AchievementId, stats: &StatsSnapshot) -> bool {
    match id {
        AchievementId::FirstSession => stats.total_sessions >= 1,
        AchievementId::TenSessions => stats.total_sessions >= 10,
        AchievementId::FiftySessions => stats.total_sessions >= 50,
        AchievementId::HundredSessions => stats.total_sessions >= 100,
        AchievementId::WeekStreak => stats.streak >= 7,
        AchievementId::MonthStreak => stats.streak >= 30,
        AchievementId::FirstPetLevel5 => stats.max_pet_level >= 5,
        AchievementId::AllPetsUnlocked => {
            stats.total_pets > 0 && stats.unlocked_pets >= stats.total_pets
        }
        AchievementId::ThousandCoins => stats.coins >= 1000,
        AchievementId::FiveThousandCoins => stats.coins >= 5000,
    }
}

/// Evaluate all definitions against `stats` and unlock any newly met ones.
///
/// The coin reward for a newly unlocked achievement is granted by the
/// caller, exactly once, as a side effect of the unlock itself.
pub fn check_achievements(
    stats: &StatsSnapshot,
    current: &[AchievementState],
    now: DateTime<Utc>,
) -> AchievementCheck {
    let mut achievements: Vec<AchievementState> = ACHIEVEMENTS
        .iter()
        .map(|def| {
            current
                .iter()
                .find(|s| s.id == def.id)
                .cloned()
                .unwrap_or(AchievementState {
                    id: def.id,
                    unlocked: false,
                    unlocked_at: None,
                })
        })
        .collect();

    let mut newly_unlocked = Vec::new();
    for state in &mut achievements {
        if !state.unlocked && condition_met(state.id, stats) {
            state.unlocked = true;
            state.unlocked_at = Some(now);
            newly_unlocked.push(state.id);
        }
    }

    AchievementCheck {
        achievements,
        newly_unlocked,
    }
}
