//! Achievements: fixed definition table plus the unlock checker

mod checker;
mod definitions;

pub use checker::{check_achievements, AchievementCheck, StatsSnapshot};
pub use definitions::{
    initial_achievements, AchievementDef, AchievementId, AchievementState, ACHIEVEMENTS,
};
