//! Achievement definitions and metadata
//!
//! All ten achievements are defined here with their unlock thresholds and
//! coin rewards. The set is closed: persisted state references these ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstSession,
    TenSessions,
    FiftySessions,
    HundredSessions,
    WeekStreak,
    MonthStreak,
    FirstPetLevel5,
    AllPetsUnlocked,
    ThousandCoins,
    FiveThousandCoins,
}

impl AchievementId {
    /// Get the string ID used in persisted state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSession => "first_session",
            Self::TenSessions => "ten_sessions",
            Self::FiftySessions => "fifty_sessions",
            Self::HundredSessions => "hundred_sessions",
            Self::WeekStreak => "week_streak",
            Self::MonthStreak => "month_streak",
            Self::FirstPetLevel5 => "first_pet_level_5",
            Self::AllPetsUnlocked => "all_pets_unlocked",
            Self::ThousandCoins => "thousand_coins",
            Self::FiveThousandCoins => "five_thousand_coins",
        }
    }

    /// Parse from a persisted string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_session" => Some(Self::FirstSession),
            "ten_sessions" => Some(Self::TenSessions),
            "fifty_sessions" => Some(Self::FiftySessions),
            "hundred_sessions" => Some(Self::HundredSessions),
            "week_streak" => Some(Self::WeekStreak),
            "month_streak" => Some(Self::MonthStreak),
            "first_pet_level_5" => Some(Self::FirstPetLevel5),
            "all_pets_unlocked" => Some(Self::AllPetsUnlocked),
            "thousand_coins" => Some(Self::ThousandCoins),
            "five_thousand_coins" => Some(Self::FiveThousandCoins),
            _ => None,
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub coin_reward: u32,
}

/// All achievement definitions, in evaluation order
pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstSession,
        name: "First Steps",
        description: "Complete your first study session",
        icon: "🎯",
        coin_reward: 50,
    },
    AchievementDef {
        id: AchievementId::TenSessions,
        name: "Making Progress",
        description: "Complete 10 study sessions",
        icon: "📚",
        coin_reward: 100,
    },
    AchievementDef {
        id: AchievementId::FiftySessions,
        name: "Study Master",
        description: "Complete 50 study sessions",
        icon: "🏆",
        coin_reward: 500,
    },
    AchievementDef {
        id: AchievementId::HundredSessions,
        name: "Study Legend",
        description: "Complete 100 study sessions",
        icon: "👑",
        coin_reward: 1000,
    },
    AchievementDef {
        id: AchievementId::WeekStreak,
        name: "Week Warrior",
        description: "Keep a 7-day streak",
        icon: "🔥",
        coin_reward: 200,
    },
    AchievementDef {
        id: AchievementId::MonthStreak,
        name: "Monthly Master",
        description: "Keep a 30-day streak",
        icon: "💎",
        coin_reward: 2000,
    },
    AchievementDef {
        id: AchievementId::FirstPetLevel5,
        name: "Pet Friend",
        description: "Raise a pet to level 5",
        icon: "🐾",
        coin_reward: 150,
    },
    AchievementDef {
        id: AchievementId::AllPetsUnlocked,
        name: "Pet Collector",
        description: "Unlock every pet",
        icon: "🌟",
        coin_reward: 1000,
    },
    AchievementDef {
        id: AchievementId::ThousandCoins,
        name: "Coin Collector",
        description: "Hold 1000 coins",
        icon: "💰",
        coin_reward: 200,
    },
    AchievementDef {
        id: AchievementId::FiveThousandCoins,
        name: "Coin Master",
        description: "Hold 5000 coins",
        icon: "💸",
        coin_reward: 1000,
    },
];

impl AchievementDef {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> &'static AchievementDef {
        ACHIEVEMENTS
            .iter()
            .find(|a| a.id == id)
            .expect("all achievements are defined")
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}

/// Persisted unlock state for one achievement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AchievementState {
    pub id: AchievementId,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// All-locked state vector in definition order
pub fn initial_achievements() -> Vec<AchievementState> {
    ACHIEVEMENTS
        .iter()
        .map(|def| AchievementState {
            id: def.id,
            unlocked: false,
            unlocked_at: None,
        })
        .collect()
}
