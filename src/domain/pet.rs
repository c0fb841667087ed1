use serde::{Deserialize, Serialize};

/// Life stage of a pet, derived from its level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStage {
    Baby,
    Young,
    Adult,
}

impl PetStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Baby => "Baby",
            Self::Young => "Young",
            Self::Adult => "Adult",
        }
    }
}

/// A gamification pet, leveled by feeding it with earned coins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    /// Species tag from the fixed species order
    pub species: String,
    pub name: String,
    /// Level 1-10
    pub level: u32,
    /// Cumulative XP, never decreases
    pub xp: u32,
    pub stage: PetStage,
    pub unlocked: bool,
}

/// Food that can be fed to an unlocked pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    Normal,
    Premium,
}

impl FoodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}
