//! Pet progression model
//!
//! Pure functions over a fixed XP curve (30 XP per level, cap at level 10),
//! plus the static species roster and food table. Feeding itself is a store
//! operation because it moves coins; the math lives here.

use crate::domain::{FoodType, Pet, PetStage};

/// Fixed species roster; pets unlock in this order
#[derive(Debug, Clone)]
pub struct PetSpecies {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
}

/// Species in unlock order: only the first is unlocked initially, the rest
/// unlock at the level-5 and level-10 milestones of any pet.
pub static PET_SPECIES: &[PetSpecies] = &[
    PetSpecies { id: "turtle", name: "Turtle", emoji: "🐢" },
    PetSpecies { id: "fox", name: "Fox", emoji: "🦊" },
    PetSpecies { id: "raccoon", name: "Raccoon", emoji: "🦝" },
    PetSpecies { id: "owl", name: "Owl", emoji: "🦉" },
    PetSpecies { id: "panda", name: "Panda", emoji: "🐼" },
    PetSpecies { id: "otter", name: "Otter", emoji: "🦦" },
    PetSpecies { id: "deer", name: "Deer", emoji: "🦌" },
    PetSpecies { id: "snow_leopard", name: "Snow Leopard", emoji: "🐆" },
];

/// Cumulative XP required per level step (level n needs (n-1) * 30)
pub const XP_PER_LEVEL: u32 = 30;

/// Maximum pet level
pub const MAX_LEVEL: u32 = 10;

/// Cost and XP payload of one feeding
#[derive(Debug, Clone, Copy)]
pub struct Food {
    pub cost: u32,
    pub xp: u32,
}

impl FoodType {
    /// Cost/XP table for this food type
    pub fn food(&self) -> Food {
        match self {
            Self::Normal => Food { cost: 5, xp: 10 },
            Self::Premium => Food { cost: 15, xp: 40 },
        }
    }
}

/// Cumulative XP threshold for a level
pub fn xp_for_level(level: u32) -> u32 {
    level.saturating_sub(1) * XP_PER_LEVEL
}

/// Highest level (≤ 10) whose threshold is met by `total_xp`
pub fn level_from_total_xp(total_xp: u32) -> u32 {
    let mut level = 1;
    while level < MAX_LEVEL && total_xp >= xp_for_level(level + 1) {
        level += 1;
    }
    level
}

/// Life stage for a level: baby ≤ 3, young ≤ 7, adult above
pub fn stage_from_level(level: u32) -> PetStage {
    if level <= 3 {
        PetStage::Baby
    } else if level <= 7 {
        PetStage::Young
    } else {
        PetStage::Adult
    }
}

/// XP progress inside the current level band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpProgress {
    pub current: u32,
    pub needed: u32,
}

/// Progress within the current level; at max level the bar reads full
pub fn xp_progress_in_level(total_xp: u32) -> XpProgress {
    let level = level_from_total_xp(total_xp);
    if level >= MAX_LEVEL {
        return XpProgress {
            current: XP_PER_LEVEL,
            needed: XP_PER_LEVEL,
        };
    }
    let base = xp_for_level(level);
    XpProgress {
        current: total_xp - base,
        needed: xp_for_level(level + 1) - base,
    }
}

/// Fresh pet roster: one pet per species, level 1, only the first unlocked
pub fn initial_pets() -> Vec<Pet> {
    PET_SPECIES
        .iter()
        .enumerate()
        .map(|(index, species)| Pet {
            id: format!("pet-{}", species.id),
            species: species.id.to_string(),
            name: species.name.to_string(),
            level: 1,
            xp: 0,
            stage: PetStage::Baby,
            unlocked: index == 0,
        })
        .collect()
}

/// Whether leveling from `old_level` to `new_level` crossed an unlock
/// milestone (level 5 opens the second pet, level 10 the third).
pub fn crossed_unlock_milestone(old_level: u32, new_level: u32) -> bool {
    (old_level < 5 && new_level >= 5) || (old_level < 10 && new_level >= 10)
}
