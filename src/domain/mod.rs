//! Core domain types for StudyFlow

mod pet;
mod plan;
mod session;
mod subject;

pub use pet::{FoodType, Pet, PetStage};
pub use plan::{SessionTemplate, WeeklyPlan};
pub use session::{
    ExertionLevel, FeltDifficulty, Priority, SessionDraft, SessionKind, SessionPatch, StudySession,
};
pub use subject::{Difficulty, Subject, Topic};
