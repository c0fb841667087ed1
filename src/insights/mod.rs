//! Read-only schedule analyzers
//!
//! Both analyzers are recomputed on demand from the current session list
//! and never mutate coins, streaks, or achievements.

mod energy;
mod learning;

pub use energy::{analyze_day_energy, EnergyHint, EnergyHintKind};
pub use learning::{compute_learning_insights, InsightKind, LearningInsight};
