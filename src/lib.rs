//! StudyFlow - gamified study planning
//!
//! StudyFlow tracks study sessions per subject and topic and pays out a coin
//! economy on top: session rewards with streak/weekend/combo bonuses, daily
//! and lucky-coin claims, a pet roster leveled by feeding, and a fixed set of
//! achievements.
//!
//! The crate separates pure rules from state:
//!
//! 1. **Rule modules** (`rewards`, `pets`, `achievements`, `insights`) are
//!    pure functions over plain data, with clocks and randomness injected.
//!
//! 2. **`store`** owns the application state, applies the rules, moves coins,
//!    and persists each touched collection as a JSON file.

pub mod achievements;
pub mod domain;
pub mod insights;
pub mod pets;
pub mod rewards;
pub mod store;

pub use domain::*;
