//! Visit streak tracking
//!
//! Counts consecutive calendar days with at least one app visit. A visit on
//! the day after the last one extends the streak; a longer gap resets it
//! to 1. The check is idempotent within the same calendar day.

use chrono::{Local, NaiveDate};

/// Result of a streak check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub streak: u32,
    pub last_visit: NaiveDate,
    /// True when the visible streak value changed, including a reset to 1
    pub increased: bool,
}

/// Advance the visit streak for a visit on `today`.
pub fn check_and_update_streak(
    last_visit: Option<NaiveDate>,
    streak: u32,
    today: NaiveDate,
) -> StreakUpdate {
    let Some(last) = last_visit else {
        // First visit ever
        return StreakUpdate {
            streak: 1,
            last_visit: today,
            increased: true,
        };
    };

    if last == today {
        return StreakUpdate {
            streak,
            last_visit: last,
            increased: false,
        };
    }

    let gap_days = (today - last).num_days();
    if gap_days == 1 {
        StreakUpdate {
            streak: streak + 1,
            last_visit: today,
            increased: true,
        }
    } else if gap_days > 1 {
        // Broken streak restarts at 1; still reported as a visible change
        StreakUpdate {
            streak: 1,
            last_visit: today,
            increased: true,
        }
    } else {
        // Last visit is in the future (clock rolled back or timezone
        // change): keep the streak untouched rather than destroy it
        StreakUpdate {
            streak,
            last_visit: last,
            increased: false,
        }
    }
}

/// Today's date in the device-local timezone
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
