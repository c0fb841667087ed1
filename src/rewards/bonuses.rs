//! Daily bonus and lucky coin ledgers
//!
//! Two independent claim-once-per-day mechanisms keyed by the device-local
//! calendar date. The daily bonus pays an escalating amount based on its own
//! claim streak; the lucky coin pays a random amount from an injected source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily login bonus ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBonus {
    pub last_claim: Option<NaiveDate>,
    /// Consecutive days the bonus was claimed; independent of the visit streak
    pub streak: u32,
    /// Amount the most recent claim paid out
    pub next_bonus: u32,
}

impl Default for DailyBonus {
    fn default() -> Self {
        Self {
            last_claim: None,
            streak: 0,
            next_bonus: 5,
        }
    }
}

/// Outcome of a daily-bonus claim attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBonusClaim {
    pub available: bool,
    pub amount: u32,
    pub streak: u32,
    /// Ledger state after the attempt; unchanged when unavailable
    pub ledger: DailyBonus,
}

/// Attempt to claim the daily bonus for `today`.
pub fn claim_daily_bonus(ledger: &DailyBonus, today: NaiveDate) -> DailyBonusClaim {
    if ledger.last_claim == Some(today) {
        return DailyBonusClaim {
            available: false,
            amount: 0,
            streak: ledger.streak,
            ledger: ledger.clone(),
        };
    }

    let claimed_yesterday = today
        .pred_opt()
        .is_some_and(|yesterday| ledger.last_claim == Some(yesterday));
    let streak = if claimed_yesterday { ledger.streak + 1 } else { 1 };

    let amount = daily_bonus_amount(streak);

    DailyBonusClaim {
        available: true,
        amount,
        streak,
        ledger: DailyBonus {
            last_claim: Some(today),
            streak,
            next_bonus: amount,
        },
    }
}

/// Payout schedule by claim streak: day 1 = 5 rising by 2 per day,
/// capped bands at 3, 5 and 7 days.
fn daily_bonus_amount(streak: u32) -> u32 {
    if streak >= 7 {
        50
    } else if streak >= 5 {
        30
    } else if streak >= 3 {
        15
    } else {
        5 + (streak - 1) * 2
    }
}

/// Lucky coin ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LuckyCoin {
    pub last_claim: Option<NaiveDate>,
    /// Amount the most recent claim paid out
    pub amount: u32,
}

/// Outcome of a lucky-coin claim attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuckyCoinClaim {
    pub available: bool,
    pub amount: u32,
    pub ledger: LuckyCoin,
}

/// Lucky coin payout range, inclusive
pub const LUCKY_COIN_MIN: u32 = 5;
pub const LUCKY_COIN_MAX: u32 = 25;

/// Source of randomness for lucky-coin amounts.
///
/// Injected so tests can supply a deterministic sequence.
pub trait CoinRng {
    /// Uniform random integer in `[min, max]` inclusive
    fn amount_between(&mut self, min: u32, max: u32) -> u32;
}

/// Production randomness backed by the OS RNG, with a best-effort
/// timestamp fallback when the OS RNG is unavailable.
#[derive(Debug, Default)]
pub struct OsCoinRng;

impl CoinRng for OsCoinRng {
    fn amount_between(&mut self, min: u32, max: u32) -> u32 {
        let mut bytes = [0u8; 4];
        let raw = if getrandom::getrandom(&mut bytes).is_ok() {
            u32::from_le_bytes(bytes)
        } else {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos())
                .unwrap_or(0);
            nanos ^ std::process::id()
        };
        min + raw % (max - min + 1)
    }
}

/// Attempt to claim the lucky coin for `today`.
pub fn claim_lucky_coin(
    ledger: &LuckyCoin,
    today: NaiveDate,
    rng: &mut dyn CoinRng,
) -> LuckyCoinClaim {
    if ledger.last_claim == Some(today) {
        return LuckyCoinClaim {
            available: false,
            amount: 0,
            ledger: ledger.clone(),
        };
    }

    let amount = rng.amount_between(LUCKY_COIN_MIN, LUCKY_COIN_MAX);

    LuckyCoinClaim {
        available: true,
        amount,
        ledger: LuckyCoin {
            last_claim: Some(today),
            amount,
        },
    }
}
