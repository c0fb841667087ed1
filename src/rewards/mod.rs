//! Reward engine: coin payouts, visit streak, and claim-once bonuses

mod bonuses;
mod calculator;
mod streak;

pub use bonuses::{
    claim_daily_bonus, claim_lucky_coin, CoinRng, DailyBonus, DailyBonusClaim, LuckyCoin,
    LuckyCoinClaim, OsCoinRng, LUCKY_COIN_MAX, LUCKY_COIN_MIN,
};
pub use calculator::{calculate_reward, is_weekend_date, RewardBreakdown};
pub use streak::{check_and_update_streak, local_today, StreakUpdate};
