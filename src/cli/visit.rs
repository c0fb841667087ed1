//! Visit command implementation

use anyhow::Result;

use studyflow::achievements::AchievementDef;
use studyflow::rewards::OsCoinRng;
use studyflow::store::Store;

/// Record today's visit: advance the streak, then claim the daily bonus
/// and the lucky coin.
pub fn visit_command(store: &mut Store) -> Result<()> {
    let update = store.check_and_update_streak();
    if update.increased {
        println!("Streak: {} day(s)", update.streak);
    } else {
        println!("Already visited today. Streak: {} day(s)", update.streak);
    }

    let bonus = store.claim_daily_bonus();
    if bonus.available {
        println!(
            "Daily bonus: +{} coins (claim streak {})",
            bonus.amount, bonus.streak
        );
    } else {
        println!("Daily bonus already claimed today.");
    }

    let mut rng = OsCoinRng;
    let lucky = store.claim_lucky_coin(&mut rng);
    if lucky.available {
        println!("Lucky coin: +{} coins", lucky.amount);
    } else {
        println!("Lucky coin already claimed today.");
    }

    for id in store.check_achievements() {
        let def = AchievementDef::get(id);
        println!(
            "Achievement unlocked: {} {} (+{} coins)",
            def.icon, def.name, def.coin_reward
        );
    }

    println!("Coins: {}", store.coins());
    Ok(())
}
