//! Feed command implementation

use anyhow::{bail, Result};

use studyflow::achievements::AchievementDef;
use studyflow::domain::FoodType;
use studyflow::store::Store;

/// Feed a pet with normal or premium food
pub fn feed_command(store: &mut Store, pet_id: &str, food: &str) -> Result<()> {
    let Some(food_type) = FoodType::from_str(&food.to_lowercase()) else {
        bail!("Unknown food type: {food} (expected normal or premium)");
    };

    let cost = food_type.food().cost;
    let outcome = store.feed_pet(pet_id, food_type);

    if !outcome.success {
        if store.pets().iter().all(|p| p.id != pet_id) {
            bail!("No pet with id {pet_id}");
        }
        if store.pets().iter().any(|p| p.id == pet_id && !p.unlocked) {
            println!("That pet is still locked.");
        } else {
            println!(
                "Not enough coins: {} food costs {cost}, you have {}.",
                food_type.as_str(),
                store.coins()
            );
        }
        return Ok(());
    }

    if let (Some(xp), Some(level)) = (outcome.new_xp, outcome.new_level) {
        if outcome.leveled_up {
            println!("Level up! Now level {level} ({xp} XP total).");
        } else {
            println!("Fed. {xp} XP total, level {level}.");
        }
    }
    if let Some(species) = &outcome.unlocked_species {
        println!("New pet unlocked: {species}!");
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
