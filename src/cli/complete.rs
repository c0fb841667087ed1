//! Complete command implementation

use anyhow::{bail, Result};

use studyflow::achievements::AchievementDef;
use studyflow::domain::FeltDifficulty;
use studyflow::store::Store;

/// Mark a session complete and collect its reward
pub fn complete_command(store: &mut Store, session_id: &str, felt: Option<&str>) -> Result<()> {
    let feedback = match felt {
        None => None,
        Some(raw) => Some(parse_felt(raw)?),
    };

    let breakdown = store.complete_session(session_id, feedback)?;

    match breakdown {
        Some(breakdown) => {
            println!("Session completed: +{} coins", breakdown.total);
            for reason in &breakdown.reasons {
                println!("  {reason}");
            }
        }
        None => {
            println!("Session was already completed; no reward.");
        }
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

fn parse_felt(raw: &str) -> Result<FeltDifficulty> {
    match raw.to_lowercase().as_str() {
        "easy" => Ok(FeltDifficulty::Easy),
        "medium" => Ok(FeltDifficulty::Medium),
        "hard" => Ok(FeltDifficulty::Hard),
        other => bail!("Unknown difficulty: {other} (expected easy, medium or hard)"),
    }
}
