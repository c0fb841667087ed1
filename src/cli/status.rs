//! Status command implementation

use anyhow::Result;

use studyflow::achievements::AchievementDef;
use studyflow::pets::xp_progress_in_level;
use studyflow::rewards::local_today;
use studyflow::store::Store;

/// Show the dashboard: coins, streak, today's schedule, pets and insights
pub fn status_command(store: &Store) -> Result<()> {
    let today = local_today();

    if !store.profile().name.is_empty() {
        println!("StudyFlow - {}", store.profile().name);
    } else {
        println!("StudyFlow");
    }
    println!();
    println!("  Coins:  {}", store.coins());
    println!("  Streak: {} day(s)", store.streak());
    println!();

    let sessions = store.sessions_for_date(today);
    if sessions.is_empty() {
        println!("No sessions planned for today.");
    } else {
        println!("Today ({today}):");
        for session in &sessions {
            let subject = store
                .subject_by_id(&session.subject_id)
                .map(|s| s.name.as_str())
                .unwrap_or("?");
            let marker = if session.completed { "x" } else { " " };
            println!(
                "  [{marker}] {} {} ({} min, {}) - {}",
                session.start_time.format("%H:%M"),
                subject,
                session.duration,
                session.kind.label(),
                session.id,
            );
        }
    }

    if let Some(hint) = store.day_energy_hint(today) {
        println!();
        println!("Energy: {}", hint.message);
    }

    let insights = store.learning_insights_on(today);
    if !insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &insights {
            println!("  - {}", insight.message);
        }
    }

    println!();
    println!("Pets:");
    for pet in store.pets() {
        if !pet.unlocked {
            continue;
        }
        let progress = xp_progress_in_level(pet.xp);
        println!(
            "  {} ({}) - level {} ({}), {}/{} XP - {}",
            pet.name,
            pet.species,
            pet.level,
            pet.stage.label(),
            progress.current,
            progress.needed,
            pet.id,
        );
    }

    let unlocked = store.achievements().iter().filter(|a| a.unlocked).count();
    println!();
    println!(
        "Achievements: {}/{}",
        unlocked,
        AchievementDef::total_count()
    );
    for state in store.achievements() {
        if state.unlocked {
            let def = AchievementDef::get(state.id);
            println!("  {} {} - {}", def.icon, def.name, def.description);
        }
    }

    Ok(())
}
