//! Integration tests for the store: rewards, pets, bonuses and persistence

mod common;

use chrono::Days;

use studyflow::achievements::AchievementId;
use studyflow::domain::{Difficulty, FeltDifficulty, FoodType, Priority, SessionTemplate};
use studyflow::rewards::CoinRng;
use studyflow::store::{Storage, Store, StoreError};

use common::{create_test_store, draft, parse_date, parse_time};

/// Fixed-value RNG for deterministic lucky-coin tests
struct FixedRng(u32);

impl CoinRng for FixedRng {
    fn amount_between(&mut self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max)
    }
}

// 2025-03-10 is a Monday.
const WEEKDAY: &str = "2025-03-10";
// 2025-03-08 is a Saturday.
const SATURDAY: &str = "2025-03-08";

#[test]
fn test_complete_session_awards_reward_once() {
    let (mut store, _dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let session = store.add_session(draft(&subject.id, WEEKDAY, "09:00", 45));

    let breakdown = store
        .complete_session(&session.id, None)
        .expect("session exists")
        .expect("first completion pays");
    // Short weekday session, no streak, no combo: base only
    assert_eq!(breakdown.total, 10);
    assert_eq!(store.coins(), 10);

    // A second completion records feedback but never pays again
    let again = store
        .complete_session(&session.id, Some(FeltDifficulty::Easy))
        .expect("session exists");
    assert!(again.is_none());
    assert_eq!(store.coins(), 10);
    assert_eq!(
        store.session_by_id(&session.id).unwrap().feedback_difficulty,
        Some(FeltDifficulty::Easy)
    );
}

#[test]
fn test_complete_long_hard_session() {
    let (mut store, _dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let session = store.add_session(draft(&subject.id, WEEKDAY, "09:00", 90));

    let breakdown = store
        .complete_session(&session.id, Some(FeltDifficulty::Hard))
        .unwrap()
        .unwrap();
    assert_eq!(breakdown.duration_bonus, 10);
    assert_eq!(breakdown.difficulty_bonus, 10);
    assert_eq!(breakdown.total, 30);
}

#[test]
fn test_weekend_bonus_applies_on_saturday() {
    let (mut store, _dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let session = store.add_session(draft(&subject.id, SATURDAY, "09:00", 30));

    let breakdown = store.complete_session(&session.id, None).unwrap().unwrap();
    assert_eq!(breakdown.weekend_bonus, 5);
    assert_eq!(breakdown.total, 15);
}

#[test]
fn test_combo_counts_sessions_completed_on_the_same_date() {
    let (mut store, _dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let ids: Vec<String> = (0..4)
        .map(|i| {
            let start = format!("{:02}:00", 9 + i);
            store.add_session(draft(&subject.id, WEEKDAY, &start, 30)).id
        })
        .collect();

    for id in &ids[..3] {
        let b = store.complete_session(id, None).unwrap().unwrap();
        assert_eq!(b.combo_bonus, 0);
    }
    // Fourth completion of the day: three already done
    let b = store.complete_session(&ids[3], None).unwrap().unwrap();
    assert_eq!(b.combo_bonus, 10);
}

#[test]
fn test_reopen_clears_feedback_and_allows_rewarding_again() {
    let (mut store, _dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let session = store.add_session(draft(&subject.id, WEEKDAY, "09:00", 30));

    store
        .complete_session(&session.id, Some(FeltDifficulty::Medium))
        .unwrap();
    assert_eq!(store.coins(), 15);

    store.reopen_session(&session.id).unwrap();
    let reopened = store.session_by_id(&session.id).unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.feedback_difficulty, None);
    // No clawback
    assert_eq!(store.coins(), 15);

    // Completing again pays again
    store.complete_session(&session.id, None).unwrap().unwrap();
    assert_eq!(store.coins(), 25);
}

#[test]
fn test_complete_unknown_session_is_an_error() {
    let (mut store, _dir) = create_test_store();
    let result = store.complete_session("nope", None);
    assert!(matches!(result, Err(StoreError::SessionNotFound(_))));
}

#[test]
fn test_delete_subject_cascades() {
    let (mut store, _dir) = create_test_store();
    let math = store.add_subject("Math", "#88d4ab");
    let bio = store.add_subject("Biology", "#93c5fd");
    let topic = store
        .add_topic(&math.id, "Algebra", Difficulty::Medium, false)
        .unwrap();

    let mut with_topic = draft(&math.id, WEEKDAY, "09:00", 30);
    with_topic.topic_id = Some(topic.id.clone());
    store.add_session(with_topic);
    store.add_session(draft(&bio.id, WEEKDAY, "10:00", 30));

    store.delete_subject(&math.id);

    assert_eq!(store.subjects().len(), 1);
    assert!(store.topics().is_empty());
    assert_eq!(store.sessions().len(), 1);
    assert_eq!(store.sessions()[0].subject_id, bio.id);
}

#[test]
fn test_delete_topic_detaches_sessions() {
    let (mut store, _dir) = create_test_store();
    let math = store.add_subject("Math", "#88d4ab");
    let topic = store
        .add_topic(&math.id, "Algebra", Difficulty::Hard, true)
        .unwrap();

    let mut with_topic = draft(&math.id, WEEKDAY, "09:00", 30);
    with_topic.topic_id = Some(topic.id.clone());
    let session = store.add_session(with_topic);

    store.delete_topic(&topic.id);

    assert!(store.topics().is_empty());
    let kept = store.session_by_id(&session.id).expect("session survives");
    assert_eq!(kept.topic_id, None);
}

#[test]
fn test_feed_pet_levels_up_and_spends_coins() {
    let (mut store, _dir) = create_test_store();
    store.add_coins(100);

    let turtle = store.pets()[0].id.clone();
    let outcome = store.feed_pet(&turtle, FoodType::Premium);

    assert!(outcome.success);
    assert_eq!(outcome.new_xp, Some(40));
    // 40 XP crosses the 30 XP threshold for level 2
    assert_eq!(outcome.new_level, Some(2));
    assert!(outcome.leveled_up);
    assert_eq!(outcome.unlocked_species, None);
    assert_eq!(store.coins(), 85);
}

#[test]
fn test_feed_pet_rejected_without_coins() {
    let (mut store, _dir) = create_test_store();
    store.add_coins(3);

    let turtle = store.pets()[0].id.clone();
    let outcome = store.feed_pet(&turtle, FoodType::Normal);

    assert!(!outcome.success);
    assert_eq!(store.coins(), 3);
    assert_eq!(store.pets()[0].xp, 0);
}

#[test]
fn test_feed_locked_pet_rejected() {
    let (mut store, _dir) = create_test_store();
    store.add_coins(100);

    let locked = store.pets()[1].id.clone();
    let outcome = store.feed_pet(&locked, FoodType::Normal);

    assert!(!outcome.success);
    assert_eq!(store.coins(), 100);
}

#[test]
fn test_reaching_level_five_unlocks_next_pet() {
    let (mut store, _dir) = create_test_store();
    store.add_coins(1000);

    let turtle = store.pets()[0].id.clone();
    // Level 5 needs 120 XP: feed premium (40 XP) three times
    store.feed_pet(&turtle, FoodType::Premium);
    store.feed_pet(&turtle, FoodType::Premium);
    let last = store.feed_pet(&turtle, FoodType::Premium);

    assert_eq!(last.new_level, Some(5));
    assert_eq!(last.unlocked_species.as_deref(), Some("fox"));
    assert!(store.pets()[1].unlocked);
    assert!(!store.pets()[2].unlocked);
}

#[test]
fn test_streak_check_is_idempotent_within_a_day() {
    let (mut store, _dir) = create_test_store();
    let today = parse_date(WEEKDAY);

    let first = store.check_and_update_streak_on(today);
    assert_eq!(first.streak, 1);
    assert!(first.increased);

    let again = store.check_and_update_streak_on(today);
    assert_eq!(again.streak, 1);
    assert!(!again.increased);

    let next = store.check_and_update_streak_on(today + Days::new(1));
    assert_eq!(next.streak, 2);
    assert_eq!(store.streak(), 2);
}

#[test]
fn test_daily_bonus_credits_coins_once_per_day() {
    let (mut store, _dir) = create_test_store();
    let today = parse_date(WEEKDAY);

    let claim = store.claim_daily_bonus_on(today);
    assert!(claim.available);
    assert_eq!(claim.amount, 5);
    assert_eq!(store.coins(), 5);

    let again = store.claim_daily_bonus_on(today);
    assert!(!again.available);
    assert_eq!(store.coins(), 5);

    let tomorrow = store.claim_daily_bonus_on(today + Days::new(1));
    assert!(tomorrow.available);
    assert_eq!(tomorrow.amount, 7);
    assert_eq!(store.coins(), 12);
}

#[test]
fn test_lucky_coin_credits_coins_once_per_day() {
    let (mut store, _dir) = create_test_store();
    let today = parse_date(WEEKDAY);
    let mut rng = FixedRng(17);

    let claim = store.claim_lucky_coin_on(today, &mut rng);
    assert!(claim.available);
    assert_eq!(claim.amount, 17);
    assert_eq!(store.coins(), 17);

    let again = store.claim_lucky_coin_on(today, &mut rng);
    assert!(!again.available);
    assert_eq!(store.coins(), 17);
}

#[test]
fn test_first_session_achievement_pays_fifty() {
    let (mut store, _dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let session = store.add_session(draft(&subject.id, WEEKDAY, "09:00", 30));

    store.complete_session(&session.id, None).unwrap();
    let coins_before = store.coins();

    let unlocked = store.check_achievements();
    assert!(unlocked.contains(&AchievementId::FirstSession));
    assert_eq!(store.coins(), coins_before + 50);

    // Idempotent: a second check unlocks nothing new
    assert!(store.check_achievements().is_empty());
}

#[test]
fn test_state_survives_reload() {
    let (mut store, dir) = create_test_store();
    let subject = store.add_subject("Math", "#88d4ab");
    let session = store.add_session(draft(&subject.id, WEEKDAY, "09:00", 60));
    store.complete_session(&session.id, None).unwrap();
    store.check_and_update_streak_on(parse_date(WEEKDAY));
    let coins = store.coins();

    let reloaded = Store::load(Storage::new(dir.path()));
    assert_eq!(reloaded.coins(), coins);
    assert_eq!(reloaded.streak(), 1);
    assert_eq!(reloaded.subjects().len(), 1);
    assert_eq!(reloaded.sessions().len(), 1);
    assert!(reloaded.sessions()[0].completed);
    assert_eq!(reloaded.pets().len(), store.pets().len());
}

#[test]
fn test_apply_weekly_plan_creates_missing_subjects_and_topics() {
    let (mut store, _dir) = create_test_store();
    // Existing subject should be matched case-insensitively
    let math = store.add_subject("Math", "#88d4ab");

    let plan = store.add_weekly_plan(
        "Week 11",
        vec![
            SessionTemplate {
                date: parse_date(WEEKDAY),
                start_time: parse_time("09:00"),
                duration: 45,
                subject_name: "math".to_string(),
                topic_name: Some("Algebra".to_string()),
                priority: Some(Priority::High),
                kind: None,
                goal: None,
            },
            SessionTemplate {
                date: parse_date(WEEKDAY),
                start_time: parse_time("11:00"),
                duration: 30,
                subject_name: "Chemistry".to_string(),
                topic_name: None,
                priority: None,
                kind: None,
                goal: Some("Read chapter 4".to_string()),
            },
        ],
    );

    let created = store.apply_weekly_plan(&plan.id).unwrap();
    assert_eq!(created, 2);

    // "math" resolved to the existing subject, "Chemistry" was created
    assert_eq!(store.subjects().len(), 2);
    assert_eq!(store.topics().len(), 1);
    assert_eq!(store.topics()[0].subject_id, math.id);
    assert_eq!(store.topics()[0].difficulty, Difficulty::Medium);

    let sessions = store.sessions_for_date(parse_date(WEEKDAY));
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| !s.completed));
    assert_eq!(sessions[0].priority, Priority::High);
    assert_eq!(sessions[1].goal, "Read chapter 4");
}

#[test]
fn test_apply_unknown_plan_is_an_error() {
    let (mut store, _dir) = create_test_store();
    let result = store.apply_weekly_plan("missing");
    assert!(matches!(result, Err(StoreError::PlanNotFound(_))));
}

#[test]
fn test_spend_coins_rejects_overdraft() {
    let (mut store, _dir) = create_test_store();
    store.add_coins(10);
    assert!(!store.spend_coins(11));
    assert_eq!(store.coins(), 10);
    assert!(store.spend_coins(10));
    assert_eq!(store.coins(), 0);
}
