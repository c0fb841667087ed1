//! Application state controller
//!
//! One `Store` owns the full in-memory state and a `Storage` handle. State
//! is loaded explicitly at startup and each mutation is followed by an
//! explicit fire-and-forget save of the touched collections: a persistence
//! failure is logged and never corrupts the in-memory state, at the cost of
//! possibly losing the last mutation on a crash.
//!
//! All day-boundary checks use the device-local calendar date. That is a
//! deliberate simplification for a single-device personal tool; behavior
//! around midnight depends on the device timezone.

mod persistence;

pub use persistence::{keys, Storage};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::{AchievementDef, AchievementId, AchievementState, StatsSnapshot, ACHIEVEMENTS};
use crate::domain::{
    Difficulty, FoodType, Pet, Priority, SessionDraft, SessionKind, SessionPatch, SessionTemplate,
    StudySession, Subject, Topic, WeeklyPlan,
};
use crate::insights::{analyze_day_energy, compute_learning_insights, EnergyHint, LearningInsight};
use crate::pets::{crossed_unlock_milestone, initial_pets, level_from_total_xp, stage_from_level};
use crate::rewards::{
    calculate_reward, check_and_update_streak, claim_daily_bonus, claim_lucky_coin,
    is_weekend_date, local_today, CoinRng, DailyBonus, DailyBonusClaim, LuckyCoin, LuckyCoinClaim,
    RewardBreakdown, StreakUpdate,
};

/// Owner id for the single local user
pub const LOCAL_USER_ID: &str = "local";

/// Color palette cycled when applying a plan creates new subjects
const SUBJECT_COLORS: &[&str] = &[
    "#88d4ab", "#a8e6cf", "#b5e8f0", "#93c5fd", "#3b82f6", "#d4c5f9", "#a78bfa", "#f9c5d1",
    "#fca5a5", "#ffdab9", "#fb923c", "#fde047", "#2dd4bf", "#f472b6", "#94a3b8",
];

/// Local user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: LOCAL_USER_ID.to_string(),
            name: String::new(),
        }
    }
}

/// Visit streak as persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StreakRecord {
    streak: u32,
    last_visit: Option<NaiveDate>,
}

/// Errors for store mutations that reference a missing entity.
///
/// Policy rejections (insufficient coins, locked pet, already-claimed
/// bonus) are NOT errors; they come back as structured results.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("subject not found: {0}")]
    SubjectNotFound(String),

    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("weekly plan not found: {0}")]
    PlanNotFound(String),
}

/// Outcome of a pet feeding attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOutcome {
    pub success: bool,
    pub new_xp: Option<u32>,
    pub new_level: Option<u32>,
    pub leveled_up: bool,
    /// Species unlocked by this feeding, when a level milestone was crossed
    pub unlocked_species: Option<String>,
}

impl FeedOutcome {
    fn rejected() -> Self {
        Self {
            success: false,
            new_xp: None,
            new_level: None,
            leveled_up: false,
            unlocked_species: None,
        }
    }
}

/// In-memory application state plus its storage handle
pub struct Store {
    storage: Storage,
    profile: UserProfile,
    subjects: Vec<Subject>,
    topics: Vec<Topic>,
    sessions: Vec<StudySession>,
    coins: u32,
    pets: Vec<Pet>,
    streak: u32,
    last_visit: Option<NaiveDate>,
    achievements: Vec<AchievementState>,
    daily_bonus: DailyBonus,
    lucky_coin: LuckyCoin,
    weekly_plans: Vec<WeeklyPlan>,
}

impl Store {
    /// Load all collections from storage, seeding defaults for a fresh
    /// install (full pet roster with only the first unlocked, all
    /// achievements locked).
    pub fn load(storage: Storage) -> Self {
        let profile = storage.load(keys::PROFILE, UserProfile::default());
        let subjects = storage.load(keys::SUBJECTS, Vec::new());
        let topics = storage.load(keys::TOPICS, Vec::new());
        let sessions = storage.load(keys::SESSIONS, Vec::new());
        let coins = storage.load(keys::COINS, 0u32);
        let mut pets: Vec<Pet> = storage.load(keys::PETS, Vec::new());
        if pets.is_empty() {
            pets = initial_pets();
        }
        let streak_record: StreakRecord = storage.load(keys::STREAK, StreakRecord::default());
        let stored: Vec<AchievementState> = storage.load(keys::ACHIEVEMENTS, Vec::new());
        // Stored state merged over the definition table so new achievements
        // added after an install show up locked
        let achievements = ACHIEVEMENTS
            .iter()
            .map(|def| {
                stored
                    .iter()
                    .find(|s| s.id == def.id)
                    .cloned()
                    .unwrap_or(AchievementState {
                        id: def.id,
                        unlocked: false,
                        unlocked_at: None,
                    })
            })
            .collect();
        let daily_bonus = storage.load(keys::DAILY_BONUS, DailyBonus::default());
        let lucky_coin = storage.load(keys::LUCKY_COIN, LuckyCoin::default());
        let weekly_plans = storage.load(keys::WEEKLY_PLANS, Vec::new());

        Self {
            storage,
            profile,
            subjects,
            topics,
            sessions,
            coins,
            pets,
            streak: streak_record.streak,
            last_visit: streak_record.last_visit,
            achievements,
            daily_bonus,
            lucky_coin,
            weekly_plans,
        }
    }

    /// Fire-and-forget save; failures are logged, never propagated
    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.storage.save(key, value) {
            tracing::warn!("failed to persist {key}: {err:#}");
        }
    }

    fn persist_streak(&self) {
        self.persist(
            keys::STREAK,
            &StreakRecord {
                streak: self.streak,
                last_visit: self.last_visit,
            },
        );
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    // ========================================
    // ACCESSORS
    // ========================================

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_visit(&self) -> Option<NaiveDate> {
        self.last_visit
    }

    pub fn achievements(&self) -> &[AchievementState] {
        &self.achievements
    }

    pub fn daily_bonus(&self) -> &DailyBonus {
        &self.daily_bonus
    }

    pub fn lucky_coin(&self) -> &LuckyCoin {
        &self.lucky_coin
    }

    pub fn weekly_plans(&self) -> &[WeeklyPlan] {
        &self.weekly_plans
    }

    pub fn subject_by_id(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn topic_by_id(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn session_by_id(&self, id: &str) -> Option<&StudySession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn weekly_plan_by_id(&self, id: &str) -> Option<&WeeklyPlan> {
        self.weekly_plans.iter().find(|p| p.id == id)
    }

    /// Sessions for a calendar date, sorted by start time
    pub fn sessions_for_date(&self, date: NaiveDate) -> Vec<StudySession> {
        let mut day: Vec<StudySession> = self
            .sessions
            .iter()
            .filter(|s| s.date == date)
            .cloned()
            .collect();
        day.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        day
    }

    // ========================================
    // PROFILE
    // ========================================

    pub fn set_user_name(&mut self, name: &str) {
        self.profile.name = name.trim().to_string();
        self.persist(keys::PROFILE, &self.profile);
    }

    // ========================================
    // SUBJECTS & TOPICS
    // ========================================

    pub fn add_subject(&mut self, name: &str, color: &str) -> Subject {
        let subject = Subject {
            id: Self::new_id(),
            user_id: self.profile.id.clone(),
            name: name.to_string(),
            color: color.to_string(),
        };
        tracing::debug!("adding subject {}", subject.name);
        self.subjects.push(subject.clone());
        self.persist(keys::SUBJECTS, &self.subjects);
        subject
    }

    pub fn update_subject(
        &mut self,
        id: &str,
        name: Option<&str>,
        color: Option<&str>,
    ) -> Result<(), StoreError> {
        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::SubjectNotFound(id.to_string()))?;
        if let Some(name) = name {
            subject.name = name.to_string();
        }
        if let Some(color) = color {
            subject.color = color.to_string();
        }
        self.persist(keys::SUBJECTS, &self.subjects);
        Ok(())
    }

    /// Delete a subject and cascade to its topics and sessions
    pub fn delete_subject(&mut self, id: &str) {
        self.subjects.retain(|s| s.id != id);
        self.topics.retain(|t| t.subject_id != id);
        self.sessions.retain(|s| s.subject_id != id);
        self.persist(keys::SUBJECTS, &self.subjects);
        self.persist(keys::TOPICS, &self.topics);
        self.persist(keys::SESSIONS, &self.sessions);
    }

    pub fn add_topic(
        &mut self,
        subject_id: &str,
        name: &str,
        difficulty: Difficulty,
        exam_relevant: bool,
    ) -> Result<Topic, StoreError> {
        if self.subject_by_id(subject_id).is_none() {
            return Err(StoreError::SubjectNotFound(subject_id.to_string()));
        }
        let topic = Topic {
            id: Self::new_id(),
            subject_id: subject_id.to_string(),
            name: name.to_string(),
            difficulty,
            exam_relevant,
        };
        self.topics.push(topic.clone());
        self.persist(keys::TOPICS, &self.topics);
        Ok(topic)
    }

    pub fn update_topic(
        &mut self,
        id: &str,
        name: Option<&str>,
        difficulty: Option<Difficulty>,
        exam_relevant: Option<bool>,
    ) -> Result<(), StoreError> {
        let topic = self
            .topics
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TopicNotFound(id.to_string()))?;
        if let Some(name) = name {
            topic.name = name.to_string();
        }
        if let Some(difficulty) = difficulty {
            topic.difficulty = difficulty;
        }
        if let Some(exam_relevant) = exam_relevant {
            topic.exam_relevant = exam_relevant;
        }
        self.persist(keys::TOPICS, &self.topics);
        Ok(())
    }

    /// Delete a topic; referencing sessions are detached, not deleted
    pub fn delete_topic(&mut self, id: &str) {
        self.topics.retain(|t| t.id != id);
        for session in &mut self.sessions {
            if session.topic_id.as_deref() == Some(id) {
                session.topic_id = None;
            }
        }
        self.persist(keys::TOPICS, &self.topics);
        self.persist(keys::SESSIONS, &self.sessions);
    }

    // ========================================
    // SESSIONS
    // ========================================

    pub fn add_session(&mut self, draft: SessionDraft) -> StudySession {
        let session = StudySession {
            id: Self::new_id(),
            user_id: self.profile.id.clone(),
            subject_id: draft.subject_id,
            topic_id: draft.topic_id,
            date: draft.date,
            start_time: draft.start_time,
            duration: draft.duration,
            kind: draft.kind,
            goal: draft.goal,
            priority: draft.priority,
            completed: false,
            exertion: draft.exertion,
            feedback_difficulty: None,
        };
        self.sessions.push(session.clone());
        self.persist(keys::SESSIONS, &self.sessions);
        session
    }

    /// Edit a planned session. Completion state is not part of a patch;
    /// see `complete_session` and `reopen_session`.
    pub fn update_session(&mut self, id: &str, patch: SessionPatch) -> Result<(), StoreError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        if let Some(subject_id) = patch.subject_id {
            session.subject_id = subject_id;
        }
        if let Some(topic_id) = patch.topic_id {
            session.topic_id = topic_id;
        }
        if let Some(date) = patch.date {
            session.date = date;
        }
        if let Some(start_time) = patch.start_time {
            session.start_time = start_time;
        }
        if let Some(duration) = patch.duration {
            session.duration = duration;
        }
        if let Some(kind) = patch.kind {
            session.kind = kind;
        }
        if let Some(goal) = patch.goal {
            session.goal = goal;
        }
        if let Some(priority) = patch.priority {
            session.priority = priority;
        }
        if let Some(exertion) = patch.exertion {
            session.exertion = exertion;
        }
        self.persist(keys::SESSIONS, &self.sessions);
        Ok(())
    }

    /// Mark a session complete and pay its coin reward.
    ///
    /// The reward fires only on the incomplete-to-complete transition:
    /// completing an already-complete session just records the feedback and
    /// returns `None`. The combo count is the number of sessions already
    /// completed on the session's own calendar date.
    pub fn complete_session(
        &mut self,
        id: &str,
        feedback: Option<crate::domain::FeltDifficulty>,
    ) -> Result<Option<RewardBreakdown>, StoreError> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;

        if self.sessions[index].completed {
            if let Some(feedback) = feedback {
                self.sessions[index].feedback_difficulty = Some(feedback);
                self.persist(keys::SESSIONS, &self.sessions);
            }
            return Ok(None);
        }

        let date = self.sessions[index].date;
        let sessions_today = self
            .sessions
            .iter()
            .filter(|s| s.date == date && s.completed)
            .count() as u32;

        self.sessions[index].completed = true;
        self.sessions[index].feedback_difficulty = feedback;

        let breakdown = calculate_reward(
            &self.sessions[index],
            self.streak,
            sessions_today,
            is_weekend_date(date),
        );
        tracing::debug!("session {id} completed, +{} coins", breakdown.total);
        self.coins += breakdown.total;

        self.persist(keys::SESSIONS, &self.sessions);
        self.persist(keys::COINS, &self.coins);
        Ok(Some(breakdown))
    }

    /// Revert a session to incomplete. Clears its feedback so incomplete
    /// sessions never carry felt difficulty; no coins are clawed back and
    /// re-completing it later awards again.
    pub fn reopen_session(&mut self, id: &str) -> Result<(), StoreError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))?;
        session.completed = false;
        session.feedback_difficulty = None;
        self.persist(keys::SESSIONS, &self.sessions);
        Ok(())
    }

    pub fn delete_session(&mut self, id: &str) {
        self.sessions.retain(|s| s.id != id);
        self.persist(keys::SESSIONS, &self.sessions);
    }

    // ========================================
    // COINS
    // ========================================

    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
        self.persist(keys::COINS, &self.coins);
    }

    /// Spend coins; returns false (and changes nothing) when the balance
    /// is insufficient.
    pub fn spend_coins(&mut self, amount: u32) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        self.persist(keys::COINS, &self.coins);
        true
    }

    // ========================================
    // PETS
    // ========================================

    /// Feed a pet. Rejected without any state change when the pet is
    /// missing, locked, or the balance cannot cover the food cost. A level
    /// crossing of 5 or 10 unlocks the next pet in species order as part of
    /// the same update.
    pub fn feed_pet(&mut self, pet_id: &str, food_type: FoodType) -> FeedOutcome {
        let food = food_type.food();
        let Some(index) = self.pets.iter().position(|p| p.id == pet_id) else {
            return FeedOutcome::rejected();
        };
        if !self.pets[index].unlocked || self.coins < food.cost {
            return FeedOutcome::rejected();
        }

        self.coins -= food.cost;

        let old_level = self.pets[index].level;
        let new_xp = self.pets[index].xp + food.xp;
        let new_level = level_from_total_xp(new_xp);
        self.pets[index].xp = new_xp;
        self.pets[index].level = new_level;
        self.pets[index].stage = stage_from_level(new_level);

        let mut unlocked_species = None;
        if crossed_unlock_milestone(old_level, new_level) {
            if let Some(next) = self.pets.iter_mut().find(|p| !p.unlocked) {
                next.unlocked = true;
                unlocked_species = Some(next.species.clone());
                tracing::debug!("unlocked pet {}", next.species);
            }
        }

        self.persist(keys::PETS, &self.pets);
        self.persist(keys::COINS, &self.coins);

        FeedOutcome {
            success: true,
            new_xp: Some(new_xp),
            new_level: Some(new_level),
            leveled_up: new_level > old_level,
            unlocked_species,
        }
    }

    // ========================================
    // STREAK & BONUSES
    // ========================================

    /// Run the day-boundary streak check for the current local date
    pub fn check_and_update_streak(&mut self) -> StreakUpdate {
        self.check_and_update_streak_on(local_today())
    }

    /// Streak check with an explicit date (idempotent within one day)
    pub fn check_and_update_streak_on(&mut self, today: NaiveDate) -> StreakUpdate {
        let update = check_and_update_streak(self.last_visit, self.streak, today);
        if update.increased || self.last_visit.is_none() {
            self.streak = update.streak;
            self.last_visit = Some(update.last_visit);
            self.persist_streak();
        }
        update
    }

    /// Claim the daily bonus for the current local date
    pub fn claim_daily_bonus(&mut self) -> DailyBonusClaim {
        self.claim_daily_bonus_on(local_today())
    }

    pub fn claim_daily_bonus_on(&mut self, today: NaiveDate) -> DailyBonusClaim {
        let claim = claim_daily_bonus(&self.daily_bonus, today);
        if claim.available {
            self.daily_bonus = claim.ledger.clone();
            self.coins += claim.amount;
            self.persist(keys::DAILY_BONUS, &self.daily_bonus);
            self.persist(keys::COINS, &self.coins);
        }
        claim
    }

    /// Claim the lucky coin for the current local date
    pub fn claim_lucky_coin(&mut self, rng: &mut dyn CoinRng) -> LuckyCoinClaim {
        self.claim_lucky_coin_on(local_today(), rng)
    }

    pub fn claim_lucky_coin_on(&mut self, today: NaiveDate, rng: &mut dyn CoinRng) -> LuckyCoinClaim {
        let claim = claim_lucky_coin(&self.lucky_coin, today, rng);
        if claim.available {
            self.lucky_coin = claim.ledger.clone();
            self.coins += claim.amount;
            self.persist(keys::LUCKY_COIN, &self.lucky_coin);
            self.persist(keys::COINS, &self.coins);
        }
        claim
    }

    // ========================================
    // ACHIEVEMENTS
    // ========================================

    /// Build the current stats snapshot for achievement checks
    fn stats_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_sessions: self.sessions.iter().filter(|s| s.completed).count() as u64,
            streak: self.streak,
            coins: self.coins,
            max_pet_level: self.pets.iter().map(|p| p.level).max().unwrap_or(0),
            unlocked_pets: self.pets.iter().filter(|p| p.unlocked).count(),
            total_pets: self.pets.len(),
        }
    }

    /// Re-evaluate achievements against current stats; credits the coin
    /// reward for each newly unlocked one exactly once.
    pub fn check_achievements(&mut self) -> Vec<AchievementId> {
        let snapshot = self.stats_snapshot();
        let check =
            crate::achievements::check_achievements(&snapshot, &self.achievements, Utc::now());
        self.achievements = check.achievements;

        if !check.newly_unlocked.is_empty() {
            for id in &check.newly_unlocked {
                let def = AchievementDef::get(*id);
                self.coins += def.coin_reward;
                tracing::debug!("achievement unlocked: {} (+{})", def.name, def.coin_reward);
            }
            self.persist(keys::ACHIEVEMENTS, &self.achievements);
            self.persist(keys::COINS, &self.coins);
        }

        check.newly_unlocked
    }

    // ========================================
    // ANALYZERS (read-only)
    // ========================================

    /// Energy balance hint for one day's schedule
    pub fn day_energy_hint(&self, date: NaiveDate) -> Option<EnergyHint> {
        analyze_day_energy(&self.sessions_for_date(date))
    }

    /// Learning insights as of the current local date
    pub fn learning_insights(&self) -> Vec<LearningInsight> {
        self.learning_insights_on(local_today())
    }

    pub fn learning_insights_on(&self, today: NaiveDate) -> Vec<LearningInsight> {
        compute_learning_insights(
            &self.sessions,
            &self.subjects,
            |date| self.sessions_for_date(date),
            today,
        )
    }

    // ========================================
    // WEEKLY PLANS
    // ========================================

    pub fn add_weekly_plan(&mut self, name: &str, sessions: Vec<SessionTemplate>) -> WeeklyPlan {
        let plan = WeeklyPlan {
            id: Self::new_id(),
            user_id: self.profile.id.clone(),
            name: name.to_string(),
            created_at: Utc::now(),
            sessions,
        };
        self.weekly_plans.push(plan.clone());
        self.persist(keys::WEEKLY_PLANS, &self.weekly_plans);
        plan
    }

    pub fn delete_weekly_plan(&mut self, id: &str) {
        self.weekly_plans.retain(|p| p.id != id);
        self.persist(keys::WEEKLY_PLANS, &self.weekly_plans);
    }

    /// Apply a plan: resolve subject and topic templates by name
    /// (case-insensitive), create whatever is missing, then create all
    /// sessions as incomplete. Returns the number of sessions created.
    pub fn apply_weekly_plan(&mut self, id: &str) -> Result<usize, StoreError> {
        let plan = self
            .weekly_plan_by_id(id)
            .cloned()
            .ok_or_else(|| StoreError::PlanNotFound(id.to_string()))?;

        let mut created = 0;
        for template in &plan.sessions {
            let subject_id = match self
                .subjects
                .iter()
                .find(|s| s.name.to_lowercase() == template.subject_name.to_lowercase())
            {
                Some(subject) => subject.id.clone(),
                None => {
                    let color = SUBJECT_COLORS[self.subjects.len() % SUBJECT_COLORS.len()];
                    self.add_subject(&template.subject_name, color).id
                }
            };

            let mut topic_id = None;
            if let Some(topic_name) = &template.topic_name {
                let existing = self.topics.iter().find(|t| {
                    t.subject_id == subject_id && t.name.to_lowercase() == topic_name.to_lowercase()
                });
                topic_id = Some(match existing {
                    Some(topic) => topic.id.clone(),
                    None => {
                        self.add_topic(&subject_id, topic_name, Difficulty::Medium, false)?
                            .id
                    }
                });
            }

            self.add_session(SessionDraft {
                subject_id,
                topic_id,
                date: template.date,
                start_time: template.start_time,
                duration: template.duration,
                kind: template.kind.unwrap_or(SessionKind::NewTopic),
                goal: template.goal.clone().unwrap_or_default(),
                priority: template.priority.unwrap_or(Priority::Medium),
                exertion: None,
            });
            created += 1;
        }

        Ok(created)
    }
}
