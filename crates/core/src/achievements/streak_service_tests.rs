use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::achievements_model::{AchievementRecord, StreakScope, UnlockedAchievement};
use super::achievements_traits::{AchievementRepositoryTrait, StreakServiceTrait};
use super::engine;
use super::streak_service::StreakService;
use crate::activities::{ActivityLog, ActivityServiceTrait, ActivityType};
use crate::errors::{DatabaseError, Result};

/// In-memory repository that applies the same engine transitions the
/// SQLite implementation applies inside its transactions.
#[derive(Default)]
struct MockAchievementRepository {
    records: Mutex<Vec<AchievementRecord>>,
    has_pending_plants: Mutex<bool>,
    fail: Mutex<bool>,
}

impl MockAchievementRepository {
    fn upsert(&self, updated: Vec<AchievementRecord>) {
        let mut records = self.records.lock().unwrap();
        for record in updated {
            records.retain(|r| r.id != record.id);
            records.push(record);
        }
    }
}

#[async_trait]
impl AchievementRepositoryTrait for MockAchievementRepository {
    async fn list_achievements(&self, _user_id: &str) -> Result<Vec<AchievementRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn recompute_collection(&self, _user_id: &str) -> Result<Vec<UnlockedAchievement>> {
        unimplemented!("not exercised by streak tests")
    }

    async fn advance_streaks(
        &self,
        user_id: &str,
        scope: StreakScope,
        today: NaiveDate,
    ) -> Result<Vec<UnlockedAchievement>> {
        if *self.fail.lock().unwrap() {
            return Err(DatabaseError::QueryFailed("mock failure".to_string()).into());
        }
        if *self.has_pending_plants.lock().unwrap() {
            return Ok(Vec::new());
        }
        let snapshot = self.records.lock().unwrap().clone();
        let outcome = engine::plan_streak_advance(user_id, &snapshot, scope, today, Utc::now());
        self.upsert(outcome.records);
        Ok(outcome.newly_unlocked)
    }

    async fn run_daily_reset(&self, _user_id: &str, today: NaiveDate) -> Result<()> {
        if !*self.has_pending_plants.lock().unwrap() {
            return Ok(());
        }
        let snapshot = self.records.lock().unwrap().clone();
        self.upsert(engine::plan_daily_reset(&snapshot, today));
        Ok(())
    }
}

// Shared with the progression service tests.
#[derive(Default)]
pub(crate) struct MockActivityService {
    pub(crate) logged: Mutex<Vec<(String, u64)>>,
}

#[async_trait]
impl ActivityServiceTrait for MockActivityService {
    async fn log_plant_added(&self, _user_id: &str, _plant_name: &str) -> Result<ActivityLog> {
        unimplemented!()
    }
    async fn log_plant_watered(&self, _user_id: &str, _plant_name: &str) -> Result<ActivityLog> {
        unimplemented!()
    }
    async fn log_plant_photo(&self, _user_id: &str, _plant_name: &str) -> Result<ActivityLog> {
        unimplemented!()
    }
    async fn log_plant_deleted(&self, _user_id: &str, _plant_name: &str) -> Result<ActivityLog> {
        unimplemented!()
    }

    async fn log_achievement_unlocked(
        &self,
        user_id: &str,
        achievement: &UnlockedAchievement,
    ) -> Result<ActivityLog> {
        self.logged
            .lock()
            .unwrap()
            .push((achievement.id.clone(), achievement.xp_reward));
        Ok(ActivityLog {
            id: "a1".to_string(),
            user_id: user_id.to_string(),
            activity_type: ActivityType::AchievementUnlocked,
            description: String::new(),
            xp_delta: achievement.xp_reward,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        })
    }

    async fn get_recent_activity(&self, _user_id: &str, _limit: i64) -> Result<Vec<ActivityLog>> {
        Ok(Vec::new())
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn service_with(
    repo: Arc<MockAchievementRepository>,
    activities: Arc<MockActivityService>,
) -> StreakService {
    StreakService::new(repo, activities)
}

#[tokio::test]
async fn test_five_day_streak_unlocks_and_credits_xp() {
    let repo = Arc::new(MockAchievementRepository::default());
    let activities = Arc::new(MockActivityService::default());
    let service = service_with(repo.clone(), activities.clone());

    for d in 10..=13 {
        let unlocked = service
            .advance_on("u1", StreakScope::Watering, day(d))
            .await
            .unwrap();
        assert!(unlocked.is_empty());
    }
    let unlocked = service
        .advance_on("u1", StreakScope::Watering, day(14))
        .await
        .unwrap();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].id, super::WATER_WARRIOR);

    // The unlock was pushed through the activity log with its reward.
    let logged = activities.logged.lock().unwrap();
    assert_eq!(logged.as_slice(), &[(super::WATER_WARRIOR.to_string(), 25)]);
}

#[tokio::test]
async fn test_double_fire_same_day_is_idempotent() {
    let repo = Arc::new(MockAchievementRepository::default());
    let activities = Arc::new(MockActivityService::default());
    let service = service_with(repo.clone(), activities.clone());

    let first = service
        .advance_on("u1", StreakScope::Watering, day(10))
        .await
        .unwrap();
    let second = service
        .advance_on("u1", StreakScope::Watering, day(10))
        .await
        .unwrap();
    assert!(first.is_empty() && second.is_empty());

    let records = repo.records.lock().unwrap();
    for record in records.iter() {
        assert_eq!(record.progress, 1);
    }
}

#[tokio::test]
async fn test_pending_plants_block_transition() {
    let repo = Arc::new(MockAchievementRepository::default());
    *repo.has_pending_plants.lock().unwrap() = true;
    let activities = Arc::new(MockActivityService::default());
    let service = service_with(repo.clone(), activities);

    let unlocked = service
        .advance_on("u1", StreakScope::Watering, day(10))
        .await
        .unwrap();
    assert!(unlocked.is_empty());
    assert!(repo.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_repo_failure_yields_empty_unlocks() {
    let repo = Arc::new(MockAchievementRepository::default());
    *repo.fail.lock().unwrap() = true;
    let activities = Arc::new(MockActivityService::default());
    let service = service_with(repo, activities.clone());

    // The hook swallows the error and reports nothing unlocked.
    let unlocked = service.on_plant_watered("u1").await;
    assert!(unlocked.is_empty());
    assert!(activities.logged.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_daily_reset_zeroes_stale_progress() {
    let repo = Arc::new(MockAchievementRepository::default());
    let activities = Arc::new(MockActivityService::default());
    let service = service_with(repo.clone(), activities);

    for d in 10..=12 {
        service
            .advance_on("u1", StreakScope::Watering, day(d))
            .await
            .unwrap();
    }
    // Days later with tasks pending: the lazy reset wipes the streak.
    *repo.has_pending_plants.lock().unwrap() = true;
    repo.run_daily_reset("u1", day(18)).await.unwrap();

    let records = repo.records.lock().unwrap();
    assert!(records.iter().all(|r| r.progress == 0));
}
