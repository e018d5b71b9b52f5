//! Repository tests against a real SQLite file, exercising the writer
//! actor and the read-modify-write jobs end to end.

use chrono::Utc;
use tempfile::TempDir;
use verdant_core::achievements::{
    AchievementRepositoryTrait, StreakScope, FIRST_PLANT, WATER_WARRIOR,
};
use verdant_core::plants::{
    CareTaskType, FertilizingFrequency, MaintenanceFrequency, Plant, PlantRepositoryTrait,
    WateringFrequency,
};
use verdant_core::tasks::TaskRepositoryTrait;
use verdant_core::users::UserRepositoryTrait;
use verdant_core::utils::time_utils::care_date_today;
use verdant_storage_sqlite::{
    achievements::AchievementRepository, db, plants::PlantRepository, tasks::TaskRepository,
    users::UserRepository,
};

struct Harness {
    _dir: TempDir,
    users: UserRepository,
    plants: PlantRepository,
    achievements: AchievementRepository,
    tasks: TaskRepository,
}

fn harness() -> Harness {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir
        .path()
        .join("verdant.db")
        .to_string_lossy()
        .into_owned();
    db::init(&db_path).expect("db init");
    let pool = db::create_pool(&db_path).expect("pool");
    let writer = db::spawn_writer(pool.clone());
    Harness {
        _dir: dir,
        users: UserRepository::new(pool.clone(), writer.clone()),
        plants: PlantRepository::new(pool.clone(), writer.clone()),
        achievements: AchievementRepository::new(pool.clone(), writer.clone()),
        tasks: TaskRepository::new(writer),
    }
}

/// A plant whose watering is already handled for today.
fn watered_plant(id: &str, user_id: &str) -> Plant {
    let now = Utc::now();
    Plant {
        id: id.to_string(),
        user_id: user_id.to_string(),
        name: "Fern".to_string(),
        plant_type: "Fern".to_string(),
        watering_frequency: WateringFrequency::Daily,
        custom_watering_days: None,
        fertilizing_frequency: FertilizingFrequency::Never,
        custom_fertilizing_weeks: None,
        maintenance_frequency: MaintenanceFrequency::Never,
        custom_maintenance_weeks: None,
        last_watered: Some(now),
        last_fertilized: None,
        last_maintenance: None,
        photo_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_complete_task_pays_each_task_once() {
    let h = harness();
    h.users.get_or_create_user("u1").await.unwrap();

    let first = h
        .tasks
        .complete_task("u1", "p1", CareTaskType::Water)
        .await
        .unwrap();
    assert_eq!(first.xp_earned, 30);
    assert!(!first.already_completed);

    let second = h
        .tasks
        .complete_task("u1", "p1", CareTaskType::Water)
        .await
        .unwrap();
    assert!(second.already_completed);
    assert_eq!(second.xp_earned, 0);
    assert_eq!(second.total_xp, 30);

    let user = h.users.get_user("u1").await.unwrap();
    assert_eq!(user.xp, 30);
    assert!(user
        .tasks_completed_today
        .contains(&"p1:water".to_string()));
}

#[tokio::test]
async fn test_concurrent_streak_advances_count_a_day_once() {
    let h = harness();
    h.users.get_or_create_user("u1").await.unwrap();
    h.plants
        .insert_plant(watered_plant("p1", "u1"))
        .await
        .unwrap();

    let today = care_date_today();
    let (a, b) = tokio::join!(
        h.achievements
            .advance_streaks("u1", StreakScope::Watering, today),
        h.achievements
            .advance_streaks("u1", StreakScope::Watering, today),
    );
    a.unwrap();
    b.unwrap();

    let records = h.achievements.list_achievements("u1").await.unwrap();
    let warrior = records.iter().find(|r| r.id == WATER_WARRIOR).unwrap();
    assert_eq!(warrior.progress, 1);
    assert_eq!(warrior.last_completed_date(), Some(today));
}

#[tokio::test]
async fn test_recompute_keeps_first_plant_through_collection_wipe() {
    let h = harness();
    h.users.get_or_create_user("u1").await.unwrap();
    h.plants
        .insert_plant(watered_plant("p1", "u1"))
        .await
        .unwrap();

    let unlocked = h.achievements.recompute_collection("u1").await.unwrap();
    assert!(unlocked.iter().any(|u| u.id == FIRST_PLANT));
    let user = h.users.get_user("u1").await.unwrap();
    assert_eq!(user.number_of_plants, 1);

    h.plants.delete_plant("u1", "p1").await.unwrap();
    let after = h.achievements.recompute_collection("u1").await.unwrap();
    assert!(after.is_empty());

    // The badge and its timestamp survive the round trip through the
    // Text columns; progress follows the collection down to zero.
    let records = h.achievements.list_achievements("u1").await.unwrap();
    let first = records.iter().find(|r| r.id == FIRST_PLANT).unwrap();
    assert!(first.unlocked);
    assert_eq!(first.progress, 0);
    assert!(first.unlocked_date.is_some());

    let user = h.users.get_user("u1").await.unwrap();
    assert_eq!(user.number_of_plants, 0);
}

#[tokio::test]
async fn test_push_tokens_round_trip_and_dedupe() {
    let h = harness();
    h.users.get_or_create_user("u1").await.unwrap();

    h.users.add_push_token("u1", "t1").await.unwrap();
    let user = h.users.add_push_token("u1", "t1").await.unwrap();
    assert_eq!(user.push_tokens, vec!["t1".to_string()]);

    let user = h.users.remove_push_token("u1", "t1").await.unwrap();
    assert!(user.push_tokens.is_empty());

    let user = h.users.get_user("u1").await.unwrap();
    assert!(user.push_tokens.is_empty());
}
