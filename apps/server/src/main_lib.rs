use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use verdant_core::{
    achievements::{
        ProgressionService, ProgressionServiceTrait, StreakService, StreakServiceTrait,
    },
    activities::{ActivityService, ActivityServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait},
    plants::{PlantService, PlantServiceTrait},
    tasks::{TaskService, TaskServiceTrait},
    users::{UserService, UserServiceTrait},
};
use verdant_storage_sqlite::{
    achievements::AchievementRepository, activities::ActivityRepository, db,
    plants::PlantRepository, tasks::TaskRepository, users::UserRepository,
};

use crate::config::Config;
use crate::push::HttpPushSender;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub plant_service: Arc<dyn PlantServiceTrait + Send + Sync>,
    pub progression_service: Arc<dyn ProgressionServiceTrait + Send + Sync>,
    pub streak_service: Arc<dyn StreakServiceTrait + Send + Sync>,
    pub task_service: Arc<dyn TaskServiceTrait + Send + Sync>,
    pub activity_service: Arc<dyn ActivityServiceTrait + Send + Sync>,
    pub notification_service: Arc<dyn NotificationServiceTrait + Send + Sync>,
    pub http_client: reqwest::Client,
    pub config: Config,
}

pub fn init_tracing() {
    let log_format = std::env::var("VERDANT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let pool = db::create_pool(&config.db_path)?;
    let writer = db::spawn_writer(pool.clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let plant_repo = Arc::new(PlantRepository::new(pool.clone(), writer.clone()));
    let achievement_repo = Arc::new(AchievementRepository::new(pool.clone(), writer.clone()));
    let activity_repo = Arc::new(ActivityRepository::new(pool.clone(), writer.clone()));
    let task_repo = Arc::new(TaskRepository::new(writer.clone()));

    let activity_service = Arc::new(ActivityService::new(activity_repo));
    let push_sender = Arc::new(HttpPushSender::new(config.push_api_url.clone()));

    let state = AppState {
        user_service: Arc::new(UserService::new(user_repo.clone())),
        plant_service: Arc::new(PlantService::new(plant_repo.clone())),
        progression_service: Arc::new(ProgressionService::new(
            achievement_repo.clone(),
            activity_service.clone(),
        )),
        streak_service: Arc::new(StreakService::new(
            achievement_repo,
            activity_service.clone(),
        )),
        task_service: Arc::new(TaskService::new(task_repo)),
        activity_service,
        notification_service: Arc::new(NotificationService::new(
            user_repo,
            plant_repo,
            push_sender,
        )),
        http_client: reqwest::Client::new(),
        config: config.clone(),
    };
    Ok(Arc::new(state))
}
