use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use verdant_core::achievements::{AchievementRecord, UnlockedAchievement};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DailyCheckResponse {
    tasks_reset: bool,
    unlocked_achievements: Vec<UnlockedAchievement>,
}

async fn list_achievements(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AchievementRecord>>> {
    state.user_service.get_or_create_user(&user_id).await?;
    let records = state.progression_service.get_achievements(&user_id).await?;
    Ok(Json(records))
}

/// Runs the app-load resynchronization: recompute the count-based
/// achievements, zero out broken streaks, and reopen the daily task
/// ledger. Clients call this on app foreground.
async fn daily_check(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyCheckResponse>> {
    state.user_service.get_or_create_user(&user_id).await?;
    let unlocked_achievements = state
        .progression_service
        .sync_all_achievements(&user_id)
        .await;
    let tasks_reset = state.task_service.check_daily_task_reset(&user_id).await?;
    Ok(Json(DailyCheckResponse {
        tasks_reset,
        unlocked_achievements,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/achievements", get(list_achievements))
        .route("/users/{user_id}/daily-check", post(daily_check))
}
