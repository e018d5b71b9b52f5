use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use verdant_core::achievements::UnlockedAchievement;
use verdant_core::plants::{CareTaskType, NewPlant, Plant, PlantUpdate};
use verdant_core::tasks::TaskCompletionResult;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlantResponse {
    plant: Plant,
    unlocked_achievements: Vec<UnlockedAchievement>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse {
    deleted: bool,
    unlocked_achievements: Vec<UnlockedAchievement>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CareResponse {
    plant: Plant,
    task: TaskCompletionResult,
    unlocked_achievements: Vec<UnlockedAchievement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotoPayload {
    photo_url: String,
}

#[derive(Deserialize)]
struct DueQuery {
    date: Option<chrono::NaiveDate>,
}

async fn list_plants(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Plant>>> {
    let plants = state.plant_service.get_plants(&user_id).await?;
    Ok(Json(plants))
}

async fn due_plants(
    Path(user_id): Path<String>,
    axum::extract::Query(query): axum::extract::Query<DueQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Plant>>> {
    let target = query
        .date
        .unwrap_or_else(verdant_core::utils::time_utils::care_date_today);
    let plants = state
        .plant_service
        .plants_due_for_watering(&user_id, target)
        .await?;
    Ok(Json(plants))
}

async fn get_plant(
    Path((user_id, plant_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Plant>> {
    let plant = state.plant_service.get_plant(&user_id, &plant_id).await?;
    Ok(Json(plant))
}

async fn create_plant(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut new_plant): Json<NewPlant>,
) -> ApiResult<Json<PlantResponse>> {
    // The account must exist before its counters can be touched.
    state.user_service.get_or_create_user(&user_id).await?;
    new_plant.user_id = user_id.clone();
    let plant = state.plant_service.create_plant(new_plant).await?;

    if let Err(e) = state
        .activity_service
        .log_plant_added(&user_id, &plant.name)
        .await
    {
        tracing::warn!("failed to log plant addition: {e}");
    }
    let unlocked_achievements = state.progression_service.on_plant_added(&user_id).await;

    Ok(Json(PlantResponse {
        plant,
        unlocked_achievements,
    }))
}

async fn update_plant(
    Path((user_id, plant_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<PlantUpdate>,
) -> ApiResult<Json<Plant>> {
    let plant = state
        .plant_service
        .update_plant(&user_id, &plant_id, update)
        .await?;
    Ok(Json(plant))
}

async fn delete_plant(
    Path((user_id, plant_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DeleteResponse>> {
    let plant = state.plant_service.get_plant(&user_id, &plant_id).await?;
    let deleted = state.plant_service.delete_plant(&user_id, &plant_id).await? > 0;

    if deleted {
        if let Err(e) = state
            .activity_service
            .log_plant_deleted(&user_id, &plant.name)
            .await
        {
            tracing::warn!("failed to log plant removal: {e}");
        }
    }
    let unlocked_achievements = state.progression_service.on_plant_removed(&user_id).await;

    Ok(Json(DeleteResponse {
        deleted,
        unlocked_achievements,
    }))
}

async fn set_photo(
    Path((user_id, plant_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PhotoPayload>,
) -> ApiResult<Json<PlantResponse>> {
    let update = PlantUpdate {
        photo_url: Some(payload.photo_url),
        ..PlantUpdate::default()
    };
    let plant = state
        .plant_service
        .update_plant(&user_id, &plant_id, update)
        .await?;

    if let Err(e) = state
        .activity_service
        .log_plant_photo(&user_id, &plant.name)
        .await
    {
        tracing::warn!("failed to log plant photo: {e}");
    }
    let unlocked_achievements = state
        .progression_service
        .on_plant_photographed(&user_id)
        .await;

    Ok(Json(PlantResponse {
        plant,
        unlocked_achievements,
    }))
}

/// One care action drives the whole progression pipeline: lazy streak
/// reset, the plant's service timestamp, the task/XP ledger, the activity
/// log, and the streak advance.
async fn complete_care(
    Path((user_id, plant_id, task)): Path<(String, String, CareTaskType)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CareResponse>> {
    state.user_service.get_or_create_user(&user_id).await?;
    state.streak_service.check_daily_reset(&user_id).await;

    let plant = state
        .plant_service
        .record_care(&user_id, &plant_id, task)
        .await?;
    let task_result = state.task_service.complete_task(&user_id, &plant_id, task).await;

    if task == CareTaskType::Water && !task_result.already_completed && task_result.error.is_none()
    {
        if let Err(e) = state
            .activity_service
            .log_plant_watered(&user_id, &plant.name)
            .await
        {
            tracing::warn!("failed to log watering: {e}");
        }
    }

    let mut unlocked_achievements = Vec::new();
    if task == CareTaskType::Water {
        unlocked_achievements.extend(state.streak_service.on_plant_watered(&user_id).await);
    }
    // The all-dimensions streak gets a chance after every care action;
    // its pending guard decides whether the day actually closed.
    unlocked_achievements.extend(state.streak_service.on_all_plants_healthy(&user_id).await);

    Ok(Json(CareResponse {
        plant,
        task: task_result,
        unlocked_achievements,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/{user_id}/plants",
            get(list_plants).post(create_plant),
        )
        .route("/users/{user_id}/plants/due", get(due_plants))
        .route(
            "/users/{user_id}/plants/{plant_id}",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
        .route("/users/{user_id}/plants/{plant_id}/photo", post(set_photo))
        .route(
            "/users/{user_id}/plants/{plant_id}/care/{task}",
            post(complete_care),
        )
}
