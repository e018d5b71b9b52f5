use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use verdant_core::levels::{self, LevelProgress};
use verdant_core::users::{NotificationSettingsUpdate, User};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    #[serde(flatten)]
    user: User,
    level_progress: LevelProgress,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let level_progress = levels::progress_for_xp(user.xp);
        Self {
            user,
            level_progress,
        }
    }
}

#[derive(Deserialize)]
struct PushTokenPayload {
    token: String,
}

async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_or_create_user(&user_id).await?;
    Ok(Json(user.into()))
}

async fn update_notification_settings(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<NotificationSettingsUpdate>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_notification_settings(&user_id, update)
        .await?;
    Ok(Json(user.into()))
}

async fn register_push_token(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PushTokenPayload>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_service
        .register_push_token(&user_id, &payload.token)
        .await?;
    Ok(Json(user.into()))
}

async fn unregister_push_token(
    Path((user_id, token)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .unregister_push_token(&user_id, &token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}", get(get_user))
        .route(
            "/users/{user_id}/notification-settings",
            put(update_notification_settings),
        )
        .route("/users/{user_id}/push-tokens", post(register_push_token))
        .route(
            "/users/{user_id}/push-tokens/{token}",
            delete(unregister_push_token),
        )
}
