use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use verdant_core::activities::ActivityLog;

use crate::{error::ApiResult, main_lib::AppState};

const DEFAULT_ACTIVITY_LIMIT: i64 = 20;

#[derive(Deserialize)]
struct ActivityQuery {
    limit: Option<i64>,
}

async fn recent_activity(
    Path(user_id): Path<String>,
    Query(query): Query<ActivityQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ActivityLog>>> {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    let entries = state
        .activity_service
        .get_recent_activity(&user_id, limit)
        .await?;
    Ok(Json(entries))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users/{user_id}/activity", get(recent_activity))
}
