use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

mod achievements;
mod activities;
mod identify;
mod plants;
mod users;
mod weather;

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .expect("invalid VERDANT_CORS_ORIGIN"),
            )
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .merge(users::router())
        .merge(plants::router())
        .merge(achievements::router())
        .merge(activities::router())
        .merge(weather::router())
        .merge(identify::router())
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
}
