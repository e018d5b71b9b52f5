//! OpenWeatherMap proxy. Keeps the API key server-side and trims the
//! upstream payload down to what the garden dashboard actually renders.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

const OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const FORECAST_DAYS: usize = 5;

#[derive(Deserialize)]
struct WeatherQuery {
    lat: f64,
    lon: f64,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct OwmMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    humidity: i64,
    #[serde(default)]
    pressure: i64,
}

#[derive(Deserialize)]
struct OwmCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Deserialize, Default)]
struct OwmWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Deserialize, Default)]
struct OwmClouds {
    #[serde(default)]
    all: i64,
}

#[derive(Deserialize, Default)]
struct OwmSys {
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

#[derive(Deserialize)]
struct OwmCurrent {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    clouds: OwmClouds,
    #[serde(default)]
    sys: OwmSys,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize, Default)]
struct OwmRain {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

#[derive(Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmRain>,
}

#[derive(Deserialize)]
struct OwmForecast {
    list: Vec<OwmForecastItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentWeatherResponse {
    temperature: i64,
    feels_like: i64,
    condition: String,
    description: String,
    humidity: i64,
    wind_speed: i64,
    pressure: i64,
    cloudiness: i64,
    icon: String,
    location: String,
    sunrise: i64,
    sunset: i64,
    recommendation: WateringRecommendation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DailyForecast {
    date: String,
    temp: i64,
    temp_min: i64,
    temp_max: i64,
    condition: String,
    description: String,
    humidity: i64,
    wind_speed: i64,
    rain: f64,
    icon: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    forecasts: Vec<DailyForecast>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct WateringRecommendation {
    level: &'static str,
    message: &'static str,
    reason: &'static str,
}

/// Temperature in celsius; condition is the OpenWeatherMap `main` field.
fn watering_recommendation(
    temperature: i64,
    humidity: i64,
    condition: &str,
) -> WateringRecommendation {
    let condition = condition.to_lowercase();
    if temperature > 30 {
        return WateringRecommendation {
            level: "high",
            message: "Water more frequently",
            reason: "Very hot weather increases evaporation",
        };
    }
    if temperature > 25 {
        if humidity < 40 {
            return WateringRecommendation {
                level: "high",
                message: "Water more often",
                reason: "Hot and dry conditions",
            };
        }
        return WateringRecommendation {
            level: "medium-high",
            message: "Monitor closely",
            reason: "Warm weather",
        };
    }
    if condition.contains("rain") {
        return WateringRecommendation {
            level: "low",
            message: "Skip outdoor watering",
            reason: "Currently raining",
        };
    }
    if temperature < 10 {
        return WateringRecommendation {
            level: "very-low",
            message: "Minimal watering",
            reason: "Cold weather slows evaporation",
        };
    }
    if temperature < 15 {
        return WateringRecommendation {
            level: "low",
            message: "Water less frequently",
            reason: "Cool weather slows evaporation",
        };
    }
    if humidity > 80 {
        return WateringRecommendation {
            level: "low",
            message: "Water moderately",
            reason: "High humidity reduces water loss",
        };
    }
    WateringRecommendation {
        level: "normal",
        message: "Normal watering",
        reason: "Weather conditions are ideal",
    }
}

fn kmh(meters_per_second: f64) -> i64 {
    (meters_per_second * 3.6).round() as i64
}

/// One summary per calendar day, first 3-hour slot wins, capped at five days.
fn daily_summaries(items: Vec<OwmForecastItem>) -> Vec<DailyForecast> {
    let mut seen = std::collections::BTreeSet::new();
    let mut days = Vec::new();
    for item in items {
        let Some(ts) = DateTime::from_timestamp(item.dt, 0) else {
            continue;
        };
        let date = ts.date_naive().to_string();
        if !seen.insert(date.clone()) {
            continue;
        }
        let condition = item.weather.into_iter().next().unwrap_or(OwmCondition {
            main: String::new(),
            description: String::new(),
            icon: String::new(),
        });
        days.push(DailyForecast {
            date,
            temp: item.main.temp.round() as i64,
            temp_min: item.main.temp_min.round() as i64,
            temp_max: item.main.temp_max.round() as i64,
            condition: condition.main,
            description: condition.description,
            humidity: item.main.humidity,
            wind_speed: kmh(item.wind.speed),
            rain: item.rain.unwrap_or_default().three_hour,
            icon: condition.icon,
        });
        if days.len() == FORECAST_DAYS {
            break;
        }
    }
    days
}

fn api_key(state: &AppState) -> Result<&str, ApiError> {
    state.config.openweather_api_key.as_deref().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Weather service is not configured",
        )
    })
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    state: &AppState,
    url: &str,
) -> Result<T, ApiError> {
    let response = state.http_client.get(url).send().await.map_err(|e| {
        tracing::warn!("weather upstream request failed: {e}");
        ApiError::bad_gateway("Weather service temporarily unavailable")
    })?;
    if !response.status().is_success() {
        tracing::warn!("weather upstream returned {}", response.status());
        return Err(ApiError::bad_gateway(
            "Weather service temporarily unavailable",
        ));
    }
    response.json::<T>().await.map_err(|e| {
        tracing::warn!("weather upstream payload unreadable: {e}");
        ApiError::bad_gateway("Weather service temporarily unavailable")
    })
}

async fn get_weather(
    Query(query): Query<WeatherQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<axum::response::Response> {
    use axum::response::IntoResponse;

    let key = api_key(&state)?;
    if query.kind.as_deref() == Some("forecast") {
        let url = format!(
            "{OWM_BASE_URL}/forecast?lat={}&lon={}&units=metric&appid={key}",
            query.lat, query.lon
        );
        let upstream: OwmForecast = fetch_json(&state, &url).await?;
        let body = ForecastResponse {
            forecasts: daily_summaries(upstream.list),
        };
        return Ok(Json(body).into_response());
    }

    let url = format!(
        "{OWM_BASE_URL}/weather?lat={}&lon={}&units=metric&appid={key}",
        query.lat, query.lon
    );
    let upstream: OwmCurrent = fetch_json(&state, &url).await?;
    let condition = upstream.weather.into_iter().next().unwrap_or(OwmCondition {
        main: String::new(),
        description: String::new(),
        icon: String::new(),
    });
    let temperature = upstream.main.temp.round() as i64;
    let body = CurrentWeatherResponse {
        temperature,
        feels_like: upstream.main.feels_like.round() as i64,
        recommendation: watering_recommendation(
            temperature,
            upstream.main.humidity,
            &condition.main,
        ),
        condition: condition.main,
        description: condition.description,
        humidity: upstream.main.humidity,
        wind_speed: kmh(upstream.wind.speed),
        pressure: upstream.main.pressure,
        cloudiness: upstream.clouds.all,
        icon: condition.icon,
        location: upstream.name,
        sunrise: upstream.sys.sunrise,
        sunset: upstream.sys.sunset,
    };
    Ok(Json(body).into_response())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/weather", get(get_weather))
}
