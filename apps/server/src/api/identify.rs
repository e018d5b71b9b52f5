//! Plant identification proxy. Sends a photo to the Gemini API and
//! normalizes the model's answer into the add-plant form's vocabulary.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use verdant_core::plants::WateringFrequency;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

const IDENTIFY_PROMPT: &str = "You are a plant identification expert. Analyze the attached photo \
and respond with a single JSON object and nothing else, using exactly these keys: \
\"name\" (common plant name), \"scientificName\", \"waterFrequency\" (number of days between \
waterings), \"sunlight\" (one of: low, bright-indirect, bright-direct, full-sun), \
\"fertilizerFrequency\" (one of: monthly, bimonthly, quarterly, seasonal, never), \
\"maintenanceFrequency\" (one of: monthly, quarterly, biannually, annually, never), \
\"specialCare\" (one short sentence of care advice). If the photo does not show a plant, \
use \"Unknown Plant\" as the name.";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyPayload {
    image_base64: String,
    #[serde(default = "default_mime_type")]
    mime_type: String,
}

fn default_mime_type() -> String {
    "image/jpeg".to_string()
}

/// What the model is asked to produce. Every field is optional; the
/// normalization below fills in defaults.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ProviderPlantInfo {
    name: Option<String>,
    scientific_name: Option<String>,
    water_frequency: Option<f64>,
    sunlight: Option<String>,
    fertilizer_frequency: Option<String>,
    maintenance_frequency: Option<String>,
    special_care: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifyResponse {
    plant_type: String,
    suggested_nickname: String,
    care_notes: String,
    watering_frequency: WateringFrequency,
    light_requirement: &'static str,
    needs_fertilizer: bool,
    needs_pruning: bool,
    fertilizer_frequency: String,
    maintenance_frequency: String,
    confidence: &'static str,
    success: bool,
}

/// Days between waterings, as reported by the model, bucketed into the
/// app's watering options.
fn watering_frequency_for_days(days: Option<f64>) -> WateringFrequency {
    let Some(days) = days else {
        return WateringFrequency::Weekly;
    };
    if days <= 1.0 {
        WateringFrequency::Daily
    } else if days <= 3.0 {
        WateringFrequency::AlternateDays
    } else if days <= 9.0 {
        WateringFrequency::Weekly
    } else if days <= 18.0 {
        WateringFrequency::Biweekly
    } else {
        WateringFrequency::Monthly
    }
}

fn normalize_light(value: Option<&str>) -> &'static str {
    let normalized = value.unwrap_or_default().to_lowercase().replace(' ', "-");
    match normalized.as_str() {
        "low" => "low",
        "bright-indirect" => "bright-indirect",
        "bright-direct" => "bright-direct",
        "full-sun" => "full-sun",
        _ if normalized.contains("low") || normalized.contains("shade") => "low",
        _ if normalized.contains("indirect") => "bright-indirect",
        _ if normalized.contains("direct") => "bright-direct",
        _ if normalized.contains("full") || normalized.contains("sun") => "full-sun",
        _ => "bright-indirect",
    }
}

fn normalize_info(info: ProviderPlantInfo) -> IdentifyResponse {
    let fertilizer_frequency = info
        .fertilizer_frequency
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "quarterly".to_string());
    let maintenance_frequency = info
        .maintenance_frequency
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "quarterly".to_string());
    IdentifyResponse {
        plant_type: info
            .name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown Plant".to_string()),
        suggested_nickname: info.scientific_name.unwrap_or_default(),
        care_notes: info.special_care.unwrap_or_default(),
        watering_frequency: watering_frequency_for_days(info.water_frequency),
        light_requirement: normalize_light(info.sunlight.as_deref()),
        needs_fertilizer: fertilizer_frequency != "never",
        needs_pruning: maintenance_frequency != "never",
        fertilizer_frequency,
        maintenance_frequency,
        confidence: "high",
        success: true,
    }
}

/// Pulls the model's JSON answer out of a Gemini generateContent response.
fn extract_provider_info(body: &serde_json::Value) -> Option<ProviderPlantInfo> {
    let text = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()?;
    // Some models wrap the JSON in a markdown fence despite instructions.
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed).ok()
}

async fn identify_plant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IdentifyPayload>,
) -> ApiResult<Json<IdentifyResponse>> {
    if payload.image_base64.is_empty() {
        return Err(ApiError::bad_request("imageBase64 is required"));
    }
    let key = state.config.identify_api_key.as_deref().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Plant identification is not configured",
        )
    })?;

    let request_body = json!({
        "contents": [{
            "parts": [
                { "text": IDENTIFY_PROMPT },
                {
                    "inline_data": {
                        "mime_type": payload.mime_type,
                        "data": payload.image_base64,
                    }
                }
            ]
        }],
        "generationConfig": { "response_mime_type": "application/json" }
    });

    let response = state
        .http_client
        .post(&state.config.identify_api_url)
        .header("x-goog-api-key", key)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("identification upstream request failed: {e}");
            ApiError::bad_gateway("Plant identification temporarily unavailable")
        })?;
    if !response.status().is_success() {
        tracing::warn!("identification upstream returned {}", response.status());
        return Err(ApiError::bad_gateway(
            "Plant identification temporarily unavailable",
        ));
    }
    let body: serde_json::Value = response.json().await.map_err(|e| {
        tracing::warn!("identification upstream payload unreadable: {e}");
        ApiError::bad_gateway("Plant identification temporarily unavailable")
    })?;

    let info = extract_provider_info(&body)
        .ok_or_else(|| ApiError::bad_gateway("Could not understand the identification answer"))?;
    Ok(Json(normalize_info(info)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/identify", post(identify_plant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_days_bucket_into_frequencies() {
        assert_eq!(
            watering_frequency_for_days(Some(1.0)),
            WateringFrequency::Daily
        );
        assert_eq!(
            watering_frequency_for_days(Some(2.0)),
            WateringFrequency::AlternateDays
        );
        assert_eq!(
            watering_frequency_for_days(Some(7.0)),
            WateringFrequency::Weekly
        );
        assert_eq!(
            watering_frequency_for_days(Some(14.0)),
            WateringFrequency::Biweekly
        );
        assert_eq!(
            watering_frequency_for_days(Some(30.0)),
            WateringFrequency::Monthly
        );
        assert_eq!(watering_frequency_for_days(None), WateringFrequency::Weekly);
    }

    #[test]
    fn light_requirement_normalizes_loose_answers() {
        assert_eq!(normalize_light(Some("Bright Indirect")), "bright-indirect");
        assert_eq!(normalize_light(Some("partial shade")), "low");
        assert_eq!(normalize_light(Some("direct sunlight")), "bright-direct");
        assert_eq!(normalize_light(Some("full sun")), "full-sun");
        assert_eq!(normalize_light(None), "bright-indirect");
    }

    #[test]
    fn provider_info_extracted_from_fenced_answer() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "```json\n{\"name\":\"Monstera\",\"waterFrequency\":7}\n```"
                    }]
                }
            }]
        });
        let info = extract_provider_info(&body).unwrap();
        assert_eq!(info.name.as_deref(), Some("Monstera"));
        let response = normalize_info(info);
        assert_eq!(response.watering_frequency, WateringFrequency::Weekly);
        assert!(response.success);
    }

    #[test]
    fn never_frequencies_clear_the_flags() {
        let info = ProviderPlantInfo {
            fertilizer_frequency: Some("never".into()),
            maintenance_frequency: Some("never".into()),
            ..Default::default()
        };
        let response = normalize_info(info);
        assert!(!response.needs_fertilizer);
        assert!(!response.needs_pruning);
        assert_eq!(response.plant_type, "Unknown Plant");
    }
}
