/// Server configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    /// Allowed CORS origin; `None` allows any (development default).
    pub cors_origin: Option<String>,
    /// OpenWeatherMap API key for the weather proxy.
    pub openweather_api_key: Option<String>,
    /// Key for the plant identification provider.
    pub identify_api_key: Option<String>,
    pub identify_api_url: String,
    /// Push gateway endpoint the reminder sweep posts to.
    pub push_api_url: String,
}

const DEFAULT_IDENTIFY_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const DEFAULT_PUSH_API_URL: &str = "https://exp.host/--/api/v2/push/send";

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            listen_addr: std::env::var("VERDANT_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8686".to_string()),
            db_path: std::env::var("VERDANT_DB_PATH")
                .unwrap_or_else(|_| "data/verdant.db".to_string()),
            cors_origin: std::env::var("VERDANT_CORS_ORIGIN").ok(),
            openweather_api_key: std::env::var("VERDANT_OPENWEATHER_API_KEY").ok(),
            identify_api_key: std::env::var("VERDANT_IDENTIFY_API_KEY").ok(),
            identify_api_url: std::env::var("VERDANT_IDENTIFY_API_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTIFY_API_URL.to_string()),
            push_api_url: std::env::var("VERDANT_PUSH_API_URL")
                .unwrap_or_else(|_| DEFAULT_PUSH_API_URL.to_string()),
        }
    }
}
