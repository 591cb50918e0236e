use anyhow::{Context, Result};

const DEFAULT_MAPQUEST_BASE_URL: &str = "http://www.mapquestapi.com";
const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub mapquest_api_key: String,
    pub mapquest_base_url: String,
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub provider_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            mapquest_api_key: require_env("MAPQUEST_API_KEY")?,
            mapquest_base_url: optional_env("MAPQUEST_BASE_URL", DEFAULT_MAPQUEST_BASE_URL),
            openweather_api_key: require_env("OPENWEATHER_API_KEY")?,
            openweather_base_url: optional_env(
                "OPENWEATHER_BASE_URL",
                DEFAULT_OPENWEATHER_BASE_URL,
            ),
            provider_timeout_secs: parse_env("PROVIDER_TIMEOUT_SECS", 30)?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
