//! OpenWeather One Call client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{build_http_client, ensure_success, CurrentWeather, ProviderError, WeatherProvider};

const ONECALL_PATH: &str = "/data/2.5/onecall";
const EXCLUDE: &str = "minutely,alerts,daily";
const UNITS: &str = "imperial";

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: OneCallCurrent,
    hourly: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct OneCallCurrent {
    temp: f64,
    #[serde(default)]
    weather: Vec<OneCallCondition>,
}

#[derive(Debug, Deserialize)]
struct OneCallCondition {
    description: String,
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: String, timeout_secs: u64) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, lat: f64, lng: f64) -> Result<CurrentWeather, ProviderError> {
        let response = self
            .client
            .get(format!("{}{ONECALL_PATH}", self.base_url))
            .query(&[
                ("appid", self.api_key.clone()),
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("exclude", EXCLUDE.to_string()),
                ("units", UNITS.to_string()),
            ])
            .send()
            .await?;

        let body: OneCallResponse = ensure_success(response, "OpenWeather")
            .await?
            .json()
            .await?;

        let description = body
            .current
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| ProviderError::Parse("current.weather is empty".to_string()))?;

        Ok(CurrentWeather {
            temp: body.current.temp,
            description,
            hourly: body.hourly,
        })
    }
}
