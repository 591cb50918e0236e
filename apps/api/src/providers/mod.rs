//! Outbound integrations: geocoding, routing and weather.
//!
//! Services depend on the traits here, never on a concrete client, so the
//! application context can carry `Arc<dyn …>` and tests can substitute stubs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub mod mapquest;
pub mod openweather;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("Provider returned no results")]
    EmptyResult,
}

/// A latitude/longitude pair as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Raw route answer. `formatted_time` is absent when no route exists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteSummary {
    pub formatted_time: Option<String>,
    pub seconds: Option<i64>,
}

/// Current conditions in imperial units.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temp: f64,
    pub description: String,
    /// Hourly series, passed through untouched.
    pub hourly: Option<Value>,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a free-text `city,state` address to the first candidate's coordinates.
    async fn geocode(&self, city: &str, state: &str) -> Result<LatLng, ProviderError>;
}

#[async_trait]
pub trait RoutePlanner: Send + Sync {
    /// Both endpoints are `city,state` strings.
    async fn route(&self, from: &str, to: &str) -> Result<RouteSummary, ProviderError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, lat: f64, lng: f64) -> Result<CurrentWeather, ProviderError>;
}

/// Turns a non-success response into `ProviderError::Api`, keeping the body for the log.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    provider: &str,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!("{provider} returned {status}: {message}");
    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()?)
}
