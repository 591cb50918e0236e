//! Forecast Service: current conditions for an already-resolved location.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::location::Coordinates;
use crate::providers::WeatherProvider;

pub mod handlers;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub current_temp: String,
    pub conditions: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<Value>,
}

impl Forecast {
    fn unavailable() -> Self {
        Self {
            current_temp: String::new(),
            conditions: String::new(),
            success: false,
            hourly: None,
        }
    }
}

#[derive(Clone)]
pub struct ForecastService {
    weather: Arc<dyn WeatherProvider>,
}

impl ForecastService {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    /// Missing or failed coordinates give an unsuccessful, empty forecast
    /// without calling the provider.
    pub async fn get_forecast(
        &self,
        latlng: Option<&Coordinates>,
        hourly: bool,
    ) -> Result<Forecast, AppError> {
        let Some(coords) = latlng.filter(|c| c.success) else {
            return Ok(Forecast::unavailable());
        };

        let current = self.weather.current(coords.lat, coords.lng).await?;
        Ok(Forecast {
            current_temp: format!("{}F", current.temp),
            conditions: current.description,
            success: true,
            hourly: if hourly { current.hourly } else { None },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CurrentWeather;
    use crate::test_support::TestContext;
    use serde_json::json;

    fn resolved() -> Coordinates {
        Coordinates {
            lat: 39.74,
            lng: -104.98,
            success: true,
            id: 1,
            error: None,
        }
    }

    fn snowing() -> CurrentWeather {
        CurrentWeather {
            temp: 28.4,
            description: "light snow".into(),
            hourly: Some(json!([{"temp": 27.0}])),
        }
    }

    #[tokio::test]
    async fn test_forecast_for_resolved_location() {
        let ctx = TestContext::new().with_weather(snowing());
        let forecast = ctx
            .state
            .forecasts
            .get_forecast(Some(&resolved()), false)
            .await
            .unwrap();

        assert_eq!(forecast.current_temp, "28.4F");
        assert_eq!(forecast.conditions, "light snow");
        assert!(forecast.success);
        assert_eq!(forecast.hourly, None);
        assert_eq!(ctx.weather.last_query(), Some((39.74, -104.98)));
    }

    #[tokio::test]
    async fn test_forecast_with_hourly() {
        let ctx = TestContext::new().with_weather(snowing());
        let forecast = ctx
            .state
            .forecasts
            .get_forecast(Some(&resolved()), true)
            .await
            .unwrap();

        assert_eq!(forecast.hourly, Some(json!([{"temp": 27.0}])));
    }

    #[tokio::test]
    async fn test_whole_degrees_have_no_fraction() {
        let ctx = TestContext::new().with_weather(CurrentWeather {
            temp: 72.0,
            description: "clear sky".into(),
            hourly: None,
        });
        let forecast = ctx
            .state
            .forecasts
            .get_forecast(Some(&resolved()), false)
            .await
            .unwrap();

        assert_eq!(forecast.current_temp, "72F");
    }

    #[tokio::test]
    async fn test_failed_or_missing_location_skips_provider() {
        let ctx = TestContext::new().with_weather(snowing());
        let failed = Coordinates::failure("city is required");

        for latlng in [None, Some(&failed)] {
            let forecast = ctx.state.forecasts.get_forecast(latlng, true).await.unwrap();
            assert!(!forecast.success);
            assert_eq!(forecast.current_temp, "");
            assert_eq!(forecast.conditions, "");
        }
        assert_eq!(ctx.weather.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let ctx = TestContext::new();
        let err = ctx
            .state
            .forecasts
            .get_forecast(Some(&resolved()), false)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Integration(_)));
    }
}
