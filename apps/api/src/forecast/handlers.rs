use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::forecast::Forecast;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub hourly: Option<String>,
}

/// `true`, `1`, `yes` and `on` (any case) ask for the hourly series; anything
/// else, including absence, does not.
fn wants_hourly(flag: Option<&str>) -> bool {
    flag.map(|f| f.trim().to_ascii_lowercase())
        .is_some_and(|f| matches!(f.as_str(), "true" | "1" | "yes" | "on"))
}

/// GET /api/v1/forecast
pub async fn handle_get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Forecast>, AppError> {
    let coordinates = state
        .locations
        .get_latlng(query.city.as_deref(), query.state.as_deref())
        .await?;
    let forecast = state
        .forecasts
        .get_forecast(Some(&coordinates), wants_hourly(query.hourly.as_deref()))
        .await?;
    Ok(Json(forecast))
}
