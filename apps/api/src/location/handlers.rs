use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::location::{Coordinates, Resolution, RouteEstimate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from_city: Option<String>,
    pub from_state: Option<String>,
    pub to_city: Option<String>,
    pub to_state: Option<String>,
}

/// GET /api/v1/locations
///
/// Rejected input is still a 200; the payload's `success`/`error` say why.
pub async fn handle_get_location(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<Coordinates>, AppError> {
    let coordinates = state
        .locations
        .get_latlng(query.city.as_deref(), query.state.as_deref())
        .await?;
    Ok(Json(coordinates))
}

/// GET /api/v1/routes
pub async fn handle_get_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteEstimate>, AppError> {
    let start = state
        .locations
        .resolve(query.from_city.as_deref(), query.from_state.as_deref())
        .await?;
    let end = state
        .locations
        .resolve(query.to_city.as_deref(), query.to_state.as_deref())
        .await?;

    let (start, end) = match (start, end) {
        (Resolution::Found(start), Resolution::Found(end)) => (start, end),
        (start, end) => {
            let mut errors = Vec::new();
            if let Resolution::Rejected(message) = start {
                errors.push(format!("from: {message}"));
            }
            if let Resolution::Rejected(message) = end {
                errors.push(format!("to: {message}"));
            }
            return Err(AppError::BadRequest(errors));
        }
    };

    let estimate = state.locations.route_distance_time(&start, &end).await?;
    Ok(Json(estimate))
}
