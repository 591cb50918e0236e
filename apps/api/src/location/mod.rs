//! Location Service: resolves (city, state) pairs to coordinates through the
//! `cities` cache, falling back to the geocoding provider on a miss, and
//! estimates drive time between two resolved cities.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::city::{City, NewCity};
use crate::providers::{Geocoder, RoutePlanner};
use crate::users::validation::sanitize;

pub mod eta;
pub mod handlers;
pub mod store;

use eta::format_eta;
use store::CityStore;

pub const CITY_REQUIRED: &str = "city is required";
pub const STATE_REQUIRED: &str = "state is required";
pub const STATE_LENGTH: &str = "state length must be 2 characters";
pub const IMPOSSIBLE_ROUTE: &str = "impossible route";

const SENTINEL_LAT: f64 = -90.0;
const SENTINEL_LNG: f64 = -180.0;

/// Coordinate-resolution payload. Failures carry sentinel coordinates and id 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
    pub success: bool,
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Coordinates {
    pub fn failure(message: &str) -> Self {
        Self {
            lat: SENTINEL_LAT,
            lng: SENTINEL_LNG,
            success: false,
            id: 0,
            error: Some(message.to_string()),
        }
    }
}

impl From<&City> for Coordinates {
    fn from(city: &City) -> Self {
        Self {
            lat: city.lat,
            lng: city.lng,
            success: true,
            id: city.id,
            error: None,
        }
    }
}

/// Outcome of resolving user-supplied input.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(City),
    /// Input was rejected before any lookup.
    Rejected(&'static str),
}

/// Human-readable drive time plus the provider's raw seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

#[derive(Clone)]
pub struct LocationService {
    cities: Arc<dyn CityStore>,
    geocoder: Arc<dyn Geocoder>,
    routes: Arc<dyn RoutePlanner>,
}

impl LocationService {
    pub fn new(
        cities: Arc<dyn CityStore>,
        geocoder: Arc<dyn Geocoder>,
        routes: Arc<dyn RoutePlanner>,
    ) -> Self {
        Self {
            cities,
            geocoder,
            routes,
        }
    }

    /// Resolves a city, consulting the cache before the geocoding provider.
    /// The sanitized pair is the cache key; the provider gets the trimmed
    /// input as typed. Provider failures propagate as `AppError::Integration`.
    pub async fn resolve(
        &self,
        city: Option<&str>,
        state: Option<&str>,
    ) -> Result<Resolution, AppError> {
        let Some((city_input, city)) = clean(city) else {
            return Ok(Resolution::Rejected(CITY_REQUIRED));
        };
        let Some((state_input, state)) = clean(state) else {
            return Ok(Resolution::Rejected(STATE_REQUIRED));
        };
        if state.chars().count() != 2 {
            return Ok(Resolution::Rejected(STATE_LENGTH));
        }

        if let Some(cached) = self.cities.find(&city, &state).await? {
            debug!("City cache hit for {}", cached.city_state());
            return Ok(Resolution::Found(cached));
        }

        info!("City cache miss for {city},{state}; geocoding");
        let latlng = self.geocoder.geocode(city_input, state_input).await?;
        let created = self
            .cities
            .insert(NewCity {
                name: city,
                state,
                lat: latlng.lat,
                lng: latlng.lng,
            })
            .await?;

        Ok(Resolution::Found(created))
    }

    /// `resolve` rendered as the coordinate-resolution payload.
    pub async fn get_latlng(
        &self,
        city: Option<&str>,
        state: Option<&str>,
    ) -> Result<Coordinates, AppError> {
        Ok(match self.resolve(city, state).await? {
            Resolution::Found(city) => Coordinates::from(&city),
            Resolution::Rejected(message) => Coordinates::failure(message),
        })
    }

    pub async fn route_distance_time(
        &self,
        start: &City,
        end: &City,
    ) -> Result<RouteEstimate, AppError> {
        let summary = self
            .routes
            .route(&start.city_state(), &end.city_state())
            .await?;

        match summary.formatted_time {
            Some(formatted) => Ok(RouteEstimate {
                string: format_eta(&formatted)?,
                seconds: summary.seconds,
            }),
            None => Ok(RouteEstimate {
                string: IMPOSSIBLE_ROUTE.to_string(),
                seconds: None,
            }),
        }
    }
}

/// Trimmed input alongside its sanitized form, or `None` when either is blank.
fn clean(value: Option<&str>) -> Option<(&str, String)> {
    let input = value?.trim();
    let key = sanitize(input);
    (!input.is_empty() && !key.is_empty()).then_some((input, key))
}
