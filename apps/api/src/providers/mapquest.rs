//! MapQuest client for geocoding and driving directions.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{
    build_http_client, ensure_success, Geocoder, LatLng, ProviderError, RoutePlanner,
    RouteSummary,
};

const GEOCODE_PATH: &str = "/geocoding/v1/address";
const ROUTE_PATH: &str = "/directions/v2/route";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    locations: Vec<GeocodeLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeocodeLocation {
    display_lat_lng: LatLng,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    route: DirectionsRoute,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DirectionsRoute {
    formatted_time: Option<String>,
    time: Option<i64>,
}

#[derive(Clone)]
pub struct MapQuestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MapQuestClient {
    pub fn new(base_url: &str, api_key: String, timeout_secs: u64) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl Geocoder for MapQuestClient {
    async fn geocode(&self, city: &str, state: &str) -> Result<LatLng, ProviderError> {
        let location = format!("{city},{state}");
        let response = self
            .client
            .get(format!("{}{GEOCODE_PATH}", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("location", location.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = ensure_success(response, "MapQuest geocoding")
            .await?
            .json()
            .await?;

        let latlng = body
            .results
            .into_iter()
            .next()
            .and_then(|result| result.locations.into_iter().next())
            .map(|candidate| candidate.display_lat_lng)
            .ok_or(ProviderError::EmptyResult)?;

        debug!("Geocoded {location} to ({}, {})", latlng.lat, latlng.lng);
        Ok(latlng)
    }
}

#[async_trait]
impl RoutePlanner for MapQuestClient {
    async fn route(&self, from: &str, to: &str) -> Result<RouteSummary, ProviderError> {
        let response = self
            .client
            .get(format!("{}{ROUTE_PATH}", self.base_url))
            .query(&[("key", self.api_key.as_str()), ("from", from), ("to", to)])
            .send()
            .await?;

        let body: DirectionsResponse = ensure_success(response, "MapQuest directions")
            .await?
            .json()
            .await?;

        Ok(RouteSummary {
            formatted_time: body.route.formatted_time,
            seconds: body.route.time,
        })
    }
}
