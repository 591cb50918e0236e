//! In-memory stores and counting provider stubs for handler and service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::errors::AppError;
use crate::forecast::ForecastService;
use crate::location::store::CityStore;
use crate::location::LocationService;
use crate::models::city::{City, NewCity};
use crate::models::user::{NewUser, User};
use crate::providers::{
    CurrentWeather, Geocoder, LatLng, ProviderError, RoutePlanner, RouteSummary, WeatherProvider,
};
use crate::routes::build_router;
use crate::state::AppState;
use crate::users::store::UserStore;

fn unavailable() -> ProviderError {
    ProviderError::Api {
        status: 503,
        message: "stub has no response configured".to_string(),
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
    next_id: AtomicUsize,
}

impl MemoryUserStore {
    fn check_unique(rows: &[User], candidate: &User) -> Result<(), AppError> {
        for row in rows.iter().filter(|r| r.id != candidate.id) {
            if row.username == candidate.username {
                return Err(AppError::Conflict("username already exists".into()));
            }
            if row.email == candidate.email {
                return Err(AppError::Conflict("email already exists".into()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users = self.rows.lock().unwrap().clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn find(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let candidate = User {
            id: 0,
            username: user.username,
            email: user.email,
        };
        Self::check_unique(&rows, &candidate)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i32 + 1;
        let created = User { id, ..candidate };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Self::check_unique(&rows, user)?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == user.id)
            .ok_or(AppError::NotFound)?;
        *row = user.clone();
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryCityStore {
    rows: Mutex<Vec<City>>,
}

impl MemoryCityStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CityStore for MemoryCityStore {
    async fn find(&self, name: &str, state: &str) -> Result<Option<City>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name && c.state == state)
            .cloned())
    }

    async fn insert(&self, city: NewCity) -> Result<City, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter()
            .find(|c| c.name == city.name && c.state == city.state)
        {
            return Ok(existing.clone());
        }
        let created = City {
            id: rows.len() as i32 + 1,
            name: city.name,
            state: city.state,
            lat: city.lat,
            lng: city.lng,
        };
        rows.push(created.clone());
        Ok(created)
    }
}

/// Answers every call with the configured result and records the last query.
pub struct Stub<Q, R> {
    response: Option<R>,
    calls: AtomicUsize,
    last_query: Mutex<Option<Q>>,
}

impl<Q: Clone, R: Clone> Stub<Q, R> {
    fn new(response: Option<R>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    fn answer(&self, query: Q) -> Result<R, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query);
        self.response.clone().ok_or_else(unavailable)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<Q> {
        self.last_query.lock().unwrap().clone()
    }
}

pub type StubGeocoder = Stub<String, LatLng>;
pub type StubRoutes = Stub<(String, String), RouteSummary>;
pub type StubWeather = Stub<(f64, f64), CurrentWeather>;

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, city: &str, state: &str) -> Result<LatLng, ProviderError> {
        self.answer(format!("{city},{state}"))
    }
}

#[async_trait]
impl RoutePlanner for StubRoutes {
    async fn route(&self, from: &str, to: &str) -> Result<RouteSummary, ProviderError> {
        self.answer((from.to_string(), to.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn current(&self, lat: f64, lng: f64) -> Result<CurrentWeather, ProviderError> {
        self.answer((lat, lng))
    }
}

/// A fully wired `AppState` plus handles on every collaborator.
/// Providers fail until configured with a `with_*` builder. The builders
/// start from empty stores, so seed data after building.
pub struct TestContext {
    pub state: AppState,
    pub users: Arc<MemoryUserStore>,
    pub cities: Arc<MemoryCityStore>,
    pub geocoder: Arc<StubGeocoder>,
    pub routes: Arc<StubRoutes>,
    pub weather: Arc<StubWeather>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::assemble(
            Arc::new(Stub::new(None)),
            Arc::new(Stub::new(None)),
            Arc::new(Stub::new(None)),
        )
    }

    fn assemble(
        geocoder: Arc<StubGeocoder>,
        routes: Arc<StubRoutes>,
        weather: Arc<StubWeather>,
    ) -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let cities = Arc::new(MemoryCityStore::default());
        let state = AppState {
            users: users.clone(),
            locations: LocationService::new(cities.clone(), geocoder.clone(), routes.clone()),
            forecasts: ForecastService::new(weather.clone()),
        };
        Self {
            state,
            users,
            cities,
            geocoder,
            routes,
            weather,
        }
    }

    pub fn with_geocode(self, latlng: LatLng) -> Self {
        Self::assemble(
            Arc::new(Stub::new(Some(latlng))),
            self.routes,
            self.weather,
        )
    }

    pub fn with_route(self, summary: RouteSummary) -> Self {
        Self::assemble(
            self.geocoder,
            Arc::new(Stub::new(Some(summary))),
            self.weather,
        )
    }

    pub fn with_weather(self, weather: CurrentWeather) -> Self {
        Self::assemble(
            self.geocoder,
            self.routes,
            Arc::new(Stub::new(Some(weather))),
        )
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }
}

/// Sends one request through `app`. An empty response body decodes to `Value::Null`.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(json) => request.body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
