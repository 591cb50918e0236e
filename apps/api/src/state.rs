use std::sync::Arc;

use crate::forecast::ForecastService;
use crate::location::LocationService;
use crate::users::store::UserStore;

/// Application context built once in `main` and injected into every handler
/// via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub locations: LocationService,
    pub forecasts: ForecastService,
}
