mod config;
mod db;
mod errors;
mod forecast;
mod location;
mod models;
mod providers;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod users;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::forecast::ForecastService;
use crate::location::store::PgCityStore;
use crate::location::LocationService;
use crate::providers::mapquest::MapQuestClient;
use crate::providers::openweather::OpenWeatherClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::users::store::PgUserStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Waypoint API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize provider clients
    let mapquest = Arc::new(MapQuestClient::new(
        &config.mapquest_base_url,
        config.mapquest_api_key.clone(),
        config.provider_timeout_secs,
    )?);
    let openweather = Arc::new(OpenWeatherClient::new(
        &config.openweather_base_url,
        config.openweather_api_key.clone(),
        config.provider_timeout_secs,
    )?);
    info!(
        "Provider clients initialized (mapquest: {}, openweather: {})",
        config.mapquest_base_url, config.openweather_base_url
    );

    // Build app state
    let state = AppState {
        users: Arc::new(PgUserStore::new(db.clone())),
        locations: LocationService::new(
            Arc::new(PgCityStore::new(db)),
            mapquest.clone(),
            mapquest,
        ),
        forecasts: ForecastService::new(openweather),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
