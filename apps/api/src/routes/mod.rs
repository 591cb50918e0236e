pub mod health;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::AppError;
use crate::forecast::handlers as forecast;
use crate::location::handlers as location;
use crate::state::AppState;
use crate::users::handlers as users;

async fn not_found() -> AppError {
    AppError::NotFound
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/users",
            get(users::handle_list_users).post(users::handle_create_user),
        )
        .route(
            "/api/v1/users/:id",
            get(users::handle_get_user)
                .patch(users::handle_update_user)
                .delete(users::handle_delete_user),
        )
        .route("/api/v1/locations", get(location::handle_get_location))
        .route("/api/v1/routes", get(location::handle_get_route))
        .route("/api/v1/forecast", get(forecast::handle_get_forecast))
        .fallback(not_found)
        .with_state(state)
}

/// Any origin; `Content-Type` allowed and exposed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_TYPE])
}
