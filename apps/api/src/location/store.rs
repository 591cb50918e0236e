use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::city::{City, NewCity};

/// Geocoding cache keyed by exact (name, state).
#[async_trait]
pub trait CityStore: Send + Sync {
    async fn find(&self, name: &str, state: &str) -> Result<Option<City>, AppError>;

    /// Stores a resolved city. If the pair was cached concurrently the
    /// existing row is returned instead of a duplicate.
    async fn insert(&self, city: NewCity) -> Result<City, AppError>;
}

#[derive(Clone)]
pub struct PgCityStore {
    pool: PgPool,
}

impl PgCityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityStore for PgCityStore {
    async fn find(&self, name: &str, state: &str) -> Result<Option<City>, AppError> {
        Ok(sqlx::query_as::<_, City>(
            "SELECT id, name, state, lat, lng FROM cities WHERE name = $1 AND state = $2",
        )
        .bind(name)
        .bind(state)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert(&self, city: NewCity) -> Result<City, AppError> {
        // The no-op update makes RETURNING yield the winning row on conflict.
        Ok(sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (name, state, lat, lng)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name, state) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, state, lat, lng
            "#,
        )
        .bind(&city.name)
        .bind(&city.state)
        .bind(city.lat)
        .bind(city.lng)
        .fetch_one(&self.pool)
        .await?)
    }
}
