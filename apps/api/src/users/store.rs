use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{NewUser, User};

/// Persistence for user records. Uniqueness of username and email is the
/// store's responsibility; violations surface as `AppError::Conflict`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ascending by username.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn find(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// Writes username and email of an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Returns `false` if no row had that id.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, email FROM users ORDER BY username ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT id, username, email FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email) VALUES ($1, $2) RETURNING id, username, email",
        )
        .bind(&user.username)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await?;

        info!("Created user {}", created.id);
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET username = $1, email = $2
            WHERE id = $3
            RETURNING id, username, email
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted user {id}");
        }
        Ok(result.rows_affected() > 0)
    }
}
