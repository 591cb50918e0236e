use serde::Serialize;
use sqlx::FromRow;

pub const USERS_PATH: &str = "/api/v1/users";

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// A user that has not been persisted yet. Construction trims both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: &str, email: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserLinks {
    pub get: String,
    pub patch: String,
    pub delete: String,
    pub index: String,
}

/// Canonical JSON shape for a user record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserPayload {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub links: UserLinks,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        let item = format!("{USERS_PATH}/{}", user.id);
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            links: UserLinks {
                get: item.clone(),
                patch: item.clone(),
                delete: item,
                index: USERS_PATH.to_string(),
            },
        }
    }
}
