use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::user::{NewUser, User, UserPayload};
use crate::state::AppState;
use crate::users::validation::{parse_fields, FieldValidator, Presence};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(flatten)]
    pub user: UserPayload,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            success: true,
            user: UserPayload::from(user),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub results: Vec<UserPayload>,
}

/// Ids that are not integers cannot name a stored user.
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim().parse().map_err(|_| AppError::NotFound)
}

/// GET /api/v1/users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, AppError> {
    let users = state.users.list().await?;
    Ok(Json(UserListResponse {
        success: true,
        results: users.iter().map(UserPayload::from).collect(),
    }))
}

/// POST /api/v1/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let data = parse_fields(&body)?;

    let mut validator = FieldValidator::default();
    let username = validator
        .check(&data, "username", Presence::Required)
        .unwrap_or_default();
    let email = validator
        .check(&data, "email", Presence::Required)
        .unwrap_or_default();
    validator.finish()?;

    let user = state.users.insert(NewUser::new(&username, &email)).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_id(&id)?;
    let user = state.users.find(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /api/v1/users/:id
///
/// Only fields present in the body are validated and applied. The lookup runs
/// before the body is read, so an unknown id is a 404 whatever the body holds.
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_id(&id)?;
    let mut user = state.users.find(id).await?.ok_or(AppError::NotFound)?;

    let data = parse_fields(&body)?;
    let mut validator = FieldValidator::default();
    let username = validator.check(&data, "username", Presence::Optional);
    let email = validator.check(&data, "email", Presence::Optional);
    validator.finish()?;

    if let Some(username) = username.filter(|u| !u.trim().is_empty()) {
        user.username = username;
    }
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        user.email = email;
    }

    let user = state.users.update(&user).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    if !state.users.delete(id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
