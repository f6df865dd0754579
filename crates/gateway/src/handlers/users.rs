//! User account handlers
//!
//! Accounts are addressed by email. Passwords are hashed before they are
//! stored; responses carry the stored hash.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use super::invalid_body;
use crate::AppState;
use admission_common::{
    api::{CreateUserRequest, CreateUserResponse, UpdateUserRequest, UserView},
    auth::hash_password,
    db::models::{generate_user_id, User},
    errors::{AppError, Result},
    metrics,
};

/// Argon2 is CPU-bound; keep it off the async workers
async fn hash_off_thread(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
}

/// List every user
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>> {
    let users = state.repo.list_users().await?;

    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// Create a user with a freshly generated identifier
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    let Json(request) = payload.map_err(invalid_body)?;
    request.validate()?;

    let user_id = generate_user_id(&mut rand::thread_rng());
    let password = hash_off_thread(request.password.unwrap_or_default()).await?;

    let user = User {
        id: None,
        user_id: user_id.clone(),
        full_name: request.full_name.unwrap_or_default(),
        college_name: request.college_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        password,
    };

    let object_id = state.repo.insert_user(user).await?;
    metrics::record_user_change("created");

    tracing::info!(
        user_id = %user_id,
        record_id = %object_id,
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully".to_string(),
            user_id,
        }),
    ))
}

/// Get a user by email
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserView>> {
    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::UserNotFound { email })?;

    Ok(Json(user.into()))
}

/// Merge the provided fields into the user and return the result
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserView>> {
    let Json(body) = payload.map_err(invalid_body)?;

    // Structs also deserialize from arrays; only an object is an update
    if !body.is_object() {
        return Err(AppError::InvalidFormat {
            message: "Update body must be a JSON object".to_string(),
        });
    }
    let mut update: UpdateUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::InvalidFormat {
            message: e.to_string(),
        })?;

    if let Some(password) = update.password.take() {
        update.password = Some(hash_off_thread(password).await?);
    }

    let user = state
        .repo
        .update_user_by_email(&email, &update)
        .await?
        .ok_or_else(|| AppError::UserNotFound { email: email.clone() })?;

    metrics::record_user_change("updated");

    if user.email != email {
        // Later lookups must use the new address
        tracing::info!(user_id = %user.user_id, "User email changed");
    }
    tracing::info!(user_id = %user.user_id, "User updated");

    Ok(Json(user.into()))
}

/// Delete a user and echo the removed record
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserView>> {
    let user = state
        .repo
        .delete_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::UserNotFound { email })?;

    metrics::record_user_change("deleted");
    tracing::info!(user_id = %user.user_id, "User deleted");

    Ok(Json(user.into()))
}
