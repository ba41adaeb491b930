//! Public credential endpoints: register and login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::User;
use crate::error::ApiError;
use crate::AppState;

// A syntactically valid bcrypt hash that matches nothing we accept; login
// runs the comparison against it when the email is unknown so both failure
// causes cost one bcrypt pass.
const PHANTOM_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/register - create an account. No token is returned; the
/// client logs in separately.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::validation("All fields required"))?;

    let (Some(name), Some(email), Some(password)) = (
        non_empty(payload.name),
        non_empty(payload.email),
        non_empty(payload.password),
    ) else {
        return Err(ApiError::validation("All fields required"));
    };

    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(ApiError::duplicate("Email already exists"));
    }

    let hashed = User::hash_password(&password)?;
    sqlx::query("INSERT INTO users (name, email, password) VALUES ($1, $2, $3)")
        .bind(&name)
        .bind(&email)
        .bind(&hashed)
        .execute(&state.pool)
        .await?;

    tracing::info!(email = %email, "user registered");
    Ok(Json(json!({ "message": "Registration successful" })))
}

/// POST /api/login - verify credentials and mint a bearer token.
///
/// Unknown email and wrong password get the identical response; nothing in
/// the reply says which one happened.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::validation("Email and password required"))?;

    let (Some(email), Some(password)) = (non_empty(payload.email), non_empty(payload.password))
    else {
        return Err(ApiError::validation("Email and password required"));
    };

    let user: Option<User> = sqlx::query_as(
        "SELECT id, name, email, password, profile_image, created_at FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&state.pool)
    .await?;

    let valid = match &user {
        Some(user) => user.verify_password(&password),
        None => {
            let _ = bcrypt::verify(&password, PHANTOM_HASH);
            false
        }
    };

    let Some(user) = user.filter(|_| valid) else {
        return Err(ApiError::validation("Invalid credentials"));
    };

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("token issue failed: {}", e);
        ApiError::internal("Server error")
    })?;

    tracing::info!(user_id = user.id, "login succeeded");
    Ok(Json(json!({ "token": token })))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
